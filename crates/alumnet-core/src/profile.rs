//! Profile mutation coordination.
//!
//! Every write is followed by a full re-fetch of the owning record, so
//! the caller's copy can never drift from server state after a write.
//! That costs one extra round trip per mutation and buys correctness.
//! Concurrent edits resolve last-write-wins at the server; there is no
//! optimistic-concurrency detection.

use crate::api::{ApiClient, ApiError};
use crate::models::{
    Achievement, AdminAlumniUpdate, AlumniBasics, AlumniRecord, Education, Employment,
    VerificationStatus,
};

/// Which record the coordinator operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// The caller's own record, through the `/alumni/profile` surface.
    OwnProfile,
    /// An arbitrary record, through the `/admin/alumni/{id}` surface.
    Admin { alumni_id: i64 },
}

/// Applies create/update/delete operations against a single alumni
/// record and re-reads the record after each one.
pub struct ProfileCoordinator {
    client: ApiClient,
    target: Target,
}

impl ProfileCoordinator {
    /// Coordinator for the caller's own record.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            target: Target::OwnProfile,
        }
    }

    /// Coordinator for an administrator editing an arbitrary record.
    pub fn for_admin(client: ApiClient, alumni_id: i64) -> Self {
        Self {
            client,
            target: Target::Admin { alumni_id },
        }
    }

    /// Read the owning record. An absent record surfaces as `NotFound`
    /// for the caller's placeholder state.
    pub async fn fetch(&self) -> Result<AlumniRecord, ApiError> {
        match self.target {
            Target::OwnProfile => self.client.get_profile().await,
            Target::Admin { alumni_id } => self.client.admin_get_alumni(alumni_id).await,
        }
    }

    /// Rewrite the basic profile fields.
    pub async fn update_basics(&self, basics: &AlumniBasics) -> Result<AlumniRecord, ApiError> {
        if basics.full_name.trim().is_empty() {
            return Err(ApiError::Validation("full name is required".to_string()));
        }
        match self.target {
            Target::OwnProfile => self.client.update_profile(basics).await?,
            Target::Admin { alumni_id } => {
                self.client
                    .admin_update_alumni(alumni_id, &AdminAlumniUpdate::basics(basics))
                    .await?
            }
        }
        self.fetch().await
    }

    pub async fn add_education(&self, education: &Education) -> Result<AlumniRecord, ApiError> {
        education.validate().map_err(ApiError::Validation)?;
        match self.target {
            Target::OwnProfile => self.client.add_education(education).await?,
            Target::Admin { alumni_id } => {
                self.client.admin_add_education(alumni_id, education).await?
            }
        }
        self.fetch().await
    }

    pub async fn remove_education(&self, id: &str) -> Result<AlumniRecord, ApiError> {
        match self.target {
            Target::OwnProfile => self.client.delete_education(id).await?,
            Target::Admin { alumni_id } => {
                self.client.admin_delete_education(alumni_id, id).await?
            }
        }
        self.fetch().await
    }

    pub async fn add_employment(&self, employment: &Employment) -> Result<AlumniRecord, ApiError> {
        employment.validate().map_err(ApiError::Validation)?;
        match self.target {
            Target::OwnProfile => self.client.add_employment(employment).await?,
            Target::Admin { alumni_id } => {
                self.client.admin_add_employment(alumni_id, employment).await?
            }
        }
        self.fetch().await
    }

    pub async fn remove_employment(&self, id: &str) -> Result<AlumniRecord, ApiError> {
        match self.target {
            Target::OwnProfile => self.client.delete_employment(id).await?,
            Target::Admin { alumni_id } => {
                self.client.admin_delete_employment(alumni_id, id).await?
            }
        }
        self.fetch().await
    }

    pub async fn add_achievement(
        &self,
        achievement: &Achievement,
    ) -> Result<AlumniRecord, ApiError> {
        achievement.validate().map_err(ApiError::Validation)?;
        match self.target {
            Target::OwnProfile => self.client.add_achievement(achievement).await?,
            Target::Admin { alumni_id } => {
                self.client
                    .admin_add_achievement(alumni_id, achievement)
                    .await?
            }
        }
        self.fetch().await
    }

    pub async fn remove_achievement(&self, id: &str) -> Result<AlumniRecord, ApiError> {
        match self.target {
            Target::OwnProfile => self.client.delete_achievement(id).await?,
            Target::Admin { alumni_id } => {
                self.client.admin_delete_achievement(alumni_id, id).await?
            }
        }
        self.fetch().await
    }

    /// Move the record's moderation state. Administrators only; an
    /// alumnus never moderates their own record.
    pub async fn set_verification(
        &self,
        status: VerificationStatus,
    ) -> Result<AlumniRecord, ApiError> {
        match self.target {
            Target::OwnProfile => Err(ApiError::AccessDenied(
                "verification status is moderated by administrators".to_string(),
            )),
            Target::Admin { alumni_id } => {
                self.client
                    .admin_update_alumni(alumni_id, &AdminAlumniUpdate::verification(status))
                    .await?;
                self.fetch().await
            }
        }
    }

    /// Remove the whole record. Administrators only. No re-fetch; the
    /// record no longer exists.
    pub async fn delete_record(&self) -> Result<(), ApiError> {
        match self.target {
            Target::OwnProfile => Err(ApiError::AccessDenied(
                "record deletion is an administrator operation".to_string(),
            )),
            Target::Admin { alumni_id } => self.client.admin_delete_alumni(alumni_id).await,
        }
    }

    /// Upload a profile image for the caller's own record and re-read
    /// the record with its new image reference.
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<AlumniRecord, ApiError> {
        match self.target {
            Target::OwnProfile => {
                self.client.upload_profile_image(file_name, bytes).await?;
                self.fetch().await
            }
            Target::Admin { .. } => Err(ApiError::AccessDenied(
                "profile images are uploaded by their owner".to_string(),
            )),
        }
    }
}

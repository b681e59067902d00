use serde::{Deserialize, Serialize};

use super::alumni::{AlumniBasics, VerificationStatus};

/// Known values for the directory filter dropdowns, maintained
/// server-side from the records themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCategories {
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub positions: Vec<String>,
}

/// Headline numbers for the admin landing view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub total_alumni: i64,
    #[serde(default)]
    pub new_registrations: i64,
    #[serde(default)]
    pub pending_verification: i64,
    #[serde(default)]
    pub verified_alumni: i64,
    #[serde(default)]
    pub recent_alumni: Vec<RecentAlumnus>,
    #[serde(default)]
    pub alumni_by_department: Vec<DepartmentCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentAlumnus {
    pub alumni_id: i64,
    pub full_name: String,
    pub email: String,
    pub created_at: String,
    #[serde(default)]
    pub verification_status: Option<VerificationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

/// Partial update payload for the admin record surface. Absent fields
/// are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminAlumniUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(rename = "current_location", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "availability_for_mentorship", skip_serializing_if = "Option::is_none")]
    pub mentorship_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
}

impl AdminAlumniUpdate {
    /// Update that only moves the moderation state.
    pub fn verification(status: VerificationStatus) -> Self {
        Self {
            verification_status: Some(status),
            ..Self::default()
        }
    }

    /// Update that rewrites the basic profile fields.
    pub fn basics(basics: &AlumniBasics) -> Self {
        Self {
            full_name: Some(basics.full_name.clone()),
            bio: basics.bio.clone(),
            contact_number: basics.contact_number.clone(),
            location: basics.location.clone(),
            mentorship_available: Some(basics.mentorship_available),
            verification_status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_update_sends_only_the_status() {
        let update = AdminAlumniUpdate::verification(VerificationStatus::Verified);
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "verification_status": "verified" })
        );
    }

    #[test]
    fn dashboard_tolerates_missing_sections() {
        let dashboard: DashboardData = serde_json::from_str(r#"{"total_alumni": 12}"#).unwrap();
        assert_eq!(dashboard.total_alumni, 12);
        assert!(dashboard.recent_alumni.is_empty());
        assert!(dashboard.alumni_by_department.is_empty());
    }
}

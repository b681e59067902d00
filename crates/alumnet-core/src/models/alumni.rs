use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Moderation state of an alumni record. New registrations start out
/// pending until an administrator reviews them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStatus::Pending => write!(f, "Pending"),
            VerificationStatus::Verified => write!(f, "Verified"),
            VerificationStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// One degree entry in an alumni record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub degree: String,
    pub department: String,
    pub institution: String,
    pub start_year: i32,
    pub end_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<String>,
}

impl Education {
    /// Check the entry before it goes over the wire.
    pub fn validate(&self) -> Result<(), String> {
        if self.degree.trim().is_empty() {
            return Err("degree is required".to_string());
        }
        if self.department.trim().is_empty() {
            return Err("department is required".to_string());
        }
        if self.institution.trim().is_empty() {
            return Err("institution is required".to_string());
        }
        if self.end_year < self.start_year {
            return Err(format!(
                "end year {} is before start year {}",
                self.end_year, self.start_year
            ));
        }
        Ok(())
    }
}

/// One employment entry in an alumni record. A current position has no
/// end date; an ended one must carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub company_name: String,
    pub position: String,
    pub location: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Employment {
    pub fn validate(&self) -> Result<(), String> {
        if self.company_name.trim().is_empty() {
            return Err("company name is required".to_string());
        }
        if self.position.trim().is_empty() {
            return Err("position is required".to_string());
        }
        match (self.is_current, self.end_date) {
            (true, Some(_)) => Err("a current position cannot carry an end date".to_string()),
            (false, None) => Err("an ended position requires an end date".to_string()),
            (false, Some(end)) if end < self.start_date => Err(format!(
                "end date {} is before start date {}",
                end, self.start_date
            )),
            _ => Ok(()),
        }
    }
}

/// A notable accomplishment attached to an alumni record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_link: Option<String>,
}

impl Achievement {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        Ok(())
    }
}

/// The editable basic fields of a profile, updated as one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlumniBasics {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, rename = "current_location", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, rename = "availability_for_mentorship")]
    pub mentorship_available: bool,
}

/// The full profile aggregate for one member: basics plus education,
/// employment, and achievement histories. Owned by exactly one alumnus;
/// administrators may mutate it but never own it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlumniRecord {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, rename = "current_location", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, rename = "availability_for_mentorship")]
    pub mentorship_available: bool,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default, rename = "jobs")]
    pub employment: Vec<Employment>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl AlumniRecord {
    /// The basic fields as an update payload.
    pub fn basics(&self) -> AlumniBasics {
        AlumniBasics {
            full_name: self.full_name.clone(),
            bio: self.bio.clone(),
            contact_number: self.contact_number.clone(),
            location: self.location.clone(),
            mentorship_available: self.mentorship_available,
        }
    }
}

/// One row of a directory listing. A condensed projection of the
/// record, shaped by the listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlumniSummary {
    #[serde(rename = "alumni_id")]
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub current_company: Option<String>,
    #[serde(default)]
    pub current_position: Option<String>,
    #[serde(default, rename = "current_location")]
    pub location: Option<String>,
    #[serde(default, rename = "availability_for_mentorship")]
    pub mentorship_available: bool,
    #[serde(default)]
    pub verification_status: Option<VerificationStatus>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Paginated listing body as the server sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PagedResponse<T> {
    #[serde(default)]
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

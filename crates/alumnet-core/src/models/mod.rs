//! Domain and wire types for alumni records, directory listings, and
//! the admin overview surfaces.

pub mod admin;
pub mod alumni;

pub use admin::{AdminAlumniUpdate, DashboardData, DepartmentCount, FilterCategories, RecentAlumnus};
pub use alumni::{
    Achievement, AlumniBasics, AlumniRecord, AlumniSummary, Education, Employment, PagedResponse,
    VerificationStatus,
};

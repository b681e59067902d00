//! Directory browsing: canonical queries, stable paged results, and
//! the engine that executes them against the admin listing endpoints.

pub mod engine;
pub mod query;

pub use engine::{DirectoryBackend, DirectoryEngine};
pub use query::{DirectoryFilters, DirectoryPage, DirectoryQuery, FilterKey, DEFAULT_PER_PAGE};

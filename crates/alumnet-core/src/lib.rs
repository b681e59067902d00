//! Core library for the alumnet membership directory client.
//!
//! This crate holds everything behind the UI: the REST API client, the
//! session and credential layer, the role gate, the directory query
//! engine, and the profile mutation coordinator. Rendering, routing,
//! and styling live in the frontends that consume it.

pub mod api;
pub mod auth;
pub mod config;
pub mod directory;
pub mod models;
pub mod profile;

pub use api::{ApiClient, ApiError};
pub use auth::{
    can_access, CredentialStore, Decision, Identity, Role, Session, SessionManager,
    ViewRequirement,
};
pub use config::Config;
pub use directory::{
    DirectoryBackend, DirectoryEngine, DirectoryFilters, DirectoryPage, DirectoryQuery, FilterKey,
};
pub use profile::ProfileCoordinator;

//! Session and authorization for the alumnet client.
//!
//! This module provides:
//! - `CredentialStore`: durable token + identity storage behind reloads
//! - `SessionManager`: login, registration, restore, and logout flows
//! - `can_access`: the single role gate consulted by every routed view
//!
//! Identity is always derived from the signed token claim, never from
//! user input or a server echo. Changing roles requires a new session.

pub mod access;
pub mod credentials;
pub mod session;
pub mod token;

pub use access::{can_access, Decision, ViewRequirement};
pub use credentials::CredentialStore;
pub use session::{Identity, RegisterAdmin, RegisterAlumni, Role, Session, SessionManager};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::Education;

use super::credentials::CredentialStore;
use super::token;

/// Coarse-grained permission class, Alumni or Administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Alumni,
    Administrator,
}

/// The decoded, authoritative claim about who is making requests.
/// Derived from the token, never entered by the user; immutable for the
/// lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject_id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// A live authenticated session: the bearer token and the identity
/// decoded out of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    fn issue(token: String, identity: Identity) -> Self {
        Self {
            token,
            identity,
            issued_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }
}

/// Alumni registration fields. The confirmation field never goes over
/// the wire; it exists for the local fail-fast check only.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterAlumni {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    pub email: String,
    pub is_alumni: bool,
    pub full_name: String,
    pub education: Education,
}

/// Administrator registration fields.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterAdmin {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    pub email: String,
    pub is_alumni: bool,
    pub department: String,
    pub designation: String,
}

/// Issues, restores, and invalidates sessions.
///
/// The credential store is the only mutable shared state in the core;
/// this manager is its only writer. Token expiry is discovered lazily:
/// the first gated call that comes back `AuthorizationExpired` should
/// be answered with `logout()` and a redirect to login. Nothing here
/// pre-checks expiry.
pub struct SessionManager {
    api: ApiClient,
    store: CredentialStore,
    session: Option<Session>,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: CredentialStore) -> Self {
        Self {
            api,
            store,
            session: None,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Token-attached client for collaborators that call gated
    /// endpoints. Without a session this is the plain client.
    pub fn client(&self) -> ApiClient {
        match &self.session {
            Some(session) => self.api.with_token(session.token.clone()),
            None => self.api.clone(),
        }
    }

    /// Authenticate and establish a session. The identity comes from
    /// the token's claim segment; no follow-up who-am-I call is made.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&Session, ApiError> {
        let token = self.api.login(username, password).await?;
        self.establish(token)
    }

    /// Register a new alumnus and establish a session. Fails fast with
    /// `PasswordMismatch` before any network call.
    pub async fn register_alumni(&mut self, request: &RegisterAlumni) -> Result<&Session, ApiError> {
        if request.password != request.confirm_password {
            return Err(ApiError::PasswordMismatch);
        }
        let mut payload = request.clone();
        payload.is_alumni = true;
        let token = self.api.register(&payload).await?;
        self.establish(token)
    }

    /// Register a new administrator and establish a session.
    pub async fn register_admin(&mut self, request: &RegisterAdmin) -> Result<&Session, ApiError> {
        if request.password != request.confirm_password {
            return Err(ApiError::PasswordMismatch);
        }
        let mut payload = request.clone();
        payload.is_alumni = false;
        let token = self.api.register(&payload).await?;
        self.establish(token)
    }

    fn establish(&mut self, token: String) -> Result<&Session, ApiError> {
        let identity = token::decode_identity(&token)?;
        let session = Session::issue(token, identity);

        // A persistence failure is not fatal; the in-memory session
        // stands, it just will not survive a restart.
        if let Err(e) = self.store.save(&session) {
            warn!(error = %e, "failed to persist session");
        }

        debug!(
            username = %session.identity.username,
            role = ?session.identity.role,
            "session established"
        );
        Ok(self.session.insert(session))
    }

    /// Reconstruct the session from the credential store, once at
    /// process start. Expiry is not validated here.
    pub fn restore(&mut self) -> Option<&Session> {
        self.session = self.store.load();
        if let Some(ref session) = self.session {
            debug!(username = %session.identity.username, "session restored");
        }
        self.session.as_ref()
    }

    /// Clear the session everywhere. Idempotent, never fails.
    pub fn logout(&mut self) {
        self.store.clear();
        self.session = None;
    }
}

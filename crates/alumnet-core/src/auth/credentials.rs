use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::session::Session;
use super::token;

/// File holding the opaque bearer token.
const TOKEN_FILE: &str = "token";

/// File holding the serialized identity next to the token.
const IDENTITY_FILE: &str = "identity.json";

/// On-disk shape of the identity entry. The issue time rides along so a
/// restored session keeps it.
#[derive(Debug, Serialize, Deserialize)]
struct StoredIdentity {
    identity: super::session::Identity,
    issued_at: DateTime<Utc>,
}

/// Durable holder of the current session: two entries under one
/// directory, the opaque token and the serialized identity. A page
/// reload (or process restart) reconstructs the session from here
/// without a network call.
pub struct CredentialStore {
    storage_dir: PathBuf,
}

impl CredentialStore {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    /// Persist both entries. Refuses a session whose token is not three
    /// dot-separated base64url segments; nothing is written in that case.
    pub fn save(&self, session: &Session) -> Result<()> {
        if !token::is_well_formed(&session.token) {
            anyhow::bail!("refusing to persist a syntactically invalid token");
        }

        std::fs::create_dir_all(&self.storage_dir)
            .context("Failed to create credential storage directory")?;

        std::fs::write(self.token_path(), &session.token)
            .context("Failed to write token entry")?;

        let stored = StoredIdentity {
            identity: session.identity.clone(),
            issued_at: session.issued_at,
        };
        let contents = serde_json::to_string_pretty(&stored)?;
        std::fs::write(self.identity_path(), contents)
            .context("Failed to write identity entry")?;

        Ok(())
    }

    /// Reload the persisted session, if any.
    ///
    /// Fails soft: a missing entry, a malformed token, or an unreadable
    /// identity clears the store and returns `None`. A corrupted store
    /// degrades to "logged out", it never takes navigation down with it.
    pub fn load(&self) -> Option<Session> {
        let token = std::fs::read_to_string(self.token_path()).ok();
        let identity = std::fs::read_to_string(self.identity_path()).ok();

        let (Some(token), Some(identity)) = (token, identity) else {
            // One entry without the other is half a session.
            self.clear();
            return None;
        };

        let token = token.trim().to_string();
        if !token::is_well_formed(&token) {
            warn!("stored token is malformed, clearing credentials");
            self.clear();
            return None;
        }

        match serde_json::from_str::<StoredIdentity>(&identity) {
            Ok(stored) => Some(Session {
                token,
                identity: stored.identity,
                issued_at: stored.issued_at,
            }),
            Err(e) => {
                warn!(error = %e, "stored identity is unreadable, clearing credentials");
                self.clear();
                None
            }
        }
    }

    /// Remove both entries. Idempotent; IO failures are logged and
    /// swallowed so logout can never fail.
    pub fn clear(&self) {
        for path in [self.token_path(), self.identity_path()] {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(&path) {
                    warn!(path = %path.display(), error = %e, "failed to remove credential entry");
                }
            }
        }
    }

    fn token_path(&self) -> PathBuf {
        self.storage_dir.join(TOKEN_FILE)
    }

    fn identity_path(&self) -> PathBuf {
        self.storage_dir.join(IDENTITY_FILE)
    }
}

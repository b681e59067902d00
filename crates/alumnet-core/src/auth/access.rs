//! The role gate.
//!
//! Every routed view declares one `ViewRequirement` and consults
//! `can_access` with the current session. The decision table lives here
//! and nowhere else; views never re-derive role checks ad hoc.

use super::session::{Role, Session};

/// What a view demands of the caller before it may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRequirement {
    Public,
    AuthenticatedAny,
    AuthenticatedAlumni,
    AuthenticatedAdministrator,
    /// Login and registration screens; pointless once signed in.
    UnauthenticatedOnly,
}

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectToLogin,
    /// Send the caller to their role-appropriate landing view.
    RedirectToHome,
}

/// Decide whether a view may proceed for the current session.
///
/// Pure and total. Rules are evaluated top to bottom; the first match
/// wins.
pub fn can_access(session: Option<&Session>, requirement: ViewRequirement) -> Decision {
    match (session, requirement) {
        (_, ViewRequirement::Public) => Decision::Allow,
        (None, ViewRequirement::UnauthenticatedOnly) => Decision::Allow,
        (None, _) => Decision::RedirectToLogin,
        (Some(_), ViewRequirement::UnauthenticatedOnly) => Decision::RedirectToHome,
        (Some(session), ViewRequirement::AuthenticatedAlumni)
            if session.role() != Role::Alumni =>
        {
            Decision::RedirectToHome
        }
        (Some(session), ViewRequirement::AuthenticatedAdministrator)
            if session.role() != Role::Administrator =>
        {
            Decision::RedirectToHome
        }
        (Some(_), _) => Decision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::Identity;
    use chrono::Utc;

    fn session_with_role(role: Role) -> Session {
        Session {
            token: "aaa.bbb.ccc".to_string(),
            identity: Identity {
                subject_id: "17".to_string(),
                username: "alice".to_string(),
                email: "alice@example.edu".to_string(),
                role,
            },
            issued_at: Utc::now(),
        }
    }

    #[test]
    fn full_decision_table() {
        use Decision::*;
        use ViewRequirement::*;

        let alumni = session_with_role(Role::Alumni);
        let admin = session_with_role(Role::Administrator);

        // (requirement, no session, alumni session, administrator session)
        let table = [
            (Public, Allow, Allow, Allow),
            (AuthenticatedAny, RedirectToLogin, Allow, Allow),
            (AuthenticatedAlumni, RedirectToLogin, Allow, RedirectToHome),
            (
                AuthenticatedAdministrator,
                RedirectToLogin,
                RedirectToHome,
                Allow,
            ),
            (UnauthenticatedOnly, Allow, RedirectToHome, RedirectToHome),
        ];

        for (requirement, anonymous, as_alumni, as_admin) in table {
            assert_eq!(
                can_access(None, requirement),
                anonymous,
                "anonymous x {:?}",
                requirement
            );
            assert_eq!(
                can_access(Some(&alumni), requirement),
                as_alumni,
                "alumni x {:?}",
                requirement
            );
            assert_eq!(
                can_access(Some(&admin), requirement),
                as_admin,
                "administrator x {:?}",
                requirement
            );
        }
    }
}

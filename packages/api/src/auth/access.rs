//! Route gating for the role dashboards.
//!
//! Every protected page runs the same three-way check: no session sends the
//! visitor to `/login` (remembering where they were going in `from`), a session
//! with another role is bounced to that role's own dashboard, and a matching
//! role is let through.

use super::Role;

/// Outcome of checking a session against a page's required role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// The session is still being fetched.
    Pending,
    Granted,
    /// Not signed in, or signed in without any role metadata.
    Login { from: String },
    /// Signed in with a different role.
    Redirect(Role),
}

impl Access {
    /// Where the visitor should be sent, if anywhere.
    pub fn target(&self) -> Option<String> {
        match self {
            Access::Pending | Access::Granted => None,
            Access::Login { from } => Some(format!("/login?from={from}")),
            Access::Redirect(role) => Some(role.dashboard_path().to_string()),
        }
    }
}

/// Decide whether a session may view the dashboard for `required`.
pub fn resolve_access(session_present: bool, role: Option<Role>, required: Role, loading: bool) -> Access {
    if loading {
        return Access::Pending;
    }
    if !session_present {
        return Access::Login {
            from: required.dashboard_path().to_string(),
        };
    }
    match role {
        Some(role) if role == required => Access::Granted,
        Some(role) => Access::Redirect(role),
        None => Access::Login {
            from: required.dashboard_path().to_string(),
        },
    }
}

/// Where to go after a successful sign in.
///
/// A local `from` path wins; otherwise the role's dashboard, falling back to
/// the patient dashboard for accounts without a role.
pub fn login_target(from: Option<&str>, role: Option<Role>) -> String {
    if let Some(from) = from.map(str::trim).filter(|f| is_local_path(f)) {
        return from.to_string();
    }
    role.unwrap_or(Role::Patient).dashboard_path().to_string()
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_redirects_to_login_with_from() {
        for role in Role::ALL {
            let access = resolve_access(false, None, role, false);
            assert_eq!(
                access.target(),
                Some(format!("/login?from={}", role.dashboard_path()))
            );
        }
    }

    #[test]
    fn test_wrong_role_redirects_to_own_dashboard() {
        let access = resolve_access(true, Some(Role::Doctor), Role::Patient, false);
        assert_eq!(access, Access::Redirect(Role::Doctor));
        assert_eq!(access.target().as_deref(), Some("/doctor"));

        let access = resolve_access(true, Some(Role::Patient), Role::Admin, false);
        assert_eq!(access.target().as_deref(), Some("/patient"));
    }

    #[test]
    fn test_matching_role_is_granted() {
        let access = resolve_access(true, Some(Role::Admin), Role::Admin, false);
        assert_eq!(access, Access::Granted);
        assert!(access.target().is_none());
    }

    #[test]
    fn test_loading_is_pending() {
        assert_eq!(resolve_access(false, None, Role::Doctor, true), Access::Pending);
    }

    #[test]
    fn test_missing_role_goes_back_to_login() {
        let access = resolve_access(true, None, Role::Doctor, false);
        assert_eq!(access.target().as_deref(), Some("/login?from=/doctor"));
    }

    #[test]
    fn test_login_target() {
        assert_eq!(login_target(Some("/admin"), Some(Role::Doctor)), "/admin");
        assert_eq!(login_target(None, Some(Role::Doctor)), "/doctor");
        assert_eq!(login_target(None, None), "/patient");
        assert_eq!(login_target(Some(""), Some(Role::Admin)), "/admin");
        assert_eq!(login_target(Some("//evil.example"), Some(Role::Admin)), "/admin");
        assert_eq!(login_target(Some("https://evil.example"), None), "/patient");
    }
}

//! Route-level access rules.

use crate::config::{DASHBOARD_PATH, PROTECTED_AREA_PREFIX};

/// Outcome of checking a request path against the login wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Let the request through
    Allow,
    /// Anonymous request for a protected page; send it to sign-in
    Deny,
    /// Signed-in request outside the protected area; send it elsewhere
    Redirect(&'static str),
}

/// Whether a path belongs to the protected area.
pub fn is_protected(path: &str) -> bool {
    path.starts_with(PROTECTED_AREA_PREFIX)
}

/// Decide what to do with a request for `path`.
pub fn authorize_route(path: &str, is_logged_in: bool) -> AccessDecision {
    match (is_protected(path), is_logged_in) {
        (true, true) => AccessDecision::Allow,
        (true, false) => AccessDecision::Deny,
        (false, true) => AccessDecision::Redirect(DASHBOARD_PATH),
        (false, false) => AccessDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_path_requires_login() {
        assert_eq!(authorize_route("/dashboard/invoices", false), AccessDecision::Deny);
        assert_eq!(authorize_route("/dashboard", false), AccessDecision::Deny);
    }

    #[test]
    fn test_protected_path_allowed_when_logged_in() {
        assert_eq!(authorize_route("/dashboard/invoices/create", true), AccessDecision::Allow);
    }

    #[test]
    fn test_logged_in_user_redirected_to_dashboard() {
        assert_eq!(authorize_route("/login", true), AccessDecision::Redirect("/dashboard"));
        assert_eq!(authorize_route("/", true), AccessDecision::Redirect("/dashboard"));
    }

    #[test]
    fn test_public_path_allowed_when_anonymous() {
        assert_eq!(authorize_route("/login", false), AccessDecision::Allow);
        assert_eq!(authorize_route("/", false), AccessDecision::Allow);
    }
}

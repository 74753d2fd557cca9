//! Route access classes and the gate's decision procedure.
//!
//! The decision combines three independent facts:
//! - the session validation result (valid user or rejection reason)
//! - the organization's onboarding and billing flags
//! - the access class and path of the mounted route
//!
//! [`decide`] is pure; side effects are applied by the gate.

use crate::config::GateConfig;
use crate::protocol::models::SessionValidation;

/// Static access tag declared when a route is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteAccess {
    /// Pages that need a signed-in session (dashboard, setup, vendors).
    RequiresSession,
    /// Pages meant only for visitors (sign-in, sign-up).
    PublicOnly,
}

/// The route being mounted: its path and declared access class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedRoute {
    /// Exact route path (e.g., "/dashboard").
    pub path: String,

    /// Declared access class.
    pub access: RouteAccess,
}

impl GuardedRoute {
    /// Create a guarded route.
    pub fn new(path: impl Into<String>, access: RouteAccess) -> Self {
        Self {
            path: path.into(),
            access,
        }
    }

    /// Whether this route is for visitors only.
    pub fn is_public_only(&self) -> bool {
        self.access == RouteAccess::PublicOnly
    }
}

/// Terminal navigation action of a gate verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    /// Mount the wrapped page.
    Render,
    /// Navigate to this path, replacing the current history entry.
    Redirect(String),
    /// Go back one history entry instead of rendering.
    HistoryBack,
}

/// Resolved decision for one route mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// What the router should do.
    pub action: GateAction,

    /// Error notice to show alongside the action, if any.
    pub error: Option<String>,

    /// Whether the backend confirmed the session.
    ///
    /// Onboarding and billing redirects of a valid session report `true`.
    pub authenticated: bool,
}

impl Verdict {
    fn signed_in_redirect(path: &str) -> Self {
        Self {
            action: GateAction::Redirect(path.to_string()),
            error: None,
            authenticated: true,
        }
    }

    /// Whether the wrapped page should be mounted.
    pub fn renders(&self) -> bool {
        self.action == GateAction::Render
    }
}

/// Decide what a route mount resolves to once validation has completed.
///
/// # Arguments
/// * `validation` - Result of the session check for this mount
/// * `route` - The mounted route
/// * `config` - Supplies the setup, dashboard, plan and sign-in paths
pub fn decide(validation: &SessionValidation, route: &GuardedRoute, config: &GateConfig) -> Verdict {
    let authenticated = match validation {
        SessionValidation::Valid(user) => {
            let org = &user.organization;

            if !org.is_setup_completed {
                // Forced into onboarding even from a visitor page.
                if route.is_public_only() {
                    return Verdict::signed_in_redirect(config.setup_path);
                }
            } else {
                if route.path == config.setup_path {
                    return Verdict::signed_in_redirect(config.dashboard_path);
                }
                if !org.is_paid {
                    if route.is_public_only() {
                        return Verdict::signed_in_redirect(config.select_plan_path);
                    }
                } else if route.path == config.select_plan_path {
                    return Verdict::signed_in_redirect(config.dashboard_path);
                }
            }
            true
        }
        SessionValidation::Invalid(reason) => {
            if route.is_public_only() {
                return Verdict {
                    action: GateAction::Redirect(config.signin_path.to_string()),
                    error: Some(reason.clone()),
                    authenticated: false,
                };
            }
            // RequiresSession pages still render here; see DESIGN.md.
            false
        }
    };

    let action = if authenticated && route.is_public_only() {
        GateAction::HistoryBack
    } else {
        GateAction::Render
    };

    Verdict {
        action,
        error: None,
        authenticated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::models::User;

    fn config() -> GateConfig {
        GateConfig::new("test-app", "https://api.test")
    }

    fn valid(is_setup_completed: bool, is_paid: bool) -> SessionValidation {
        SessionValidation::Valid(User::with_flags(is_setup_completed, is_paid))
    }

    fn public(path: &str) -> GuardedRoute {
        GuardedRoute::new(path, RouteAccess::PublicOnly)
    }

    fn protected(path: &str) -> GuardedRoute {
        GuardedRoute::new(path, RouteAccess::RequiresSession)
    }

    fn redirect(path: &str) -> GateAction {
        GateAction::Redirect(path.to_string())
    }

    #[test]
    fn test_setup_incomplete_public_route_goes_to_setup() {
        for is_paid in [false, true] {
            for path in ["/signin", "/signup"] {
                let verdict = decide(&valid(false, is_paid), &public(path), &config());
                assert_eq!(verdict.action, redirect("/setup"));
                assert_eq!(verdict.error, None);
            }
        }
    }

    #[test]
    fn test_setup_incomplete_protected_route_renders() {
        for path in ["/setup", "/dashboard", "/select-plan", "/vendors"] {
            let verdict = decide(&valid(false, false), &protected(path), &config());
            assert_eq!(verdict.action, GateAction::Render, "path {}", path);
            assert!(verdict.authenticated);
        }
    }

    #[test]
    fn test_setup_page_not_reenterable_after_setup() {
        for is_paid in [false, true] {
            let verdict = decide(&valid(true, is_paid), &protected("/setup"), &config());
            assert_eq!(verdict.action, redirect("/dashboard"));
        }
    }

    #[test]
    fn test_unpaid_public_route_goes_to_plan_selection() {
        for path in ["/signin", "/signup"] {
            let verdict = decide(&valid(true, false), &public(path), &config());
            assert_eq!(verdict.action, redirect("/select-plan"));
        }
    }

    #[test]
    fn test_valid_session_redirects_report_authenticated() {
        let cases = [
            (valid(false, false), public("/signup"), "/setup"),
            (valid(true, false), protected("/setup"), "/dashboard"),
            (valid(true, false), public("/signin"), "/select-plan"),
            (valid(true, true), protected("/select-plan"), "/dashboard"),
        ];
        for (validation, route, target) in cases {
            let verdict = decide(&validation, &route, &config());
            assert_eq!(verdict.action, redirect(target), "route {}", route.path);
            assert!(verdict.authenticated, "route {}", route.path);
        }
    }

    #[test]
    fn test_unpaid_protected_routes_render() {
        for path in ["/dashboard", "/select-plan", "/vendors"] {
            let verdict = decide(&valid(true, false), &protected(path), &config());
            assert_eq!(verdict.action, GateAction::Render, "path {}", path);
        }
    }

    #[test]
    fn test_paid_plan_selection_goes_to_dashboard() {
        let verdict = decide(&valid(true, true), &protected("/select-plan"), &config());
        assert_eq!(verdict.action, redirect("/dashboard"));
    }

    #[test]
    fn test_paid_protected_routes_render() {
        for path in ["/dashboard", "/vendors", "/vendors/new", "/purchase-orders"] {
            let verdict = decide(&valid(true, true), &protected(path), &config());
            assert!(verdict.renders(), "path {}", path);
            assert!(verdict.authenticated);
        }
    }

    #[test]
    fn test_paid_public_route_goes_back() {
        let verdict = decide(&valid(true, true), &public("/signup"), &config());
        assert_eq!(verdict.action, GateAction::HistoryBack);
        assert!(verdict.authenticated);
    }

    #[test]
    fn test_invalid_public_route_shows_error_and_goes_to_signin() {
        let invalid = SessionValidation::Invalid("expired".to_string());
        let verdict = decide(&invalid, &public("/signin"), &config());
        assert_eq!(verdict.action, redirect("/signin"));
        assert_eq!(verdict.error.as_deref(), Some("expired"));
        assert!(!verdict.authenticated);
    }

    #[test]
    fn test_invalid_protected_route_still_renders() {
        let invalid = SessionValidation::Invalid("expired".to_string());
        let verdict = decide(&invalid, &protected("/dashboard"), &config());
        assert_eq!(verdict.action, GateAction::Render);
        assert_eq!(verdict.error, None);
        assert!(!verdict.authenticated);
    }

    #[test]
    fn test_decision_is_idempotent() {
        let validation = valid(true, false);
        let route = protected("/setup");
        let first = decide(&validation, &route, &config());
        let second = decide(&validation, &route, &config());
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_paths_are_honored() {
        let mut config = config();
        config.setup_path = "/onboarding";
        config.dashboard_path = "/home";

        let verdict = decide(&valid(false, false), &public("/signin"), &config);
        assert_eq!(verdict.action, redirect("/onboarding"));

        let verdict = decide(&valid(true, true), &protected("/onboarding"), &config);
        assert_eq!(verdict.action, redirect("/home"));
    }

    #[test]
    fn test_setup_path_match_is_exact() {
        let verdict = decide(&valid(true, true), &protected("/setup/billing"), &config());
        assert_eq!(verdict.action, GateAction::Render);
    }
}

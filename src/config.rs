//! Routegate configuration.

use std::time::Duration;

/// Generic notice shown when the session API gives no reason.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// Configuration for the access gate and its HTTP session validator.
///
/// The page paths are the redirect targets of the decision procedure;
/// [`GateConfig::new`] fills them with the product defaults.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Application name and version (e.g., "ledgerly/2.3.0")
    pub app_name: &'static str,

    /// Base URL of the backend API, without trailing slash.
    pub api_base_url: &'static str,

    /// Path of the session validation endpoint under `api_base_url`.
    pub session_path: &'static str,

    /// User-Agent product identifier.
    pub user_agent_product: &'static str,

    /// Onboarding page. Not re-enterable once setup is complete.
    pub setup_path: &'static str,

    /// Landing page for fully onboarded sessions.
    pub dashboard_path: &'static str,

    /// Plan selection page for sessions that have not paid.
    pub select_plan_path: &'static str,

    /// Sign-in page for visitors without a valid session.
    pub signin_path: &'static str,

    /// Notice used when validation fails without a backend message.
    pub default_error_message: &'static str,

    /// Timeout for a single session validation request.
    pub request_timeout: Duration,
}

impl GateConfig {
    /// Create a configuration with the product's default page paths.
    pub fn new(app_name: &'static str, api_base_url: &'static str) -> Self {
        Self {
            app_name,
            api_base_url,
            session_path: "/auth/validate",
            user_agent_product: app_name,
            setup_path: "/setup",
            dashboard_path: "/dashboard",
            select_plan_path: "/select-plan",
            signin_path: "/signin",
            default_error_message: DEFAULT_ERROR_MESSAGE,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), crate::RouteGateError> {
        if self.api_base_url.is_empty() {
            return Err(crate::RouteGateError::ConfigError(
                "api_base_url cannot be empty".to_string(),
            ));
        }
        if self.api_base_url.ends_with('/') {
            return Err(crate::RouteGateError::ConfigError(format!(
                "api_base_url must not end with '/', got {}",
                self.api_base_url
            )));
        }

        let paths = [
            ("session_path", self.session_path),
            ("setup_path", self.setup_path),
            ("dashboard_path", self.dashboard_path),
            ("select_plan_path", self.select_plan_path),
            ("signin_path", self.signin_path),
        ];
        for (name, path) in paths {
            if !path.starts_with('/') {
                return Err(crate::RouteGateError::ConfigError(format!(
                    "{} must start with '/', got {:?}",
                    name, path
                )));
            }
        }

        if self.request_timeout.is_zero() {
            return Err(crate::RouteGateError::ConfigError(
                "request_timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteGateError;

    #[test]
    fn defaults_are_valid() {
        let config = GateConfig::new("ledgerly/1.0.0", "https://api.example.com");
        assert!(config.validate().is_ok());
        assert_eq!(config.setup_path, "/setup");
        assert_eq!(config.dashboard_path, "/dashboard");
        assert_eq!(config.select_plan_path, "/select-plan");
        assert_eq!(config.signin_path, "/signin");
        assert_eq!(config.default_error_message, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn rejects_empty_base_url() {
        let config = GateConfig::new("app", "");
        assert!(matches!(config.validate(), Err(RouteGateError::ConfigError(_))));
    }

    #[test]
    fn rejects_trailing_slash() {
        let config = GateConfig::new("app", "https://api.example.com/");
        assert!(matches!(config.validate(), Err(RouteGateError::ConfigError(_))));
    }

    #[test]
    fn rejects_relative_page_path() {
        let mut config = GateConfig::new("app", "https://api.example.com");
        config.select_plan_path = "select-plan";
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("select_plan_path"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = GateConfig::new("app", "https://api.example.com");
        config.request_timeout = Duration::ZERO;
        assert!(matches!(config.validate(), Err(RouteGateError::ConfigError(_))));
    }
}

//! Routegate error types.

use thiserror::Error;

/// Errors raised while building the gate or talking to the session API.
///
/// None of these escape [`MountedRoute::resolve`](crate::gate::MountedRoute::resolve);
/// a failed validation is folded into an invalid session there.
#[derive(Debug, Error)]
pub enum RouteGateError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP transport error communicating with the session API.
    #[error("Session transport error: {0}")]
    SessionTransport(String),

    /// Session API response could not be understood.
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// No route is registered at the requested path.
    #[error("No route registered at {path}")]
    UnknownRoute {
        /// The path that was looked up.
        path: String,
    },

    /// A route is already registered at this path.
    #[error("Route already registered at {path}")]
    DuplicateRoute {
        /// The path that was registered twice.
        path: String,
    },
}

//! Capabilities the UI shell injects into the gate.
//!
//! The gate never reaches for ambient state: the session check, the
//! router and the notification area are all handed to it explicitly.

use crate::protocol::models::SessionValidation;
use crate::RouteGateError;
use std::future::Future;

/// Asks the backend whether the current credential is valid.
///
/// Called exactly once per route mount. An `Err` is treated the same as
/// an invalid session with the configured generic message.
pub trait SessionValidator: Send + Sync + 'static {
    /// Validate the current session.
    fn validate(&self) -> impl Future<Output = Result<SessionValidation, RouteGateError>> + Send;
}

/// Router side of the gate.
pub trait Navigator: Send + Sync {
    /// Navigate to `path`, replacing the current history entry.
    fn replace(&self, path: &str);

    /// Go back one history entry.
    fn back(&self);
}

/// Transient, non-blocking error notifications.
pub trait Notifier: Send + Sync {
    /// Show a one-shot dismissible error.
    fn error(&self, message: &str);
}

/// A page component the gate can mount.
pub trait Renderable {
    /// What rendering produces in the host UI framework.
    type View;

    /// Render the page.
    fn render(&self) -> Self::View;
}

impl<F, V> Renderable for F
where
    F: Fn() -> V,
{
    type View = V;

    fn render(&self) -> V {
        self()
    }
}

//! # Routegate
//!
//! **Session-aware access gate for single-page application routes.**
//!
//! Every guarded route is registered with an access class. Each time a
//! route mounts, the gate asks the backend whether the session is valid,
//! looks at the organization's onboarding and billing flags, and settles
//! on exactly one outcome: render the page, redirect elsewhere, go back,
//! or keep showing a loading state while validation is pending.
//!
//! ## Decisions
//!
//! - **Setup incomplete** — visitor-only pages send the session to `/setup`
//! - **Setup complete** — `/setup` is closed, sends to `/dashboard`
//! - **Unpaid** — visitor-only pages send the session to `/select-plan`
//! - **Paid** — `/select-plan` is closed, sends to `/dashboard`
//! - **Invalid session** — visitor-only pages show the reason and go to `/signin`
//! - **Signed in on a visitor-only page** — history goes back instead of rendering
//!
//! ## Quickstart
//!
//! ```no_run
//! use routegate::{AccessGate, GateConfig, HttpSessionValidator, Navigator, Notifier, RouteTable};
//! use std::sync::Arc;
//!
//! struct Router;
//! impl Navigator for Router {
//!     fn replace(&self, path: &str) { println!("navigate to {}", path) }
//!     fn back(&self) { println!("back") }
//! }
//! impl Notifier for Router {
//!     fn error(&self, message: &str) { eprintln!("{}", message) }
//! }
//!
//! # async fn run() -> Result<(), routegate::RouteGateError> {
//! let config = GateConfig::new("ledgerly/1.0.0", "https://api.ledgerly.example");
//! let validator = HttpSessionValidator::new(&config, "session-token")?;
//! let router = Arc::new(Router);
//! let gate = AccessGate::new(config, validator, router.clone(), router)?;
//!
//! let routes = RouteTable::standard(|path| {
//!     let title = path.to_string();
//!     move || title.clone()
//! })?;
//! let mount = gate.mount_path(&routes, "/dashboard")?;
//! println!("{:?}", mount.resolve().await);
//! # Ok(())
//! # }
//! ```
//!
//! ## Stale results
//!
//! A route that unmounts before validation completes drops the result:
//! no navigation, no notification, no outcome change. Use
//! [`MountedRoute::unmount_handle`] when the mount lives in another task.

#![deny(warnings)]
#![deny(missing_docs)]

// Core modules
pub mod clock;
pub mod config;
pub mod errors;

// Protocol layer
pub mod protocol;

// Injected capabilities
pub mod shell;

// Client layer
pub mod client;

// Policy layer
pub mod policy;

// Gate (main public API)
pub mod gate;

// Re-exports for public API
pub use client::http::HttpSessionValidator;
pub use clock::{Clock, SystemClock};
pub use config::GateConfig;
pub use errors::RouteGateError;
pub use gate::{AccessGate, GateOutcome, MountedRoute, Resolution, UnmountHandle};
pub use policy::access::{GateAction, GuardedRoute, RouteAccess, Verdict};
pub use policy::routes::RouteTable;
pub use protocol::models::{Organization, SessionValidation, User};
pub use shell::{Navigator, Notifier, Renderable, SessionValidator};

#[cfg(any(test, feature = "test-seams"))]
pub use clock::MockClock;

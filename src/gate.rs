//! Access gate - the main public API of routegate.
//!
//! An [`AccessGate`] is built once with the injected capabilities and then
//! mounts guarded routes. Each [`MountedRoute`] owns its own lifecycle:
//! - starts in [`GateOutcome::Loading`]
//! - validates the session exactly once in [`MountedRoute::resolve`]
//! - settles on a terminal verdict that is never revised
//!
//! A result that arrives after the route was unmounted is dropped without
//! navigating, notifying or touching the outcome.

use crate::clock::{Clock, SystemClock};
use crate::config::GateConfig;
use crate::policy::access::{decide, GateAction, GuardedRoute, Verdict};
use crate::policy::routes::RouteTable;
use crate::protocol::models::SessionValidation;
use crate::shell::{Navigator, Notifier, Renderable, SessionValidator};
use crate::RouteGateError;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Current state of one mounted route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Session validation is in flight.
    Loading,
    /// Validation completed and the gate decided.
    Resolved {
        /// The decision.
        verdict: Verdict,
        /// When the decision was made.
        at: DateTime<Utc>,
    },
}

impl GateOutcome {
    /// The verdict, once resolved.
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Self::Loading => None,
            Self::Resolved { verdict, .. } => Some(verdict),
        }
    }

    /// Whether validation is still pending.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// What [`MountedRoute::resolve`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// The wrapped page was rendered.
    Rendered(T),
    /// The router was sent to this path, replacing history.
    Redirected(String),
    /// The router went back one history entry.
    WentBack,
    /// Another `resolve` call on this mount is currently awaiting validation.
    Pending,
    /// The route was unmounted before validation completed.
    Stale,
}

/// Access gate holding the injected session, router and notification capabilities.
pub struct AccessGate<V> {
    config: Arc<GateConfig>,
    validator: Arc<V>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl<V> Clone for AccessGate<V> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            validator: Arc::clone(&self.validator),
            navigator: Arc::clone(&self.navigator),
            notifier: Arc::clone(&self.notifier),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<V: SessionValidator> AccessGate<V> {
    /// Create a gate with the given configuration and capabilities.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration fails validation.
    pub fn new(
        config: GateConfig,
        validator: V,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, RouteGateError> {
        Self::with_clock(config, validator, navigator, notifier, Arc::new(SystemClock))
    }

    /// Create a gate with a custom clock (for testing).
    #[cfg(any(test, feature = "test-seams"))]
    pub fn new_with_clock(
        config: GateConfig,
        validator: V,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RouteGateError> {
        Self::with_clock(config, validator, navigator, notifier, clock)
    }

    fn with_clock(
        config: GateConfig,
        validator: V,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RouteGateError> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            validator: Arc::new(validator),
            navigator,
            notifier,
            clock,
        })
    }

    /// Mount `page` behind the gate. The mount starts in `Loading`.
    pub fn mount<P: Renderable>(&self, route: GuardedRoute, page: P) -> MountedRoute<P, V> {
        debug!(route = %route.path, access = ?route.access, "mounting guarded route");
        let (outcome, _) = watch::channel(GateOutcome::Loading);

        MountedRoute {
            gate: self.clone(),
            route,
            page,
            mounted_at: self.clock.now_utc(),
            outcome,
            mounted: Arc::new(AtomicBool::new(true)),
            started: AtomicBool::new(false),
        }
    }

    /// Mount the page registered at `path` in `table`.
    ///
    /// # Errors
    /// Returns `UnknownRoute` if nothing is registered at `path`.
    pub fn mount_path<P: Renderable + Clone>(
        &self,
        table: &RouteTable<P>,
        path: &str,
    ) -> Result<MountedRoute<P, V>, RouteGateError> {
        let entry = table.get(path).ok_or_else(|| RouteGateError::UnknownRoute {
            path: path.to_string(),
        })?;
        Ok(self.mount(entry.route.clone(), entry.page.clone()))
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

/// Clears the started flag if a `resolve` call is dropped mid-validation.
struct InFlight<'a> {
    started: &'a AtomicBool,
}

impl InFlight<'_> {
    fn settle(self) {
        std::mem::forget(self);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.started.store(false, Ordering::SeqCst);
    }
}

/// Lets a router unmount a route whose [`MountedRoute`] was moved into a task.
///
/// Unmounting is checked after validation and again before each side
/// effect. An unmount from another thread that lands after the last check
/// does not recall a navigation already issued.
#[derive(Debug, Clone)]
pub struct UnmountHandle {
    mounted: Arc<AtomicBool>,
}

impl UnmountHandle {
    /// Mark the route unmounted. Any later validation result is dropped.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    /// Whether the route is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }
}

/// One mount of a guarded route.
pub struct MountedRoute<P, V> {
    gate: AccessGate<V>,
    route: GuardedRoute,
    page: P,
    mounted_at: DateTime<Utc>,
    outcome: watch::Sender<GateOutcome>,
    mounted: Arc<AtomicBool>,
    started: AtomicBool,
}

impl<P: Renderable, V: SessionValidator> MountedRoute<P, V> {
    /// Validate the session once and apply the verdict.
    ///
    /// The first call performs the validation. Later calls replay the
    /// settled verdict without validating again or repeating navigation,
    /// and return [`Resolution::Pending`] while the first is in flight.
    /// Dropping an in-flight call before it settles leaves the mount in
    /// `Loading`, and the next call validates afresh.
    pub async fn resolve(&self) -> Resolution<P::View> {
        if !self.is_mounted() {
            return Resolution::Stale;
        }
        if self.started.swap(true, Ordering::SeqCst) {
            return match self.outcome().verdict() {
                Some(verdict) => self.replay(verdict),
                None => Resolution::Pending,
            };
        }
        let in_flight = InFlight {
            started: &self.started,
        };

        let validation = match self.gate.validator.validate().await {
            Ok(validation) => validation,
            Err(e) => {
                warn!(route = %self.route.path, error = %e, "session validation failed");
                SessionValidation::Invalid(self.gate.config.default_error_message.to_string())
            }
        };
        in_flight.settle();

        let verdict = decide(&validation, &self.route, &self.gate.config);
        if !self.is_mounted() {
            debug!(route = %self.route.path, "route unmounted before validation completed, dropping result");
            return Resolution::Stale;
        }
        info!(
            route = %self.route.path,
            session_valid = validation.is_valid(),
            action = ?verdict.action,
            "gate resolved"
        );

        self.outcome.send_replace(GateOutcome::Resolved {
            verdict: verdict.clone(),
            at: self.gate.clock.now_utc(),
        });

        if let Some(message) = &verdict.error {
            if self.is_mounted() {
                self.gate.notifier.error(message);
            }
        }
        if self.is_mounted() {
            match &verdict.action {
                GateAction::Redirect(path) => self.gate.navigator.replace(path),
                GateAction::HistoryBack => self.gate.navigator.back(),
                GateAction::Render => {}
            }
        }

        self.replay(&verdict)
    }

    fn replay(&self, verdict: &Verdict) -> Resolution<P::View> {
        match &verdict.action {
            GateAction::Render => Resolution::Rendered(self.page.render()),
            GateAction::Redirect(path) => Resolution::Redirected(path.clone()),
            GateAction::HistoryBack => Resolution::WentBack,
        }
    }

    /// Render the wrapped page if this mount resolved to `Render`.
    pub fn view(&self) -> Option<P::View> {
        if !self.is_mounted() {
            return None;
        }
        self.outcome()
            .verdict()
            .filter(|v| v.renders())
            .map(|_| self.page.render())
    }
}

impl<P, V> MountedRoute<P, V> {
    /// The mounted route.
    pub fn route(&self) -> &GuardedRoute {
        &self.route
    }

    /// When the route was mounted.
    pub fn mounted_at(&self) -> DateTime<Utc> {
        self.mounted_at
    }

    /// Current outcome.
    pub fn outcome(&self) -> GateOutcome {
        self.outcome.borrow().clone()
    }

    /// Watch the outcome move from `Loading` to its terminal value.
    pub fn subscribe(&self) -> watch::Receiver<GateOutcome> {
        self.outcome.subscribe()
    }

    /// Handle for unmounting from outside the task that owns this mount.
    pub fn unmount_handle(&self) -> UnmountHandle {
        UnmountHandle {
            mounted: Arc::clone(&self.mounted),
        }
    }

    /// Mark the route unmounted.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    /// Whether the route is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }
}

impl<P, V> Drop for MountedRoute<P, V> {
    fn drop(&mut self) {
        self.mounted.store(false, Ordering::SeqCst);
    }
}

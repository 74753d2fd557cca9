//! Shared fakes for the gate integration tests.

#![allow(dead_code)]

use routegate::{
    AccessGate, GateConfig, Navigator, Notifier, RouteGateError, SessionValidation, SessionValidator,
    User,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Records every navigation and notification in order.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Navigator for Recorder {
    fn replace(&self, path: &str) {
        self.events.lock().unwrap().push(format!("replace {}", path));
    }

    fn back(&self) {
        self.events.lock().unwrap().push("back".to_string());
    }
}

impl Notifier for Recorder {
    fn error(&self, message: &str) {
        self.events.lock().unwrap().push(format!("error {}", message));
    }
}

/// Returns the same validation result on every call.
pub struct Scripted {
    result: SessionValidation,
    pub calls: Arc<AtomicU32>,
}

impl SessionValidator for Scripted {
    async fn validate(&self) -> Result<SessionValidation, RouteGateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

/// Holds validation open until the test releases it.
pub struct Held {
    result: SessionValidation,
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl Held {
    pub fn new(result: SessionValidation) -> Self {
        Self {
            result,
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }
}

impl SessionValidator for Held {
    async fn validate(&self) -> Result<SessionValidation, RouteGateError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.result.clone())
    }
}

pub fn config() -> GateConfig {
    GateConfig::new("ledgerly/1.0.0", "https://api.ledgerly.test")
}

pub fn valid(is_setup_completed: bool, is_paid: bool) -> SessionValidation {
    SessionValidation::Valid(User::with_flags(is_setup_completed, is_paid))
}

pub fn invalid(reason: &str) -> SessionValidation {
    SessionValidation::Invalid(reason.to_string())
}

pub fn gate_with<V: SessionValidator>(validator: V) -> (AccessGate<V>, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let gate = AccessGate::new(config(), validator, recorder.clone(), recorder.clone()).unwrap();
    (gate, recorder)
}

pub fn scripted(result: SessionValidation) -> (AccessGate<Scripted>, Arc<Recorder>, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let (gate, recorder) = gate_with(Scripted {
        result,
        calls: Arc::clone(&calls),
    });
    (gate, recorder, calls)
}

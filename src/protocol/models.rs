//! Session endpoint wire models and the normalized validation result.

use crate::RouteGateError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a successful session validation response.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    /// The user owning the session.
    pub user: User,
}

/// Body of a rejected session validation response.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionFailure {
    /// User-facing rejection reason.
    #[serde(default)]
    pub message: Option<String>,
}

/// The signed-in user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier.
    #[serde(default, alias = "_id")]
    pub id: Option<String>,

    /// Login email.
    #[serde(default)]
    pub email: Option<String>,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Account creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// The business this user belongs to.
    pub organization: Organization,
}

/// Onboarding and billing status of a user's business.
///
/// Only backend workflows (setup submission, payment) change these flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Setup form has been submitted.
    #[serde(default)]
    pub is_setup_completed: bool,

    /// A billing plan has been paid for.
    #[serde(default)]
    pub is_paid: bool,
}

impl User {
    /// A user with only organization flags set.
    pub fn with_flags(is_setup_completed: bool, is_paid: bool) -> Self {
        Self {
            id: None,
            email: None,
            name: None,
            created_at: None,
            organization: Organization {
                is_setup_completed,
                is_paid,
            },
        }
    }
}

/// Outcome of asking the backend whether the current credential is valid.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionValidation {
    /// The credential maps to a live session.
    Valid(User),
    /// The credential was rejected, with a user-facing reason.
    Invalid(String),
}

impl SessionValidation {
    /// Whether this is a valid session.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Parse a 2xx body into a user.
pub fn parse_session_response(body: &[u8]) -> Result<User, RouteGateError> {
    serde_json::from_slice::<SessionResponse>(body)
        .map(|r| r.user)
        .map_err(|e| RouteGateError::ProtocolError(format!("Failed to parse session response: {}", e)))
}

/// Extract the backend's rejection message from a non-2xx body.
///
/// Returns `None` when the body is not the expected failure shape.
pub fn parse_session_failure(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<SessionFailure>(body)
        .ok()
        .and_then(|f| f.message)
        .filter(|m| !m.trim().is_empty())
}

//! Reqwest-based HTTP session validator.
//!
//! Sends the session credential to the backend's validation endpoint and
//! maps the response onto [`SessionValidation`].

use crate::config::GateConfig;
use crate::protocol::models::{parse_session_failure, parse_session_response, SessionValidation};
use crate::shell::SessionValidator;
use crate::RouteGateError;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Raw HTTP response from the session endpoint.
#[derive(Debug)]
pub struct SessionHttpResponse {
    /// HTTP status code.
    pub status: u16,

    /// Raw response body.
    pub body: Vec<u8>,
}

impl SessionHttpResponse {
    /// Map the response onto a validation result.
    ///
    /// - 2xx with a user body is a valid session
    /// - non-2xx with a `message` body is an invalid session with that reason
    /// - anything else is an error the gate reports with its generic notice
    pub fn into_validation(self) -> Result<SessionValidation, RouteGateError> {
        if (200..300).contains(&self.status) {
            return parse_session_response(&self.body).map(SessionValidation::Valid);
        }

        match parse_session_failure(&self.body) {
            Some(message) => Ok(SessionValidation::Invalid(message)),
            None => Err(RouteGateError::SessionTransport(format!(
                "Unexpected status {} from session endpoint",
                self.status
            ))),
        }
    }
}

/// Session validator backed by the product API.
pub struct HttpSessionValidator {
    client: Client,
    user_agent: String,
    url: String,
    credential: String,
    default_error_message: String,
}

impl HttpSessionValidator {
    /// Create a validator that presents `credential` as a bearer token.
    pub fn new(config: &GateConfig, credential: impl Into<String>) -> Result<Self, RouteGateError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RouteGateError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agent: build_user_agent(config),
            url: format!("{}{}", config.api_base_url, config.session_path),
            credential: credential.into(),
            default_error_message: config.default_error_message.to_string(),
        })
    }

    /// Full URL of the session endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<SessionHttpResponse, RouteGateError> {
        let response = self
            .client
            .get(&self.url)
            .bearer_auth(&self.credential)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RouteGateError::SessionTransport(format!("Request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| RouteGateError::SessionTransport(format!("Failed to read body: {}", e)))?
            .to_vec();

        Ok(SessionHttpResponse { status, body })
    }
}

impl SessionValidator for HttpSessionValidator {
    async fn validate(&self) -> Result<SessionValidation, RouteGateError> {
        if self.credential.is_empty() {
            debug!("no session credential, skipping request");
            return Ok(SessionValidation::Invalid(self.default_error_message.clone()));
        }

        let fingerprint = credential_fingerprint(&self.credential);
        let response = self.fetch().await.map_err(|e| {
            warn!(credential = %fingerprint, error = %e, "session validation request failed");
            e
        })?;

        debug!(credential = %fingerprint, status = response.status, "session endpoint responded");
        response.into_validation()
    }
}

/// Build a User-Agent string from config.
///
/// Format: `<product>/routegate-<version> <app>`
pub fn build_user_agent(config: &GateConfig) -> String {
    format!(
        "{}/routegate-{} {}",
        config.user_agent_product,
        env!("CARGO_PKG_VERSION"),
        config.app_name
    )
}

/// Short SHA-256 fingerprint of a credential, safe to log.
pub fn credential_fingerprint(credential: &str) -> String {
    let hash = Sha256::digest(credential.as_bytes());
    hex::encode(&hash[..6])
}

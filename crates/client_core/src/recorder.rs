//! HTTP client for the remote recording service.
//!
//! The service replies with a JSON `{ success, message?, data? }` body and
//! does not use HTTP status codes to signal its outcome, so the client
//! interprets the body alone. A response that cannot be read as that shape
//! is reported as a success with a caveat message: the write may well have
//! landed, and the two cases cannot be told apart from this side.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Method};
use serde_json::json;
use shared::protocol::{ApiResponse, RegistrationPayload};
use tracing::{info, warn};
use url::Url;

/// Shown when the service cannot be reached at all.
pub const CONNECTIVITY_ERROR_MESSAGE: &str =
    "Error de conexión. Por favor verifica tu internet e inténtalo nuevamente.";
/// Shown when the request went through but the response body was not the
/// expected JSON shape.
pub const UNREADABLE_RESPONSE_MESSAGE: &str =
    "Registro enviado exitosamente (respuesta no legible)";
/// Filled in when the service reports success without a message of its own.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Registro enviado exitosamente al sistema CChC";
/// Filled in when the service reports failure without a message of its own.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Error procesando el registro";

/// Boundary to the system that durably stores submitted registrations.
/// Implementations map every outcome, including transport failures, into an
/// `ApiResponse`; the submission coordinator never sees raw transport
/// errors.
#[async_trait]
pub trait RecordingService: Send + Sync {
    async fn submit(&self, payload: &RegistrationPayload) -> ApiResponse;
}

/// reqwest-backed recording service client with an injected endpoint.
pub struct RecorderClient {
    http: Client,
    endpoint: Url,
}

impl RecorderClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn with_timeout(endpoint: Url, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Independent reachability probe. Any failure reads as unreachable.
    pub async fn probe_connectivity(&self) -> bool {
        match self
            .http
            .request(Method::OPTIONS, self.endpoint.clone())
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn unreadable_success() -> ApiResponse {
        ApiResponse {
            success: true,
            message: Some(UNREADABLE_RESPONSE_MESSAGE.to_string()),
            data: Some(json!({ "timestamp": Utc::now().to_rfc3339() })),
        }
    }

    fn interpret_body(body: &str) -> ApiResponse {
        match serde_json::from_str::<ApiResponse>(body) {
            Ok(mut parsed) => {
                if parsed.message.is_none() {
                    parsed.message = Some(
                        if parsed.success {
                            DEFAULT_SUCCESS_MESSAGE
                        } else {
                            DEFAULT_FAILURE_MESSAGE
                        }
                        .to_string(),
                    );
                }
                parsed
            }
            Err(err) => {
                warn!("recording service response not parseable, assuming success: {err}");
                Self::unreadable_success()
            }
        }
    }
}

#[async_trait]
impl RecordingService for RecorderClient {
    async fn submit(&self, payload: &RegistrationPayload) -> ApiResponse {
        info!("submitting registration to {}", self.endpoint);
        let sent = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(err) => {
                warn!("recording service unreachable: {err}");
                return ApiResponse::failure(CONNECTIVITY_ERROR_MESSAGE);
            }
        };

        match response.text().await {
            Ok(body) => Self::interpret_body(&body),
            Err(err) => {
                // The request reached the service; a body that cannot be
                // read lands in the same bucket as one that cannot be
                // parsed.
                warn!("failed to read recording service response: {err}");
                Self::unreadable_success()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/recorder_tests.rs"]
mod tests;

//! Shared HTTP response helpers for publisher API calls.
//!
//! Centralizes status-code checks (non-success → [`PlayError::Api`] with the
//! message pulled out of Google's error envelope) so the endpoint methods stay
//! focused on request construction and response mapping.

use serde::Deserialize;

use crate::error::PlayError;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, PlayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(PlayError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Extract a readable message from an error body.
///
/// `{"error": {"message": "...", "status": "NOT_FOUND"}}` becomes
/// `NOT_FOUND: ...`; anything else is returned trimmed.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => match envelope.error.status {
            Some(status) => format!("{status}: {}", envelope.error.message),
            None => envelope.error.message,
        },
        _ => body.trim().to_string(),
    }
}

//! Publisher API error types.

use thiserror::Error;

/// Errors that can occur when talking to the Android Publisher API.
#[derive(Debug, Error)]
pub enum PlayError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message from the Google error envelope, or the raw body.
        message: String,
    },

    /// Failed to parse an API response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Authentication failed while establishing the session.
    #[error("authentication failed: {0}")]
    Auth(#[from] ps_auth::AuthError),
}

impl PlayError {
    /// HTTP status of an API error, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

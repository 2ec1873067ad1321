use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("cannot read key file {}: {source}", path.display())]
    KeyFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid service account key {}: {reason}", path.display())]
    InvalidKey { path: PathBuf, reason: String },

    #[error("failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token endpoint rejected credentials ({status}): {message}")]
    TokenRejected { status: u16, message: String },
}

//! Cross-cutting error types for pspublisher.
//!
//! Domain-specific errors (e.g., `AuthError`, `PlayError`) are defined in
//! their respective crates and converge in `ps-cli`.

use thiserror::Error;

/// Errors that can be raised by any pspublisher crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An edit state transition was attempted that is not allowed.
    #[error("Invalid edit transition for {edit_id} from {from} to {to}")]
    InvalidTransition {
        edit_id: String,
        from: String,
        to: String,
    },

    /// Publish status outside of the supported set.
    #[error(
        "Publish status '{0}' not recognized. It needs to be one of draft, halted, inProgress, completed"
    )]
    UnknownStatus(String),

    /// Release notes exceed the store limit.
    #[error("Release notes cannot exceed {max} characters (got {length})")]
    ReleaseNotesTooLong { length: usize, max: usize },
}

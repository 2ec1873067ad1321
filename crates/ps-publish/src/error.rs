//! Validation and workflow error types.

use std::fmt;
use std::path::PathBuf;

use ps_core::{CoreError, EditState};
use ps_play::PlayError;
use thiserror::Error;

use crate::validate::{Field, FileKind};

/// Input problems found before any remote call.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("Cannot open {kind} file {}", path.display())]
    UnreadableFile {
        kind: FileKind,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read release notes file {}", path.display())]
    ReleaseNotesFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Release notes file {} is not valid UTF-8", path.display())]
    ReleaseNotesNotUtf8 { path: PathBuf },

    #[error("Release notes cannot exceed {max} characters (got {length})")]
    ReleaseNotesTooLong { length: usize, max: usize },

    #[error(
        "Publish status '{0}' not recognized. It needs to be one of draft, halted, inProgress, completed"
    )]
    UnknownStatus(String),

    #[error(transparent)]
    Core(CoreError),
}

/// A step of the edit transaction, named for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    FetchListings,
    UploadArtifact,
    UploadMapping,
    UpdateTrack,
    Validate,
    Commit,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FetchListings => "list application listings",
            Self::UploadArtifact => "upload apk",
            Self::UploadMapping => "upload mapping file",
            Self::UpdateTrack => "update track",
            Self::Validate => "validate changes",
            Self::Commit => "commit changes",
        })
    }
}

/// Why a transaction step failed.
#[derive(Debug, Error)]
pub enum StepFailure {
    #[error("{0}")]
    Remote(PlayError),

    #[error("no store listings found to take a release notes language from")]
    NoListings,

    #[error("{0}")]
    State(CoreError),
}

impl From<PlayError> for StepFailure {
    fn from(err: PlayError) -> Self {
        Self::Remote(err)
    }
}

impl From<CoreError> for StepFailure {
    fn from(err: CoreError) -> Self {
        Self::State(err)
    }
}

/// What happened when the failed edit was deleted.
#[derive(Debug)]
pub enum RollbackOutcome {
    Deleted,
    Failed(PlayError),
    /// The edit had already reached a terminal state; no delete was sent.
    Skipped(EditState),
}

impl RollbackOutcome {
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

impl fmt::Display for RollbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted => f.write_str("edit deleted"),
            Self::Failed(err) => write!(f, "deleting the edit also failed: {err}"),
            Self::Skipped(state) => write!(f, "edit already {state}, nothing deleted"),
        }
    }
}

/// Errors that end an upload run.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Authentication or client setup failed; no edit exists.
    #[error("Failed to create publisher service: {0}")]
    Session(PlayError),

    /// `edits.insert` failed; nothing to roll back.
    #[error("Failed to insert edit: {0}")]
    CreateEdit(PlayError),

    /// A step inside the edit failed and rollback was attempted.
    #[error("Failed to {step} in edit {edit_id}: {failure} ({rollback})")]
    Aborted {
        edit_id: String,
        step: Step,
        failure: StepFailure,
        rollback: RollbackOutcome,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn aborted_reports_failure_and_rollback() {
        let err = PublishError::Aborted {
            edit_id: "e1".into(),
            step: Step::Commit,
            failure: StepFailure::Remote(PlayError::Api {
                status: 500,
                message: "backend error".into(),
            }),
            rollback: RollbackOutcome::Failed(PlayError::Api {
                status: 404,
                message: "edit not found".into(),
            }),
        };
        let text = err.to_string();
        assert!(text.starts_with("Failed to commit changes in edit e1:"));
        assert!(text.contains("backend error"));
        assert!(text.contains("deleting the edit also failed"));
        assert!(text.contains("edit not found"));
    }

    #[test]
    fn validation_messages_pass_through() {
        let err = PublishError::from(ValidationError::MissingField(Field::Track));
        assert_eq!(err.to_string(), "Publish track is required");
    }

    #[test]
    fn rollback_display() {
        assert_eq!(RollbackOutcome::Deleted.to_string(), "edit deleted");
        assert!(RollbackOutcome::Deleted.is_deleted());
        assert_eq!(
            RollbackOutcome::Skipped(EditState::Committed).to_string(),
            "edit already committed, nothing deleted"
        );
    }
}

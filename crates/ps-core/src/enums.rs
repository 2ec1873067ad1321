//! Publish status and edit lifecycle enums.
//!
//! `PublishStatus` uses the exact spellings of the Android Publisher API
//! (`inProgress` is camelCase on the wire and on the command line).
//! `EditState` tracks a single edit through its transaction and provides
//! `allowed_next_states()` so the workflow cannot touch a finished edit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// PublishStatus
// ---------------------------------------------------------------------------

/// Status of a release on a track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PublishStatus {
    #[default]
    Completed,
    Draft,
    Halted,
    InProgress,
}

impl PublishStatus {
    pub const ALL: [Self; 4] = [Self::Completed, Self::Draft, Self::Halted, Self::InProgress];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Draft => "draft",
            Self::Halted => "halted",
            Self::InProgress => "inProgress",
        }
    }
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishStatus {
    type Err = CoreError;

    /// Matching is exact: `inprogress` or `Completed` are rejected.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| CoreError::UnknownStatus(value.to_string()))
    }
}

// ---------------------------------------------------------------------------
// EditState
// ---------------------------------------------------------------------------

/// Lifecycle of one edit transaction.
///
/// ```text
/// created → listings_fetched → artifact_uploaded → [mapping_uploaded]
///         → track_updated → validated → committed
///
/// any non-terminal state → rolled_back
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditState {
    Created,
    ListingsFetched,
    ArtifactUploaded,
    MappingUploaded,
    TrackUpdated,
    Validated,
    Committed,
    RolledBack,
}

impl EditState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Created => &[Self::ListingsFetched, Self::RolledBack],
            Self::ListingsFetched => &[Self::ArtifactUploaded, Self::RolledBack],
            Self::ArtifactUploaded => &[Self::MappingUploaded, Self::TrackUpdated, Self::RolledBack],
            Self::MappingUploaded => &[Self::TrackUpdated, Self::RolledBack],
            Self::TrackUpdated => &[Self::Validated, Self::RolledBack],
            Self::Validated => &[Self::Committed, Self::RolledBack],
            Self::Committed | Self::RolledBack => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Committed and rolled-back edits are no longer valid on the server.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::RolledBack)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::ListingsFetched => "listings_fetched",
            Self::ArtifactUploaded => "artifact_uploaded",
            Self::MappingUploaded => "mapping_uploaded",
            Self::TrackUpdated => "track_updated",
            Self::Validated => "validated",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
        }
    }
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

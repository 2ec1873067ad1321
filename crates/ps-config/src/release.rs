//! Release defaults applied when the command line leaves a value unset.

use serde::{Deserialize, Serialize};

pub const DEFAULT_RELEASE_NOTES: &str = "Uploaded with pspublisher";

fn default_notes() -> String {
    DEFAULT_RELEASE_NOTES.to_string()
}

fn default_status() -> String {
    "completed".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseConfig {
    /// Release notes used when neither `--releasenotes` nor `--releasenotesfile` is given.
    #[serde(default = "default_notes")]
    pub default_notes: String,

    /// Publish status used when `--status` is not given.
    #[serde(default = "default_status")]
    pub default_status: String,

    /// Language for the release notes when the package has no store listings.
    /// Unset means such uploads fail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_language: Option<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            default_notes: default_notes(),
            default_status: default_status(),
            fallback_language: None,
        }
    }
}

//! Android Publisher API endpoint configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://androidpublisher.googleapis.com";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Uploads can be hundreds of megabytes; the timeout covers the whole request.
const fn default_timeout_secs() -> u64 {
    300
}

fn default_user_agent() -> String {
    format!("pspublisher/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL for metadata calls (edits, listings, tracks).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL for media uploads (APKs, mapping files).
    #[serde(default = "default_base_url")]
    pub upload_base_url: String,

    /// OAuth token endpoint override. Empty means use the key file's `token_uri`.
    #[serde(default)]
    pub token_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            upload_base_url: default_base_url(),
            token_url: String::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Token endpoint override, if one is configured.
    #[must_use]
    pub fn token_url_override(&self) -> Option<&str> {
        let url = self.token_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

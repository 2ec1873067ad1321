//! # ps-config
//!
//! Layered configuration loading for pspublisher using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PSPUBLISHER_*` prefix, `__` as separator)
//! 2. Project-level `.pspublisher/config.toml`
//! 3. User-level `~/.config/pspublisher/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top by `ps-cli`.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PSPUBLISHER_API__TIMEOUT_SECS` -> `api.timeout_secs`,
//! `PSPUBLISHER_RELEASE__FALLBACK_LANGUAGE` -> `release.fallback_language`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ps_config::PublisherConfig;
//!
//! let config = PublisherConfig::load().expect("config");
//! println!("publishing through {}", config.api.base_url);
//! ```

mod api;
mod error;
mod release;

pub use api::{ApiConfig, DEFAULT_BASE_URL};
pub use error::ConfigError;
pub use release::{DEFAULT_RELEASE_NOTES, ReleaseConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "PSPUBLISHER_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PublisherConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub release: ReleaseConfig,
}

impl PublisherConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// `.env` files are not read here; the binary loads them before calling this.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and check a configuration from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".pspublisher/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        for (field, value) in [
            ("api.base_url", &self.api.base_url),
            ("api.upload_base_url", &self.api.upload_base_url),
        ] {
            if !(value.starts_with("https://") || value.starts_with("http://")) {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: format!("'{value}' is not an http(s) URL"),
                });
            }
        }
        if self
            .release
            .fallback_language
            .as_deref()
            .is_some_and(|language| language.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "release.fallback_language".into(),
                reason: "must not be blank when set".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pspublisher").join("config.toml"))
    }
}

use anyhow::Context;
use ps_config::PublisherConfig;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config() -> anyhow::Result<PublisherConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env file"),
    }

    PublisherConfig::load().context("failed to load pspublisher configuration")
}

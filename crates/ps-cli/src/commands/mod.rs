mod upload_apk;

use ps_config::PublisherConfig;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: &Commands,
    flags: &GlobalFlags,
    config: &PublisherConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::UploadApk(args) => upload_apk::handle(args, flags, config).await,
    }
}

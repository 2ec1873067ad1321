use ps_config::PublisherConfig;
use ps_play::PublisherClient;
use ps_publish::PublishOptions;

use crate::cli::{GlobalFlags, UploadApkArgs};
use crate::output::output;

/// Handle `pspublisher uploadApk`.
pub async fn handle(
    args: &UploadApkArgs,
    flags: &GlobalFlags,
    config: &PublisherConfig,
) -> anyhow::Result<()> {
    let raw = args.to_raw(&config.release);
    let options = PublishOptions {
        fallback_language: config.release.fallback_language.clone(),
    };
    let api = &config.api;

    let receipt = ps_publish::upload(raw, &options, |package_id, key_file| async move {
        PublisherClient::connect(api, &key_file, &package_id).await
    })
    .await?;

    output(&receipt, flags.format)
}

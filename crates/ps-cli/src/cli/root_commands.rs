use std::path::PathBuf;

use clap::{Args, Subcommand};
use ps_config::ReleaseConfig;
use ps_publish::RawUploadConfig;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Upload an APK to a track and commit the release.
    #[command(name = "uploadApk", arg_required_else_help = true)]
    UploadApk(UploadApkArgs),
}

#[derive(Clone, Debug, Args)]
pub struct UploadApkArgs {
    /// Package name of the app, e.g. com.example.app.
    #[arg(long)]
    pub id: Option<String>,

    /// Service account JSON key file.
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// APK file to upload.
    #[arg(long)]
    pub apk: Option<PathBuf>,

    /// Track to release to (internal, alpha, beta, production, ...).
    #[arg(long)]
    pub track: Option<String>,

    /// ProGuard/R8 mapping file for the uploaded version.
    #[arg(long)]
    pub mapping: Option<PathBuf>,

    /// Release notes text.
    #[arg(long)]
    pub releasenotes: Option<String>,

    /// File with the release notes; takes precedence over --releasenotes.
    #[arg(long)]
    pub releasenotesfile: Option<PathBuf>,

    /// Release status: completed, draft, halted or inProgress.
    #[arg(long)]
    pub status: Option<String>,
}

impl UploadApkArgs {
    /// Combine the flags with configured release defaults.
    #[must_use]
    pub fn to_raw(&self, release: &ReleaseConfig) -> RawUploadConfig {
        RawUploadConfig {
            package_id: self.id.clone(),
            key_file: self.key.clone(),
            apk: self.apk.clone(),
            track: self.track.clone(),
            mapping: self.mapping.clone(),
            release_notes: self
                .releasenotes
                .clone()
                .unwrap_or_else(|| release.default_notes.clone()),
            release_notes_file: self.releasenotesfile.clone(),
            status: self
                .status
                .clone()
                .unwrap_or_else(|| release.default_status.clone()),
        }
    }
}

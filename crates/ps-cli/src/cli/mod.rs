use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, UploadApkArgs};

/// Top-level CLI parser for the `pspublisher` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pspublisher",
    version,
    about = "Publish Android APKs to Google Play"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Receipt format: text, json
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Verbose mode (dumps API responses, implies --debug)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            verbose: self.verbose,
            debug: self.debug,
        }
    }
}

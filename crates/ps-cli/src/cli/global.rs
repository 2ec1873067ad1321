use clap::ValueEnum;

/// How the receipt of a successful upload is printed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub verbose: bool,
    pub debug: bool,
}

impl GlobalFlags {
    /// Default filter directive; `--verbose` implies `--debug`.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.verbose {
            "trace"
        } else if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

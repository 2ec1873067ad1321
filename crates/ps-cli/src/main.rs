use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("pspublisher error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(&flags)?;

    let config = bootstrap::load_config()?;
    commands::dispatch(&cli.command, &flags, &config).await
}

fn init_tracing(flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("PSPUBLISHER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(flags.log_level()));

    // stdout is reserved for the receipt.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

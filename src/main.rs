// Chainspec - Entry point of the chain spec adapter tool

mod cli;

use clap::Parser;
use cli::config::CommandConfig;
use cli::runner::run_command;
use cli::Cli;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_filter = if cli.verbose {
        "debug"
    } else {
        &cli.log_level
    };

    // Logs go to stderr so stdout stays clean for emitted specs
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_filter)),
        )
        .init();

    let config = CommandConfig::from_cli(&cli.command).map_err(|e| {
        error!("Configuration error: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    if let Err(e) = run_command(config) {
        error!("Command failed: {}", e);
        return Err(anyhow::anyhow!("Command failed: {}", e));
    }

    Ok(())
}

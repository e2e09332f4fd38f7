//! Command-line tool for managing EventSub subscriptions over the Helix API.

mod commands;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::Commands;
use config::{AuthArgs, CliConfig};

#[derive(Parser)]
#[command(name = "helix-eventsub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    auth: AuthArgs,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_path = config::load_dotenv();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match dotenv_path {
        Some(path) => tracing::debug!("Loaded .env from: {path}"),
        None => tracing::debug!("No .env file found, using system environment variables"),
    }

    let config = if commands::needs_api(&cli.command) {
        Some(CliConfig::from_args(&cli.auth)?)
    } else {
        None
    };

    if let Err(e) = commands::run(cli.command, config).await {
        tracing::error!(error = %e, "Command failed");
        return Err(e);
    }
    Ok(())
}

//! Genflow CLI
//!
//! Command-line interface for the generation service: submit jobs, watch
//! them to completion, and fetch resolved artifacts.

mod commands;
mod config;
mod watch;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "genflow")]
#[command(about = "Generation service CLI", long_about = None)]
struct Cli {
    /// Service API base URL
    #[arg(long, env = "GENFLOW_API_URL")]
    api_url: String,

    /// Bearer token for the service API
    #[arg(long, env = "GENFLOW_API_TOKEN", hide_env_values = true)]
    api_token: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genflow=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        api_token: cli.api_token,
    };

    handle_command(cli.command, &config).await
}

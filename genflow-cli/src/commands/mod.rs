//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod generate;
mod job;

pub use generate::{I2vArgs, T2iArgs, T2vArgs};
pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a text-to-image job
    T2i(T2iArgs),
    /// Submit a text-to-video job
    T2v(T2vArgs),
    /// Submit an image-to-video job
    I2v(I2vArgs),
    /// Inspect submitted jobs
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::T2i(args) => generate::handle_t2i(args, config).await,
        Commands::T2v(args) => generate::handle_t2v(args, config).await,
        Commands::I2v(args) => generate::handle_i2v(args, config).await,
        Commands::Job { command } => job::handle_job_command(command, config).await,
    }
}

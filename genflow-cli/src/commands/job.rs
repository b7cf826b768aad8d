//! Job command handlers
//!
//! Handles job inspection: one-shot status, one-shot result resolution,
//! and watching a job through to its artifact.

use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use genflow_client::GenerationClient;
use genflow_core::domain::job::{ArtifactKind, JobHandle};
use genflow_core::domain::status::classify_status;
use genflow_tracker::{ResultFetchCoordinator, ResultOutcome};

use crate::config::Config;
use crate::watch::{print_artifact, watch_job};

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Fetch and classify the job's current status
    Status {
        /// Job id
        id: String,

        /// Also print the raw status payload
        #[arg(long)]
        raw: bool,
    },
    /// Fetch the job result and resolve the artifact URL (one attempt)
    Result {
        /// Job id
        id: String,

        /// Media kind of the submitted job
        #[arg(long, value_enum)]
        kind: KindArg,
    },
    /// Poll the job to completion, then resolve the artifact URL
    Watch {
        /// Job id
        id: String,

        /// Media kind of the submitted job
        #[arg(long, value_enum)]
        kind: KindArg,
    },
}

/// CLI-facing media kind
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum KindArg {
    Image,
    Video,
}

impl From<KindArg> for ArtifactKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Image => ArtifactKind::Image,
            KindArg::Video => ArtifactKind::Video,
        }
    }
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = GenerationClient::new(&config.api_url, &config.api_token);

    match command {
        JobCommands::Status { id, raw } => job_status(&client, &id, raw).await,
        JobCommands::Result { id, kind } => job_result(client, &id, kind.into()).await,
        JobCommands::Watch { id, kind } => {
            watch_job(client, JobHandle::new(id, kind.into())).await
        }
    }
}

/// Fetch the status payload once and print the classified state
async fn job_status(client: &GenerationClient, id: &str, raw: bool) -> Result<()> {
    let payload = client.get_job(id).await?;
    let reading = classify_status(Some(&payload));

    match reading.label {
        Some(label) => println!(
            "{} {} ({})",
            "Status:".bold(),
            reading.state.to_string().yellow(),
            label
        ),
        None => println!("{} {}", "Status:".bold(), reading.state.to_string().yellow()),
    }

    if raw {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }

    Ok(())
}

/// One result fetch attempt
async fn job_result(client: GenerationClient, id: &str, kind: ArtifactKind) -> Result<()> {
    let handle = JobHandle::new(id, kind);
    let coordinator = ResultFetchCoordinator::new(Arc::new(client));

    match coordinator.fetch_once(&handle).await? {
        ResultOutcome::Resolved(artifact) => print_artifact(&artifact),
        ResultOutcome::NotReady => {
            println!("{}", "Result URL not ready yet. Try again shortly.".yellow());
        }
    }

    Ok(())
}

//! Watch flow
//!
//! Drives a submitted job through the tracker: poll until terminal, then
//! resolve the artifact with a bounded number of "not ready" retries. This
//! is the caller-side retry policy the coordinator deliberately does not
//! own.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use colored::*;
use tokio::time;

use genflow_client::GenerationClient;
use genflow_core::domain::job::{JobHandle, ResolvedArtifact};
use genflow_core::domain::status::LifecycleState;
use genflow_tracker::{JobPoller, JobsApi, ResultFetchCoordinator, ResultOutcome};

/// Attempts at resolving a completed job's result before giving up
const RESULT_ATTEMPTS: u32 = 5;
/// Delay between result attempts
const RESULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Polls a job to its terminal state, then resolves and prints the artifact
pub async fn watch_job(client: GenerationClient, handle: JobHandle) -> Result<()> {
    let api: Arc<dyn JobsApi> = Arc::new(client);

    let mut poller = JobPoller::new(Arc::clone(&api));
    poller.set(&handle.id);
    let mut rx = poller.subscribe();

    let terminal = loop {
        let snapshot = rx.borrow_and_update().clone();
        match &snapshot.label {
            Some(label) => println!("  status: {} ({})", snapshot.state, label),
            None => println!("  status: {}", snapshot.state),
        }
        if snapshot.state.is_terminal() {
            break snapshot;
        }
        if rx.changed().await.is_err() {
            break snapshot;
        }
    };

    if terminal.state == LifecycleState::Failed {
        bail!("job {} failed", handle.id);
    }

    let coordinator = ResultFetchCoordinator::new(api);

    for attempt in 1..=RESULT_ATTEMPTS {
        match coordinator.fetch_once(&handle).await? {
            ResultOutcome::Resolved(artifact) => {
                print_artifact(&artifact);
                return Ok(());
            }
            ResultOutcome::NotReady => {
                println!(
                    "{}",
                    format!(
                        "Result not ready yet (attempt {}/{})",
                        attempt, RESULT_ATTEMPTS
                    )
                    .yellow()
                );
                if attempt < RESULT_ATTEMPTS {
                    time::sleep(RESULT_RETRY_DELAY).await;
                }
            }
        }
    }

    bail!(
        "job {} completed but the result was not ready after {} attempts",
        handle.id,
        RESULT_ATTEMPTS
    )
}

/// Prints a resolved artifact
pub fn print_artifact(artifact: &ResolvedArtifact) {
    println!(
        "{} {} {}",
        "Resolved".green().bold(),
        artifact.kind.to_string().cyan(),
        artifact.url
    );
}

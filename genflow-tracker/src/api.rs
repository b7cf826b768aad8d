//! Fetch collaborator trait
//!
//! The poller and coordinator only ever need two calls against the service:
//! fetch a status payload and fetch a result payload. Putting them behind a
//! trait keeps the timer and state-machine logic testable with an in-memory
//! fake.

use async_trait::async_trait;
use genflow_client::{GenerationClient, Result};
use serde_json::Value;

/// Collaborator for job status and result fetches
#[async_trait]
pub trait JobsApi: Send + Sync {
    /// Fetches the current status payload for a job
    async fn fetch_status(&self, job_id: &str) -> Result<Value>;

    /// Fetches the result payload for a job
    async fn fetch_result(&self, job_id: &str) -> Result<Value>;
}

#[async_trait]
impl JobsApi for GenerationClient {
    async fn fetch_status(&self, job_id: &str) -> Result<Value> {
        self.get_job(job_id).await
    }

    async fn fetch_result(&self, job_id: &str) -> Result<Value> {
        self.get_job_result(job_id).await
    }
}

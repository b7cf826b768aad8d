//! Job polling endpoints
//!
//! Status and result payloads are deliberately returned as raw
//! `serde_json::Value`: their shape varies across job types and backend
//! versions, so classification and resolution happen in `genflow-core`
//! rather than through typed deserialization here.

use crate::GenerationClient;
use crate::error::Result;
use serde_json::Value;

impl GenerationClient {
    /// Fetch the current status payload for a job (`GET /jobs/{id}`)
    pub async fn get_job(&self, job_id: &str) -> Result<Value> {
        let response = self.get(&format!("/jobs/{}", job_id)).send().await?;

        self.handle_response(response).await
    }

    /// Fetch the result payload for a job (`GET /jobs/{id}/result`)
    ///
    /// Callers should only request this once the job reports completion;
    /// even then the payload may not yet contain a resolvable URL.
    pub async fn get_job_result(&self, job_id: &str) -> Result<Value> {
        let response = self.get(&format!("/jobs/{}/result", job_id)).send().await?;

        self.handle_response(response).await
    }
}

//! Result fetch coordination
//!
//! Once the poller reports completion, the artifact still has to be fetched
//! and dug out of a backend-version-dependent payload. One invocation of the
//! coordinator is exactly one fetch attempt: "no URL found yet" is a
//! recoverable outcome the caller may retry under its own policy, while a
//! transport error is a distinct, reportable failure.

use std::sync::Arc;

use tracing::debug;

use crate::api::JobsApi;
use genflow_client::Result;
use genflow_core::domain::job::{JobHandle, ResolvedArtifact};
use genflow_core::domain::result::resolve_result_url;

/// Outcome of one result fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultOutcome {
    /// Artifact URL found; the kind comes from the handle
    Resolved(ResolvedArtifact),
    /// Payload fetched fine but no usable URL yet; try again later
    NotReady,
}

/// One-shot result fetcher and resolver
///
/// Invoke only after the poller reports `Completed`. Does not loop: bounded
/// retrying of `NotReady` is the caller's policy.
pub struct ResultFetchCoordinator {
    api: Arc<dyn JobsApi>,
}

impl ResultFetchCoordinator {
    pub fn new(api: Arc<dyn JobsApi>) -> Self {
        Self { api }
    }

    /// Fetches the result payload once and tries to resolve the artifact
    ///
    /// A transport error propagates as `ClientError`; it is distinct from
    /// `NotReady` and should be surfaced to the user, not silently retried.
    pub async fn fetch_once(&self, handle: &JobHandle) -> Result<ResultOutcome> {
        let payload = self.api.fetch_result(&handle.id).await?;

        match resolve_result_url(&payload) {
            Some(url) => Ok(ResultOutcome::Resolved(ResolvedArtifact {
                url,
                kind: handle.kind,
            })),
            None => {
                debug!(job_id = %handle.id, %payload, "result not ready or unknown shape");
                Ok(ResultOutcome::NotReady)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use genflow_client::ClientError;
    use genflow_core::domain::job::ArtifactKind;
    use serde_json::{Value, json};

    struct FixedResultApi {
        result: genflow_client::Result<Value>,
    }

    impl FixedResultApi {
        fn new(result: genflow_client::Result<Value>) -> Arc<Self> {
            Arc::new(Self { result })
        }
    }

    #[async_trait]
    impl JobsApi for FixedResultApi {
        async fn fetch_status(&self, _job_id: &str) -> genflow_client::Result<Value> {
            Ok(json!({"status": "completed"}))
        }

        async fn fetch_result(&self, _job_id: &str) -> genflow_client::Result<Value> {
            match &self.result {
                Ok(v) => Ok(v.clone()),
                Err(_) => Err(ClientError::api_error(500, "boom")),
            }
        }
    }

    #[tokio::test]
    async fn test_resolves_artifact_with_caller_kind() {
        let api = FixedResultApi::new(Ok(json!({
            "payload": {"jobs": [{"results": {"raw": {"url": "https://x/a.png"}}}]}
        })));
        let coordinator = ResultFetchCoordinator::new(api);
        let handle = JobHandle::new("j1", ArtifactKind::Image);

        let outcome = coordinator.fetch_once(&handle).await.unwrap();
        assert_eq!(
            outcome,
            ResultOutcome::Resolved(ResolvedArtifact {
                url: "https://x/a.png".to_string(),
                kind: ArtifactKind::Image,
            })
        );
    }

    #[tokio::test]
    async fn test_empty_payload_is_not_ready_not_error() {
        let api = FixedResultApi::new(Ok(json!({})));
        let coordinator = ResultFetchCoordinator::new(api);
        let handle = JobHandle::new("j1", ArtifactKind::Video);

        let outcome = coordinator.fetch_once(&handle).await.unwrap();
        assert_eq!(outcome, ResultOutcome::NotReady);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let api = FixedResultApi::new(Err(ClientError::api_error(500, "boom")));
        let coordinator = ResultFetchCoordinator::new(api);
        let handle = JobHandle::new("j1", ArtifactKind::Video);

        let err = coordinator.fetch_once(&handle).await.unwrap_err();
        assert!(err.is_server_error());
    }
}

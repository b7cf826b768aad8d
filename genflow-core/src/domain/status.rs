//! Status classification
//!
//! Maps raw status payloads from the service onto the normalized job
//! lifecycle. The service's status strings are free-form and vary across
//! job types and backend versions, so classification is substring-based
//! and deliberately forgiving: anything that is not recognizably terminal
//! keeps the poll loop alive.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized job lifecycle state
///
/// `Completed` and `Failed` are terminal: once reached, no further polling
/// occurs for the handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// No job is being tracked
    #[default]
    Idle,
    /// Job submitted, first status fetch not yet applied
    Queued,
    /// Job is in progress (covers any non-terminal backend status)
    Running,
    /// Job finished and a result can be fetched
    Completed,
    /// Job failed, or the status fetch itself failed
    Failed,
}

impl LifecycleState {
    /// Whether this state ends polling for the handle
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleState::Completed | LifecycleState::Failed)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Queued => "queued",
            LifecycleState::Running => "running",
            LifecycleState::Completed => "completed",
            LifecycleState::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of classifying one status payload
///
/// When the service reports a status string that is neither "completed" nor
/// "failed", the verbatim string is kept as `label` so callers can surface
/// it (e.g. "rendering", "in_queue") while the state stays `Running`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReading {
    pub state: LifecycleState,
    pub label: Option<String>,
}

impl StatusReading {
    fn terminal(state: LifecycleState) -> Self {
        Self { state, label: None }
    }
}

/// Classifies a raw status payload into a lifecycle state
///
/// `None` means the status fetch itself failed (network error or non-success
/// HTTP status); that is terminal `Failed` — polling forever against a dead
/// endpoint helps nobody, the caller can re-submit.
///
/// Otherwise the status string is taken from the top-level `status` field or
/// the nested `payload.status` field, first non-empty wins. A string
/// containing "completed" (any case) is `Completed`, one containing "failed"
/// is `Failed`, any other non-empty string is an in-progress label, and a
/// payload with no usable string at all is assumed to still be in progress.
pub fn classify_status(payload: Option<&Value>) -> StatusReading {
    let Some(payload) = payload else {
        return StatusReading::terminal(LifecycleState::Failed);
    };

    let status = extract_status(payload);

    match status {
        Some(s) => {
            let lower = s.to_lowercase();
            if lower.contains("completed") {
                StatusReading::terminal(LifecycleState::Completed)
            } else if lower.contains("failed") {
                StatusReading::terminal(LifecycleState::Failed)
            } else {
                StatusReading {
                    state: LifecycleState::Running,
                    label: Some(s.to_string()),
                }
            }
        }
        None => StatusReading {
            state: LifecycleState::Running,
            label: None,
        },
    }
}

/// Pulls the status string out of `status` or `payload.status`
fn extract_status(payload: &Value) -> Option<&str> {
    payload
        .get("status")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            payload
                .get("payload")
                .and_then(|p| p.get("status"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
}

//! Job poller
//!
//! Polls the service for a job's status until it reaches a terminal state.
//! One poll task exists per tracked id at most; replacing or clearing the
//! tracked id cancels the previous task before anything else happens.
//!
//! Cancellation safety: every `set`/`clear` bumps an epoch counter, and the
//! poll task re-checks the epoch once a fetch returns, before applying any
//! state update. A response that belongs to a superseded id is therefore
//! discarded, never applied, even if its fetch was already in flight when
//! the id changed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::api::JobsApi;
use genflow_core::domain::status::{LifecycleState, classify_status};

/// Default wall-clock cadence between status fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Observable state of the currently tracked job
#[derive(Debug, Clone, Default)]
pub struct PollSnapshot {
    /// Id of the tracked job, `None` while idle
    pub job_id: Option<String>,
    /// Normalized lifecycle state
    pub state: LifecycleState,
    /// Verbatim backend status string when it matched no known state
    pub label: Option<String>,
    /// Latest raw status payload, for callers that need vendor fields
    pub payload: Option<Value>,
}

/// Channel half and epoch counter shared with the poll task
struct Shared {
    epoch: AtomicU64,
    tx: watch::Sender<PollSnapshot>,
}

/// Timer-driven status poller for a single tracked job
///
/// Tracks at most one job id at a time. `set` arms a poll task that fetches
/// immediately and then on a fixed cadence; the task disarms itself on any
/// terminal state. `clear` (or dropping the poller) cancels everything.
pub struct JobPoller {
    api: Arc<dyn JobsApi>,
    poll_interval: Duration,
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl JobPoller {
    /// Creates a poller with the default 2 s interval
    pub fn new(api: Arc<dyn JobsApi>) -> Self {
        Self::with_interval(api, DEFAULT_POLL_INTERVAL)
    }

    /// Creates a poller with a custom poll interval
    pub fn with_interval(api: Arc<dyn JobsApi>, poll_interval: Duration) -> Self {
        let (tx, _) = watch::channel(PollSnapshot::default());
        Self {
            api,
            poll_interval,
            shared: Arc::new(Shared {
                epoch: AtomicU64::new(0),
                tx,
            }),
            task: None,
        }
    }

    /// Starts tracking a job id
    ///
    /// An empty id is a no-op (nothing to track, not an error), as is
    /// setting the id that is already being tracked. Otherwise any previous
    /// poll task is cancelled first, the state resets to `Queued`, and a new
    /// task is armed that fetches immediately and then every interval.
    pub fn set(&mut self, job_id: &str) {
        if job_id.is_empty() {
            debug!("ignoring empty job id");
            return;
        }
        if self.shared.tx.borrow().job_id.as_deref() == Some(job_id) {
            debug!(job_id, "already tracking this job");
            return;
        }

        self.cancel_task();
        let epoch = self.shared.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        self.shared.tx.send_replace(PollSnapshot {
            job_id: Some(job_id.to_string()),
            state: LifecycleState::Queued,
            label: None,
            payload: None,
        });

        let api = Arc::clone(&self.api);
        let shared = Arc::clone(&self.shared);
        let job_id = job_id.to_string();
        let poll_interval = self.poll_interval;

        self.task = Some(tokio::spawn(async move {
            poll_loop(api, shared, job_id, poll_interval, epoch).await;
        }));
    }

    /// Stops tracking and resets to `Idle`
    ///
    /// The poll task is aborted and the epoch bumped before the state is
    /// reset, so no fetch fires afterward and any response still in flight
    /// is discarded. The retained payload is dropped.
    pub fn clear(&mut self) {
        self.cancel_task();
        self.shared.epoch.fetch_add(1, Ordering::SeqCst);
        self.shared.tx.send_replace(PollSnapshot::default());
    }

    /// Current snapshot of the tracked job
    pub fn snapshot(&self) -> PollSnapshot {
        self.shared.tx.borrow().clone()
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.shared.tx.borrow().state
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot> {
        self.shared.tx.subscribe()
    }

    /// Waits until the tracked job reaches a terminal state
    ///
    /// Returns immediately if the current state is already terminal. Note
    /// that `clear()` resets to `Idle`, which is not terminal; callers that
    /// may clear concurrently should use `subscribe` directly.
    pub async fn wait_until_terminal(&self) -> PollSnapshot {
        let mut rx = self.shared.tx.subscribe();
        loop {
            let snapshot = rx.borrow_and_update().clone();
            if snapshot.state.is_terminal() {
                return snapshot;
            }
            if rx.changed().await.is_err() {
                return snapshot;
            }
        }
    }

    fn cancel_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for JobPoller {
    fn drop(&mut self) {
        self.cancel_task();
    }
}

/// The per-job poll task
///
/// Fetches are sequential: the next tick is not awaited until the current
/// fetch has finished, so fetches for one job never overlap. The interval
/// keeps wall-clock cadence when a slow fetch overruns a tick.
async fn poll_loop(
    api: Arc<dyn JobsApi>,
    shared: Arc<Shared>,
    job_id: String,
    poll_interval: Duration,
    epoch: u64,
) {
    let mut ticker = time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately: the initial fetch happens at set()
        ticker.tick().await;

        let response = api.fetch_status(&job_id).await;

        // The id may have been cleared or replaced while the fetch was in
        // flight; its response must not be applied to the new tracking state.
        if shared.epoch.load(Ordering::SeqCst) != epoch {
            debug!(job_id, "discarding status response for superseded job");
            return;
        }

        let reading = match &response {
            Ok(payload) => classify_status(Some(payload)),
            Err(e) => {
                warn!(job_id, error = %e, "status fetch failed, marking job failed");
                classify_status(None)
            }
        };

        debug!(job_id, state = %reading.state, "applying status update");

        let terminal = reading.state.is_terminal();
        shared.tx.send_modify(|snapshot| {
            snapshot.state = reading.state;
            snapshot.label = reading.label;
            if let Ok(payload) = response {
                snapshot.payload = Some(payload);
            }
        });

        if terminal {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use genflow_client::ClientError;
    use serde_json::json;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    /// Fake JobsApi that pops scripted status responses, keyed by job id so
    /// one job's responses are never served to another
    struct ScriptedApi {
        responses: Mutex<HashMap<String, VecDeque<genflow_client::Result<Value>>>>,
        status_calls: AtomicUsize,
        /// Artificial latency before each status response
        delay: Duration,
    }

    impl ScriptedApi {
        fn new(script: Vec<(&str, genflow_client::Result<Value>)>) -> Arc<Self> {
            Self::with_delay(script, Duration::ZERO)
        }

        fn with_delay(
            script: Vec<(&str, genflow_client::Result<Value>)>,
            delay: Duration,
        ) -> Arc<Self> {
            let mut responses: HashMap<String, VecDeque<_>> = HashMap::new();
            for (job_id, response) in script {
                responses
                    .entry(job_id.to_string())
                    .or_default()
                    .push_back(response);
            }
            Arc::new(Self {
                responses: Mutex::new(responses),
                status_calls: AtomicUsize::new(0),
                delay,
            })
        }

        fn calls(&self) -> usize {
            self.status_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JobsApi for ScriptedApi {
        async fn fetch_status(&self, job_id: &str) -> genflow_client::Result<Value> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            if self.delay > Duration::ZERO {
                time::sleep(self.delay).await;
            }
            self.responses
                .lock()
                .unwrap()
                .get_mut(job_id)
                .and_then(|queue| queue.pop_front())
                // Keep repeating "running" if the script runs dry
                .unwrap_or_else(|| Ok(json!({"status": "running"})))
        }

        async fn fetch_result(&self, _job_id: &str) -> genflow_client::Result<Value> {
            Ok(json!({}))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_then_completes_and_disarms() {
        let api = ScriptedApi::new(vec![
            ("j1", Ok(json!({"status": "running"}))),
            ("j1", Ok(json!({"status": "completed"}))),
        ]);
        let mut poller = JobPoller::new(api.clone());

        poller.set("j1");
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(poller.state(), LifecycleState::Running);
        assert_eq!(api.calls(), 1);

        time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(poller.state(), LifecycleState::Completed);
        assert_eq!(api.calls(), 2);

        // Terminal: timer disarmed, no further fetches however long we wait
        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(api.calls(), 2);
        assert_eq!(poller.state(), LifecycleState::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_reports_queued_before_first_response() {
        let api = ScriptedApi::with_delay(
            vec![("j1", Ok(json!({"status": "running"})))],
            Duration::from_millis(500),
        );
        let mut poller = JobPoller::new(api);

        poller.set("j1");
        assert_eq!(poller.state(), LifecycleState::Queued);
        assert_eq!(poller.snapshot().job_id.as_deref(), Some("j1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_status_surfaces_verbatim_label() {
        let api = ScriptedApi::new(vec![("j1", Ok(json!({"status": "rendering_frames"})))]);
        let mut poller = JobPoller::new(api);

        poller.set("j1");
        time::sleep(Duration::from_millis(10)).await;

        let snapshot = poller.snapshot();
        assert_eq!(snapshot.state, LifecycleState::Running);
        assert_eq!(snapshot.label.as_deref(), Some("rendering_frames"));
        assert!(snapshot.payload.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_is_terminal_failed() {
        let api = ScriptedApi::new(vec![
            ("j1", Ok(json!({"status": "running"}))),
            ("j1", Err(ClientError::api_error(502, "bad gateway"))),
        ]);
        let mut poller = JobPoller::with_interval(api.clone(), Duration::from_millis(500));

        poller.set("j1");
        time::sleep(Duration::from_millis(510)).await;
        assert_eq!(poller.state(), LifecycleState::Failed);
        assert_eq!(api.calls(), 2);

        // No automatic retry after failure
        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_fetch_after_clear() {
        let api = ScriptedApi::new(vec![("j1", Ok(json!({"status": "running"})))]);
        let mut poller = JobPoller::new(api.clone());

        poller.set("j1");
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(api.calls(), 1);

        poller.clear();
        assert_eq!(poller.state(), LifecycleState::Idle);
        assert!(poller.snapshot().payload.is_none());

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_never_applied_to_replacement() {
        // Job "a" answers "completed" but only after a long delay; "b" is
        // tracked before that response lands.
        let api = ScriptedApi::with_delay(
            vec![
                ("a", Ok(json!({"status": "completed", "job": "a"}))),
                ("b", Ok(json!({"status": "running", "job": "b"}))),
            ],
            Duration::from_millis(300),
        );
        let mut poller = JobPoller::new(api.clone());

        poller.set("a");
        time::sleep(Duration::from_millis(100)).await;

        poller.set("b");
        assert_eq!(poller.state(), LifecycleState::Queued);

        time::sleep(Duration::from_millis(500)).await;
        let snapshot = poller.snapshot();
        assert_eq!(snapshot.job_id.as_deref(), Some("b"));
        // "a"'s terminal response must not have leaked into "b"'s state
        assert_eq!(snapshot.state, LifecycleState::Running);
        assert_eq!(snapshot.payload.unwrap()["job"], "b");
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_response_discarded_after_epoch_bump() {
        // Drive the poll task directly so the epoch can be superseded while
        // a fetch is in flight: the response arrives, fails the epoch check,
        // and must leave the published state untouched.
        let api = ScriptedApi::with_delay(
            vec![("j1", Ok(json!({"status": "completed"})))],
            Duration::from_millis(300),
        );
        let (tx, _) = watch::channel(PollSnapshot {
            job_id: Some("j1".to_string()),
            state: LifecycleState::Queued,
            label: None,
            payload: None,
        });
        let shared = Arc::new(Shared {
            epoch: AtomicU64::new(1),
            tx,
        });

        let task = tokio::spawn(poll_loop(
            api.clone(),
            Arc::clone(&shared),
            "j1".to_string(),
            Duration::from_millis(2000),
            1,
        ));

        // Supersede the handle while the fetch is still sleeping
        time::sleep(Duration::from_millis(100)).await;
        shared.epoch.fetch_add(1, Ordering::SeqCst);

        task.await.unwrap();
        let snapshot = shared.tx.borrow().clone();
        assert_eq!(snapshot.state, LifecycleState::Queued);
        assert!(snapshot.payload.is_none());
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_id_is_a_no_op() {
        let api = ScriptedApi::new(Vec::new());
        let mut poller = JobPoller::new(api.clone());

        poller.set("");
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(poller.state(), LifecycleState::Idle);
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_setting_same_id_does_not_restart() {
        let api = ScriptedApi::new(vec![("j1", Ok(json!({"status": "running"})))]);
        let mut poller = JobPoller::new(api.clone());

        poller.set("j1");
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(poller.state(), LifecycleState::Running);

        poller.set("j1");
        assert_eq!(poller.state(), LifecycleState::Running);
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_terminal() {
        let api = ScriptedApi::new(vec![
            ("j1", Ok(json!({"status": "queued"}))),
            ("j1", Ok(json!({"status": "running"}))),
            ("j1", Ok(json!({"status": "completed"}))),
        ]);
        let mut poller = JobPoller::new(api);

        poller.set("j1");
        let snapshot = poller.wait_until_terminal().await;
        assert_eq!(snapshot.state, LifecycleState::Completed);
        assert_eq!(snapshot.job_id.as_deref(), Some("j1"));
    }
}

//! Genflow Tracker
//!
//! Asynchronous job-lifecycle tracking for the generation service.
//!
//! Architecture:
//! - `JobsApi`: collaborator trait over the two fetch endpoints, so the
//!   tracker is testable without a live service
//! - `JobPoller`: one timer-driven poll task per tracked job id, with safe
//!   cancellation across job changes and teardown
//! - `ResultFetchCoordinator`: one-shot result fetch + resolution once a
//!   job completes
//!
//! The poller publishes state through a watch channel; callers read
//! snapshots or await the terminal state and then ask the coordinator for
//! the artifact.

mod api;
mod coordinator;
mod poller;

pub use api::JobsApi;
pub use coordinator::{ResultFetchCoordinator, ResultOutcome};
pub use poller::{JobPoller, PollSnapshot};

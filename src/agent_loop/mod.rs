//! The orchestration loop: one user message in, one final answer out.

pub mod events;
pub mod runner;
pub mod types;

pub use events::{RunEvent, RunEventPayload, RunEventStream, RunLifecycle};
pub use runner::{RunEventSink, RunHandle, RunRequest, SessionRunner};
pub use types::{RunId, RunOutcome, RunStatus};

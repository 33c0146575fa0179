//! Core run types for the orchestration loop.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::TangentError;

/// Unique run identifier.
pub type RunId = Uuid;

/// Run lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Failed,
    Canceled,
}

/// Terminal outcome of a run.
///
/// `final_text` is set exactly when `status` is `Completed`; `error`
/// carries the structured failure for `Failed`. The persisted session
/// state is valid in every case — failures never leave a partial batch.
#[derive(Debug)]
pub struct RunOutcome {
    pub run_id: RunId,
    pub status: RunStatus,
    pub final_text: Option<String>,
    pub error: Option<TangentError>,
    /// Oracle consultations performed.
    pub iterations: usize,
    pub finished_at: DateTime<Utc>,
}

impl RunOutcome {
    pub fn completed(run_id: RunId, final_text: String, iterations: usize) -> Self {
        Self {
            run_id,
            status: RunStatus::Completed,
            final_text: Some(final_text),
            error: None,
            iterations,
            finished_at: Utc::now(),
        }
    }

    pub fn failed(run_id: RunId, error: TangentError, iterations: usize) -> Self {
        Self {
            run_id,
            status: RunStatus::Failed,
            final_text: None,
            error: Some(error),
            iterations,
            finished_at: Utc::now(),
        }
    }

    pub fn canceled(run_id: RunId, iterations: usize) -> Self {
        Self {
            run_id,
            status: RunStatus::Canceled,
            final_text: None,
            error: Some(TangentError::Canceled),
            iterations,
            finished_at: Utc::now(),
        }
    }

    /// Collapse into the caller-facing result: the final answer text or
    /// the structured error.
    pub fn into_result(self) -> Result<String, TangentError> {
        match self.status {
            RunStatus::Completed => Ok(self.final_text.unwrap_or_default()),
            _ => Err(self.error.unwrap_or(TangentError::Canceled)),
        }
    }
}

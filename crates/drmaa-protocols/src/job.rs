//! Job identity, state and result information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque job handle returned by a session on submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Job lifecycle state as reported by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Undetermined,
    Queued,
    QueuedHeld,
    Running,
    Suspended,
    Requeued,
    RequeuedHeld,
    /// Finished with exit status 0.
    Done,
    /// Finished with a non-zero exit status, a signal, or never started.
    Failed,
}

impl JobState {
    /// States after which the scheduler reports no further transitions.
    pub const TERMINAL: [JobState; 2] = [JobState::Done, JobState::Failed];

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl Default for JobState {
    fn default() -> Self {
        Self::Undetermined
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Undetermined => "undetermined",
            Self::Queued => "queued",
            Self::QueuedHeld => "queued_held",
            Self::Running => "running",
            Self::Suspended => "suspended",
            Self::Requeued => "requeued",
            Self::RequeuedHeld => "requeued_held",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Snapshot of a job as known to the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInfo {
    pub id: JobId,

    pub state: JobState,

    /// Process exit code; `None` while running or when killed by a signal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_status: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminating_signal: Option<i32>,

    pub submission_time: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<DateTime<Utc>>,
}

impl JobInfo {
    /// Info for a job that was just accepted by the scheduler.
    pub fn submitted(id: JobId) -> Self {
        Self {
            id,
            state: JobState::Queued,
            exit_status: None,
            terminating_signal: None,
            submission_time: Utc::now(),
            dispatch_time: None,
            finish_time: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;

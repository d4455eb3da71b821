//! Scheduler session errors.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session initialization failed: {0}")]
    Init(String),

    #[error("Session is closed")]
    Closed,

    #[error("Invalid job template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error("Job submission failed: {0}")]
    Submission(String),

    #[error("Timed out after {timeout:?} waiting for job {job_id}")]
    WaitTimeout { job_id: String, timeout: Duration },

    #[error("Job query failed: {0}")]
    Query(String),

    #[error("Internal scheduler error: {0}")]
    Internal(String),
}

impl SessionError {
    /// Whether this error reports an elapsed wait deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::WaitTimeout { .. })
    }
}

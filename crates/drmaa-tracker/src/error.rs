//! Tracker errors.

use std::time::Duration;

use thiserror::Error;

use drmaa_config::ConfigError;
use drmaa_protocols::{ConversionError, JobId, SessionError};

/// Tracker error types.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A template field could not be written to or read from the native side.
    #[error("Template conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// The scheduler session rejected a call.
    #[error("Session {operation} failed{}: {source}", job_suffix(.job_id))]
    Session {
        operation: &'static str,
        job_id: Option<JobId>,
        #[source]
        source: SessionError,
    },

    /// No accepted state was reached before the deadline.
    #[error("Timed out after {timeout:?} waiting for job {job_id}")]
    Timeout { job_id: JobId, timeout: Duration },

    /// The tracker configuration was rejected.
    #[error("Invalid tracker configuration: {0}")]
    Config(#[from] ConfigError),

    /// The session refused the template as incomplete or inconsistent.
    #[error("Invalid job template: {0}")]
    Validation(String),
}

impl TrackerError {
    pub(crate) fn session(operation: &'static str, job_id: Option<&JobId>, source: SessionError) -> Self {
        Self::Session {
            operation,
            job_id: job_id.cloned(),
            source,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

fn job_suffix(job_id: &Option<JobId>) -> String {
    match job_id {
        Some(id) => format!(" for job {id}"),
        None => String::new(),
    }
}

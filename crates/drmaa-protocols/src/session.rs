//! Scheduler session protocol definitions.
//!
//! A [`Session`] is a live connection to a DRMAA1-style scheduler. Job
//! templates are allocated from it, filled through their accessors and handed
//! back for submission.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{AttributeError, SessionError};
use crate::job::{JobId, JobInfo, JobState};

/// Scheduler-owned job template.
///
/// Every accessor may fail independently. Getters return `Ok(None)` for an
/// attribute that was never set.
pub trait NativeTemplate: Send + Sync {
    fn remote_command(&self) -> Result<Option<String>, AttributeError>;
    fn set_remote_command(&mut self, command: &str) -> Result<(), AttributeError>;

    fn args(&self) -> Result<Vec<String>, AttributeError>;
    fn set_args(&mut self, args: &[String]) -> Result<(), AttributeError>;

    fn input_path(&self) -> Result<Option<String>, AttributeError>;
    fn set_input_path(&mut self, path: &str) -> Result<(), AttributeError>;

    fn output_path(&self) -> Result<Option<String>, AttributeError>;
    fn set_output_path(&mut self, path: &str) -> Result<(), AttributeError>;

    fn error_path(&self) -> Result<Option<String>, AttributeError>;
    fn set_error_path(&mut self, path: &str) -> Result<(), AttributeError>;

    fn join_files(&self) -> Result<bool, AttributeError>;
    fn set_join_files(&mut self, join: bool) -> Result<(), AttributeError>;

    fn job_name(&self) -> Result<Option<String>, AttributeError>;
    fn set_job_name(&mut self, name: &str) -> Result<(), AttributeError>;

    fn working_directory(&self) -> Result<Option<String>, AttributeError>;
    fn set_working_directory(&mut self, dir: &str) -> Result<(), AttributeError>;

    fn environment(&self) -> Result<HashMap<String, String>, AttributeError>;
    fn set_environment(&mut self, env: &HashMap<String, String>) -> Result<(), AttributeError>;

    /// Free-form scheduler option string.
    fn native_specification(&self) -> Result<Option<String>, AttributeError>;
    fn set_native_specification(&mut self, spec: &str) -> Result<(), AttributeError>;
}

/// Live scheduler session.
///
/// Implementations decide their own thread-safety story; callers holding a
/// session behind `&self` may issue calls concurrently.
#[async_trait]
pub trait Session: Send + Sync {
    type Template: NativeTemplate;

    /// Open a session. `contact` selects the scheduler; `None` means the
    /// implementation's default.
    async fn open(contact: Option<&str>) -> Result<Self, SessionError>
    where
        Self: Sized;

    /// Contact string of the connected scheduler.
    fn contact(&self) -> &str;

    async fn allocate_template(&self) -> Result<Self::Template, SessionError>;

    async fn run_job(&self, template: &Self::Template) -> Result<JobId, SessionError>;

    /// Block until the job is in one of `states`, or fail with
    /// [`SessionError::WaitTimeout`] once `timeout` has elapsed.
    async fn wait_for_state(
        &self,
        job_id: &JobId,
        timeout: Duration,
        states: &[JobState],
    ) -> Result<(), SessionError>;

    async fn job_state(&self, job_id: &JobId) -> Result<JobState, SessionError>;

    async fn job_info(&self, job_id: &JobId) -> Result<JobInfo, SessionError>;

    /// Tear the session down. A second call returns [`SessionError::Closed`].
    fn close(&self) -> Result<(), SessionError>;
}

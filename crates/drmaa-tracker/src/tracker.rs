//! Job tracker over a single scheduler session.

use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use drmaa_config::{ConfigValidator, TrackerConfig};
use drmaa_protocols::{JobId, JobInfo, JobState, JobTemplate, Session, SessionError};

use crate::convert;
use crate::error::TrackerError;

const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(60);

/// Owns one scheduler session and submits generic job templates to it.
///
/// Methods take `&self` and pass straight through to the session, so
/// concurrent use is exactly as safe as the session makes it. The session is
/// closed once: by [`JobTracker::destroy_session`], or on drop otherwise.
pub struct JobTracker<S: Session> {
    session: S,
    default_timeout: Duration,
    jobs: Mutex<Vec<JobId>>,
    destroyed: bool,
}

impl<S: Session> JobTracker<S> {
    /// Open a new session and wrap it.
    pub async fn new(contact: Option<&str>) -> Result<Self, TrackerError> {
        let session = S::open(contact)
            .await
            .map_err(|e| TrackerError::session("open", None, e))?;
        debug!(contact = session.contact(), "Opened scheduler session");
        Ok(Self::with_session(session))
    }

    /// Validate the configuration, then open a session using its
    /// `[session]` and `[wait]` sections.
    pub async fn from_config(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let warnings = ConfigValidator::validate(config).into_result()?;
        for warning in &warnings {
            warn!(field = %warning.path, "{}", warning.message);
        }

        let mut tracker = Self::new(config.session.contact.as_deref()).await?;
        tracker.default_timeout = config.wait.default_timeout();
        Ok(tracker)
    }

    /// Adopt an already opened session.
    pub fn with_session(session: S) -> Self {
        Self {
            session,
            default_timeout: DEFAULT_WAIT_TIMEOUT,
            jobs: Mutex::new(Vec::new()),
            destroyed: false,
        }
    }

    /// Contact string of the underlying session.
    pub fn contact(&self) -> &str {
        self.session.contact()
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Convert and submit a job. Every call submits a new job.
    ///
    /// Nothing is submitted when the conversion fails.
    pub async fn add_job(&self, template: &JobTemplate) -> Result<JobId, TrackerError> {
        let mut native = self
            .session
            .allocate_template()
            .await
            .map_err(|e| TrackerError::session("allocate_template", None, e))?;

        convert::to_native(template, &mut native)?;

        let job_id = self.session.run_job(&native).await.map_err(|e| match e {
            SessionError::InvalidTemplate(message) => TrackerError::Validation(message),
            e => TrackerError::session("run_job", None, e),
        })?;

        info!(
            job_id = %job_id,
            command = %template.remote_command,
            "Submitted job"
        );
        self.jobs.lock().push(job_id.clone());
        Ok(job_id)
    }

    /// Wait until the job reaches one of `states`.
    ///
    /// An empty `states` slice accepts any terminal state. A timed out job
    /// keeps running on the scheduler.
    pub async fn wait(
        &self,
        job_id: &JobId,
        timeout: Duration,
        states: &[JobState],
    ) -> Result<(), TrackerError> {
        let states: &[JobState] = if states.is_empty() {
            &JobState::TERMINAL
        } else {
            states
        };
        debug!(job_id = %job_id, ?timeout, ?states, "Waiting for job");

        match self.session.wait_for_state(job_id, timeout, states).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_timeout() => Err(TrackerError::Timeout {
                job_id: job_id.clone(),
                timeout,
            }),
            Err(e) => Err(TrackerError::session("wait_for_state", Some(job_id), e)),
        }
    }

    /// [`JobTracker::wait`] with the configured default timeout.
    pub async fn wait_with_default_timeout(
        &self,
        job_id: &JobId,
        states: &[JobState],
    ) -> Result<(), TrackerError> {
        self.wait(job_id, self.default_timeout, states).await
    }

    pub async fn job_state(&self, job_id: &JobId) -> Result<JobState, TrackerError> {
        self.session
            .job_state(job_id)
            .await
            .map_err(|e| TrackerError::session("job_state", Some(job_id), e))
    }

    /// Exit status and final state. Meaningful once [`JobTracker::wait`]
    /// succeeded for a terminal state; before that the result depends on the
    /// session.
    pub async fn job_info(&self, job_id: &JobId) -> Result<JobInfo, TrackerError> {
        self.session
            .job_info(job_id)
            .await
            .map_err(|e| TrackerError::session("job_info", Some(job_id), e))
    }

    /// Ids of the jobs submitted through this tracker, in submission order.
    pub fn list_jobs(&self) -> Vec<JobId> {
        self.jobs.lock().clone()
    }

    /// Stop listing a job. The job itself is left alone.
    pub fn forget_job(&self, job_id: &JobId) -> bool {
        let mut jobs = self.jobs.lock();
        let before = jobs.len();
        jobs.retain(|id| id != job_id);
        jobs.len() != before
    }

    /// Close the session.
    pub fn destroy_session(mut self) -> Result<(), TrackerError> {
        self.destroyed = true;
        self.session
            .close()
            .map_err(|e| TrackerError::session("close", None, e))?;
        debug!(contact = self.session.contact(), "Closed scheduler session");
        Ok(())
    }
}

impl<S: Session> Drop for JobTracker<S> {
    fn drop(&mut self) {
        if self.destroyed {
            return;
        }
        if let Err(e) = self.session.close() {
            warn!(error = %e, "Failed to close scheduler session on drop");
        }
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;

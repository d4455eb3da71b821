//! Local process session.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tokio::process::Child;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use drmaa_protocols::{JobId, JobInfo, JobState, Session, SessionError};

use crate::launch::{record_exit, Launch};
use crate::template::LocalTemplate;

const CONTACT: &str = "local";
const CONTACT_DIR_SCHEME: &str = "local://";

/// Session that runs every job as a child process of this host.
///
/// Job state lives in memory. Every job submitted through the session stays
/// queryable until the session is closed, and the table is freed with the
/// session value. Closing the session does not stop jobs that are still
/// running.
pub struct LocalSession {
    contact: String,
    default_dir: Option<PathBuf>,
    closed: AtomicBool,
    next_id: AtomicU64,
    jobs: Mutex<HashMap<JobId, Arc<watch::Sender<JobInfo>>>>,
}

impl LocalSession {
    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SessionError::Closed);
        }
        Ok(())
    }

    fn job(&self, job_id: &JobId) -> Result<Arc<watch::Sender<JobInfo>>, SessionError> {
        self.ensure_open()?;
        self.jobs
            .lock()
            .get(job_id)
            .cloned()
            .ok_or_else(|| SessionError::InvalidJob(format!("unknown job id {job_id}")))
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

fn parse_contact(contact: Option<&str>) -> Result<(String, Option<PathBuf>), SessionError> {
    match contact {
        None | Some("") | Some(CONTACT) => Ok((CONTACT.to_string(), None)),
        Some(contact) => {
            let dir = contact.strip_prefix(CONTACT_DIR_SCHEME).ok_or_else(|| {
                SessionError::Init(format!("unsupported contact string '{contact}'"))
            })?;
            let dir = PathBuf::from(dir);
            if !dir.is_dir() {
                return Err(SessionError::Init(format!(
                    "working directory {} does not exist",
                    dir.display()
                )));
            }
            Ok((contact.to_string(), Some(dir)))
        }
    }
}

/// Wait for the child and publish its exit.
async fn monitor(job_id: JobId, mut child: Child, job: Arc<watch::Sender<JobInfo>>) {
    let result = child.wait().await;
    job.send_modify(|info| {
        info.finish_time = Some(Utc::now());
        match result {
            Ok(status) => record_exit(info, status),
            Err(e) => {
                warn!(job_id = %job_id, error = %e, "Lost track of job process");
                info.state = JobState::Failed;
            }
        }
    });
    let info = job.borrow();
    debug!(
        job_id = %job_id,
        state = %info.state,
        exit_status = ?info.exit_status,
        "Job finished"
    );
}

#[async_trait]
impl Session for LocalSession {
    type Template = LocalTemplate;

    async fn open(contact: Option<&str>) -> Result<Self, SessionError> {
        let (contact, default_dir) = parse_contact(contact)?;
        info!(contact = %contact, "Opened local session");
        Ok(Self {
            contact,
            default_dir,
            closed: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
            jobs: Mutex::new(HashMap::new()),
        })
    }

    fn contact(&self) -> &str {
        &self.contact
    }

    async fn allocate_template(&self) -> Result<LocalTemplate, SessionError> {
        self.ensure_open()?;
        Ok(LocalTemplate::new())
    }

    async fn run_job(&self, template: &LocalTemplate) -> Result<JobId, SessionError> {
        self.ensure_open()?;

        let launch = Launch::prepare(template, self.default_dir.as_deref())?;
        if let Some(spec) = &template.native_specification {
            debug!(native_specification = %spec, "Native specification ignored by local session");
        }

        let child = launch
            .command()?
            .spawn()
            .map_err(|e| SessionError::Submission(format!("cannot start {}: {e}", launch.program)))?;

        let job_id = JobId::new(self.next_id.fetch_add(1, Ordering::SeqCst).to_string());
        let mut job_info = JobInfo::submitted(job_id.clone());
        job_info.state = JobState::Running;
        job_info.dispatch_time = Some(job_info.submission_time);

        let (sender, _) = watch::channel(job_info);
        let sender = Arc::new(sender);
        self.jobs.lock().insert(job_id.clone(), sender.clone());

        info!(
            job_id = %job_id,
            program = %launch.program,
            job_name = template.job_name.as_deref().unwrap_or(""),
            pid = ?child.id(),
            "Started job"
        );
        tokio::spawn(monitor(job_id.clone(), child, sender));

        Ok(job_id)
    }

    async fn wait_for_state(
        &self,
        job_id: &JobId,
        timeout: Duration,
        states: &[JobState],
    ) -> Result<(), SessionError> {
        let job = self.job(job_id)?;
        let mut receiver = job.subscribe();

        // wait_for checks the current value first, so a zero timeout still
        // succeeds for a job already in an accepted state.
        let reached = tokio::time::timeout(timeout, async {
            receiver
                .wait_for(|info| states.contains(&info.state))
                .await
                .map(|info| info.state)
        })
        .await;

        match reached {
            Ok(Ok(state)) => {
                debug!(job_id = %job_id, state = %state, "Job reached accepted state");
                Ok(())
            }
            Ok(Err(_)) => Err(SessionError::Internal(format!(
                "state channel of job {job_id} closed"
            ))),
            Err(_) => Err(SessionError::WaitTimeout {
                job_id: job_id.to_string(),
                timeout,
            }),
        }
    }

    async fn job_state(&self, job_id: &JobId) -> Result<JobState, SessionError> {
        Ok(self.job(job_id)?.borrow().state)
    }

    async fn job_info(&self, job_id: &JobId) -> Result<JobInfo, SessionError> {
        Ok(self.job(job_id)?.borrow().clone())
    }

    fn close(&self) -> Result<(), SessionError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Err(SessionError::Closed);
        }
        let running = self
            .jobs
            .lock()
            .values()
            .filter(|job| !job.borrow().state.is_terminal())
            .count();
        info!(contact = %self.contact, running, "Closed local session");
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

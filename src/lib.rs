//! # DRMAA Bridge
//!
//! DRMAA2-style job tracking on top of DRMAA1 scheduler sessions.
//!
//! The workspace is split the usual way:
//!
//! - [`protocols`]: job templates, job states and the session traits
//! - [`config`]: TOML configuration with validation
//! - [`tracker`]: template conversion and the [`JobTracker`]
//! - [`local`]: a session that runs jobs as local processes
//!
//! ```no_run
//! use std::time::Duration;
//! use drmaa_bridge::{JobState, JobTemplate, JobTracker, LocalSession};
//!
//! # async fn run() -> Result<(), drmaa_bridge::TrackerError> {
//! let tracker = JobTracker::<LocalSession>::new(None).await?;
//! let job_id = tracker.add_job(&JobTemplate::new("/bin/sleep").with_args(["1"])).await?;
//! tracker.wait(&job_id, Duration::from_secs(10), &[JobState::Done]).await?;
//! tracker.destroy_session()?;
//! # Ok(())
//! # }
//! ```

pub mod telemetry;

pub use drmaa_config as config;
pub use drmaa_protocols as protocols;
pub use drmaa_session_local as local;
pub use drmaa_tracker as tracker;

pub use drmaa_config::{ConfigLoader, ConfigValidator, TrackerConfig};
pub use drmaa_protocols::{JobId, JobInfo, JobState, JobTemplate, NATIVE_SPECIFICATION_EXTENSION};
pub use drmaa_session_local::LocalSession;
pub use drmaa_tracker::{from_native, to_native, JobTracker, TrackerError};

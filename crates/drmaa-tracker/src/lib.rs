//! # DRMAA Tracker
//!
//! Bridges scheduler-independent job templates onto a DRMAA1 session.
//!
//! - [`convert`] maps a [`JobTemplate`] onto a [`NativeTemplate`] and back
//! - [`JobTracker`] owns a [`Session`] and drives jobs through
//!   submit, wait and info

pub mod convert;
pub mod error;
pub mod tracker;

#[cfg(test)]
mod test_support;

pub use convert::{from_native, to_native, LOCAL_HOST_PREFIX};
pub use error::TrackerError;
pub use tracker::JobTracker;

pub use drmaa_protocols::{
    JobId, JobInfo, JobState, JobTemplate, NativeTemplate, Session,
    NATIVE_SPECIFICATION_EXTENSION,
};

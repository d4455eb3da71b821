//! # DRMAA Protocols
//!
//! Shared types and traits for the DRMAA bridge.
//! Contains only interface definitions - no scheduler implementations.
//!
//! ## Core Traits
//!
//! - [`Session`] - A live connection to a DRMAA1-style scheduler
//! - [`NativeTemplate`] - A scheduler-owned job template with fallible accessors
//!
//! ## Core Types
//!
//! - [`JobTemplate`] - Scheduler-independent job description
//! - [`JobState`] / [`JobInfo`] - Job lifecycle as reported by the scheduler

pub mod error;
pub mod job;
pub mod session;
pub mod template;

pub use error::{AttributeError, ConversionError, SessionError};
pub use job::{JobId, JobInfo, JobState};
pub use session::{NativeTemplate, Session};
pub use template::{JobTemplate, NATIVE_SPECIFICATION_EXTENSION};

//! Local process backend for the DRMAA bridge.
//!
//! [`LocalSession`] implements the scheduler session protocol by spawning
//! each job as a child process of the current host. Paths use the DRMAA1
//! `[host]:path` form; only the local host is accepted.

mod launch;
mod session;
mod template;

pub use session::LocalSession;
pub use template::LocalTemplate;

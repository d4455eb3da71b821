//! Error types for the DRMAA protocol layer.

mod attribute;
mod conversion;
mod session;

pub use attribute::*;
pub use conversion::*;
pub use session::*;

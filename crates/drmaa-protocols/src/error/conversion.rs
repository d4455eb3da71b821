//! Template conversion errors.

use thiserror::Error;

use super::AttributeError;

/// Failure while mapping a generic template onto a native one or back.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Failed to write {field} to native template: {source}")]
    Write {
        field: &'static str,
        #[source]
        source: AttributeError,
    },

    #[error("Failed to read {field} from native template: {source}")]
    Read {
        field: &'static str,
        #[source]
        source: AttributeError,
    },

    #[error("Native template is missing required field: {0}")]
    MissingField(&'static str),
}

impl ConversionError {
    /// Name of the template field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Write { field, .. } | Self::Read { field, .. } => field,
            Self::MissingField(field) => field,
        }
    }
}

//! Native template accessor errors.

use thiserror::Error;

/// Rejection raised by a single native template accessor.
#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("Invalid value for attribute {attribute}: {message}")]
    InvalidValue { attribute: String, message: String },

    #[error("Attribute not supported by this scheduler: {0}")]
    Unsupported(String),
}

impl AttributeError {
    pub fn invalid(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_error() {
        let err = AttributeError::invalid("drmaa_wd", "must not be empty");
        let display = err.to_string();
        assert!(display.contains("drmaa_wd"));
        assert!(display.contains("must not be empty"));
    }

    #[test]
    fn test_unsupported_error() {
        let err = AttributeError::Unsupported("drmaa_start_time".to_string());
        assert!(err.to_string().contains("not supported"));
        assert!(err.to_string().contains("drmaa_start_time"));
    }
}

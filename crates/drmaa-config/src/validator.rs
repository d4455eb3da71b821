//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::TrackerConfig;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &TrackerConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_session(config, &mut result);
        Self::validate_wait(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_session(config: &TrackerConfig, result: &mut ValidationResult) {
        if let Some(contact) = &config.session.contact {
            if contact.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "session.contact",
                    "contact cannot be empty, omit it to use the scheduler default",
                ));
            }
        }
    }

    fn validate_wait(config: &TrackerConfig, result: &mut ValidationResult) {
        if config.wait.default_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "wait.default_timeout_secs",
                "default_timeout_secs must be greater than 0",
            ));
        }

        if config.wait.default_timeout_secs > 7 * 24 * 3600 {
            result.add_warning(ValidationWarning::new(
                "wait.default_timeout_secs",
                "default_timeout_secs is longer than a week",
            ));
        }
    }

    fn validate_logging(config: &TrackerConfig, result: &mut ValidationResult) {
        // Bare levels are checked; full filter directives are left to the subscriber.
        let level = config.logging.level.as_str();
        if !level.contains('=') && !LOG_LEVELS.contains(&level) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!("Unknown log level '{}', valid values: {:?}", level, LOG_LEVELS),
            ));
        }

        if !config.logging.file && config.logging.directory.is_some() {
            result.add_warning(ValidationWarning::new(
                "logging.directory",
                "directory is set but file logging is disabled",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

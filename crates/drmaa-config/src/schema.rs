//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub wait: WaitConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scheduler session settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Contact string handed to the session on open. Unset selects the
    /// scheduler's default.
    #[serde(default)]
    pub contact: Option<String>,
}

/// Wait settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: u64,
}

impl WaitConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    60
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,

    /// Also write a daily rolling log file.
    #[serde(default)]
    pub file: bool,

    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl LoggingConfig {
    /// Directory for log files, falling back to `~/.drmaa-bridge/logs`.
    pub fn log_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(default_log_directory)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            file: false,
            directory: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".drmaa-bridge")
        .join("logs")
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

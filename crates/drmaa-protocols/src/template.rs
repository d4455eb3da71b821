//! Scheduler-independent job template.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Extension key whose value is handed to the scheduler as its native
/// specification string, verbatim.
pub const NATIVE_SPECIFICATION_EXTENSION: &str = "DRMAA1_NATIVE_SPECIFICATION";

/// Generic job template.
///
/// Built by the caller for each submission and only read by the converter.
/// Empty strings in the optional path fields are treated the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTemplate {
    /// Executable to run.
    pub remote_command: String,

    /// Command-line arguments, in order.
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_path: Option<String>,

    /// Write stderr into the output file.
    #[serde(default)]
    pub join_files: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,

    /// Environment variables injected into the job process.
    #[serde(default)]
    pub job_environment: HashMap<String, String>,

    /// Scheduler-specific escape hatch. Only
    /// [`NATIVE_SPECIFICATION_EXTENSION`] has a native mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_list: Option<HashMap<String, String>>,
}

impl JobTemplate {
    pub fn new(remote_command: impl Into<String>) -> Self {
        Self {
            remote_command: remote_command.into(),
            ..Default::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.job_environment.insert(key.into(), value.into());
        self
    }

    pub fn with_input_path(mut self, path: impl Into<String>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    pub fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_error_path(mut self, path: impl Into<String>) -> Self {
        self.error_path = Some(path.into());
        self
    }

    pub fn with_job_name(mut self, name: impl Into<String>) -> Self {
        self.job_name = Some(name.into());
        self
    }

    pub fn with_working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn with_join_files(mut self, join: bool) -> Self {
        self.join_files = join;
        self
    }

    /// Add an extension entry, creating the extension list if unset.
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extension_list
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Shorthand for the native specification extension.
    pub fn with_native_specification(self, spec: impl Into<String>) -> Self {
        self.with_extension(NATIVE_SPECIFICATION_EXTENSION, spec)
    }

    /// The native specification carried in the extension list, if any.
    pub fn native_specification(&self) -> Option<&str> {
        self.extension_list
            .as_ref()
            .and_then(|ext| ext.get(NATIVE_SPECIFICATION_EXTENSION))
            .map(String::as_str)
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;

//! Native job template of the local session.

use std::collections::HashMap;

use drmaa_protocols::{AttributeError, NativeTemplate};

pub(crate) const REMOTE_COMMAND: &str = "drmaa_remote_command";
pub(crate) const ARGV: &str = "drmaa_v_argv";
pub(crate) const INPUT_PATH: &str = "drmaa_input_path";
pub(crate) const OUTPUT_PATH: &str = "drmaa_output_path";
pub(crate) const ERROR_PATH: &str = "drmaa_error_path";
pub(crate) const JOB_NAME: &str = "drmaa_job_name";
pub(crate) const WORKING_DIRECTORY: &str = "drmaa_wd";
pub(crate) const ENVIRONMENT: &str = "drmaa_v_env";

/// Job template handed out by [`crate::LocalSession::allocate_template`].
///
/// A plain value: it stays readable and writable after its session closed.
#[derive(Debug, Clone, Default)]
pub struct LocalTemplate {
    pub(crate) remote_command: Option<String>,
    pub(crate) args: Vec<String>,
    pub(crate) input_path: Option<String>,
    pub(crate) output_path: Option<String>,
    pub(crate) error_path: Option<String>,
    pub(crate) join_files: bool,
    pub(crate) job_name: Option<String>,
    pub(crate) working_directory: Option<String>,
    pub(crate) environment: HashMap<String, String>,
    pub(crate) native_specification: Option<String>,
}

impl LocalTemplate {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Check a DRMAA1 `[host]:path` value. Only the local host is reachable.
fn validate_path(attribute: &str, value: &str) -> Result<(), AttributeError> {
    let path = match value.split_once(':') {
        Some((host, path)) => {
            if !host.is_empty() && host != "localhost" {
                return Err(AttributeError::invalid(
                    attribute,
                    format!("host '{host}' is not reachable from a local session"),
                ));
            }
            path
        }
        None => value,
    };

    if path.is_empty() {
        return Err(AttributeError::invalid(attribute, "path must not be empty"));
    }
    Ok(())
}

fn non_empty(attribute: &str, value: &str) -> Result<(), AttributeError> {
    if value.is_empty() {
        return Err(AttributeError::invalid(attribute, "value must not be empty"));
    }
    Ok(())
}

impl NativeTemplate for LocalTemplate {
    fn remote_command(&self) -> Result<Option<String>, AttributeError> {
        Ok(self.remote_command.clone())
    }

    fn set_remote_command(&mut self, command: &str) -> Result<(), AttributeError> {
        non_empty(REMOTE_COMMAND, command)?;
        self.remote_command = Some(command.to_string());
        Ok(())
    }

    fn args(&self) -> Result<Vec<String>, AttributeError> {
        Ok(self.args.clone())
    }

    fn set_args(&mut self, args: &[String]) -> Result<(), AttributeError> {
        if args.iter().any(|arg| arg.contains('\0')) {
            return Err(AttributeError::invalid(ARGV, "arguments must not contain NUL"));
        }
        self.args = args.to_vec();
        Ok(())
    }

    fn input_path(&self) -> Result<Option<String>, AttributeError> {
        Ok(self.input_path.clone())
    }

    fn set_input_path(&mut self, path: &str) -> Result<(), AttributeError> {
        validate_path(INPUT_PATH, path)?;
        self.input_path = Some(path.to_string());
        Ok(())
    }

    fn output_path(&self) -> Result<Option<String>, AttributeError> {
        Ok(self.output_path.clone())
    }

    fn set_output_path(&mut self, path: &str) -> Result<(), AttributeError> {
        validate_path(OUTPUT_PATH, path)?;
        self.output_path = Some(path.to_string());
        Ok(())
    }

    fn error_path(&self) -> Result<Option<String>, AttributeError> {
        Ok(self.error_path.clone())
    }

    fn set_error_path(&mut self, path: &str) -> Result<(), AttributeError> {
        validate_path(ERROR_PATH, path)?;
        self.error_path = Some(path.to_string());
        Ok(())
    }

    fn join_files(&self) -> Result<bool, AttributeError> {
        Ok(self.join_files)
    }

    fn set_join_files(&mut self, join: bool) -> Result<(), AttributeError> {
        self.join_files = join;
        Ok(())
    }

    fn job_name(&self) -> Result<Option<String>, AttributeError> {
        Ok(self.job_name.clone())
    }

    fn set_job_name(&mut self, name: &str) -> Result<(), AttributeError> {
        non_empty(JOB_NAME, name)?;
        self.job_name = Some(name.to_string());
        Ok(())
    }

    fn working_directory(&self) -> Result<Option<String>, AttributeError> {
        Ok(self.working_directory.clone())
    }

    fn set_working_directory(&mut self, dir: &str) -> Result<(), AttributeError> {
        non_empty(WORKING_DIRECTORY, dir)?;
        self.working_directory = Some(dir.to_string());
        Ok(())
    }

    fn environment(&self) -> Result<HashMap<String, String>, AttributeError> {
        Ok(self.environment.clone())
    }

    fn set_environment(&mut self, env: &HashMap<String, String>) -> Result<(), AttributeError> {
        if let Some(key) = env.keys().find(|key| key.is_empty() || key.contains('=')) {
            return Err(AttributeError::invalid(
                ENVIRONMENT,
                format!("invalid variable name '{key}'"),
            ));
        }
        self.environment = env.clone();
        Ok(())
    }

    fn native_specification(&self) -> Result<Option<String>, AttributeError> {
        Ok(self.native_specification.clone())
    }

    fn set_native_specification(&mut self, spec: &str) -> Result<(), AttributeError> {
        self.native_specification = Some(spec.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;

//! In-memory native template for unit tests.

use std::collections::HashMap;

use drmaa_protocols::{AttributeError, NativeTemplate};

/// Stores attributes verbatim. Accessors for the attribute named in
/// `reject` fail in both directions.
#[derive(Debug, Default, Clone)]
pub struct MockTemplate {
    pub remote_command: Option<String>,
    pub args: Vec<String>,
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub error_path: Option<String>,
    pub join_files: bool,
    pub job_name: Option<String>,
    pub working_directory: Option<String>,
    pub environment: HashMap<String, String>,
    pub native_specification: Option<String>,
    pub reject: Option<&'static str>,
}

impl MockTemplate {
    pub fn rejecting(attribute: &'static str) -> Self {
        Self {
            reject: Some(attribute),
            ..Default::default()
        }
    }

    fn check(&self, attribute: &'static str) -> Result<(), AttributeError> {
        match self.reject {
            Some(rejected) if rejected == attribute => {
                Err(AttributeError::invalid(attribute, "rejected by mock"))
            }
            _ => Ok(()),
        }
    }
}

impl NativeTemplate for MockTemplate {
    fn remote_command(&self) -> Result<Option<String>, AttributeError> {
        self.check("remote_command")?;
        Ok(self.remote_command.clone())
    }

    fn set_remote_command(&mut self, command: &str) -> Result<(), AttributeError> {
        self.check("remote_command")?;
        self.remote_command = Some(command.to_string());
        Ok(())
    }

    fn args(&self) -> Result<Vec<String>, AttributeError> {
        self.check("args")?;
        Ok(self.args.clone())
    }

    fn set_args(&mut self, args: &[String]) -> Result<(), AttributeError> {
        self.check("args")?;
        self.args = args.to_vec();
        Ok(())
    }

    fn input_path(&self) -> Result<Option<String>, AttributeError> {
        self.check("input_path")?;
        Ok(self.input_path.clone())
    }

    fn set_input_path(&mut self, path: &str) -> Result<(), AttributeError> {
        self.check("input_path")?;
        self.input_path = Some(path.to_string());
        Ok(())
    }

    fn output_path(&self) -> Result<Option<String>, AttributeError> {
        self.check("output_path")?;
        Ok(self.output_path.clone())
    }

    fn set_output_path(&mut self, path: &str) -> Result<(), AttributeError> {
        self.check("output_path")?;
        self.output_path = Some(path.to_string());
        Ok(())
    }

    fn error_path(&self) -> Result<Option<String>, AttributeError> {
        self.check("error_path")?;
        Ok(self.error_path.clone())
    }

    fn set_error_path(&mut self, path: &str) -> Result<(), AttributeError> {
        self.check("error_path")?;
        self.error_path = Some(path.to_string());
        Ok(())
    }

    fn join_files(&self) -> Result<bool, AttributeError> {
        self.check("join_files")?;
        Ok(self.join_files)
    }

    fn set_join_files(&mut self, join: bool) -> Result<(), AttributeError> {
        self.check("join_files")?;
        self.join_files = join;
        Ok(())
    }

    fn job_name(&self) -> Result<Option<String>, AttributeError> {
        self.check("job_name")?;
        Ok(self.job_name.clone())
    }

    fn set_job_name(&mut self, name: &str) -> Result<(), AttributeError> {
        self.check("job_name")?;
        self.job_name = Some(name.to_string());
        Ok(())
    }

    fn working_directory(&self) -> Result<Option<String>, AttributeError> {
        self.check("working_directory")?;
        Ok(self.working_directory.clone())
    }

    fn set_working_directory(&mut self, dir: &str) -> Result<(), AttributeError> {
        self.check("working_directory")?;
        self.working_directory = Some(dir.to_string());
        Ok(())
    }

    fn environment(&self) -> Result<HashMap<String, String>, AttributeError> {
        self.check("environment")?;
        Ok(self.environment.clone())
    }

    fn set_environment(&mut self, env: &HashMap<String, String>) -> Result<(), AttributeError> {
        self.check("environment")?;
        self.environment = env.clone();
        Ok(())
    }

    fn native_specification(&self) -> Result<Option<String>, AttributeError> {
        self.check("native_specification")?;
        Ok(self.native_specification.clone())
    }

    fn set_native_specification(&mut self, spec: &str) -> Result<(), AttributeError> {
        self.check("native_specification")?;
        self.native_specification = Some(spec.to_string());
        Ok(())
    }
}

//! Turning a local template into a child process.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

use drmaa_protocols::{JobInfo, JobState, SessionError};

use crate::template::{LocalTemplate, ERROR_PATH, INPUT_PATH, OUTPUT_PATH};

const HOME_DIR_PLACEHOLDER: &str = "$drmaa_hd_ph$";
const WORKING_DIR_PLACEHOLDER: &str = "$drmaa_wd_ph$";

/// Everything needed to start one job, resolved against the local host.
#[derive(Debug)]
pub(crate) struct Launch {
    pub(crate) program: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
    working_dir: PathBuf,
    stdin: Option<PathBuf>,
    stdout: Option<PathBuf>,
    stderr: Option<PathBuf>,
    join_files: bool,
}

impl Launch {
    pub(crate) fn prepare(
        template: &LocalTemplate,
        default_dir: Option<&Path>,
    ) -> Result<Self, SessionError> {
        let program = template
            .remote_command
            .clone()
            .ok_or_else(|| SessionError::InvalidTemplate("remote command is not set".to_string()))?;

        let working_dir = match &template.working_directory {
            Some(dir) => PathBuf::from(expand_home(dir)),
            None => match default_dir {
                Some(dir) => dir.to_path_buf(),
                None => std::env::current_dir().map_err(|e| {
                    SessionError::Submission(format!("cannot determine working directory: {e}"))
                })?,
            },
        };

        let resolve = |attribute: &str, value: &Option<String>| {
            value
                .as_deref()
                .map(|v| resolve_path(attribute, v, &working_dir))
                .transpose()
        };
        let stdin = resolve(INPUT_PATH, &template.input_path)?;
        let stdout = resolve(OUTPUT_PATH, &template.output_path)?;
        let stderr = resolve(ERROR_PATH, &template.error_path)?;

        let mut env: Vec<_> = template
            .environment
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        env.sort();

        Ok(Self {
            program,
            args: template.args.clone(),
            env,
            working_dir,
            stdin,
            stdout,
            stderr,
            join_files: template.join_files,
        })
    }

    /// Build the command, opening redirection files.
    ///
    /// Output and error files are truncated. With join files set, stderr
    /// goes to the output file when there is one.
    pub(crate) fn command(&self) -> Result<Command, SessionError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&self.working_dir);

        let stdin = match &self.stdin {
            Some(path) => Stdio::from(open_input(path)?),
            None => Stdio::null(),
        };

        let stdout_file = self
            .stdout
            .as_deref()
            .map(create_output)
            .transpose()?;

        let stderr = match (&stdout_file, &self.stderr) {
            (Some(out), _) if self.join_files => Stdio::from(out.try_clone().map_err(|e| {
                SessionError::Submission(format!("cannot share output file with stderr: {e}"))
            })?),
            (_, Some(path)) => Stdio::from(create_output(path)?),
            _ => Stdio::null(),
        };

        let stdout = match stdout_file {
            Some(file) => Stdio::from(file),
            None => Stdio::null(),
        };

        cmd.stdin(stdin).stdout(stdout).stderr(stderr);
        Ok(cmd)
    }
}

/// Fold a finished process into the job's info.
pub(crate) fn record_exit(info: &mut JobInfo, status: ExitStatus) {
    info.exit_status = status.code();
    info.terminating_signal = signal(&status);
    info.state = if status.success() {
        JobState::Done
    } else {
        JobState::Failed
    };
}

#[cfg(unix)]
fn signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal(_status: &ExitStatus) -> Option<i32> {
    None
}

fn resolve_path(attribute: &str, value: &str, working_dir: &Path) -> Result<PathBuf, SessionError> {
    // Host validity was checked when the attribute was set.
    let raw = value.split_once(':').map_or(value, |(_, path)| path);
    let expanded = expand_home(raw).replace(
        WORKING_DIR_PLACEHOLDER,
        &working_dir.to_string_lossy(),
    );
    if expanded.is_empty() {
        return Err(SessionError::InvalidTemplate(format!("{attribute} is empty")));
    }

    let path = PathBuf::from(expanded);
    Ok(if path.is_relative() {
        working_dir.join(path)
    } else {
        path
    })
}

fn expand_home(value: &str) -> String {
    if !value.contains(HOME_DIR_PLACEHOLDER) {
        return value.to_string();
    }
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
    value.replace(HOME_DIR_PLACEHOLDER, &home.to_string_lossy())
}

fn open_input(path: &Path) -> Result<File, SessionError> {
    File::open(path).map_err(|e| {
        SessionError::Submission(format!("cannot open input {}: {e}", path.display()))
    })
}

fn create_output(path: &Path) -> Result<File, SessionError> {
    File::create(path).map_err(|e| {
        SessionError::Submission(format!("cannot create {}: {e}", path.display()))
    })
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;

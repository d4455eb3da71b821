//! Conversion between generic and native job templates.
//!
//! DRMAA1 schedulers of the Grid Engine family read a path without a host
//! part as relative to the execution host. Prefixing with `:` makes the path
//! resolve on the submitting host, which is what a generic template means.
//!
//! Only [`NATIVE_SPECIFICATION_EXTENSION`] crosses over from the extension
//! list. Any other extension key has no native counterpart and is dropped
//! with a debug log.

use std::collections::HashMap;

use tracing::debug;

use drmaa_protocols::{
    AttributeError, ConversionError, JobTemplate, NATIVE_SPECIFICATION_EXTENSION,
    NativeTemplate,
};

/// Marks a path as local to the submission host.
pub const LOCAL_HOST_PREFIX: char = ':';

/// Fill a freshly allocated native template from a generic one.
///
/// Only the native template is touched. Unset and empty optional fields are
/// skipped, so attributes already present on the native side stay as they are.
pub fn to_native<T>(template: &JobTemplate, native: &mut T) -> Result<(), ConversionError>
where
    T: NativeTemplate + ?Sized,
{
    // A missing command is left for the session to reject at submission.
    if !template.remote_command.is_empty() {
        native
            .set_remote_command(&template.remote_command)
            .map_err(write_err("remote_command"))?;
    }

    if !template.args.is_empty() {
        native
            .set_args(&template.args)
            .map_err(write_err("args"))?;
    }

    if let Some(path) = non_empty(&template.input_path) {
        native
            .set_input_path(&local_path(path))
            .map_err(write_err("input_path"))?;
    }
    if let Some(path) = non_empty(&template.output_path) {
        native
            .set_output_path(&local_path(path))
            .map_err(write_err("output_path"))?;
    }
    if let Some(path) = non_empty(&template.error_path) {
        native
            .set_error_path(&local_path(path))
            .map_err(write_err("error_path"))?;
    }

    if template.join_files {
        native
            .set_join_files(true)
            .map_err(write_err("join_files"))?;
    }

    if let Some(name) = non_empty(&template.job_name) {
        native.set_job_name(name).map_err(write_err("job_name"))?;
    }
    if let Some(dir) = non_empty(&template.working_directory) {
        native
            .set_working_directory(dir)
            .map_err(write_err("working_directory"))?;
    }

    if !template.job_environment.is_empty() {
        native
            .set_environment(&template.job_environment)
            .map_err(write_err("job_environment"))?;
    }

    if let Some(extensions) = &template.extension_list {
        for (key, value) in extensions {
            if key == NATIVE_SPECIFICATION_EXTENSION {
                native
                    .set_native_specification(value)
                    .map_err(write_err("native_specification"))?;
            } else {
                debug!(extension = %key, "Dropping extension without native mapping");
            }
        }
    }

    Ok(())
}

/// Derive a generic template from a native one.
///
/// The extension list stays `None` unless the native template carries a
/// native specification.
pub fn from_native<T>(native: &T) -> Result<JobTemplate, ConversionError>
where
    T: NativeTemplate + ?Sized,
{
    let remote_command = native
        .remote_command()
        .map_err(read_err("remote_command"))?
        .ok_or(ConversionError::MissingField("remote_command"))?;

    let args = native.args().map_err(read_err("args"))?;

    let input_path = native.input_path().map_err(read_err("input_path"))?;
    let output_path = native.output_path().map_err(read_err("output_path"))?;
    let error_path = native.error_path().map_err(read_err("error_path"))?;

    let join_files = native.join_files().map_err(read_err("join_files"))?;
    let job_name = native.job_name().map_err(read_err("job_name"))?;
    let working_directory = native
        .working_directory()
        .map_err(read_err("working_directory"))?;

    let job_environment = native
        .environment()
        .map_err(read_err("job_environment"))?;

    let extension_list = native
        .native_specification()
        .map_err(read_err("native_specification"))?
        .map(|spec| HashMap::from([(NATIVE_SPECIFICATION_EXTENSION.to_string(), spec)]));

    Ok(JobTemplate {
        remote_command,
        args,
        input_path: input_path.map(strip_local_prefix),
        output_path: output_path.map(strip_local_prefix),
        error_path: error_path.map(strip_local_prefix),
        join_files,
        job_name,
        working_directory,
        job_environment,
        extension_list,
    })
}

fn local_path(path: &str) -> String {
    format!("{LOCAL_HOST_PREFIX}{path}")
}

// Templates built outside this module may carry paths without the prefix.
fn strip_local_prefix(path: String) -> String {
    match path.strip_prefix(LOCAL_HOST_PREFIX) {
        Some(stripped) => stripped.to_string(),
        None => path,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn write_err(field: &'static str) -> impl Fn(AttributeError) -> ConversionError {
    move |source| ConversionError::Write { field, source }
}

fn read_err(field: &'static str) -> impl Fn(AttributeError) -> ConversionError {
    move |source| ConversionError::Read { field, source }
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;

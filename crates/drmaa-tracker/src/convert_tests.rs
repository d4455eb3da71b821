use super::*;
use crate::test_support::MockTemplate;

fn sleep_template() -> JobTemplate {
    JobTemplate::new("/bin/sleep").with_args(["1"])
}

#[test]
fn test_round_trip_without_extensions() {
    let original = sleep_template();
    let mut native = MockTemplate::default();

    to_native(&original, &mut native).unwrap();
    let converted = from_native(&native).unwrap();

    assert_eq!(converted.remote_command, original.remote_command);
    assert_eq!(converted.args, original.args);
    assert!(converted.extension_list.is_none());
}

#[test]
fn test_round_trip_native_specification() {
    let original = sleep_template().with_native_specification("-l gpu");
    let mut native = MockTemplate::default();

    to_native(&original, &mut native).unwrap();
    assert_eq!(native.native_specification.as_deref(), Some("-l gpu"));

    let converted = from_native(&native).unwrap();
    assert_eq!(converted.native_specification(), Some("-l gpu"));
    assert_eq!(converted.extension_list.unwrap().len(), 1);
}

#[test]
fn test_missing_extension_leaves_native_specification_untouched() {
    let mut native = MockTemplate {
        native_specification: Some("-q short".to_string()),
        ..Default::default()
    };

    to_native(&sleep_template(), &mut native).unwrap();
    assert_eq!(native.native_specification.as_deref(), Some("-q short"));
}

#[test]
fn test_other_extensions_are_dropped() {
    let original = sleep_template().with_extension("SGE_PROJECT", "physics");
    let mut native = MockTemplate::default();

    to_native(&original, &mut native).unwrap();
    assert!(native.native_specification.is_none());
    assert!(from_native(&native).unwrap().extension_list.is_none());
}

#[test]
fn test_paths_get_local_host_prefix() {
    let original = sleep_template()
        .with_input_path("someFile")
        .with_output_path("someOutputFile")
        .with_error_path("someErrorFile");
    let mut native = MockTemplate::default();

    to_native(&original, &mut native).unwrap();
    assert_eq!(native.input_path.as_deref(), Some(":someFile"));
    assert_eq!(native.output_path.as_deref(), Some(":someOutputFile"));
    assert_eq!(native.error_path.as_deref(), Some(":someErrorFile"));

    let converted = from_native(&native).unwrap();
    assert_eq!(converted.input_path.as_deref(), Some("someFile"));
    assert_eq!(converted.output_path.as_deref(), Some("someOutputFile"));
    assert_eq!(converted.error_path.as_deref(), Some("someErrorFile"));
}

#[test]
fn test_empty_paths_are_not_written() {
    let mut original = sleep_template();
    original.input_path = Some(String::new());
    original.output_path = Some(String::new());
    let mut native = MockTemplate::default();

    to_native(&original, &mut native).unwrap();
    assert!(native.input_path.is_none());
    assert!(native.output_path.is_none());
    assert!(native.error_path.is_none());
}

#[test]
fn test_read_back_tolerates_missing_prefix() {
    let native = MockTemplate {
        remote_command: Some("/bin/cat".to_string()),
        input_path: Some("/data/in.txt".to_string()),
        output_path: Some(":out.txt".to_string()),
        ..Default::default()
    };

    let converted = from_native(&native).unwrap();
    assert_eq!(converted.input_path.as_deref(), Some("/data/in.txt"));
    assert_eq!(converted.output_path.as_deref(), Some("out.txt"));
}

#[test]
fn test_prefix_is_stripped_once() {
    let original = sleep_template().with_output_path(":already");
    let mut native = MockTemplate::default();

    to_native(&original, &mut native).unwrap();
    assert_eq!(native.output_path.as_deref(), Some("::already"));
    let converted = from_native(&native).unwrap();
    assert_eq!(converted.output_path.as_deref(), Some(":already"));
}

#[test]
fn test_environment_and_supplementary_fields() {
    let original = JobTemplate::new("/bin/bash")
        .with_args(["-c", "exit $EXIT"])
        .with_env("EXIT", "77")
        .with_env("MODE", "batch")
        .with_job_name("exit-77")
        .with_working_directory("/scratch")
        .with_join_files(true);
    let mut native = MockTemplate::default();

    to_native(&original, &mut native).unwrap();
    assert_eq!(native.args, vec!["-c", "exit $EXIT"]);
    assert_eq!(native.environment, original.job_environment);
    assert_eq!(native.working_directory.as_deref(), Some("/scratch"));

    let converted = from_native(&native).unwrap();
    assert_eq!(converted, original);
}

#[test]
fn test_write_rejection_propagates_with_field() {
    let original = sleep_template().with_error_path("err.log");
    let mut native = MockTemplate::rejecting("error_path");

    let err = to_native(&original, &mut native).unwrap_err();
    assert!(matches!(err, ConversionError::Write { field: "error_path", .. }));
}

#[test]
fn test_read_rejection_propagates_with_field() {
    let mut native = MockTemplate::rejecting("environment");
    native.remote_command = Some("/bin/true".to_string());

    let err = from_native(&native).unwrap_err();
    assert!(matches!(err, ConversionError::Read { field: "job_environment", .. }));
}

#[test]
fn test_unset_remote_command_is_missing_field() {
    let err = from_native(&MockTemplate::default()).unwrap_err();
    assert!(matches!(err, ConversionError::MissingField("remote_command")));
}

#[test]
fn test_empty_remote_command_is_not_written() {
    let mut native = MockTemplate::default();
    to_native(&JobTemplate::default(), &mut native).unwrap();
    assert!(native.remote_command.is_none());
}

#[test]
fn test_converts_through_trait_object() {
    let mut native: Box<dyn NativeTemplate> = Box::new(MockTemplate::default());
    to_native(&sleep_template(), native.as_mut()).unwrap();
    let converted = from_native(native.as_ref()).unwrap();
    assert_eq!(converted.remote_command, "/bin/sleep");
}

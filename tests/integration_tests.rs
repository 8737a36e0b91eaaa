//! Integration tests: CLI smoke tests, dispatcher exit codes, rehearsal runs,
//! and the event log written across a real process boundary.

mod common;

use serde_json::Value;

#[test]
fn help_command_prints_usage() {
    let result = common::run_cli_case("help_command_prints_usage", &["--help"]);
    assert!(
        result.status.success(),
        "expected success; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stdout.contains("Usage: crashdrill [OPTIONS] [SCENARIO]"),
        "missing help banner; log: {}",
        result.log_path.display()
    );
}

#[test]
fn unknown_scenario_exits_one_and_names_valid_options() {
    let result = common::run_cli_case("unknown_scenario_exits_one", &["4"]);
    assert_eq!(
        result.status.code(),
        Some(1),
        "expected exit 1; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stderr.contains("invalid scenario number: 4"),
        "missing error; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stderr.contains("valid options: 1, 2, 3"),
        "missing valid options; log: {}",
        result.log_path.display()
    );
    assert!(!result.stdout.contains("Triggering"));
}

#[test]
fn zero_and_garbage_are_invalid_in_direct_mode() {
    for arg in ["0", "abc", "-3"] {
        let result = common::run_cli_case("direct_invalid_inputs", &[arg]);
        assert_eq!(
            result.status.code(),
            Some(1),
            "arg {arg:?} should exit 1; log: {}",
            result.log_path.display()
        );
        assert!(result.stderr.contains("[CDR-1001]"));
    }
}

#[test]
fn interactive_zero_exits_cleanly() {
    let result = common::run_cli_case_with_input("interactive_zero_exits", &[], "0\n");
    assert!(
        result.status.success(),
        "expected success; log: {}",
        result.log_path.display()
    );
    assert!(result.stdout.contains("=== Core Dump Demo Program ==="));
    assert!(result.stdout.contains("Exiting..."));
    assert!(!result.stdout.contains("Triggering"));
}

#[test]
fn interactive_invalid_choice_reprompts() {
    let result =
        common::run_cli_case_with_input("interactive_invalid_choice", &[], "9\n0\n");
    assert!(result.status.success());
    assert_eq!(
        result.stdout.matches("Invalid choice. Please try again.").count(),
        1,
        "log: {}",
        result.log_path.display()
    );
    assert_eq!(result.stdout.matches("Enter choice: ").count(), 2);
}

#[test]
fn interactive_end_of_input_exits_cleanly() {
    let result = common::run_cli_case_with_input("interactive_eof", &[], "");
    assert!(
        result.status.success(),
        "expected success; log: {}",
        result.log_path.display()
    );
    assert!(result.stdout.contains("Exiting..."));
}

#[test]
fn rehearsal_of_scenario_two_reaches_out_of_range_read() {
    let result = common::run_cli_case("rehearse_two", &["--rehearse", "2"]);
    assert!(
        result.status.success(),
        "expected success; log: {}",
        result.log_path.display()
    );
    assert!(result.stdout.contains("Calculating score for user 150"));
    assert!(result.stdout.contains("[fault] unchecked read at index 10 of 5 elements"));
    assert!(result.stdout.contains("If you see this, the crash didn't happen!"));
}

#[test]
fn rehearsal_of_scenario_one_copies_an_absent_name() {
    let result = common::run_cli_case("rehearse_one", &["--rehearse", "1"]);
    assert!(result.status.success());
    assert!(result.stdout.contains("Processing user data..."));
    assert!(
        result
            .stdout
            .contains("[fault] unbounded copy of an absent string into 100 bytes"),
        "log: {}",
        result.log_path.display()
    );
}

#[test]
fn rehearsal_of_scenario_three_overflows_before_dangling_write() {
    let result = common::run_cli_case("rehearse_three", &["--rehearse", "3"]);
    assert!(result.status.success());
    let copy = result
        .stdout
        .find("[fault] unbounded copy of 57 bytes into 10 bytes")
        .expect("overflow copy reported");
    let write = result
        .stdout
        .find("[fault] write of 123 through an out-of-scope reference")
        .expect("dangling write reported");
    assert!(copy < write, "log: {}", result.log_path.display());
}

#[test]
fn rehearsal_in_interactive_mode_loops() {
    let result =
        common::run_cli_case_with_input("rehearse_interactive", &["--rehearse"], "1\n2\n3\n0\n");
    assert!(result.status.success());
    assert_eq!(
        result
            .stdout
            .matches("If you see this, the crash didn't happen!")
            .count(),
        3,
        "log: {}",
        result.log_path.display()
    );
}

#[test]
fn list_prints_every_scenario_chain() {
    let result = common::run_cli_case("list", &["--list"]);
    assert!(result.status.success());
    assert!(result.stdout.contains("1. NULL pointer dereference"));
    assert!(result.stdout.contains("2. Array out of bounds"));
    assert!(result.stdout.contains("3. Buffer overflow / Stack corruption"));
    assert!(result.stdout.contains("chain: calculate_score -> process_scores"));
}

#[test]
fn quiet_skips_banner() {
    let result = common::run_cli_case("quiet", &["--quiet", "--rehearse", "2"]);
    assert!(result.status.success());
    assert!(!result.stdout.contains("Core Dump Teaching Demo"));
    assert!(result.stdout.contains("Triggering array out of bounds..."));
}

#[test]
fn verbose_prints_chain_on_stderr() {
    let result = common::run_cli_case("verbose", &["--verbose", "--rehearse", "3"]);
    assert!(result.status.success());
    assert!(
        result
            .stderr
            .contains("scenario 3 chain: validate_config -> stage_override"),
        "log: {}",
        result.log_path.display()
    );
}

#[test]
fn event_log_records_full_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    let path_arg = path.to_string_lossy().to_string();
    let result = common::run_cli_case(
        "event_log_full_session",
        &["--rehearse", "--event-log", &path_arg, "2"],
    );
    assert!(result.status.success());

    let contents = std::fs::read_to_string(&path).unwrap();
    let events: Vec<Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let kinds: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        vec![
            "session_start",
            "scenario_start",
            "scenario_complete",
            "session_end"
        ]
    );
    assert_eq!(events[1]["scenario"], 2);
}

#[test]
fn event_log_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path_arg = dir.path().to_string_lossy().to_string();
    let result = common::run_cli_case("event_log_dir", &["--event-log", &path_arg, "2"]);
    assert_eq!(result.status.code(), Some(1));
    assert!(result.stderr.contains("[CDR-1002]"));
}

#[cfg(unix)]
#[test]
fn real_null_deref_terminates_abnormally() {
    use std::os::unix::process::ExitStatusExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crash.jsonl");
    let path_arg = path.to_string_lossy().to_string();
    let result = common::run_cli_case("real_null_deref", &["--event-log", &path_arg, "1"]);

    assert!(
        result.status.signal().is_some(),
        "expected termination by signal; log: {}",
        result.log_path.display()
    );
    assert!(result.stdout.contains("Processing user data..."));
    assert!(!result.stdout.contains("If you see this, the crash didn't happen!"));

    // The fault leaves a start without a matching completion.
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\"scenario_start\""));
    assert!(!contents.contains("\"scenario_complete\""));
}

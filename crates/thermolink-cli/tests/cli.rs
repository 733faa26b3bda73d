use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("thermolink"))
}

fn write_frames(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create frame log");
    file.write_all(content.as_bytes()).expect("write frame log");
    path
}

#[test]
fn help_supports_uplink_decode() {
    cmd()
        .arg("uplink")
        .arg("decode")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.hex");
    let report = temp.path().join("report.json");

    cmd()
        .arg("uplink")
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unsupported_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_frames(&temp, "frames.bin", "2A 01 10 00\n");

    cmd()
        .arg("uplink")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn stdout_outputs_valid_json_with_decoded_record() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_frames(&temp, "frames.hex", "# one uplink\n2A 01 10 00\n");

    let assert = cmd()
        .arg("uplink")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");

    assert_eq!(value["frames_total"], 1);
    assert_eq!(value["records"][0]["line"], 2);
    assert_eq!(value["records"][0]["record"]["battery_voltage"], 1.0);
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_frames(&temp, "frames.hex", "2A 04 2C\n");
    let report = temp.path().join("report.json");

    cmd()
        .arg("uplink")
        .arg("decode")
        .arg(&input)
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let json = std::fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["records"][0]["record"]["boot_count"], 44);
}

#[test]
fn other_format_frames_are_skipped_not_errors() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_frames(&temp, "frames.hex", "1B 01 10 00\n");

    let assert = cmd()
        .arg("uplink")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");

    assert_eq!(value["skipped"][0]["format"], 0x1B);
    assert!(value["faults"].as_array().expect("faults array").is_empty());
}

#[test]
fn strict_fails_on_truncated_frames() {
    let temp = TempDir::new().expect("tempdir");
    // bit 3 promises four bytes; only one follows
    let input = write_frames(&temp, "frames.hex", "2A 08 07\n");

    cmd()
        .arg("uplink")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .arg("--strict")
        .arg("--list-faults")
        .assert()
        .failure()
        .stderr(contains("malformed frames detected").and(contains("frame too short")));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_frames(&temp, "frames.hex", "2A 01 10 00\n");

    cmd()
        .arg("uplink")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure();
}

#[test]
fn port_option_reroutes_frames() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_frames(&temp, "frames.hex", "2A 01 10 00\n");

    let assert = cmd()
        .arg("uplink")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .arg("--port")
        .arg("3")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");

    assert!(value["records"].as_array().expect("records array").is_empty());
    assert_eq!(value["skipped"][0]["port"], 3);
}

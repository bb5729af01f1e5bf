//! Integration tests for top-level CLI behavior.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde_json::Value;

fn run_sensor(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_randint-sensor");
    Command::new(bin).args(args).output().expect("failed to run randint-sensor binary")
}

fn write_config(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("randint_cli_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn stdout_json_lines(output: &std::process::Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line is JSON"))
        .collect()
}

#[test]
fn readings_with_defaults_print_value_key() {
    let output = run_sensor(&["readings", "--count", "5"]);
    assert!(output.status.success());
    let lines = stdout_json_lines(&output);
    assert_eq!(lines.len(), 5);
    for line in lines {
        let value = line["value"].as_i64().unwrap();
        assert!((0..100).contains(&value));
    }
}

#[test]
fn seeded_config_is_reproducible_across_runs() {
    let path = write_config(
        "seeded.json",
        r#"{"name": "rand", "attributes": {"low": 0, "high": 1000000, "num_readings": 3, "seed": 42}}"#,
    );
    let path = path.to_str().unwrap();
    let first = run_sensor(&["readings", "--config", path, "--count", "4"]);
    let second = run_sensor(&["readings", "--config", path, "--count", "4"]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let lines = stdout_json_lines(&first);
    assert!(lines[0].get("value_1").is_some());
    assert!(lines[0].get("value_3").is_some());
}

#[test]
fn validate_accepts_good_yaml_config() {
    let path = write_config("good.yaml", "name: rand\nattributes:\n  low: 5\n  high: 10\n  dtype: uint8\n");
    let output = run_sensor(&["validate", "--config", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("ok"));
}

#[test]
fn validate_rejects_inverted_bounds() {
    let path = write_config("bad.json", r#"{"name": "rand", "attributes": {"low": 10, "high": 5}}"#);
    let output = run_sensor(&["validate", "--config", path.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("low must be less than high"));
}

#[test]
fn validate_without_config_shows_error() {
    let output = run_sensor(&["validate"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("--config"));
}

#[test]
fn command_generate_batch_prints_payload() {
    let output = run_sensor(&["command", r#"{"command": "generate_batch", "size": 4}"#]);
    assert!(output.status.success());
    let lines = stdout_json_lines(&output);
    assert_eq!(lines[0]["batch_size"], 4);
    assert_eq!(lines[0]["reading_name"], "value");
    assert_eq!(lines[0]["batch"].as_array().unwrap().len(), 4);
}

#[test]
fn command_unknown_fails() {
    let output = run_sensor(&["command", r#"{"command": "self_destruct"}"#]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("not implemented"));
}

#[test]
fn huge_batch_size_fails_fast() {
    let output = run_sensor(&["command", r#"{"command": "generate_batch", "size": 1e12}"#]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("size must be at most"));
}

#[test]
fn huge_channel_count_is_rejected() {
    let path = write_config("wide.json", r#"{"name": "rand", "attributes": {"num_readings": 1e12}}"#);
    let output = run_sensor(&["readings", "--config", path.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("num_readings must be at most"));
}

#[test]
fn out_of_width_bounds_fail_readings() {
    let path = write_config(
        "narrow.json",
        r#"{"name": "rand", "attributes": {"low": 0, "high": 1000, "dtype": "int8"}}"#,
    );
    let output = run_sensor(&["readings", "--config", path.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("out of bounds for int8"));
}

#[test]
fn serve_answers_requests_from_stdin() {
    let bin = env!("CARGO_BIN_EXE_randint-sensor");
    let mut child = Command::new(bin)
        .arg("serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn randint-sensor serve");

    {
        let mut stdin = child.stdin.take().unwrap();
        writeln!(stdin, r#"{{"method": "reconfigure", "attributes": {{"low": 1, "high": 2}}}}"#)
            .unwrap();
        writeln!(stdin, r#"{{"method": "readings"}}"#).unwrap();
        writeln!(stdin, "garbage").unwrap();
        writeln!(stdin, r#"{{"method": "geometries"}}"#).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let lines = stdout_json_lines(&output);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], serde_json::json!({"Ok": null}));
    assert_eq!(lines[1], serde_json::json!({"Ok": {"value": 1}}));
    assert!(lines[2]["Err"].as_str().unwrap().contains("malformed request"));
    assert_eq!(lines[3], serde_json::json!({"Ok": []}));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_sensor(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

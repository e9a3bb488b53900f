//! End-to-end tests for the `textstages` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

fn textstages(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_textstages"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("run textstages")
}

fn write_spec(dir: &tempfile::TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("pipeline.json");
    std::fs::write(&path, json).expect("write spec");
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const FULL_SPEC: &str = r#"{
    "v": 1,
    "stages": [
        { "type": "segmenter" },
        { "type": "annotator", "label": "X" },
        { "type": "analyzer" }
    ]
}"#;

#[test]
fn test_default_pattern_prints_tokens() {
    let output = textstages(&["--text", "Hello, world!"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Tokens: [\"Hello\", \"world\"]\n");
}

#[test]
fn test_custom_pattern() {
    let output = textstages(&["--text", "Hello, world!", "--pattern", r"\S+"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Tokens: [\"Hello,\", \"world!\"]\n");
}

#[test]
fn test_spec_overrides_pattern() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let spec = write_spec(&dir, FULL_SPEC);
    let output = textstages(&[
        "--text",
        "Hi there.",
        "--pattern",
        "[a-z]",
        "--spec",
        spec.to_str().expect("utf-8 path"),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let lines: Vec<String> = stdout(&output).lines().map(String::from).collect();
    assert_eq!(
        lines,
        vec![
            "Tokens: [\"Hi\", \"there\", \".\"]",
            "Tagged: [(\"Hi\", \"X\"), (\"there\", \"X\"), (\".\", \"X\")]",
            "Structure: (S (X Hi) (X there) (X .))",
        ]
    );
}

#[test]
fn test_json_output() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let spec = write_spec(&dir, FULL_SPEC);
    let output = textstages(&[
        "--text",
        "a b",
        "--spec",
        spec.to_str().expect("utf-8 path"),
        "--json",
    ]);
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("parse document");
    assert_eq!(doc["raw_input"], "a b");
    assert_eq!(doc["segments"], serde_json::json!(["a", "b"]));
    assert_eq!(doc["structure"]["single"]["label"], "S");
}

#[test]
fn test_invalid_pipeline_exits_with_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let spec = write_spec(
        &dir,
        r#"{ "v": 1, "stages": [{ "type": "annotator", "label": "X" }] }"#,
    );
    let output = textstages(&["--text", "no segmenter", "--spec", spec.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("error: [missing_input] Pipeline starts with Annotator"));
    assert!(err.contains("hint: Add a Segmenter first"));
}

#[test]
fn test_bad_pattern_exits_with_error() {
    let output = textstages(&["--text", "x", "--pattern", "("]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("[invalid_spec] invalid segmentation pattern"));
}

#[test]
fn test_missing_spec_file() {
    let output = textstages(&["--text", "x", "--spec", "/nonexistent/pipeline.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot read /nonexistent/pipeline.json"));
}

#[test]
fn test_rust_log_level_is_honoured() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let spec = write_spec(&dir, FULL_SPEC);
    let spec = spec.to_str().expect("utf-8 path");

    let quiet = textstages(&["--text", "a b", "--spec", spec]);
    assert!(!stderr(&quiet).contains("pipeline validated"));

    let verbose = Command::new(env!("CARGO_BIN_EXE_textstages"))
        .args(["--text", "a b", "--spec", spec])
        .env("RUST_LOG", "debug")
        .env("NO_COLOR", "1")
        .output()
        .expect("run textstages");
    assert!(verbose.status.success());
    let log = stderr(&verbose);
    assert!(log.contains("pipeline validated"), "stderr: {log}");
    assert!(log.contains("stage finished"), "stderr: {log}");
    // Logging never leaks into the document output
    assert!(!stdout(&verbose).contains("stage finished"));
}

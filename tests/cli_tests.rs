//! CLI Tests
//!
//! Runs the built binaries the way the docs build does and checks their output.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn fixtures_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").leak()
}

fn run(bin: &str, cwd: &Path, args: &[&str]) -> Output {
    Command::new(bin)
        .current_dir(cwd)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// =============================================================================
// generate-spec
// =============================================================================

#[test]
fn test_generate_spec_reports_written_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixtures_path().join("schema-full.json"), dir.path().join("schema-full.json")).unwrap();

    let output = run(env!("CARGO_BIN_EXE_generate-spec"), dir.path(), &[]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim_end(), "Specification written to docs/specification.md");
    let text = fs::read_to_string(dir.path().join("docs/specification.md")).unwrap();
    assert!(text.starts_with("<!-- THIS FILE IS GENERATED AUTOMATICALLY -->"));
    assert!(text.contains("<!-- Source: schema-full.json -->"));
}

#[test]
fn test_generate_spec_check_detects_stale_output() {
    let dir = tempfile::tempdir().unwrap();
    let schema = fixtures_path().join("schema-full.json");
    let schema = schema.to_str().unwrap();
    let bin = env!("CARGO_BIN_EXE_generate-spec");

    let written = run(bin, dir.path(), &[schema, "spec.md"]);
    assert!(written.status.success());

    let fresh = run(bin, dir.path(), &[schema, "spec.md", "--check"]);
    assert!(fresh.status.success());
    assert!(stdout(&fresh).contains("spec.md is up to date"));

    let spec = dir.path().join("spec.md");
    let edited = fs::read_to_string(&spec).unwrap().replace("## Header", "## Heading");
    fs::write(&spec, edited).unwrap();

    let stale = run(bin, dir.path(), &[schema, "spec.md", "--check"]);
    assert_eq!(stale.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&stale.stderr);
    assert!(stderr.contains("-## Heading"));
    assert!(stderr.contains("out of date"));
}

#[test]
fn test_generate_spec_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(env!("CARGO_BIN_EXE_generate-spec"), dir.path(), &["absent.json", "out.md"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    assert!(!dir.path().join("out.md").exists());
}

// =============================================================================
// strip-schema
// =============================================================================

#[test]
fn test_strip_schema_reports_delta() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.json"), r#"{"$comment": "remove", "title": "ok"}"#).unwrap();

    let output = run(env!("CARGO_BIN_EXE_strip-schema"), dir.path(), &["in.json", "out.json"]);

    assert!(output.status.success());
    let line = stdout(&output);
    assert!(line.starts_with("out.json written ("));
    assert!(line.contains("bytes stripped)"));
    assert!(!line.contains("warning"));
}

#[test]
fn test_strip_schema_noop_warns() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.json"), r#"{"title": "unchanged"}"#).unwrap();

    let output = run(env!("CARGO_BIN_EXE_strip-schema"), dir.path(), &["in.json", "out.json"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("warning: no editorial keys found in source"));
    let data: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out.json")).unwrap()).unwrap();
    assert_eq!(data, serde_json::json!({"title": "unchanged"}));
}

#[test]
fn test_strip_schema_check_on_missing_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.json"), r#"{"notes": "x", "title": "ok"}"#).unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_strip-schema"),
        dir.path(),
        &["in.json", "out.json", "--check"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("out.json").exists());
}

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn fixture_path() -> String {
    format!(
        "{}/tests/data/simple_flow.json",
        env!("CARGO_MANIFEST_DIR")
    )
}

#[test]
fn new_scaffolds_a_flow_that_passes_doctor() {
    let dir = tempfile::tempdir().unwrap();
    let flow_path = dir.path().join("triage.waldiez");

    Command::cargo_bin("waldiez-flow")
        .unwrap()
        .args(["new", "--flow"])
        .arg(&flow_path)
        .args(["--name", "Triage"])
        .assert()
        .success();
    assert!(flow_path.exists());

    Command::cargo_bin("waldiez-flow")
        .unwrap()
        .arg("doctor")
        .arg(&flow_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok:"));
}

#[test]
fn doctor_accepts_the_fixture() {
    Command::cargo_bin("waldiez-flow")
        .unwrap()
        .arg("doctor")
        .arg(fixture_path())
        .assert()
        .success();
}

#[test]
fn doctor_json_reports_schema_failures_on_stdin() {
    Command::cargo_bin("waldiez-flow")
        .unwrap()
        .args(["doctor", "--json", "--stdin"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"ok\":false"));
}

#[test]
fn doctor_fails_on_unparseable_input() {
    Command::cargo_bin("waldiez-flow")
        .unwrap()
        .args(["doctor", "--stdin"])
        .write_stdin("not json at all")
        .assert()
        .failure();
}

#[test]
fn convert_hides_secrets_when_asked() {
    let assert = Command::cargo_bin("waldiez-flow")
        .unwrap()
        .args(["convert", "--hide-secrets", "--flow"])
        .arg(fixture_path())
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("REPLACE_ME"));
    assert!(!stdout.contains("sk-test-123"));
    assert!(!stdout.contains("abc123"));
}

#[test]
fn convert_writes_normalized_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("normalized.waldiez");

    Command::cargo_bin("waldiez-flow")
        .unwrap()
        .args(["convert", "--pretty", "--flow"])
        .arg(fixture_path())
        .arg("--output")
        .arg(&out_path)
        .assert()
        .success();

    let text = std::fs::read_to_string(Path::new(&out_path)).unwrap();
    assert!(text.contains("\"Support triage\""));
    // the normalized document still validates
    Command::cargo_bin("waldiez-flow")
        .unwrap()
        .arg("doctor")
        .arg(&out_path)
        .assert()
        .success();
}

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const LICENSE_FORM: &str = r#"{
    "questions": [
        {"id": "q1", "type": "BOOLEAN"},
        {"id": "q2", "type": "SELECT"}
    ],
    "facts": [
        {"question_id": "q1", "template": "has_license({1})."},
        {"question_id": "q2", "template": "target_market({2})."}
    ],
    "validations": [],
    "queries": [
        {"query": "?- has_license(true)", "description": "Facility holds a license"},
        {"query": "?- target_market({2})", "description": "Declared market is on file"}
    ]
}"#;

#[test]
fn test_cli_validate_with_inline_answers() {
    let temp_dir = TempDir::new().unwrap();
    let form_file = temp_dir.path().join("form.json");
    fs::write(&form_file, LICENSE_FORM).unwrap();

    let mut cmd = Command::cargo_bin("precept").unwrap();
    cmd.arg("validate")
        .arg(&form_file)
        .arg("q1=true")
        .arg("q2=US");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Facility holds a license"))
        .stdout(predicate::str::contains("Declared market is on file"))
        .stdout(predicate::str::contains("2 of 2 checks passed"));
}

#[test]
fn test_cli_validate_with_responses_file() {
    let temp_dir = TempDir::new().unwrap();
    let form_file = temp_dir.path().join("form.json");
    let responses_file = temp_dir.path().join("answers.json");
    fs::write(&form_file, LICENSE_FORM).unwrap();
    fs::write(
        &responses_file,
        r#"{"q1": "true", "q2": "Does not apply"}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("precept").unwrap();
    cmd.arg("validate")
        .arg(&form_file)
        .arg("--responses")
        .arg(&responses_file);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pass (not applicable)"))
        .stdout(predicate::str::contains("2 of 2 checks passed"));
}

#[test]
fn test_cli_validate_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let form_file = temp_dir.path().join("form.json");
    fs::write(&form_file, LICENSE_FORM).unwrap();

    let mut cmd = Command::cargo_bin("precept").unwrap();
    cmd.arg("validate")
        .arg(&form_file)
        .arg("q1=true")
        .arg("q2=US")
        .arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"passed\""))
        .stdout(predicate::str::contains("\"description\""));
}

#[test]
fn test_cli_validate_reports_consult_errors() {
    let temp_dir = TempDir::new().unwrap();
    let form_file = temp_dir.path().join("form.json");
    fs::write(
        &form_file,
        r#"{
            "questions": [{"id": "q1", "type": "BOOLEAN"}],
            "facts": [{"question_id": "q1", "template": "has_license({1}"}],
            "validations": [],
            "queries": [{"query": "?- has_license(true)", "description": "License"}]
        }"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("precept").unwrap();
    cmd.arg("validate").arg(&form_file).arg("q1=true");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Consult error"));
}

#[test]
fn test_cli_validate_rejects_malformed_answer_pairs() {
    let temp_dir = TempDir::new().unwrap();
    let form_file = temp_dir.path().join("form.json");
    fs::write(&form_file, LICENSE_FORM).unwrap();

    let mut cmd = Command::cargo_bin("precept").unwrap();
    cmd.arg("validate").arg(&form_file).arg("not-a-pair");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected question_id=value"));
}

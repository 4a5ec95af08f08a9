use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_compile_shows_program_and_plan() {
    let temp_dir = TempDir::new().unwrap();
    let form_file = temp_dir.path().join("form.json");
    fs::write(
        &form_file,
        r#"{
            "questions": [{"id": "q1", "type": "BOOLEAN"}],
            "facts": [{"question_id": "q1", "template": "has_license({1})."}],
            "validations": [],
            "queries": [{"query": "?- has_license(true)", "description": "License"}]
        }"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("precept").unwrap();
    cmd.arg("compile").arg(&form_file).arg("q1=true");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(":- use_module(library(lists))."))
        .stdout(predicate::str::contains("has_license(true)."))
        .stdout(predicate::str::contains("0: has_license(true)"));
}

#[test]
fn test_cli_compile_marks_skipped_queries() {
    let temp_dir = TempDir::new().unwrap();
    let form_file = temp_dir.path().join("form.json");
    fs::write(
        &form_file,
        r#"{
            "questions": [{"id": "q1", "type": "BOOLEAN"}],
            "facts": [],
            "validations": [],
            "queries": [{"query": "?- has_license({1})", "description": "License"}]
        }"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("precept").unwrap();
    cmd.arg("compile")
        .arg(&form_file)
        .arg("q1=Does not apply");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0: skip"));
}

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn freefloat() -> Command {
    Command::cargo_bin("freefloat").unwrap()
}

#[test]
fn help_lists_subcommands() {
    freefloat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn config_show_merges_file_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"output": {"write_xlsx": false}}"#).unwrap();

    freefloat()
        .args(["config", "show", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"write_xlsx\": false"))
        .stdout(predicate::str::contains("\"write_csv_bom\": true"))
        .stdout(predicate::str::contains("\"input_dir\": \"input\""));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    freefloat()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    freefloat()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    freefloat()
        .args(["config", "init", "--force", "--output"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn batch_on_empty_directory_succeeds() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    freefloat()
        .arg("batch")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No PDF files found"));
}

#[test]
fn batch_keeps_error_log_for_unreadable_report() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("broken.pdf"), b"not a pdf").unwrap();

    freefloat()
        .arg("batch")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 successful"));

    let log = fs::read_to_string(output.path().join("broken.errors.log")).unwrap();
    assert!(log.contains("ERROR"));
    assert!(log.contains("broken.pdf"));
}

#[test]
fn process_missing_file_fails() {
    freefloat()
        .args(["process", "/nonexistent/report.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn watch_missing_directory_fails() {
    freefloat()
        .args(["watch", "-i", "/nonexistent/input"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input directory not found"));
}

//! End-to-end tests for the codesentry binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn codesentry() -> Command {
    Command::cargo_bin("codesentry").unwrap()
}

#[test]
fn scan_clean_repository_exits_zero() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.py"), "x = 1 + 1\n").unwrap();

    codesentry()
        .args(["scan", "-C"])
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("app.py"))
        .stdout(predicate::str::contains("secure"));
}

#[test]
fn scan_flagged_repository_exits_one() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("creds.py"), "password = \"abcdef\"\n").unwrap();

    codesentry()
        .args(["scan", "-C"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Security issues detected: Password",
        ));
}

#[test]
fn scan_json_format_is_parseable() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("creds.py"), "md5(data)\n").unwrap();

    let output = codesentry()
        .args(["scan", "--format", "json", "-C"])
        .arg(dir.path())
        .output()
        .unwrap();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let file = &report["files"]["creds.py"];
    assert_eq!(file["outcome"], "issues");
    assert_eq!(file["findings"][0]["kind"], "weak_encryption");
}

#[test]
fn scan_ignores_unsupported_extensions() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.md"), "password = \"abcdef\"\n").unwrap();

    codesentry()
        .args(["scan", "-C"])
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("0 files scanned").or(predicate::str::contains("secure")));
}

#[test]
fn scan_writes_report_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.js"), "const k = 'value';\n").unwrap();
    let report_path = dir.path().join("report.json");

    codesentry()
        .args(["scan", "--format", "json", "-o"])
        .arg(&report_path)
        .arg("-C")
        .arg(dir.path())
        .assert()
        .code(0);

    let content = fs::read_to_string(&report_path).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&content).is_ok());
}

#[test]
fn missing_directory_is_a_runtime_error() {
    codesentry()
        .args(["scan", "-C", "/nonexistent/repository"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error"));
}

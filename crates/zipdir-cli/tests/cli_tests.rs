//! Integration tests for zipdir-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

fn zipdir_cmd() -> Command {
    cargo_bin_cmd!("zipdir")
}

/// Creates `dir/` with two files under the temp root.
fn sample_tree(temp: &TempDir) {
    let dir = temp.path().join("dir");
    fs::create_dir_all(dir.join("sub")).unwrap();
    fs::write(dir.join("a.txt"), "alpha").unwrap();
    fs::write(dir.join("sub/b.txt"), "beta").unwrap();
}

fn entry_names(archive: &Path) -> Vec<String> {
    let file = fs::File::open(archive).unwrap();
    let zip = zip::ZipArchive::new(file).unwrap();
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[test]
fn test_version_flag() {
    zipdir_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zipdir"));
}

#[test]
fn test_help_flag() {
    zipdir_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_missing_path_fails() {
    zipdir_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("PATH"));
}

#[test]
fn test_positional_path_creates_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_tree(&temp);

    zipdir_cmd()
        .current_dir(temp.path())
        .arg("dir")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("successfully created: dir.zip"));

    assert_eq!(
        entry_names(&temp.path().join("dir.zip")),
        vec!["a.txt", "sub/b.txt"]
    );
}

#[test]
fn test_path_flag_creates_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_tree(&temp);

    zipdir_cmd()
        .current_dir(temp.path())
        .args(["--path", "dir/a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt.zip"));

    let file = fs::File::open(temp.path().join("a.txt.zip")).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    let mut content = String::new();
    zip.by_name("a.txt")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "alpha");
}

#[test]
fn test_dot_path_is_rejected() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_tree(&temp);

    zipdir_cmd()
        .current_dir(temp.path().join("dir"))
        .arg(".")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid path '.'"));

    assert!(!temp.path().join("dir/.zip").exists());
}

#[test]
fn test_nonexistent_path_fails_without_residue() {
    let temp = TempDir::new().expect("failed to create temp dir");

    zipdir_cmd()
        .current_dir(temp.path())
        .arg("missing")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("missing"));

    assert!(!temp.path().join("missing.zip").exists());
}

#[test]
fn test_output_dir() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_tree(&temp);
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();

    zipdir_cmd()
        .current_dir(temp.path())
        .args(["dir", "--output-dir", "out"])
        .assert()
        .success();

    assert!(out.join("dir.zip").exists());
    assert!(!temp.path().join("dir.zip").exists());
}

#[test]
fn test_quiet_prints_only_path() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_tree(&temp);

    zipdir_cmd()
        .current_dir(temp.path())
        .args(["--quiet", "dir"])
        .assert()
        .success()
        .stdout("dir.zip\n");
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_tree(&temp);

    let output = zipdir_cmd()
        .current_dir(temp.path())
        .args(["--json", "dir"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["archive_path"], "dir.zip");
    assert_eq!(value["data"]["files_added"], 2);
    assert_eq!(value["data"]["bytes_read"], 9);
}

#[test]
fn test_json_error_goes_to_stderr() {
    let temp = TempDir::new().expect("failed to create temp dir");

    let output = zipdir_cmd()
        .current_dir(temp.path())
        .env_remove("RUST_LOG")
        .args(["--json", "missing"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let value: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["status"], "error");
    assert!(value["error"].as_str().unwrap().contains("missing"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_json_error_after_rollback_is_clean() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().expect("failed to create temp dir");
    sample_tree(&temp);
    let bad = temp.path().join("dir").join(OsStr::from_bytes(b"bad\xffname"));
    fs::write(bad, "unnamed").unwrap();

    let output = zipdir_cmd()
        .current_dir(temp.path())
        .env_remove("RUST_LOG")
        .args(["--json", "dir"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(!temp.path().join("dir.zip").exists());

    let value: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["status"], "error");
    let message = value["error"].as_str().unwrap();
    assert!(message.contains("cannot store entry"));
    assert_eq!(message.matches("path is not valid UTF-8").count(), 1);
}

#[cfg(target_os = "linux")]
#[test]
fn test_rollback_warning_has_no_color_codes() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().expect("failed to create temp dir");
    sample_tree(&temp);
    let bad = temp.path().join("dir").join(OsStr::from_bytes(b"bad\xffname"));
    fs::write(bad, "unnamed").unwrap();

    zipdir_cmd()
        .current_dir(temp.path())
        .env_remove("RUST_LOG")
        .env_remove("CLICOLOR_FORCE")
        .arg("dir")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("removed partial archive"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

//! Exec mode with direct commands: no provider credentials required.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_exec_direct_command_runs_without_api_key() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("nlterm")
        .env("NLTERM_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .args(["exec", "-c", "echo hello-direct"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello-direct"));
}

#[test]
fn test_exec_runs_in_root_directory() {
    let home = tempdir().unwrap();
    let root = tempdir().unwrap();
    let canonical = std::fs::canonicalize(root.path()).unwrap();

    cargo_bin_cmd!("nlterm")
        .env("NLTERM_HOME", home.path())
        .arg("--root")
        .arg(root.path())
        .args(["exec", "-c", "pwd"])
        .assert()
        .success()
        .stdout(predicate::str::contains(canonical.to_string_lossy().as_ref()));
}

#[test]
fn test_exec_stderr_goes_to_stderr() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("nlterm")
        .env("NLTERM_HOME", home.path())
        .args(["exec", "-c", "ls /definitely/not/a/real/path"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn test_exec_natural_language_without_api_key_fails() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("nlterm")
        .env("NLTERM_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .args(["exec", "-c", "please list the files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key available"));
}

#[test]
fn test_piped_stdin_runs_exec_mode() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("nlterm")
        .env("NLTERM_HOME", home.path())
        .write_stdin("echo piped-hello")
        .assert()
        .success()
        .stdout(predicate::str::contains("piped-hello"));
}

#[test]
fn test_bad_root_fails() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("nlterm")
        .env("NLTERM_HOME", home.path())
        .args(["--root", "/definitely/not/a/real/path", "exec", "-c", "pwd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("root directory not accessible"));
}

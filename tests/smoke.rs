//! Smoke tests -- verify the binary runs and rejects bad invocations early.

use assert_cmd::Command;

fn syncstamp() -> Command {
    let mut cmd = Command::cargo_bin("syncstamp").unwrap();
    cmd.env_remove("SYNCSTAMP_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    syncstamp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("sync status"));
}

#[test]
fn test_cli_version() {
    syncstamp()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("syncstamp"));
}

#[test]
fn test_missing_repo_argument() {
    syncstamp()
        .arg("syncing")
        .write_stdin("[]")
        .assert()
        .failure()
        .stdout(predicates::str::is_empty());
}

#[test]
fn test_pending_is_not_a_valid_target() {
    syncstamp()
        .args(["pending", "debian"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stdout(predicates::str::is_empty())
        .stderr(predicates::str::contains("syncing"));
}

#[test]
fn test_unknown_status() {
    syncstamp()
        .args(["exploded", "debian"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stdout(predicates::str::is_empty());
}

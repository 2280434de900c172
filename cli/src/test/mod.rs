#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::{
    predicate::str::{contains, is_empty},
    PredicateBooleanExt,
};

mod report_operations;

#[test]
fn test_profile_arg() {
    // Test that --profile-path arg overrides MDT_PROFILE env var
    let mut cmd = Command::cargo_bin("mdt").unwrap();

    let assert = cmd
        .env("MDT_PROFILE", "wrong_profile")
        .args(["--profile-path", "test_profile_arg"])
        .arg("config")
        .assert();

    assert
        .success()
        .stdout(contains("test_profile_arg").and(contains(r#""db_path""#)))
        .stderr(is_empty());
}

#[test]
fn test_profile_env() {
    // Test that MDT_PROFILE env var sets the profile name
    let mut cmd = Command::cargo_bin("mdt").unwrap();

    let assert = cmd
        .env("MDT_PROFILE", "test_profile_env")
        .arg("config")
        .assert();

    assert
        .success()
        .stdout(contains("test_profile_env").and(contains(r#""db_path""#)))
        .stderr(is_empty());
}

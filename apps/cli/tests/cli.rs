//! CLI surface tests
//!
//! Only the argument surface is exercised here; anything past parsing
//! would contact the identity system.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_prints_usage_and_exits_zero() {
    Command::cargo_bin("rekey")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("username"));
}

#[test]
fn short_help_works_too() {
    Command::cargo_bin("rekey")
        .unwrap()
        .arg("-h")
        .assert()
        .success();
}

#[test]
fn unknown_flags_are_rejected() {
    Command::cargo_bin("rekey")
        .unwrap()
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn extra_positional_arguments_are_rejected() {
    Command::cargo_bin("rekey")
        .unwrap()
        .args(["jdoe", "second"])
        .assert()
        .failure();
}

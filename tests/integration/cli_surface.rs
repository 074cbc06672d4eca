//! Argument-parsing surface of the binary: help, version, and flag
//! conflicts. These never execute a command, so no sandbox is needed.

use assert_cmd::Command;
use predicates::prelude::*;

fn pakt() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pakt"))
}

#[test]
fn help_lists_all_subcommands() {
    pakt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn version_flag_prints_the_version() {
    pakt()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pakt"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    pakt()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn verbose_conflicts_with_quiet() {
    pakt().args(["--verbose", "--quiet", "check"]).assert().failure();
}

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn inspect_lists_blocks_by_default() {
    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.arg("inspect").arg("tests/fixtures/manual.md");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("  0 HEADING_1        Quick Start"))
        .stdout(predicate::str::contains("[mermaid] 1 lines"));
}

#[test]
fn inspect_meta_json() {
    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.arg("inspect")
        .arg("tests/fixtures/manual.md")
        .arg("meta-json")
        .arg("--extra-compact");
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("{\"title\":\"Quick Start\"}\n"));
}

#[test]
fn inspect_rejects_unknown_transforms() {
    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.arg("inspect").arg("tests/fixtures/manual.md").arg("ast-tag");
    cmd.assert().failure();
}

#[test]
fn list_transforms_shows_formats() {
    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.arg("--list-transforms");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("segments-json"))
        .stdout(predicate::str::contains("docx"));
}

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::io::{Cursor, Read};
use tempfile::tempdir;

fn document_xml(path: &std::path::Path) -> String {
    let bytes = fs::read(path).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn converts_to_docx_by_default() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.docx");

    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.env("MD2DOC_MERMAID_BIN", "/nonexistent/mmdc")
        .arg("tests/fixtures/manual.md")
        .arg("-o")
        .arg(&output)
        .arg("--extra-qr")
        .arg("false");
    cmd.assert().success();

    let xml = document_xml(&output);
    assert!(xml.contains("Quick Start"));
    assert!(xml.contains("[ TIP ]"));
    assert!(xml.contains("[Mermaid Chart Error]"));
    assert!(xml.contains("[Image: Logo]"));
}

#[test]
fn json_goes_to_stdout() {
    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.arg("convert")
        .arg("tests/fixtures/manual.md")
        .arg("--to")
        .arg("json");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "HEADING_1""#))
        .stdout(predicate::str::contains(r#""title": "Quick Start""#));
}

#[test]
fn format_is_detected_from_output_extension() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("blocks.json");

    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.arg("tests/fixtures/manual.md").arg("-o").arg(&output);
    cmd.assert().success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("CALLOUT_TIP"));
}

#[test]
fn docx_requires_output_path() {
    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.arg("tests/fixtures/manual.md").arg("--to").arg("docx");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("require an output file"));
}

#[test]
fn unknown_format_fails() {
    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.arg("tests/fixtures/manual.md").arg("--to").arg("pdf");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Format 'pdf' not found"));
}

#[test]
fn unknown_extra_parameter_fails() {
    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.arg("tests/fixtures/manual.md")
        .arg("--to")
        .arg("json")
        .arg("--extra-colour")
        .arg("red");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--extra-colour"));
}

#[test]
fn missing_input_fails() {
    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.arg("tests/fixtures/does-not-exist.md").arg("--to").arg("json");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}

#[test]
fn registered_images_are_embedded() {
    let dir = tempdir().unwrap();
    let logo = dir.path().join("logo.png");
    let pixel: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0xF8,
        0xCF, 0xC0, 0xF0, 0x1F, 0x00, 0x05, 0x00, 0x01, 0xFF, 0x89, 0x99, 0x3D, 0x1D, 0x00, 0x00,
        0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];
    fs::write(&logo, pixel).unwrap();
    let output = dir.path().join("out.docx");

    let mut cmd = cargo_bin_cmd!("md2doc");
    cmd.env("MD2DOC_MERMAID_BIN", "/nonexistent/mmdc")
        .arg("tests/fixtures/manual.md")
        .arg("-o")
        .arg(&output)
        .arg("--image")
        .arg(format!("logo={}", logo.display()));
    cmd.assert().success();

    let xml = document_xml(&output);
    assert!(!xml.contains("[Image: Logo]"));
    assert!(xml.contains(r#"descr="Logo""#));
}

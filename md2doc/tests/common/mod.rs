//! Shared helpers for integration tests.

use md2doc::docx::DocxConfig;
use md2doc::render::{NoDiagramRenderer, RenderServices};
use std::fs;
use std::io::{Cursor, Read};
use std::path::PathBuf;

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

/// Generator config with QR decoration off, so no test depends on encoder output.
pub fn offline_config() -> DocxConfig {
    DocxConfig {
        qr_codes: false,
        ..DocxConfig::default()
    }
}

/// Services whose diagram renderer always fails.
pub fn offline_services(config: &DocxConfig) -> RenderServices {
    RenderServices::for_config(config).with_diagrams(NoDiagramRenderer)
}

pub fn read_part(package: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(package)).expect("package is a zip");
    let mut part = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"));
    let mut text = String::new();
    part.read_to_string(&mut text).expect("part is utf-8");
    text
}

pub fn part_names(package: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(package)).expect("package is a zip");
    archive.file_names().map(str::to_string).collect()
}

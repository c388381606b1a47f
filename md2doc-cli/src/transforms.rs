//! CLI-specific transforms
//!
//! The inspect command shows what the parser made of a document before any
//! Word output is produced. Each transform is a view over the parse result:
//!
//! - `blocks-list`: one line per block, kind tag and a short summary (default)
//! - `blocks-json`: the block model as JSON (what a live preview consumes)
//! - `meta-json`: the preamble metadata as JSON
//! - `segments-json`: the inline segments of every block line
//!
//! ## Extra Parameters
//!
//! - `compact`: when "true", JSON transforms emit a single line
//!
//! Example: `md2doc inspect notes.md blocks-json --extra-compact`

use md2doc::inline::tokenize;
use md2doc::model::{Block, BlockKind, ParsedDocument};
use md2doc::parse_document;
use serde::Serialize;
use std::collections::HashMap;

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["blocks-list", "blocks-json", "meta-json", "segments-json"];

pub const DEFAULT_TRANSFORM: &str = "blocks-list";

const SUMMARY_WIDTH: usize = 60;

/// Execute a named transform on a source document.
///
/// ```ignore
/// let output = execute_transform("# Title", "blocks-list", &HashMap::new())?;
/// assert_eq!(output, "  0 HEADING_1        Title\n");
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let doc = parse_document(source);
    let compact = extra_params
        .get("compact")
        .is_some_and(|v| matches!(v.as_str(), "true" | "1" | "yes"));

    match transform_name {
        "blocks-list" => Ok(blocks_list(&doc)),
        "blocks-json" => to_json(&doc.blocks, compact),
        "meta-json" => to_json(&doc.meta, compact),
        "segments-json" => to_json(&segment_lines(&doc.blocks), compact),
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String, String> {
    let text = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    text.map(|mut t| {
        t.push('\n');
        t
    })
    .map_err(|e| format!("JSON serialization failed: {e}"))
}

fn blocks_list(doc: &ParsedDocument) -> String {
    let mut out = String::new();
    for (index, block) in doc.blocks.iter().enumerate() {
        out.push_str(&format!("{index:>3} {:<16} {}\n", block.kind.tag(), summary(block)));
    }
    out
}

fn summary(block: &Block) -> String {
    match block.kind {
        BlockKind::CodeBlock => {
            let lines = block.content.lines().count();
            match block.language_tag() {
                "" => format!("{lines} lines"),
                language => format!("[{language}] {lines} lines"),
            }
        }
        BlockKind::Table => {
            let rows = block.table_rows.as_ref().map_or(0, Vec::len);
            format!("{rows} rows")
        }
        BlockKind::Chat => format!(
            "{} ({}) {}",
            block.role.as_deref().unwrap_or(""),
            block.alignment.unwrap_or_default().as_str(),
            truncate(first_line(&block.content))
        ),
        _ => truncate(first_line(&block.content)),
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= SUMMARY_WIDTH {
        return text.to_string();
    }
    let cut: String = text.chars().take(SUMMARY_WIDTH - 1).collect();
    format!("{cut}…")
}

#[derive(Serialize)]
struct SegmentLine {
    block: usize,
    line: usize,
    segments: Vec<md2doc::Segment>,
}

/// Tokenized lines of every block that carries inline markup.
fn segment_lines(blocks: &[Block]) -> Vec<SegmentLine> {
    let mut lines = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        match block.kind {
            BlockKind::CodeBlock | BlockKind::HorizontalRule => continue,
            BlockKind::Table => {
                let rows = block.table_rows.iter().flatten();
                for (line, row) in rows.enumerate() {
                    let segments = row.iter().flat_map(|cell| tokenize(cell)).collect();
                    lines.push(SegmentLine {
                        block: index,
                        line,
                        segments,
                    });
                }
            }
            _ => {
                for (line, text) in block.content.lines().enumerate() {
                    lines.push(SegmentLine {
                        block: index,
                        line,
                        segments: tokenize(text),
                    });
                }
            }
        }
    }
    lines
}

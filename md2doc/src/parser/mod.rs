//! Line-oriented block parser.
//!
//! The parser walks the document once, line by line, in one of three states:
//!
//! - `Normal`: blank lines flush the paragraph buffer, lines starting with a
//!   fence open a code block, lines starting with `|` open a table, and any
//!   other line is offered to the [`RuleRegistry`] before falling back to the
//!   paragraph buffer.
//! - `InCodeFence`: every line is buffered verbatim until the next fence line.
//! - `InTable`: `|` lines accumulate until the first line that is not one,
//!   which is then handled in `Normal`.
//!
//! Fence and table handling live here rather than in rules because they need
//! the raw, unrecognized lines. Parsing never fails: unknown syntax is text.

pub mod cursor;
pub mod preamble;
pub mod rules;

pub use cursor::ParserCursor;
pub use rules::{LineRule, RuleRegistry};

use crate::model::{Block, ParsedDocument};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

const FENCE: &str = "```";

static TABLE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|[\s\-:|]+\|$").expect("separator pattern is valid"));

enum State<'a> {
    Normal,
    InCodeFence {
        language: String,
        line_numbers: Option<bool>,
        lines: Vec<&'a str>,
    },
    InTable {
        rows: Vec<&'a str>,
    },
}

/// Block parser with a configurable rule set.
pub struct BlockParser {
    rules: RuleRegistry,
}

impl BlockParser {
    pub fn new() -> Self {
        Self::with_rules(RuleRegistry::with_defaults())
    }

    pub fn with_rules(rules: RuleRegistry) -> Self {
        BlockParser { rules }
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Parse a full document, preamble included.
    pub fn parse_document(&self, text: &str) -> ParsedDocument {
        let (meta, body) = preamble::split(text);
        ParsedDocument {
            meta,
            blocks: self.parse(body),
        }
    }

    /// Parse text into blocks. The preamble is not interpreted here.
    pub fn parse(&self, text: &str) -> Vec<Block> {
        let mut cursor = ParserCursor::new(text);
        let mut blocks = Vec::new();
        let mut paragraph: Vec<&str> = Vec::new();
        let mut state = State::Normal;

        while let Some(line) = cursor.current() {
            let trimmed = line.trim();

            if let State::InCodeFence { lines, .. } = &mut state {
                if trimmed.starts_with(FENCE) {
                    if let State::InCodeFence {
                        language,
                        line_numbers,
                        lines,
                    } = std::mem::replace(&mut state, State::Normal)
                    {
                        blocks.push(Block::code(lines.join("\n"), language, line_numbers));
                    }
                } else {
                    lines.push(line);
                }
                cursor.advance();
                continue;
            }

            if let State::InTable { rows } = &mut state {
                if trimmed.starts_with('|') {
                    rows.push(trimmed);
                    cursor.advance();
                    continue;
                }
                if let State::InTable { rows } = std::mem::replace(&mut state, State::Normal) {
                    blocks.extend(table_block(&rows));
                }
            }

            if trimmed.starts_with(FENCE) {
                flush_paragraph(&mut paragraph, &mut blocks);
                let (language, line_numbers) = fence_info(&trimmed[FENCE.len()..]);
                state = State::InCodeFence {
                    language,
                    line_numbers,
                    lines: Vec::new(),
                };
            } else if trimmed.starts_with('|') {
                flush_paragraph(&mut paragraph, &mut blocks);
                state = State::InTable {
                    rows: vec![trimmed],
                };
            } else if trimmed.is_empty() {
                flush_paragraph(&mut paragraph, &mut blocks);
            } else if let Some(found) = self.rules.recognize(line, &mut cursor) {
                trace!(line = cursor.index(), count = found.len(), "rule matched");
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.extend(found);
            } else {
                paragraph.push(line);
            }
            cursor.advance();
        }

        match state {
            // An unclosed fence keeps what it collected.
            State::InCodeFence {
                language,
                line_numbers,
                lines,
            } => blocks.push(Block::code(lines.join("\n"), language, line_numbers)),
            State::InTable { rows } => blocks.extend(table_block(&rows)),
            State::Normal => {}
        }
        flush_paragraph(&mut paragraph, &mut blocks);
        blocks
    }
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

fn flush_paragraph(buffer: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if buffer.is_empty() {
        return;
    }
    let content = buffer.join("\n");
    buffer.clear();
    blocks.push(Block::paragraph(content.trim()));
}

/// Split a fence info string into the language and a `:ln` / `:no-ln` directive.
fn fence_info(info: &str) -> (String, Option<bool>) {
    let info = info.trim();
    if let Some((language, directive)) = info.rsplit_once(':') {
        let directive = directive.trim().to_ascii_lowercase();
        let setting = match directive.as_str() {
            "ln" => Some(true),
            "no-ln" => Some(false),
            _ => None,
        };
        if setting.is_some() {
            return (language.trim().to_string(), setting);
        }
    }
    (info.to_string(), None)
}

fn table_block(rows: &[&str]) -> Option<Block> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .filter(|row| !TABLE_SEPARATOR.is_match(row))
        .map(|row| split_row(row))
        .collect();
    if cells.is_empty() {
        return None;
    }
    Some(Block::table(rows.join("\n"), cells))
}

fn split_row(row: &str) -> Vec<String> {
    let row = row.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Parse with the default rules.
pub fn parse(text: &str) -> Vec<Block> {
    BlockParser::new().parse(text)
}

/// Parse a document with its preamble using the default rules.
pub fn parse_document(text: &str) -> ParsedDocument {
    BlockParser::new().parse_document(text)
}

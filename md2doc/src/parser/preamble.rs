//! Leading `---` metadata preamble.
//!
//! ```text
//! ---
//! title: Field Guide
//! author: Someone
//! header: off
//! ---
//! ```
//!
//! The preamble only counts when it is the first line of the document, it is
//! closed by a second `---` line, every non-blank line inside is `key: value`,
//! and at least one key is recognized. Anything else is ordinary text (a lone
//! `---` is a thematic break).

use crate::model::DocumentMeta;
use once_cell::sync::Lazy;
use regex::Regex;

const DELIMITER: &str = "---";

static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9_-]*)\s*:\s*(.*)$").expect("preamble entry pattern is valid")
});

/// Split `text` into its metadata and the remaining body.
pub fn split(text: &str) -> (DocumentMeta, &str) {
    match parse(text) {
        Some((meta, body)) => (meta, body),
        None => (DocumentMeta::default(), text),
    }
}

fn parse(text: &str) -> Option<(DocumentMeta, &str)> {
    let text_start = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut offset = text.len() - text_start.len();
    let mut lines = text_start.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim() != DELIMITER {
        return None;
    }
    offset += first.len();

    let mut meta = DocumentMeta::default();
    let mut recognized = 0usize;
    for line in lines {
        offset += line.len();
        let trimmed = line.trim();
        if trimmed == DELIMITER {
            return (recognized > 0).then(|| (meta, &text[offset..]));
        }
        if trimmed.is_empty() {
            continue;
        }
        let caps = ENTRY.captures(trimmed)?;
        if apply(&mut meta, &caps[1], caps[2].trim()) {
            recognized += 1;
        }
    }
    None
}

fn apply(meta: &mut DocumentMeta, key: &str, value: &str) -> bool {
    match key.to_ascii_lowercase().as_str() {
        "title" => meta.title = Some(value.to_string()),
        "author" => meta.author = Some(value.to_string()),
        "header" | "header-enabled" | "header_enabled" => meta.header = parse_bool(value),
        "footer" | "footer-enabled" | "footer_enabled" => meta.footer = parse_bool(value),
        _ => return false,
    }
    true
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_keys_and_strips_preamble() {
        let text = "---\ntitle: Guide\nAuthor: Kim\nfooter: no\n---\n# Start\n";
        let (meta, body) = split(text);
        assert_eq!(meta.title.as_deref(), Some("Guide"));
        assert_eq!(meta.author.as_deref(), Some("Kim"));
        assert_eq!(meta.footer, Some(false));
        assert_eq!(meta.header, None);
        assert_eq!(body, "# Start\n");
    }

    #[test]
    fn unterminated_preamble_is_plain_text() {
        let text = "---\ntitle: Guide\n# Start";
        let (meta, body) = split(text);
        assert!(meta.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn thematic_breaks_around_prose_are_not_a_preamble() {
        let text = "---\nJust prose here.\n---\n";
        let (meta, body) = split(text);
        assert!(meta.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn unknown_keys_alone_are_not_a_preamble() {
        let text = "---\nnote: hi\n---\n";
        assert_eq!(split(text).1, text);
    }

    #[test]
    fn unknown_keys_are_ignored_next_to_known_ones() {
        let (meta, body) = split("---\ntitle: T\nlayout: wide\n---");
        assert_eq!(meta.title.as_deref(), Some("T"));
        assert_eq!(body, "");
    }
}

//! Inline style tokenizer.
//!
//! Splits one line of text into typed [`Segment`]s. All markers are matched by
//! a single alternation so the leftmost span wins, and at a given position the
//! more specific syntax is tried first:
//!
//! | Syntax          | Segment            |
//! |-----------------|--------------------|
//! | `![alt](src)`   | [`SegmentKind::Image`] |
//! | `[text](url)`   | [`SegmentKind::Link`] |
//! | `**text**`      | [`SegmentKind::Bold`] |
//! | `*text*`        | [`SegmentKind::Italic`] |
//! | `<u>text</u>`   | [`SegmentKind::Underline`] |
//! | `` `code` ``    | [`SegmentKind::Code`] |
//! | `【text】`      | [`SegmentKind::UiButton`] |
//! | `[Key]`         | [`SegmentKind::Shortcut`] |
//! | `『text』`      | [`SegmentKind::Book`] |
//!
//! Tokenizing is total. A marker without its closing half (a stray `**`, an
//! unclosed backtick) is not a span; it stays in the surrounding plain text.
//! A stray `**` never lends a star to an italic span. Italic needs at least one
//! character between the stars, every other span may be empty and still yields
//! a segment.
//!
//! Builders pass whole block content, so italic, code, button, shortcut and
//! book spans may cross a `\n`. Bold and underline stay within one line.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Segment type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Text,
    Bold,
    Italic,
    Underline,
    Code,
    UiButton,
    Shortcut,
    Book,
    Link,
    Image,
}

/// One run of inline text. `url` is set for links and images only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Segment {
    pub fn new(kind: SegmentKind, content: impl Into<String>) -> Self {
        Segment {
            kind,
            content: content.into(),
            url: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Segment::new(SegmentKind::Text, content)
    }

    fn with_url(kind: SegmentKind, content: &str, url: &str) -> Self {
        Segment {
            kind,
            content: content.to_string(),
            url: Some(url.trim().to_string()),
        }
    }
}

static INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"!\[(?P<img_alt>[^\]]*)\]\((?P<img_src>[^)]*)\)",
        r"|\[(?P<link_text>[^\]]*)\]\((?P<link_url>[^)]*)\)",
        r"|\*\*(?P<bold>.*?)\*\*",
        r"|(?P<stray>\*\*)",
        r"|\*(?P<italic>[^*]+)\*",
        r"|<u>(?P<underline>.*?)</u>",
        r"|`(?P<code>[^`]*)`",
        r"|【(?P<button>[^】]*)】",
        r"|\[(?P<shortcut>[^\[\]]*)\]",
        r"|『(?P<book>[^』]*)』",
    ))
    .expect("inline pattern is valid")
});

/// Tokenize one line. An empty line yields a single empty text segment.
pub fn tokenize(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        // Unclosed `**`: leave both stars in the pending text.
        if caps.name("stray").is_some() {
            continue;
        }
        if whole.start() > last {
            segments.push(Segment::text(&line[last..whole.start()]));
        }
        segments.push(segment_from(&caps));
        last = whole.end();
    }

    if last < line.len() || segments.is_empty() {
        segments.push(Segment::text(&line[last..]));
    }
    segments
}

/// Concatenated content of all segments, markers stripped.
pub fn plain_text(line: &str) -> String {
    tokenize(line).into_iter().map(|s| s.content).collect()
}

fn segment_from(caps: &Captures<'_>) -> Segment {
    let group = |name: &str| caps.name(name).map(|m| m.as_str());

    if let (Some(alt), Some(src)) = (group("img_alt"), group("img_src")) {
        return Segment::with_url(SegmentKind::Image, alt, src);
    }
    if let (Some(text), Some(url)) = (group("link_text"), group("link_url")) {
        return Segment::with_url(SegmentKind::Link, text, url);
    }

    const SIMPLE: [(&str, SegmentKind); 7] = [
        ("bold", SegmentKind::Bold),
        ("italic", SegmentKind::Italic),
        ("underline", SegmentKind::Underline),
        ("code", SegmentKind::Code),
        ("button", SegmentKind::UiButton),
        ("shortcut", SegmentKind::Shortcut),
        ("book", SegmentKind::Book),
    ];
    for (name, kind) in SIMPLE {
        if let Some(content) = group(name) {
            return Segment::new(kind, content);
        }
    }

    // Unreachable with the pattern above; keep the raw match as text.
    Segment::text(caps.get(0).map(|m| m.as_str()).unwrap_or_default())
}

//! Single-line block rules and their ordered registry.
//!
//! A rule looks at one line (outside fences and tables) and either declines it
//! or returns the blocks it stands for. Rules that need lookahead (the manual
//! TOC and callout continuation) advance the cursor past the lines they eat.
//! Registration order decides ties: the first rule that accepts a line wins.

use super::cursor::ParserCursor;
use crate::model::{Block, BlockKind, ChatAlignment};
use once_cell::sync::Lazy;
use regex::Regex;

/// A recognizer for one block syntax.
pub trait LineRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` declines the line. `Some` claims it, possibly with zero blocks.
    fn recognize(&self, line: &str, cursor: &mut ParserCursor<'_>) -> Option<Vec<Block>>;
}

/// Ordered collection of [`LineRule`]s.
pub struct RuleRegistry {
    rules: Vec<Box<dyn LineRule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        RuleRegistry { rules: Vec::new() }
    }

    /// Headings, thematic break, manual TOC, chat, list item, callout.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(HeadingRule);
        registry.register(ThematicBreakRule);
        registry.register(TocRule);
        registry.register(ChatRule);
        registry.register(ListItemRule);
        registry.register(CalloutRule);
        registry
    }

    pub fn register<R: LineRule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Offer `line` to each rule in order.
    pub fn recognize(&self, line: &str, cursor: &mut ParserCursor<'_>) -> Option<Vec<Block>> {
        self.rules
            .iter()
            .find_map(|rule| rule.recognize(line, cursor))
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// `# `, `## ` and `### `. Deeper headings are left to paragraph text.
pub struct HeadingRule;

impl LineRule for HeadingRule {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn recognize(&self, line: &str, _cursor: &mut ParserCursor<'_>) -> Option<Vec<Block>> {
        let trimmed = line.trim();
        let levels = [
            ("# ", BlockKind::Heading1),
            ("## ", BlockKind::Heading2),
            ("### ", BlockKind::Heading3),
        ];
        levels.into_iter().find_map(|(marker, kind)| {
            trimmed
                .strip_prefix(marker)
                .map(|rest| vec![Block::new(kind, rest.trim_start())])
        })
    }
}

/// Three or more of the same `-`, `*` or `_` character.
pub struct ThematicBreakRule;

impl LineRule for ThematicBreakRule {
    fn name(&self) -> &'static str {
        "thematic-break"
    }

    fn recognize(&self, line: &str, _cursor: &mut ParserCursor<'_>) -> Option<Vec<Block>> {
        is_thematic_break(line.trim())
            .then(|| vec![Block::new(BlockKind::HorizontalRule, "")])
    }
}

pub(crate) fn is_thematic_break(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first @ ('-' | '*' | '_')) => {
            trimmed.chars().count() >= 3 && chars.all(|c| c == first)
        }
        _ => false,
    }
}

static ORDERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.").expect("ordered marker pattern is valid"));

/// `[TOC]` followed by list-looking entry lines.
pub struct TocRule;

impl TocRule {
    fn is_entry(line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.starts_with('-') || trimmed.starts_with('*') || ORDERED_MARKER.is_match(trimmed)
    }
}

impl LineRule for TocRule {
    fn name(&self) -> &'static str {
        "toc"
    }

    fn recognize(&self, line: &str, cursor: &mut ParserCursor<'_>) -> Option<Vec<Block>> {
        if !line.trim().eq_ignore_ascii_case("[TOC]") {
            return None;
        }
        let entries = cursor.take_while_next(Self::is_entry);
        let content = entries.join("\n");
        Some(vec![Block::new(BlockKind::TableOfContents, content.trim())])
    }
}

static CHAT_MARKERS: Lazy<[(Regex, ChatAlignment); 3]> = Lazy::new(|| {
    let build = |pattern: &str| Regex::new(pattern).expect("chat pattern is valid");
    [
        (build(r#"^(.+?)\s*:":\s*(.*)$"#), ChatAlignment::Center),
        (build(r#"^(.+?)\s*::"\s*(.*)$"#), ChatAlignment::Right),
        (build(r#"^(.+?)\s*"::\s*(.*)$"#), ChatAlignment::Left),
    ]
});

/// `ROLE :": text` (center), `ROLE ::" text` (right), `ROLE ":: text` (left).
///
/// Markers are tried in that order and the first match wins.
pub struct ChatRule;

impl LineRule for ChatRule {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn recognize(&self, line: &str, _cursor: &mut ParserCursor<'_>) -> Option<Vec<Block>> {
        let trimmed = line.trim();
        CHAT_MARKERS.iter().find_map(|(pattern, alignment)| {
            let caps = pattern.captures(trimmed)?;
            let role = caps.get(1)?.as_str().trim();
            let content = caps.get(2).map_or("", |m| m.as_str()).trim();
            Some(vec![Block::chat(role, *alignment, content)])
        })
    }
}

static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s").expect("numbered item pattern is valid"));
static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s").expect("bullet item pattern is valid"));

/// One list item per line; grouping happens in the generator.
pub struct ListItemRule;

impl LineRule for ListItemRule {
    fn name(&self) -> &'static str {
        "list-item"
    }

    fn recognize(&self, line: &str, _cursor: &mut ParserCursor<'_>) -> Option<Vec<Block>> {
        let trimmed = line.trim();
        let (kind, marker) = if let Some(m) = NUMBERED_ITEM.find(trimmed) {
            (BlockKind::NumberedItem, m)
        } else {
            (BlockKind::BulletItem, BULLET_ITEM.find(trimmed)?)
        };
        Some(vec![Block::new(kind, &trimmed[marker.end()..])])
    }
}

static CALLOUT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\[!(TIP|WARNING|NOTE)\]").expect("callout marker pattern is valid")
});

/// `>` lines, optionally opened by `[!TIP]`, `[!WARNING]` or `[!NOTE]`.
pub struct CalloutRule;

impl CalloutRule {
    fn strip_quote(line: &str) -> &str {
        let rest = line.trim().strip_prefix('>').unwrap_or(line);
        rest.strip_prefix(' ').unwrap_or(rest).trim()
    }
}

impl LineRule for CalloutRule {
    fn name(&self) -> &'static str {
        "callout"
    }

    fn recognize(&self, line: &str, cursor: &mut ParserCursor<'_>) -> Option<Vec<Block>> {
        if !line.trim().starts_with('>') {
            return None;
        }
        let first = Self::strip_quote(line);
        let (kind, first) = match CALLOUT_MARKER.captures(first) {
            Some(caps) => {
                let kind = match caps[1].to_ascii_uppercase().as_str() {
                    "TIP" => BlockKind::CalloutTip,
                    "WARNING" => BlockKind::CalloutWarning,
                    _ => BlockKind::CalloutNote,
                };
                (kind, first[caps[0].len()..].trim())
            }
            None => (BlockKind::CalloutNote, first),
        };

        let mut content = first.to_string();
        for next in cursor.take_while_next(|l| l.trim().starts_with('>')) {
            if !content.is_empty() {
                content.push('\n');
            }
            content.push_str(Self::strip_quote(next));
        }
        Some(vec![Block::new(kind, content.trim())])
    }
}

//! Block types produced by the parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of block kinds the parser can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    #[serde(rename = "PARAGRAPH")]
    Paragraph,
    #[serde(rename = "HEADING_1")]
    Heading1,
    #[serde(rename = "HEADING_2")]
    Heading2,
    #[serde(rename = "HEADING_3")]
    Heading3,
    #[serde(rename = "CODE_BLOCK")]
    CodeBlock,
    #[serde(rename = "CHAT")]
    Chat,
    #[serde(rename = "CALLOUT_TIP")]
    CalloutTip,
    #[serde(rename = "CALLOUT_NOTE")]
    CalloutNote,
    #[serde(rename = "CALLOUT_WARNING")]
    CalloutWarning,
    #[serde(rename = "BULLET_LIST")]
    BulletItem,
    #[serde(rename = "NUMBERED_LIST")]
    NumberedItem,
    #[serde(rename = "TABLE")]
    Table,
    #[serde(rename = "HORIZONTAL_RULE")]
    HorizontalRule,
    #[serde(rename = "TOC")]
    TableOfContents,
}

impl BlockKind {
    /// Every kind, in declaration order.
    pub const ALL: [BlockKind; 14] = [
        BlockKind::Paragraph,
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::CodeBlock,
        BlockKind::Chat,
        BlockKind::CalloutTip,
        BlockKind::CalloutNote,
        BlockKind::CalloutWarning,
        BlockKind::BulletItem,
        BlockKind::NumberedItem,
        BlockKind::Table,
        BlockKind::HorizontalRule,
        BlockKind::TableOfContents,
    ];

    /// Stable tag used in logs and in the JSON model.
    pub fn tag(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "PARAGRAPH",
            BlockKind::Heading1 => "HEADING_1",
            BlockKind::Heading2 => "HEADING_2",
            BlockKind::Heading3 => "HEADING_3",
            BlockKind::CodeBlock => "CODE_BLOCK",
            BlockKind::Chat => "CHAT",
            BlockKind::CalloutTip => "CALLOUT_TIP",
            BlockKind::CalloutNote => "CALLOUT_NOTE",
            BlockKind::CalloutWarning => "CALLOUT_WARNING",
            BlockKind::BulletItem => "BULLET_LIST",
            BlockKind::NumberedItem => "NUMBERED_LIST",
            BlockKind::Table => "TABLE",
            BlockKind::HorizontalRule => "HORIZONTAL_RULE",
            BlockKind::TableOfContents => "TOC",
        }
    }

    /// Heading level for heading kinds.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockKind::Heading1 => Some(1),
            BlockKind::Heading2 => Some(2),
            BlockKind::Heading3 => Some(3),
            _ => None,
        }
    }

    pub fn is_callout(&self) -> bool {
        matches!(
            self,
            BlockKind::CalloutTip | BlockKind::CalloutNote | BlockKind::CalloutWarning
        )
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which of the three chat marker syntaxes matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl ChatAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatAlignment::Left => "left",
            ChatAlignment::Center => "center",
            ChatAlignment::Right => "right",
        }
    }
}

/// Optional per-block settings that only some kinds use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMetadata {
    /// Code blocks: explicit line-number visibility from the fence directive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_numbers: Option<bool>,
}

impl BlockMetadata {
    pub fn is_empty(&self) -> bool {
        self.line_numbers.is_none()
    }
}

/// One typed unit of parsed document structure.
///
/// Blocks are never mutated after the parser emits them; builders only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_rows: Option<Vec<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<ChatAlignment>,
    #[serde(default, skip_serializing_if = "BlockMetadata::is_empty")]
    pub metadata: BlockMetadata,
}

impl Block {
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Block {
            kind,
            content: content.into(),
            language: None,
            table_rows: None,
            role: None,
            alignment: None,
            metadata: BlockMetadata::default(),
        }
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Block::new(BlockKind::Paragraph, content)
    }

    pub fn code(
        content: impl Into<String>,
        language: impl Into<String>,
        line_numbers: Option<bool>,
    ) -> Self {
        let mut block = Block::new(BlockKind::CodeBlock, content);
        block.language = Some(language.into());
        block.metadata.line_numbers = line_numbers;
        block
    }

    pub fn table(raw: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        let mut block = Block::new(BlockKind::Table, raw);
        block.table_rows = Some(rows);
        block
    }

    pub fn chat(
        role: impl Into<String>,
        alignment: ChatAlignment,
        content: impl Into<String>,
    ) -> Self {
        let mut block = Block::new(BlockKind::Chat, content);
        block.role = Some(role.into());
        block.alignment = Some(alignment);
        block
    }

    /// Declared fence language, empty when absent.
    pub fn language_tag(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }
}

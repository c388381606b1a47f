//! Document metadata carried alongside the block sequence.

use serde::{Deserialize, Serialize};

/// Values from the leading `---` preamble. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<bool>,
}

impl DocumentMeta {
    pub fn is_empty(&self) -> bool {
        self == &DocumentMeta::default()
    }

    /// Title to show in the page header, if the header is on and a title exists.
    pub fn header_title(&self) -> Option<&str> {
        if self.header.unwrap_or(true) {
            self.title.as_deref().filter(|t| !t.is_empty())
        } else {
            None
        }
    }

    /// Page-number footer is on unless explicitly disabled.
    pub fn footer_enabled(&self) -> bool {
        self.footer.unwrap_or(true)
    }
}

//! JSON block model export
//!
//! Emits `{"meta": {...}, "blocks": [...]}` with the block field names a
//! live preview consumes (`type`, `content`, `language`, `tableRows`, `role`,
//! `alignment`).

use crate::docx::DocxConfig;
use crate::error::Result;
use crate::format::{Format, SerializedDocument};
use crate::model::ParsedDocument;
use crate::render::RenderServices;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        JsonFormat { pretty: true }
    }
}

impl JsonFormat {
    pub fn serialize(&self, doc: &ParsedDocument) -> Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(doc)?
        } else {
            serde_json::to_string(doc)?
        };
        Ok(text)
    }
}

#[async_trait]
impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Parsed block model as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    async fn export(
        &self,
        doc: &ParsedDocument,
        _config: &DocxConfig,
        _services: &RenderServices,
    ) -> Result<SerializedDocument> {
        self.serialize(doc).map(SerializedDocument::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blocks_use_preview_field_names() {
        let doc = crate::parse_document("| a | b |\n|---|---|\n| 1 | 2 |\n\nAI \":: hi");
        let text = JsonFormat { pretty: false }.serialize(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["blocks"][0]["type"], json!("TABLE"));
        assert_eq!(value["blocks"][0]["tableRows"], json!([["a", "b"], ["1", "2"]]));
        assert_eq!(value["blocks"][1]["role"], json!("AI"));
        assert_eq!(value["blocks"][1]["alignment"], json!("left"));
    }

    #[test]
    fn round_trips_through_serde() {
        let doc = crate::parse_document("---\ntitle: T\n---\n## Sub\n- item");
        let text = JsonFormat::default().serialize(&doc).unwrap();
        let back: ParsedDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(back, doc);
    }
}

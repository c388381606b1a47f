//! WordprocessingML package export

use crate::docx::{DocumentGenerator, DocxConfig};
use crate::error::Result;
use crate::format::{Format, SerializedDocument};
use crate::model::ParsedDocument;
use crate::render::RenderServices;
use async_trait::async_trait;

/// Exports the parsed document as a `.docx` package.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxFormat;

#[async_trait]
impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Word document (WordprocessingML package)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    async fn export(
        &self,
        doc: &ParsedDocument,
        config: &DocxConfig,
        services: &RenderServices,
    ) -> Result<SerializedDocument> {
        let generator = DocumentGenerator::new(config.clone()).with_services(services.clone());
        generator.export(doc).await.map(SerializedDocument::Binary)
    }
}

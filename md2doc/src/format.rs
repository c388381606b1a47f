//! Output format trait
//!
//! Every export target (the `.docx` package, the JSON block model) implements
//! [`Format`] so the CLI and the preview can select one by name.

use crate::docx::DocxConfig;
use crate::error::{ExportError, Result};
use crate::model::ParsedDocument;
use crate::render::RenderServices;
use async_trait::async_trait;

/// Serialized output produced by a [`Format`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializedDocument {
    /// UTF-8 text output (e.g. the JSON block model)
    Text(String),
    /// Binary output (e.g. a `.docx` package)
    Binary(Vec<u8>),
}

impl SerializedDocument {
    /// Consume the serialized output and return the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SerializedDocument::Text(text) => text.into_bytes(),
            SerializedDocument::Binary(bytes) => bytes,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, SerializedDocument::Binary(_))
    }
}

/// An export target for parsed documents.
///
/// ```ignore
/// struct Outline;
///
/// #[async_trait]
/// impl Format for Outline {
///     fn name(&self) -> &str {
///         "outline"
///     }
///
///     async fn export(
///         &self,
///         doc: &ParsedDocument,
///         _config: &DocxConfig,
///         _services: &RenderServices,
///     ) -> Result<SerializedDocument> {
///         let headings: Vec<_> = doc.blocks.iter().filter(|b| b.kind.heading_level().is_some()).collect();
///         Ok(SerializedDocument::Text(format!("{} headings", headings.len())))
///     }
/// }
/// ```
#[async_trait]
pub trait Format: Send + Sync {
    /// The name of this format (e.g. "docx", "json")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// File extensions without the leading dot, used to detect the format
    /// from an output filename.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Export a parsed document.
    ///
    /// The default implementation reports the format as export-less.
    async fn export(
        &self,
        _doc: &ParsedDocument,
        _config: &DocxConfig,
        _services: &RenderServices,
    ) -> Result<SerializedDocument> {
        Err(ExportError::NotSupported(format!(
            "Format '{}' does not support export",
            self.name()
        )))
    }
}

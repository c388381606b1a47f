//! Format registry for format discovery and selection

use crate::docx::DocxConfig;
use crate::error::{ExportError, Result};
use crate::format::{Format, SerializedDocument};
use crate::model::ParsedDocument;
use crate::render::RenderServices;
use std::collections::HashMap;

/// Registry of output formats, keyed by name.
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let out = registry.export(&doc, "docx", &config, &services).await?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format, replacing any format with the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| ExportError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// ```ignore
    /// let registry = FormatRegistry::default();
    /// assert_eq!(registry.detect_format_from_filename("out.docx"), Some("docx".to_string()));
    /// assert_eq!(registry.detect_format_from_filename("out.unknown"), None);
    /// ```
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
            .map(|format| format.name().to_string())
    }

    /// Export a document using the named format
    pub async fn export(
        &self,
        doc: &ParsedDocument,
        format: &str,
        config: &DocxConfig,
        services: &RenderServices,
    ) -> Result<SerializedDocument> {
        self.get(format)?.export(doc, config, services).await
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::formats::docx::DocxFormat);
        registry.register(crate::formats::json::JsonFormat::default());
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct TestFormat;

    #[async_trait]
    impl Format for TestFormat {
        fn name(&self) -> &str {
            "test"
        }
        fn file_extensions(&self) -> &[&str] {
            &["tst"]
        }
        async fn export(
            &self,
            doc: &ParsedDocument,
            _config: &DocxConfig,
            _services: &RenderServices,
        ) -> Result<SerializedDocument> {
            Ok(SerializedDocument::Text(format!("{} blocks", doc.blocks.len())))
        }
    }

    struct ExportlessFormat;

    impl Format for ExportlessFormat {
        fn name(&self) -> &str {
            "none"
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert!(registry.list_formats().is_empty());
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        assert!(registry.has("test"));
        assert_eq!(registry.get("test").map(|f| f.name()).ok(), Some("test"));
        assert!(matches!(
            registry.get("nonexistent"),
            Err(ExportError::FormatNotFound(name)) if name == "nonexistent"
        ));
    }

    #[test]
    fn test_default_formats() {
        let registry = FormatRegistry::default();
        assert_eq!(registry.list_formats(), vec!["docx", "json"]);
    }

    #[test]
    fn test_detect_format_from_filename() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.detect_format_from_filename("manual.DOCX"),
            Some("docx".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("blocks.json"),
            Some("json".to_string())
        );
        assert_eq!(registry.detect_format_from_filename("notes.txt"), None);
        assert_eq!(registry.detect_format_from_filename("noext"), None);
    }

    #[tokio::test]
    async fn test_registry_export() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);
        registry.register(ExportlessFormat);
        let doc = crate::parse_document("one\n\n# two");
        let config = DocxConfig::default();
        let services = RenderServices::default();

        let out = registry.export(&doc, "test", &config, &services).await.unwrap();
        assert_eq!(out, SerializedDocument::Text("2 blocks".into()));

        let err = registry.export(&doc, "none", &config, &services).await.unwrap_err();
        assert!(matches!(err, ExportError::NotSupported(_)));
    }
}

//! Shared configuration loader for the md2doc toolchain.
//!
//! `defaults/md2doc.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`Md2DocConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use md2doc::docx::{DiagramSettings, DocxConfig};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/md2doc.default.toml");

/// Top-level configuration consumed by md2doc applications.
#[derive(Debug, Clone, Deserialize)]
pub struct Md2DocConfig {
    pub page: PageConfig,
    pub code: CodeConfig,
    pub links: LinksConfig,
    pub diagram: DiagramConfig,
    pub toc: TocConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub width_cm: f64,
    pub height_cm: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeConfig {
    pub show_line_numbers: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    pub qr_codes: bool,
}

/// Mermaid rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagramConfig {
    pub concurrency: usize,
    pub max_width_px: u32,
    pub scale: u32,
    pub renderer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TocConfig {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl From<&DiagramConfig> for DiagramSettings {
    fn from(config: &DiagramConfig) -> Self {
        DiagramSettings {
            concurrency: config.concurrency,
            max_width_px: config.max_width_px,
            scale: config.scale.max(1),
            renderer: config.renderer.clone(),
        }
    }
}

impl From<&Md2DocConfig> for DocxConfig {
    fn from(config: &Md2DocConfig) -> Self {
        DocxConfig {
            width_cm: config.page.width_cm,
            height_cm: config.page.height_cm,
            show_line_numbers: config.code.show_line_numbers,
            qr_codes: config.links.qr_codes,
            toc_title: config.toc.title.clone(),
            diagram: (&config.diagram).into(),
        }
    }
}

impl From<Md2DocConfig> for DocxConfig {
    fn from(config: Md2DocConfig) -> Self {
        DocxConfig::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<Md2DocConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<Md2DocConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.page.width_cm, 17.0);
        assert!(config.code.show_line_numbers);
        assert!(config.links.qr_codes);
        assert_eq!(config.diagram.concurrency, 2);
        assert_eq!(config.toc.title, "目 錄");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn defaults_match_generator_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(DocxConfig::from(&config), DocxConfig::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("diagram.concurrency", 4i64)
            .expect("override to apply")
            .set_override("toc.title", "Contents")
            .expect("override to apply")
            .build()
            .expect("config to build");
        let docx: DocxConfig = config.into();
        assert_eq!(docx.diagram.concurrency, 4);
        assert_eq!(docx.toc_title, "Contents");
    }

    #[test]
    fn string_overrides_coerce_to_typed_fields() {
        let config = Loader::new()
            .set_override("code.show_line_numbers", "false")
            .expect("override to apply")
            .set_override("page.width_cm", "21")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!config.code.show_line_numbers);
        assert_eq!(config.page.width_cm, 21.0);
    }

    #[test]
    fn layers_user_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[links]\nqr_codes = false").unwrap();
        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert!(!config.links.qr_codes);
        assert!(config.code.show_line_numbers);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/definitely/not/here.toml").build();
        assert!(result.is_err());
        let config = Loader::new()
            .with_optional_file("/definitely/not/here.toml")
            .build();
        assert!(config.is_ok());
    }
}

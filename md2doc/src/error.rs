//! Error types for export operations

use thiserror::Error;

/// Errors raised while building or packing a document.
///
/// Parsing never fails. Diagram and QR failures are normally absorbed by the
/// builders that hit them; the variants exist so collaborators can report
/// what went wrong before it is swallowed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),

    #[error("Failed to build {kind} block: {message}")]
    Build { kind: String, message: String },

    #[error("Diagram rendering failed: {0}")]
    Diagram(String),

    #[error("QR encoding failed: {0}")]
    Qr(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Packaging error: {0}")]
    Package(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub fn build(kind: impl ToString, message: impl Into<String>) -> Self {
        ExportError::Build {
            kind: kind.to_string(),
            message: message.into(),
        }
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        ExportError::Package(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

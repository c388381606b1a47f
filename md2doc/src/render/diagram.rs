//! Diagram source to SVG.
//!
//! The built-in renderer shells out to the mermaid command-line tool. The
//! binary is resolved from `MD2DOC_MERMAID_BIN`, then from `PATH`.

use crate::error::{ExportError, Result};
use async_trait::async_trait;

/// Turns a textual diagram description into an SVG document.
#[async_trait]
pub trait DiagramRenderer: Send + Sync {
    async fn render_svg(&self, source: &str) -> Result<String>;
}

/// Renderer that always fails, for builds without external tools.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiagramRenderer;

#[async_trait]
impl DiagramRenderer for NoDiagramRenderer {
    async fn render_svg(&self, _source: &str) -> Result<String> {
        Err(ExportError::Diagram(
            "no diagram renderer is available".to_string(),
        ))
    }
}

#[cfg(feature = "native-export")]
pub use cli::MermaidCli;

#[cfg(feature = "native-export")]
mod cli {
    use super::DiagramRenderer;
    use crate::error::{ExportError, Result};
    use async_trait::async_trait;
    use std::env;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use tokio::process::Command;
    use tracing::debug;
    use which::which;

    pub const BINARY_ENV: &str = "MD2DOC_MERMAID_BIN";

    /// Grey print theme, matching the document palette.
    const MERMAID_CONFIG: &str = r##"{
  "theme": "base",
  "themeVariables": {
    "fontFamily": "\"Microsoft JhengHei\", \"Heiti TC\", sans-serif",
    "fontSize": "16px",
    "primaryColor": "#F9F9F9",
    "primaryTextColor": "#000000",
    "primaryBorderColor": "#333333",
    "lineColor": "#333333",
    "secondaryColor": "#EEEEEE",
    "tertiaryColor": "#FFFFFF"
  },
  "flowchart": { "useMaxWidth": false, "htmlLabels": true }
}
"##;

    /// Renders through the `mmdc` command-line tool.
    #[derive(Debug, Clone)]
    pub struct MermaidCli {
        program: String,
    }

    impl MermaidCli {
        pub fn new(program: &str) -> Self {
            MermaidCli {
                program: program.to_string(),
            }
        }

        fn resolve_binary(&self) -> Result<PathBuf> {
            if let Some(path) = env::var_os(BINARY_ENV) {
                if !path.is_empty() {
                    return Ok(PathBuf::from(path));
                }
            }
            which(&self.program).map_err(|_| {
                ExportError::Diagram(format!(
                    "Unable to locate '{}'. Set {BINARY_ENV} to override the detection.",
                    self.program
                ))
            })
        }
    }

    impl Default for MermaidCli {
        fn default() -> Self {
            Self::new("mmdc")
        }
    }

    #[async_trait]
    impl DiagramRenderer for MermaidCli {
        async fn render_svg(&self, source: &str) -> Result<String> {
            let binary = self.resolve_binary()?;
            let dir = tempdir()?;
            let input = dir.path().join("diagram.mmd");
            let output = dir.path().join("diagram.svg");
            let config = dir.path().join("config.json");
            tokio::fs::write(&input, source).await?;
            tokio::fs::write(&config, MERMAID_CONFIG).await?;

            debug!(binary = %binary.display(), "rendering diagram");
            let result = Command::new(&binary)
                .arg("-i")
                .arg(&input)
                .arg("-o")
                .arg(&output)
                .arg("-c")
                .arg(&config)
                .arg("-b")
                .arg("white")
                .output()
                .await
                .map_err(|e| {
                    ExportError::Diagram(format!(
                        "Failed to launch {} ({e})",
                        binary.display()
                    ))
                })?;

            if !result.status.success() {
                let stderr = String::from_utf8_lossy(&result.stderr);
                return Err(ExportError::Diagram(format!(
                    "{} exited with {}: {}",
                    binary.display(),
                    result.status,
                    stderr.trim()
                )));
            }

            tokio::fs::read_to_string(&output)
                .await
                .map_err(|e| ExportError::Diagram(format!("No SVG produced: {e}")))
        }
    }
}

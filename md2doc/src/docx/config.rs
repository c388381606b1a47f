//! Generator configuration.

use super::nodes::PageSetup;
use super::theme::layout;

pub const DEFAULT_WIDTH_CM: f64 = 17.0;
pub const DEFAULT_HEIGHT_CM: f64 = 23.0;
pub const DEFAULT_TOC_TITLE: &str = "目 錄";

/// Diagram rasterization settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramSettings {
    /// Renders allowed in flight at once.
    pub concurrency: usize,
    /// Widest display size in pixels; taller images keep their aspect.
    pub max_width_px: u32,
    /// Oversampling factor for the bitmap.
    pub scale: u32,
    /// Program used by the command-line renderer.
    pub renderer: String,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        DiagramSettings {
            concurrency: 2,
            max_width_px: 550,
            scale: 3,
            renderer: "mmdc".to_string(),
        }
    }
}

/// Everything the generator reads besides the blocks themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxConfig {
    pub width_cm: f64,
    pub height_cm: f64,
    /// Default line-number visibility for code blocks without a directive.
    pub show_line_numbers: bool,
    /// Append a QR image after each link.
    pub qr_codes: bool,
    pub toc_title: String,
    pub diagram: DiagramSettings,
}

impl Default for DocxConfig {
    fn default() -> Self {
        DocxConfig {
            width_cm: DEFAULT_WIDTH_CM,
            height_cm: DEFAULT_HEIGHT_CM,
            show_line_numbers: true,
            qr_codes: true,
            toc_title: DEFAULT_TOC_TITLE.to_string(),
            diagram: DiagramSettings::default(),
        }
    }
}

impl DocxConfig {
    pub fn page(&self) -> PageSetup {
        PageSetup {
            width: cm_to_twips(self.width_cm),
            height: cm_to_twips(self.height_cm),
            margin: layout::MARGIN,
        }
    }

    pub fn content_width(&self) -> u32 {
        self.page().content_width()
    }
}

pub fn cm_to_twips(cm: f64) -> u32 {
    (cm.max(0.0) * layout::TWIPS_PER_CM).round() as u32
}

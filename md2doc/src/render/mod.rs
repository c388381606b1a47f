//! Rich-content collaborators: diagram rendering, rasterization, QR codes and
//! the image lookup.
//!
//! The generator never talks to these directly; builders reach them through a
//! [`RenderServices`] bundle so tests can swap in stubs.

pub mod diagram;
pub mod images;
pub mod qr;
pub mod raster;

pub use diagram::{DiagramRenderer, NoDiagramRenderer};
#[cfg(feature = "native-export")]
pub use diagram::MermaidCli;
pub use images::{ImageRegistry, ImageStore};
pub use qr::{QrCodeEncoder, QrEncoder};

use crate::docx::config::DocxConfig;
use crate::docx::queue::{RenderQueue, DEFAULT_CONCURRENCY};
use std::sync::Arc;

/// A PNG bitmap and its pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Collaborators shared by the builders for one export.
#[derive(Clone)]
pub struct RenderServices {
    pub diagrams: Arc<dyn DiagramRenderer>,
    pub qr: Arc<dyn QrEncoder>,
    pub images: Arc<dyn ImageStore>,
    pub queue: RenderQueue,
}

impl RenderServices {
    /// Default collaborators tuned by `config`.
    pub fn for_config(config: &DocxConfig) -> Self {
        let queue = if config.diagram.concurrency == DEFAULT_CONCURRENCY {
            RenderQueue::shared()
        } else {
            RenderQueue::new(config.diagram.concurrency)
        };
        RenderServices {
            diagrams: default_renderer(config),
            qr: Arc::new(QrCodeEncoder::default()),
            images: Arc::new(ImageRegistry::new()),
            queue,
        }
    }

    pub fn with_diagrams<R: DiagramRenderer + 'static>(mut self, renderer: R) -> Self {
        self.diagrams = Arc::new(renderer);
        self
    }

    pub fn with_qr<Q: QrEncoder + 'static>(mut self, encoder: Q) -> Self {
        self.qr = Arc::new(encoder);
        self
    }

    pub fn with_images<S: ImageStore + 'static>(mut self, store: S) -> Self {
        self.images = Arc::new(store);
        self
    }

    pub fn with_queue(mut self, queue: RenderQueue) -> Self {
        self.queue = queue;
        self
    }
}

impl Default for RenderServices {
    fn default() -> Self {
        Self::for_config(&DocxConfig::default())
    }
}

#[cfg(feature = "native-export")]
fn default_renderer(config: &DocxConfig) -> Arc<dyn DiagramRenderer> {
    Arc::new(MermaidCli::new(&config.diagram.renderer))
}

#[cfg(not(feature = "native-export"))]
fn default_renderer(_config: &DocxConfig) -> Arc<dyn DiagramRenderer> {
    Arc::new(NoDiagramRenderer)
}

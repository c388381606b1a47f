//! Image lookup for `![alt](src)` segments.
//!
//! Sources are either identifiers registered up front (written bare or as
//! `img:<id>`) or `data:` URLs carrying a base64 payload.

use super::raster::fit_to_width;
use super::EncodedImage;
use crate::error::{ExportError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;
use std::collections::HashMap;
use std::io::Cursor;

const ID_PREFIX: &str = "img:";

/// Maps an image source to raw image bytes.
pub trait ImageStore: Send + Sync {
    fn lookup(&self, src: &str) -> Option<Vec<u8>>;
}

/// In-memory image store keyed by short identifiers.
#[derive(Debug, Clone, Default)]
pub struct ImageRegistry {
    images: HashMap<String, Vec<u8>>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>, bytes: Vec<u8>) {
        let id = id.into();
        let id = id.strip_prefix(ID_PREFIX).map(str::to_string).unwrap_or(id);
        self.images.insert(id, bytes);
    }

    /// Register the payload of a base64 `data:` URL under `id`.
    pub fn register_data_url(&mut self, id: impl Into<String>, url: &str) -> Result<()> {
        let bytes = decode_data_url(url)?;
        self.register(id, bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageStore for ImageRegistry {
    fn lookup(&self, src: &str) -> Option<Vec<u8>> {
        let src = src.trim();
        if src.starts_with("data:") {
            return decode_data_url(src).ok();
        }
        let id = src.strip_prefix(ID_PREFIX).unwrap_or(src);
        self.images.get(id).cloned()
    }
}

/// Payload of `data:<mime>;base64,<payload>`.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ExportError::Image("not a data URL".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ExportError::Image("data URL has no payload".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(ExportError::Image(
            "only base64 data URLs are supported".to_string(),
        ));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| ExportError::Image(format!("invalid base64 payload: {e}")))
}

/// Decode any supported bitmap and re-encode it as PNG.
pub fn to_png(bytes: &[u8]) -> Result<EncodedImage> {
    let decoded = image::load_from_memory(bytes).map_err(|e| ExportError::Image(e.to_string()))?;
    let (width, height) = (decoded.width(), decoded.height());
    let mut out = Cursor::new(Vec::new());
    decoded
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| ExportError::Image(e.to_string()))?;
    Ok(EncodedImage {
        png: out.into_inner(),
        width,
        height,
    })
}

/// Display size for an embedded picture, capped at `max_width` pixels.
pub fn display_size(image: &EncodedImage, max_width: u32) -> (u32, u32) {
    fit_to_width(f64::from(image.width), f64::from(image.height), max_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::raster::encode_rgba;

    fn tiny_png() -> Vec<u8> {
        encode_rgba(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap()
    }

    #[test]
    fn lookup_accepts_bare_and_prefixed_ids() {
        let mut registry = ImageRegistry::new();
        registry.register("img:abc", vec![1, 2, 3]);
        assert_eq!(registry.lookup("abc"), Some(vec![1, 2, 3]));
        assert_eq!(registry.lookup("img:abc"), Some(vec![1, 2, 3]));
        assert_eq!(registry.lookup("img:missing"), None);
    }

    #[test]
    fn lookup_decodes_data_urls() {
        let registry = ImageRegistry::new();
        let url = format!("data:image/png;base64,{}", STANDARD.encode(tiny_png()));
        assert_eq!(registry.lookup(&url), Some(tiny_png()));
    }

    #[test]
    fn non_base64_data_url_is_rejected() {
        assert!(decode_data_url("data:text/plain,hello").is_err());
        assert!(decode_data_url("https://x").is_err());
    }

    #[test]
    fn to_png_reads_dimensions() {
        let image = to_png(&tiny_png()).unwrap();
        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(display_size(&image, 550), (2, 1));
    }
}

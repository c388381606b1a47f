//! Link QR codes.

use super::raster::encode_rgba;
use super::EncodedImage;
use crate::error::{ExportError, Result};
use async_trait::async_trait;
use qrcode::{Color, QrCode};

/// Encodes a URL into a small bitmap.
#[async_trait]
pub trait QrEncoder: Send + Sync {
    async fn encode(&self, url: &str) -> Result<EncodedImage>;
}

/// QR encoder backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy)]
pub struct QrCodeEncoder {
    /// Pixels per module.
    pub module_px: u32,
    /// Quiet zone width in modules.
    pub quiet_zone: u32,
}

impl Default for QrCodeEncoder {
    fn default() -> Self {
        QrCodeEncoder {
            module_px: 4,
            quiet_zone: 2,
        }
    }
}

impl QrCodeEncoder {
    pub fn encode_blocking(&self, url: &str) -> Result<EncodedImage> {
        url::Url::parse(url).map_err(|e| ExportError::Qr(format!("'{url}' is not a URL: {e}")))?;
        let code = QrCode::new(url.as_bytes()).map_err(|e| ExportError::Qr(e.to_string()))?;
        let modules = code.width() as u32;
        let colors = code.to_colors();

        let module_px = self.module_px.max(1);
        let side = (modules + self.quiet_zone * 2) * module_px;
        let mut pixels = Vec::with_capacity((side * side * 4) as usize);
        for y in 0..side {
            for x in 0..side {
                let dark = module_at(x, y, module_px, self.quiet_zone, modules)
                    .map(|i| colors[i] == Color::Dark)
                    .unwrap_or(false);
                let value = if dark { 0 } else { 255 };
                pixels.extend_from_slice(&[value, value, value, 255]);
            }
        }

        Ok(EncodedImage {
            png: encode_rgba(side, side, pixels)?,
            width: side,
            height: side,
        })
    }
}

/// Index into the module grid for pixel `(x, y)`, or `None` in the quiet zone.
fn module_at(x: u32, y: u32, module_px: u32, quiet: u32, modules: u32) -> Option<usize> {
    let mx = (x / module_px).checked_sub(quiet)?;
    let my = (y / module_px).checked_sub(quiet)?;
    (mx < modules && my < modules).then(|| (my * modules + mx) as usize)
}

#[async_trait]
impl QrEncoder for QrCodeEncoder {
    async fn encode(&self, url: &str) -> Result<EncodedImage> {
        let encoder = *self;
        let url = url.to_string();
        tokio::task::spawn_blocking(move || encoder.encode_blocking(&url))
            .await
            .map_err(|e| ExportError::Qr(format!("encoder task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_square_png() {
        let image = QrCodeEncoder::default()
            .encode_blocking("https://example.com/docs")
            .unwrap();
        assert_eq!(image.width, image.height);
        // Symbol sides are 21 + 4k modules; two quiet modules on each side.
        let modules = image.width / 4 - 4;
        assert_eq!(image.width % 4, 0);
        assert_eq!((modules - 21) % 4, 0);
        assert!(image.png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn rejects_non_urls() {
        let err = QrCodeEncoder::default().encode_blocking("not a url").unwrap_err();
        assert!(matches!(err, ExportError::Qr(_)));
    }

    #[tokio::test]
    async fn async_encode_matches_blocking() {
        let encoder = QrCodeEncoder::default();
        let url = "https://example.com/a?b=c";
        let image = encoder.encode(url).await.unwrap();
        assert_eq!(image, encoder.encode_blocking(url).unwrap());

        let err = encoder.encode("nope").await.unwrap_err();
        assert!(matches!(err, ExportError::Qr(_)));
    }

    #[test]
    fn quiet_zone_has_no_modules() {
        assert_eq!(module_at(0, 0, 4, 2, 21), None);
        assert_eq!(module_at(8, 8, 4, 2, 21), Some(0));
        assert_eq!(module_at(4 * 23, 8, 4, 2, 21), None);
    }
}

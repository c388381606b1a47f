//! SVG measurement, rasterization and display sizing.

use super::EncodedImage;
use crate::error::{ExportError, Result};
use image::{ImageFormat, RgbaImage};
use once_cell::sync::Lazy;
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg::{fontdb, Options, Tree};
use std::io::Cursor;
use std::sync::Arc;

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Largest canvas edge we are willing to allocate.
const MAX_CANVAS_EDGE: u32 = 16_384;

static FONTS: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

/// Intrinsic size of an SVG: `width`/`height`, else the `viewBox`, else 800x600.
pub fn svg_dimensions(svg: &str) -> (f64, f64) {
    let Ok(doc) = roxmltree::Document::parse(svg) else {
        return FALLBACK_SIZE;
    };
    let root = doc.root_element();
    let width = root.attribute("width").and_then(parse_length);
    let height = root.attribute("height").and_then(parse_length);
    if let (Some(w), Some(h)) = (width, height) {
        return (w, h);
    }

    root.attribute("viewBox")
        .and_then(parse_view_box)
        .unwrap_or(FALLBACK_SIZE)
}

/// Absolute length in user units. Percentages do not count.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.ends_with('%') {
        return None;
    }
    let number = value.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    number.parse::<f64>().ok().filter(|n| *n > 0.0)
}

fn parse_view_box(value: &str) -> Option<(f64, f64)> {
    let parts: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [_, _, w, h] if *w > 0.0 && *h > 0.0 => Some((*w, *h)),
        _ => None,
    }
}

/// Canvas size for an intrinsic size rendered at `scale`.
///
/// Both edges share one factor, shrunk when either edge would exceed
/// `MAX_CANVAS_EDGE`. Edges are rounded up to even pixel counts.
pub fn canvas_size(width: f64, height: f64, scale: u32) -> (u32, u32) {
    let scale = f64::from(scale.max(1));
    let limit = f64::from(MAX_CANVAS_EDGE);
    let factor = scale * (limit / (width * scale)).min(limit / (height * scale)).min(1.0);
    (even_edge(width * factor), even_edge(height * factor))
}

fn even_edge(length: f64) -> u32 {
    let edge = length.ceil().max(2.0) as u32;
    let edge = if edge % 2 == 0 { edge } else { edge + 1 };
    edge.min(MAX_CANVAS_EDGE)
}

/// Render an SVG onto a white canvas `scale` times its intrinsic size.
pub fn rasterize(svg: &str, scale: u32) -> Result<EncodedImage> {
    let (width, height) = svg_dimensions(svg);
    let (canvas_w, canvas_h) = canvas_size(width, height, scale);

    let mut options = Options::default();
    options.fontdb = FONTS.clone();
    let tree = Tree::from_str(svg, &options)
        .map_err(|e| ExportError::Diagram(format!("Invalid SVG: {e}")))?;

    let mut pixmap = Pixmap::new(canvas_w, canvas_h).ok_or_else(|| {
        ExportError::Diagram(format!("Cannot allocate a {canvas_w}x{canvas_h} canvas"))
    })?;
    pixmap.fill(Color::WHITE);

    let size = tree.size();
    let transform = Transform::from_scale(
        canvas_w as f32 / size.width(),
        canvas_h as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // Opaque background, so premultiplied and straight alpha agree.
    let png = encode_rgba(canvas_w, canvas_h, pixmap.take())?;
    Ok(EncodedImage {
        png,
        width: canvas_w,
        height: canvas_h,
    })
}

pub(crate) fn encode_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Vec<u8>> {
    let image = RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| ExportError::Image("pixel buffer does not match its size".to_string()))?;
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| ExportError::Image(e.to_string()))?;
    Ok(out.into_inner())
}

/// Scale `(width, height)` down to `max_width`, keeping the aspect ratio.
pub fn fit_to_width(width: f64, height: f64, max_width: u32) -> (u32, u32) {
    let max = f64::from(max_width);
    let (w, h) = if width > max && width > 0.0 {
        (max, height * max / width)
    } else {
        (width, height)
    };
    (w.round().max(1.0) as u32, h.round().max(1.0) as u32)
}

/// Display size for an SVG of intrinsic `size`, capped at `max_width`.
pub fn display_size(size: (f64, f64), max_width: u32) -> (u32, u32) {
    fit_to_width(size.0, size.1, max_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_prefer_width_and_height() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="120px" height="80" viewBox="0 0 10 10"/>"#;
        assert_eq!(svg_dimensions(svg), (120.0, 80.0));
    }

    #[test]
    fn dimensions_fall_back_to_view_box() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" viewBox="0,0 300.5 200"/>"#;
        assert_eq!(svg_dimensions(svg), (300.5, 200.0));
    }

    #[test]
    fn dimensions_fall_back_to_default() {
        assert_eq!(svg_dimensions("not xml"), (800.0, 600.0));
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;
        assert_eq!(svg_dimensions(svg), (800.0, 600.0));
    }

    #[test]
    fn canvas_edges_are_even() {
        assert_eq!(canvas_size(100.0, 100.5, 3), (300, 302));
        assert_eq!(canvas_size(33.4, 1.0, 3), (102, 4));
    }

    #[test]
    fn oversized_canvas_shrinks_both_edges() {
        let (w, h) = canvas_size(10_000.0, 100.0, 3);
        assert_eq!((w, h), (MAX_CANVAS_EDGE, 164));
        assert_eq!(canvas_size(100.0, 10_000.0, 3), (164, MAX_CANVAS_EDGE));
    }

    #[test]
    fn wide_diagram_keeps_aspect_ratio() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10000" height="100"/>"#;
        assert_eq!(display_size(svg_dimensions(svg), 550), (550, 6));
    }

    #[test]
    fn fit_keeps_aspect_ratio() {
        assert_eq!(fit_to_width(1100.0, 400.0, 550), (550, 200));
        assert_eq!(fit_to_width(300.0, 100.0, 550), (300, 100));
    }

    #[test]
    fn rasterize_paints_scaled_canvas() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="black"/></svg>"#;
        let image = rasterize(svg, 3).unwrap();
        assert_eq!((image.width, image.height), (60, 30));
        assert!(image.png.starts_with(b"\x89PNG"));
        assert_eq!(display_size(svg_dimensions(svg), 550), (20, 10));
    }
}

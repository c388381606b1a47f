//! Inline segments to runs.

use crate::docx::nodes::{Hyperlink, ImageRun, Inline, RunStyle, TextRun};
use crate::docx::registry::BuildContext;
use crate::docx::theme::{colors, layout, sizes};
use crate::inline::{tokenize, Segment, SegmentKind};
use crate::render::images;
use tracing::warn;

/// Run style for a segment kind.
pub fn run_style(kind: SegmentKind) -> RunStyle {
    match kind {
        SegmentKind::Bold | SegmentKind::Book => RunStyle::bold(),
        SegmentKind::Italic => RunStyle {
            italic: true,
            color: Some(colors::PRIMARY_BLUE.to_string()),
            ..RunStyle::default()
        },
        SegmentKind::Underline | SegmentKind::Link => RunStyle {
            underline: Some(colors::LINK_BLUE.to_string()),
            color: Some(colors::LINK_BLUE.to_string()),
            ..RunStyle::default()
        },
        SegmentKind::Code => RunStyle::default().shaded(colors::BG_CODE),
        SegmentKind::UiButton => RunStyle::bold().shaded(colors::BG_BUTTON),
        SegmentKind::Shortcut => RunStyle::default()
            .size(sizes::SHORTCUT)
            .shaded(colors::BG_SHORTCUT),
        SegmentKind::Text | SegmentKind::Image => RunStyle::default(),
    }
}

/// Tokenize `text` and build its runs. Never fails: broken links and images
/// degrade to text.
pub async fn inline_runs(text: &str, ctx: &BuildContext<'_>) -> Vec<Inline> {
    let mut runs = Vec::new();
    for segment in tokenize(text) {
        match segment.kind {
            SegmentKind::Link => link_runs(segment, ctx, &mut runs).await,
            SegmentKind::Image => runs.push(image_run(segment, ctx)),
            kind => runs.push(TextRun::styled(segment.content, run_style(kind)).into()),
        }
    }
    runs
}

/// Runs with an explicit size applied on top of the inline styles.
pub async fn sized_runs(text: &str, size: u32, ctx: &BuildContext<'_>) -> Vec<Inline> {
    let mut runs = inline_runs(text, ctx).await;
    for run in &mut runs {
        if let Inline::Text(run) = run {
            run.style.size.get_or_insert(size);
        }
    }
    runs
}

async fn link_runs(segment: Segment, ctx: &BuildContext<'_>, runs: &mut Vec<Inline>) {
    let text = TextRun::styled(segment.content, run_style(SegmentKind::Link));
    let Some(url) = segment.url.filter(|u| !u.is_empty()) else {
        runs.push(text.into());
        return;
    };

    runs.push(Inline::Hyperlink(Hyperlink {
        url: url.clone(),
        runs: vec![text],
    }));

    if !ctx.config.qr_codes {
        return;
    }
    match ctx.services.qr.encode(&url).await {
        Ok(qr) => runs.push(Inline::Image(ImageRun {
            png: qr.png,
            width_px: layout::QR_SIZE_PX,
            height_px: layout::QR_SIZE_PX,
            description: format!("QR code for {url}"),
        })),
        Err(err) => warn!(%url, error = %err, "skipping link QR code"),
    }
}

fn image_run(segment: Segment, ctx: &BuildContext<'_>) -> Inline {
    let src = segment.url.unwrap_or_default();
    let placeholder = || -> Inline { TextRun::plain(format!("[Image: {}]", segment.content)).into() };

    let Some(bytes) = ctx.services.images.lookup(&src) else {
        warn!(%src, "image not found");
        return placeholder();
    };
    match images::to_png(&bytes) {
        Ok(image) => {
            let (width_px, height_px) =
                images::display_size(&image, ctx.config.diagram.max_width_px);
            Inline::Image(ImageRun {
                png: image.png,
                width_px,
                height_px,
                description: segment.content.clone(),
            })
        }
        Err(err) => {
            warn!(%src, error = %err, "image could not be decoded");
            placeholder()
        }
    }
}

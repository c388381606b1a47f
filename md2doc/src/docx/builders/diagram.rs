//! Diagram code blocks rendered to embedded bitmaps.

use crate::docx::nodes::{Alignment, DocNode, ImageRun, Inline, Paragraph, RunStyle, TextRun};
use crate::docx::registry::{BlockBuilder, BuildContext};
use crate::docx::theme::{colors, sizes, spacing};
use crate::error::{ExportError, Result};
use crate::model::Block;
use crate::render::raster;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Renders the block's source through the diagram renderer, rasterizes the SVG
/// and embeds it centered. Any failure becomes a marked error paragraph.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiagramBuilder;

impl DiagramBuilder {
    async fn render(&self, source: &str, ctx: &BuildContext<'_>) -> Result<Paragraph> {
        let svg = ctx.services.diagrams.render_svg(source).await?;
        let scale = ctx.config.diagram.scale;
        let intrinsic = raster::svg_dimensions(&svg);
        let image = tokio::task::spawn_blocking(move || raster::rasterize(&svg, scale))
            .await
            .map_err(|e| ExportError::Diagram(format!("rasterizer task failed: {e}")))??;
        let (width_px, height_px) =
            raster::display_size(intrinsic, ctx.config.diagram.max_width_px);
        debug!(width_px, height_px, "diagram rendered");

        Ok(Paragraph::new(vec![Inline::Image(ImageRun {
            png: image.png,
            width_px,
            height_px,
            description: "diagram".to_string(),
        })])
        .align(Alignment::Center)
        .spacing(spacing::DIAGRAM))
    }
}

/// Paragraph shown in place of a diagram that failed to render.
pub fn error_paragraph() -> Paragraph {
    let mark = TextRun::styled("[Mermaid Chart Error]", RunStyle::bold().color(colors::ERROR_RED));
    let hint = TextRun::styled(
        " (Syntax might be invalid)",
        RunStyle {
            italic: true,
            size: Some(sizes::HINT),
            color: Some(colors::HINT_GREY.to_string()),
            ..RunStyle::default()
        },
    );
    Paragraph::new(vec![mark.into(), hint.into()]).spacing(spacing::DIAGRAM_ERROR)
}

#[async_trait]
impl BlockBuilder for DiagramBuilder {
    async fn build(&self, block: &Block, ctx: &BuildContext<'_>) -> Result<Vec<DocNode>> {
        let rendered = ctx
            .services
            .queue
            .submit(self.render(&block.content, ctx))
            .await
            .and_then(|result| result);

        let paragraph = rendered.unwrap_or_else(|err| {
            warn!(error = %err, "diagram failed to render");
            error_paragraph()
        });
        Ok(vec![paragraph.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::builders::test_support::{config, paragraph, services};
    use crate::render::DiagramRenderer;

    struct FixedSvg(&'static str);

    #[async_trait]
    impl DiagramRenderer for FixedSvg {
        async fn render_svg(&self, _source: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn wide_diagrams_are_scaled_to_max_width() {
        let config = config();
        let services = services().with_diagrams(FixedSvg(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1100" height="400"></svg>"#,
        ));
        let ctx = BuildContext::new(&config, &services);
        let nodes = DiagramBuilder
            .build(&Block::code("graph", "mermaid", None), &ctx)
            .await
            .unwrap();

        let figure = paragraph(&nodes[0]);
        assert_eq!(figure.alignment, Some(Alignment::Center));
        match &figure.children[0] {
            Inline::Image(image) => {
                assert_eq!((image.width_px, image.height_px), (550, 200));
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn canvas_limit_does_not_distort_display_size() {
        let config = config();
        let services = services().with_diagrams(FixedSvg(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10000" height="100"></svg>"#,
        ));
        let ctx = BuildContext::new(&config, &services);
        let nodes = DiagramBuilder
            .build(&Block::code("graph", "mermaid", None), &ctx)
            .await
            .unwrap();

        match &paragraph(&nodes[0]).children[0] {
            Inline::Image(image) => {
                assert_eq!((image.width_px, image.height_px), (550, 6));
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_svg_becomes_error_paragraph() {
        let config = config();
        let services = services().with_diagrams(FixedSvg("<not-svg"));
        let ctx = BuildContext::new(&config, &services);
        let nodes = DiagramBuilder
            .build(&Block::code("graph", "mermaid", None), &ctx)
            .await
            .unwrap();
        assert_eq!(
            paragraph(&nodes[0]).text(),
            "[Mermaid Chart Error] (Syntax might be invalid)"
        );
    }
}

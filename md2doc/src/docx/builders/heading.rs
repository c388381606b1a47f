use super::inline::inline_runs;
use crate::docx::nodes::{Border, BorderStyle, Borders, DocNode, Paragraph};
use crate::docx::registry::{BlockBuilder, BuildContext};
use crate::docx::theme::{border, colors, spacing};
use crate::error::{ExportError, Result};
use crate::model::Block;
use async_trait::async_trait;

/// Levels 1 to 3. Level 1 carries a heavy bottom rule.
pub struct HeadingBuilder;

#[async_trait]
impl BlockBuilder for HeadingBuilder {
    async fn build(&self, block: &Block, ctx: &BuildContext<'_>) -> Result<Vec<DocNode>> {
        let level = block
            .kind
            .heading_level()
            .ok_or_else(|| ExportError::build(block.kind, "not a heading"))?;

        let mut paragraph = Paragraph::new(inline_runs(&block.content, ctx).await);
        paragraph.heading = Some(level);
        paragraph = match level {
            1 => paragraph.spacing(spacing::H1).borders(Borders::bottom(Border::new(
                BorderStyle::Single,
                border::H1_BOTTOM,
                colors::BLACK,
                8,
            ))),
            2 => paragraph.spacing(spacing::H2),
            _ => paragraph.spacing(spacing::H3),
        };
        Ok(vec![paragraph.into()])
    }
}

use super::inline::inline_runs;
use crate::docx::nodes::{DocNode, Paragraph};
use crate::docx::registry::{BlockBuilder, BuildContext};
use crate::docx::theme::spacing;
use crate::error::Result;
use crate::model::Block;
use async_trait::async_trait;

/// Body text. Line breaks inside the block stay line breaks.
pub struct ParagraphBuilder;

#[async_trait]
impl BlockBuilder for ParagraphBuilder {
    async fn build(&self, block: &Block, ctx: &BuildContext<'_>) -> Result<Vec<DocNode>> {
        let runs = inline_runs(&block.content, ctx).await;
        Ok(vec![Paragraph::new(runs).spacing(spacing::PARAGRAPH).into()])
    }
}

use super::inline::inline_runs;
use crate::docx::nodes::{DocNode, ListNumbering, Paragraph};
use crate::docx::registry::{BlockBuilder, BuildContext};
use crate::docx::theme::spacing;
use crate::error::Result;
use crate::model::{Block, BlockKind};
use async_trait::async_trait;

/// One list item. Numbered items use the instance the generator assigned to
/// their run of siblings.
pub struct ListItemBuilder;

#[async_trait]
impl BlockBuilder for ListItemBuilder {
    async fn build(&self, block: &Block, ctx: &BuildContext<'_>) -> Result<Vec<DocNode>> {
        let numbering = match block.kind {
            BlockKind::NumberedItem => ListNumbering::Numbered(ctx.list_instance.unwrap_or(1)),
            _ => ListNumbering::Bullet,
        };
        let mut paragraph =
            Paragraph::new(inline_runs(&block.content, ctx).await).spacing(spacing::LIST);
        paragraph.numbering = Some(numbering);
        Ok(vec![paragraph.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::builders::test_support::{config, paragraph, services};

    #[tokio::test]
    async fn numbered_items_use_context_instance() {
        let config = config();
        let services = services();
        let mut ctx = BuildContext::new(&config, &services);
        ctx.list_instance = Some(3);

        let nodes = ListItemBuilder
            .build(&Block::new(BlockKind::NumberedItem, "step"), &ctx)
            .await
            .unwrap();
        assert_eq!(paragraph(&nodes[0]).numbering, Some(ListNumbering::Numbered(3)));

        let nodes = ListItemBuilder
            .build(&Block::new(BlockKind::BulletItem, "dot"), &ctx)
            .await
            .unwrap();
        assert_eq!(paragraph(&nodes[0]).numbering, Some(ListNumbering::Bullet));
    }
}

use crate::docx::nodes::{Border, BorderStyle, Borders, DocNode, Paragraph};
use crate::docx::registry::{BlockBuilder, BuildContext};
use crate::docx::theme::{border, colors, spacing};
use crate::error::Result;
use crate::model::Block;
use async_trait::async_trait;

/// Horizontal rule: an empty paragraph with a bottom border.
pub struct RuleBuilder;

#[async_trait]
impl BlockBuilder for RuleBuilder {
    async fn build(&self, _block: &Block, _ctx: &BuildContext<'_>) -> Result<Vec<DocNode>> {
        let rule = Border::new(BorderStyle::Single, border::HR, colors::BLACK, 1);
        Ok(vec![Paragraph::default()
            .borders(Borders::bottom(rule))
            .spacing(spacing::HR)
            .into()])
    }
}

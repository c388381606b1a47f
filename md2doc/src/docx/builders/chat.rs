use super::inline::inline_runs;
use crate::docx::nodes::{
    Alignment, Border, BorderStyle, Borders, DocNode, Inline, Paragraph, RunStyle, TextRun,
};
use crate::docx::registry::{BlockBuilder, BuildContext};
use crate::docx::theme::{border, colors, indent, sizes, spacing};
use crate::error::Result;
use crate::model::{Block, ChatAlignment};
use async_trait::async_trait;

/// Dialogue bubble. Alignment picks the frame:
///
/// | alignment | border | fill        | indent     |
/// |-----------|--------|-------------|------------|
/// | left      | dotted | AI grey     | right side |
/// | center    | double | shortcut    | both sides |
/// | right     | dashed | white       | left side  |
pub struct ChatBuilder;

struct Frame {
    style: BorderStyle,
    fill: &'static str,
    indent: (u32, u32),
    alignment: Alignment,
}

fn frame(alignment: ChatAlignment) -> Frame {
    match alignment {
        ChatAlignment::Right => Frame {
            style: BorderStyle::Dashed,
            fill: colors::WHITE,
            indent: (indent::CHAT, 0),
            alignment: Alignment::Right,
        },
        ChatAlignment::Center => Frame {
            style: BorderStyle::Double,
            fill: colors::BG_SHORTCUT,
            indent: (indent::CHAT_CENTER, indent::CHAT_CENTER),
            alignment: Alignment::Center,
        },
        ChatAlignment::Left => Frame {
            style: BorderStyle::Dotted,
            fill: colors::BG_AI_CHAT,
            indent: (0, indent::CHAT),
            alignment: Alignment::Left,
        },
    }
}

#[async_trait]
impl BlockBuilder for ChatBuilder {
    async fn build(&self, block: &Block, ctx: &BuildContext<'_>) -> Result<Vec<DocNode>> {
        let frame = frame(block.alignment.unwrap_or_default());
        let role = block.role.as_deref().unwrap_or_default();

        let mut children: Vec<Inline> = vec![
            TextRun::styled(format!("{role}:"), RunStyle::bold().size(sizes::LABEL)).into(),
            Inline::Break,
        ];
        children.extend(inline_runs(&block.content, ctx).await);

        let bubble = Paragraph::new(children)
            .borders(Borders::all(Border::new(
                frame.style,
                border::CHAT,
                colors::CHAT_BORDER,
                10,
            )))
            .indent(frame.indent.0, frame.indent.1)
            .align(frame.alignment)
            .spacing(spacing::CHAT)
            .shading(frame.fill);

        Ok(vec![bubble.into(), Paragraph::spacer().into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::builders::test_support::{config, paragraph, services};
    use rstest::rstest;

    #[rstest]
    #[case(ChatAlignment::Left, BorderStyle::Dotted, Alignment::Left)]
    #[case(ChatAlignment::Center, BorderStyle::Double, Alignment::Center)]
    #[case(ChatAlignment::Right, BorderStyle::Dashed, Alignment::Right)]
    #[tokio::test]
    async fn alignment_selects_frame(
        #[case] alignment: ChatAlignment,
        #[case] style: BorderStyle,
        #[case] expected: Alignment,
    ) {
        let config = config();
        let services = services();
        let ctx = BuildContext::new(&config, &services);
        let nodes = ChatBuilder
            .build(&Block::chat("AI", alignment, "hello"), &ctx)
            .await
            .unwrap();

        assert_eq!(nodes.len(), 2);
        let bubble = paragraph(&nodes[0]);
        assert_eq!(bubble.alignment, Some(expected));
        let top = bubble.borders.as_ref().and_then(|b| b.top.as_ref()).unwrap();
        assert_eq!(top.style, style);
        assert_eq!(bubble.text(), "AI:\nhello");
        assert_eq!(paragraph(&nodes[1]), &Paragraph::spacer());
    }
}

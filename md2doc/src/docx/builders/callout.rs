use super::inline::inline_runs;
use crate::docx::nodes::{Border, BorderStyle, Borders, DocNode, Inline, Paragraph, RunStyle, TextRun};
use crate::docx::registry::{BlockBuilder, BuildContext};
use crate::docx::theme::{border, colors, indent, sizes, spacing};
use crate::error::Result;
use crate::model::{Block, BlockKind};
use async_trait::async_trait;

/// Tip, note and warning boxes. Each content line is tokenized on its own and
/// placed after a forced break.
pub struct CalloutBuilder;

struct Style {
    label: &'static str,
    border: BorderStyle,
    size: u32,
    colors: (&'static str, &'static str),
}

fn style(kind: BlockKind) -> Style {
    match kind {
        BlockKind::CalloutTip => Style {
            label: "TIP",
            border: BorderStyle::Single,
            size: border::CALLOUT_TIP,
            colors: colors::CALLOUT_TIP,
        },
        BlockKind::CalloutWarning => Style {
            label: "WARNING",
            border: BorderStyle::Single,
            size: border::CALLOUT_WARNING,
            colors: colors::CALLOUT_WARNING,
        },
        _ => Style {
            label: "NOTE",
            border: BorderStyle::Dashed,
            size: border::CALLOUT_NOTE,
            colors: colors::CALLOUT_NOTE,
        },
    }
}

#[async_trait]
impl BlockBuilder for CalloutBuilder {
    async fn build(&self, block: &Block, ctx: &BuildContext<'_>) -> Result<Vec<DocNode>> {
        let style = style(block.kind);
        let (border_color, fill) = style.colors;

        let mut children: Vec<Inline> = vec![TextRun::styled(
            format!("[ {} ]", style.label),
            RunStyle::bold().size(sizes::LABEL),
        )
        .into()];
        for line in block.content.split('\n') {
            children.push(Inline::Break);
            children.extend(inline_runs(line, ctx).await);
        }

        let edge = |space| Border::new(style.border, style.size, border_color, space);
        let borders = Borders {
            top: Some(edge(5)),
            bottom: Some(edge(5)),
            left: Some(edge(15)),
            right: Some(edge(15)),
        };

        let callout = Paragraph::new(children)
            .shading(fill)
            .borders(borders)
            .spacing(spacing::CALLOUT)
            .indent(indent::CALLOUT, indent::CALLOUT);
        Ok(vec![callout.into(), Paragraph::spacer().into()])
    }
}

//! Code blocks as fixed-layout tables.
//!
//! Every source line gets its own row so it can carry an independent line
//! number:
//!
//! ```text
//! +-----------------------------+
//! | rust                        |   language row (when declared)
//! +------+----------------------+
//! |      |                      |   120 twip padding row
//! |    1 | fn main() {          |
//! |    2 | }                    |
//! |      |                      |   120 twip padding row
//! +------+----------------------+
//! ```
//!
//! The number column is 600 twips wide and the code column takes the rest of
//! the text width. Without line numbers the table has a single column.

use super::diagram::DiagramBuilder;
use crate::docx::nodes::{
    Alignment, Border, BorderStyle, Borders, CellMargins, DocNode, Paragraph, RowHeight,
    RunStyle, Table, TableCell, TableRow, TableWidth, TextRun,
};
use crate::docx::registry::{BlockBuilder, BuildContext};
use crate::docx::theme::{border, colors, layout, sizes, spacing};
use crate::error::Result;
use crate::model::Block;
use async_trait::async_trait;

const MERMAID: &str = "mermaid";

const CELL_MARGINS: CellMargins = CellMargins {
    top: 0,
    bottom: 0,
    left: 100,
    right: 100,
};

#[derive(Default)]
pub struct CodeBlockBuilder {
    diagrams: DiagramBuilder,
}

impl CodeBlockBuilder {
    /// Line-number visibility: the fence directive, else the document default.
    pub fn shows_line_numbers(block: &Block, ctx: &BuildContext<'_>) -> bool {
        block
            .metadata
            .line_numbers
            .unwrap_or(ctx.config.show_line_numbers)
    }

    /// Column widths for a given text width.
    pub fn columns(content_width: u32, line_numbers: bool) -> Vec<u32> {
        if line_numbers {
            let number = layout::LINE_NUMBER_COLUMN.min(content_width);
            vec![number, content_width - number]
        } else {
            vec![content_width]
        }
    }

    fn table(block: &Block, ctx: &BuildContext<'_>) -> Table {
        let numbered = Self::shows_line_numbers(block, ctx);
        let content_width = ctx.config.content_width();
        let columns = Self::columns(content_width, numbered);
        let mut rows = Vec::new();

        let language = block.language_tag();
        if !language.is_empty() {
            let label = TextRun::styled(
                language,
                RunStyle::bold()
                    .size(sizes::LABEL)
                    .color(colors::HINT_GREY),
            );
            let mut cell = code_cell(Paragraph::new(vec![label.into()]), content_width);
            cell.span = columns.len() as u32;
            cell.shading = Some(colors::BG_BUTTON.to_string());
            rows.push(TableRow::new(vec![cell]));
        }

        rows.push(padding_row(&columns));
        for (index, line) in block.content.split('\n').enumerate() {
            let code = code_cell(
                Paragraph::new(vec![
                    TextRun::styled(line, RunStyle::default().size(sizes::CODE)).into(),
                ]),
                *columns.last().unwrap_or(&content_width),
            );
            let cells = if numbered {
                let number = TextRun::styled(
                    (index + 1).to_string(),
                    RunStyle::default()
                        .size(sizes::CODE)
                        .color(colors::LINE_NUMBER),
                );
                let number =
                    code_cell(Paragraph::new(vec![number.into()]).align(Alignment::Right), columns[0]);
                vec![number, code]
            } else {
                vec![code]
            };
            rows.push(TableRow::new(cells));
        }
        rows.push(padding_row(&columns));

        let mut table = Table::new(rows, TableWidth::Twips(content_width));
        table.columns = columns;
        table.fixed_layout = true;
        table.borders = Some(Borders::all(Border::new(
            BorderStyle::Single,
            border::CODE,
            colors::CODE_BORDER,
            0,
        )));
        table
    }
}

fn code_cell(paragraph: Paragraph, width: u32) -> TableCell {
    let mut cell = TableCell::new(vec![paragraph.spacing(spacing::NONE)]);
    cell.width = Some(TableWidth::Twips(width));
    cell.shading = Some(colors::BG_CODE.to_string());
    cell.margins = Some(CELL_MARGINS);
    cell
}

fn padding_row(columns: &[u32]) -> TableRow {
    let mut row = TableRow::new(
        columns
            .iter()
            .map(|width| code_cell(Paragraph::default(), *width))
            .collect(),
    );
    row.height = Some(RowHeight {
        value: layout::CODE_PADDING_ROW,
        exact: true,
    });
    row
}

#[async_trait]
impl BlockBuilder for CodeBlockBuilder {
    async fn build(&self, block: &Block, ctx: &BuildContext<'_>) -> Result<Vec<DocNode>> {
        if block.language_tag().eq_ignore_ascii_case(MERMAID) {
            return self.diagrams.build(block, ctx).await;
        }
        Ok(vec![
            Self::table(block, ctx).into(),
            Paragraph::spacer().into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::builders::test_support::{config, paragraph, services, table};
    use crate::docx::config::DocxConfig;
    use rstest::rstest;

    async fn build(block: Block, config: &DocxConfig) -> Vec<DocNode> {
        let services = services();
        let ctx = BuildContext::new(config, &services);
        CodeBlockBuilder::default().build(&block, &ctx).await.unwrap()
    }

    #[tokio::test]
    async fn one_row_per_line_between_padding() {
        let nodes = build(Block::code("fn main() {\n}", "rust", None), &config()).await;
        let grid = table(&nodes[0]);

        // language + padding + 2 lines + padding
        assert_eq!(grid.rows.len(), 5);
        assert_eq!(grid.columns, vec![600, 6759 - 600]);
        assert_eq!(grid.rows[0].cells[0].span, 2);
        assert_eq!(grid.rows[1].height.map(|h| h.value), Some(120));
        assert_eq!(grid.rows[2].cells[0].children[0].text(), "1");
        assert_eq!(grid.rows[3].cells[1].children[0].text(), "}");
        assert!(grid.fixed_layout);
        assert_eq!(paragraph(&nodes[1]), &Paragraph::spacer());
    }

    #[rstest]
    #[case(Some(false), true, 1)]
    #[case(None, false, 1)]
    #[case(Some(true), false, 2)]
    #[case(None, true, 2)]
    #[tokio::test]
    async fn directive_overrides_document_default(
        #[case] directive: Option<bool>,
        #[case] default: bool,
        #[case] columns: usize,
    ) {
        let config = DocxConfig {
            show_line_numbers: default,
            ..config()
        };
        let nodes = build(Block::code("x", "", directive), &config).await;
        let grid = table(&nodes[0]);
        assert_eq!(grid.columns.len(), columns);
        // no language row: padding + line + padding
        assert_eq!(grid.rows.len(), 3);
    }

    #[tokio::test]
    async fn mermaid_blocks_become_diagrams() {
        let nodes = build(Block::code("graph TD; A-->B", "Mermaid", None), &config()).await;
        assert_eq!(nodes.len(), 1);
        assert!(paragraph(&nodes[0]).text().starts_with("[Mermaid Chart Error]"));
    }

    #[test]
    fn leading_whitespace_survives() {
        let config = config();
        let services = services();
        let ctx = BuildContext::new(&config, &services);
        let grid = CodeBlockBuilder::table(&Block::code("    indented", "", None), &ctx);
        assert_eq!(grid.rows[1].cells[1].children[0].text(), "    indented");
    }
}

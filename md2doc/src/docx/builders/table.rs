use super::inline::inline_runs;
use crate::docx::nodes::{
    Border, BorderStyle, Borders, CellMargins, DocNode, Paragraph, Table, TableCell, TableRow,
    TableWidth,
};
use crate::docx::registry::{BlockBuilder, BuildContext};
use crate::docx::theme::{border, colors, layout, spacing};
use crate::error::{ExportError, Result};
use crate::model::Block;
use async_trait::async_trait;
use futures::future::join_all;

/// Grid table with even column widths. Every cell is plain text.
pub struct TableBuilder;

impl TableBuilder {
    fn cell(children: Vec<Paragraph>, columns: usize) -> TableCell {
        let mut cell = TableCell::new(children);
        cell.width = Some(TableWidth::Percent(100 / columns.max(1) as u32));
        cell.borders = Some(Borders::all(Border::new(
            BorderStyle::Single,
            border::TABLE,
            colors::BLACK,
            0,
        )));
        cell.shading = Some(colors::WHITE.to_string());
        cell.margins = Some(CellMargins::uniform(layout::TABLE_CELL_MARGIN));
        cell
    }
}

#[async_trait]
impl BlockBuilder for TableBuilder {
    async fn build(&self, block: &Block, ctx: &BuildContext<'_>) -> Result<Vec<DocNode>> {
        let rows = match block.table_rows.as_deref() {
            Some(rows) if !rows.is_empty() => rows,
            _ => return Err(ExportError::build(block.kind, "table has no rows")),
        };

        let mut built = Vec::with_capacity(rows.len());
        for row in rows {
            // Cells build concurrently; join_all keeps input order.
            let cells = join_all(row.iter().map(|text| inline_runs(text, ctx))).await;
            let cells = cells
                .into_iter()
                .map(|runs| Self::cell(vec![Paragraph::new(runs)], row.len()))
                .collect();
            built.push(TableRow::new(cells));
        }

        Ok(vec![
            Table::new(built, TableWidth::Percent(100)).into(),
            Paragraph::default().spacing(spacing::TABLE_AFTER).into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::builders::test_support::{config, services, table};
    use crate::model::BlockKind;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn cells_keep_order_and_even_widths() {
        let config = config();
        let services = services();
        let ctx = BuildContext::new(&config, &services);
        let block = Block::table(
            "",
            vec![
                vec!["A".into(), "**B**".into(), "C".into()],
                vec!["1".into(), "2".into(), "3".into()],
            ],
        );

        let nodes = TableBuilder.build(&block, &ctx).await.unwrap();
        assert_eq!(nodes.len(), 2);
        let grid = table(&nodes[0]);
        let texts: Vec<Vec<String>> = grid
            .rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.children[0].text()).collect())
            .collect();
        assert_eq!(texts, vec![vec!["A", "B", "C"], vec!["1", "2", "3"]]);
        assert_eq!(grid.rows[0].cells[0].width, Some(TableWidth::Percent(33)));
        assert_eq!(grid.width, TableWidth::Percent(100));
    }

    #[tokio::test]
    async fn missing_rows_are_fatal() {
        let config = config();
        let services = services();
        let ctx = BuildContext::new(&config, &services);
        let block = Block::new(BlockKind::Table, "| broken");
        let err = TableBuilder.build(&block, &ctx).await.unwrap_err();
        assert!(matches!(err, ExportError::Build { .. }));
    }
}

//! Document primitives.
//!
//! Builders produce these plain nodes and the packer serializes them into
//! WordprocessingML. All lengths are twips unless a field says otherwise;
//! border sizes are eighths of a point and run sizes are half-points.

/// The assembled document, ready to pack.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: PageSetup,
    pub properties: CoreProperties,
    pub body: Vec<DocNode>,
    pub header: Option<Paragraph>,
    pub footer: Option<Paragraph>,
    /// Number of numbered-list instances used by the body (`1..=n`).
    pub numbered_lists: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl PageSetup {
    /// Width between the left and right margins.
    pub fn content_width(&self) -> u32 {
        self.width.saturating_sub(self.margin * 2)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// One top-level body element.
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    Paragraph(Paragraph),
    Table(Table),
}

impl From<Paragraph> for DocNode {
    fn from(paragraph: Paragraph) -> Self {
        DocNode::Paragraph(paragraph)
    }
}

impl From<Table> for DocNode {
    fn from(table: Table) -> Self {
        DocNode::Table(table)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
    /// Line pitch in 240ths of a line.
    pub line: Option<u32>,
}

impl Spacing {
    pub const fn new(before: u32, after: u32) -> Self {
        Spacing {
            before,
            after,
            line: None,
        }
    }

    pub const fn with_line(before: u32, after: u32, line: u32) -> Self {
        Spacing {
            before,
            after,
            line: Some(line),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indent {
    pub left: u32,
    pub right: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Single,
    Dashed,
    Dotted,
    Double,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    pub style: BorderStyle,
    pub size: u32,
    pub color: String,
    pub space: u32,
}

impl Border {
    pub fn new(style: BorderStyle, size: u32, color: &str, space: u32) -> Self {
        Border {
            style,
            size,
            color: color.to_string(),
            space,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Borders {
    pub top: Option<Border>,
    pub bottom: Option<Border>,
    pub left: Option<Border>,
    pub right: Option<Border>,
}

impl Borders {
    pub fn all(border: Border) -> Self {
        Borders {
            top: Some(border.clone()),
            bottom: Some(border.clone()),
            left: Some(border.clone()),
            right: Some(border),
        }
    }

    pub fn bottom(border: Border) -> Self {
        Borders {
            bottom: Some(border),
            ..Borders::default()
        }
    }
}

/// A right-aligned tab stop, optionally with a dotted leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabStop {
    pub position: u32,
    pub dot_leader: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListNumbering {
    Bullet,
    /// Numbered list instance, starting at 1.
    Numbered(u32),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub children: Vec<Inline>,
    pub heading: Option<u8>,
    pub alignment: Option<Alignment>,
    pub spacing: Option<Spacing>,
    pub indent: Option<Indent>,
    pub borders: Option<Borders>,
    pub shading: Option<String>,
    pub tab_stops: Vec<TabStop>,
    pub numbering: Option<ListNumbering>,
}

impl Paragraph {
    pub fn new(children: Vec<Inline>) -> Self {
        Paragraph {
            children,
            ..Paragraph::default()
        }
    }

    /// Empty paragraph with zero spacing, used between framed blocks.
    pub fn spacer() -> Self {
        Paragraph {
            spacing: Some(Spacing::new(0, 0)),
            ..Paragraph::default()
        }
    }

    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn indent(mut self, left: u32, right: u32) -> Self {
        self.indent = Some(Indent { left, right });
        self
    }

    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = Some(borders);
        self
    }

    pub fn shading(mut self, fill: &str) -> Self {
        self.shading = Some(fill.to_string());
        self
    }

    /// Text of all plain and hyperlink runs, in order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Inline::Text(run) => out.push_str(&run.text),
                Inline::Hyperlink(link) => link.runs.iter().for_each(|r| out.push_str(&r.text)),
                Inline::Break => out.push('\n'),
                Inline::Tab => out.push('\t'),
                Inline::Image(_) | Inline::PageNumber => {}
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(TextRun),
    Break,
    Tab,
    Image(ImageRun),
    Hyperlink(Hyperlink),
    /// Current page number field.
    PageNumber,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    /// Underline color, when underlined.
    pub underline: Option<String>,
    pub color: Option<String>,
    pub size: Option<u32>,
    pub shading: Option<String>,
}

impl RunStyle {
    pub fn bold() -> Self {
        RunStyle {
            bold: true,
            ..RunStyle::default()
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn shaded(mut self, fill: &str) -> Self {
        self.shading = Some(fill.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub style: RunStyle,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        TextRun {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        TextRun {
            text: text.into(),
            style,
        }
    }
}

impl From<TextRun> for Inline {
    fn from(run: TextRun) -> Self {
        Inline::Text(run)
    }
}

/// An embedded PNG with its display size in pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRun {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub url: String,
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableWidth {
    /// Whole percent of the available width.
    Percent(u32),
    Twips(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHeight {
    pub value: u32,
    pub exact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMargins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl CellMargins {
    pub const fn uniform(value: u32) -> Self {
        CellMargins {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub children: Vec<Paragraph>,
    pub width: Option<TableWidth>,
    pub span: u32,
    pub shading: Option<String>,
    pub borders: Option<Borders>,
    pub margins: Option<CellMargins>,
}

impl TableCell {
    pub fn new(children: Vec<Paragraph>) -> Self {
        TableCell {
            children,
            width: None,
            span: 1,
            shading: None,
            borders: None,
            margins: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub height: Option<RowHeight>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        TableRow {
            cells,
            height: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<TableRow>,
    pub width: TableWidth,
    /// Grid column widths; empty lets the packer derive an even grid.
    pub columns: Vec<u32>,
    pub fixed_layout: bool,
    pub indent: Option<u32>,
    pub borders: Option<Borders>,
}

impl Table {
    pub fn new(rows: Vec<TableRow>, width: TableWidth) -> Self {
        Table {
            rows,
            width,
            columns: Vec::new(),
            fixed_layout: false,
            indent: None,
            borders: None,
        }
    }

    pub fn column_count(&self) -> usize {
        if !self.columns.is_empty() {
            return self.columns.len();
        }
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.span.max(1) as usize).sum())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_width_subtracts_both_margins() {
        let page = PageSetup {
            width: 9639,
            height: 13041,
            margin: 1440,
        };
        assert_eq!(page.content_width(), 6759);
    }

    #[test]
    fn paragraph_text_flattens_runs() {
        let paragraph = Paragraph::new(vec![
            TextRun::plain("a").into(),
            Inline::Break,
            Inline::Hyperlink(Hyperlink {
                url: "https://x".into(),
                runs: vec![TextRun::plain("b")],
            }),
            Inline::Tab,
            TextRun::plain("1").into(),
        ]);
        assert_eq!(paragraph.text(), "a\nb\t1");
    }

    #[test]
    fn column_count_honors_spans() {
        let mut wide = TableCell::new(vec![]);
        wide.span = 2;
        let table = Table::new(
            vec![
                TableRow::new(vec![wide]),
                TableRow::new(vec![TableCell::new(vec![])]),
            ],
            TableWidth::Percent(100),
        );
        assert_eq!(table.column_count(), 2);
    }
}

//! WordprocessingML packaging.
//!
//! Serializes a [`Document`] into the parts of a `.docx` zip container:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! docProps/core.xml, docProps/app.xml
//! word/document.xml (+ _rels/document.xml.rels)
//! word/styles.xml, word/numbering.xml
//! word/header1.xml, word/footer1.xml (when present)
//! word/media/imageN.png
//! ```
//!
//! Output is deterministic: relationship ids and media names follow document
//! order and zip entries carry no timestamps.

use super::nodes::{
    Alignment, Border, BorderStyle, Borders, CellMargins, DocNode, Document, ImageRun, Inline,
    ListNumbering, Paragraph, RunStyle, Table, TableCell, TableRow, TableWidth, TextRun,
};
use super::theme::{fonts, sizes};
use crate::error::Result;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const EMU_PER_PX: u64 = 9525;
/// Fiftieths of a percent.
const PCT_UNIT: u32 = 50;

/// Pack `doc` into `.docx` bytes.
pub fn pack(doc: &Document) -> Result<Vec<u8>> {
    let mut packer = Packer::default();

    let mut doc_rels = Relationships::default();
    doc_rels.add("styles", "styles.xml");
    doc_rels.add("numbering", "numbering.xml");
    let header_rel = doc.header.as_ref().map(|_| doc_rels.add("header", "header1.xml"));
    let footer_rel = doc.footer.as_ref().map(|_| doc_rels.add("footer", "footer1.xml"));

    let mut body = String::new();
    for node in &doc.body {
        packer.node(&mut body, node, doc, &mut doc_rels);
    }
    let document_xml = document_xml(doc, &body, header_rel.as_deref(), footer_rel.as_deref());

    let mut parts: Vec<(String, Vec<u8>)> = Vec::new();
    let mut overrides = vec![
        ("/word/document.xml", "wordprocessingml.document.main+xml"),
        ("/word/styles.xml", "wordprocessingml.styles+xml"),
        ("/word/numbering.xml", "wordprocessingml.numbering+xml"),
    ];

    for (paragraph, root, file, content_type) in [
        (&doc.header, "hdr", "header1.xml", "wordprocessingml.header+xml"),
        (&doc.footer, "ftr", "footer1.xml", "wordprocessingml.footer+xml"),
    ] {
        let Some(paragraph) = paragraph else { continue };
        let mut rels = Relationships::default();
        let mut xml = String::new();
        packer.paragraph(&mut xml, paragraph, &mut rels);
        parts.push((format!("word/{file}"), part_xml(root, &xml).into_bytes()));
        if !rels.is_empty() {
            parts.push((format!("word/_rels/{file}.rels"), rels.to_xml().into_bytes()));
        }
        overrides.push((
            if root == "hdr" { "/word/header1.xml" } else { "/word/footer1.xml" },
            content_type,
        ));
    }

    parts.push(("word/document.xml".into(), document_xml.into_bytes()));
    parts.push((
        "word/_rels/document.xml.rels".into(),
        doc_rels.to_xml().into_bytes(),
    ));
    parts.push(("word/styles.xml".into(), styles_xml().into_bytes()));
    parts.push((
        "word/numbering.xml".into(),
        numbering_xml(doc.numbered_lists).into_bytes(),
    ));
    for (index, png) in packer.media.into_iter().enumerate() {
        parts.push((format!("word/media/image{}.png", index + 1), png));
    }
    parts.push(("docProps/core.xml".into(), core_xml(doc).into_bytes()));
    parts.push(("docProps/app.xml".into(), APP_XML.as_bytes().to_vec()));
    parts.push(("_rels/.rels".into(), ROOT_RELS.as_bytes().to_vec()));

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types_xml(&overrides).as_bytes())?;
    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
    }
    Ok(zip.finish()?.into_inner())
}

#[derive(Default)]
struct Relationships {
    entries: Vec<(String, &'static str, String, bool)>,
}

impl Relationships {
    fn next_id(&self) -> String {
        format!("rId{}", self.entries.len() + 1)
    }

    fn add(&mut self, kind: &'static str, target: &str) -> String {
        let id = self.next_id();
        self.entries.push((id.clone(), kind, target.to_string(), false));
        id
    }

    fn add_external(&mut self, kind: &'static str, target: &str) -> String {
        let id = self.next_id();
        self.entries.push((id.clone(), kind, target.to_string(), true));
        id
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn to_xml(&self) -> String {
        let mut xml = format!(
            r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#
        );
        for (id, kind, target, external) in &self.entries {
            let _ = write!(
                xml,
                r#"<Relationship Id="{id}" Type="{REL_BASE}/{kind}" Target="{}"{}/>"#,
                encode_double_quoted_attribute(target),
                if *external { r#" TargetMode="External""# } else { "" }
            );
        }
        xml.push_str("</Relationships>");
        xml
    }
}

#[derive(Default)]
struct Packer {
    media: Vec<Vec<u8>>,
    drawings: u32,
}

impl Packer {
    fn node(&mut self, out: &mut String, node: &DocNode, doc: &Document, rels: &mut Relationships) {
        match node {
            DocNode::Paragraph(p) => self.paragraph(out, p, rels),
            DocNode::Table(t) => self.table(out, t, doc.page.content_width(), rels),
        }
    }

    fn paragraph(&mut self, out: &mut String, p: &Paragraph, rels: &mut Relationships) {
        out.push_str("<w:p>");
        paragraph_properties(out, p);
        for child in &p.children {
            self.inline(out, child, rels);
        }
        out.push_str("</w:p>");
    }

    fn inline(&mut self, out: &mut String, inline: &Inline, rels: &mut Relationships) {
        match inline {
            Inline::Text(run) => text_run(out, run),
            Inline::Break => out.push_str("<w:r><w:br/></w:r>"),
            Inline::Tab => out.push_str("<w:r><w:tab/></w:r>"),
            Inline::Hyperlink(link) => {
                let id = rels.add_external("hyperlink", &link.url);
                let _ = write!(out, r#"<w:hyperlink r:id="{id}" w:history="1">"#);
                link.runs.iter().for_each(|run| text_run(out, run));
                out.push_str("</w:hyperlink>");
            }
            Inline::Image(image) => self.image(out, image, rels),
            Inline::PageNumber => {
                out.push_str(r#"<w:fldSimple w:instr="PAGE"><w:r><w:t>1</w:t></w:r></w:fldSimple>"#)
            }
        }
    }

    fn image(&mut self, out: &mut String, image: &ImageRun, rels: &mut Relationships) {
        self.media.push(image.png.clone());
        self.drawings += 1;
        let n = self.drawings;
        let id = rels.add("image", &format!("media/image{}.png", self.media.len()));
        let cx = u64::from(image.width_px) * EMU_PER_PX;
        let cy = u64::from(image.height_px) * EMU_PER_PX;
        let descr = encode_double_quoted_attribute(&image.description);
        let _ = write!(
            out,
            concat!(
                r#"<w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/><wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
                r#"<wp:docPr id="{n}" name="Picture {n}" descr="{descr}"/>"#,
                r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
                r#"<a:graphic><a:graphicData uri="{pic}"><pic:pic>"#,
                r#"<pic:nvPicPr><pic:cNvPr id="{n}" name="image{n}.png"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="{id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
                r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#,
            ),
            cx = cx,
            cy = cy,
            n = n,
            descr = descr,
            pic = NS_PIC,
            id = id,
        );
    }

    fn table(&mut self, out: &mut String, table: &Table, content_width: u32, rels: &mut Relationships) {
        let columns = grid_columns(table, content_width);
        out.push_str("<w:tbl><w:tblPr>");
        width_element(out, "w:tblW", table.width);
        if let Some(indent) = table.indent {
            let _ = write!(out, r#"<w:tblInd w:w="{indent}" w:type="dxa"/>"#);
        }
        out.push_str("<w:tblBorders>");
        let borders = table.borders.clone().unwrap_or_default();
        for (name, border) in [
            ("top", &borders.top),
            ("left", &borders.left),
            ("bottom", &borders.bottom),
            ("right", &borders.right),
        ] {
            border_element(out, name, border.as_ref());
        }
        out.push_str(r#"<w:insideH w:val="nil"/><w:insideV w:val="nil"/></w:tblBorders>"#);
        if table.fixed_layout {
            out.push_str(r#"<w:tblLayout w:type="fixed"/>"#);
        }
        out.push_str(r#"<w:tblLook w:val="0000" w:firstRow="0" w:lastRow="0" w:firstColumn="0" w:lastColumn="0" w:noHBand="1" w:noVBand="1"/>"#);
        out.push_str("</w:tblPr><w:tblGrid>");
        for width in &columns {
            let _ = write!(out, r#"<w:gridCol w:w="{width}"/>"#);
        }
        out.push_str("</w:tblGrid>");
        for row in &table.rows {
            self.row(out, row, rels);
        }
        out.push_str("</w:tbl>");
    }

    fn row(&mut self, out: &mut String, row: &TableRow, rels: &mut Relationships) {
        out.push_str("<w:tr>");
        if let Some(height) = row.height {
            let rule = if height.exact { "exact" } else { "atLeast" };
            let _ = write!(
                out,
                r#"<w:trPr><w:trHeight w:val="{}" w:hRule="{rule}"/></w:trPr>"#,
                height.value
            );
        }
        for cell in &row.cells {
            self.cell(out, cell, rels);
        }
        out.push_str("</w:tr>");
    }

    fn cell(&mut self, out: &mut String, cell: &TableCell, rels: &mut Relationships) {
        out.push_str("<w:tc><w:tcPr>");
        if let Some(width) = cell.width {
            width_element(out, "w:tcW", width);
        }
        if cell.span > 1 {
            let _ = write!(out, r#"<w:gridSpan w:val="{}"/>"#, cell.span);
        }
        if let Some(borders) = &cell.borders {
            out.push_str("<w:tcBorders>");
            side_borders(out, borders);
            out.push_str("</w:tcBorders>");
        }
        if let Some(fill) = &cell.shading {
            shading(out, fill);
        }
        if let Some(margins) = cell.margins {
            cell_margins(out, margins);
        }
        out.push_str("</w:tcPr>");
        if cell.children.is_empty() {
            out.push_str("<w:p/>");
        }
        for paragraph in &cell.children {
            self.paragraph(out, paragraph, rels);
        }
        out.push_str("</w:tc>");
    }
}

fn grid_columns(table: &Table, content_width: u32) -> Vec<u32> {
    if !table.columns.is_empty() {
        return table.columns.clone();
    }
    let count = table.column_count().max(1) as u32;
    let total = match table.width {
        TableWidth::Twips(w) => w,
        TableWidth::Percent(p) => content_width * p.min(100) / 100,
    };
    vec![total / count; count as usize]
}

fn width_element(out: &mut String, tag: &str, width: TableWidth) {
    let (value, kind) = match width {
        TableWidth::Percent(p) => (p * PCT_UNIT, "pct"),
        TableWidth::Twips(w) => (w, "dxa"),
    };
    let _ = write!(out, r#"<{tag} w:w="{value}" w:type="{kind}"/>"#);
}

fn border_style(style: BorderStyle) -> &'static str {
    match style {
        BorderStyle::Single => "single",
        BorderStyle::Dashed => "dashed",
        BorderStyle::Dotted => "dotted",
        BorderStyle::Double => "double",
    }
}

fn border_element(out: &mut String, name: &str, border: Option<&Border>) {
    match border {
        Some(b) => {
            let _ = write!(
                out,
                r#"<w:{name} w:val="{}" w:sz="{}" w:space="{}" w:color="{}"/>"#,
                border_style(b.style),
                b.size,
                b.space,
                b.color
            );
        }
        None => {
            let _ = write!(out, r#"<w:{name} w:val="nil"/>"#);
        }
    }
}

/// Present sides only, in schema order.
fn side_borders(out: &mut String, borders: &Borders) {
    for (name, border) in [
        ("top", &borders.top),
        ("left", &borders.left),
        ("bottom", &borders.bottom),
        ("right", &borders.right),
    ] {
        if let Some(border) = border {
            border_element(out, name, Some(border));
        }
    }
}

fn shading(out: &mut String, fill: &str) {
    let _ = write!(out, r#"<w:shd w:val="clear" w:color="auto" w:fill="{fill}"/>"#);
}

fn cell_margins(out: &mut String, m: CellMargins) {
    let _ = write!(
        out,
        concat!(
            r#"<w:tcMar><w:top w:w="{}" w:type="dxa"/><w:left w:w="{}" w:type="dxa"/>"#,
            r#"<w:bottom w:w="{}" w:type="dxa"/><w:right w:w="{}" w:type="dxa"/></w:tcMar>"#
        ),
        m.top, m.left, m.bottom, m.right
    );
}

fn paragraph_properties(out: &mut String, p: &Paragraph) {
    let mut props = String::new();
    if let Some(level) = p.heading {
        let _ = write!(props, r#"<w:pStyle w:val="Heading{level}"/>"#);
    }
    if let Some(numbering) = p.numbering {
        let id = match numbering {
            ListNumbering::Bullet => 1,
            ListNumbering::Numbered(instance) => instance + 1,
        };
        let _ = write!(
            props,
            r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{id}"/></w:numPr>"#
        );
    }
    if let Some(borders) = &p.borders {
        props.push_str("<w:pBdr>");
        side_borders(&mut props, borders);
        props.push_str("</w:pBdr>");
    }
    if let Some(fill) = &p.shading {
        shading(&mut props, fill);
    }
    if !p.tab_stops.is_empty() {
        props.push_str("<w:tabs>");
        for tab in &p.tab_stops {
            let leader = if tab.dot_leader { r#" w:leader="dot""# } else { "" };
            let _ = write!(
                props,
                r#"<w:tab w:val="right"{leader} w:pos="{}"/>"#,
                tab.position
            );
        }
        props.push_str("</w:tabs>");
    }
    if let Some(spacing) = p.spacing {
        let _ = write!(
            props,
            r#"<w:spacing w:before="{}" w:after="{}""#,
            spacing.before, spacing.after
        );
        if let Some(line) = spacing.line {
            let _ = write!(props, r#" w:line="{line}" w:lineRule="auto""#);
        }
        props.push_str("/>");
    }
    if let Some(indent) = p.indent {
        let _ = write!(
            props,
            r#"<w:ind w:left="{}" w:right="{}"/>"#,
            indent.left, indent.right
        );
    }
    if let Some(alignment) = p.alignment {
        let value = match alignment {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        };
        let _ = write!(props, r#"<w:jc w:val="{value}"/>"#);
    }
    if !props.is_empty() {
        out.push_str("<w:pPr>");
        out.push_str(&props);
        out.push_str("</w:pPr>");
    }
}

fn run_properties(out: &mut String, style: &RunStyle) {
    let mut props = String::new();
    if style.bold {
        props.push_str("<w:b/><w:bCs/>");
    }
    if style.italic {
        props.push_str("<w:i/><w:iCs/>");
    }
    if let Some(color) = &style.color {
        let _ = write!(props, r#"<w:color w:val="{color}"/>"#);
    }
    if let Some(size) = style.size {
        let _ = write!(props, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#);
    }
    if let Some(color) = &style.underline {
        let _ = write!(props, r#"<w:u w:val="single" w:color="{color}"/>"#);
    }
    if let Some(fill) = &style.shading {
        shading(&mut props, fill);
    }
    if !props.is_empty() {
        out.push_str("<w:rPr>");
        out.push_str(&props);
        out.push_str("</w:rPr>");
    }
}

/// One run; `\n` becomes a break and `\t` a tab inside the run.
fn text_run(out: &mut String, run: &TextRun) {
    out.push_str("<w:r>");
    run_properties(out, &run.style);
    let mut first_line = true;
    for line in run.text.split('\n') {
        if !first_line {
            out.push_str("<w:br/>");
        }
        first_line = false;
        let mut first_piece = true;
        for piece in line.split('\t') {
            if !first_piece {
                out.push_str("<w:tab/>");
            }
            first_piece = false;
            if !piece.is_empty() {
                let _ = write!(
                    out,
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    encode_text(&xml_safe(piece))
                );
            }
        }
    }
    out.push_str("</w:r>");
}

/// Drop characters XML 1.0 cannot carry.
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|c| {
            matches!(*c, '\t' | '\n' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
        })
        .collect()
}

fn document_xml(doc: &Document, body: &str, header: Option<&str>, footer: Option<&str>) -> String {
    let mut xml = format!(
        r#"{XML_DECL}<w:document xmlns:w="{NS_W}" xmlns:r="{NS_R}" xmlns:wp="{NS_WP}" xmlns:a="{NS_A}" xmlns:pic="{NS_PIC}"><w:body>"#
    );
    xml.push_str(body);
    xml.push_str("<w:sectPr>");
    if let Some(id) = header {
        let _ = write!(xml, r#"<w:headerReference w:type="default" r:id="{id}"/>"#);
    }
    if let Some(id) = footer {
        let _ = write!(xml, r#"<w:footerReference w:type="default" r:id="{id}"/>"#);
    }
    let page = doc.page;
    let _ = write!(
        xml,
        concat!(
            r#"<w:pgSz w:w="{w}" w:h="{h}"/>"#,
            r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/>"#,
        ),
        w = page.width,
        h = page.height,
        m = page.margin
    );
    xml.push_str("</w:sectPr></w:body></w:document>");
    xml
}

fn part_xml(root: &str, content: &str) -> String {
    format!(r#"{XML_DECL}<w:{root} xmlns:w="{NS_W}" xmlns:r="{NS_R}" xmlns:wp="{NS_WP}" xmlns:a="{NS_A}" xmlns:pic="{NS_PIC}">{content}</w:{root}>"#)
}

fn styles_xml() -> String {
    let mut xml = format!(
        concat!(
            r#"{decl}<w:styles xmlns:w="{ns}"><w:docDefaults><w:rPrDefault><w:rPr>"#,
            r#"<w:rFonts w:ascii="{latin}" w:hAnsi="{latin}" w:eastAsia="{cjk}" w:cs="{latin}"/>"#,
            r#"<w:sz w:val="{body}"/><w:szCs w:val="{body}"/></w:rPr></w:rPrDefault>"#,
            r#"<w:pPrDefault><w:pPr/></w:pPrDefault></w:docDefaults>"#,
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
        ),
        decl = XML_DECL,
        ns = NS_W,
        latin = fonts::LATIN,
        cjk = fonts::CJK,
        body = sizes::BODY
    );
    for (level, size) in [(1, sizes::H1), (2, sizes::H2), (3, sizes::H3)] {
        let _ = write!(
            xml,
            concat!(
                r#"<w:style w:type="paragraph" w:styleId="Heading{l}"><w:name w:val="heading {l}"/>"#,
                r#"<w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#,
                r#"<w:pPr><w:keepNext/><w:outlineLvl w:val="{o}"/></w:pPr>"#,
                r#"<w:rPr><w:b/><w:bCs/><w:sz w:val="{s}"/><w:szCs w:val="{s}"/></w:rPr></w:style>"#,
            ),
            l = level,
            o = level - 1,
            s = size
        );
    }
    xml.push_str("</w:styles>");
    xml
}

/// Bullet list is `numId` 1; numbered instance `k` is `numId` `k + 1`.
fn numbering_xml(numbered_lists: u32) -> String {
    let mut xml = format!(
        concat!(
            r#"{decl}<w:numbering xmlns:w="{ns}">"#,
            r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/>"#,
            r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/>"#,
            r#"<w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>"#,
            r#"<w:abstractNum w:abstractNumId="1"><w:multiLevelType w:val="singleLevel"/>"#,
            r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/>"#,
            r#"<w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>"#,
            r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#,
        ),
        decl = XML_DECL,
        ns = NS_W
    );
    for instance in 1..=numbered_lists {
        let _ = write!(
            xml,
            concat!(
                r#"<w:num w:numId="{}"><w:abstractNumId w:val="1"/>"#,
                r#"<w:lvlOverride w:ilvl="0"><w:startOverride w:val="1"/></w:lvlOverride></w:num>"#,
            ),
            instance + 1
        );
    }
    xml.push_str("</w:numbering>");
    xml
}

fn core_xml(doc: &Document) -> String {
    let mut xml = format!(
        concat!(
            r#"{}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
        ),
        XML_DECL
    );
    if let Some(title) = &doc.properties.title {
        let _ = write!(xml, "<dc:title>{}</dc:title>", encode_text(&xml_safe(title)));
    }
    if let Some(author) = &doc.properties.author {
        let _ = write!(xml, "<dc:creator>{}</dc:creator>", encode_text(&xml_safe(author)));
    }
    xml.push_str("</cp:coreProperties>");
    xml
}

fn content_types_xml(overrides: &[(&str, &str)]) -> String {
    let mut xml = format!(
        concat!(
            r#"{}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Default Extension="png" ContentType="image/png"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
            r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#,
        ),
        XML_DECL
    );
    for (part, kind) in overrides {
        let _ = write!(
            xml,
            r#"<Override PartName="{part}" ContentType="application/vnd.openxmlformats-officedocument.{kind}"/>"#
        );
    }
    xml.push_str("</Types>");
    xml
}

const APP_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
    r#"<Application>md2doc</Application></Properties>"#
);

const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
    r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
    r#"</Relationships>"#
);

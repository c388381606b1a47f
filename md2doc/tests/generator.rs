use crate::common::{fixture, offline_config, offline_services, part_names, read_part};
use md2doc::docx::nodes::{DocNode, Inline};
use md2doc::docx::{BlockBuilder, BuildContext, DocumentGenerator};
use md2doc::model::{Block, BlockKind, DocumentMeta};
use md2doc::parse_document;
use md2doc::render::ImageRegistry;
use md2doc::{ExportError, Result};
use async_trait::async_trait;

fn generator() -> DocumentGenerator {
    let config = offline_config();
    let services = offline_services(&config);
    DocumentGenerator::new(config).with_services(services)
}

#[tokio::test]
async fn kitchensink_packs_every_part() {
    let doc = parse_document(&fixture("kitchensink.md"));
    let package = generator().export(&doc).await.unwrap();

    let names = part_names(&package);
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/core.xml",
        "word/document.xml",
        "word/styles.xml",
        "word/numbering.xml",
        "word/header1.xml",
        "word/footer1.xml",
    ] {
        assert!(names.iter().any(|n| n == part), "missing {part}");
    }

    let body = read_part(&package, "word/document.xml");
    assert!(body.contains("[Mermaid Chart Error]"));
    assert!(body.contains("[ WARNING ]"));
    assert!(body.contains(r#"<w:pStyle w:val="Heading1"/>"#));
    assert!(body.contains(r#"<w:tab w:val="right" w:leader="dot""#));
    assert!(body.contains("目 錄"));

    let core = read_part(&package, "docProps/core.xml");
    assert!(core.contains("<dc:title>Field Manual</dc:title>"));
    assert!(core.contains("<dc:creator>Ops Team</dc:creator>"));
    assert!(read_part(&package, "word/header1.xml").contains("Field Manual"));

    let numbering = read_part(&package, "word/numbering.xml");
    assert!(numbering.contains(r#"<w:num w:numId="3">"#));
}

#[tokio::test]
async fn generation_is_deterministic() {
    let doc = parse_document(&fixture("kitchensink.md"));
    let generator = generator();
    let first = generator.generate(&doc).await.unwrap();
    let second = generator.generate(&doc).await.unwrap();
    assert_eq!(first, second);

    let a = generator.export(&doc).await.unwrap();
    let b = generator.export(&doc).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn malformed_table_aborts_export() {
    let blocks = vec![
        Block::paragraph("fine"),
        Block::new(BlockKind::Table, "| broken"),
    ];
    let err = generator()
        .generate_blocks(&blocks, &DocumentMeta::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::Build { .. }));
}

#[tokio::test]
async fn registered_images_embed_and_unknown_ones_fall_back() {
    let mut registry = ImageRegistry::new();
    registry.register("logo", tiny_png());

    let config = offline_config();
    let services = offline_services(&config).with_images(registry);
    let generator = DocumentGenerator::new(config).with_services(services);
    let doc = parse_document("![Logo](img:logo) and ![Missing](img:nope)");
    let document = generator.generate(&doc).await.unwrap();

    let DocNode::Paragraph(p) = &document.body[0] else {
        panic!("expected a paragraph");
    };
    assert!(p.children.iter().any(|c| matches!(c, Inline::Image(img) if img.width_px == 2)));
    assert!(p.text().contains("[Image: Missing]"));
}

struct Shouting;

#[async_trait]
impl BlockBuilder for Shouting {
    async fn build(&self, block: &Block, _ctx: &BuildContext<'_>) -> Result<Vec<DocNode>> {
        Ok(vec![md2doc::docx::nodes::Paragraph::new(vec![
            md2doc::docx::nodes::TextRun::plain(block.content.to_uppercase()).into(),
        ])
        .into()])
    }
}

#[tokio::test]
async fn custom_builders_replace_defaults() {
    let mut generator = generator();
    generator
        .builders_mut()
        .register(BlockKind::Paragraph, Shouting);
    let doc = parse_document("quiet words");
    let document = generator.generate(&doc).await.unwrap();
    let DocNode::Paragraph(p) = &document.body[0] else {
        panic!("expected a paragraph");
    };
    assert_eq!(p.text(), "QUIET WORDS");
}

fn tiny_png() -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(2, 1, image::Rgba([255, 0, 0, 255]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageFormat::Png)
        .expect("png encodes");
    bytes.into_inner()
}

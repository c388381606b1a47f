//! Block sequence to [`Document`].

use super::config::DocxConfig;
use super::nodes::{
    Alignment, CoreProperties, DocNode, Document, Inline, Paragraph, RunStyle, TextRun,
};
use super::package;
use super::registry::{BuildContext, BuilderRegistry};
use super::theme::{colors, sizes};
use crate::error::Result;
use crate::model::{Block, BlockKind, DocumentMeta, ParsedDocument};
use crate::render::RenderServices;
use tracing::{debug, info};

/// Runs every block through its builder, in order, and assembles the page.
///
/// Builders are awaited one block at a time, so the body order is the block
/// order. Blocks whose kind has no builder are skipped.
pub struct DocumentGenerator {
    config: DocxConfig,
    builders: BuilderRegistry,
    services: RenderServices,
}

impl DocumentGenerator {
    pub fn new(config: DocxConfig) -> Self {
        let services = RenderServices::for_config(&config);
        DocumentGenerator {
            config,
            builders: BuilderRegistry::with_defaults(),
            services,
        }
    }

    pub fn with_builders(mut self, builders: BuilderRegistry) -> Self {
        self.builders = builders;
        self
    }

    pub fn with_services(mut self, services: RenderServices) -> Self {
        self.services = services;
        self
    }

    pub fn config(&self) -> &DocxConfig {
        &self.config
    }

    pub fn builders_mut(&mut self) -> &mut BuilderRegistry {
        &mut self.builders
    }

    pub async fn generate(&self, doc: &ParsedDocument) -> Result<Document> {
        self.generate_blocks(&doc.blocks, &doc.meta).await
    }

    pub async fn generate_blocks(&self, blocks: &[Block], meta: &DocumentMeta) -> Result<Document> {
        let mut body: Vec<DocNode> = Vec::new();
        let mut numbered_lists = 0u32;
        let mut previous: Option<BlockKind> = None;

        for block in blocks {
            let mut ctx = BuildContext::new(&self.config, &self.services);
            if block.kind == BlockKind::NumberedItem {
                if previous != Some(BlockKind::NumberedItem) {
                    numbered_lists += 1;
                    debug!(instance = numbered_lists, "numbered list starts");
                }
                ctx.list_instance = Some(numbered_lists);
            }
            previous = Some(block.kind);

            match self.builders.build(block, &ctx).await? {
                Some(nodes) => body.extend(nodes),
                None => debug!(kind = %block.kind, "no builder registered; skipping block"),
            }
        }

        info!(blocks = blocks.len(), nodes = body.len(), "document generated");
        Ok(Document {
            page: self.config.page(),
            properties: CoreProperties {
                title: meta.title.clone(),
                author: meta.author.clone(),
            },
            body,
            header: meta.header_title().map(header_paragraph),
            footer: meta.footer_enabled().then(footer_paragraph),
            numbered_lists,
        })
    }

    /// Generate and pack into WordprocessingML bytes.
    pub async fn export(&self, doc: &ParsedDocument) -> Result<Vec<u8>> {
        let document = self.generate(doc).await?;
        package::pack(&document)
    }
}

impl Default for DocumentGenerator {
    fn default() -> Self {
        Self::new(DocxConfig::default())
    }
}

fn header_paragraph(title: &str) -> Paragraph {
    let style = RunStyle::default()
        .size(sizes::LABEL)
        .color(colors::HINT_GREY);
    Paragraph::new(vec![TextRun::styled(title, style).into()]).align(Alignment::Center)
}

fn footer_paragraph() -> Paragraph {
    Paragraph::new(vec![Inline::PageNumber]).align(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::nodes::ListNumbering;
    use crate::render::NoDiagramRenderer;

    fn generator() -> DocumentGenerator {
        let config = DocxConfig {
            qr_codes: false,
            ..DocxConfig::default()
        };
        let services = RenderServices::for_config(&config).with_diagrams(NoDiagramRenderer);
        DocumentGenerator::new(config).with_services(services)
    }

    fn numbering(doc: &Document) -> Vec<ListNumbering> {
        doc.body
            .iter()
            .filter_map(|node| match node {
                DocNode::Paragraph(p) => p.numbering,
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn numbered_runs_get_separate_instances() {
        let blocks = vec![
            Block::new(BlockKind::NumberedItem, "a"),
            Block::new(BlockKind::NumberedItem, "b"),
            Block::paragraph("break"),
            Block::new(BlockKind::NumberedItem, "c"),
            Block::new(BlockKind::BulletItem, "d"),
        ];
        let doc = generator()
            .generate_blocks(&blocks, &DocumentMeta::default())
            .await
            .unwrap();
        assert_eq!(
            numbering(&doc),
            vec![
                ListNumbering::Numbered(1),
                ListNumbering::Numbered(1),
                ListNumbering::Numbered(2),
                ListNumbering::Bullet,
            ]
        );
        assert_eq!(doc.numbered_lists, 2);
    }

    #[tokio::test]
    async fn header_and_footer_follow_meta() {
        let meta = DocumentMeta {
            title: Some("Manual".into()),
            ..DocumentMeta::default()
        };
        let doc = generator().generate_blocks(&[], &meta).await.unwrap();
        assert_eq!(doc.header.map(|p| p.text()), Some("Manual".to_string()));
        assert!(doc.footer.is_some());

        let meta = DocumentMeta {
            title: Some("Manual".into()),
            header: Some(false),
            footer: Some(false),
            ..DocumentMeta::default()
        };
        let doc = generator().generate_blocks(&[], &meta).await.unwrap();
        assert!(doc.header.is_none());
        assert!(doc.footer.is_none());
    }

    #[tokio::test]
    async fn unregistered_kinds_are_skipped() {
        let mut generator = generator();
        generator.builders_mut().unregister(BlockKind::Paragraph);
        let blocks = vec![Block::paragraph("gone"), Block::new(BlockKind::HorizontalRule, "")];
        let doc = generator
            .generate_blocks(&blocks, &DocumentMeta::default())
            .await
            .unwrap();
        assert_eq!(doc.body.len(), 1);
    }
}

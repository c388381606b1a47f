//! Block kind to builder dispatch.

use super::builders;
use super::config::DocxConfig;
use super::nodes::DocNode;
use crate::error::Result;
use crate::model::{Block, BlockKind};
use crate::render::RenderServices;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// What a builder may read while turning one block into nodes.
pub struct BuildContext<'a> {
    pub config: &'a DocxConfig,
    pub services: &'a RenderServices,
    /// Numbering instance for numbered list items.
    pub list_instance: Option<u32>,
}

impl<'a> BuildContext<'a> {
    pub fn new(config: &'a DocxConfig, services: &'a RenderServices) -> Self {
        BuildContext {
            config,
            services,
            list_instance: None,
        }
    }
}

/// Converts one block into zero or more document nodes.
#[async_trait]
pub trait BlockBuilder: Send + Sync {
    async fn build(&self, block: &Block, ctx: &BuildContext<'_>) -> Result<Vec<DocNode>>;
}

/// Builders keyed by block kind.
///
/// A kind can be registered once; registering again replaces the builder.
#[derive(Clone)]
pub struct BuilderRegistry {
    builders: HashMap<BlockKind, Arc<dyn BlockBuilder>>,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        BuilderRegistry {
            builders: HashMap::new(),
        }
    }

    pub fn register<B: BlockBuilder + 'static>(&mut self, kind: BlockKind, builder: B) {
        self.builders.insert(kind, Arc::new(builder));
    }

    /// Register one builder for several kinds.
    pub fn register_shared(&mut self, kinds: &[BlockKind], builder: Arc<dyn BlockBuilder>) {
        for kind in kinds {
            self.builders.insert(*kind, builder.clone());
        }
    }

    pub fn unregister(&mut self, kind: BlockKind) -> bool {
        self.builders.remove(&kind).is_some()
    }

    pub fn has(&self, kind: BlockKind) -> bool {
        self.builders.contains_key(&kind)
    }

    /// Registered kinds in declaration order.
    pub fn kinds(&self) -> Vec<BlockKind> {
        BlockKind::ALL
            .into_iter()
            .filter(|kind| self.has(*kind))
            .collect()
    }

    /// Build `block`, or `None` when no builder handles its kind.
    pub async fn build(
        &self,
        block: &Block,
        ctx: &BuildContext<'_>,
    ) -> Result<Option<Vec<DocNode>>> {
        match self.builders.get(&block.kind) {
            Some(builder) => builder.build(block, ctx).await.map(Some),
            None => Ok(None),
        }
    }

    /// Registry with a builder for every block kind.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BlockKind::Paragraph, builders::ParagraphBuilder);
        for kind in [BlockKind::Heading1, BlockKind::Heading2, BlockKind::Heading3] {
            registry.register(kind, builders::HeadingBuilder);
        }
        registry.register(BlockKind::CodeBlock, builders::CodeBlockBuilder::default());
        registry.register(BlockKind::Chat, builders::ChatBuilder);
        registry.register_shared(
            &[
                BlockKind::CalloutTip,
                BlockKind::CalloutNote,
                BlockKind::CalloutWarning,
            ],
            Arc::new(builders::CalloutBuilder),
        );
        registry.register(BlockKind::BulletItem, builders::ListItemBuilder);
        registry.register(BlockKind::NumberedItem, builders::ListItemBuilder);
        registry.register(BlockKind::Table, builders::TableBuilder);
        registry.register(BlockKind::HorizontalRule, builders::RuleBuilder);
        registry.register(BlockKind::TableOfContents, builders::TocBuilder);
        registry
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_kind() {
        assert_eq!(BuilderRegistry::with_defaults().kinds(), BlockKind::ALL.to_vec());
    }

    #[tokio::test]
    async fn unregistered_kind_builds_nothing() {
        let mut registry = BuilderRegistry::with_defaults();
        assert!(registry.unregister(BlockKind::HorizontalRule));
        let config = DocxConfig::default();
        let services = RenderServices::default();
        let ctx = BuildContext::new(&config, &services);
        let built = registry
            .build(&Block::new(BlockKind::HorizontalRule, ""), &ctx)
            .await
            .unwrap();
        assert!(built.is_none());
    }
}

//! Parsed document model.
//!
//! This is the parser's output and the generator's input: a flat, ordered
//! sequence of [`Block`]s plus optional [`DocumentMeta`] taken from the
//! preamble. Blocks never nest. Runs of list items are sibling blocks and only
//! become a list when a renderer scans them.

pub mod block;
pub mod meta;

pub use block::{Block, BlockKind, BlockMetadata, ChatAlignment};
pub use meta::DocumentMeta;

use serde::{Deserialize, Serialize};

/// The full result of one parse: preamble metadata and the block sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub meta: DocumentMeta,
    pub blocks: Vec<Block>,
}

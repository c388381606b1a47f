//! Markdown-dialect documents to Word packages
//!
//!     This crate turns a lightweight Markdown dialect into an ordered list of blocks and then
//!     into a `.docx` package. The dialect adds a few constructs on top of the usual headings,
//!     lists, fences and tables: chat bubbles (`ROLE ":: text`), callouts (`> [!TIP]`), a manual
//!     table of contents (`[TOC]`), UI buttons (【Save】), keyboard shortcuts ([Ctrl+S]) and book
//!     quotes (『Title』).
//!
//!     TLDR:
//!         - parse() never fails; anything it does not recognize is paragraph text.
//!         - Blocks never nest. A list is a run of sibling list-item blocks.
//!         - The generator is async: diagrams and QR codes are produced by collaborators, and
//!           diagrams go through a bounded queue so at most N renderer processes run at once.
//!
//! Architecture
//!
//!     The pipeline has three stages, each replaceable at its seam:
//!
//!     text ──► parser (RuleRegistry of LineRules) ──► Vec<Block>
//!          ──► DocumentGenerator (BuilderRegistry of BlockBuilders) ──► docx::Document
//!          ──► package::pack ──► .docx bytes
//!
//!     The inline tokenizer (./inline) runs inside the builders, on the content of each block,
//!     so the block model keeps the raw markup. That is what the JSON format hands to a live
//!     preview.
//!
//!     This is a pure lib: it powers md2doc-cli but does not print, read env vars for output
//!     decisions, or assume a shell. The one exception is the default mermaid renderer, which
//!     shells out to `mmdc` and is gated behind the `native-export` feature.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats                 # docx and json exporters
//!     ├── inline                  # Inline style tokenizer
//!     ├── model                   # Block, BlockKind, DocumentMeta
//!     ├── parser                  # Line-oriented block parser, rules, preamble
//!     ├── docx
//!     │   ├── builders            # One builder per block kind
//!     │   ├── generator.rs        # Block sequence to Document
//!     │   ├── nodes.rs            # Paragraph / table / run primitives
//!     │   ├── package.rs          # WordprocessingML zip packer
//!     │   ├── queue.rs            # Bounded diagram render queue
//!     │   └── theme.rs            # Fonts, colors, spacing
//!     └── render                  # Diagram renderer, rasterizer, QR encoder, image store
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── <area>.rs
//!     └── fixtures
//!         └── kitchensink.md
//!
//!     Note that rust does not by default discover tests in subdirectories, so tests/lib.rs
//!     declares each module.
//!
//! Extending
//!
//!     New block syntax is a LineRule registered on a RuleRegistry; new rendering for a block
//!     kind is a BlockBuilder registered on a BuilderRegistry; new output is a Format registered
//!     on the FormatRegistry. None of these require touching the parser loop or the generator.
//!
pub mod docx;
pub mod error;
pub mod format;
pub mod formats;
pub mod inline;
pub mod model;
pub mod parser;
pub mod registry;
pub mod render;

pub use docx::{DocumentGenerator, DocxConfig};
pub use error::{ExportError, Result};
pub use format::{Format, SerializedDocument};
pub use inline::{tokenize, Segment, SegmentKind};
pub use model::{Block, BlockKind, DocumentMeta, ParsedDocument};
pub use parser::{parse, parse_document, BlockParser};
pub use registry::FormatRegistry;
pub use render::RenderServices;

/// Parses `text` and packs it into `.docx` bytes with default collaborators.
pub async fn export_docx(text: &str, config: &DocxConfig) -> Result<Vec<u8>> {
    let doc = parse_document(text);
    DocumentGenerator::new(config.clone()).export(&doc).await
}

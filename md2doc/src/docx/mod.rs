//! Block sequence to WordprocessingML.
//!
//! The generator walks the parsed blocks in order and asks the
//! [`BuilderRegistry`] for the nodes of each one. Builders are async: a
//! mermaid block waits for its diagram slot on the [`RenderQueue`] and a link
//! waits for its QR bitmap. The assembled [`Document`] is then packed into a
//! `.docx` zip by [`package::pack`].

pub mod builders;
pub mod config;
pub mod generator;
pub mod nodes;
pub mod package;
pub mod queue;
pub mod registry;
pub mod theme;

pub use config::{DiagramSettings, DocxConfig};
pub use generator::DocumentGenerator;
pub use nodes::{DocNode, Document};
pub use queue::RenderQueue;
pub use registry::{BlockBuilder, BuildContext, BuilderRegistry};

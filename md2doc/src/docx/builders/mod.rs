//! Default block builders.
//!
//! Each builder maps one block kind to document nodes using the fixed theme.
//! Framed blocks (code, chat, callout) are followed by a zero-spacing spacer
//! paragraph so consecutive frames never merge their borders.

pub mod callout;
pub mod chat;
pub mod code_block;
pub mod diagram;
pub mod heading;
pub mod inline;
pub mod list;
pub mod paragraph;
pub mod rule;
pub mod table;
pub mod toc;

pub use callout::CalloutBuilder;
pub use chat::ChatBuilder;
pub use code_block::CodeBlockBuilder;
pub use diagram::DiagramBuilder;
pub use heading::HeadingBuilder;
pub use list::ListItemBuilder;
pub use paragraph::ParagraphBuilder;
pub use rule::RuleBuilder;
pub use table::TableBuilder;
pub use toc::TocBuilder;

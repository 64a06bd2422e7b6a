//! wpdown-core - document model and text rendering
//!
//! This crate provides the document model and the two text renderers used by
//! `wpdown`: Markdown and plain text. It has no dependencies and knows nothing
//! about HTML.
//!
//! # Architecture
//!
//! ```text
//!                            ┌──────────────┐ ──▶ Markdown String
//! HTML tree ──(wpdown)─────▶ │ Document AST │
//!                            └──────────────┘ ──▶ Plain-text String
//! ```
//!
//! # Example
//!
//! ```rust
//! use wpdown_core::{render_plain, serialize, Block, Inline, Options};
//!
//! let ast = Block::Document(vec![
//!     Block::Heading {
//!         level: 1,
//!         content: vec![Inline::Text("Hello World".to_string())],
//!     },
//!     Block::Paragraph(vec![
//!         Inline::Text("This is ".to_string()),
//!         Inline::Strong(vec![Inline::Text("bold".to_string())]),
//!         Inline::Text(" text.".to_string()),
//!     ]),
//! ]);
//!
//! let markdown = serialize(&ast, &Options::default());
//! assert_eq!(markdown, "# Hello World\n\nThis is **bold** text.");
//!
//! let text = render_plain(&ast, &Options::default());
//! assert_eq!(text, "Hello World\n\nThis is bold text.");
//! ```

mod ast;
mod options;
mod plain;
mod serialize;
pub mod whitespace;

pub use ast::{inlines_plain_text, Block, Inline, ListItem, ListKind, ListNode};
pub use options::{CodeBlockStyle, HeadingStyle, Options, UnderlineStyle};
pub use plain::render_plain;
pub use serialize::{escape_markdown, serialize};

//! # wpdown
//!
//! Convert WordPress post content into clean HTML, plain text, or Markdown.
//!
//! Post bodies from a WordPress export are HTML fragments interleaved with block
//! editor comments (`<!-- wp:paragraph -->`), generated classes and attributes,
//! deprecated tags and, often, markup that was never balanced. This crate turns
//! such a fragment into one of four outputs.
//!
//! ## Design
//!
//! Every target is rendered from the same model rather than from its own chain
//! of rewrites:
//!
//! ```text
//! content ──▶ block comments ──▶ tokenizer ──▶ tree builder ──▶ normalizer
//!                                                                   │
//!                  ┌────────────────────┬──────────────────┬────────┘
//!                  ▼                    ▼                  ▼
//!             clean HTML          document AST ──▶ Markdown / plain text
//! ```
//!
//! - **Total**: every conversion accepts any string and never fails.
//! - **Injectable rules**: the comment namespaces, generated-attribute filters and
//!   deprecated-tag map live in a [`RuleSet`] handed to the service.
//!
//! ## Example
//!
//! ```rust
//! use wpdown::{to_markdown, to_plain_text};
//!
//! let html = "<!-- wp:list --><ul><li>One<ul><li>Two</li></ul></li></ul><!-- /wp:list -->";
//!
//! assert_eq!(to_markdown(html), "- One\n    - Two");
//! assert_eq!(to_plain_text(html), "• One\n    • Two");
//! ```
//!
//! ## Example (custom options)
//!
//! ```rust
//! use wpdown::{ContentService, Format, Options};
//!
//! let options = Options {
//!     bullet_list_marker: '*',
//!     ..Default::default()
//! };
//! let service = ContentService::with_options(options).unwrap();
//! let format: Format = "markdown".parse().unwrap();
//!
//! assert_eq!(service.convert("<ul><li><b>x</b></li></ul>", format), "* **x**");
//! ```

pub mod html;
pub mod inspect;
pub mod node;
mod convert;
mod normalize;
mod rules;
mod sanitize;
mod service;
mod token;
mod utilities;

use once_cell::sync::Lazy;

pub use html::parse_html;
pub use node::{Node, NodeType};
pub use rules::{Filter, RuleSet, TagRewrite};
pub use service::{ContentService, Format};
pub use token::{tokenize, Token, Tokenizer};
pub use utilities::{decode_entities, is_block, is_void, strip_tags};
pub use wpdown_core::{
    Block, CodeBlockStyle, HeadingStyle, Inline, ListItem, ListKind, ListNode, Options,
    UnderlineStyle,
};

/// Error type for wpdown configuration
#[derive(Debug, thiserror::Error)]
pub enum WpdownError {
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, WpdownError>;

static DEFAULT_SERVICE: Lazy<ContentService> = Lazy::new(ContentService::new);

/// Remove block comments, empty paragraphs and redundant whitespace
///
/// ```rust
/// let html = "<!-- wp:paragraph -->\n<p>Text</p>\n<!-- /wp:paragraph -->\n\n<p> </p>";
/// assert_eq!(wpdown::sanitize(html), "<p>Text</p>");
/// ```
pub fn sanitize(html: &str) -> String {
    DEFAULT_SERVICE.sanitize(html)
}

/// Sanitize, balance, and normalize content, returning HTML
///
/// ```rust
/// let html = "<p class=\"wp-block-paragraph\">Open <b>bold";
/// assert_eq!(wpdown::clean_html(html), "<p>Open <strong>bold</strong></p>");
/// ```
pub fn clean_html(html: &str) -> String {
    DEFAULT_SERVICE.clean_html(html)
}

/// Convert content to plain text
pub fn to_plain_text(html: &str) -> String {
    DEFAULT_SERVICE.to_plain_text(html)
}

/// Convert content to Markdown
pub fn to_markdown(html: &str) -> String {
    DEFAULT_SERVICE.to_markdown(html)
}

/// Convert content to the requested format with default options and rules
pub fn convert(html: &str, format: Format) -> String {
    DEFAULT_SERVICE.convert(html, format)
}

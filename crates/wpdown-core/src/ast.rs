//! Document model
//!
//! This module defines the block and inline nodes that every renderer works from.
//! Lists are explicit recursive nodes: an item holds its own inline text and at most
//! one nested list, plus whatever followed that nested list inside the same item.

/// A block-level node
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Root document container
    Document(Vec<Block>),

    /// Heading with level (1-6) and inline content
    Heading {
        level: u8,
        content: Vec<Inline>,
    },

    /// Paragraph containing inline content
    Paragraph(Vec<Inline>),

    /// Block quote containing nested blocks
    BlockQuote(Vec<Block>),

    /// Ordered or unordered list
    List(ListNode),

    /// Preformatted code with an optional language tag
    CodeBlock {
        language: Option<String>,
        code: String,
    },

    /// Thematic break (horizontal rule)
    ThematicBreak,

    /// Table; the first source row is always the header
    Table {
        header: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
}

/// List flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// A list and its items, in document order
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub kind: ListKind,
    /// First number of an ordered list
    pub start: u64,
    pub items: Vec<ListItem>,
}

impl ListNode {
    pub fn new(kind: ListKind, items: Vec<ListItem>) -> Self {
        Self {
            kind,
            start: 1,
            items,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.kind == ListKind::Ordered
    }

    pub fn is_blank(&self) -> bool {
        self.items.iter().all(|i| i.is_blank())
    }
}

/// A list item: leading text, an optional nested list, and trailing blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    pub text: Vec<Inline>,
    pub child: Option<ListNode>,
    /// Content found after the nested list inside the same item
    pub trailing: Vec<Block>,
}

impl ListItem {
    pub fn new(text: Vec<Inline>) -> Self {
        Self {
            text,
            child: None,
            trailing: Vec::new(),
        }
    }

    pub fn with_child(text: Vec<Inline>, child: ListNode) -> Self {
        Self {
            text,
            child: Some(child),
            trailing: Vec::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.iter().all(|i| i.is_blank())
            && self.child.as_ref().map_or(true, |c| c.is_blank())
            && self.trailing.iter().all(|b| b.is_blank())
    }
}

/// An inline run
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Plain text (entities already decoded)
    Text(String),

    /// Strong emphasis (bold)
    Strong(Vec<Inline>),

    /// Emphasis (italic)
    Emphasis(Vec<Inline>),

    /// Struck-through text
    Strikethrough(Vec<Inline>),

    /// Underlined text; Markdown has no native form
    Underline(Vec<Inline>),

    /// Inline code
    Code(String),

    /// Link with text, URL, and optional title
    Link {
        content: Vec<Inline>,
        url: String,
        title: Option<String>,
    },

    /// Image with alt text, URL, and optional title
    Image {
        alt: String,
        url: String,
        title: Option<String>,
    },

    /// Hard line break
    LineBreak,
}

impl Block {
    /// Check if this block is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Block::Document(blocks) => blocks.iter().all(|b| b.is_blank()),
            Block::Paragraph(inlines) => inlines.iter().all(|i| i.is_blank()),
            Block::Heading { content, .. } => content.iter().all(|i| i.is_blank()),
            Block::BlockQuote(blocks) => blocks.iter().all(|b| b.is_blank()),
            Block::List(list) => list.is_blank(),
            Block::CodeBlock { code, .. } => code.trim().is_empty(),
            Block::Table { header, rows } => {
                header.iter().all(|h| h.iter().all(|i| i.is_blank()))
                    && rows
                        .iter()
                        .all(|r| r.iter().all(|c| c.iter().all(|i| i.is_blank())))
            }
            Block::ThematicBreak => false,
        }
    }
}

impl Inline {
    /// Check if this inline is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::Strong(inlines)
            | Inline::Emphasis(inlines)
            | Inline::Strikethrough(inlines)
            | Inline::Underline(inlines) => inlines.iter().all(|i| i.is_blank()),
            Inline::Code(code) => code.is_empty(),
            Inline::Link { content, .. } => content.iter().all(|i| i.is_blank()),
            Inline::Image { .. } => false,
            Inline::LineBreak => false,
        }
    }

    /// Text of this run with all formatting dropped
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(t) => t.clone(),
            Inline::Strong(inner)
            | Inline::Emphasis(inner)
            | Inline::Strikethrough(inner)
            | Inline::Underline(inner) => inlines_plain_text(inner),
            Inline::Code(c) => c.clone(),
            Inline::Link { content, .. } => inlines_plain_text(content),
            Inline::Image { .. } => String::new(),
            Inline::LineBreak => "\n".to_string(),
        }
    }
}

/// Concatenated plain text of a run sequence
pub fn inlines_plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain_text).collect()
}

//! Configuration options for Markdown and plain-text rendering

/// Heading style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingStyle {
    /// Use ATX-style headings (prefixed with #)
    #[default]
    Atx,
    /// Use setext-style headings (underlined with = or -)
    /// Only works for h1 and h2, falls back to ATX for h3-h6
    Setext,
}

/// Code block style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeBlockStyle {
    /// Use fenced code blocks (```)
    #[default]
    Fenced,
    /// Use indented code blocks (4 spaces)
    Indented,
}

/// How `<u>` content is written to Markdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderlineStyle {
    /// Keep the text, drop the underline
    #[default]
    Strip,
    /// Keep literal `<u>…</u>` markup
    Html,
}

/// Options for rendering
#[derive(Debug, Clone)]
pub struct Options {
    /// Heading style (atx or setext)
    pub heading_style: HeadingStyle,

    /// Horizontal rule string
    pub hr: String,

    /// Bullet list marker for Markdown
    pub bullet_list_marker: char,

    /// Bullet glyph for plain text
    pub plain_bullet: char,

    /// Spaces per nesting level, for every list depth and both targets
    pub list_indent: usize,

    /// Code block style
    pub code_block_style: CodeBlockStyle,

    /// Fence string for fenced code blocks
    pub fence: String,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Strikethrough delimiter
    pub strike_delimiter: String,

    /// Underline handling
    pub underline: UnderlineStyle,

    /// Backslash-escape Markdown metacharacters in text runs
    pub escape_markdown: bool,

    /// Plain text: ordered lists inside ordered lists get compound labels (`1.2.`)
    pub outline_numbering: bool,

    /// Plain text: separator between table cells
    pub table_cell_separator: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Atx,
            hr: "---".to_string(),
            bullet_list_marker: '-',
            plain_bullet: '•',
            list_indent: 4,
            code_block_style: CodeBlockStyle::Fenced,
            fence: "```".to_string(),
            em_delimiter: '*',
            strong_delimiter: "**".to_string(),
            strike_delimiter: "~~".to_string(),
            underline: UnderlineStyle::Strip,
            escape_markdown: false,
            outline_numbering: true,
            table_cell_separator: "\t".to_string(),
        }
    }
}

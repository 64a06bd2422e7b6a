//! ContentService - the main entry point for content conversion.

use std::fmt;
use std::str::FromStr;

use tracing::trace;
use wpdown_core::{render_plain, serialize, Block, Options};

use crate::convert::node_to_ast;
use crate::html::parse_html;
use crate::inspect;
use crate::node::Node;
use crate::normalize::normalize_tree;
use crate::rules::RuleSet;
use crate::sanitize::{remove_block_comments, remove_empty_paragraphs, sanitize};
use crate::{Result, WpdownError};

/// Output format of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Block comments, empty paragraphs and redundant whitespace removed
    Sanitized,
    /// Sanitized, balanced, and normalized HTML
    CleanHtml,
    /// Plain text
    PlainText,
    /// Markdown
    Markdown,
}

impl FromStr for Format {
    type Err = WpdownError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "sanitized" => Ok(Format::Sanitized),
            "clean" | "clean-html" => Ok(Format::CleanHtml),
            "text" | "plain" | "plain-text" => Ok(Format::PlainText),
            "md" | "markdown" => Ok(Format::Markdown),
            _ => Err(WpdownError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Sanitized => "sanitized",
            Format::CleanHtml => "clean-html",
            Format::PlainText => "plain-text",
            Format::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// The main service for converting post content
pub struct ContentService {
    options: Options,
    rules: RuleSet,
}

impl ContentService {
    /// Create a new ContentService with default options and WordPress rules
    pub fn new() -> Self {
        Self {
            options: Options::default(),
            rules: RuleSet::wordpress(),
        }
    }

    /// Create a ContentService with custom options
    pub fn with_options(options: Options) -> Result<Self> {
        validate_options(&options)?;
        Ok(Self {
            options,
            rules: RuleSet::wordpress(),
        })
    }

    /// Replace the rule tables
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Remove block comments, empty paragraphs and redundant whitespace
    pub fn sanitize(&self, html: &str) -> String {
        sanitize(html, &self.rules)
    }

    /// Sanitize, then balance tags and normalize the tree back into HTML
    pub fn clean_html(&self, html: &str) -> String {
        let sanitized = self.sanitize(html);
        let mut tree = parse_html(&sanitized);
        normalize_tree(&mut tree, &self.rules);

        let result = tree.inner_html();
        trace!(input = html.len(), output = result.len(), "Cleaned HTML");
        result
    }

    /// Convert content to plain text
    pub fn to_plain_text(&self, html: &str) -> String {
        let result = render_plain(&self.to_ast(html), &self.options);
        trace!(input = html.len(), output = result.len(), "Rendered plain text");
        result
    }

    /// Convert content to Markdown
    pub fn to_markdown(&self, html: &str) -> String {
        let result = serialize(&self.to_ast(html), &self.options);
        trace!(input = html.len(), output = result.len(), "Rendered Markdown");
        result
    }

    /// Convert content to the requested format
    pub fn convert(&self, html: &str, format: Format) -> String {
        match format {
            Format::Sanitized => self.sanitize(html),
            Format::CleanHtml => self.clean_html(html),
            Format::PlainText => self.to_plain_text(html),
            Format::Markdown => self.to_markdown(html),
        }
    }

    /// Parse content into the normalized tree the text targets are built from
    pub fn parse(&self, html: &str) -> Node {
        let stripped = remove_block_comments(html, &self.rules);
        let stripped = remove_empty_paragraphs(&stripped);

        let mut tree = parse_html(&stripped);
        normalize_tree(&mut tree, &self.rules);
        trace!(input = html.len(), nodes = tree.children.len(), "Parsed content");
        tree
    }

    /// Parse content into the document model
    pub fn to_ast(&self, html: &str) -> Block {
        node_to_ast(&self.parse(html))
    }

    /// Check for editor block markup under the current rules
    pub fn contains_block_markup(&self, html: &str) -> bool {
        inspect::contains_block_markup(html, &self.rules)
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get the current rules
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Default for ContentService {
    fn default() -> Self {
        Self::new()
    }
}

/// Check every option against the values the renderers support
fn validate_options(options: &Options) -> Result<()> {
    if !matches!(options.bullet_list_marker, '-' | '*' | '+') {
        return Err(WpdownError::InvalidOption(format!(
            "bullet_list_marker must be one of -, * or +, got {:?}",
            options.bullet_list_marker
        )));
    }

    if !matches!(options.em_delimiter, '*' | '_') {
        return Err(WpdownError::InvalidOption(format!(
            "em_delimiter must be * or _, got {:?}",
            options.em_delimiter
        )));
    }

    if !matches!(options.strong_delimiter.as_str(), "**" | "__") {
        return Err(WpdownError::InvalidOption(format!(
            "strong_delimiter must be ** or __, got {:?}",
            options.strong_delimiter
        )));
    }

    if !is_repeated(&options.fence, &['`', '~']) {
        return Err(WpdownError::InvalidOption(format!(
            "fence must be at least three backticks or tildes, got {:?}",
            options.fence
        )));
    }

    if !is_repeated(&options.hr, &['-', '*', '_']) {
        return Err(WpdownError::InvalidOption(format!(
            "hr must be at least three of the same -, * or _, got {:?}",
            options.hr
        )));
    }

    if !(2..=8).contains(&options.list_indent) {
        return Err(WpdownError::InvalidOption(format!(
            "list_indent must be between 2 and 8, got {}",
            options.list_indent
        )));
    }

    Ok(())
}

/// Three or more copies of one character from `allowed`
fn is_repeated(s: &str, allowed: &[char]) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    allowed.contains(&first) && chars.all(|c| c == first) && s.chars().count() >= 3
}

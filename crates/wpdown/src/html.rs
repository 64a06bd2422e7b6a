//! HTML parsing support.
//!
//! Builds a [`Node`] tree from the token stream with a stack of open elements.
//! Only the implied-end-tag rules that matter for post content are applied:
//! a new `li` closes the open one, `dt`/`dd` close each other, a block start
//! closes an open paragraph, and table rows and cells close their siblings.
//! Anything still open at the end of input is closed innermost-first.

use tracing::debug;

use crate::node::Node;
use crate::token::{tokenize, Token};
use crate::utilities::{is_block, is_void};

/// Deepest element nesting the builder creates; deeper start tags are added flat
pub const MAX_DEPTH: usize = 256;

/// Parse an HTML string into a Node tree.
///
/// The result is a document fragment holding the top-level nodes. Parsing
/// never fails: stray end tags are ignored and unterminated markup at the end
/// of input is dropped.
///
/// # Example
///
/// ```rust
/// use wpdown::parse_html;
///
/// let node = parse_html("<ul><li>One<li>Two</ul><p>Open");
/// assert_eq!(node.inner_html(), "<ul><li>One</li><li>Two</li></ul><p>Open</p>");
/// ```
pub fn parse_html(html: &str) -> Node {
    let mut builder = TreeBuilder::new();

    for token in tokenize(html) {
        match token {
            Token::StartTag {
                name,
                attrs,
                self_closing,
            } => builder.start_tag(&name, attrs, self_closing),
            Token::EndTag { name } => builder.end_tag(&name),
            Token::Text(text) => builder.current().add_child(Node::text(text)),
            Token::Comment(text) => builder.current().add_child(Node::comment(text)),
            Token::Doctype => {}
        }
    }

    builder.finish()
}

struct TreeBuilder {
    /// Open elements; index 0 is the fragment root
    stack: Vec<Node>,
    depth_capped: bool,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Node::document_fragment()],
            depth_capped: false,
        }
    }

    fn current(&mut self) -> &mut Node {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn start_tag(&mut self, name: &str, attrs: crate::token::Attrs, self_closing: bool) {
        self.close_implied(name);

        let node = Node::element_with_attrs(name, attrs);
        if is_void(name) || self_closing {
            self.current().add_child(node);
        } else if self.stack.len() > MAX_DEPTH {
            if !self.depth_capped {
                debug!(tag = name, depth = MAX_DEPTH, "Nesting too deep, adding elements flat");
                self.depth_capped = true;
            }
            self.current().add_child(node);
        } else {
            self.stack.push(node);
        }
    }

    fn end_tag(&mut self, name: &str) {
        if is_void(name) {
            return;
        }
        match self.find_open(name, &[]) {
            Some(index) => self.close_to(index),
            None => debug!(tag = name, "Ignoring stray end tag"),
        }
    }

    /// Close elements that the start of `name` implicitly ends
    fn close_implied(&mut self, name: &str) {
        let target = match name {
            "li" => self.find_open("li", &["ul", "ol", "table"]),
            "dt" | "dd" => self
                .find_open("dt", &["dl", "table"])
                .or_else(|| self.find_open("dd", &["dl", "table"])),
            "tr" => self
                .find_open_any(&["tr", "td", "th"], &["table"])
                .map(|i| self.row_start(i)),
            "td" | "th" => self.find_open_any(&["td", "th"], &["tr", "table"]),
            "thead" | "tbody" | "tfoot" => {
                self.find_open_any(&["thead", "tbody", "tfoot", "tr"], &["table"])
            }
            _ => None,
        };
        if let Some(index) = target {
            self.close_to(index);
        }

        if is_block(name) {
            if let Some(index) = self.open_paragraph() {
                self.close_to(index);
            }
        }
    }

    /// Index of the `tr` owning the element at `index`, if there is one
    fn row_start(&self, index: usize) -> usize {
        self.stack[..=index]
            .iter()
            .rposition(|n| n.is("tr"))
            .unwrap_or(index)
    }

    /// An open `p` with nothing but inline elements above it
    fn open_paragraph(&self) -> Option<usize> {
        for (index, node) in self.stack.iter().enumerate().skip(1).rev() {
            if node.is("p") {
                return Some(index);
            }
            if is_block(node.tag_name()) {
                return None;
            }
        }
        None
    }

    fn find_open(&self, tag: &str, boundaries: &[&str]) -> Option<usize> {
        self.find_open_any(&[tag], boundaries)
    }

    /// Innermost open element named in `tags`, not looking past a boundary element
    fn find_open_any(&self, tags: &[&str], boundaries: &[&str]) -> Option<usize> {
        for (index, node) in self.stack.iter().enumerate().skip(1).rev() {
            let tag = node.tag_name();
            if tags.contains(&tag) {
                return Some(index);
            }
            if boundaries.contains(&tag) {
                return None;
            }
        }
        None
    }

    /// Pop every element down to and including `index`
    fn close_to(&mut self, index: usize) {
        while self.stack.len() > index.max(1) {
            if let Some(node) = self.stack.pop() {
                self.current().add_child(node);
            }
        }
    }

    fn finish(mut self) -> Node {
        if self.stack.len() > 1 {
            let open: Vec<&str> = self.stack[1..].iter().map(|n| n.tag_name()).collect();
            debug!(open = ?open, "Auto-closing elements at end of input");
            self.close_to(1);
        }
        self.stack.pop().unwrap_or_else(Node::document_fragment)
    }
}

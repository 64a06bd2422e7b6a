//! Utility functions and constants for HTML processing.

use std::borrow::Cow;

use crate::node::Node;

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "caption", "center", "dd", "details", "dir", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "frameset", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hgroup", "hr", "html", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "summary", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
    "video",
];

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose content never reaches text output
pub const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Check if an element's content is dropped from text output
pub fn is_skipped(tag: &str) -> bool {
    SKIPPED_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

pub fn is_list(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("ul") || tag.eq_ignore_ascii_case("ol")
}

/// Decode HTML entities; unknown entities are left as written
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if text.contains('&') {
        html_escape::decode_html_entities(text)
    } else {
        Cow::Borrowed(text)
    }
}

/// Decoded text of a subtree with all tags stripped.
///
/// Skipped elements and comments contribute nothing. With `break_lines`,
/// `<br>` becomes a newline; otherwise it is dropped.
pub fn strip_tags(node: &Node, break_lines: bool) -> String {
    let mut raw = String::new();
    collect_text(node, break_lines, &mut raw);
    decode_entities(&raw).into_owned()
}

fn collect_text(node: &Node, break_lines: bool, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(child.node_value.as_deref().unwrap_or(""));
        } else if child.is("br") {
            if break_lines {
                out.push('\n');
            }
        } else if child.is_element() && !is_skipped(child.tag_name()) {
            collect_text(child, break_lines, out);
        }
    }
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> Option<String> {
    value
        .map(|v| decode_entities(v.trim()).into_owned())
        .filter(|v| !v.is_empty())
}

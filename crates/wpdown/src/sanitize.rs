//! Text-level cleanup of editor output.
//!
//! These passes run on the raw HTML string before any tree is built: block
//! delimiter comments go first, then empty paragraphs, then redundant
//! whitespace. The order makes [`sanitize`] idempotent.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;
use wpdown_core::whitespace::{collapse_blank_lines, strip_trailing_whitespace};

use crate::rules::RuleSet;
use crate::utilities::is_block;

static EMPTY_PARAGRAPH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<p(?:\s[^>]*)?>(?:\s|&nbsp;|&#160;|<br\s*/?>)*</p>")
        .expect("Invalid empty paragraph regex")
});

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9:-]*)[^<>]*>").expect("Invalid tag regex")
});

/// Full text-level cleanup: block comments, empty paragraphs, whitespace
pub fn sanitize(html: &str, rules: &RuleSet) -> String {
    let stripped = remove_block_comments(html, rules);
    let stripped = remove_empty_paragraphs(&stripped);
    let result = normalize_html_whitespace(&stripped);
    trace!(input = html.len(), output = result.len(), "Sanitized content");
    result
}

/// Remove every opening, closing and self-closing block delimiter comment
pub fn remove_block_comments<'a>(html: &'a str, rules: &RuleSet) -> Cow<'a, str> {
    let Some((open, close)) = rules.block_patterns() else {
        return Cow::Borrowed(html);
    };
    match open.replace_all(html, "") {
        Cow::Borrowed(s) => close.replace_all(s, ""),
        Cow::Owned(s) => Cow::Owned(close.replace_all(&s, "").into_owned()),
    }
}

/// Remove paragraphs holding nothing but whitespace, `&nbsp;` and line breaks
pub fn remove_empty_paragraphs(html: &str) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(html);
    loop {
        let next = EMPTY_PARAGRAPH.replace_all(&current, "").into_owned();
        if next.len() == current.len() {
            return current;
        }
        current = Cow::Owned(next);
    }
}

/// Whitespace cleanup for HTML output.
///
/// Strips trailing whitespace on every line, collapses blank-line runs, removes
/// whitespace between two tags unless both are inline, and trims the result.
pub fn normalize_html_whitespace(html: &str) -> String {
    let stripped = strip_trailing_whitespace(html, false);
    let collapsed = collapse_blank_lines(&stripped);
    remove_intertag_whitespace(&collapsed).trim().to_string()
}

/// Remove whitespace-only runs between adjacent tags.
///
/// Whitespace between two inline tags is kept: `<b>a</b> <i>b</i>` needs its space.
pub fn remove_intertag_whitespace(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut last_end = 0;
    let mut prev_tag: Option<&str> = None;

    for caps in TAG.captures_iter(html) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let gap = &html[last_end..whole.start()];

        let droppable = match prev_tag {
            Some(prev) if !gap.is_empty() && gap.trim().is_empty() => {
                is_block(prev) || is_block(name.as_str())
            }
            _ => false,
        };
        if !droppable {
            result.push_str(gap);
        }
        result.push_str(whole.as_str());

        last_end = whole.end();
        prev_tag = Some(name.as_str());
    }
    result.push_str(&html[last_end..]);

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wp() -> RuleSet {
        RuleSet::wordpress()
    }

    #[test]
    fn test_remove_block_comments() {
        let html = "<!-- wp:paragraph -->\n<p>Text</p>\n<!-- /wp:paragraph -->";
        assert_eq!(remove_block_comments(html, &wp()), "<p>Text</p>");
    }

    #[test]
    fn test_remove_self_closing_and_attribute_comments() {
        let html = "<!-- wp:image {\"id\":12,\"sizeSlug\":\"large\"} -->\n<figure></figure>\n<!-- /wp:image --><!-- wp:spacer /-->";
        assert_eq!(remove_block_comments(html, &wp()), "<figure></figure>");
    }

    #[test]
    fn test_other_comments_kept() {
        let html = "<!-- note --><p>x</p>";
        assert_eq!(remove_block_comments(html, &wp()), html);
        assert_eq!(
            remove_block_comments("<!-- wp:x --><p>x</p>", &RuleSet::empty()),
            "<!-- wp:x --><p>x</p>"
        );
    }

    #[test]
    fn test_remove_empty_paragraphs() {
        assert_eq!(remove_empty_paragraphs("<p></p><p>x</p>"), "<p>x</p>");
        assert_eq!(remove_empty_paragraphs("<p>  </p>"), "");
        assert_eq!(remove_empty_paragraphs("<p><br><br/> &nbsp;</p>"), "");
        assert_eq!(remove_empty_paragraphs("<p class=\"a\">\n</p>"), "");
        assert_eq!(remove_empty_paragraphs("<pre> </pre>"), "<pre> </pre>");
    }

    #[test]
    fn test_intertag_whitespace() {
        assert_eq!(
            remove_intertag_whitespace("<div>\n  <p>x</p>\n</div>"),
            "<div><p>x</p></div>"
        );
        assert_eq!(
            remove_intertag_whitespace("<strong>a</strong> <em>b</em>"),
            "<strong>a</strong> <em>b</em>"
        );
        assert_eq!(
            remove_intertag_whitespace("<p>a b</p> text <p>c</p>"),
            "<p>a b</p> text <p>c</p>"
        );
    }

    #[test]
    fn test_sanitize_wordpress_content() {
        let input = r#"<!-- wp:paragraph -->
<p>This is a paragraph with <strong>bold</strong> text.</p>
<!-- /wp:paragraph -->



<!-- wp:heading -->
<h2>This is a heading</h2>
<!-- /wp:heading -->

<p></p>

<p>   </p>"#;
        let expected =
            "<p>This is a paragraph with <strong>bold</strong> text.</p><h2>This is a heading</h2>";
        assert_eq!(sanitize(input, &wp()), expected);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let input = "<div>\n<p>a <b>b</b> <i>c</i></p>  \n\n\n<p></p>\n<ul>\n<li>x</li>\n</ul></div>";
        let once = sanitize(input, &wp());
        assert_eq!(sanitize(&once, &wp()), once);
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize("", &wp()), "");
        assert_eq!(sanitize("   \n\n  ", &wp()), "");
    }
}

//! Content inspection helpers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::RuleSet;

static STYLE_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<[a-z][^>]*\sstyle\s*="#).expect("Invalid style attribute regex")
});

static STYLE_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("Invalid style element regex")
});

/// Check for editor block markup: delimiter comments or generated block classes
pub fn contains_block_markup(html: &str, rules: &RuleSet) -> bool {
    if html.contains("wp-block-") {
        return true;
    }
    rules
        .block_patterns()
        .is_some_and(|(open, close)| open.is_match(html) || close.is_match(html))
}

/// Check for `style` attributes or `<style>` elements
pub fn has_inline_styles(html: &str) -> bool {
    STYLE_ATTRIBUTE.is_match(html) || html.to_ascii_lowercase().contains("<style")
}

/// Every complete `<style>…</style>` element, in document order
pub fn extract_style_blocks(html: &str) -> Vec<String> {
    STYLE_ELEMENT
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// All style elements joined by newlines
pub fn extract_inline_styles(html: &str) -> String {
    extract_style_blocks(html).join("\n")
}

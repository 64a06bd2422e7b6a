//! Rule tables for cleaning editor output.
//!
//! A [`RuleSet`] is immutable configuration data handed to the pipeline: which
//! comment namespaces delimit editor blocks, which class and attribute names are
//! generated noise, and which deprecated tags are rewritten to what.

mod rule;

pub use rule::{Filter, TagRewrite};

use indexmap::IndexMap;
use regex::Regex;

/// Collection of rules for sanitizing and normalizing content
pub struct RuleSet {
    /// Comment namespaces delimiting editor blocks (`<!-- wp:... -->`)
    block_namespaces: Vec<String>,
    /// Compiled opening/self-closing and closing delimiter patterns
    block_patterns: Option<(Regex, Regex)>,
    /// Class names removed from `class` attributes
    class_filters: Vec<Filter>,
    /// Attributes removed whatever their value
    attribute_filters: Vec<Filter>,
    /// Attributes removed when their value is empty
    drop_when_empty: Vec<String>,
    /// Deprecated tag rewrites, applied in insertion order
    tag_rewrites: IndexMap<String, TagRewrite>,
}

impl RuleSet {
    /// Rules for WordPress block-editor content
    pub fn wordpress() -> Self {
        let alignment = Regex::new("^align(?:left|right|center|none|wide|full)$").ok();

        let mut rules = Self::empty()
            .add_block_namespace("wp")
            .strip_class(Filter::prefix("wp-"))
            .strip_class(Filter::prefix("block-"))
            .strip_attribute(Filter::prefix("data-"))
            .drop_when_empty("id")
            .drop_when_empty("class")
            .drop_when_empty("style")
            .drop_when_empty("title")
            .rewrite_tag("center", TagRewrite::with_style("div", "text-align: center;"))
            .rewrite_tag("font", TagRewrite::to("span"))
            .rewrite_tag("b", TagRewrite::to("strong"))
            .rewrite_tag("i", TagRewrite::to("em"))
            .rewrite_tag("strike", TagRewrite::to("del"));

        if let Some(re) = alignment {
            rules = rules.strip_class(Filter::pattern(re));
        }
        rules
    }

    /// A rule set that changes nothing
    pub fn empty() -> Self {
        Self {
            block_namespaces: Vec::new(),
            block_patterns: None,
            class_filters: Vec::new(),
            attribute_filters: Vec::new(),
            drop_when_empty: Vec::new(),
            tag_rewrites: IndexMap::new(),
        }
    }

    /// Treat `<!-- namespace:... -->` comments as block delimiters
    pub fn add_block_namespace(mut self, namespace: &str) -> Self {
        let namespace = namespace.trim().to_string();
        if namespace.is_empty() || self.block_namespaces.contains(&namespace) {
            return self;
        }
        self.block_namespaces.push(namespace);
        self.block_patterns = compile_block_patterns(&self.block_namespaces);
        self
    }

    /// Remove class names matching `filter`
    pub fn strip_class(mut self, filter: Filter) -> Self {
        self.class_filters.push(filter);
        self
    }

    /// Remove attributes whose name matches `filter`
    pub fn strip_attribute(mut self, filter: Filter) -> Self {
        self.attribute_filters.push(filter);
        self
    }

    /// Remove the attribute `name` when its value is blank
    pub fn drop_when_empty(mut self, name: &str) -> Self {
        self.drop_when_empty.push(name.to_ascii_lowercase());
        self
    }

    /// Rewrite every `tag` element according to `rewrite`
    pub fn rewrite_tag(mut self, tag: &str, rewrite: TagRewrite) -> Self {
        self.tag_rewrites.insert(tag.to_ascii_lowercase(), rewrite);
        self
    }

    pub fn block_namespaces(&self) -> &[String] {
        &self.block_namespaces
    }

    /// Opening and closing block-delimiter patterns, if any namespace is set
    pub fn block_patterns(&self) -> Option<(&Regex, &Regex)> {
        self.block_patterns.as_ref().map(|(open, close)| (open, close))
    }

    /// Check if a class name is generated and should be removed
    pub fn is_generated_class(&self, class: &str) -> bool {
        self.class_filters.iter().any(|f| f.matches(class))
    }

    /// Check if an attribute is always removed
    pub fn is_stripped_attribute(&self, name: &str) -> bool {
        self.attribute_filters.iter().any(|f| f.matches(name))
    }

    /// Check if an attribute is removed when blank
    pub fn drops_when_empty(&self, name: &str) -> bool {
        self.drop_when_empty
            .iter()
            .any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Rewrite for a deprecated tag
    pub fn rewrite_for(&self, tag: &str) -> Option<&TagRewrite> {
        self.tag_rewrites.get(tag)
    }

    /// Deprecated tag rewrites in application order
    pub fn tag_rewrites(&self) -> impl Iterator<Item = (&str, &TagRewrite)> {
        self.tag_rewrites.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::wordpress()
    }
}

fn compile_block_patterns(namespaces: &[String]) -> Option<(Regex, Regex)> {
    let alternatives = namespaces
        .iter()
        .map(|ns| regex::escape(ns))
        .collect::<Vec<_>>()
        .join("|");

    // Opening and self-closing delimiters eat the whitespace after them,
    // closing delimiters the whitespace before them
    let open = Regex::new(&format!(r"(?s)<!--\s*(?:{}):.*?-->\s*", alternatives)).ok()?;
    let close = Regex::new(&format!(r"(?s)\s*<!--\s*/(?:{}):.*?-->", alternatives)).ok()?;
    Some((open, close))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wordpress_classes() {
        let rules = RuleSet::wordpress();
        assert!(rules.is_generated_class("wp-block-paragraph"));
        assert!(rules.is_generated_class("block-editor"));
        assert!(rules.is_generated_class("alignwide"));
        assert!(!rules.is_generated_class("alignment"));
        assert!(!rules.is_generated_class("highlight"));
    }

    #[test]
    fn test_wordpress_attributes() {
        let rules = RuleSet::wordpress();
        assert!(rules.is_stripped_attribute("data-id"));
        assert!(!rules.is_stripped_attribute("href"));
        assert!(rules.drops_when_empty("style"));
        assert!(!rules.drops_when_empty("alt"));
    }

    #[test]
    fn test_rewrite_order() {
        let rules = RuleSet::wordpress();
        let tags: Vec<&str> = rules.tag_rewrites().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec!["center", "font", "b", "i", "strike"]);
        assert_eq!(
            rules.rewrite_for("center"),
            Some(&TagRewrite::with_style("div", "text-align: center;"))
        );
        assert_eq!(rules.rewrite_for("u"), None);
    }

    #[test]
    fn test_block_comment_detection() {
        let rules = RuleSet::wordpress();
        let Some((open, close)) = rules.block_patterns() else {
            panic!("wordpress rules have block patterns");
        };
        assert!(open.is_match("<!-- wp:paragraph -->"));
        assert!(close.is_match("<!-- /wp:paragraph -->"));
        assert!(!open.is_match("<!-- wpx:paragraph -->"));
        assert!(!open.is_match("<!-- a note -->"));
        assert!(!close.is_match("<!-- a note -->"));
    }

    #[test]
    fn test_custom_namespace() {
        let rules = RuleSet::empty().add_block_namespace("kb");
        let Some((open, close)) = rules.block_patterns() else {
            panic!("patterns should be compiled");
        };
        assert!(open.is_match("<!-- kb:card {\"a\":1} -->"));
        assert!(close.is_match("<!-- /kb:card -->"));
        assert!(!open.is_match("<!-- wp:paragraph -->"));
    }

    #[test]
    fn test_empty_rules() {
        let rules = RuleSet::empty();
        assert!(rules.block_patterns().is_none());
        assert!(!rules.is_generated_class("wp-block"));
        assert!(rules.rewrite_for("b").is_none());
    }
}

//! Filter and TagRewrite types for the rule tables.

use regex::Regex;

/// A filter decides whether a class name or attribute name matches a rule
pub enum Filter {
    /// Match a single name exactly
    Exact(String),
    /// Match names starting with a prefix
    Prefix(String),
    /// Match names against a regular expression
    Pattern(Regex),
    /// Match using a predicate function
    Predicate(Box<dyn Fn(&str) -> bool + Send + Sync>),
}

impl Filter {
    /// Create a filter for a single name
    pub fn exact(name: &str) -> Self {
        Filter::Exact(name.to_ascii_lowercase())
    }

    /// Create a filter for a name prefix
    pub fn prefix(prefix: &str) -> Self {
        Filter::Prefix(prefix.to_ascii_lowercase())
    }

    /// Create a filter from a compiled pattern
    pub fn pattern(regex: Regex) -> Self {
        Filter::Pattern(regex)
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches a name
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Filter::Exact(n) => name.eq_ignore_ascii_case(n),
            Filter::Prefix(p) => name
                .get(..p.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(p)),
            Filter::Pattern(re) => re.is_match(name),
            Filter::Predicate(f) => f(name),
        }
    }
}

/// Replacement for a deprecated tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRewrite {
    /// Tag name to use instead
    pub tag: String,
    /// Inline style declarations added to the rewritten element
    pub style: Option<String>,
}

impl TagRewrite {
    /// Rename to `tag`
    pub fn to(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            style: None,
        }
    }

    /// Rename to `tag` and add `style`
    pub fn with_style(tag: &str, style: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            style: Some(style.to_string()),
        }
    }
}

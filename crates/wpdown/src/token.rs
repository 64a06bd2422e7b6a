//! Streaming HTML tokenizer.
//!
//! Splits markup into start tags, end tags, text, comments and doctypes. It is
//! deliberately small: enough HTML to drive the tree builder in [`crate::html`],
//! never an error. Text and attribute values are returned raw; entity decoding
//! happens when text is converted.

use smallvec::SmallVec;

/// Attribute list of a start tag, in source order
pub type Attrs = SmallVec<[(String, String); 4]>;

/// A single lexical unit of HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name attr="v">` or `<name/>`
    StartTag {
        name: String,
        attrs: Attrs,
        self_closing: bool,
    },
    /// `</name>`
    EndTag { name: String },
    /// Raw character data
    Text(&'a str),
    /// Body of `<!-- ... -->`
    Comment(&'a str),
    /// `<!DOCTYPE ...>`, `<![CDATA[...]]>` and other `<!` declarations
    Doctype,
}

/// Elements whose content is raw text up to the matching end tag
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

enum Markup<'a> {
    Token(Token<'a>, usize),
    /// A `<` that does not open markup; it is text
    NotMarkup,
    /// Markup that runs off the end of the input
    Unterminated,
}

/// Iterator over the tokens of an HTML string
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    raw_text: Option<String>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            raw_text: None,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// Text from `start` up to the next `<` at or after `from`
    fn text_until_markup(&mut self, start: usize, from: usize) -> Token<'a> {
        let end = self.input[from..]
            .find('<')
            .map_or(self.input.len(), |i| from + i);
        self.pos = end;
        Token::Text(&self.input[start..end])
    }

    /// Content of a raw-text element up to (not including) its end tag
    fn raw_text_until(&mut self, name: &str) -> Option<Token<'a>> {
        let start = self.pos;
        let needle = format!("</{}", name);
        let rest = self.input[start..].to_ascii_lowercase();
        let end = rest.find(&needle).map_or(self.input.len(), |i| start + i);
        self.pos = end;
        if end > start {
            Some(Token::Text(&self.input[start..end]))
        } else {
            None
        }
    }

    fn markup(&self, start: usize) -> Markup<'a> {
        let bytes = self.bytes();
        match bytes.get(start + 1) {
            Some(b'!') => self.declaration(start),
            Some(b'/') => match bytes.get(start + 2) {
                Some(c) if c.is_ascii_alphabetic() => self.end_tag(start),
                _ => Markup::NotMarkup,
            },
            Some(c) if c.is_ascii_alphabetic() => self.start_tag(start),
            _ => Markup::NotMarkup,
        }
    }

    fn declaration(&self, start: usize) -> Markup<'a> {
        let input = self.input;
        if input[start..].starts_with("<!--") {
            let body_start = start + 4;
            return match input[body_start..].find("-->") {
                Some(i) => Markup::Token(
                    Token::Comment(&input[body_start..body_start + i]),
                    body_start + i + 3,
                ),
                None => Markup::Unterminated,
            };
        }
        if input[start..].starts_with("<![CDATA[") {
            return match input[start..].find("]]>") {
                Some(i) => Markup::Token(Token::Doctype, start + i + 3),
                None => Markup::Unterminated,
            };
        }
        match input[start..].find('>') {
            Some(i) => Markup::Token(Token::Doctype, start + i + 1),
            None => Markup::Unterminated,
        }
    }

    fn end_tag(&self, start: usize) -> Markup<'a> {
        let name_start = start + 2;
        let name_end = self.scan_name(name_start);
        let name = self.input[name_start..name_end].to_ascii_lowercase();
        match self.input[name_end..].find('>') {
            Some(i) => Markup::Token(Token::EndTag { name }, name_end + i + 1),
            None => Markup::Unterminated,
        }
    }

    fn start_tag(&self, start: usize) -> Markup<'a> {
        let bytes = self.bytes();
        let input = self.input;
        let name_start = start + 1;
        let name_end = self.scan_name(name_start);
        let name = input[name_start..name_end].to_ascii_lowercase();

        let mut attrs = Attrs::new();
        let mut pos = name_end;

        loop {
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            let Some(&c) = bytes.get(pos) else {
                return Markup::Unterminated;
            };

            match c {
                b'>' => {
                    let token = Token::StartTag {
                        name,
                        attrs,
                        self_closing: false,
                    };
                    return Markup::Token(token, pos + 1);
                }
                b'/' if bytes.get(pos + 1) == Some(&b'>') => {
                    let token = Token::StartTag {
                        name,
                        attrs,
                        self_closing: true,
                    };
                    return Markup::Token(token, pos + 2);
                }
                b'/' => pos += 1,
                _ => {
                    let attr_start = pos;
                    while pos < bytes.len()
                        && !bytes[pos].is_ascii_whitespace()
                        && !matches!(bytes[pos], b'=' | b'>' | b'/')
                    {
                        pos += 1;
                    }
                    if pos == attr_start {
                        // Stray `=`
                        pos += 1;
                        continue;
                    }
                    let attr_name = input[attr_start..pos].to_ascii_lowercase();

                    let mut value_pos = pos;
                    while value_pos < bytes.len() && bytes[value_pos].is_ascii_whitespace() {
                        value_pos += 1;
                    }
                    if bytes.get(value_pos) != Some(&b'=') {
                        attrs.push((attr_name, String::new()));
                        continue;
                    }

                    pos = value_pos + 1;
                    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                        pos += 1;
                    }

                    let value = match bytes.get(pos) {
                        Some(&quote) if quote == b'"' || quote == b'\'' => {
                            let value_start = pos + 1;
                            let Some(len) = input[value_start..].find(quote as char) else {
                                // Unclosed quote: the value and the tag end at the next `>`
                                return match input[value_start..].find('>') {
                                    Some(len) => {
                                        let value = &input[value_start..value_start + len];
                                        attrs.push((attr_name, value.to_string()));
                                        let token = Token::StartTag {
                                            name,
                                            attrs,
                                            self_closing: false,
                                        };
                                        Markup::Token(token, value_start + len + 1)
                                    }
                                    None => Markup::Unterminated,
                                };
                            };
                            pos = value_start + len + 1;
                            &input[value_start..value_start + len]
                        }
                        _ => {
                            let value_start = pos;
                            while pos < bytes.len()
                                && !bytes[pos].is_ascii_whitespace()
                                && bytes[pos] != b'>'
                            {
                                pos += 1;
                            }
                            &input[value_start..pos]
                        }
                    };
                    attrs.push((attr_name, value.to_string()));
                }
            }
        }
    }

    fn scan_name(&self, from: usize) -> usize {
        let bytes = self.bytes();
        let mut pos = from;
        while pos < bytes.len()
            && (bytes[pos].is_ascii_alphanumeric() || matches!(bytes[pos], b'-' | b':' | b'_'))
        {
            pos += 1;
        }
        pos
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(name) = self.raw_text.take() {
            if let Some(text) = self.raw_text_until(&name) {
                return Some(text);
            }
        }

        let start = self.pos;
        if start >= self.input.len() {
            return None;
        }

        if self.bytes()[start] != b'<' {
            return Some(self.text_until_markup(start, start));
        }

        match self.markup(start) {
            Markup::Token(token, end) => {
                self.pos = end;
                if let Token::StartTag {
                    name,
                    self_closing: false,
                    ..
                } = &token
                {
                    if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                        self.raw_text = Some(name.clone());
                    }
                }
                Some(token)
            }
            Markup::NotMarkup => Some(self.text_until_markup(start, start + 1)),
            Markup::Unterminated => {
                self.pos = self.input.len();
                None
            }
        }
    }
}

/// Tokenize an HTML string
pub fn tokenize(html: &str) -> Tokenizer<'_> {
    Tokenizer::new(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(html: &str) -> Vec<Token<'_>> {
        tokenize(html).collect()
    }

    fn start(name: &str, attrs: &[(&str, &str)]) -> Token<'static> {
        Token::StartTag {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            self_closing: false,
        }
    }

    fn end(name: &str) -> Token<'static> {
        Token::EndTag {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_simple_element() {
        assert_eq!(
            tokens("<p>Hello</p>"),
            vec![start("p", &[]), Token::Text("Hello"), end("p")]
        );
    }

    #[test]
    fn test_names_are_lowercased() {
        assert_eq!(
            tokens("<DIV CLASS=\"x\"></Div>"),
            vec![start("div", &[("class", "x")]), end("div")]
        );
    }

    #[test]
    fn test_attribute_forms() {
        let html = "<img src='a.png' alt=\"An image\" width=10 hidden>";
        assert_eq!(
            tokens(html),
            vec![start(
                "img",
                &[
                    ("src", "a.png"),
                    ("alt", "An image"),
                    ("width", "10"),
                    ("hidden", "")
                ]
            )]
        );
    }

    #[test]
    fn test_attribute_spanning_lines() {
        let html = "<a\n  href=\"https://example.com\"\n  title=\"multi\nline\">x</a>";
        let toks = tokens(html);
        assert_eq!(
            toks[0],
            start(
                "a",
                &[("href", "https://example.com"), ("title", "multi\nline")]
            )
        );
        assert_eq!(toks[1], Token::Text("x"));
    }

    #[test]
    fn test_self_closing() {
        assert_eq!(
            tokens("a<br/>b"),
            vec![
                Token::Text("a"),
                Token::StartTag {
                    name: "br".to_string(),
                    attrs: Attrs::new(),
                    self_closing: true
                },
                Token::Text("b")
            ]
        );
    }

    #[test]
    fn test_comment_and_doctype() {
        assert_eq!(
            tokens("<!DOCTYPE html><!-- wp:paragraph -->x"),
            vec![Token::Doctype, Token::Comment(" wp:paragraph "), Token::Text("x")]
        );
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        assert_eq!(
            tokens("a < b"),
            vec![Token::Text("a "), Token::Text("< b")]
        );
        assert_eq!(tokens("</ x"), vec![Token::Text("</ x")]);
    }

    #[test]
    fn test_unterminated_tag_dropped() {
        assert_eq!(tokens("ok<strong"), vec![Token::Text("ok")]);
        assert_eq!(tokens("ok<a href=\"x"), vec![Token::Text("ok")]);
        assert_eq!(tokens("ok<!-- never closed"), vec![Token::Text("ok")]);
    }

    #[test]
    fn test_unclosed_quote_ends_at_next_bracket() {
        assert_eq!(
            tokens("<p title=\"oops>Kept</p>"),
            vec![start("p", &[("title", "oops")]), Token::Text("Kept"), end("p")]
        );
        assert_eq!(
            tokens("<a href='x class=y>z"),
            vec![start("a", &[("href", "x class=y")]), Token::Text("z")]
        );
    }

    #[test]
    fn test_raw_text_elements() {
        assert_eq!(
            tokens("<script>if (a < b) { x(); }</script>"),
            vec![
                start("script", &[]),
                Token::Text("if (a < b) { x(); }"),
                end("script")
            ]
        );
        assert_eq!(
            tokens("<style>p > a {}</STYLE>"),
            vec![start("style", &[]), Token::Text("p > a {}"), end("style")]
        );
    }

    #[test]
    fn test_unicode_text() {
        assert_eq!(
            tokens("<p>café • ünïcode</p>"),
            vec![start("p", &[]), Token::Text("café • ünïcode"), end("p")]
        );
    }
}

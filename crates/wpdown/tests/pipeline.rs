//! End-to-end behaviour of the four conversions on WordPress post content.

use wpdown::{clean_html, convert, sanitize, to_markdown, to_plain_text, ContentService, Format};

const FORMATTED_POST: &str = r#"<p>This is a <strong>test</strong> paragraph with some <em>formatting</em>.</p>
<ul>
  <li>Item 1</li>
  <li>Item 2</li>
  <li>Item <strong>3</strong> with formatting</li>
</ul>
<ol>
  <li>First item</li>
  <li>Second item</li>
  <li>Third item with <a href="https://example.com">link</a></li>
</ol>
<h2>Sample Heading</h2>
<blockquote>This is a blockquote example.</blockquote>"#;

const NESTED_LIST: &str = r#"<ul>
  <li>Parent item 1</li>
  <li>Parent item 2
    <ul>
      <li>Child item 1</li>
      <li>Child item 2
        <ul>
          <li>Grandchild item</li>
        </ul>
      </li>
    </ul>
  </li>
  <li>Parent item 3</li>
</ul>"#;

const MIXED_CONTENT: &str = r#"<h1>Mixed Content Test</h1>
<p>Paragraph before list</p>
<ul>
  <li>List item with <strong>bold</strong> and <em>italic</em> text</li>
  <li>List item with <a href="https://example.com">link</a></li>
</ul>
<blockquote>Blockquote after list</blockquote>
<p>Paragraph with <code>inline code</code> and a break<br>new line</p>
<pre><code>Code block here</code></pre>
<table>
  <tr><th>Header</th></tr>
  <tr><td>Cell</td></tr>
</table>"#;

#[test]
fn test_sanitize_block_comments_and_empty_paragraphs() {
    let content = r#"<!-- wp:paragraph -->
<p>This is a test paragraph.</p>
<!-- /wp:paragraph -->

<!-- wp:list -->
<ul>
  <li>Item 1</li>
  <li>Item 2</li>
</ul>
<!-- /wp:list -->

<p></p>
<p> </p>
<p><br /></p>"#;

    let sanitized = sanitize(content);

    assert!(!sanitized.contains("<!-- wp:"));
    assert!(!sanitized.contains("<!-- /wp:"));
    assert!(!sanitized.contains("<p></p>"));
    assert!(!sanitized.contains("<p> </p>"));
    assert!(!sanitized.contains("<p><br /></p>"));
    assert!(sanitized.contains("<p>This is a test paragraph.</p>"));
    assert!(sanitized.contains("<ul>"));
    assert!(sanitized.contains("<li>Item 1</li>"));
}

#[test]
fn test_sanitize_is_idempotent() {
    let content = "<!-- wp:heading {\"level\":3} -->\n<h3>Title</h3>\n<!-- /wp:heading -->\n<p>  </p>\n<p>Body   text</p>";
    let once = sanitize(content);
    assert_eq!(sanitize(&once), once);
}

#[test]
fn test_clean_html_removes_generated_markup() {
    let content = r#"<p class="wp-block-paragraph aligncenter" style="">Paragraph with WordPress classes</p>
<div data-wp-block="true" data-align="wide">Block with data attributes</div>
<center>This text is centered</center>
<font color="red">Red text</font>
<b>Bold text</b> and <i>italic text</i>
<ul><li>Item 1</li><li>Item 2</li></ul>"#;

    let cleaned = clean_html(content);

    assert!(!cleaned.contains("wp-block"));
    assert!(!cleaned.contains("data-wp"));
    assert!(!cleaned.contains("<center>"));
    assert!(cleaned.contains("text-align: center"));
    assert!(!cleaned.contains("<font"));
    assert!(cleaned.contains("<span"));
    assert!(!cleaned.contains("<b>"));
    assert!(cleaned.contains("<strong>"));
    assert!(!cleaned.contains("<i>"));
    assert!(cleaned.contains("<em>"));
    assert!(cleaned.contains("<ul>"));
    assert!(cleaned.contains("<li>"));
}

#[test]
fn test_clean_html_balances_tags() {
    assert_eq!(
        clean_html("<ul><li>One<li>Two</ul><p>Open <em>end"),
        "<ul><li>One</li><li>Two</li></ul><p>Open <em>end</em></p>"
    );
}

#[test]
fn test_plain_text_conversion() {
    let plain = to_plain_text(FORMATTED_POST);

    assert!(!plain.contains('<'));
    assert!(!plain.contains('>'));
    assert!(plain.contains("This is a test paragraph with some formatting"));
    assert!(plain.contains("• Item 1"));
    assert!(plain.contains("• Item 3 with formatting"));
    assert!(plain.contains("1. First item"));
    assert!(plain.contains("3. Third item with link"));
    assert!(plain.contains("Sample Heading"));
    assert!(plain.contains("This is a blockquote example"));
}

#[test]
fn test_markdown_conversion() {
    let html = format!(
        "{}{}",
        FORMATTED_POST,
        r#"
<pre><code>function testCode() {
  return "This is a code block";
}</code></pre>
<table>
  <tr>
    <th>Header 1</th>
    <th>Header 2</th>
  </tr>
  <tr>
    <td>Row 1, Cell 1</td>
    <td>Row 1, Cell 2</td>
  </tr>
</table>"#
    );

    let markdown = to_markdown(&html);

    assert!(markdown.contains("This is a **test** paragraph with some *formatting*."));
    assert!(markdown.contains("- Item 1"));
    assert!(markdown.contains("- Item **3** with formatting"));
    assert!(markdown.contains("1. First item"));
    assert!(markdown.contains("3. Third item with [link](https://example.com)"));
    assert!(markdown.contains("## Sample Heading"));
    assert!(markdown.contains("> This is a blockquote example."));
    assert!(markdown.contains(
        "```\nfunction testCode() {\n  return \"This is a code block\";\n}\n```"
    ));
    assert!(markdown.contains(
        "| Header 1 | Header 2 |\n| --- | --- |\n| Row 1, Cell 1 | Row 1, Cell 2 |"
    ));
}

#[test]
fn test_list_numbering_and_bullets() {
    assert_eq!(
        to_plain_text("<ol><li>First</li><li>Second</li></ol>"),
        "1. First\n2. Second"
    );
    assert_eq!(
        to_markdown("<ol><li>First</li><li>Second</li></ol>"),
        "1. First\n2. Second"
    );
    assert_eq!(
        to_plain_text("<ul><li>One</li><li>Two</li></ul>"),
        "• One\n• Two"
    );
    assert_eq!(
        to_markdown("<ul><li>One</li><li>Two</li></ul>"),
        "- One\n- Two"
    );
}

#[test]
fn test_heading_and_strong() {
    assert_eq!(to_markdown("<h2>Title</h2>"), "## Title");
    assert_eq!(to_markdown("<p><strong>x</strong></p>"), "**x**");
    assert_eq!(to_plain_text("<h2>Title</h2>"), "Title");
}

#[test]
fn test_table_has_header_separator_and_data_rows() {
    let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
    let markdown = to_markdown(html);
    let lines: Vec<&str> = markdown.lines().collect();

    assert_eq!(lines, vec!["| A | B |", "| --- | --- |", "| 1 | 2 |"]);
    assert_eq!(to_plain_text(html), "A\tB\n1\t2");
}

#[test]
fn test_empty_content() {
    assert_eq!(sanitize(""), "");
    assert_eq!(clean_html(""), "");
    assert_eq!(to_plain_text(""), "");
    assert_eq!(to_markdown(""), "");
}

#[test]
fn test_malformed_content() {
    let malformed = "<p>Unclosed paragraph tag\n<div>Unclosed div\n<ul><li>Unclosed list item<li>Another item</ul>\n<strong>Unclosed strong tag";

    let plain = to_plain_text(malformed);
    assert!(!plain.is_empty());
    assert!(plain.contains("• Another item"));

    let markdown = to_markdown(malformed);
    assert!(!markdown.is_empty());
    assert!(markdown.contains("**Unclosed strong tag**"));
}

#[test]
fn test_entities_decoded() {
    let html = "<p>Special &amp; characters like &lt; and &gt; and &quot;quotes&quot;</p>";
    let expected = "Special & characters like < and > and \"quotes\"";

    assert!(to_plain_text(html).contains(expected));
    assert!(to_markdown(html).contains(expected));
}

#[test]
fn test_nested_lists() {
    assert_eq!(
        to_plain_text(NESTED_LIST),
        "• Parent item 1\n• Parent item 2\n    • Child item 1\n    • Child item 2\n        • Grandchild item\n• Parent item 3"
    );
    assert_eq!(
        to_markdown(NESTED_LIST),
        "- Parent item 1\n- Parent item 2\n    - Child item 1\n    - Child item 2\n        - Grandchild item\n- Parent item 3"
    );
}

#[test]
fn test_mixed_content() {
    let plain = to_plain_text(MIXED_CONTENT);
    assert!(plain.contains("Mixed Content Test"));
    assert!(plain.contains("Paragraph before list"));
    assert!(plain.contains("• List item with bold and italic text"));
    assert!(plain.contains("Blockquote after list"));
    assert!(plain.contains("inline code"));
    assert!(plain.contains("Code block here"));

    let markdown = to_markdown(MIXED_CONTENT);
    assert!(markdown.contains("# Mixed Content Test"));
    assert!(markdown.contains("- List item with **bold** and *italic* text"));
    assert!(markdown.contains("- List item with [link](https://example.com)"));
    assert!(markdown.contains("> Blockquote after list"));
    assert!(markdown.contains("`inline code`"));
    assert!(markdown.contains("a break  \nnew line"));
    assert!(markdown.contains("```\nCode block here\n```"));
}

#[test]
fn test_comments_removed() {
    let html = "<p>Text before comment</p>\n<!-- This is an HTML comment that should be removed -->\n<p>Text after comment</p>";

    for output in [to_plain_text(html), to_markdown(html)] {
        assert!(!output.contains("HTML comment"));
        assert_eq!(output, "Text before comment\n\nText after comment");
    }
}

#[test]
fn test_large_content() {
    let mut html = String::from("<div>");
    for i in 0..100 {
        html.push_str(&format!("<h2>Heading {}</h2><p>", i));
        for j in 0..10 {
            html.push_str(&format!(
                "This is paragraph {} with some <strong>bold</strong> and <em>italic</em> text. ",
                j
            ));
        }
        html.push_str("</p><ul>");
        for j in 0..5 {
            html.push_str(&format!("<li>List item {}</li>", j));
        }
        html.push_str("</ul>");
    }
    html.push_str("</div>");

    let plain = to_plain_text(&html);
    assert!(plain.contains("Heading 99"));
    assert_eq!(plain.matches("• List item 4").count(), 100);

    let markdown = to_markdown(&html);
    assert!(markdown.contains("## Heading 0"));
    assert_eq!(markdown.matches("- List item 0").count(), 100);
}

#[test]
fn test_convert_by_format_name() {
    let html = "<!-- wp:heading --><h2>Title</h2><!-- /wp:heading -->";
    let format: Format = "markdown".parse().unwrap();
    assert_eq!(convert(html, format), "## Title");
    assert_eq!(convert(html, Format::PlainText), "Title");
    assert_eq!(convert(html, Format::Sanitized), "<h2>Title</h2>");
}

#[test]
fn test_service_is_shareable_across_threads() {
    let service = std::sync::Arc::new(ContentService::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let service = service.clone();
            std::thread::spawn(move || service.to_markdown(&format!("<h1>Post {}</h1>", i)))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("# Post {}", i));
    }
}

#[test]
fn test_deep_nesting_is_flattened_not_fatal() {
    let depth = 10_000;

    let list: String = (0..depth).map(|i| format!("<ul><li>L{}Z", i)).collect();
    let markdown = to_markdown(&list);
    assert!(markdown.starts_with("- L0Z\n    - L1Z"));
    assert!(markdown.contains("L9999Z"));

    let spans = format!("{}x", "<span>".repeat(depth));
    assert_eq!(to_plain_text(&spans), "x");
    assert_eq!(to_markdown(&spans), "x");

    let divs = format!("{}x", "<div>".repeat(depth));
    let cleaned = clean_html(&divs);
    assert!(cleaned.starts_with("<div><div>"));
    assert!(cleaned.contains('x'));
    assert_eq!(to_plain_text(&divs), "x");
}

#[test]
fn test_same_kind_nesting_past_depth_limit() {
    let depth = 300;
    let mut html = String::new();
    for i in 0..depth {
        html.push_str(&format!("<ol><li>L{}Z", i));
    }
    for _ in 0..depth {
        html.push_str("</li></ol>");
    }

    let plain = to_plain_text(&html);
    let markdown = to_markdown(&html);
    for i in 0..depth {
        let name = format!("L{}Z", i);
        assert_eq!(plain.matches(&name).count(), 1, "{} in plain text", name);
        assert_eq!(markdown.matches(&name).count(), 1, "{} in markdown", name);
    }
}

#[test]
fn test_unclosed_attribute_quote_keeps_content() {
    let html = "<p title=\"oops>Lost</p><p>More text here</p>";

    assert_eq!(to_markdown(html), "Lost\n\nMore text here");
    assert_eq!(to_plain_text(html), "Lost\n\nMore text here");
    assert_eq!(
        clean_html(html),
        "<p title=\"oops\">Lost</p><p>More text here</p>"
    );
}

#[test]
fn test_unterminated_tag_at_end_keeps_earlier_content() {
    assert_eq!(to_markdown("<p>Kept</p><div"), "Kept");
    assert_eq!(to_plain_text("Some text <div class=\"x"), "Some text");
}

#[test]
fn test_huge_list_start() {
    let html = "<ol start=\"4294967295\"><li>a</li><li>b</li></ol>";
    assert_eq!(to_markdown(html), "4294967295. a\n4294967296. b");
    assert_eq!(to_plain_text(html), "4294967295. a\n4294967296. b");
}

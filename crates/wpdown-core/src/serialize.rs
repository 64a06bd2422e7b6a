//! Markdown serialization
//!
//! Converts document nodes into Markdown text.

use crate::ast::{Block, Inline, ListItem, ListKind, ListNode};
use crate::options::{CodeBlockStyle, HeadingStyle, Options, UnderlineStyle};
use crate::whitespace::normalize_text;

/// Serialize a block to Markdown string
pub fn serialize(block: &Block, options: &Options) -> String {
    let mut output = String::with_capacity(4096);
    serialize_block(block, options, 0, &mut output);

    // Post-process: trailing spaces, blank-line runs, outer trim
    normalize_text(&output, true)
}

fn serialize_block(block: &Block, options: &Options, depth: usize, out: &mut String) {
    match block {
        Block::Document(blocks) => serialize_blocks(blocks, options, depth, out),

        Block::Heading { level, content } => serialize_heading(*level, content, options, out),

        Block::Paragraph(inlines) => {
            let start_len = out.len();
            serialize_inlines(inlines, options, out);
            if out[start_len..].trim().is_empty() {
                out.truncate(start_len);
            } else {
                out.push_str("\n\n");
            }
        }

        Block::BlockQuote(blocks) => {
            let start_len = out.len();
            serialize_blocks(blocks, options, depth, out);

            // Re-emit what we just wrote with > prefixes
            let content = out[start_len..].trim().to_string();
            out.truncate(start_len);
            if content.is_empty() {
                return;
            }

            for line in content.lines() {
                let line = line.trim_end();
                if line.trim().is_empty() {
                    out.push('>');
                } else {
                    out.push_str("> ");
                    out.push_str(line);
                }
                out.push('\n');
            }
            out.push('\n');
        }

        Block::List(list) => {
            serialize_list(list, options, depth, out);
            out.push('\n');
        }

        Block::CodeBlock { language, code } => {
            serialize_code_block(language.as_deref(), code, options, out)
        }

        Block::ThematicBreak => {
            out.push_str(&options.hr);
            out.push_str("\n\n");
        }

        Block::Table { header, rows } => serialize_table(header, rows, options, out),
    }
}

fn serialize_blocks(blocks: &[Block], options: &Options, depth: usize, out: &mut String) {
    for block in blocks {
        if !block.is_blank() {
            serialize_block(block, options, depth, out);
        }
    }
}

fn serialize_heading(level: u8, content: &[Inline], options: &Options, out: &mut String) {
    let start_len = out.len();
    serialize_inlines(content, options, out);

    let text = out[start_len..].trim().replace('\n', " ");
    out.truncate(start_len);
    if text.is_empty() {
        return;
    }

    // Blank line before so a heading never glues onto a preceding line
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }

    let level = level.clamp(1, 6);
    match options.heading_style {
        HeadingStyle::Setext if level <= 2 => {
            let underline = if level == 1 { "=" } else { "-" };
            out.push_str(&text);
            out.push('\n');
            out.push_str(&underline.repeat(text.chars().count()));
            out.push_str("\n\n");
        }
        _ => {
            out.push_str(&"#".repeat(level as usize));
            out.push(' ');
            out.push_str(&text);
            out.push_str("\n\n");
        }
    }
}

fn serialize_list(list: &ListNode, options: &Options, depth: usize, out: &mut String) {
    let indent = " ".repeat(options.list_indent * depth);

    for (i, item) in list.items.iter().enumerate() {
        out.push_str(&indent);

        match list.kind {
            ListKind::Ordered => {
                let num = list.start.saturating_add(i as u64);
                out.push_str(&num.to_string());
                out.push_str(". ");
            }
            ListKind::Unordered => {
                out.push(options.bullet_list_marker);
                out.push(' ');
            }
        }

        serialize_list_item(item, options, depth, out);
    }
}

fn serialize_list_item(item: &ListItem, options: &Options, depth: usize, out: &mut String) {
    let content_indent = " ".repeat(options.list_indent * (depth + 1));

    // Leading text; continuation lines line up under the nested content column
    let mut text = String::new();
    serialize_inlines(&item.text, options, &mut text);
    for (i, line) in text.trim().lines().enumerate() {
        if i > 0 {
            out.push_str(&content_indent);
        }
        out.push_str(line.trim_start());
        out.push('\n');
    }
    if text.trim().is_empty() {
        out.push('\n');
    }

    if let Some(child) = &item.child {
        serialize_list(child, options, depth + 1, out);
    }

    for block in &item.trailing {
        if block.is_blank() {
            continue;
        }
        match block {
            Block::List(list) => serialize_list(list, options, depth + 1, out),
            other => {
                let mut nested = String::new();
                serialize_block(other, options, 0, &mut nested);
                for line in nested.trim().lines() {
                    if !line.trim().is_empty() {
                        out.push_str(&content_indent);
                        out.push_str(line);
                    }
                    out.push('\n');
                }
            }
        }
    }
}

fn serialize_code_block(language: Option<&str>, code: &str, options: &Options, out: &mut String) {
    match options.code_block_style {
        CodeBlockStyle::Fenced => {
            // A fence inside the code needs a longer outer fence
            let mut fence = options.fence.clone();
            let fence_char = fence.chars().next().unwrap_or('`');
            while code.contains(fence.as_str()) {
                fence.push(fence_char);
            }

            out.push_str(&fence);
            out.push_str(language.unwrap_or(""));
            out.push('\n');
            out.push_str(code);
            out.push('\n');
            out.push_str(&fence);
            out.push_str("\n\n");
        }
        CodeBlockStyle::Indented => {
            for line in code.lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
    }
}

fn serialize_table(
    header: &[Vec<Inline>],
    rows: &[Vec<Vec<Inline>>],
    options: &Options,
    out: &mut String,
) {
    if header.is_empty() {
        return;
    }

    serialize_table_row(header, options, out);

    // Separator row, one column per header cell
    out.push('|');
    for _ in header {
        out.push_str(" --- |");
    }
    out.push('\n');

    for row in rows {
        serialize_table_row(row, options, out);
    }

    out.push('\n');
}

fn serialize_table_row(cells: &[Vec<Inline>], options: &Options, out: &mut String) {
    out.push('|');
    for cell in cells {
        let mut text = String::new();
        serialize_inlines(cell, options, &mut text);
        let text = text
            .trim()
            .replace("  \n", " ")
            .replace('\n', " ")
            .replace('|', "\\|");
        out.push(' ');
        out.push_str(&text);
        out.push_str(" |");
    }
    out.push('\n');
}

fn serialize_inlines(inlines: &[Inline], options: &Options, out: &mut String) {
    for inline in inlines {
        serialize_inline(inline, options, out);
    }
}

fn serialize_inline(inline: &Inline, options: &Options, out: &mut String) {
    match inline {
        Inline::Text(text) => {
            if options.escape_markdown {
                out.push_str(&escape_markdown(text));
            } else {
                out.push_str(text);
            }
        }

        Inline::Strong(content) => {
            wrap_inlines(content, &options.strong_delimiter, options, out)
        }

        Inline::Emphasis(content) => {
            let delimiter = options.em_delimiter.to_string();
            wrap_inlines(content, &delimiter, options, out)
        }

        Inline::Strikethrough(content) => {
            wrap_inlines(content, &options.strike_delimiter, options, out)
        }

        Inline::Underline(content) => match options.underline {
            UnderlineStyle::Strip => serialize_inlines(content, options, out),
            UnderlineStyle::Html => {
                out.push_str("<u>");
                serialize_inlines(content, options, out);
                out.push_str("</u>");
            }
        },

        Inline::Code(code) => serialize_code_span(code, out),

        Inline::Link {
            content,
            url,
            title,
        } => {
            out.push('[');
            let start = out.len();
            serialize_inlines(content, options, out);
            let label = out[start..].trim().to_string();
            out.truncate(start);
            out.push_str(&label);
            out.push_str("](");
            out.push_str(url);
            if let Some(t) = title {
                out.push_str(" \"");
                out.push_str(&t.replace('"', "\\\""));
                out.push('"');
            }
            out.push(')');
        }

        Inline::Image { alt, url, title } => {
            out.push_str("![");
            out.push_str(alt);
            out.push_str("](");
            out.push_str(url);
            if let Some(t) = title {
                out.push_str(" \"");
                out.push_str(&t.replace('"', "\\\""));
                out.push('"');
            }
            out.push(')');
        }

        Inline::LineBreak => out.push_str("  \n"),
    }
}

/// Wrap rendered content in a delimiter, keeping outer spaces outside the delimiters
fn wrap_inlines(content: &[Inline], delimiter: &str, options: &Options, out: &mut String) {
    let start = out.len();
    serialize_inlines(content, options, out);
    if out[start..].trim().is_empty() {
        out.truncate(start);
        return;
    }

    let inner = out[start..].to_string();
    out.truncate(start);

    let trimmed_start = inner.trim_start();
    let leading = &inner[..inner.len() - trimmed_start.len()];
    let core = trimmed_start.trim_end();
    let trailing = &trimmed_start[core.len()..];

    out.push_str(leading);
    out.push_str(delimiter);
    out.push_str(core);
    out.push_str(delimiter);
    out.push_str(trailing);
}

fn serialize_code_span(code: &str, out: &mut String) {
    if code.is_empty() {
        return;
    }

    // One more backtick than the longest run inside the code
    let max_consecutive_backticks = code
        .chars()
        .fold((0, 0), |(max, current), c| {
            if c == '`' {
                (max.max(current + 1), current + 1)
            } else {
                (max, 0)
            }
        })
        .0;
    let backticks = "`".repeat(max_consecutive_backticks + 1);
    let space = if code.starts_with('`') || code.ends_with('`') {
        " "
    } else {
        ""
    };

    out.push_str(&backticks);
    out.push_str(space);
    out.push_str(code);
    out.push_str(space);
    out.push_str(&backticks);
}

/// Escape markdown special characters
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '#' | '+' | '-' | '!' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

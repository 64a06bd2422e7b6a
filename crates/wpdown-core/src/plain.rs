//! Plain-text rendering
//!
//! Headings and quotes lose their markers, lists keep bullets and numbers,
//! images and rules vanish, links keep only their text.

use crate::ast::{inlines_plain_text, Block, Inline, ListItem, ListKind, ListNode};
use crate::options::Options;
use crate::whitespace::normalize_text;

/// Render a block as plain text
pub fn render_plain(block: &Block, options: &Options) -> String {
    let mut output = String::with_capacity(4096);
    render_block(block, options, &mut output);
    normalize_text(&output, false)
}

fn render_block(block: &Block, options: &Options, out: &mut String) {
    match block {
        Block::Document(blocks) | Block::BlockQuote(blocks) => {
            for block in blocks {
                render_block(block, options, out);
            }
        }

        Block::Heading { content, .. } | Block::Paragraph(content) => {
            let text = inline_text(content);
            if !text.is_empty() {
                out.push_str(&text);
                out.push_str("\n\n");
            }
        }

        Block::List(list) => {
            render_list(list, options, 0, "", out);
            out.push('\n');
        }

        Block::CodeBlock { code, .. } => {
            if !code.trim().is_empty() {
                out.push_str(code);
                out.push_str("\n\n");
            }
        }

        Block::ThematicBreak => {}

        Block::Table { header, rows } => {
            for row in std::iter::once(header).chain(rows.iter()) {
                let cells: Vec<String> = row.iter().map(|cell| inline_text(cell)).collect();
                if cells.iter().all(|c| c.is_empty()) {
                    continue;
                }
                out.push_str(&cells.join(&options.table_cell_separator).replace('\n', " "));
                out.push('\n');
            }
            out.push('\n');
        }
    }
}

/// Render a list at `depth`; `outline` is the label of the enclosing ordered item
fn render_list(list: &ListNode, options: &Options, depth: usize, outline: &str, out: &mut String) {
    let indent = " ".repeat(options.list_indent * depth);

    for (i, item) in list.items.iter().enumerate() {
        let label = match list.kind {
            ListKind::Ordered => {
                let num = list.start.saturating_add(i as u64);
                format!("{}{}.", outline, num)
            }
            ListKind::Unordered => options.plain_bullet.to_string(),
        };

        out.push_str(&indent);
        out.push_str(&label);
        out.push(' ');

        render_list_item(item, list, &label, options, depth, out);
    }
}

fn render_list_item(
    item: &ListItem,
    list: &ListNode,
    label: &str,
    options: &Options,
    depth: usize,
    out: &mut String,
) {
    let content_indent = " ".repeat(options.list_indent * (depth + 1));

    let text = inline_text(&item.text);
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push_str(&content_indent);
        }
        out.push_str(line.trim());
        out.push('\n');
    }
    if text.is_empty() {
        out.push('\n');
    }

    // Ordered inside ordered gets compound labels such as 1.2.
    let outline_for = |child: &ListNode| -> String {
        if options.outline_numbering && list.is_ordered() && child.is_ordered() {
            label.to_string()
        } else {
            String::new()
        }
    };

    if let Some(child) = &item.child {
        render_list(child, options, depth + 1, &outline_for(child), out);
    }

    for block in &item.trailing {
        match block {
            Block::List(nested) => {
                render_list(nested, options, depth + 1, &outline_for(nested), out)
            }
            other => {
                let mut nested = String::new();
                render_block(other, options, &mut nested);
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

/// Inline text with whitespace tidied around line breaks
fn inline_text(inlines: &[Inline]) -> String {
    let text = inlines_plain_text(inlines);
    text.split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

//! Node tree to document AST conversion
//!
//! Walks a normalized [`Node`] tree and builds the [`Block`] model that both
//! renderers work from. Lists are extracted by one recursive descent: an item's
//! text is everything before its first nested list, the nested list recurses one
//! level deeper, and whatever follows it stays with the same item.

use once_cell::sync::Lazy;
use regex::Regex;
use wpdown_core::whitespace::collapse_whitespace;
use wpdown_core::{Block, Inline, ListItem, ListKind, ListNode};

use crate::node::Node;
use crate::utilities::{
    clean_attribute, decode_entities, is_block, is_list, is_skipped, strip_tags,
};

static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").expect("Invalid blank line regex"));

/// Convert a tree into a document
pub fn node_to_ast(root: &Node) -> Block {
    Block::Document(collect_blocks(root.children()))
}

/// Convert a block-level element
fn convert_block(element: &Node) -> Vec<Block> {
    let tag = element.tag_name();

    match tag {
        "p" => {
            let inlines = trimmed(collect_inlines(element.children()));
            if inlines_are_blank(&inlines) {
                vec![]
            } else {
                vec![Block::Paragraph(inlines)]
            }
        }

        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag[1..].parse().unwrap_or(1);
            let inlines = trimmed(collect_inlines(element.children()));
            if inlines_are_blank(&inlines) {
                vec![]
            } else {
                vec![Block::Heading {
                    level,
                    content: inlines,
                }]
            }
        }

        "blockquote" => {
            let blocks = collect_blocks(element.children());
            if blocks.is_empty() {
                vec![]
            } else {
                vec![Block::BlockQuote(blocks)]
            }
        }

        "ul" | "ol" => convert_list(element).map(Block::List).into_iter().collect(),

        "pre" => convert_pre(element).into_iter().collect(),

        "hr" => vec![Block::ThematicBreak],

        "table" => convert_table(element),

        // Containers and anything else block-level: just process children
        _ => collect_blocks(element.children()),
    }
}

/// Collect blocks from a run of sibling nodes; loose inline content becomes paragraphs
fn collect_blocks<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending: Vec<Inline> = Vec::new();

    for node in nodes {
        if node.is_text() {
            let raw = node.node_value.as_deref().unwrap_or("");
            for (i, segment) in BLANK_LINE.split(raw).enumerate() {
                if i > 0 {
                    flush_paragraph(&mut pending, &mut blocks);
                }
                pending.extend(text_inline(segment));
            }
        } else if !node.is_element() || is_skipped(node.tag_name()) {
            continue;
        } else if starts_block(node) {
            flush_paragraph(&mut pending, &mut blocks);
            blocks.extend(convert_block(node));
        } else {
            pending.extend(convert_inline(node));
        }
    }
    flush_paragraph(&mut pending, &mut blocks);

    blocks
}

/// Block elements, and inline elements wrapping block content
fn starts_block(node: &Node) -> bool {
    is_block(node.tag_name()) || node.element_children().any(starts_block)
}

fn flush_paragraph(pending: &mut Vec<Inline>, blocks: &mut Vec<Block>) {
    let inlines = trimmed(std::mem::take(pending));
    if !inlines_are_blank(&inlines) {
        blocks.push(Block::Paragraph(inlines));
    }
}

/// Collect inline content from a run of sibling nodes
fn collect_inlines<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<Inline> {
    let mut inlines = Vec::new();

    for node in nodes {
        if node.is_text() {
            inlines.extend(text_inline(node.node_value.as_deref().unwrap_or("")));
        } else if !node.is_element() || is_skipped(node.tag_name()) {
            continue;
        } else if is_block(node.tag_name()) {
            // Block content in an inline context: keep it on its own line
            let inner = trimmed(collect_inlines(node.children()));
            if !inlines_are_blank(&inner) {
                if !inlines_are_blank(&inlines) {
                    inlines.push(Inline::LineBreak);
                }
                inlines.extend(inner);
            }
        } else {
            inlines.extend(convert_inline(node));
        }
    }

    inlines
}

/// Convert an inline element
fn convert_inline(element: &Node) -> Vec<Inline> {
    let tag = element.tag_name();

    match tag {
        _ if is_skipped(tag) => vec![],

        "strong" | "b" => wrap(element, Inline::Strong),

        "em" | "i" | "cite" | "dfn" | "var" => wrap(element, Inline::Emphasis),

        "del" | "s" | "strike" => wrap(element, Inline::Strikethrough),

        "u" | "ins" => wrap(element, Inline::Underline),

        "code" | "kbd" | "samp" | "tt" => {
            let code = collapse_whitespace(&strip_tags(element, false));
            if code.is_empty() {
                vec![]
            } else {
                vec![Inline::Code(code)]
            }
        }

        "a" => {
            let content = collect_inlines(element.children());
            match clean_attribute(element.attr("href")) {
                Some(url) if !inlines_are_blank(&content) => vec![Inline::Link {
                    content,
                    url,
                    title: clean_attribute(element.attr("title")),
                }],
                _ => content,
            }
        }

        "img" => match clean_attribute(element.attr("src")) {
            Some(url) => vec![Inline::Image {
                alt: clean_attribute(element.attr("alt")).unwrap_or_default(),
                url,
                title: clean_attribute(element.attr("title")),
            }],
            None => vec![],
        },

        "br" => vec![Inline::LineBreak],

        // span, font, small, mark, abbr, sub, sup and friends
        _ => collect_inlines(element.children()),
    }
}

/// Wrap an element's inline content; blank content is passed through unwrapped
fn wrap(element: &Node, make: fn(Vec<Inline>) -> Inline) -> Vec<Inline> {
    let inner = collect_inlines(element.children());
    if inlines_are_blank(&inner) {
        inner
    } else {
        vec![make(inner)]
    }
}

/// Collapse whitespace and decode entities in a raw text run
fn text_inline(raw: &str) -> Option<Inline> {
    let collapsed = collapse_whitespace(raw);
    if collapsed.is_empty() {
        None
    } else {
        Some(Inline::Text(decode_entities(&collapsed).into_owned()))
    }
}

/// Convert a `ul` or `ol`; `None` when it has no non-blank items
fn convert_list(element: &Node) -> Option<ListNode> {
    let kind = if element.is("ol") {
        ListKind::Ordered
    } else {
        ListKind::Unordered
    };

    let mut items = Vec::new();
    for child in element.children() {
        // Anything but `li` here is malformed; it still becomes an item
        let item = if child.is_element() && !is_skipped(child.tag_name()) {
            convert_item(child)
        } else if child.is_text() {
            ListItem::new(trimmed(collect_inlines([child])))
        } else {
            continue;
        };
        if !item.is_blank() {
            items.push(item);
        }
    }

    if items.is_empty() {
        return None;
    }

    let mut list = ListNode::new(kind, items);
    if kind == ListKind::Ordered {
        // Keep the last item's number representable
        let last_offset = list.items.len() as u64 - 1;
        list.start = element
            .attr("start")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map_or(1, |start| start.min(u64::MAX - last_offset));
    }
    Some(list)
}

/// Split an item into leading text, first nested list, and trailing blocks
fn convert_item(item: &Node) -> ListItem {
    let mut flat = Vec::new();
    flatten_list_wrappers(item, &mut flat);

    let split = flat
        .iter()
        .position(|n| n.is_element() && is_list(n.tag_name()));

    let Some(split) = split else {
        return ListItem::new(trimmed(collect_inlines(flat)));
    };

    let text = trimmed(collect_inlines(flat[..split].iter().copied()));
    let child = convert_list(flat[split]);
    let trailing = collect_blocks(flat[split + 1..].iter().copied());

    ListItem {
        text,
        child,
        trailing,
    }
}

/// Children of `node`, with non-list elements that contain lists replaced by their children
fn flatten_list_wrappers<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    for child in node.children() {
        let is_wrapper = child.is_element()
            && !is_list(child.tag_name())
            && (child.contains_tag("ul") || child.contains_tag("ol"));
        if is_wrapper {
            flatten_list_wrappers(child, out);
        } else {
            out.push(child);
        }
    }
}

fn convert_pre(element: &Node) -> Option<Block> {
    let code_el = element.element_children().find(|el| el.is("code"));

    let language = code_el
        .and_then(code_language)
        .or_else(|| code_language(element));

    let text = strip_tags(element, true);
    let text = text.strip_prefix('\n').unwrap_or(&text);
    let code = text.trim_end_matches(['\n', '\r', ' ', '\t']);

    if code.trim().is_empty() {
        return None;
    }

    Some(Block::CodeBlock {
        language,
        code: code.to_string(),
    })
}

/// Language from a `language-x` or `lang-x` class
fn code_language(element: &Node) -> Option<String> {
    element.attr("class").and_then(|class| {
        class
            .split_whitespace()
            .find_map(|c| c.strip_prefix("language-").or_else(|| c.strip_prefix("lang-")))
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
    })
}

/// Convert a table; a caption becomes a paragraph before it
fn convert_table(element: &Node) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(caption) = element.element_children().find(|el| el.is("caption")) {
        let inlines = trimmed(collect_inlines(caption.children()));
        if !inlines_are_blank(&inlines) {
            blocks.push(Block::Paragraph(inlines));
        }
    }

    let mut rows = Vec::new();
    collect_rows(element, &mut rows);

    if !rows.is_empty() {
        let header = rows.remove(0);
        blocks.push(Block::Table { header, rows });
    }

    blocks
}

/// Rows in document order, not descending into nested tables
fn collect_rows(element: &Node, rows: &mut Vec<Vec<Vec<Inline>>>) {
    for child in element.element_children() {
        match child.tag_name() {
            "tr" => {
                let row: Vec<Vec<Inline>> = child
                    .element_children()
                    .filter(|cell| cell.is("td") || cell.is("th"))
                    .map(|cell| trimmed(collect_inlines(cell.children())))
                    .collect();
                if !row.is_empty() {
                    rows.push(row);
                }
            }
            "thead" | "tbody" | "tfoot" => collect_rows(child, rows),
            _ => {}
        }
    }
}

fn inlines_are_blank(inlines: &[Inline]) -> bool {
    inlines.iter().all(|i| i.is_blank())
}

/// Strip whitespace and line breaks from both ends of a run sequence
fn trimmed(mut inlines: Vec<Inline>) -> Vec<Inline> {
    trim_start(&mut inlines);
    trim_end(&mut inlines);
    inlines
}

fn trim_start(inlines: &mut Vec<Inline>) {
    while let Some(first) = inlines.first_mut() {
        let remove = match first {
            Inline::Text(text) => {
                let rest = text.trim_start();
                if rest.len() != text.len() {
                    *text = rest.to_string();
                }
                text.is_empty()
            }
            Inline::LineBreak => true,
            Inline::Strong(inner)
            | Inline::Emphasis(inner)
            | Inline::Strikethrough(inner)
            | Inline::Underline(inner) => {
                trim_start(inner);
                inner.is_empty()
            }
            Inline::Link { content, .. } => {
                trim_start(content);
                false
            }
            _ => false,
        };
        if !remove {
            return;
        }
        inlines.remove(0);
    }
}

fn trim_end(inlines: &mut Vec<Inline>) {
    while let Some(last) = inlines.last_mut() {
        let remove = match last {
            Inline::Text(text) => {
                let kept = text.trim_end().len();
                text.truncate(kept);
                text.is_empty()
            }
            Inline::LineBreak => true,
            Inline::Strong(inner)
            | Inline::Emphasis(inner)
            | Inline::Strikethrough(inner)
            | Inline::Underline(inner) => {
                trim_end(inner);
                inner.is_empty()
            }
            Inline::Link { content, .. } => {
                trim_end(content);
                false
            }
            _ => false,
        };
        if !remove {
            return;
        }
        inlines.pop();
    }
}

//! Tree normalization: deprecated tags, generated attributes and list structure.

use tracing::debug;

use crate::node::Node;
use crate::rules::RuleSet;
use crate::utilities::is_list;

#[derive(Default)]
struct Repairs {
    rewritten: usize,
    wrapped: usize,
    adopted: usize,
}

/// Normalize a parsed tree in place.
///
/// Deprecated tags are rewritten, generated classes and attributes are removed,
/// stray `li` runs are wrapped in a `ul`, and a list sitting directly inside
/// another list is moved into the preceding item.
pub fn normalize_tree(root: &mut Node, rules: &RuleSet) {
    let mut repairs = Repairs::default();
    normalize_node(root, rules, &mut repairs);

    if repairs.rewritten > 0 {
        debug!(count = repairs.rewritten, "Rewrote deprecated tags");
    }
    if repairs.wrapped > 0 || repairs.adopted > 0 {
        debug!(
            wrapped = repairs.wrapped,
            adopted = repairs.adopted,
            "Repaired list structure"
        );
    }
}

fn normalize_node(node: &mut Node, rules: &RuleSet, repairs: &mut Repairs) {
    if node.is_element() {
        rewrite_deprecated(node, rules, repairs);
        clean_attributes(node, rules);
    }

    if node.is_element() && is_list(node.tag_name()) {
        adopt_nested_lists(node, repairs);
    } else {
        wrap_orphan_items(node, repairs);
    }

    for child in node.children.iter_mut() {
        normalize_node(child, rules, repairs);
    }
}

fn rewrite_deprecated(node: &mut Node, rules: &RuleSet, repairs: &mut Repairs) {
    let Some(rewrite) = rules.rewrite_for(node.tag_name()) else {
        return;
    };

    node.node_name = rewrite.tag.clone();
    if let Some(style) = &rewrite.style {
        let merged = match node.attr("style").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{} {}", style, existing),
            _ => style.clone(),
        };
        node.set_attr("style", &merged);
    }
    repairs.rewritten += 1;
}

fn clean_attributes(node: &mut Node, rules: &RuleSet) {
    if let Some(class) = node.attr("class") {
        let kept = class
            .split_whitespace()
            .filter(|c| !rules.is_generated_class(c))
            .collect::<Vec<_>>()
            .join(" ");
        node.set_attr("class", &kept);
    }

    node.attributes.retain(|(name, value)| {
        !rules.is_stripped_attribute(name)
            && !(rules.drops_when_empty(name) && value.trim().is_empty())
    });
}

/// Wrap runs of `li` children of a non-list element in a `ul`
fn wrap_orphan_items(node: &mut Node, repairs: &mut Repairs) {
    if !node.children.iter().any(|c| c.is("li")) {
        return;
    }

    let children = std::mem::take(&mut node.children);
    let mut run: Option<Node> = None;

    for child in children {
        let joins_run = child.is("li")
            || (run.is_some() && child.is_text() && child.text_content().trim().is_empty());

        if joins_run {
            run.get_or_insert_with(|| {
                repairs.wrapped += 1;
                Node::element("ul")
            })
            .children
            .push(child);
        } else {
            if let Some(list) = run.take() {
                node.children.push(list);
            }
            node.children.push(child);
        }
    }
    if let Some(list) = run {
        node.children.push(list);
    }
}

/// Move lists that are direct children of a list into the preceding item
fn adopt_nested_lists(list: &mut Node, repairs: &mut Repairs) {
    if !list
        .children
        .iter()
        .any(|c| c.is_element() && is_list(c.tag_name()))
    {
        return;
    }

    let children = std::mem::take(&mut list.children);
    for child in children {
        if child.is_element() && is_list(child.tag_name()) {
            repairs.adopted += 1;
            match list.children.iter_mut().rev().find(|c| c.is("li")) {
                Some(item) => item.children.push(child),
                None => {
                    let mut item = Node::element("li");
                    item.children.push(child);
                    list.children.push(item);
                }
            }
        } else {
            list.children.push(child);
        }
    }
}

//! Lookups that skip the selector syntax: by predicate, class, tag or id.
//!
//! `max_level` bounds the depth the same way the child combinator does:
//! `Some(1)` only looks at children, `Some(0)` finds nothing, `None` searches
//! the whole subtree.

use thicket_dom::{DomTree, NodeId};

use crate::engine::enumerate;
use crate::predicate::Predicate;

/// Every descendant of `node` accepted by `predicate`.
#[must_use]
pub fn elements_by(
    tree: &DomTree,
    node: NodeId,
    predicate: &Predicate,
    max_level: Option<usize>,
) -> Vec<NodeId> {
    enumerate(tree, node, predicate, max_level).collect()
}

/// First descendant of `node` accepted by `predicate`.
#[must_use]
pub fn first_element_by(
    tree: &DomTree,
    node: NodeId,
    predicate: &Predicate,
    max_level: Option<usize>,
) -> Option<NodeId> {
    enumerate(tree, node, predicate, max_level).next()
}

/// Descendant elements carrying `class_name`.
#[must_use]
pub fn elements_by_class_name(
    tree: &DomTree,
    node: NodeId,
    class_name: &str,
    max_level: Option<usize>,
) -> Vec<NodeId> {
    elements_by(tree, node, &Predicate::class(class_name, None), max_level)
}

/// First descendant element carrying `class_name`.
#[must_use]
pub fn first_element_by_class_name(
    tree: &DomTree,
    node: NodeId,
    class_name: &str,
    max_level: Option<usize>,
) -> Option<NodeId> {
    first_element_by(tree, node, &Predicate::class(class_name, None), max_level)
}

/// Descendants whose tag name equals `tag_name`, ignoring ASCII case.
#[must_use]
pub fn elements_by_tag_name(
    tree: &DomTree,
    node: NodeId,
    tag_name: &str,
    max_level: Option<usize>,
) -> Vec<NodeId> {
    elements_by(tree, node, &Predicate::tag(tag_name, None), max_level)
}

/// First descendant whose tag name equals `tag_name`, ignoring ASCII case.
#[must_use]
pub fn first_element_by_tag_name(
    tree: &DomTree,
    node: NodeId,
    tag_name: &str,
    max_level: Option<usize>,
) -> Option<NodeId> {
    first_element_by(tree, node, &Predicate::tag(tag_name, None), max_level)
}

/// First descendant element whose `id` is exactly `id`.
#[must_use]
pub fn element_by_id(
    tree: &DomTree,
    node: NodeId,
    id: &str,
    max_level: Option<usize>,
) -> Option<NodeId> {
    first_element_by(tree, node, &Predicate::id(id, None), max_level)
}

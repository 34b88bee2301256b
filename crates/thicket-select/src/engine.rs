//! Lazy, depth-bounded traversal.
//!
//! Nodes are produced in document order, one per call to `next`, so a caller
//! that stops early (see [`first`]) never evaluates predicates on the rest of
//! the tree. A node that matched is still descended into: its own matching
//! descendants follow it in the output.

use std::rc::Rc;
use std::slice;

use thicket_dom::{DomTree, NodeId};

use crate::compiler::CompiledSelector;
use crate::error::{Result, SelectorError};
use crate::predicate::Predicate;

/// Preorder walk over the descendants of a node, bounded in depth.
///
/// Each stack frame is the remaining children of one node together with the
/// depth bound that applies to those children.
#[derive(Debug)]
struct Descendants<'t> {
    tree: &'t DomTree,
    stack: Vec<(slice::Iter<'t, NodeId>, Option<usize>)>,
}

impl<'t> Descendants<'t> {
    fn new(tree: &'t DomTree, root: NodeId, depth: Option<usize>) -> Self {
        let mut stack = Vec::new();
        if depth != Some(0) {
            stack.push((tree.children(root).iter(), depth));
        }
        Self { tree, stack }
    }

    fn next_match(&mut self, predicate: &Predicate) -> Option<NodeId> {
        loop {
            let (children, depth) = self.stack.last_mut()?;
            let depth = *depth;
            let Some(&child) = children.next() else {
                let _ = self.stack.pop();
                continue;
            };
            if depth.is_none_or(|d| d > 1) {
                self.stack
                    .push((self.tree.children(child).iter(), depth.map(|d| d - 1)));
            }
            if predicate.matches(self.tree, child) {
                return Some(child);
            }
        }
    }
}

/// Descendants of a node accepted by a predicate. Created by [`enumerate`].
#[derive(Debug)]
pub struct Enumerate<'t, 'p> {
    walk: Descendants<'t>,
    predicate: &'p Predicate,
}

impl Iterator for Enumerate<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next_match(self.predicate)
    }
}

/// Matches of a compiled selector below a node. Created by [`select`].
///
/// Owns its selector, so it can outlive the call that compiled it. Keeps one
/// walk per selector part in progress: the top of the stack is searching
/// below the latest match of the part underneath it.
#[derive(Debug)]
pub struct Select<'t> {
    tree: &'t DomTree,
    parts: Vec<(Rc<CompiledSelector>, Descendants<'t>)>,
}

impl<'t> Select<'t> {
    /// Start matching `selector` below `root`.
    #[must_use]
    pub fn new(tree: &'t DomTree, root: NodeId, selector: Rc<CompiledSelector>) -> Self {
        let walk = Descendants::new(tree, root, selector.depth);
        Self {
            tree,
            parts: vec![(selector, walk)],
        }
    }
}

impl Iterator for Select<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (selector, walk) = self.parts.last_mut()?;
            let Some(matched) = walk.next_match(&selector.predicate) else {
                let _ = self.parts.pop();
                continue;
            };
            let next = match &selector.continuation {
                None => return Some(matched),
                Some(continuation) => Rc::clone(continuation),
            };
            let walk = Descendants::new(self.tree, matched, next.depth);
            self.parts.push((next, walk));
        }
    }
}

/// Descendants of `node` accepted by `predicate`, at most `depth` levels down
/// (`None` for unbounded).
#[must_use]
pub fn enumerate<'t, 'p>(
    tree: &'t DomTree,
    node: NodeId,
    predicate: &'p Predicate,
    depth: Option<usize>,
) -> Enumerate<'t, 'p> {
    Enumerate {
        walk: Descendants::new(tree, node, depth),
        predicate,
    }
}

/// Every match of `selector` below `node`, following continuations.
///
/// For `A B`, this yields the `B` matches below the first `A` match, then
/// those below the second, and so on. Overlapping `A` matches yield the same
/// `B` node more than once.
#[must_use]
pub fn select(
    tree: &DomTree,
    node: NodeId,
    selector: impl Into<Rc<CompiledSelector>>,
) -> Select<'_> {
    Select::new(tree, node, selector.into())
}

/// The first match of `selector` below `node`.
#[must_use]
pub fn first(
    tree: &DomTree,
    node: NodeId,
    selector: impl Into<Rc<CompiledSelector>>,
) -> Option<NodeId> {
    select(tree, node, selector).next()
}

/// Test `node` itself against a single compound selector.
///
/// # Errors
///
/// Returns [`SelectorError::ComplexSelector`] if `selector` has a depth bound
/// or a continuation.
pub fn matches(tree: &DomTree, node: NodeId, selector: &CompiledSelector) -> Result<bool> {
    if selector.is_simple() {
        Ok(selector.predicate.matches(tree, node))
    } else {
        Err(SelectorError::ComplexSelector)
    }
}

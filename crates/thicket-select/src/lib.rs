//! Selector queries over Thicket document trees.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector compiler** ([`compile`], [`compile_simple`]): tag, `#id`,
//!   `.class` and `*` components, the descendant (whitespace) and child (`>`)
//!   combinators, and pseudo-functions
//! - **Pseudo-functions** ([`Functions`]): built-in `:not(...)`, `:has(...)`
//!   and `:first`, plus caller-registered ones that take precedence
//! - **Lazy matching engine** ([`engine`]): preorder, depth-bounded,
//!   stops as soon as the caller stops pulling
//! - **Lookups** ([`lookup`]): by predicate, class, tag or id without
//!   selector syntax
//!
//! # Not Supported
//!
//! - Sibling combinators (`+`, `~`)
//! - Attribute selectors (`[href]`)
//! - Selector lists (`a, b`)
//!
//! # Example
//!
//! ```
//! use thicket_dom::{DomTree, NodeId};
//! use thicket_select::{Functions, select_all};
//!
//! let mut tree = DomTree::new();
//! let div = tree.append_element(NodeId::ROOT, "div", &[("id", "a")]);
//! let x = tree.append_element(div, "span", &[("class", "x")]);
//! let _ = tree.append_element(div, "span", &[("class", "y")]);
//!
//! let found = select_all(&tree, div, "span:not(.y)", &Functions::new()).unwrap();
//! assert_eq!(found, vec![x]);
//! ```
//!
//! A compiled selector that uses `:first` remembers that it fired. Compile a
//! fresh one for each query; the query functions below always do.

/// Selector text to [`CompiledSelector`].
pub mod compiler;
mod cursor;
/// Lazy traversal and matching.
pub mod engine;
/// Errors reported by the compiler.
pub mod error;
/// Pseudo-function registry.
pub mod functions;
pub mod lookup;
/// Node tests.
pub mod predicate;

use std::rc::Rc;

use thicket_dom::{DomTree, NodeId};

pub use compiler::{CompiledSelector, SelectorSource, compile, compile_simple};
pub use engine::{Enumerate, Select};
pub use error::{Result, SelectorError};
pub use functions::{Builtin, Factory, Functions};
pub use lookup::{
    element_by_id, elements_by, elements_by_class_name, elements_by_tag_name, first_element_by,
    first_element_by_class_name, first_element_by_tag_name,
};
pub use predicate::Predicate;

/// Lazily select the descendants of `node` matching `selector`.
///
/// # Errors
///
/// Returns the compiler's error if `selector` does not compile.
pub fn select_iter<'t, 'a>(
    tree: &'t DomTree,
    node: NodeId,
    selector: impl Into<SelectorSource<'a>>,
    functions: &Functions,
) -> Result<Select<'t>> {
    let compiled = compile(selector, functions)?;
    Ok(Select::new(tree, node, Rc::new(compiled)))
}

/// Collect every descendant of `node` matching `selector`, in document order.
///
/// # Errors
///
/// Returns the compiler's error if `selector` does not compile.
pub fn select_all<'a>(
    tree: &DomTree,
    node: NodeId,
    selector: impl Into<SelectorSource<'a>>,
    functions: &Functions,
) -> Result<Vec<NodeId>> {
    Ok(select_iter(tree, node, selector, functions)?.collect())
}

/// The first descendant of `node` matching `selector`.
///
/// # Errors
///
/// Returns the compiler's error if `selector` does not compile.
pub fn select_first<'a>(
    tree: &DomTree,
    node: NodeId,
    selector: impl Into<SelectorSource<'a>>,
    functions: &Functions,
) -> Result<Option<NodeId>> {
    Ok(select_iter(tree, node, selector, functions)?.next())
}

/// Whether `node` itself matches a single compound selector.
///
/// # Errors
///
/// Returns the compiler's error, or [`SelectorError::ComplexSelector`] when
/// `selector` has a combinator.
pub fn matches<'a>(
    tree: &DomTree,
    node: NodeId,
    selector: impl Into<SelectorSource<'a>>,
    functions: &Functions,
) -> Result<bool> {
    Ok(compile_simple(selector, functions)?.matches(tree, node))
}

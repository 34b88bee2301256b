//! Node tests produced by the selector compiler.
//!
//! Every component of a compound selector (`div`, `#main`, `.active`,
//! `:not(...)`) becomes one [`Predicate`]. Components are joined left to right
//! with [`Predicate::and`], so `div.active` evaluates the tag test first and
//! only looks at the class list when the tag matched.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use thicket_dom::{DomTree, ElementData, NodeId};

use crate::compiler::CompiledSelector;
use crate::engine::Select;

/// A test applied to a single node.
///
/// Predicates are not `Clone`: `:first` keeps a flag that must belong to
/// exactly one traversal. Nor are they `Send`/`Sync`, since that flag is a
/// [`Cell`] and nested `:has` selectors are shared through [`Rc`].
pub enum Predicate {
    /// Matches every node. Produced by `*` or an empty compound.
    Always,

    /// ASCII case-insensitive comparison with the node name.
    ///
    /// Text and comment nodes report `#text`/`#comment`, which no identifier
    /// can equal.
    Tag(String),

    /// Element whose `id` attribute equals the value exactly.
    Id(String),

    /// Element carrying the value among its class tokens.
    Class(String),

    /// Every test must hold. Tests run left to right and stop at the first
    /// failure.
    ///
    /// Kept flat: chaining onto an `And` appends to it, so a compound with
    /// many components does not nest.
    And(Vec<Predicate>),

    /// Negation, used by `:not`.
    Not(Box<Predicate>),

    /// At least one descendant matches the nested selector, used by `:has`.
    Has(Rc<CompiledSelector>),

    /// True for the first node it is asked about, false afterwards.
    ///
    /// The cell records whether it already fired. Chained behind the rest of
    /// the compound via [`Predicate::and`], it only sees nodes that passed
    /// every earlier component.
    First(Cell<bool>),

    /// Caller-supplied test from a custom selector function.
    Custom(Box<dyn Fn(&DomTree, NodeId) -> bool>),
}

impl Predicate {
    /// Tag-name test, chained behind `and` when given.
    #[must_use]
    pub fn tag(name: &str, and: Option<Self>) -> Self {
        Self::and(and, Self::Tag(name.to_ascii_lowercase()))
    }

    /// Id test, chained behind `and` when given.
    #[must_use]
    pub fn id(id: &str, and: Option<Self>) -> Self {
        Self::and(and, Self::Id(id.to_string()))
    }

    /// Class test, chained behind `and` when given.
    #[must_use]
    pub fn class(class_name: &str, and: Option<Self>) -> Self {
        Self::and(and, Self::Class(class_name.to_string()))
    }

    /// Wrap a closure as a predicate.
    #[must_use]
    pub fn custom(test: impl Fn(&DomTree, NodeId) -> bool + 'static) -> Self {
        Self::Custom(Box::new(test))
    }

    /// Conjunction of an optional earlier predicate with `test`.
    ///
    /// With no earlier predicate this is `test` itself.
    #[must_use]
    pub fn and(chained: Option<Self>, test: Self) -> Self {
        match chained {
            Some(Self::And(mut tests)) => {
                tests.push(test);
                Self::And(tests)
            }
            Some(chained) => Self::And(vec![chained, test]),
            None => test,
        }
    }

    /// Evaluate the predicate against `node`.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self {
            Self::Always => true,
            Self::Tag(name) => tree.node_name(node).eq_ignore_ascii_case(name),
            Self::Id(id) => tree
                .as_element(node)
                .and_then(ElementData::id)
                .is_some_and(|value| value == id.as_str()),
            Self::Class(class_name) => tree.has_class(node, class_name),
            Self::And(tests) => tests.iter().all(|test| test.matches(tree, node)),
            Self::Not(inner) => !inner.matches(tree, node),
            Self::Has(selector) => Select::new(tree, node, Rc::clone(selector))
                .next()
                .is_some(),
            Self::First(fired) => !fired.replace(true),
            Self::Custom(test) => test(tree, node),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Tag(name) => f.debug_tuple("Tag").field(name).finish(),
            Self::Id(id) => f.debug_tuple("Id").field(id).finish(),
            Self::Class(class_name) => f.debug_tuple("Class").field(class_name).finish(),
            Self::And(tests) => f.debug_tuple("And").field(tests).finish(),
            Self::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
            Self::Has(selector) => f.debug_tuple("Has").field(selector).finish(),
            Self::First(fired) => f.debug_tuple("First").field(&fired.get()).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

//! Pseudo-function registry (`:not(...)`, `:has(...)`, `:first`, and
//! caller-defined functions).
//!
//! A pseudo-function is a factory. It receives the function name, the raw
//! text between its parentheses (if any), the predicate built so far for the
//! surrounding compound selector, and the caller's registry so it can compile
//! nested selectors with the same functions in scope. It returns the
//! predicate that replaces the one built so far, which means the factory is
//! responsible for chaining (see [`Predicate::and`]).
//!
//! Lookup consults the caller's [`Functions`] first and then the built-in
//! table, which is built once on first use.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, OnceLock};

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::compiler::{compile, compile_simple};
use crate::error::{Result, SelectorError};
use crate::predicate::Predicate;

/// Signature shared by built-in and caller-supplied pseudo-functions.
///
/// Arguments: function name, raw parameter text, chained predicate, registry.
pub type Factory =
    dyn Fn(&str, Option<&str>, Option<Predicate>, &Functions) -> Result<Predicate> + Send + Sync;

/// The pseudo-functions available without registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Builtin {
    /// `:not(selector)`: the node does not match a compound selector.
    Not,
    /// `:has(selector)`: some descendant matches a (possibly complex) selector.
    Has,
    /// `:first`: only the first node that reaches this test in a traversal.
    First,
}

impl Builtin {
    fn factory(self) -> Arc<Factory> {
        match self {
            Self::Not => Arc::new(not),
            Self::Has => Arc::new(has),
            Self::First => Arc::new(first),
        }
    }
}

/// Caller-supplied pseudo-functions, consulted before the built-ins.
///
/// A registered name that matches a built-in replaces it for every selector
/// compiled with this registry.
#[derive(Clone, Default)]
pub struct Functions {
    overlay: HashMap<String, Arc<Factory>>,
}

impl Functions {
    /// An empty registry: only the built-ins are available.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any previous registration.
    pub fn register<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn(&str, Option<&str>, Option<Predicate>, &Self) -> Result<Predicate>
            + Send
            + Sync
            + 'static,
    {
        let _ = self.overlay.insert(name.to_string(), Arc::new(factory));
        self
    }

    /// Builder form of [`Functions::register`].
    #[must_use]
    pub fn with<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn(&str, Option<&str>, Option<Predicate>, &Self) -> Result<Predicate>
            + Send
            + Sync
            + 'static,
    {
        let _ = self.register(name, factory);
        self
    }

    /// Whether `name` resolves, either here or among the built-ins.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.overlay.contains_key(name) || builtins().contains_key(name)
    }

    /// Look up the factory for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::UnknownFunction`] if `name` is neither
    /// registered here nor built in.
    pub fn resolve(&self, name: &str) -> Result<&Factory> {
        if let Some(factory) = self.overlay.get(name) {
            return Ok(&**factory);
        }
        builtins()
            .get(name)
            .map(|factory| &**factory)
            .ok_or_else(|| SelectorError::UnknownFunction(name.to_string()))
    }
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.overlay.keys().collect();
        names.sort_unstable();
        f.debug_struct("Functions").field("overlay", &names).finish()
    }
}

/// The built-in table, constructed on first use and never mutated afterwards.
fn builtins() -> &'static HashMap<&'static str, Arc<Factory>> {
    static BUILTINS: OnceLock<HashMap<&'static str, Arc<Factory>>> = OnceLock::new();
    BUILTINS.get_or_init(|| {
        Builtin::iter()
            .map(|builtin| (builtin.into(), builtin.factory()))
            .collect()
    })
}

fn not(
    name: &str,
    parameter: Option<&str>,
    and: Option<Predicate>,
    functions: &Functions,
) -> Result<Predicate> {
    let parameter = parameter.ok_or_else(|| SelectorError::MissingParameter(name.to_string()))?;
    let inner = compile_simple(parameter, functions)?;
    Ok(Predicate::and(and, Predicate::Not(Box::new(inner))))
}

fn has(
    name: &str,
    parameter: Option<&str>,
    and: Option<Predicate>,
    functions: &Functions,
) -> Result<Predicate> {
    let parameter = parameter.ok_or_else(|| SelectorError::MissingParameter(name.to_string()))?;
    let inner = compile(parameter, functions)?;
    Ok(Predicate::and(and, Predicate::Has(Rc::new(inner))))
}

#[allow(clippy::unnecessary_wraps)]
fn first(
    _name: &str,
    _parameter: Option<&str>,
    and: Option<Predicate>,
    _functions: &Functions,
) -> Result<Predicate> {
    Ok(Predicate::and(and, Predicate::First(Cell::new(false))))
}

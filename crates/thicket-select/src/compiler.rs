//! Selector compiler.
//!
//! Turns selector text into a [`CompiledSelector`]: a depth bound, a
//! predicate for one compound selector, and an optional continuation that is
//! matched against the descendants of every node the first part matched.
//!
//! ```text
//! div.nav > a:not(.hidden)
//!
//! CompiledSelector { depth: None,    predicate: div && .nav,
//!   continuation:    { depth: Some(1), predicate: a && !(.hidden), continuation: None } }
//! ```
//!
//! Grammar, read left to right with one byte of lookahead:
//!
//! - the whole (trimmed) text is `ident`, `#ident`, `.ident` or `:ident`:
//!   a single tag, id, class or function test
//! - otherwise: an optional `>` (child bound) and whitespace, then `*` or a
//!   tag name, then any number of `#id`, `.class` and `:function` or
//!   `:function(raw text)` components
//! - the compound ends at end of input, at whitespace, or before `>`, and
//!   whatever remains is compiled as the continuation

use std::mem;
use std::rc::Rc;

use crate::cursor::{Cursor, is_identifier};
use crate::error::{Result, SelectorError};
use crate::functions::Functions;
use crate::predicate::Predicate;

/// One compound selector plus the chain that follows it.
#[derive(Debug)]
pub struct CompiledSelector {
    /// `Some(1)` for the child combinator, `None` for any depth.
    pub depth: Option<usize>,
    /// Test applied to each candidate node.
    pub predicate: Predicate,
    /// Selector applied below each match, if this is not the last part.
    pub continuation: Option<Rc<CompiledSelector>>,
}

impl CompiledSelector {
    /// Assemble a selector from its parts.
    #[must_use]
    pub const fn new(
        depth: Option<usize>,
        predicate: Predicate,
        continuation: Option<Rc<Self>>,
    ) -> Self {
        Self {
            depth,
            predicate,
            continuation,
        }
    }

    /// A single compound selector with no bound and no continuation.
    #[must_use]
    pub const fn simple(predicate: Predicate) -> Self {
        Self::new(None, predicate, None)
    }

    /// Whether this is one compound selector that can test a node directly.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        self.depth.is_none() && self.continuation.is_none()
    }

    /// Consume the selector, keeping only its predicate.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::ComplexSelector`] if the selector has a depth
    /// bound or a continuation.
    pub fn into_predicate(mut self) -> Result<Predicate> {
        if self.is_simple() {
            Ok(mem::replace(&mut self.predicate, Predicate::Always))
        } else {
            Err(SelectorError::ComplexSelector)
        }
    }
}

impl Drop for CompiledSelector {
    fn drop(&mut self) {
        // Free the chain part by part, not recursively.
        let mut next = self.continuation.take();
        while let Some(part) = next {
            next = match Rc::try_unwrap(part) {
                Ok(mut part) => part.continuation.take(),
                Err(_) => None,
            };
        }
    }
}

/// Input accepted by [`compile`]: selector text or an already-compiled
/// selector, which passes through untouched.
#[derive(Debug)]
pub enum SelectorSource<'a> {
    /// Text to parse.
    Text(&'a str),
    /// A selector compiled earlier, or assembled by hand.
    Compiled(CompiledSelector),
}

impl<'a> From<&'a str> for SelectorSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for SelectorSource<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl From<CompiledSelector> for SelectorSource<'_> {
    fn from(selector: CompiledSelector) -> Self {
        Self::Compiled(selector)
    }
}

/// Compile a selector.
///
/// # Errors
///
/// Returns [`SelectorError::Parse`] for malformed or empty text,
/// [`SelectorError::UnknownFunction`] for a `:name` that resolves nowhere,
/// and whatever a pseudo-function factory reports for its parameter.
pub fn compile<'a>(
    selector: impl Into<SelectorSource<'a>>,
    functions: &Functions,
) -> Result<CompiledSelector> {
    match selector.into() {
        SelectorSource::Compiled(selector) => Ok(selector),
        SelectorSource::Text(text) => compile_text(text, functions),
    }
}

/// Compile a selector that must be a single compound selector.
///
/// # Errors
///
/// Everything [`compile`] reports, plus [`SelectorError::ComplexSelector`]
/// when the selector uses `>` or has more than one part.
pub fn compile_simple<'a>(
    selector: impl Into<SelectorSource<'a>>,
    functions: &Functions,
) -> Result<Predicate> {
    compile(selector, functions)?.into_predicate()
}

fn compile_text(text: &str, functions: &Functions) -> Result<CompiledSelector> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SelectorError::parse("empty selector", 0));
    }

    if is_identifier(text) {
        return Ok(CompiledSelector::simple(Predicate::tag(text, None)));
    }
    if let Some(shorthand) = compile_shorthand(text, functions) {
        return shorthand;
    }

    let mut cursor = Cursor::new(text);
    compile_cursor(&mut cursor, functions)
}

/// `#id`, `.class` and `:function` spelled as the entire selector.
fn compile_shorthand(text: &str, functions: &Functions) -> Option<Result<CompiledSelector>> {
    let rest = text.get(1..)?;
    if !is_identifier(rest) {
        return None;
    }
    let predicate = match text.as_bytes().first()? {
        b'#' => Ok(Predicate::id(rest, None)),
        b'.' => Ok(Predicate::class(rest, None)),
        b':' => functions
            .resolve(rest)
            .and_then(|factory| factory(rest, None, None, functions)),
        _ => return None,
    };
    Some(predicate.map(CompiledSelector::simple))
}

fn compile_cursor(cursor: &mut Cursor<'_>, functions: &Functions) -> Result<CompiledSelector> {
    let (depth, predicate) = compile_compound(cursor, functions)?;

    let mut rest = Vec::new();
    while !cursor.is_at_end() {
        rest.push(compile_compound(cursor, functions)?);
    }
    let continuation = rest
        .into_iter()
        .rev()
        .fold(None, |next, (depth, predicate)| {
            Some(Rc::new(CompiledSelector::new(depth, predicate, next)))
        });

    Ok(CompiledSelector::new(depth, predicate, continuation))
}

/// One compound selector and the combinator in front of it. Stops at end of
/// input, after whitespace, or before `>`.
fn compile_compound(
    cursor: &mut Cursor<'_>,
    functions: &Functions,
) -> Result<(Option<usize>, Predicate)> {
    let depth = if cursor.eat(b'>') {
        let _ = cursor.eat_whitespace();
        Some(1)
    } else {
        None
    };

    let mut predicate = None;
    if !cursor.eat(b'*') {
        let tag = cursor.eat_identifier();
        if !tag.is_empty() {
            predicate = Some(Predicate::tag(tag, None));
        }
    }

    loop {
        if cursor.eat(b'#') {
            let id = cursor.expect_identifier("'#'")?;
            predicate = Some(Predicate::id(id, predicate));
        } else if cursor.eat(b'.') {
            let class_name = cursor.expect_identifier("'.'")?;
            predicate = Some(Predicate::class(class_name, predicate));
        } else if cursor.eat(b':') {
            let name = cursor.expect_identifier("':'")?;
            let factory = functions.resolve(name)?;
            let parameter = if cursor.eat(b'(') {
                Some(cursor.eat_parenthesized()?).filter(|raw| !raw.trim().is_empty())
            } else {
                None
            };
            predicate = Some(factory(name, parameter, predicate, functions)?);
        } else if cursor.is_at_end() || cursor.eat_whitespace() || cursor.peek() == Some(b'>') {
            break;
        } else {
            return Err(SelectorError::parse("unexpected character", cursor.pos()));
        }
    }

    Ok((depth, predicate.unwrap_or(Predicate::Always)))
}

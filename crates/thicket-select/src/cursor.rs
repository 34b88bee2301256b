//! Byte cursor over selector text.
//!
//! Everything the grammar cares about is ASCII, so the cursor works on bytes
//! and only ever slices the source at ASCII positions.

use crate::error::{Result, SelectorError};

/// Characters allowed in tag names, ids, classes and function names:
/// `[0-9A-Za-z_-]`.
pub(crate) const fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Whether the whole of `s` is one non-empty identifier.
pub(crate) fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_identifier_byte)
}

/// Deepest parenthesis nesting accepted in a function parameter.
pub(crate) const MAX_NESTING: usize = 32;

#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(src: &'a str) -> Self {
        Self { src, i: 0 }
    }

    pub(crate) const fn pos(&self) -> usize {
        self.i
    }

    pub(crate) const fn is_at_end(&self) -> bool {
        self.i >= self.src.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.i).copied()
    }

    /// Consume `b` if it is next.
    pub(crate) fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.i += 1;
            true
        } else {
            false
        }
    }

    /// Consume a run of whitespace; `true` if at least one byte was eaten.
    pub(crate) fn eat_whitespace(&mut self) -> bool {
        let start = self.i;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.i += 1;
        }
        self.i > start
    }

    /// Consume the longest identifier span, possibly empty.
    pub(crate) fn eat_identifier(&mut self) -> &'a str {
        let start = self.i;
        while self.peek().is_some_and(is_identifier_byte) {
            self.i += 1;
        }
        &self.src[start..self.i]
    }

    /// Consume a non-empty identifier or fail, naming what preceded it.
    pub(crate) fn expect_identifier(&mut self, after: &str) -> Result<&'a str> {
        let ident = self.eat_identifier();
        if ident.is_empty() {
            Err(SelectorError::parse(
                format!("expected identifier after {after}"),
                self.i,
            ))
        } else {
            Ok(ident)
        }
    }

    /// Consume up to and including the `)` that balances an already-eaten
    /// `(`, returning the raw text in between.
    ///
    /// Parameters are compiled recursively, so nesting deeper than
    /// [`MAX_NESTING`] is rejected here.
    pub(crate) fn eat_parenthesized(&mut self) -> Result<&'a str> {
        let open = self.i.saturating_sub(1);
        let start = self.i;
        let mut depth = 1usize;
        while let Some(b) = self.peek() {
            self.i += 1;
            match b {
                b'(' => {
                    depth += 1;
                    if depth > MAX_NESTING {
                        return Err(SelectorError::parse(
                            "parentheses nested too deeply",
                            self.i - 1,
                        ));
                    }
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(&self.src[start..self.i - 1]);
                    }
                }
                _ => {}
            }
        }
        Err(SelectorError::parse("unbalanced parentheses", open))
    }
}

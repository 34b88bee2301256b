//! Errors raised while compiling selectors.
//!
//! Matching itself never fails: a predicate that cannot apply to a node
//! simply does not match it.

use thiserror::Error;

/// Everything that can go wrong turning selector text into a matcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Malformed selector text.
    #[error("invalid selector: {message} at offset {position}")]
    Parse {
        /// What the parser expected or rejected.
        message: String,
        /// Byte offset into the text being parsed.
        position: usize,
    },

    /// A `:name` that is neither registered by the caller nor built in.
    #[error("unknown selector function ':{0}'")]
    UnknownFunction(String),

    /// A function such as `:not` or `:has` used without its argument.
    #[error("missing parameter for selector function ':{0}'")]
    MissingParameter(String),

    /// A combinator or child bound where only one compound selector may appear.
    #[error("complex selectors are not allowed here")]
    ComplexSelector,
}

impl SelectorError {
    pub(crate) fn parse(message: impl Into<String>, position: usize) -> Self {
        Self::Parse {
            message: message.into(),
            position,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SelectorError>;

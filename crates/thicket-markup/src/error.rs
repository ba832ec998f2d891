//! Errors raised while building a tree from markup.

use strum_macros::Display;
use thiserror::Error;

use crate::builder::BuilderState;

/// The defect behind a [`MarkupError::MalformedMarkup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MalformedKind {
    /// Whitespace appeared inside a closing tag's name (`</a b>`).
    #[strum(to_string = "invalid closing tag")]
    InvalidClosingTag,
    /// A closing tag does not match the innermost open element.
    #[strum(to_string = "tag cannot be closed")]
    UnclosableTag,
    /// An opening tag has no letters in its name (`<1>`).
    #[strum(to_string = "invalid tag name")]
    InvalidTagName,
    /// An opening tag appeared after the root element was closed.
    #[strum(to_string = "element outside the root element")]
    ElementOutsideRoot,
}

/// Fatal parse failure. Parsing stops at the first one and no partial tree
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// Tag structure is inconsistent. `name` is the offending tag name as
    /// accumulated at the point of failure.
    #[error("{kind}: {name}")]
    MalformedMarkup {
        /// What was wrong.
        kind: MalformedKind,
        /// The offending tag name.
        name: String,
    },

    /// Input ended while an element was still open or a tag was unfinished.
    #[error("unexpected end of input in {state} state: <{open}> was never closed")]
    UnexpectedEndOfInput {
        /// Builder state when the input ran out.
        state: BuilderState,
        /// Innermost open element, or the unfinished tag's name.
        open: String,
    },

    /// The input contained no element at all.
    #[error("no root element found")]
    NoRootElement,
}

impl MarkupError {
    pub(crate) fn malformed(kind: MalformedKind, name: &str) -> Self {
        Self::MalformedMarkup {
            kind,
            name: name.to_string(),
        }
    }

    /// The tag name this error refers to, if any.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::MalformedMarkup { name, .. } => Some(name),
            Self::UnexpectedEndOfInput { open, .. } => Some(open),
            Self::NoRootElement => None,
        }
    }
}

/// A non-fatal observation made while building the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human-readable description.
    pub message: String,
    /// Character index into the normalized input.
    pub position: usize,
}

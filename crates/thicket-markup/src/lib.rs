//! Markup tree builder and serializer for Thicket.
//!
//! # Scope
//!
//! This crate implements:
//! - **Normalizer** - folds optional whitespace into one canonical spelling
//! - **Tree builder** - a character-level state machine that turns the
//!   normalized markup directly into a [`DomTree`], tracking open elements
//!   on an explicit ancestor stack
//! - **Serializer** - renders a tree back into markup
//!
//! The accepted language is a small, well-formed subset of tag markup:
//! letter-only tag names, double-quoted attribute values, text, nested and
//! self-closing elements, and exactly one root element.
//!
//! # Not Supported
//!
//! - Void elements without `/>`
//! - Entity and character references
//! - Comments, CDATA, and DOCTYPE
//! - Raw text elements (`script`, `style`)
//!
//! # Example
//!
//! ```
//! use thicket_markup::{parse, serialize};
//!
//! let tree = parse(r#"<ul class="menu"> <li>one</li> <li/> </ul>"#).unwrap();
//! let root = tree.root().unwrap();
//! assert_eq!(tree.children(root).len(), 2);
//! assert_eq!(tree.get(root).unwrap().attr("class"), Some("menu"));
//! assert_eq!(
//!     serialize(&tree),
//!     r#"<ul class="menu">   <li>one</li><li></li></ul>"#
//! );
//! ```

/// Tree builder state machine.
pub mod builder;
/// Error and issue types.
pub mod error;
/// Whitespace normalization.
pub mod normalizer;
/// Tree to markup rendering.
pub mod serializer;

pub use builder::{BuilderState, TreeBuilder};
pub use error::{MalformedKind, MarkupError, ParseIssue};
pub use normalizer::normalize;
pub use serializer::{
    SerializeOptions, format_tree, print_tree, serialize, serialize_node, serialize_with_options,
};
pub use thicket_dom::{AttributesMap, DomTree, Node, NodeId};

/// Normalize `markup` and build its tree.
///
/// # Errors
///
/// See [`TreeBuilder::run`].
pub fn parse(markup: &str) -> Result<DomTree, MarkupError> {
    TreeBuilder::new(&normalize(markup)).run()
}

/// Like [`parse`], also returning the non-fatal issues found on the way.
///
/// # Errors
///
/// See [`TreeBuilder::run`].
pub fn parse_with_issues(markup: &str) -> Result<(DomTree, Vec<ParseIssue>), MarkupError> {
    let mut builder = TreeBuilder::new(&normalize(markup));
    let tree = builder.run()?;
    Ok((tree, builder.issues().to_vec()))
}

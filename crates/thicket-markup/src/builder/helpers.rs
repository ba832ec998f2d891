//! Helper methods for the tree builder.
//!
//! - State transitions and lookaround
//! - Element creation, attribute commits, and closing
//! - Issue reporting

use std::mem;

use thicket_common::warning::warn_once;
use thicket_dom::{Node, NodeId};

use super::core::{BuilderState, TreeBuilder};
use crate::error::{MalformedKind, MarkupError, ParseIssue};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl TreeBuilder {
    /// The next character will be handled by `new_state`.
    pub(super) const fn switch_to(&mut self, new_state: BuilderState) {
        self.state = new_state;
    }

    /// Peek at the character `offset` positions after the current one.
    pub(super) fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// The character before the current one.
    pub(super) fn previous(&self) -> Option<char> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.input.get(i).copied())
    }

    /// Whether the next two characters are `/>`.
    pub(super) fn next_is_self_closing(&self) -> bool {
        self.peek(1) == Some('/') && self.peek(2) == Some('>')
    }
}

// =============================================================================
// Tree Construction Helpers
// =============================================================================

impl TreeBuilder {
    /// The innermost open element.
    pub(super) fn current_node(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    /// Create an element named by the pending tag name.
    ///
    /// The first element becomes the root. Every later one is appended to
    /// the innermost open element. Either way the new element is pushed
    /// onto the ancestor stack and receives what follows.
    pub(super) fn create_element(&mut self) -> Result<(), MarkupError> {
        if self.tag_name.is_empty() {
            return Err(MarkupError::malformed(
                MalformedKind::InvalidTagName,
                &self.tag_name,
            ));
        }
        let parent = self.current_node();
        if parent.is_none() && !self.tree.is_empty() {
            return Err(MarkupError::malformed(
                MalformedKind::ElementOutsideRoot,
                &self.tag_name,
            ));
        }

        let id = self.tree.alloc(Node::new(self.tag_name.clone()));
        if let Some(parent) = parent {
            self.tree.append_child(parent, id);
        }
        self.stack.push(id);
        Ok(())
    }

    /// Store the pending attribute on the current element and reset the
    /// name and value buffers.
    pub(super) fn commit_attribute(&mut self) {
        let name = mem::take(&mut self.attribute_name);
        let value = mem::take(&mut self.attribute_value);
        let Some(node) = self.current_node().and_then(|id| self.tree.get_mut(id)) else {
            return;
        };
        let tag = node.tag_name().to_string();
        if node.set_attr(name.clone(), value).is_some() {
            self.record_issue(format!(
                "duplicate attribute '{name}' on <{tag}>, the last value wins"
            ));
        }
    }

    /// Close the innermost open element, which must be named `name`.
    ///
    /// The element's empty fields are dropped and it is popped off the
    /// ancestor stack; its parent becomes the current element again.
    pub(super) fn close_element(&mut self, name: &str) -> Result<(), MarkupError> {
        let Some(top) = self.current_node() else {
            return Err(MarkupError::malformed(MalformedKind::UnclosableTag, name));
        };
        let Some(node) = self.tree.get_mut(top).filter(|node| node.tag_name() == name) else {
            return Err(MarkupError::malformed(MalformedKind::UnclosableTag, name));
        };
        node.finalize();
        let _ = self.stack.pop();
        Ok(())
    }
}

// =============================================================================
// Issue Reporting
// =============================================================================

impl TreeBuilder {
    /// Record a non-fatal issue at the current position.
    ///
    /// Also reported through the shared warning channel, once per message.
    pub(super) fn record_issue(&mut self, message: String) {
        warn_once("Markup", &message);
        self.issues.push(ParseIssue {
            message,
            position: self.position,
        });
    }
}

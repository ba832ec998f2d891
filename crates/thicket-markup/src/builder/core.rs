use std::mem;

use strum_macros::Display;
use thicket_dom::{DomTree, NodeId};

use crate::error::{MalformedKind, MarkupError, ParseIssue};

/// The tree builder state machine.
///
/// Each state has a handler that looks at the current character plus one
/// character of context on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BuilderState {
    /// Outside any tag, before the root element.
    Init,
    /// Accumulating an opening tag's name after `<`.
    TagStart,
    /// Scanning an attribute name up to `=`, `>`, `/>`, or a space.
    AttributeStart,
    /// Inside a double-quoted attribute value.
    AttributeValue,
    /// Between two attributes.
    AttributeEnd,
    /// At the `>` of an opening tag; decides between open and self-closing.
    TagEnd,
    /// Inside an element body, collecting text.
    OpenTag,
    /// Accumulating a closing tag's name after `</`.
    CloseTagStart,
    /// At the `>` of a closing tag; matches against the open element.
    CloseTagEnd,
}

/// Builds a [`DomTree`] from normalized markup in a single left-to-right pass.
///
/// The builder never backtracks. Open elements live on an explicit ancestor
/// stack of [`NodeId`]s; the top of the stack is the element that receives
/// text, attributes, and new children.
pub struct TreeBuilder {
    pub(super) input: Vec<char>,
    pub(super) position: usize,
    pub(super) state: BuilderState,
    pub(super) tree: DomTree,
    /// Open elements, innermost last.
    pub(super) stack: Vec<NodeId>,
    /// Pending opening or closing tag name.
    pub(super) tag_name: String,
    pub(super) attribute_name: String,
    pub(super) attribute_value: String,
    pub(super) issues: Vec<ParseIssue>,
    pub(super) reported_text_before_root: bool,
    pub(super) reported_text_after_root: bool,
}

impl TreeBuilder {
    /// Create a builder over already normalized input.
    ///
    /// Use [`crate::parse`] to normalize and build in one step.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            state: BuilderState::Init,
            tree: DomTree::new(),
            stack: Vec::new(),
            tag_name: String::new(),
            attribute_name: String::new(),
            attribute_value: String::new(),
            issues: Vec::new(),
            reported_text_before_root: false,
            reported_text_after_root: false,
        }
    }

    /// The state the builder is currently in.
    #[must_use]
    pub const fn state(&self) -> BuilderState {
        self.state
    }

    /// Non-fatal issues recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Consume the whole input and return the finished tree.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::MalformedMarkup`] at the first inconsistent
    /// tag, [`MarkupError::UnexpectedEndOfInput`] if the input stops while
    /// an element or tag is still open, and [`MarkupError::NoRootElement`]
    /// if the input holds no element at all.
    pub fn run(&mut self) -> Result<DomTree, MarkupError> {
        while let Some(&c) = self.input.get(self.position) {
            match self.state {
                BuilderState::Init => self.handle_init_state(c),
                BuilderState::TagStart => self.handle_tag_start_state(c)?,
                BuilderState::AttributeStart => self.handle_attribute_start_state(c),
                BuilderState::AttributeValue => self.handle_attribute_value_state(c),
                BuilderState::AttributeEnd => self.handle_attribute_end_state(c),
                BuilderState::TagEnd => self.handle_tag_end_state(c)?,
                BuilderState::OpenTag => self.handle_open_tag_state(c),
                BuilderState::CloseTagStart => self.handle_close_tag_start_state(c)?,
                BuilderState::CloseTagEnd => self.handle_close_tag_end_state(c)?,
            }
            self.position += 1;
        }
        self.finish()
    }

    fn handle_init_state(&mut self, c: char) {
        if c == '<' {
            self.switch_to(BuilderState::TagStart);
        } else if !c.is_whitespace() && !self.reported_text_before_root {
            self.reported_text_before_root = true;
            self.record_issue("text before the root element is ignored".to_string());
        }
    }

    fn handle_tag_start_state(&mut self, c: char) -> Result<(), MarkupError> {
        let next = self.peek(1);
        if c.is_ascii_alphabetic() {
            self.tag_name.push(c);
        } else if c.is_whitespace() && next.is_some_and(|n| n.is_ascii_alphabetic()) {
            // The name is complete and an attribute list follows.
            self.create_element()?;
            self.switch_to(BuilderState::AttributeStart);
        }
        if next == Some('>') {
            self.create_element()?;
            self.switch_to(BuilderState::TagEnd);
        }
        Ok(())
    }

    fn handle_attribute_start_state(&mut self, c: char) {
        if c != '=' {
            self.attribute_name.push(c);
        }
        let next = self.peek(1);
        let self_closing_next = self.next_is_self_closing();
        if matches!(next, Some(' ' | '>')) || self_closing_next {
            self.commit_attribute();
        }
        match next {
            Some(' ') => self.switch_to(BuilderState::AttributeEnd),
            None | Some('>') => self.switch_to(BuilderState::TagEnd),
            Some('"') => self.switch_to(BuilderState::AttributeValue),
            Some(_) if self_closing_next => self.switch_to(BuilderState::TagEnd),
            Some(_) => {}
        }
    }

    fn handle_attribute_value_state(&mut self, c: char) {
        if c != '"' {
            self.attribute_value.push(c);
        }
        if self.peek(1) == Some('"') {
            self.commit_attribute();
            self.switch_to(BuilderState::AttributeEnd);
        }
    }

    fn handle_attribute_end_state(&mut self, c: char) {
        if c.is_whitespace() {
            self.switch_to(BuilderState::AttributeStart);
        } else if c != '"' && !(c == '/' && self.peek(1) == Some('>')) {
            self.record_issue(format!(
                "unexpected '{c}' after an attribute value in <{}>",
                self.tag_name
            ));
        }
        if self.peek(1) == Some('>') {
            self.switch_to(BuilderState::TagEnd);
        }
    }

    fn handle_tag_end_state(&mut self, c: char) -> Result<(), MarkupError> {
        if c != '>' {
            return Ok(());
        }
        if self.previous() == Some('/') {
            // Self-closing: the element is closed by its own start tag.
            let name = mem::take(&mut self.tag_name);
            self.close_element(&name)?;
        }
        self.tag_name.clear();
        self.switch_to(BuilderState::OpenTag);
        Ok(())
    }

    fn handle_open_tag_state(&mut self, c: char) {
        if c == '<' {
            if self.peek(1) == Some('/') {
                self.switch_to(BuilderState::CloseTagStart);
            } else {
                self.switch_to(BuilderState::TagStart);
            }
            return;
        }
        if let Some(node) = self.current_node().and_then(|id| self.tree.get_mut(id)) {
            node.push_text(c);
        } else if !c.is_whitespace() && !self.reported_text_after_root {
            self.reported_text_after_root = true;
            self.record_issue("text after the root element is ignored".to_string());
        }
    }

    fn handle_close_tag_start_state(&mut self, c: char) -> Result<(), MarkupError> {
        if c.is_ascii_alphabetic() {
            self.tag_name.push(c);
        } else if c.is_whitespace() {
            return Err(MarkupError::malformed(
                MalformedKind::InvalidClosingTag,
                &self.tag_name,
            ));
        }
        if self.peek(1) == Some('>') {
            self.switch_to(BuilderState::CloseTagEnd);
        }
        Ok(())
    }

    fn handle_close_tag_end_state(&mut self, c: char) -> Result<(), MarkupError> {
        if c == '>' {
            let name = mem::take(&mut self.tag_name);
            self.close_element(&name)?;
            self.switch_to(BuilderState::OpenTag);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<DomTree, MarkupError> {
        if let Some(open) = self.current_node().and_then(|id| self.tree.tag_name(id)) {
            return Err(MarkupError::UnexpectedEndOfInput {
                state: self.state,
                open: open.to_string(),
            });
        }
        if !matches!(self.state, BuilderState::Init | BuilderState::OpenTag) {
            return Err(MarkupError::UnexpectedEndOfInput {
                state: self.state,
                open: self.tag_name.clone(),
            });
        }
        if self.tree.is_empty() {
            return Err(MarkupError::NoRootElement);
        }
        Ok(mem::take(&mut self.tree))
    }
}

//! Element tree for the Thicket markup parser.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Parents
//! own their children through the arena; there are no back-references that
//! could form cycles.
//!
//! Every node is an element. Text that appears directly inside an element is
//! accumulated on that element rather than stored as separate text nodes.

use indexmap::IndexMap;

/// Map of attribute names to values for an element, in source order.
pub type AttributesMap = IndexMap<String, String>;

/// A type-safe index into the element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root element is always the first node allocated.
    pub const ROOT: Self = Self(0);
}

/// One element of the tree.
///
/// While the tree builder is scanning the element's source region,
/// `attrs` and `text` hold (possibly empty) buffers. [`Node::finalize`]
/// turns empty buffers into `None`, so a finished node reports absent
/// fields as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag_name: String,

    /// Attribute list. `None` once finalized without attributes.
    pub attrs: Option<AttributesMap>,

    /// Character data that appeared directly inside this element.
    /// `None` once finalized without text.
    pub text: Option<String>,

    /// The parent element, `None` only for the root.
    pub parent: Option<NodeId>,

    /// Child elements in document order.
    pub children: Vec<NodeId>,

    /// The element immediately following this one in its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The element immediately preceding this one in its parent's children.
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    /// Create an element with the given tag and empty buffers.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: Some(AttributesMap::new()),
            text: Some(String::new()),
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }

    /// The element's tag name. Fixed at creation.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The attribute map, if the element has any attributes.
    #[must_use]
    pub fn attrs(&self) -> Option<&AttributesMap> {
        self.attrs.as_ref().filter(|attrs| !attrs.is_empty())
    }

    /// Look up a single attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .as_ref()
            .and_then(|attrs| attrs.get(name))
            .map(String::as_str)
    }

    /// Store an attribute, returning the previous value if `name` was
    /// already present. The original position of a replaced key is kept.
    pub fn set_attr(&mut self, name: String, value: String) -> Option<String> {
        self.attrs
            .get_or_insert_with(AttributesMap::new)
            .insert(name, value)
    }

    /// The element's text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }

    /// Append a character to the element's text content.
    pub fn push_text(&mut self, c: char) {
        self.text.get_or_insert_with(String::new).push(c);
    }

    /// Whether the element has any child elements.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Drop empty buffers so that absent fields read as `None`.
    ///
    /// Called exactly once, when the element's closing tag is recognized.
    pub fn finalize(&mut self) {
        if self.attrs.as_ref().is_some_and(AttributesMap::is_empty) {
            self.attrs = None;
        }
        if self.text.as_ref().is_some_and(String::is_empty) {
            self.text = None;
        }
    }
}

/// Arena-based element tree with O(1) node access and traversal.
///
/// All nodes live in a contiguous vector and refer to each other by index.
/// The first node allocated is the root ([`NodeId::ROOT`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// The root element, if any node has been allocated.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId::ROOT)
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to any parent.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    ///
    /// # Panics
    ///
    /// Panics if either id was not allocated by this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Get the tag name of a node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::tag_name)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over `id` and everything below it in document (pre-)order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let stack = if self.get(id).is_some() {
            vec![id]
        } else {
            Vec::new()
        };
        DescendantIterator { tree: self, stack }
    }

    /// Find the first element with the given tag at or below `from`.
    #[must_use]
    pub fn find_by_tag(&self, from: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(from)
            .find(|&id| self.tag_name(id) == Some(tag))
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Reversed so the first child is popped next.
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

//! Tree to markup rendering.
//!
//! Serialization is the inverse of tree building for structure and
//! attributes. Source formatting is not preserved, and because an element's
//! text is stored as one string, it is written before the element's
//! children. Nothing is escaped: the builder decodes no entities, so
//! escaping would break `parse(serialize(tree))`.

use thicket_dom::{DomTree, Node, NodeId};

/// Options controlling markup output.
///
/// # Examples
///
/// ```
/// use thicket_markup::{parse, serialize_with_options, SerializeOptions};
///
/// let tree = parse("<a><b/></a>").unwrap();
/// let options = SerializeOptions::default().self_close_empty(true);
/// assert_eq!(serialize_with_options(&tree, &options), "<a><b/></a>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Emit each element's text content. Defaults to `true`.
    pub text: bool,
    /// Wrap attribute values in double quotes. Defaults to `true`.
    pub quote_attributes: bool,
    /// Write elements without text or children as `<tag/>`.
    /// Defaults to `false`.
    pub self_close_empty: bool,
    /// Put every element and text run on its own line. Defaults to `false`.
    pub indent: bool,
    /// Indentation for each nesting level when `indent` is on.
    /// Defaults to two spaces.
    pub indent_str: String,
    legacy: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            text: true,
            quote_attributes: true,
            self_close_empty: false,
            indent: false,
            indent_str: "  ".to_string(),
            legacy: false,
        }
    }
}

impl SerializeOptions {
    /// Outline layout for eyeballing structure: `<tag k=v >`, a newline
    /// after every opening and closing tag, a tab before each child,
    /// unquoted values, and no text.
    ///
    /// Its output is for reading only; unquoted values do not parse back.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            text: false,
            quote_attributes: false,
            legacy: true,
            ..Self::default()
        }
    }

    /// Enables or disables text output.
    #[must_use]
    pub const fn text(mut self, text: bool) -> Self {
        self.text = text;
        self
    }

    /// Enables or disables quoting of attribute values.
    #[must_use]
    pub const fn quote_attributes(mut self, quote: bool) -> Self {
        self.quote_attributes = quote;
        self
    }

    /// Enables or disables `<tag/>` for empty elements.
    #[must_use]
    pub const fn self_close_empty(mut self, self_close: bool) -> Self {
        self.self_close_empty = self_close;
        self
    }

    /// Enables or disables indented output.
    #[must_use]
    pub const fn indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the per-level indentation string.
    #[must_use]
    pub fn indent_str(mut self, s: &str) -> Self {
        self.indent_str = s.to_string();
        self
    }
}

/// Render the whole tree with default options.
#[must_use]
pub fn serialize(tree: &DomTree) -> String {
    serialize_with_options(tree, &SerializeOptions::default())
}

/// Render the whole tree. An empty tree renders as the empty string.
#[must_use]
pub fn serialize_with_options(tree: &DomTree, options: &SerializeOptions) -> String {
    tree.root()
        .map(|root| serialize_node(tree, root, options))
        .unwrap_or_default()
}

/// Render the subtree rooted at `id`.
#[must_use]
pub fn serialize_node(tree: &DomTree, id: NodeId, options: &SerializeOptions) -> String {
    let mut serializer = Serializer {
        tree,
        options,
        out: String::new(),
    };
    if options.legacy {
        serializer.write_legacy(id);
    } else {
        serializer.write_node(id, 0);
    }
    serializer.out
}

struct Serializer<'a> {
    tree: &'a DomTree,
    options: &'a SerializeOptions,
    out: String,
}

impl Serializer<'_> {
    fn write_node(&mut self, id: NodeId, depth: usize) {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            return;
        };
        let text = node.text().filter(|_| self.options.text);
        let children = tree.children(id);

        self.write_indent(depth);
        self.write_start_tag(node);
        if text.is_none() && children.is_empty() {
            if self.options.self_close_empty {
                self.out.push_str("/>");
            } else {
                self.out.push('>');
                self.write_end_tag(node);
            }
            self.write_newline();
            return;
        }

        self.out.push('>');
        self.write_newline();
        if let Some(text) = text {
            self.write_indent(depth + 1);
            self.out.push_str(text);
            self.write_newline();
        }
        for &child in children {
            self.write_node(child, depth + 1);
        }
        self.write_indent(depth);
        self.write_end_tag(node);
        self.write_newline();
    }

    fn write_legacy(&mut self, id: NodeId) {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            return;
        };
        self.write_start_tag(node);
        self.out.push_str(" >\n");
        for &child in tree.children(id) {
            self.out.push('\t');
            self.write_legacy(child);
        }
        self.write_end_tag(node);
        self.out.push('\n');
    }

    fn write_start_tag(&mut self, node: &Node) {
        self.out.push('<');
        self.out.push_str(node.tag_name());
        for (name, value) in node.attrs().into_iter().flatten() {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push('=');
            if self.options.quote_attributes {
                self.out.push('"');
                self.out.push_str(value);
                self.out.push('"');
            } else {
                self.out.push_str(value);
            }
        }
    }

    fn write_end_tag(&mut self, node: &Node) {
        self.out.push_str("</");
        self.out.push_str(node.tag_name());
        self.out.push('>');
    }

    fn write_indent(&mut self, depth: usize) {
        if self.options.indent {
            for _ in 0..depth {
                self.out.push_str(&self.options.indent_str);
            }
        }
    }

    fn write_newline(&mut self) {
        if self.options.indent {
            self.out.push('\n');
        }
    }
}

/// Print a readable outline of the subtree at `id` to stdout.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    print!("{}", format_tree(tree, id, indent));
}

/// The outline [`print_tree`] prints, one element per line.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId, indent: usize) -> String {
    let mut out = String::new();
    format_tree_into(tree, id, indent, &mut out);
    out
}

fn format_tree_into(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(indent);
    match node.attrs() {
        Some(attrs) => {
            let attrs: Vec<String> = attrs
                .iter()
                .map(|(k, v)| {
                    if v.is_empty() {
                        k.clone()
                    } else {
                        format!("{k}=\"{v}\"")
                    }
                })
                .collect();
            out.push_str(&format!("{prefix}<{} {}>\n", node.tag_name(), attrs.join(" ")));
        }
        None => out.push_str(&format!("{prefix}<{}>\n", node.tag_name())),
    }
    if let Some(text) = node.text() {
        let display = text.replace(' ', "\u{00B7}");
        out.push_str(&format!("{prefix}  \"{display}\"\n"));
    }
    for &child_id in tree.children(id) {
        format_tree_into(tree, child_id, indent + 1, out);
    }
}

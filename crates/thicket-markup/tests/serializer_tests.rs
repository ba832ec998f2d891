//! Integration tests for the serializer.

use thicket_dom::{DomTree, NodeId};
use thicket_markup::{SerializeOptions, format_tree, parse, serialize, serialize_with_options};

/// Helper to parse markup that is expected to be well formed.
fn parse_ok(markup: &str) -> DomTree {
    match parse(markup) {
        Ok(tree) => tree,
        Err(err) => panic!("failed to parse {markup:?}: {err}"),
    }
}

/// Helper to compare tag, attribute, and child structure of two subtrees.
fn same_shape(a: &DomTree, a_id: NodeId, b: &DomTree, b_id: NodeId) -> bool {
    let (Some(left), Some(right)) = (a.get(a_id), b.get(b_id)) else {
        return false;
    };
    left.tag_name() == right.tag_name()
        && left.attrs() == right.attrs()
        && a.children(a_id).len() == b.children(b_id).len()
        && a
            .children(a_id)
            .iter()
            .zip(b.children(b_id))
            .all(|(&x, &y)| same_shape(a, x, b, y))
}

const SAMPLE: &str = r#"
<svg width="24" height="24" viewBox="0 0 24 24">
    <g fill="none">
        <path d="M 0 0 L 24 24"/>
        <circle cx="12" cy="12" r="4"></circle>
    </g>
    <text x="1">label</text>
</svg>
"#;

#[test]
fn test_serialize_default() {
    let tree = parse_ok(r#"<a k="v"><b>hi</b><c/></a>"#);
    assert_eq!(serialize(&tree), r#"<a k="v"><b>hi</b><c></c></a>"#);
}

#[test]
fn test_serialize_empty_tree() {
    assert_eq!(serialize(&DomTree::new()), "");
}

#[test]
fn test_text_is_written_before_children() {
    let tree = parse_ok("<p>one<b>two</b>three</p>");
    assert_eq!(serialize(&tree), "<p>onethree<b>two</b></p>");
}

#[test]
fn test_text_can_be_omitted() {
    let tree = parse_ok("<p>one<b>two</b></p>");
    let options = SerializeOptions::default().text(false);
    assert_eq!(serialize_with_options(&tree, &options), "<p><b></b></p>");
}

#[test]
fn test_self_close_empty() {
    let tree = parse_ok(r#"<a><b x="1"></b><c>t</c></a>"#);
    let options = SerializeOptions::default().self_close_empty(true);
    assert_eq!(
        serialize_with_options(&tree, &options),
        r#"<a><b x="1"/><c>t</c></a>"#
    );
}

#[test]
fn test_unquoted_attributes() {
    let tree = parse_ok(r#"<a k="v"></a>"#);
    let options = SerializeOptions::default().quote_attributes(false);
    assert_eq!(serialize_with_options(&tree, &options), "<a k=v></a>");
}

#[test]
fn test_indented_output() {
    let tree = parse_ok(r#"<a><b>hi</b><c k="v"/></a>"#);
    let options = SerializeOptions::default().indent(true);
    let expected = "<a>\n  <b>\n    hi\n  </b>\n  <c k=\"v\"></c>\n</a>\n";
    assert_eq!(serialize_with_options(&tree, &options), expected);
}

#[test]
fn test_custom_indent_string() {
    let tree = parse_ok("<a><b/></a>");
    let options = SerializeOptions::default().indent(true).indent_str("\t");
    assert_eq!(
        serialize_with_options(&tree, &options),
        "<a>\n\t<b></b>\n</a>\n"
    );
}

#[test]
fn test_legacy_layout() {
    let tree = parse_ok(r#"<a k="v">text<b/></a>"#);
    let out = serialize_with_options(&tree, &SerializeOptions::legacy());
    assert_eq!(out, "<a k=v >\n\t<b >\n</b>\n</a>\n");
}

#[test]
fn test_round_trip_preserves_shape() {
    let tree = parse_ok(SAMPLE);
    let again = parse_ok(&serialize(&tree));
    assert!(same_shape(&tree, NodeId::ROOT, &again, NodeId::ROOT));
    assert_eq!(tree, again);
}

#[test]
fn test_indented_round_trip_preserves_shape() {
    let tree = parse_ok(SAMPLE);
    let options = SerializeOptions::default().indent(true).self_close_empty(true);
    let again = parse_ok(&serialize_with_options(&tree, &options));
    assert!(same_shape(&tree, NodeId::ROOT, &again, NodeId::ROOT));
    let text = again.find_by_tag(NodeId::ROOT, "text").unwrap();
    assert_eq!(again.get(text).unwrap().text(), Some("label"));
}

#[test]
fn test_round_trip_without_text_keeps_structure() {
    let tree = parse_ok(SAMPLE);
    let options = SerializeOptions::default().text(false);
    let again = parse_ok(&serialize_with_options(&tree, &options));
    assert!(same_shape(&tree, NodeId::ROOT, &again, NodeId::ROOT));
}

#[test]
fn test_format_tree_outline() {
    let tree = parse_ok(r#"<ul id="x"><li>a b</li><li hidden/></ul>"#);
    let outline = format_tree(&tree, NodeId::ROOT, 0);
    assert_eq!(
        outline,
        "<ul id=\"x\">\n  <li>\n    \"a\u{00B7}b\"\n  <li hidden>\n"
    );
}

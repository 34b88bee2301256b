//! Markup serialization of nodes and subtrees.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Attributes are written in sorted order so the output is stable regardless
//! of how the attribute map iterates.

use crate::{DomTree, NodeId, NodeType};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements."
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize `node` together with its subtree.
///
/// The document node has no markup of its own, so its outer HTML is the
/// concatenation of its children.
#[must_use]
pub fn outer_html(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, node, &mut out);
    out
}

/// Serialize the children of `node`, without the node's own tags.
#[must_use]
pub fn inner_html(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(node) {
        write_node(tree, child, &mut out);
    }
    out
}

fn write_node(tree: &DomTree, node: NodeId, out: &mut String) {
    let Some(data) = tree.get(node) else {
        return;
    };
    match &data.node_type {
        NodeType::Document => {
            for &child in &data.children {
                write_node(tree, child, out);
            }
        }
        NodeType::Element(element) => {
            out.push('<');
            out.push_str(&element.tag_name);

            let mut attrs: Vec<_> = element.attrs.iter().collect();
            attrs.sort_unstable_by(|a, b| a.0.cmp(b.0));
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_into(value, true, out);
                out.push('"');
            }
            out.push('>');

            let lowered = element.tag_name.to_ascii_lowercase();
            if VOID_ELEMENTS.contains(&lowered.as_str()) {
                return;
            }
            for &child in &data.children {
                write_node(tree, child, out);
            }
            out.push_str("</");
            out.push_str(&element.tag_name);
            out.push('>');
        }
        NodeType::Text(text) => escape_into(text, false, out),
        NodeType::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
fn escape_into(text: &str, attribute_mode: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '"' if attribute_mode => out.push_str("&quot;"),
            '<' if !attribute_mode => out.push_str("&lt;"),
            '>' if !attribute_mode => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

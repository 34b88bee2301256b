//! JSON tree loading.
//!
//! The accepted shape is the one the node dump tools write:
//!
//! ```json
//! { "type": "element", "tagName": "div", "attributes": { "id": "a" },
//!   "children": [ { "type": "text", "content": "hi" } ] }
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use thicket_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum NodeJson {
    Document {
        #[serde(default)]
        children: Vec<NodeJson>,
    },
    Element {
        #[serde(rename = "tagName")]
        tag_name: String,
        #[serde(default)]
        attributes: AttributesMap,
        #[serde(default)]
        children: Vec<NodeJson>,
    },
    Text {
        content: String,
    },
    Comment {
        content: String,
    },
}

/// Build a tree from its JSON description.
///
/// A top-level element, text or comment is placed under a fresh document.
pub fn parse_tree(json: &str) -> Result<DomTree> {
    let root: NodeJson = serde_json::from_str(json).context("invalid tree JSON")?;
    let mut tree = DomTree::new();
    match root {
        NodeJson::Document { children } => {
            for child in children {
                append(&mut tree, NodeId::ROOT, child)?;
            }
        }
        other => append(&mut tree, NodeId::ROOT, other)?,
    }
    Ok(tree)
}

fn append(tree: &mut DomTree, parent: NodeId, node: NodeJson) -> Result<()> {
    match node {
        NodeJson::Document { .. } => bail!("a document node can only appear at the top level"),
        NodeJson::Element {
            tag_name,
            attributes,
            children,
        } => {
            let id = tree.alloc(NodeType::Element(ElementData {
                tag_name,
                attrs: attributes,
            }));
            tree.append_child(parent, id);
            for child in children {
                append(tree, id, child)?;
            }
        }
        NodeJson::Text { content } => {
            let _ = tree.append_text(parent, &content);
        }
        NodeJson::Comment { content } => {
            let _ = tree.append_comment(parent, &content);
        }
    }
    Ok(())
}

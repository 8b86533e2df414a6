//! Document snapshot
//!
//! A normalized, serde serializable copy of the tree. The JSON and YAML formats render it
//! directly, treeviz walks it, so none of them reimplement traversal of the arena.

use crate::doccy::tree::{Document, NodeId, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// "Element" or "Text"
    pub node_type: String,

    /// Tag name for elements, the payload for text.
    pub label: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeSnapshot>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSnapshot {
    pub name: String,
    pub value: String,
}

/// Snapshot of the whole document, starting at the root element.
pub fn snapshot_from_document(doc: &Document) -> NodeSnapshot {
    snapshot_from_node(doc, doc.root())
}

pub fn snapshot_from_node(doc: &Document, id: NodeId) -> NodeSnapshot {
    match doc.kind(id) {
        NodeKind::Text(text) => NodeSnapshot {
            node_type: "Text".to_string(),
            label: text.clone(),
            attributes: Vec::new(),
            children: Vec::new(),
        },
        NodeKind::Element(element) => NodeSnapshot {
            node_type: "Element".to_string(),
            label: element.name.clone(),
            attributes: element
                .attributes
                .iter()
                .map(|(name, value)| AttributeSnapshot {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            children: doc
                .children(id)
                .iter()
                .map(|child| snapshot_from_node(doc, *child))
                .collect(),
        },
    }
}

//! Node record
//!
//! A node owns its label and its ordered properties. Its parent lives in the
//! store's relation table, not on the node, so enumerating or comparing a
//! node's properties never sees relationship metadata.
//!
//! Nodes have no public mutators: every property write goes through
//! [`GraphStore`](super::GraphStore) so the parent bookkeeping stays current.

use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId};
use serde::{Deserialize, Serialize};

/// A node in the tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Kind of this node
    pub label: Label,

    /// Properties in definition order
    properties: PropertyMap,
}

impl Node {
    pub(crate) fn new(id: NodeId, label: impl Into<Label>) -> Self {
        Node {
            id,
            label: label.into(),
            properties: PropertyMap::new(),
        }
    }

    pub fn has_label(&self, label: &Label) -> bool {
        &self.label == label
    }

    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// All properties in definition order
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Key of the property currently holding `child`, if any
    pub fn key_of(&self, child: NodeId) -> Option<&str> {
        self.properties
            .iter()
            .find(|(_, value)| value.as_node() == Some(child))
            .map(|(key, _)| key.as_str())
    }

    /// Shallow structural equality: same label and equal properties.
    ///
    /// Node-valued properties compare by id.
    pub fn structurally_eq(&self, other: &Node) -> bool {
        self.label == other.label && self.properties == other.properties
    }

    /// Raw write, no bookkeeping. Callers maintain the relation table.
    pub(crate) fn insert_property(&mut self, key: String, value: PropertyValue) -> Option<PropertyValue> {
        self.properties.insert(key, value)
    }

    /// Raw removal preserving the order of the remaining keys.
    pub(crate) fn take_property(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.shift_remove(key)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

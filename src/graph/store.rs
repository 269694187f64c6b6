//! In-memory node arena and the mutation interceptor
//!
//! All nodes of a tree (or forest) live in one `GraphStore`. Property writes go
//! through [`GraphStore::set_property`] and [`GraphStore::remove_property`],
//! which keep the relation table in step with the properties: a node's parent
//! is always the node whose property currently holds it.

use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::relation::RelationStore;
use super::types::{Label, NodeId};
use crate::config::{ReparentPolicy, TreeConfig};
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during tree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Invalid find input: {0}")]
    InvalidFindInput(String),

    /// An assert-mode query found nothing; carries the rendered message
    #[error("{0}")]
    NotFound(String),

    #[error("Node {from} is not an ancestor of node {node}")]
    NotAnAncestor { node: NodeId, from: NodeId },

    #[error("Cannot set parent of property {key} without clearing value's existing parent {parent}")]
    ReparentConflict {
        key: String,
        node: NodeId,
        parent: NodeId,
    },

    #[error("Cannot assign {node} to property {key}: the node would become its own ancestor")]
    CycleDetected { key: String, node: NodeId },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory node storage
///
/// - nodes: arena indexed by `NodeId`
/// - relations: parent back-reference per node
#[derive(Debug, Clone)]
pub struct GraphStore {
    /// Node arena; a node's id is its index
    nodes: Vec<Node>,

    /// Parent of each node
    relations: RelationStore,

    config: TreeConfig,
}

impl GraphStore {
    /// Create a new empty store with the default configuration
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        GraphStore {
            nodes: Vec::with_capacity(config.initial_capacity),
            relations: RelationStore::with_capacity(config.initial_capacity),
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Read-only access to the parent table
    pub fn relations(&self) -> &RelationStore {
        &self.relations
    }

    /// Create an empty root node
    pub fn create_node(&mut self, label: impl Into<Label>) -> NodeId {
        let node_id = self.next_id();
        let node = Node::new(node_id, label);
        debug!("Created node {} ({})", node_id, node.label);
        self.nodes.push(node);
        node_id
    }

    /// Create a node and attach every node-valued property to it, in order.
    ///
    /// Validation happens up front: on error the store is left untouched.
    pub fn create_node_with_properties(
        &mut self,
        label: impl Into<Label>,
        properties: PropertyMap,
    ) -> GraphResult<NodeId> {
        let node_id = self.next_id();
        let strict = self.config.reparent_policy == ReparentPolicy::Strict;
        let mut seen = FxHashSet::default();

        for (key, value) in &properties {
            let Some(child) = value.as_node() else {
                continue;
            };
            if !self.has_node(child) {
                return Err(GraphError::NodeNotFound(child));
            }
            let repeated = !seen.insert(child);
            if strict {
                let existing = if repeated { Some(node_id) } else { self.get_parent(child) };
                if let Some(parent) = existing {
                    warn!("Rejected initial property {} of {}: {} already has parent {}", key, node_id, child, parent);
                    return Err(GraphError::ReparentConflict {
                        key: key.clone(),
                        node: child,
                        parent,
                    });
                }
            }
        }

        let created = self.create_node(label);
        for (key, value) in properties {
            self.set_property(created, key, value)?;
        }
        Ok(created)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()?)
    }

    /// Like [`get_node`](Self::get_node), failing with `NodeNotFound`
    pub fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.get_node(id).ok_or(GraphError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut Node> {
        id.index()
            .and_then(|idx| self.nodes.get_mut(idx))
            .ok_or(GraphError::NodeNotFound(id))
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        id.index().is_some_and(|idx| idx < self.nodes.len())
    }

    pub fn get_property(&self, id: NodeId, key: &str) -> Option<&PropertyValue> {
        self.get_node(id)?.get_property(key)
    }

    /// Parent of a node, `None` for roots and unknown ids
    pub fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.relations.get_parent(id)
    }

    /// Write a property, keeping parent references consistent.
    ///
    /// Returns the previous value of the property.
    pub fn set_property(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<Option<PropertyValue>> {
        let key = key.into();
        let value = value.into();
        let current = self.node(id)?.get_property(&key).and_then(PropertyValue::as_node);
        let incoming = value.as_node();

        if let Some(child) = incoming {
            if !self.has_node(child) {
                return Err(GraphError::NodeNotFound(child));
            }

            // same node, same slot: nothing to re-link
            if current == Some(child) {
                return Ok(self.node_mut(id)?.insert_property(key, value));
            }

            if child == id || self.is_ancestor(child, id) {
                warn!("Rejected property {} of {}: {} is an ancestor", key, id, child);
                return Err(GraphError::CycleDetected { key, node: child });
            }

            if let Some(parent) = self.get_parent(child) {
                match self.config.reparent_policy {
                    ReparentPolicy::Strict => {
                        warn!("Rejected property {} of {}: {} already has parent {}", key, id, child, parent);
                        return Err(GraphError::ReparentConflict {
                            key,
                            node: child,
                            parent,
                        });
                    }
                    ReparentPolicy::Reattach => {
                        self.detach(child)?;
                    }
                }
            }
        }

        if let Some(previous) = current {
            self.relations.set_parent(previous, None);
            debug!("Detached {} from {} (overwritten {})", previous, id, key);
        }

        let old = self.node_mut(id)?.insert_property(key, value);
        if let Some(child) = incoming {
            self.relations.set_parent(child, Some(id));
            debug!("Attached {} to {}", child, id);
        }
        Ok(old)
    }

    /// Remove a property; a removed child becomes a root.
    pub fn remove_property(&mut self, id: NodeId, key: &str) -> GraphResult<Option<PropertyValue>> {
        let removed = self.node_mut(id)?.take_property(key);
        if let Some(child) = removed.as_ref().and_then(PropertyValue::as_node) {
            self.relations.set_parent(child, None);
            debug!("Detached {} from {} (removed {})", child, id, key);
        }
        Ok(removed)
    }

    /// Take a node out of whichever property holds it.
    ///
    /// Returns the former parent and key, or `None` if the node was a root.
    pub fn detach(&mut self, id: NodeId) -> GraphResult<Option<(NodeId, String)>> {
        self.node(id)?;
        let Some(parent) = self.get_parent(id) else {
            return Ok(None);
        };

        match self.node(parent)?.key_of(id).map(str::to_owned) {
            Some(key) => {
                self.remove_property(parent, &key)?;
                Ok(Some((parent, key)))
            }
            None => {
                // back-reference with no holding property
                self.relations.set_parent(id, None);
                Ok(None)
            }
        }
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Ids of every node without a parent, in creation order
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .map(|node| node.id)
            .filter(|&id| self.get_parent(id).is_none())
    }

    fn next_id(&self) -> NodeId {
        NodeId::new(self.nodes.len() as u64)
    }

    /// Raw property write that bypasses the relation table.
    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, id: NodeId, key: &str, value: PropertyValue) {
        if let Ok(node) = self.node_mut(id) {
            node.insert_property(key.to_string(), value);
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

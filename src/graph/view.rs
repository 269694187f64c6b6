//! Borrowed node handle
//!
//! `NodeRef` pairs a node with the store it lives in so relationship
//! accessors read naturally (`you.parent()`, `you.each_sibling()`) without
//! threading the store through every call.

use super::node::Node;
use super::property::PropertyValue;
use super::store::{GraphResult, GraphStore};
use super::types::{Label, NodeId};
use crate::query::{All, Assert, Find, First, Has};
use crate::traversal::NodePath;
use std::fmt;

#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    store: &'a GraphStore,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(store: &'a GraphStore, node: &'a Node) -> Self {
        NodeRef { store, node }
    }

    pub fn id(&self) -> NodeId {
        self.node.id
    }

    pub fn store(&self) -> &'a GraphStore {
        self.store
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn label(&self) -> &'a Label {
        &self.node.label
    }

    pub fn get(&self, key: &str) -> Option<&'a PropertyValue> {
        self.node.get_property(key)
    }

    /// The child held by property `key`
    pub fn child(&self, key: &str) -> Option<NodeRef<'a>> {
        let id = self.get(key)?.as_node()?;
        self.store.node_ref(id)
    }

    /// Key of the property holding this node
    pub fn key(&self) -> Option<&'a str> {
        self.parent()?.node.key_of(self.id())
    }

    /// Holding key, or the label for roots
    pub fn name(&self) -> String {
        match self.key() {
            Some(key) => key.to_string(),
            None => self.node.label.to_string(),
        }
    }

    /// Keys leading from the root down to this node
    pub fn path(&self) -> GraphResult<NodePath> {
        self.store.get_path(self.id(), None)
    }

    pub fn path_from(&self, ancestor: NodeId) -> GraphResult<NodePath> {
        self.store.get_path(self.id(), Some(ancestor))
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.store.node_ref(self.store.get_parent(self.id())?)
    }

    pub fn root(&self) -> NodeRef<'a> {
        self.store
            .node_ref(self.store.get_root(self.id()))
            .unwrap_or(*self)
    }

    pub fn is_root(&self) -> bool {
        self.store.is_root(self.id())
    }

    pub fn children(&self) -> Vec<NodeRef<'a>> {
        self.each_child().collect()
    }

    pub fn each_child(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let store = self.store;
        store.children(self.id()).filter_map(move |id| store.node_ref(id))
    }

    pub fn each_sibling(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let store = self.store;
        store.siblings(self.id()).filter_map(move |id| store.node_ref(id))
    }

    pub fn each_parent(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let store = self.store;
        store.parents(self.id()).filter_map(move |id| store.node_ref(id))
    }

    pub fn each_ancestor(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let store = self.store;
        store.ancestors(self.id()).filter_map(move |id| store.node_ref(id))
    }

    pub fn each_descendant(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let store = self.store;
        store.descendants(self.id()).filter_map(move |id| store.node_ref(id))
    }

    pub fn each_node(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let store = self.store;
        store.nodes(self.id()).filter_map(move |id| store.node_ref(id))
    }

    /// First-match query rooted here
    pub fn find(&self) -> Find<'a, First> {
        Find::new(self.store, self.id())
    }

    pub fn find_all(&self) -> Find<'a, All> {
        self.find().all()
    }

    pub fn has(&self) -> Find<'a, Has> {
        Find::has(self.store, self.id())
    }

    pub fn assert(&self) -> Find<'a, Assert> {
        Find::assert(self.store, self.id(), None)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.store, other.store) && self.id() == other.id()
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.node.id)
            .field("label", &self.node.label)
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.node.label, self.node.id.as_u64())
    }
}

impl GraphStore {
    /// Borrowed handle to a node, `None` if the id is unknown
    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.get_node(id).map(|node| NodeRef::new(self, node))
    }
}

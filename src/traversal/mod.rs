//! Relationship traversal
//!
//! Every relationship is derived from two sources only: a node's node-valued
//! properties (its children) and the relation table (its parent). The
//! iterators here are lazy and borrow the store; calling the method again
//! starts a fresh walk. None of them re-sort: order is property definition
//! order throughout.

pub mod path;

pub use path::NodePath;

use crate::graph::{GraphStore, NodeId, PropertyValue};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Node-valued properties of a node with their keys
#[derive(Debug, Clone)]
pub struct ChildEntries<'a> {
    inner: Option<indexmap::map::Iter<'a, String, PropertyValue>>,
}

impl<'a> Iterator for ChildEntries<'a> {
    type Item = (&'a str, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .as_mut()?
            .find_map(|(key, value)| value.as_node().map(|id| (key.as_str(), id)))
    }
}

/// Children of a node
#[derive(Debug, Clone)]
pub struct Children<'a> {
    entries: ChildEntries<'a>,
}

impl Children<'_> {
    fn empty() -> Self {
        Children {
            entries: ChildEntries { inner: None },
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.entries.next().map(|(_, id)| id)
    }
}

/// Parent chain: immediate parent up to the root
#[derive(Debug, Clone)]
pub struct Parents<'a> {
    store: &'a GraphStore,
    next: Option<NodeId>,
}

impl Iterator for Parents<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.store.get_parent(current);
        Some(current)
    }
}

/// Children of the parent, minus the node itself
#[derive(Debug, Clone)]
pub struct Siblings<'a> {
    node: NodeId,
    children: Children<'a>,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.node;
        self.children.find(|&child| child != node)
    }
}

/// Each parent on the chain followed by that parent's siblings
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    store: &'a GraphStore,
    parents: Parents<'a>,
    siblings: Option<Siblings<'a>>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if let Some(sibling) = self.siblings.as_mut().and_then(Iterator::next) {
            return Some(sibling);
        }
        let parent = self.parents.next()?;
        self.siblings = Some(self.store.siblings(parent));
        Some(parent)
    }
}

/// Breadth-first walk below a node
///
/// A node is yielded and expanded at most once, so the walk terminates even
/// if the properties contain a cycle. The start node is never yielded.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    store: &'a GraphStore,
    visited: FxHashSet<NodeId>,
    queue: VecDeque<NodeId>,
    current: Option<Children<'a>>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            if let Some(children) = self.current.as_mut() {
                for child in children.by_ref() {
                    if self.visited.insert(child) {
                        self.queue.push_back(child);
                        return Some(child);
                    }
                }
            }
            let expand = self.queue.pop_front()?;
            self.current = Some(self.store.children(expand));
        }
    }
}

/// The root of a node's tree followed by every node below it
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    root: Option<NodeId>,
    descendants: Descendants<'a>,
}

impl Iterator for Nodes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        match self.root.take() {
            Some(root) => Some(root),
            None => self.descendants.next(),
        }
    }
}

impl GraphStore {
    /// Children of a node, in property definition order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            entries: self.child_entries(id),
        }
    }

    /// Children of a node paired with the key holding each
    pub fn child_entries(&self, id: NodeId) -> ChildEntries<'_> {
        ChildEntries {
            inner: self.get_node(id).map(|node| node.properties().iter()),
        }
    }

    /// Owned snapshot of a node's children keyed by property
    pub fn get_children(&self, id: NodeId) -> Vec<(String, NodeId)> {
        self.child_entries(id)
            .map(|(key, child)| (key.to_string(), child))
            .collect()
    }

    pub fn siblings(&self, id: NodeId) -> Siblings<'_> {
        let children = match self.get_parent(id) {
            Some(parent) => self.children(parent),
            None => Children::empty(),
        };
        Siblings { node: id, children }
    }

    pub fn parents(&self, id: NodeId) -> Parents<'_> {
        Parents {
            store: self,
            next: self.get_parent(id),
        }
    }

    /// Parents interleaved with their siblings: for `you` below `mom` below
    /// `grand_pa` (with `mom`'s sibling `uncle`) this yields mom, uncle, grand_pa.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            store: self,
            parents: self.parents(id),
            siblings: None,
        }
    }

    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut visited = FxHashSet::default();
        visited.insert(id);
        Descendants {
            store: self,
            visited,
            queue: VecDeque::new(),
            current: Some(self.children(id)),
        }
    }

    /// Every node of the tree containing `id`, root first
    pub fn nodes(&self, id: NodeId) -> Nodes<'_> {
        let root = self.get_root(id);
        Nodes {
            root: Some(root),
            descendants: self.descendants(root),
        }
    }

    pub fn get_root(&self, id: NodeId) -> NodeId {
        self.parents(id).last().unwrap_or(id)
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.get_parent(id).is_none()
    }

    /// True if `ancestor` is on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.parents(id).any(|parent| parent == ancestor)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct Family {
        pub store: GraphStore,
        pub grand_pa: NodeId,
        pub mom: NodeId,
        pub uncle: NodeId,
        pub you: NodeId,
        pub sister: NodeId,
        pub son: NodeId,
        pub grand_daughter: NodeId,
        pub great_grand_son: NodeId,
        pub cousin: NodeId,
        pub niece: NodeId,
    }

    /// grandPa { mom { you { son { grandDaughter { greatGrandSon } } },
    ///                 sister { cousin { niece } } },
    ///           uncle }
    pub(crate) fn family() -> Family {
        let mut store = GraphStore::new();
        let grand_pa = store.create_node("GrandPa");
        let mom = store.create_node("Mom");
        let uncle = store.create_node("Uncle");
        let you = store.create_node("You");
        let sister = store.create_node("Sister");
        let son = store.create_node("Son");
        let grand_daughter = store.create_node("GrandDaughter");
        let great_grand_son = store.create_node("GreatGrandSon");
        let cousin = store.create_node("Cousin");
        let niece = store.create_node("Niece");

        store.set_property(grand_pa, "mom", mom).unwrap();
        store.set_property(grand_pa, "uncle", uncle).unwrap();
        store.set_property(mom, "you", you).unwrap();
        store.set_property(mom, "sister", sister).unwrap();
        store.set_property(you, "son", son).unwrap();
        store.set_property(son, "grandDaughter", grand_daughter).unwrap();
        store.set_property(grand_daughter, "greatGrandSon", great_grand_son).unwrap();
        store.set_property(sister, "cousin", cousin).unwrap();
        store.set_property(cousin, "niece", niece).unwrap();

        Family {
            store,
            grand_pa,
            mom,
            uncle,
            you,
            sister,
            son,
            grand_daughter,
            great_grand_son,
            cousin,
            niece,
        }
    }

    #[test]
    fn test_children_in_definition_order() {
        let f = family();
        assert_eq!(f.store.children(f.grand_pa).collect::<Vec<_>>(), vec![f.mom, f.uncle]);
        assert_eq!(f.store.children(f.mom).collect::<Vec<_>>(), vec![f.you, f.sister]);
        assert_eq!(f.store.children(f.niece).count(), 0);
    }

    #[test]
    fn test_child_entries_and_get_children() {
        let f = family();
        let entries: Vec<_> = f.store.child_entries(f.mom).collect();
        assert_eq!(entries, vec![("you", f.you), ("sister", f.sister)]);
        assert_eq!(
            f.store.get_children(f.grand_pa),
            vec![("mom".to_string(), f.mom), ("uncle".to_string(), f.uncle)]
        );
    }

    #[test]
    fn test_children_of_unknown_node_is_empty() {
        let f = family();
        assert_eq!(f.store.children(NodeId::new(1_000)).count(), 0);
    }

    #[test]
    fn test_parents() {
        let f = family();
        assert_eq!(
            f.store.parents(f.grand_daughter).collect::<Vec<_>>(),
            vec![f.son, f.you, f.mom, f.grand_pa]
        );
        assert_eq!(f.store.parents(f.grand_pa).next(), None);
    }

    #[test]
    fn test_siblings() {
        let f = family();
        assert_eq!(f.store.siblings(f.you).collect::<Vec<_>>(), vec![f.sister]);
        assert_eq!(f.store.siblings(f.mom).collect::<Vec<_>>(), vec![f.uncle]);
        assert_eq!(f.store.siblings(f.grand_pa).count(), 0);
    }

    #[test]
    fn test_ancestors_include_parent_siblings() {
        let f = family();
        assert_eq!(f.store.ancestors(f.grand_pa).count(), 0);
        assert_eq!(f.store.ancestors(f.mom).collect::<Vec<_>>(), vec![f.grand_pa]);
        assert_eq!(
            f.store.ancestors(f.you).collect::<Vec<_>>(),
            vec![f.mom, f.uncle, f.grand_pa]
        );
        assert_eq!(
            f.store.ancestors(f.son).collect::<Vec<_>>(),
            vec![f.you, f.sister, f.mom, f.uncle, f.grand_pa]
        );
        assert_eq!(
            f.store.ancestors(f.niece).collect::<Vec<_>>(),
            vec![f.cousin, f.sister, f.you, f.mom, f.uncle, f.grand_pa]
        );
    }

    #[test]
    fn test_descendants_breadth_first() {
        let f = family();
        assert_eq!(
            f.store.descendants(f.mom).collect::<Vec<_>>(),
            vec![f.you, f.sister, f.son, f.cousin, f.grand_daughter, f.niece, f.great_grand_son]
        );
    }

    #[test]
    fn test_descendants_survive_property_cycle() {
        let mut store = GraphStore::new();
        let a = store.create_node("A");
        let b = store.create_node("B");
        let c = store.create_node("C");
        store.set_property(a, "b", b).unwrap();
        store.set_property(b, "c", c).unwrap();
        // c.back = a, bypassing the interceptor's cycle check
        store.insert_unchecked(c, "back", PropertyValue::Node(a));
        store.insert_unchecked(c, "again", PropertyValue::Node(b));

        assert_eq!(store.descendants(a).collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(store.descendants(b).collect::<Vec<_>>(), vec![c, a]);
    }

    #[test]
    fn test_nodes_from_anywhere() {
        let f = family();
        let from_leaf: Vec<_> = f.store.nodes(f.niece).collect();
        let from_root: Vec<_> = f.store.nodes(f.grand_pa).collect();

        assert_eq!(from_leaf, from_root);
        assert_eq!(from_root.len(), 10);
        assert_eq!(from_root[0], f.grand_pa);
    }

    #[test]
    fn test_root() {
        let f = family();
        assert_eq!(f.store.get_root(f.you), f.grand_pa);
        assert_eq!(f.store.get_root(f.great_grand_son), f.grand_pa);
        assert_eq!(f.store.get_root(f.grand_pa), f.grand_pa);
        assert!(f.store.is_root(f.grand_pa));
        assert!(f.store.is_ancestor(f.mom, f.son));
        assert!(!f.store.is_ancestor(f.uncle, f.son));
    }

    #[test]
    fn test_iterators_are_restartable() {
        let f = family();
        let first: Vec<_> = f.store.descendants(f.you).collect();
        let second: Vec<_> = f.store.descendants(f.you).collect();
        assert_eq!(first, second);
    }
}

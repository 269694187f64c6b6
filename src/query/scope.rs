//! Candidate scopes of a query
//!
//! A scope is a list of traversal segments rooted at the query source. It is
//! stored as plain data and only turned into iterators when the query runs,
//! so a builder can be cloned and re-run freely.

use crate::graph::{GraphStore, NodeId};
use crate::traversal::{Ancestors, Children, Descendants, Nodes, Parents, Siblings};
use std::fmt;

/// One traversal primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Children,
    Siblings,
    Descendants,
    Parents,
    Ancestors,
    Nodes,
}

impl ScopeKind {
    /// Start this traversal at `source`
    pub fn iter<'a>(self, store: &'a GraphStore, source: NodeId) -> ScopeIter<'a> {
        match self {
            ScopeKind::Children => ScopeIter::Children(store.children(source)),
            ScopeKind::Siblings => ScopeIter::Siblings(store.siblings(source)),
            ScopeKind::Descendants => ScopeIter::Descendants(store.descendants(source)),
            ScopeKind::Parents => ScopeIter::Parents(store.parents(source)),
            ScopeKind::Ancestors => ScopeIter::Ancestors(store.ancestors(source)),
            ScopeKind::Nodes => ScopeIter::Nodes(store.nodes(source)),
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScopeKind::Children => "children",
            ScopeKind::Siblings => "siblings",
            ScopeKind::Descendants => "descendants",
            ScopeKind::Parents => "parents",
            ScopeKind::Ancestors => "ancestors",
            ScopeKind::Nodes => "nodes",
        };
        write!(f, "{}", name)
    }
}

/// A running traversal of any [`ScopeKind`]
#[derive(Debug, Clone)]
pub enum ScopeIter<'a> {
    Children(Children<'a>),
    Siblings(Siblings<'a>),
    Descendants(Descendants<'a>),
    Parents(Parents<'a>),
    Ancestors(Ancestors<'a>),
    Nodes(Nodes<'a>),
}

impl Iterator for ScopeIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        match self {
            ScopeIter::Children(iter) => iter.next(),
            ScopeIter::Siblings(iter) => iter.next(),
            ScopeIter::Descendants(iter) => iter.next(),
            ScopeIter::Parents(iter) => iter.next(),
            ScopeIter::Ancestors(iter) => iter.next(),
            ScopeIter::Nodes(iter) => iter.next(),
        }
    }
}

/// Ordered, concatenated traversal segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    segments: Vec<ScopeKind>,
}

impl Scope {
    pub fn new(kind: ScopeKind) -> Self {
        Scope { segments: vec![kind] }
    }

    pub fn segments(&self) -> &[ScopeKind] {
        &self.segments
    }

    pub(crate) fn push(&mut self, kind: ScopeKind) {
        self.segments.push(kind);
    }

    /// Every candidate of every segment, in order. Duplicates across
    /// segments are not removed here.
    pub fn candidates<'a>(
        &'a self,
        store: &'a GraphStore,
        source: NodeId,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.segments
            .iter()
            .flat_map(move |kind| kind.iter(store, source))
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::new(ScopeKind::Children)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{}", kind)?;
        }
        Ok(())
    }
}

//! Parent back-references
//!
//! One slot per arena node holding the id of its current parent. Reads and
//! writes are O(1) and total: a node the table has never seen has no parent.
//! The table does not check the single-parent invariant; the store does.

use super::types::NodeId;

#[derive(Debug, Default, Clone)]
pub struct RelationStore {
    parents: Vec<Option<NodeId>>,
}

impl RelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        RelationStore {
            parents: Vec::with_capacity(capacity),
        }
    }

    /// Record `parent` as the parent of `child` (`None` detaches it).
    ///
    /// Only the store writes here, and only for ids it has issued, so the
    /// table never grows past the arena.
    pub(crate) fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) {
        let Some(idx) = child.index() else {
            return;
        };
        if idx >= self.parents.len() {
            if parent.is_none() {
                return;
            }
            let Some(len) = idx.checked_add(1) else {
                return;
            };
            self.parents.resize(len, None);
        }
        self.parents[idx] = parent;
    }

    pub fn get_parent(&self, child: NodeId) -> Option<NodeId> {
        self.parents.get(child.index()?).copied().flatten()
    }

    /// Number of slots tracked
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

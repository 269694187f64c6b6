//! Property-key paths between related nodes

use crate::graph::{GraphError, GraphResult, GraphStore, NodeId};

/// Property keys leading from an ancestor down to a node, outermost first
pub type NodePath = Vec<String>;

impl GraphStore {
    /// Keys leading from `from` (or the root, when `None`) down to `id`.
    ///
    /// A root's path is empty. `from` must be a strict ancestor of `id`;
    /// a node is not its own ancestor.
    pub fn get_path(&self, id: NodeId, from: Option<NodeId>) -> GraphResult<NodePath> {
        self.node(id)?;

        let mut path = NodePath::new();
        let mut current = id;
        let mut reached = false;

        for parent in self.parents(id) {
            if let Some(key) = self.node(parent)?.key_of(current) {
                path.push(key.to_string());
            }
            current = parent;

            if from == Some(parent) {
                reached = true;
                break;
            }
        }

        match from {
            Some(from) if !reached => Err(GraphError::NotAnAncestor { node: id, from }),
            _ => {
                path.reverse();
                Ok(path)
            }
        }
    }

    /// [`get_path`](Self::get_path) from the root, joined with `/`
    pub fn path_string(&self, id: NodeId) -> GraphResult<String> {
        Ok(self.get_path(id, None)?.join("/"))
    }
}

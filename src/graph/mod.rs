//! Core tree implementation
//!
//! This module implements the node data model with:
//! - Nodes with a label and ordered properties
//! - Parent back-references kept in a separate relation table
//! - A store that owns every node and keeps both in step on each write

pub mod node;
pub mod property;
pub mod relation;
pub mod store;
pub mod types;
pub mod view;

// Re-export main types
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use relation::RelationStore;
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{Label, NodeId};
pub use view::NodeRef;

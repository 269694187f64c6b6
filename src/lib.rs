//! Kinship
//!
//! A self-bookkeeping node tree. Nodes hold other nodes as named properties,
//! and the store tracks which node is whose parent as properties are added,
//! overwritten, and removed. On top of the maintained back-references sit
//! traversal primitives, path resolution, and a fluent query builder.
//!
//! # Architecture
//!
//! - [`graph`]: node arena, ordered properties, relation table and the write
//!   path that keeps them consistent
//! - [`traversal`]: children, parents, siblings, ancestors, descendants, paths
//! - [`query`]: the `Find` builder with first / has / all / assert results
//! - [`config`]: reparenting policy
//!
//! ## Example Usage
//!
//! ```rust
//! use kinship::{GraphStore, Label};
//!
//! let mut store = GraphStore::new();
//!
//! let grand_pa = store.create_node("GrandPa");
//! let mom = store.create_node("Mom");
//! let uncle = store.create_node("Uncle");
//! let you = store.create_node("You");
//!
//! store.set_property(grand_pa, "mom", mom).unwrap();
//! store.set_property(grand_pa, "uncle", uncle).unwrap();
//! store.set_property(mom, "you", you).unwrap();
//!
//! assert_eq!(store.get_parent(you), Some(mom));
//! assert_eq!(store.ancestors(you).collect::<Vec<_>>(), vec![mom, uncle, grand_pa]);
//! assert_eq!(store.get_path(you, None).unwrap(), vec!["mom", "you"]);
//!
//! let found = store.find(grand_pa).in_descendants().find(Label::new("You")).unwrap();
//! assert_eq!(found, Some(you));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod query;
pub mod traversal;

// Re-export main types for convenience
pub use config::{ReparentPolicy, TreeConfig};

pub use graph::{
    GraphError, GraphResult, GraphStore, Label, Node, NodeId, NodeRef, PropertyMap,
    PropertyValue,
};

pub use query::{All, Assert, Find, FindFlag, FindInput, First, Has, Match, NodeGuard};

pub use traversal::NodePath;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

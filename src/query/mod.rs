//! Query processing module
//!
//! Composes traversal scopes with a node test and a result cardinality:
//! - [`Scope`]: which traversals supply candidates, concatenated with `or`
//! - [`FindInput`]: what a candidate must be or satisfy
//! - [`Cardinality`]: first match, existence, all matches, or assert

mod cardinality;
mod find;
mod predicate;
mod scope;

pub use cardinality::{All, Assert, Cardinality, FindFlag, First, Has};
pub use find::Find;
pub use predicate::{FindInput, Match, NodeGuard};
pub use scope::{Scope, ScopeIter, ScopeKind};

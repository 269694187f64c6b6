//! Result shapes of a query
//!
//! The cardinality is a type parameter of [`Find`](super::Find), so the
//! return type of `find` follows from how the builder was constructed:
//!
//! | Marker | Output |
//! |---|---|
//! | [`First`] | `Option<NodeId>` |
//! | [`Has`] | `bool` |
//! | [`All`] | `Vec<NodeId>` |
//! | [`Assert`] | `NodeId`, or a `NotFound` error |

use crate::graph::{GraphError, GraphResult, NodeId};
use std::fmt;

/// Runtime view of a cardinality marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindFlag {
    First,
    Has,
    All,
    Assert,
}

impl FindFlag {
    /// Whether a query with this flag stops at its first match
    pub fn stops_at_first(self) -> bool {
        self != FindFlag::All
    }
}

impl fmt::Display for FindFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FindFlag::First => "first",
            FindFlag::Has => "has",
            FindFlag::All => "all",
            FindFlag::Assert => "assert",
        };
        write!(f, "{}", name)
    }
}

pub trait Cardinality {
    const FLAG: FindFlag;

    type Output;

    /// Shape the matches, in scope order, into the query result.
    ///
    /// `on_missing` is only called when an empty result is an error.
    fn resolve<F>(found: Vec<NodeId>, on_missing: F) -> GraphResult<Self::Output>
    where
        F: FnOnce() -> GraphError;
}

/// First match, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct First;

/// Whether anything matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Has;

/// Every match in scope order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct All;

/// First match, failing when there is none
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Assert;

impl Cardinality for First {
    const FLAG: FindFlag = FindFlag::First;
    type Output = Option<NodeId>;

    fn resolve<F>(found: Vec<NodeId>, _on_missing: F) -> GraphResult<Self::Output>
    where
        F: FnOnce() -> GraphError,
    {
        Ok(found.into_iter().next())
    }
}

impl Cardinality for Has {
    const FLAG: FindFlag = FindFlag::Has;
    type Output = bool;

    fn resolve<F>(found: Vec<NodeId>, _on_missing: F) -> GraphResult<Self::Output>
    where
        F: FnOnce() -> GraphError,
    {
        Ok(!found.is_empty())
    }
}

impl Cardinality for All {
    const FLAG: FindFlag = FindFlag::All;
    type Output = Vec<NodeId>;

    fn resolve<F>(found: Vec<NodeId>, _on_missing: F) -> GraphResult<Self::Output>
    where
        F: FnOnce() -> GraphError,
    {
        Ok(found)
    }
}

impl Cardinality for Assert {
    const FLAG: FindFlag = FindFlag::Assert;
    type Output = NodeId;

    fn resolve<F>(found: Vec<NodeId>, on_missing: F) -> GraphResult<Self::Output>
    where
        F: FnOnce() -> GraphError,
    {
        found.into_iter().next().ok_or_else(on_missing)
    }
}

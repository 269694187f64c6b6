//! Store configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happens when a node that already has a parent is assigned to a new
/// property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReparentPolicy {
    /// Remove the node from its current holder, then attach it to the new one
    #[default]
    Reattach,
    /// Refuse the write; the caller must detach the node first
    Strict,
}

impl fmt::Display for ReparentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReparentPolicy::Reattach => write!(f, "reattach"),
            ReparentPolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Configuration for a [`GraphStore`](crate::GraphStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Reparenting behaviour of property writes
    pub reparent_policy: ReparentPolicy,
    /// Initial arena capacity
    pub initial_capacity: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            reparent_policy: ReparentPolicy::default(),
            initial_capacity: 64,
        }
    }
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reparent_policy(mut self, policy: ReparentPolicy) -> Self {
        self.reparent_policy = policy;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Shorthand for a strict-policy configuration
    pub fn strict() -> Self {
        Self::default().with_reparent_policy(ReparentPolicy::Strict)
    }
}

//! Fluent query builder
//!
//! A `Find` is bound to a store and a source node. Scope selectors and `or`
//! consume the builder and return an updated one; `find` consumes it and runs
//! the query:
//!
//! ```
//! use kinship::GraphStore;
//!
//! let mut store = GraphStore::new();
//! let mom = store.create_node("Mom");
//! let you = store.create_node("You");
//! let sister = store.create_node("Sister");
//! store.set_property(mom, "you", you).unwrap();
//! store.set_property(mom, "sister", sister).unwrap();
//!
//! let found = store.find(you).in_children().or().in_siblings().find(sister).unwrap();
//! assert_eq!(found, Some(sister));
//! assert!(store.has(mom).find(you).unwrap());
//! ```

use super::cardinality::{All, Assert, Cardinality, FindFlag, First, Has};
use super::predicate::{FindInput, Match, NodeGuard};
use super::scope::{Scope, ScopeKind};
use crate::graph::{GraphError, GraphResult, GraphStore, NodeId, NodeRef};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use std::marker::PhantomData;
use tracing::trace;

/// Query builder rooted at `source`
#[derive(Debug, Clone)]
pub struct Find<'a, C: Cardinality = First> {
    store: &'a GraphStore,
    source: NodeId,
    scope: Scope,
    /// Set by `or`, consumed by the next selector
    merge: bool,
    error: Option<String>,
    cardinality: PhantomData<C>,
}

impl<'a> Find<'a, First> {
    pub fn new(store: &'a GraphStore, source: NodeId) -> Self {
        Find::with_error(store, source, None)
    }
}

impl<'a> Find<'a, Has> {
    pub fn has(store: &'a GraphStore, source: NodeId) -> Self {
        Find::with_error(store, source, None)
    }
}

impl<'a> Find<'a, Assert> {
    /// `error` replaces the generated not-found message
    pub fn assert(store: &'a GraphStore, source: NodeId, error: Option<String>) -> Self {
        Find::with_error(store, source, error)
    }
}

impl<'a, C: Cardinality> Find<'a, C> {
    fn with_error(store: &'a GraphStore, source: NodeId, error: Option<String>) -> Self {
        Find {
            store,
            source,
            scope: Scope::default(),
            merge: false,
            error,
            cardinality: PhantomData,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn flag(&self) -> FindFlag {
        C::FLAG
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn in_children(self) -> Self {
        self.select(ScopeKind::Children)
    }

    pub fn in_siblings(self) -> Self {
        self.select(ScopeKind::Siblings)
    }

    pub fn in_descendants(self) -> Self {
        self.select(ScopeKind::Descendants)
    }

    pub fn in_parents(self) -> Self {
        self.select(ScopeKind::Parents)
    }

    pub fn in_ancestors(self) -> Self {
        self.select(ScopeKind::Ancestors)
    }

    pub fn in_nodes(self) -> Self {
        self.select(ScopeKind::Nodes)
    }

    /// Make the next selector extend the scope instead of replacing it
    pub fn or(mut self) -> Self {
        self.merge = true;
        self
    }

    /// Collect every match instead of the first
    pub fn all(self) -> Find<'a, All> {
        Find {
            store: self.store,
            source: self.source,
            scope: self.scope,
            merge: self.merge,
            error: self.error,
            cardinality: PhantomData,
        }
    }

    fn select(mut self, kind: ScopeKind) -> Self {
        if self.merge {
            self.scope.push(kind);
        } else {
            self.scope = Scope::new(kind);
        }
        self.merge = false;
        self
    }

    pub fn find<'i>(self, input: impl Into<FindInput<'i>>) -> GraphResult<C::Output> {
        self.run(input.into(), None)
    }

    /// [`find`](Self::find) with a custom not-found message
    pub fn find_with_error<'i>(
        self,
        input: impl Into<FindInput<'i>>,
        error: impl Into<String>,
    ) -> GraphResult<C::Output> {
        self.run(input.into(), Some(error.into()))
    }

    /// Match any node in scope
    pub fn any(self) -> GraphResult<C::Output> {
        self.run(FindInput::Any, None)
    }

    pub fn matching<'i, F, M>(self, test: F) -> GraphResult<C::Output>
    where
        F: Fn(NodeRef<'_>) -> M + 'i,
        M: Into<Match>,
    {
        self.run(FindInput::predicate(test), None)
    }

    pub fn guarded<'i>(self, guard: impl NodeGuard + 'i) -> GraphResult<C::Output> {
        self.run(FindInput::guard(guard), None)
    }

    fn run(self, input: FindInput<'_>, error: Option<String>) -> GraphResult<C::Output> {
        let store = self.store;
        let source = self.source;
        store.node(source)?;
        input.validate(store)?;

        let mut visited = FxHashSet::default();
        let mut found = IndexSet::new();

        for candidate in self.scope.candidates(store, source) {
            if !visited.insert(candidate) {
                continue;
            }
            let Some(node) = store.node_ref(candidate) else {
                continue;
            };
            let hit = match input.test(node) {
                Match::No => continue,
                Match::Yes => candidate,
                Match::Node(projection) if store.has_node(projection) => projection,
                Match::Node(projection) => {
                    return Err(GraphError::InvalidFindInput(format!(
                        "predicate projected {} which is not a node of this store",
                        projection
                    )));
                }
            };
            found.insert(hit);
            if C::FLAG.stops_at_first() {
                break;
            }
        }

        trace!(
            "Find {} in {} from {}: {} match(es)",
            C::FLAG,
            self.scope,
            source,
            found.len()
        );

        let fallback = self.error;
        C::resolve(found.into_iter().collect(), || {
            let message = error
                .or(fallback)
                .unwrap_or_else(|| not_found_message(store, source, &input));
            GraphError::NotFound(message)
        })
    }
}

fn not_found_message(store: &GraphStore, source: NodeId, input: &FindInput<'_>) -> String {
    let path = store
        .get_path(source, None)
        .map(|path| path.join("/"))
        .unwrap_or_default();
    format!("Node {} could not find node {}", path, input.display_name(store))
}

impl GraphStore {
    /// First-match query rooted at `source`
    pub fn find(&self, source: NodeId) -> Find<'_, First> {
        Find::new(self, source)
    }

    /// Existence query rooted at `source`
    pub fn has(&self, source: NodeId) -> Find<'_, Has> {
        Find::has(self, source)
    }

    /// Query rooted at `source` that fails with `NotFound` when nothing matches
    pub fn assert(&self, source: NodeId) -> Find<'_, Assert> {
        Find::assert(self, source, None)
    }

    pub fn assert_with_error(&self, source: NodeId, error: impl Into<String>) -> Find<'_, Assert> {
        Find::assert(self, source, Some(error.into()))
    }
}

//! What a query looks for
//!
//! Every input form is resolved to one [`FindInput`] variant when the query
//! is built, and the variant decides how candidates are tested.

use crate::graph::{GraphError, GraphResult, GraphStore, Label, NodeId, NodeRef};
use std::fmt;

/// Outcome of testing one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    No,
    /// The candidate itself matched
    Yes,
    /// Matched, but the result is this node rather than the candidate
    Node(NodeId),
}

impl Match {
    pub fn is_match(&self) -> bool {
        !matches!(self, Match::No)
    }
}

impl From<bool> for Match {
    fn from(matched: bool) -> Self {
        if matched {
            Match::Yes
        } else {
            Match::No
        }
    }
}

impl From<Option<NodeId>> for Match {
    fn from(projection: Option<NodeId>) -> Self {
        projection.map_or(Match::No, Match::Node)
    }
}

impl From<NodeId> for Match {
    fn from(projection: NodeId) -> Self {
        Match::Node(projection)
    }
}

/// A reusable node test with a name, such as a kind check
pub trait NodeGuard {
    fn is(&self, node: NodeRef<'_>) -> bool;

    /// Name used in not-found messages. A leading `is` is dropped.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// A label matches every node of that label
impl NodeGuard for Label {
    fn is(&self, node: NodeRef<'_>) -> bool {
        node.label() == self
    }

    fn name(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

type TestFn<'i> = Box<dyn Fn(NodeRef<'_>) -> Match + 'i>;

/// Input of [`Find::find`](super::Find::find)
pub enum FindInput<'i> {
    /// Matches any candidate
    Any,
    /// Matches this exact node
    Node(NodeId),
    /// Matches this node or any node structurally equal to it
    Equal(NodeId),
    Guard(Box<dyn NodeGuard + 'i>),
    Predicate { name: Option<String>, test: TestFn<'i> },
}

impl<'i> FindInput<'i> {
    /// Wrap a closure returning `bool`, `Option<NodeId>` or [`Match`]
    pub fn predicate<F, M>(test: F) -> Self
    where
        F: Fn(NodeRef<'_>) -> M + 'i,
        M: Into<Match>,
    {
        FindInput::Predicate {
            name: None,
            test: Box::new(move |node: NodeRef<'_>| -> Match { test(node).into() }),
        }
    }

    /// Like [`predicate`](Self::predicate), with a name for error messages
    pub fn named<F, M>(name: impl Into<String>, test: F) -> Self
    where
        F: Fn(NodeRef<'_>) -> M + 'i,
        M: Into<Match>,
    {
        match Self::predicate(test) {
            FindInput::Predicate { test, .. } => FindInput::Predicate {
                name: Some(name.into()),
                test,
            },
            other => other,
        }
    }

    pub fn guard(guard: impl NodeGuard + 'i) -> Self {
        FindInput::Guard(Box::new(guard))
    }

    /// Reject inputs that reference nodes outside `store`
    pub(crate) fn validate(&self, store: &GraphStore) -> GraphResult<()> {
        match self {
            FindInput::Node(id) | FindInput::Equal(id) if !store.has_node(*id) => Err(
                GraphError::InvalidFindInput(format!("{} is not a node of this store", id)),
            ),
            _ => Ok(()),
        }
    }

    pub(crate) fn test(&self, candidate: NodeRef<'_>) -> Match {
        match self {
            FindInput::Any => Match::Yes,
            FindInput::Node(id) => (candidate.id() == *id).into(),
            FindInput::Equal(id) => {
                let equal = candidate.id() == *id
                    || candidate
                        .store()
                        .get_node(*id)
                        .is_some_and(|target| target.structurally_eq(candidate.node()));
                equal.into()
            }
            FindInput::Guard(guard) => guard.is(candidate).into(),
            FindInput::Predicate { test, .. } => test(candidate),
        }
    }

    /// Human-readable name of what is being looked for
    pub fn display_name(&self, store: &GraphStore) -> String {
        let raw = match self {
            FindInput::Any => None,
            FindInput::Node(id) | FindInput::Equal(id) => store.node_ref(*id).map(|node| node.name()),
            FindInput::Guard(guard) => guard.name().map(str::to_owned),
            FindInput::Predicate { name, .. } => name.clone(),
        };
        strip_guard_prefix(raw.as_deref().unwrap_or_default())
    }
}

/// `isSon` and `is_son` name the thing they test for: `Son`, `son`
fn strip_guard_prefix(name: &str) -> String {
    let stripped = name
        .strip_prefix("is_")
        .or_else(|| {
            name.strip_prefix("is")
                .filter(|rest| rest.starts_with(|c: char| c.is_uppercase()))
        })
        .unwrap_or(name);

    if stripped.is_empty() {
        "Node".to_string()
    } else {
        stripped.to_string()
    }
}

impl From<NodeId> for FindInput<'_> {
    fn from(id: NodeId) -> Self {
        FindInput::Node(id)
    }
}

impl From<Label> for FindInput<'_> {
    fn from(label: Label) -> Self {
        FindInput::Guard(Box::new(label))
    }
}

impl From<Option<NodeId>> for FindInput<'_> {
    fn from(id: Option<NodeId>) -> Self {
        id.map_or(FindInput::Any, FindInput::Node)
    }
}

impl fmt::Debug for FindInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindInput::Any => write!(f, "Any"),
            FindInput::Node(id) => f.debug_tuple("Node").field(id).finish(),
            FindInput::Equal(id) => f.debug_tuple("Equal").field(id).finish(),
            FindInput::Guard(guard) => f.debug_tuple("Guard").field(&guard.name()).finish(),
            FindInput::Predicate { name, .. } => {
                f.debug_struct("Predicate").field("name", name).finish_non_exhaustive()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::tests::family;

    struct IsSon;

    impl NodeGuard for IsSon {
        fn is(&self, node: NodeRef<'_>) -> bool {
            node.label() == "Son"
        }

        fn name(&self) -> Option<&str> {
            Some("isSon")
        }
    }

    #[test]
    fn test_strip_guard_prefix() {
        assert_eq!(strip_guard_prefix("isSon"), "Son");
        assert_eq!(strip_guard_prefix("is_son"), "son");
        assert_eq!(strip_guard_prefix("island"), "island");
        assert_eq!(strip_guard_prefix("Son"), "Son");
        assert_eq!(strip_guard_prefix(""), "Node");
        assert_eq!(strip_guard_prefix("is_"), "Node");
    }

    #[test]
    fn test_match_conversions() {
        assert_eq!(Match::from(true), Match::Yes);
        assert_eq!(Match::from(false), Match::No);
        assert_eq!(Match::from(None), Match::No);
        assert_eq!(Match::from(Some(NodeId::new(2))), Match::Node(NodeId::new(2)));
        assert!(!Match::No.is_match());
    }

    #[test]
    fn test_identity_and_structural_inputs() {
        let mut f = family();
        let twin = f.store.create_node("Uncle");
        let store = &f.store;
        let uncle = store.node_ref(f.uncle).unwrap();
        let twin = store.node_ref(twin).unwrap();

        assert_eq!(FindInput::Node(f.uncle).test(uncle), Match::Yes);
        assert_eq!(FindInput::Node(f.uncle).test(twin), Match::No);
        assert_eq!(FindInput::Equal(f.uncle).test(twin), Match::Yes);
        assert_eq!(FindInput::Equal(f.mom).test(twin), Match::No);
    }

    #[test]
    fn test_guard_inputs() {
        let f = family();
        let son = f.store.node_ref(f.son).unwrap();
        let you = f.store.node_ref(f.you).unwrap();

        assert_eq!(FindInput::guard(IsSon).test(son), Match::Yes);
        assert_eq!(FindInput::guard(IsSon).test(you), Match::No);
        assert_eq!(FindInput::from(Label::new("You")).test(you), Match::Yes);
    }

    #[test]
    fn test_predicate_projection() {
        let f = family();
        let you = f.store.node_ref(f.you).unwrap();
        let input = FindInput::predicate(|node: NodeRef<'_>| node.child("son").map(|son| son.id()));

        assert_eq!(input.test(you), Match::Node(f.son));
        assert_eq!(input.test(f.store.node_ref(f.son).unwrap()), Match::No);
    }

    #[test]
    fn test_validate_rejects_foreign_nodes() {
        let f = family();
        let result = FindInput::Node(NodeId::new(99)).validate(&f.store);
        assert!(matches!(result, Err(GraphError::InvalidFindInput(_))));
        assert!(FindInput::Any.validate(&f.store).is_ok());
    }

    #[test]
    fn test_display_names() {
        let f = family();
        assert_eq!(FindInput::Any.display_name(&f.store), "Node");
        assert_eq!(FindInput::guard(IsSon).display_name(&f.store), "Son");
        assert_eq!(FindInput::from(Label::new("Cousin")).display_name(&f.store), "Cousin");
        assert_eq!(FindInput::Node(f.sister).display_name(&f.store), "sister");
        assert_eq!(
            FindInput::named("is_grand_daughter", |_: NodeRef<'_>| false).display_name(&f.store),
            "grand_daughter"
        );
    }
}

use kinship::graph::{GraphError, GraphStore, Label, NodeId, NodeRef};
use kinship::query::{Find, FindFlag, FindInput, NodeGuard};

struct Tree {
    store: GraphStore,
    grand_pa: NodeId,
    mom: NodeId,
    uncle: NodeId,
    you: NodeId,
    sister: NodeId,
    son: NodeId,
    cousin: NodeId,
}

fn tree() -> Tree {
    let mut store = GraphStore::new();
    let grand_pa = store.create_node("GrandPa");
    let mom = store.create_node("Mom");
    let uncle = store.create_node("Uncle");
    let you = store.create_node("You");
    let sister = store.create_node("Sister");
    let son = store.create_node("Son");
    let cousin = store.create_node("Cousin");

    store.set_property(grand_pa, "mom", mom).unwrap();
    store.set_property(grand_pa, "uncle", uncle).unwrap();
    store.set_property(mom, "you", you).unwrap();
    store.set_property(mom, "sister", sister).unwrap();
    store.set_property(you, "son", son).unwrap();
    store.set_property(sister, "cousin", cousin).unwrap();
    store.set_property(you, "age", 34i64).unwrap();
    store.set_property(sister, "age", 31i64).unwrap();

    Tree {
        store,
        grand_pa,
        mom,
        uncle,
        you,
        sister,
        son,
        cousin,
    }
}

struct IsSibling;

impl NodeGuard for IsSibling {
    fn is(&self, node: NodeRef<'_>) -> bool {
        node.label() == "Sister" || node.label() == "Uncle"
    }

    fn name(&self) -> Option<&str> {
        Some("isSibling")
    }
}

#[test]
fn test_find_son_in_descendants() {
    let t = tree();
    let mut store = t.store.clone();
    let unrelated = store.create_node("Son");

    assert_eq!(t.store.find(t.you).in_descendants().find(t.son).unwrap(), Some(t.son));
    assert_eq!(store.find(t.you).in_descendants().find(unrelated).unwrap(), None);
}

#[test]
fn test_find_in_children_or_siblings() {
    let t = tree();
    let query = t.store.find(t.you).in_children().or().in_siblings();
    assert_eq!(query.scope().to_string(), "children or siblings");
    assert_eq!(query.find(t.sister).unwrap(), Some(t.sister));
}

#[test]
fn test_all_over_concatenated_scopes() {
    let t = tree();
    let everyone = t
        .store
        .find(t.you)
        .in_parents()
        .or()
        .in_ancestors()
        .or()
        .in_nodes()
        .all()
        .any()
        .unwrap();

    let mut unique = everyone.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(everyone.len(), unique.len());
    assert_eq!(&everyone[..2], &[t.mom, t.grand_pa]);
    // the source itself only comes from `nodes`
    assert!(everyone.contains(&t.you));
    assert_eq!(everyone.len(), 7);
}

#[test]
fn test_assert_missing_child() {
    let t = tree();
    let err = t.store.assert(t.you).in_children().find(t.cousin).unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, GraphError::NotFound(_)));
    assert!(message.contains("mom/you"), "{}", message);
    assert!(message.contains("cousin"), "{}", message);
}

#[test]
fn test_assert_guard_name() {
    let t = tree();
    let err = t
        .store
        .assert(t.son)
        .in_siblings()
        .find(FindInput::guard(IsSibling))
        .unwrap_err();
    assert_eq!(err.to_string(), "Node mom/you/son could not find node Sibling");

    let found = t.store.assert(t.you).in_siblings().guarded(IsSibling).unwrap();
    assert_eq!(found, t.sister);
}

#[test]
fn test_predicates() {
    let t = tree();

    let older_than_32 = |node: NodeRef<'_>| {
        node.get("age")
            .and_then(|age| age.as_integer())
            .is_some_and(|age| age > 32)
    };
    assert_eq!(t.store.find(t.mom).matching(older_than_32).unwrap(), Some(t.you));

    let with_age = t
        .store
        .find(t.mom)
        .all()
        .matching(|node: NodeRef<'_>| node.get("age").is_some())
        .unwrap();
    assert_eq!(with_age, vec![t.you, t.sister]);
}

#[test]
fn test_has_by_label() {
    let t = tree();
    assert!(t.store.has(t.grand_pa).in_descendants().find(Label::new("Cousin")).unwrap());
    assert!(!t.store.has(t.grand_pa).find(Label::new("Cousin")).unwrap());
}

#[test]
fn test_structural_match() {
    let t = tree();
    let mut store = t.store.clone();
    let lookalike = store.create_node("Uncle");

    assert_eq!(
        store.find(t.mom).in_siblings().find(FindInput::Equal(lookalike)).unwrap(),
        Some(t.uncle)
    );
    assert_eq!(store.find(t.mom).in_siblings().find(lookalike).unwrap(), None);
}

#[test]
fn test_node_ref_queries() {
    let t = tree();
    let you = t.store.node_ref(t.you).unwrap();

    assert_eq!(you.find().find(t.son).unwrap(), Some(t.son));
    assert!(you.has().in_ancestors().find(t.uncle).unwrap());
    assert_eq!(you.assert().in_parents().find(t.grand_pa).unwrap(), t.grand_pa);
    assert_eq!(you.find_all().in_siblings().any().unwrap(), vec![t.sister]);
}

#[test]
fn test_explicit_constructors() {
    let t = tree();
    let query = Find::assert(&t.store, t.you, Some("custom".to_string()));
    assert_eq!(query.flag(), FindFlag::Assert);
    assert_eq!(query.source(), t.you);
    assert_eq!(query.find(t.uncle), Err(GraphError::NotFound("custom".to_string())));

    assert_eq!(Find::has(&t.store, t.you).flag(), FindFlag::Has);
    assert_eq!(Find::new(&t.store, t.you).all().flag(), FindFlag::All);
}

//! Family Tree Demo - Kinship
//!
//! This example walks through the tree bookkeeping and query vocabulary:
//! - Building a three-generation family out of node-valued properties
//! - Reading parents, siblings, ancestors and descendants
//! - Resolving property paths
//! - First / has / all / assert queries
//! - Moving a node under both reparenting policies
//!
//! Run with:
//!   cargo run --example family_tree

use anyhow::Result;
use kinship::{GraphError, GraphStore, Label, NodeId, NodeRef, TreeConfig};

fn names(store: &GraphStore, ids: impl IntoIterator<Item = NodeId>) -> Vec<String> {
    ids.into_iter()
        .filter_map(|id| store.node_ref(id))
        .map(|node| node.label().to_string())
        .collect()
}

fn build(store: &mut GraphStore) -> Result<(NodeId, NodeId, NodeId)> {
    let grand_pa = store.create_node("GrandPa");
    let mom = store.create_node("Mom");
    let uncle = store.create_node("Uncle");
    let you = store.create_node("You");
    let sister = store.create_node("Sister");
    let son = store.create_node("Son");
    let cousin = store.create_node("Cousin");

    store.set_property(grand_pa, "mom", mom)?;
    store.set_property(grand_pa, "uncle", uncle)?;
    store.set_property(mom, "you", you)?;
    store.set_property(mom, "sister", sister)?;
    store.set_property(you, "son", son)?;
    store.set_property(sister, "cousin", cousin)?;
    store.set_property(you, "age", 34i64)?;

    Ok((grand_pa, you, cousin))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Building the family ===");
    let mut store = GraphStore::new();
    let (grand_pa, you, cousin) = build(&mut store)?;
    println!("{} nodes, roots: {:?}", store.node_count(), names(&store, store.roots()));

    println!("\n=== Relationships of You ===");
    println!("parent:      {:?}", names(&store, store.get_parent(you)));
    println!("siblings:    {:?}", names(&store, store.siblings(you)));
    println!("parents:     {:?}", names(&store, store.parents(you)));
    println!("ancestors:   {:?}", names(&store, store.ancestors(you)));
    println!("descendants: {:?}", names(&store, store.descendants(grand_pa)));
    println!("path:        {}", store.path_string(you)?);

    println!("\n=== Queries ===");
    let son = store.find(you).find(Label::new("Son"))?;
    println!("find Son in children of You: {:?}", names(&store, son));

    let has_cousin = store.has(you).in_nodes().find(cousin)?;
    println!("tree of You contains Cousin: {}", has_cousin);

    let aged = store
        .find(grand_pa)
        .in_descendants()
        .all()
        .matching(|node: NodeRef<'_>| node.get("age").is_some())?;
    println!("descendants with an age: {:?}", names(&store, aged));

    match store.assert(you).in_siblings().find(Label::new("Uncle")) {
        Err(GraphError::NotFound(message)) => println!("assert failed as expected: {}", message),
        other => println!("unexpected: {:?}", other),
    }

    println!("\n=== Reparenting ===");
    store.set_property(grand_pa, "cousin", cousin)?;
    println!(
        "reattach: Cousin now under {:?}, path {}",
        names(&store, store.get_parent(cousin)),
        store.path_string(cousin)?
    );

    let mut strict = GraphStore::with_config(TreeConfig::strict());
    let (strict_grand_pa, _, strict_cousin) = build(&mut strict)?;
    if let Err(err) = strict.set_property(strict_grand_pa, "cousin", strict_cousin) {
        println!("strict: {}", err);
    }
    strict.detach(strict_cousin)?;
    strict.set_property(strict_grand_pa, "cousin", strict_cousin)?;
    println!("strict after detach: path {}", strict.path_string(strict_cousin)?);

    Ok(())
}

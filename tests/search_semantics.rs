// CLASSIFICATION: COMMUNITY
// Filename: search_semantics.rs v0.1
// Date Modified: 2026-10-19
// Author: Lukas Bower

mod common;

use std::collections::HashSet;

use vss_tree::{search, simple_search, Datatype, NodeHandle, NodeSpec, QueryError, TreeBuilder};

#[test]
fn exact_path_matches_once() {
    let tree = common::chain();
    let results = search(&tree, "A.B.C", tree.root(), 10, false).expect("search");
    assert_eq!(results.len(), 1);
    let found = &results.matches()[0];
    assert_eq!(found.handle, common::handle_of(&tree, "A.B.C"));
    assert_eq!(found.path, "A.B.C");
    assert!(!results.is_exhausted());
}

#[test]
fn unbounded_capacity_is_not_preallocated() {
    let tree = common::chain();
    let results = search(&tree, "A.B.C", tree.root(), usize::MAX, false).expect("search");
    assert_eq!(results.paths().collect::<Vec<_>>(), ["A.B.C"]);
    assert!(!results.is_exhausted());

    let all = search(&tree, "A.*", tree.root(), usize::MAX, true).expect("search");
    assert_eq!(all.paths().collect::<Vec<_>>(), ["A.B.C"]);
    assert!(!all.is_exhausted());
}

#[test]
fn single_level_wildcard_follows_child_order() {
    let mut builder = TreeBuilder::new(NodeSpec::branch("A", "")).expect("root");
    let b1 = builder
        .add_child(builder.root(), NodeSpec::sensor("B1", "", Datatype::Int8))
        .expect("b1");
    let b2 = builder
        .add_child(builder.root(), NodeSpec::sensor("B2", "", Datatype::Int8))
        .expect("b2");
    let tree = builder.build();
    let results = search(&tree, "A.*", tree.root(), 10, false).expect("search");
    assert_eq!(results.handles().collect::<Vec<_>>(), vec![b1, b2]);
    assert_eq!(results.paths().collect::<Vec<_>>(), ["A.B1", "A.B2"]);
}

#[test]
fn single_level_wildcard_returns_branches_too() {
    let tree = common::vehicle();
    let results = search(&tree, "Vehicle.Cabin.*", tree.root(), 10, false).expect("search");
    assert_eq!(
        results.paths().collect::<Vec<_>>(),
        ["Vehicle.Cabin.Door", "Vehicle.Cabin.Temperature"]
    );
}

#[test]
fn capacity_keeps_one_slot_in_reserve() {
    let tree = common::vehicle();
    for capacity in 1..5 {
        let results = search(&tree, "Vehicle.*", tree.root(), capacity, false).expect("search");
        assert_eq!(results.len(), capacity - 1, "capacity {capacity}");
        assert!(results.is_exhausted());
    }
    let results = search(&tree, "Vehicle.*", tree.root(), 3, false).expect("search");
    assert_eq!(results.paths().collect::<Vec<_>>(), ["Vehicle.Cabin", "Vehicle.Speed"]);
}

#[test]
fn zero_capacity_returns_nothing() {
    let tree = common::vehicle();
    let results = search(&tree, "Vehicle.*", tree.root(), 0, false).expect("search");
    assert!(results.is_empty());
}

#[test]
fn missing_child_yields_no_results() {
    let tree = common::chain();
    let results = search(&tree, "A.X", tree.root(), 10, false).expect("search");
    assert!(results.is_empty());
    assert!(!results.is_exhausted());
}

#[test]
fn path_past_a_leaf_yields_no_results() {
    let tree = common::chain();
    let results = search(&tree, "A.B.C.D", tree.root(), 10, false).expect("search");
    assert!(results.is_empty());
}

#[test]
fn internal_wildcards_do_not_duplicate() {
    let tree = common::vehicle();
    let results = search(&tree, "Vehicle.*.*", tree.root(), 50, false).expect("search");
    assert_eq!(
        results.paths().collect::<Vec<_>>(),
        [
            "Vehicle.Cabin.Door",
            "Vehicle.Cabin.Temperature",
            "Vehicle.Trailer.Connected"
        ]
    );
    let deeper = search(&tree, "Vehicle.*.*.*", tree.root(), 50, false).expect("search");
    assert_eq!(
        deeper.paths().collect::<Vec<_>>(),
        ["Vehicle.Cabin.Door.IsOpen", "Vehicle.Cabin.Door.Window"]
    );
    for results in [results, deeper] {
        let unique: HashSet<_> = results
            .matches()
            .iter()
            .map(|found| (found.handle, found.path.clone()))
            .collect();
        assert_eq!(unique.len(), results.len());
    }
}

#[test]
fn resolved_paths_name_the_matched_nodes() {
    let tree = common::vehicle();
    let results = search(&tree, "Vehicle.*.*", tree.root(), 50, false).expect("search");
    for found in results.matches() {
        let view = tree.node(found.handle).expect("node");
        assert_eq!(view.path(), found.path);
    }
}

#[test]
fn non_root_search_prefixes_full_path() {
    let tree = common::vehicle();
    let cabin = common::handle_of(&tree, "Vehicle.Cabin");
    let results = search(&tree, "Cabin.Door.*", cabin, 10, false).expect("search");
    assert_eq!(
        results.paths().collect::<Vec<_>>(),
        ["Vehicle.Cabin.Door.IsOpen", "Vehicle.Cabin.Door.Window"]
    );
}

#[test]
fn single_segment_path_checks_the_root_name() {
    let tree = common::vehicle();
    let hit = search(&tree, "Vehicle", tree.root(), 10, false).expect("search");
    assert_eq!(hit.paths().collect::<Vec<_>>(), ["Vehicle"]);
    let star = search(&tree, "*", tree.root(), 10, false).expect("search");
    assert_eq!(star.handles().collect::<Vec<_>>(), vec![tree.root()]);
    let miss = search(&tree, "Truck", tree.root(), 10, false).expect("search");
    assert!(miss.is_empty());
}

#[test]
fn caller_errors_are_reported() {
    let tree = common::chain();
    assert_eq!(
        search(&tree, "", tree.root(), 10, false),
        Err(QueryError::EmptyPath)
    );
    let foreign = NodeHandle::from_raw(1_000);
    assert_eq!(
        search(&tree, "A.*", foreign, 10, false),
        Err(QueryError::UnknownHandle(foreign))
    );
}

#[test]
fn simple_search_uses_default_capacity() {
    let tree = common::vehicle();
    let results = simple_search(&tree, "Vehicle.Speed", false).expect("search");
    assert_eq!(results.paths().collect::<Vec<_>>(), ["Vehicle.Speed"]);
}

#[test]
fn concurrent_queries_share_the_tree() {
    let tree = common::vehicle();
    let expected = search(&tree, "Vehicle.*", tree.root(), 150, true).expect("search");
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let results = search(&tree, "Vehicle.*", tree.root(), 150, true).expect("search");
                    assert_eq!(results, expected);
                }
            });
        }
    });
}

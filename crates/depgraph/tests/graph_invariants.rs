//! Property-based tests for graph construction.
//!
//! Random repositories are built in memory and every resulting graph is
//! checked for identity uniqueness, edge symmetry and depth-limit behavior.

use std::collections::HashSet;

use depgraph::domain::PackageId;
use depgraph::graph::{DependencyGraph, GraphBuilder};
use depgraph::source::InMemorySource;
use proptest::prelude::*;

const PACKAGE_COUNT: usize = 8;

fn package(index: usize) -> PackageId {
    PackageId::new(format!("P{index}"), "1.0")
}

/// One dependency list per package; entries may repeat.
fn repository_strategy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(
        prop::collection::vec(0..PACKAGE_COUNT, 0..5),
        PACKAGE_COUNT,
    )
}

fn source_for(repository: &[Vec<usize>]) -> InMemorySource {
    repository
        .iter()
        .enumerate()
        .fold(InMemorySource::new(), |source, (index, deps)| {
            source.with_dependencies(package(index), deps.iter().map(|&d| package(d)))
        })
}

fn build(repository: &[Vec<usize>], max_depth: Option<usize>) -> DependencyGraph {
    let source = source_for(repository);
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(GraphBuilder::new(&source).with_max_depth(max_depth).build(package(0)))
}

proptest! {
    #[test]
    fn prop_identities_are_unique(repository in repository_strategy(), max_depth in prop::option::of(0usize..4)) {
        let graph = build(&repository, max_depth);

        let ids: HashSet<&PackageId> = graph.iter().map(|(_, node)| node.id()).collect();
        prop_assert_eq!(ids.len(), graph.len());
        for (node_id, node) in graph.iter() {
            prop_assert_eq!(graph.get(node.id()), Some(node_id));
        }
    }

    #[test]
    fn prop_forward_and_reverse_edges_agree(repository in repository_strategy(), max_depth in prop::option::of(0usize..4)) {
        let graph = build(&repository, max_depth);

        for (node_id, node) in graph.iter() {
            for &dep in node.dependencies() {
                prop_assert!(graph.node(dep).dependents().contains(&node_id));
            }
            for &dependent in node.dependents() {
                prop_assert!(graph.node(dependent).dependencies().contains(&node_id));
            }
        }
    }

    #[test]
    fn prop_depth_limit_bounds_expansion(repository in repository_strategy(), max_depth in 0usize..4) {
        let graph = build(&repository, Some(max_depth));
        let depths = graph.depths();

        prop_assert_eq!(depths.len(), graph.len());
        for (node_id, node) in graph.iter() {
            let depth = depths[&node_id];
            prop_assert!(depth <= max_depth);
            if depth == max_depth {
                prop_assert!(node.dependencies().is_empty());
                prop_assert!(!node.is_fully_resolved());
            } else {
                prop_assert!(node.is_fully_resolved());
            }
        }
    }

    #[test]
    fn prop_expanded_nodes_mirror_the_source(repository in repository_strategy(), max_depth in prop::option::of(0usize..4)) {
        let graph = build(&repository, max_depth);

        for (_, node) in graph.iter().filter(|(_, node)| node.is_fully_resolved()) {
            let index: usize = node.id().name[1..].parse().expect("generated name");
            let expected: Vec<PackageId> = repository[index].iter().map(|&d| package(d)).collect();
            let actual: Vec<PackageId> = node
                .dependencies()
                .iter()
                .map(|&d| graph.node(d).id().clone())
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }
}

//! The dependency graph produced by a build.
//!
//! Nodes live in an arena indexed by [`NodeId`]; the resolved-set maps each
//! [`PackageId`] to its single node. Edges are stored on both endpoints:
//! `dependencies` on the dependent (ordered) and `dependents` on the
//! dependency (a set). Both sides are written by [`DependencyGraph::link`]
//! only.
//!
//! Graphs may contain cycles. Every traversal here is iterative and keeps a
//! visited-set.

mod builder;

pub use builder::{GraphBuilder, build_graph};

use crate::domain::{NodeId, PackageId, PackageNode};
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// A fully built dependency graph rooted at one package.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: Vec<PackageNode>,
    resolved: HashMap<PackageId, NodeId>,
}

/// Result of a reverse-dependency lookup.
#[derive(Debug, Clone, Copy)]
pub struct ReverseLookup<'g> {
    /// The node that matched the fragment.
    pub package: &'g PackageNode,
    /// Ids of the packages that directly depend on it.
    pub dependents: &'g BTreeSet<NodeId>,
}

impl DependencyGraph {
    /// Create a graph containing only the root node.
    pub(crate) fn with_root(root: PackageId) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            resolved: HashMap::new(),
        };
        graph.intern(root);
        graph
    }

    /// Return the node for `id`, creating it if this identity is new.
    ///
    /// The boolean is `true` when a node was created.
    pub(crate) fn intern(&mut self, id: PackageId) -> (NodeId, bool) {
        if let Some(&existing) = self.resolved.get(&id) {
            return (existing, false);
        }
        let node_id = NodeId(self.nodes.len());
        self.resolved.insert(id.clone(), node_id);
        self.nodes.push(PackageNode::new(id));
        (node_id, true)
    }

    /// Record that `from` directly depends on `to`.
    ///
    /// Appends to `from`'s dependency list and inserts `from` into `to`'s
    /// dependents in the same call.
    pub(crate) fn link(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from.0].dependencies.push(to);
        self.nodes[to.0].dependents.insert(from);
    }

    pub(crate) fn mark_resolved(&mut self, id: NodeId) {
        self.nodes[id.0].fully_resolved = true;
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The root node.
    pub fn root_node(&self) -> &PackageNode {
        &self.nodes[0]
    }

    /// Look up a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn node(&self, id: NodeId) -> &PackageNode {
        &self.nodes[id.0]
    }

    /// Find the node for a package identity.
    pub fn get(&self, package: &PackageId) -> Option<NodeId> {
        self.resolved.get(package).copied()
    }

    /// Number of distinct packages.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a graph has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of forward edges, counting repeated entries.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.dependencies.len()).sum()
    }

    /// Nodes in creation order, which is breadth-first discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &PackageNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Direct dependencies of a node, resolved to nodes.
    pub fn dependencies_of(&self, id: NodeId) -> impl Iterator<Item = &PackageNode> {
        self.nodes[id.0].dependencies.iter().map(|d| &self.nodes[d.0])
    }

    /// Direct dependents of a node, resolved to nodes.
    pub fn dependents_of(&self, id: NodeId) -> impl Iterator<Item = &PackageNode> {
        self.nodes[id.0].dependents.iter().map(|d| &self.nodes[d.0])
    }

    /// Breadth-first distance of every node from the root.
    pub fn depths(&self) -> HashMap<NodeId, usize> {
        let mut depths = HashMap::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([(self.root(), 0)]);
        depths.insert(self.root(), 0);

        while let Some((current, depth)) = queue.pop_front() {
            for &dep in &self.nodes[current.0].dependencies {
                if !depths.contains_key(&dep) {
                    depths.insert(dep, depth + 1);
                    queue.push_back((dep, depth + 1));
                }
            }
        }

        depths
    }

    /// Find the first package, breadth-first from the root, whose
    /// `name:version` contains `fragment` (case-insensitive), and return its
    /// reverse dependencies.
    pub fn find_dependents(&self, fragment: &str) -> Option<ReverseLookup<'_>> {
        let mut visited = HashSet::from([self.root()]);
        let mut queue = VecDeque::from([self.root()]);

        while let Some(current) = queue.pop_front() {
            let node = &self.nodes[current.0];
            if node.id.matches_fragment(fragment) {
                return Some(ReverseLookup {
                    package: node,
                    dependents: &node.dependents,
                });
            }
            for &dep in &node.dependencies {
                if visited.insert(dep) {
                    queue.push_back(dep);
                }
            }
        }

        None
    }

    /// Project the graph into a petgraph [`DiGraph`].
    ///
    /// Node indices match [`NodeId::index`]. Repeated forward entries become
    /// parallel edges.
    pub fn to_petgraph(&self) -> DiGraph<PackageId, ()> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edge_count());
        for node in &self.nodes {
            graph.add_node(node.id.clone());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            for dep in &node.dependencies {
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(dep.0), ());
            }
        }
        graph
    }

    /// Dependency cycles, as groups of mutually reachable packages.
    ///
    /// A package that depends on itself forms a group of one.
    pub fn cycles(&self) -> Vec<Vec<NodeId>> {
        let graph = self.to_petgraph();
        algo::tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut ids: Vec<NodeId> = scc.into_iter().map(|n| NodeId(n.index())).collect();
                ids.sort_unstable();
                ids
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str) -> PackageId {
        PackageId::new(name, "1.0")
    }

    /// App -> Lib -> Util, Util -> Lib
    fn sample() -> DependencyGraph {
        let mut graph = DependencyGraph::with_root(pkg("App"));
        let (lib, _) = graph.intern(pkg("Lib"));
        let (util, _) = graph.intern(pkg("Util"));
        graph.link(graph.root(), lib);
        graph.link(lib, util);
        graph.link(util, lib);
        graph
    }

    #[test]
    fn test_intern_deduplicates() {
        let mut graph = DependencyGraph::with_root(pkg("App"));
        let (first, created) = graph.intern(pkg("Lib"));
        assert!(created);
        let (second, created) = graph.intern(pkg("Lib"));
        assert!(!created);
        assert_eq!(first, second);
        assert_eq!(graph.len(), 2);

        let (root_again, created) = graph.intern(pkg("App"));
        assert!(!created);
        assert_eq!(root_again, graph.root());
    }

    #[test]
    fn test_link_updates_both_sides() {
        let graph = sample();
        let lib = graph.get(&pkg("Lib")).expect("lib exists");
        let util = graph.get(&pkg("Util")).expect("util exists");

        assert_eq!(graph.root_node().dependencies(), &[lib]);
        assert!(graph.node(lib).dependents().contains(&graph.root()));
        assert!(graph.node(lib).dependents().contains(&util));
        assert!(graph.node(util).dependents().contains(&lib));
    }

    #[test]
    fn test_repeated_link_keeps_dependents_unique() {
        let mut graph = DependencyGraph::with_root(pkg("App"));
        let (lib, _) = graph.intern(pkg("Lib"));
        graph.link(graph.root(), lib);
        graph.link(graph.root(), lib);

        assert_eq!(graph.root_node().dependencies().len(), 2);
        assert_eq!(graph.node(lib).dependents().len(), 1);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_depths() {
        let graph = sample();
        let depths = graph.depths();
        assert_eq!(depths[&graph.root()], 0);
        assert_eq!(depths[&graph.get(&pkg("Lib")).expect("lib")], 1);
        assert_eq!(depths[&graph.get(&pkg("Util")).expect("util")], 2);
    }

    #[test]
    fn test_find_dependents_terminates_on_cycle() {
        let graph = sample();
        assert!(graph.find_dependents("missing").is_none());

        let found = graph.find_dependents("UTIL").expect("util matches");
        assert_eq!(found.package.id(), &pkg("Util"));
        let names: Vec<_> = found
            .dependents
            .iter()
            .map(|d| graph.node(*d).id().name.as_str())
            .collect();
        assert_eq!(names, vec!["Lib"]);
    }

    #[test]
    fn test_find_dependents_prefers_shallowest_match() {
        let mut graph = DependencyGraph::with_root(pkg("App"));
        let (deep_parent, _) = graph.intern(pkg("Parent"));
        let (lib_a, _) = graph.intern(pkg("LibA"));
        let (lib_b, _) = graph.intern(pkg("LibB"));
        graph.link(graph.root(), deep_parent);
        graph.link(graph.root(), lib_b);
        graph.link(deep_parent, lib_a);

        let found = graph.find_dependents("lib").expect("match");
        assert_eq!(found.package.id(), &pkg("LibB"));
    }

    #[test]
    fn test_cycles() {
        let graph = sample();
        let cycles = graph.cycles();
        assert_eq!(cycles.len(), 1);
        let lib = graph.get(&pkg("Lib")).expect("lib");
        let util = graph.get(&pkg("Util")).expect("util");
        assert_eq!(cycles[0], vec![lib, util]);
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let mut graph = DependencyGraph::with_root(pkg("App"));
        graph.link(graph.root(), graph.root());
        assert_eq!(graph.cycles(), vec![vec![graph.root()]]);
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let mut graph = DependencyGraph::with_root(pkg("App"));
        let (lib, _) = graph.intern(pkg("Lib"));
        graph.link(graph.root(), lib);
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn test_to_petgraph_preserves_indices() {
        let graph = sample();
        let pg = graph.to_petgraph();
        assert_eq!(pg.node_count(), 3);
        assert_eq!(pg.edge_count(), 3);
        assert_eq!(pg[NodeIndex::new(1)], pkg("Lib"));
    }
}

//! Breadth-first graph construction.

use std::collections::VecDeque;

use super::DependencyGraph;
use crate::domain::{NodeId, PackageId};
use crate::error::Result;
use crate::source::DependencySource;

/// Expands a root package into its full dependency graph.
///
/// Lookups go through [`DependencySource::direct_dependencies`] one at a
/// time, so a failing lookup leaves that package as a leaf and the build
/// carries on.
///
/// # Depth limit
///
/// The root is at depth 0. With a limit of `N`, packages discovered at depth
/// `N` are added and linked but never queried.
pub struct GraphBuilder<'a> {
    source: &'a dyn DependencySource,
    max_depth: Option<usize>,
}

impl std::fmt::Debug for GraphBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphBuilder")
            .field("source", &"<dyn DependencySource>")
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder with no depth limit.
    pub fn new(source: &'a dyn DependencySource) -> Self {
        Self {
            source,
            max_depth: None,
        }
    }

    /// Limit expansion to `max_depth` edges from the root (`None` = unbounded).
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build the graph rooted at `root`.
    pub async fn build(&self, root: PackageId) -> DependencyGraph {
        tracing::info!(root = %root, max_depth = ?self.max_depth, "Building dependency graph");

        let mut graph = DependencyGraph::with_root(root);
        let mut queue: VecDeque<(NodeId, usize)> = VecDeque::from([(graph.root(), 0)]);

        while let Some((current, depth)) = queue.pop_front() {
            if self.max_depth.is_some_and(|max| depth >= max) {
                tracing::debug!(
                    package = %graph.node(current).id(),
                    depth,
                    "Depth limit reached, not expanding"
                );
                continue;
            }

            let package = graph.node(current).id().clone();
            tracing::debug!(package = %package, depth, "Expanding package");

            let dependencies = self.source.direct_dependencies(&package).await;
            graph.mark_resolved(current);

            if dependencies.is_empty() {
                tracing::debug!(package = %package, "No dependencies found");
            }

            for dependency in dependencies {
                let (node, created) = graph.intern(dependency);
                if created {
                    queue.push_back((node, depth + 1));
                }
                graph.link(current, node);
            }
        }

        tracing::info!(
            packages = graph.len(),
            edges = graph.edge_count(),
            "Dependency graph built"
        );
        graph
    }
}

/// Validate the root identity and build its graph.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`](crate::error::Error::InvalidInput) if the
/// root name or version is empty. Lookup failures never fail the build.
pub async fn build_graph(
    name: &str,
    version: &str,
    max_depth: Option<usize>,
    source: &dyn DependencySource,
) -> Result<DependencyGraph> {
    let root = PackageId::parse_root(name, version)?;
    Ok(GraphBuilder::new(source)
        .with_max_depth(max_depth)
        .build(root)
        .await)
}

//! Domain types for dependency graphs.
//!
//! A package is identified by its exact `(name, version)` pair. Two versions
//! of the same package are unrelated nodes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Error, Result};

/// Identity of a package: exact, case-sensitive name and version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageId {
    /// Package name
    pub name: String,
    /// Package version
    pub version: String,
}

impl PackageId {
    /// Create a new package identity.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Create the identity of a build root from user input.
    ///
    /// Both fields are trimmed and must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the name or version is empty.
    pub fn parse_root(name: &str, version: &str) -> Result<Self> {
        let name = name.trim();
        let version = version.trim();

        if name.is_empty() {
            return Err(Error::InvalidInput(
                "root package name cannot be empty".to_string(),
            ));
        }
        if version.is_empty() {
            return Err(Error::InvalidInput(
                "root package version cannot be empty".to_string(),
            ));
        }

        Ok(Self::new(name, version))
    }

    /// Case-insensitive substring match against `name:version`.
    pub fn matches_fragment(&self, fragment: &str) -> bool {
        let haystack = format!("{}:{}", self.name, self.version).to_lowercase();
        haystack.contains(&fragment.to_lowercase())
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

/// Index of a node within one [`DependencyGraph`](crate::graph::DependencyGraph).
///
/// Only meaningful for the graph that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in creation order (the root is 0).
    pub fn index(self) -> usize {
        self.0
    }
}

/// A vertex of the dependency graph.
#[derive(Debug, Clone)]
pub struct PackageNode {
    pub(crate) id: PackageId,
    pub(crate) dependencies: Vec<NodeId>,
    pub(crate) dependents: BTreeSet<NodeId>,
    pub(crate) fully_resolved: bool,
}

impl PackageNode {
    pub(crate) fn new(id: PackageId) -> Self {
        Self {
            id,
            dependencies: Vec::new(),
            dependents: BTreeSet::new(),
            fully_resolved: false,
        }
    }

    /// Identity of this package.
    pub fn id(&self) -> &PackageId {
        &self.id
    }

    /// Direct dependencies in discovery order.
    pub fn dependencies(&self) -> &[NodeId] {
        &self.dependencies
    }

    /// Packages that directly depend on this one.
    pub fn dependents(&self) -> &BTreeSet<NodeId> {
        &self.dependents
    }

    /// Whether the builder queried this package's dependencies.
    ///
    /// False for packages cut off by the depth limit. Informational only.
    pub fn is_fully_resolved(&self) -> bool {
        self.fully_resolved
    }
}

//! In-memory dependency source.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::DependencySource;
use crate::domain::PackageId;
use crate::error::{Error, Result};

/// A dependency source backed by a map.
///
/// Packages without an entry have no dependencies. Packages marked with
/// [`failing`](Self::failing) report a lookup error. Every lookup is recorded
/// and can be inspected with [`queried`](Self::queried).
#[derive(Debug, Default)]
pub struct InMemorySource {
    dependencies: HashMap<PackageId, Vec<PackageId>>,
    failing: HashSet<PackageId>,
    queried: Mutex<Vec<PackageId>>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the direct dependencies of `package`, replacing any previous entry.
    #[must_use]
    pub fn with_dependencies(
        mut self,
        package: PackageId,
        dependencies: impl IntoIterator<Item = PackageId>,
    ) -> Self {
        self.dependencies
            .insert(package, dependencies.into_iter().collect());
        self
    }

    /// Make lookups of `package` fail.
    #[must_use]
    pub fn failing(mut self, package: PackageId) -> Self {
        self.failing.insert(package);
        self
    }

    /// Packages looked up so far, in call order.
    pub fn queried(&self) -> Vec<PackageId> {
        self.queried
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DependencySource for InMemorySource {
    async fn lookup(&self, package: &PackageId) -> Result<Vec<PackageId>> {
        if let Ok(mut calls) = self.queried.lock() {
            calls.push(package.clone());
        }

        if self.failing.contains(package) {
            return Err(Error::Lookup(format!("{package} is marked as failing")));
        }

        Ok(self.dependencies.get(package).cloned().unwrap_or_default())
    }
}

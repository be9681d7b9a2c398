//! Dependency sources.
//!
//! A [`DependencySource`] answers one question: what does this exact package
//! version directly depend on? Implementations:
//!
//! - [`RegistrySource`]: a live NuGet v3 registry
//! - [`FixtureSource`]: a flat text file, for offline testing
//! - [`InMemorySource`]: a map held in memory
//!
//! # Failure policy
//!
//! [`DependencySource::lookup`] reports failures as errors.
//! [`DependencySource::direct_dependencies`], which the graph builder calls,
//! logs them and answers with no dependencies, so a single bad package never
//! aborts a build.

mod fixture;
mod memory;
mod registry;

pub use fixture::{DEFAULT_PLACEHOLDER_VERSION, FixtureSource, parse_fixture};
pub use memory::InMemorySource;
pub use registry::RegistrySource;

use crate::domain::PackageId;
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

/// Answers "what are the direct dependencies of this package?".
///
/// Answers must be deterministic within a single build.
#[async_trait]
pub trait DependencySource: Send + Sync {
    /// Look up the direct dependencies of `package`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying data cannot be read or parsed.
    async fn lookup(&self, package: &PackageId) -> Result<Vec<PackageId>>;

    /// Direct dependencies of `package`, treating any failure as none.
    async fn direct_dependencies(&self, package: &PackageId) -> Vec<PackageId> {
        match self.lookup(package).await {
            Ok(dependencies) => dependencies,
            Err(e) => {
                tracing::warn!(package = %package, error = %e, "Dependency lookup failed, treating as leaf");
                Vec::new()
            }
        }
    }
}

/// Where dependency information comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkingMode {
    /// Read a local fixture file.
    Test,
    /// Query a NuGet registry.
    #[default]
    Real,
}

impl fmt::Display for WorkingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Test => write!(f, "TEST"),
            Self::Real => write!(f, "REAL"),
        }
    }
}

/// Create the dependency source for a working mode.
///
/// In [`WorkingMode::Test`] `repository` is a fixture file path; in
/// [`WorkingMode::Real`] it is a service index URL.
pub fn create_source(
    mode: WorkingMode,
    repository: &str,
    placeholder_version: &str,
) -> Box<dyn DependencySource> {
    tracing::debug!(mode = %mode, repository, "Creating dependency source");
    match mode {
        WorkingMode::Test => Box::new(
            FixtureSource::new(PathBuf::from(repository))
                .with_placeholder_version(placeholder_version),
        ),
        WorkingMode::Real => Box::new(RegistrySource::new(repository)),
    }
}

//! File-based dependency source for offline testing.
//!
//! # Format
//!
//! ```text
//! # comment
//! App -> Lib:2.0, Logging:1.5   # trailing comments are ignored
//! Lib -> Util                   # version defaults to the placeholder
//! Util ->
//! ```
//!
//! The package name on the left is matched case-insensitively and its
//! version is ignored. The first matching line wins.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::DependencySource;
use crate::domain::PackageId;
use crate::error::{Error, Result};

/// Version given to fixture dependencies written without one.
pub const DEFAULT_PLACEHOLDER_VERSION: &str = "1.0.0";

/// Reads dependencies from a fixture file.
///
/// The file is re-read on every lookup.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    path: PathBuf,
    placeholder_version: String,
}

impl FixtureSource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            placeholder_version: DEFAULT_PLACEHOLDER_VERSION.to_string(),
        }
    }

    /// Override the version used for entries without one.
    #[must_use]
    pub fn with_placeholder_version(mut self, version: impl Into<String>) -> Self {
        self.placeholder_version = version.into();
        self
    }

    /// Path of the fixture file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DependencySource for FixtureSource {
    async fn lookup(&self, package: &PackageId) -> Result<Vec<PackageId>> {
        tracing::debug!(package = %package, file = %self.path.display(), "Reading fixture");
        let content = tokio::fs::read_to_string(&self.path).await?;
        parse_fixture(&content, &package.name, &self.placeholder_version)
    }
}

/// Find the dependencies of `name` in fixture text.
///
/// Returns an empty list when no line matches.
///
/// # Errors
///
/// Returns [`Error::MalformedFixture`] if the matching line has an entry
/// with an empty package name.
pub fn parse_fixture(
    content: &str,
    name: &str,
    placeholder_version: &str,
) -> Result<Vec<PackageId>> {
    let wanted = name.to_lowercase();

    for (index, raw) in content.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let Some((lhs, rhs)) = line.split_once("->") else {
            continue;
        };
        if lhs.trim().to_lowercase() != wanted {
            continue;
        }

        return parse_entries(rhs, placeholder_version).map_err(|reason| {
            Error::MalformedFixture {
                line: index + 1,
                reason,
            }
        });
    }

    Ok(Vec::new())
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(before, _)| before)
}

fn parse_entries(
    rhs: &str,
    placeholder_version: &str,
) -> std::result::Result<Vec<PackageId>, String> {
    let mut dependencies = Vec::new();

    for entry in rhs.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (dep_name, version) = match entry.split_once(':') {
            Some((n, v)) => (n.trim(), v.trim()),
            None => (entry, ""),
        };
        if dep_name.is_empty() {
            return Err(format!("dependency entry '{entry}' has no package name"));
        }
        let version = if version.is_empty() {
            placeholder_version
        } else {
            version
        };
        dependencies.push(PackageId::new(dep_name, version));
    }

    Ok(dependencies)
}

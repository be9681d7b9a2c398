//! Configuration file support.
//!
//! Settings are read from YAML. Every key is optional; command-line flags
//! take precedence over file values.
//!
//! ```yaml
//! repository: https://api.nuget.org/v3/index.json
//! mode: real
//! max-depth: 3
//! graphviz-command: dot
//! default-version: 1.0.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::error::{Error, Result};
use crate::render::graphviz::DEFAULT_GRAPHVIZ_COMMAND;
use crate::source::{DEFAULT_PLACEHOLDER_VERSION, WorkingMode};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "depgraph.yaml";

/// Default registry service index.
pub const DEFAULT_REPOSITORY: &str = depgraph_nuget::client::NUGET_ORG_INDEX;

/// Settings loaded from a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Settings {
    /// Registry service index URL, or fixture path in test mode
    pub repository: Option<String>,

    /// Working mode
    pub mode: WorkingMode,

    /// Depth limit (unbounded when absent)
    pub max_depth: Option<usize>,

    /// Drawing tool command
    pub graphviz_command: String,

    /// Version given to fixture dependencies written without one
    pub default_version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repository: None,
            mode: WorkingMode::default(),
            max_depth: None,
            graphviz_command: DEFAULT_GRAPHVIZ_COMMAND.to_string(),
            default_version: DEFAULT_PLACEHOLDER_VERSION.to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on invalid YAML or unknown keys.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load settings from a file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        Self::from_yaml(&content).map_err(|e| match e {
            Error::Config(reason) => Error::Config(format!("{}: {reason}", path.display())),
            other => other,
        })
    }

    /// Load `explicit` if given, else [`CONFIG_FILE_NAME`] in `working_dir`
    /// if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Fails if a selected file cannot be read or parsed. A missing explicit
    /// file is an error; a missing implicit one is not.
    pub async fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading configuration");
            return Self::load(path).await;
        }

        let implicit = working_dir.join(CONFIG_FILE_NAME);
        if fs::try_exists(&implicit).await.unwrap_or(false) {
            tracing::debug!(path = %implicit.display(), "Loading configuration");
            return Self::load(&implicit).await;
        }

        Ok(Self::default())
    }

    /// The repository to use, falling back to nuget.org.
    pub fn repository_or_default(&self) -> &str {
        self.repository.as_deref().unwrap_or(DEFAULT_REPOSITORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mode, WorkingMode::Real);
        assert_eq!(settings.graphviz_command, "dot");
        assert_eq!(settings.default_version, "1.0.0");
        assert_eq!(settings.repository_or_default(), DEFAULT_REPOSITORY);
    }

    #[test]
    fn test_from_yaml_partial() {
        let settings = Settings::from_yaml("mode: test\nmax-depth: 2\nrepository: deps.txt\n")
            .expect("valid yaml");
        assert_eq!(settings.mode, WorkingMode::Test);
        assert_eq!(settings.max_depth, Some(2));
        assert_eq!(settings.repository_or_default(), "deps.txt");
        assert_eq!(settings.graphviz_command, "dot");
    }

    #[test]
    fn test_from_yaml_empty() {
        assert_eq!(Settings::from_yaml("").expect("empty ok"), Settings::default());
    }

    #[test]
    fn test_from_yaml_rejects_unknown_key() {
        let err = Settings::from_yaml("colour: blue\n").expect_err("unknown key");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_yaml_rejects_bad_mode() {
        assert!(Settings::from_yaml("mode: sometimes\n").is_err());
    }

    #[tokio::test]
    async fn test_discover_implicit_file() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "graphviz-command: neato\n")
            .expect("write config");

        let settings = Settings::discover(None, dir.path()).await.expect("loads");
        assert_eq!(settings.graphviz_command, "neato");
    }

    #[tokio::test]
    async fn test_discover_without_file() {
        let dir = TempDir::new().expect("tempdir");
        let settings = Settings::discover(None, dir.path()).await.expect("defaults");
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_discover_missing_explicit_file_fails() {
        let dir = TempDir::new().expect("tempdir");
        let missing = dir.path().join("nope.yaml");
        let err = Settings::discover(Some(&missing), dir.path())
            .await
            .expect_err("explicit file must exist");
        assert!(matches!(err, Error::Io(_)));
    }
}

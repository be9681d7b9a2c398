//! CLI argument parsing and command dispatch.
//!
//! # Example
//!
//! ```bash
//! depgraph --package Serilog --package-version 3.1.1 --tree
//! depgraph -p App -v 1.0 --mode test --repository deps.txt --max-depth 2 --output graph.svg
//! depgraph -p App -v 1.0 --mode test --repository deps.txt --reverse lib
//! ```

mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

pub use types::WorkingModeArg;
pub use validators::{validate_fragment, validate_package_name, validate_version};

/// Resolve and visualize the transitive dependencies of a NuGet package
///
/// Expands the dependency graph breadth-first from the given package,
/// querying a NuGet registry (or a local fixture file in test mode).
#[derive(Parser, Debug, Clone)]
#[command(name = "depgraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the package to analyze
    #[arg(short = 'p', long = "package", value_parser = validate_package_name)]
    pub package: String,

    /// Version of the package to analyze
    #[arg(short = 'v', long = "package-version", value_parser = validate_version)]
    pub package_version: String,

    /// Registry service index URL, or fixture file path in test mode
    #[arg(short, long)]
    pub repository: Option<String>,

    /// Where dependency information comes from
    #[arg(short, long, value_enum)]
    pub mode: Option<WorkingModeArg>,

    /// Maximum depth to expand (the root is depth 0)
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Image file to draw the graph into (.png or .svg)
    ///
    /// A DOT file and a Mermaid file are written next to it.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the dependency tree
    #[arg(short, long)]
    pub tree: bool,

    /// Show which packages depend on the first package matching FRAGMENT
    #[arg(long, value_name = "FRAGMENT", value_parser = validate_fragment)]
    pub reverse: Option<String>,

    /// Use ASCII connectors instead of Unicode
    #[arg(long)]
    pub ascii: bool,

    /// Output in JSON format for programmatic use
    #[arg(long)]
    pub json: bool,

    /// Configuration file (defaults to ./depgraph.yaml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        execute::execute(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_args() {
        let cli = Cli::try_parse_from(["depgraph", "-p", "App", "-v", "1.0"]).expect("parses");
        assert_eq!(cli.package, "App");
        assert_eq!(cli.package_version, "1.0");
        assert!(cli.mode.is_none());
        assert!(cli.max_depth.is_none());
        assert!(!cli.tree);
    }

    #[test]
    fn test_all_args() {
        let cli = Cli::try_parse_from([
            "depgraph",
            "--package",
            "App",
            "--package-version",
            "1.0",
            "--repository",
            "deps.txt",
            "--mode",
            "TEST",
            "--max-depth",
            "3",
            "--output",
            "graph.svg",
            "--tree",
            "--reverse",
            "lib",
            "--ascii",
            "--json",
            "--config",
            "cfg.yaml",
        ])
        .expect("parses");

        assert_eq!(cli.mode, Some(WorkingModeArg::Test));
        assert_eq!(cli.max_depth, Some(3));
        assert_eq!(cli.output, Some(PathBuf::from("graph.svg")));
        assert_eq!(cli.reverse.as_deref(), Some("lib"));
        assert!(cli.tree && cli.ascii && cli.json);
    }

    #[test]
    fn test_missing_root_fails() {
        assert!(Cli::try_parse_from(["depgraph", "-v", "1.0"]).is_err());
        assert!(Cli::try_parse_from(["depgraph", "-p", "App"]).is_err());
    }

    #[test]
    fn test_empty_root_fails() {
        assert!(Cli::try_parse_from(["depgraph", "-p", "", "-v", "1.0"]).is_err());
        assert!(Cli::try_parse_from(["depgraph", "-p", "App", "-v", " "]).is_err());
    }

    #[test]
    fn test_negative_depth_rejected() {
        assert!(Cli::try_parse_from(["depgraph", "-p", "App", "-v", "1.0", "-d", "-1"]).is_err());
    }
}

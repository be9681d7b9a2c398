//! Depgraph - transitive dependency graphs for NuGet packages.
//!
//! This crate provides both a CLI application and a library that expands a
//! package into its dependency graph and renders it as a tree, a
//! reverse-dependency index, Graphviz DOT and Mermaid text.
//!
//! # Example
//!
//! ```no_run
//! use depgraph::graph::build_graph;
//! use depgraph::source::FixtureSource;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let source = FixtureSource::new("deps.txt");
//!     let graph = build_graph("App", "1.0", Some(3), &source).await?;
//!     println!("{} packages", graph.len());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod render;
pub mod source;

// Public CLI module (needed by binary)
pub mod cli;

//! Output formatting for built graphs.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers
//! - [`dot`]: Graphviz DOT text
//! - [`mermaid`]: Mermaid flowchart text
//! - [`tree`]: ASCII/Unicode dependency tree
//! - [`graphviz`]: Running the external drawing tool
//!
//! Renderers only read the graph; any number of them can run on the same
//! build.

pub mod color;
pub mod dot;
pub mod graphviz;
pub mod mermaid;
pub mod tree;

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::PackageId;
use crate::error::{Error, Result};
use crate::graph::{DependencyGraph, ReverseLookup};

pub use color::{error, success, warning};
pub use graphviz::{Graphviz, ImageFormat};
pub use tree::{print_tree, write_dependents, write_tree};

/// Number of hex digits of the identity hash used in node ids.
pub(crate) const NODE_ID_HEX_LEN: usize = 12;

/// Node id shared by the DOT and Mermaid outputs.
///
/// `N` followed by a SHA-256 prefix of `name\0version`, so distinct
/// identities get distinct ids whatever characters they contain.
pub(crate) fn hashed_node_id(id: &PackageId) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.name.as_bytes());
    hasher.update([0u8]);
    hasher.update(id.version.as_bytes());
    let digest = hasher.finalize();

    let hex: String = digest
        .iter()
        .take(NODE_ID_HEX_LEN / 2)
        .map(|byte| format!("{byte:02x}"))
        .collect();
    format!("N{hex}")
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Configuration for terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use ASCII-only connectors instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(use_ascii: bool, use_colors: bool) -> Self {
        Self {
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `DEPGRAPH_ASCII`: Set to "1" or "true" for ASCII-only connectors (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `DEPGRAPH_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        let use_ascii = match env::var("DEPGRAPH_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "DEPGRAPH_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("DEPGRAPH_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// JSON Views
// ============================================================================

/// Serializable view of one package in the graph.
#[derive(Debug, Serialize)]
pub struct PackageView<'g> {
    /// Package name
    pub name: &'g str,
    /// Package version
    pub version: &'g str,
    /// Whether its dependencies were queried
    pub fully_resolved: bool,
    /// Direct dependencies, in discovery order
    pub dependencies: Vec<&'g PackageId>,
    /// Direct dependents
    pub dependents: Vec<&'g PackageId>,
}

/// Serializable view of a whole graph.
#[derive(Debug, Serialize)]
pub struct GraphView<'g> {
    /// Root package
    pub root: &'g PackageId,
    /// Every package, in discovery order
    pub packages: Vec<PackageView<'g>>,
    /// Dependency cycles
    pub cycles: Vec<Vec<&'g PackageId>>,
}

impl<'g> GraphView<'g> {
    /// Build the view for `graph`.
    pub fn new(graph: &'g DependencyGraph) -> Self {
        let packages = graph
            .iter()
            .map(|(id, node)| PackageView {
                name: &node.id().name,
                version: &node.id().version,
                fully_resolved: node.is_fully_resolved(),
                dependencies: graph.dependencies_of(id).map(|n| n.id()).collect(),
                dependents: graph.dependents_of(id).map(|n| n.id()).collect(),
            })
            .collect();
        let cycles = graph
            .cycles()
            .into_iter()
            .map(|cycle| cycle.into_iter().map(|n| graph.node(n).id()).collect())
            .collect();

        Self {
            root: graph.root_node().id(),
            packages,
            cycles,
        }
    }
}

/// Serializable view of a reverse-dependency lookup.
#[derive(Debug, Serialize)]
pub struct ReverseLookupView<'g> {
    /// Fragment that was searched for
    pub query: &'g str,
    /// Matching package, if any
    pub package: Option<&'g PackageId>,
    /// Its direct dependents
    pub dependents: Vec<&'g PackageId>,
}

impl<'g> ReverseLookupView<'g> {
    /// Build the view for a lookup result.
    pub fn new(
        graph: &'g DependencyGraph,
        query: &'g str,
        lookup: Option<&ReverseLookup<'g>>,
    ) -> Self {
        Self {
            query,
            package: lookup.map(|l| l.package.id()),
            dependents: lookup
                .map(|l| l.dependents.iter().map(|&d| graph.node(d).id()).collect())
                .unwrap_or_default(),
        }
    }
}

/// Print a value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

// ============================================================================
// Summary
// ============================================================================

/// Write a short text summary of a graph.
pub fn write_summary<W: Write>(
    w: &mut W,
    graph: &DependencyGraph,
    config: &OutputConfig,
) -> io::Result<()> {
    let cycles = graph.cycles();
    writeln!(
        w,
        "{} {}",
        color::bold("Root:", config),
        color::colorize_package(graph.root_node().id(), config)
    )?;
    writeln!(w, "  Packages: {}", graph.len())?;
    writeln!(w, "  Edges:    {}", graph.edge_count())?;
    if cycles.is_empty() {
        writeln!(w, "  Cycles:   0")?;
    } else {
        writeln!(w, "  Cycles:   {}", warning(&cycles.len().to_string(), config))?;
        for cycle in &cycles {
            let members: Vec<String> = cycle
                .iter()
                .map(|&n| graph.node(n).id().to_string())
                .collect();
            writeln!(w, "    {}", members.join(" <-> "))?;
        }
    }
    Ok(())
}

// ============================================================================
// File Artifacts
// ============================================================================

/// File names derived from the requested output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Image produced by the drawing tool
    pub image: PathBuf,
    /// DOT source fed to the drawing tool
    pub dot: PathBuf,
    /// Mermaid text
    pub mermaid: PathBuf,
}

impl ArtifactPaths {
    /// Derive artifact names from `output`.
    ///
    /// - image: `output` if it ends in `.png` or `.svg`, else `output.png`
    /// - DOT: the image name with `.dot` appended
    /// - Mermaid: `output` with its extension replaced by `.mermaid`
    pub fn for_output(output: &Path) -> Self {
        let has_image_ext = output
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png") || e.eq_ignore_ascii_case("svg"));

        let image = if has_image_ext {
            output.to_path_buf()
        } else {
            append_extension(output, "png")
        };
        let dot = append_extension(&image, "dot");
        let mermaid = output.with_extension("mermaid");

        Self {
            image,
            dot,
            mermaid,
        }
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Outcome of writing each artifact; failures do not stop the others.
#[derive(Debug)]
pub struct ArtifactReport {
    /// Paths that were targeted
    pub paths: ArtifactPaths,
    /// Writing the DOT file
    pub dot: Result<()>,
    /// Writing the Mermaid file
    pub mermaid: Result<()>,
    /// Running the drawing tool (skipped if the DOT file failed)
    pub image: Result<()>,
}

/// Write the DOT and Mermaid files for `graph` and draw the image.
pub async fn write_artifacts(
    graph: &DependencyGraph,
    output: &Path,
    graphviz: &Graphviz,
) -> ArtifactReport {
    let paths = ArtifactPaths::for_output(output);

    let dot = write_text(&paths.dot, &dot::render(graph)).await;
    let mermaid = write_text(&paths.mermaid, &mermaid::render(graph)).await;
    let image = match &dot {
        Ok(()) => graphviz.render(&paths.dot, &paths.image).await,
        Err(_) => Err(Error::Render(
            "skipped: DOT file was not written".to_string(),
        )),
    };

    ArtifactReport {
        paths,
        dot,
        mermaid,
        image,
    }
}

async fn write_text(path: &Path, content: &str) -> Result<()> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| Error::Render(format!("cannot write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "Wrote artifact");
    Ok(())
}

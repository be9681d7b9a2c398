//! Dependency tree rendering for `depgraph --tree` output.
//!
//! Renders a tree like:
//! ```text
//! ◆ App (1.0)
//! ├── Lib (2.0)
//! │   └── Util (1.0)
//! └── Util (1.0) (*)
//! ```
//!
//! A package is expanded the first time it is reached in depth-first order.
//! Every later occurrence is printed with the `(*)` repeat marker and not
//! expanded, which also breaks cycles.

use std::collections::HashSet;
use std::io::{self, Write};

use colored::Colorize;

use super::OutputConfig;
use super::color::{bold, colorize_package, dimmed, warning};
use crate::domain::NodeId;
use crate::graph::{DependencyGraph, ReverseLookup};

/// Marker printed after a package that was already expanded elsewhere.
pub const REPEAT_MARKER: &str = "(*)";

struct Frame {
    node: NodeId,
    /// For each ancestor level, whether it still has siblings below.
    segments: Vec<bool>,
    is_last: bool,
}

/// Write the dependency tree of `graph`, starting at its root.
pub fn write_tree<W: Write>(
    w: &mut W,
    graph: &DependencyGraph,
    config: &OutputConfig,
) -> io::Result<()> {
    let (branch, corner, pipe, space) = if config.use_ascii {
        ("|-- ", "`-- ", "|   ", "    ")
    } else {
        ("├── ", "└── ", "│   ", "    ")
    };

    let root_icon = if config.use_ascii { "*" } else { "◆" };
    let root_icon_str = if config.use_colors {
        root_icon.cyan().bold().to_string()
    } else {
        root_icon.to_string()
    };
    writeln!(
        w,
        "{} {}",
        root_icon_str,
        colorize_package(graph.root_node().id(), config)
    )?;

    let mut visited = HashSet::from([graph.root()]);
    let mut stack = Vec::new();
    push_children(&mut stack, graph, graph.root(), &[]);

    while let Some(frame) = stack.pop() {
        let mut prefix = String::new();
        for &has_more in &frame.segments {
            prefix.push_str(&dimmed(if has_more { pipe } else { space }, config));
        }
        let connector = dimmed(if frame.is_last { corner } else { branch }, config);
        let package = colorize_package(graph.node(frame.node).id(), config);

        if !visited.insert(frame.node) {
            writeln!(
                w,
                "{prefix}{connector}{package} {}",
                warning(REPEAT_MARKER, config)
            )?;
            continue;
        }

        writeln!(w, "{prefix}{connector}{package}")?;

        let mut segments = frame.segments;
        segments.push(!frame.is_last);
        push_children(&mut stack, graph, frame.node, &segments);
    }

    Ok(())
}

/// Push the children of `node` so that the first child is popped first.
fn push_children(stack: &mut Vec<Frame>, graph: &DependencyGraph, node: NodeId, segments: &[bool]) {
    let children = graph.node(node).dependencies();
    for (i, &child) in children.iter().enumerate().rev() {
        stack.push(Frame {
            node: child,
            segments: segments.to_vec(),
            is_last: i == children.len() - 1,
        });
    }
}

/// Print the tree to stdout.
pub fn print_tree(graph: &DependencyGraph, config: &OutputConfig) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_tree(&mut handle, graph, config)
}

/// Write the "depended on by" section for a reverse-dependency lookup.
pub fn write_dependents<W: Write>(
    w: &mut W,
    graph: &DependencyGraph,
    lookup: &ReverseLookup<'_>,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {} ({}):",
        bold("Depended on by", config),
        colorize_package(lookup.package.id(), config),
        lookup.dependents.len()
    )?;

    if lookup.dependents.is_empty() {
        writeln!(w, "  {}", dimmed("(nothing - this is the root)", config))?;
        return Ok(());
    }

    let (branch, corner) = if config.use_ascii {
        ("|-- ", "`-- ")
    } else {
        ("├── ", "└── ")
    };
    let last = lookup.dependents.len() - 1;
    for (i, &dependent) in lookup.dependents.iter().enumerate() {
        let connector = if i == last { corner } else { branch };
        writeln!(
            w,
            "  {}{}",
            dimmed(connector, config),
            colorize_package(graph.node(dependent).id(), config)
        )?;
    }

    Ok(())
}

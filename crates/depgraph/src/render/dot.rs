//! Graphviz DOT output.

use std::collections::HashSet;

use super::hashed_node_id;
use crate::domain::PackageId;
use crate::graph::DependencyGraph;

/// Stable DOT identifier for a package.
///
/// The hashed identity shared with the Mermaid output; the readable name and
/// version go in the node label.
pub fn node_id(id: &PackageId) -> String {
    hashed_node_id(id)
}

fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the graph as a DOT digraph.
///
/// Each package is declared once, in discovery order, followed by its
/// outgoing edges. Repeated edges between the same two packages are drawn
/// once.
pub fn render(graph: &DependencyGraph) -> String {
    let mut out = String::new();
    let mut drawn = HashSet::new();

    out.push_str("digraph DependencyGraph {\n");
    out.push_str("    rankdir=TB;\n");
    out.push_str(
        "    node [shape=box, style=\"filled,rounded\", color=\"#333333\", fillcolor=\"#EBEBEB\", fontname=\"Helvetica\"];\n",
    );
    out.push_str("    edge [color=\"#888888\"];\n\n");

    for (id, node) in graph.iter() {
        let from = node_id(node.id());
        out.push_str(&format!(
            "    \"{from}\" [label=\"{}\\n({})\"];\n",
            escape_label(&node.id().name),
            escape_label(&node.id().version)
        ));
        for &dep in node.dependencies() {
            if drawn.insert((id, dep)) {
                out.push_str(&format!(
                    "    \"{from}\" -> \"{}\";\n",
                    node_id(graph.node(dep).id())
                ));
            }
        }
    }

    out.push_str("}\n");
    out
}

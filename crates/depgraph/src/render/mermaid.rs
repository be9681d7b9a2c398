//! Mermaid flowchart output.

use std::collections::HashSet;

use super::hashed_node_id;
use crate::domain::PackageId;
use crate::graph::DependencyGraph;

/// Stable Mermaid identifier for a package.
///
/// Mermaid ids cannot contain dots or dashes, so the id is the hashed
/// identity shared with the DOT output.
pub fn node_id(id: &PackageId) -> String {
    hashed_node_id(id)
}

fn escape_label(text: &str) -> String {
    text.replace('"', "#quot;")
}

/// Render the graph as a top-down Mermaid flowchart.
pub fn render(graph: &DependencyGraph) -> String {
    let mut out = String::from("graph TD\n");
    out.push_str("    classDef default fill:#f9f9f9,stroke:#333,stroke-width:1px;\n");

    for (_, node) in graph.iter() {
        out.push_str(&format!(
            "    {}[\"{}<br/>({})\"]\n",
            node_id(node.id()),
            escape_label(&node.id().name),
            escape_label(&node.id().version)
        ));
    }

    let mut drawn = HashSet::new();
    for (id, node) in graph.iter() {
        for &dep in node.dependencies() {
            if drawn.insert((id, dep)) {
                out.push_str(&format!(
                    "    {} --> {}\n",
                    node_id(node.id()),
                    node_id(graph.node(dep).id())
                ));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::render::NODE_ID_HEX_LEN;
    use crate::source::InMemorySource;

    #[test]
    fn test_node_id_is_stable_and_distinct() {
        let a = PackageId::new("Lib", "1.0");
        assert_eq!(node_id(&a), node_id(&PackageId::new("Lib", "1.0")));
        assert_ne!(node_id(&a), node_id(&PackageId::new("Lib", "1.1")));
        assert_ne!(
            node_id(&PackageId::new("ab", "c")),
            node_id(&PackageId::new("a", "bc"))
        );

        let id = node_id(&a);
        assert_eq!(id.len(), NODE_ID_HEX_LEN + 1);
        assert!(id.starts_with('N'));
        assert!(id[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_render_nodes_and_edges() {
        let app = PackageId::new("App", "1.0");
        let lib = PackageId::new("Lib", "2.0");
        let util = PackageId::new("Util", "1.0");
        let source = InMemorySource::new()
            .with_dependencies(app.clone(), [lib.clone(), util.clone()])
            .with_dependencies(lib.clone(), [util.clone()]);
        let graph = GraphBuilder::new(&source).build(app.clone()).await;

        let mermaid = render(&graph);
        assert!(mermaid.starts_with("graph TD\n"));
        assert_eq!(mermaid.matches("<br/>").count(), 3);
        assert_eq!(mermaid.matches(" --> ").count(), 3);
        assert!(mermaid.contains(&format!("{} --> {}", node_id(&lib), node_id(&util))));
        assert!(mermaid.contains(&format!("{}[\"App<br/>(1.0)\"]", node_id(&app))));
    }
}

//! Graph-description (dot) rendering.
//!
//! One style statement per node, one edge statement per edge, wrapped in a
//! fixed header that declares a legend cluster with a swatch for every
//! category plus the dashed covered-by-story marker.

use std::fmt::Write;

use crate::graph::{Graph, MigrationCategory, NodeKind};

/// Serialize the graph to dot text.
pub fn render(graph: &Graph) -> String {
    let mut output = String::new();
    output.push_str("digraph MigrationMap {\n");
    output.push_str("  subgraph cluster_legend {\n");
    for category in MigrationCategory::ALL {
        let _ = writeln!(
            output,
            "    {} [style=filled, fillcolor=\"{}\"] ;",
            category.legend_label(),
            category.fill_color()
        );
    }
    output.push_str("    has_a_story [style=\"filled,dashed\" fillcolor=\"white\"] ;\n");
    output.push_str("  }\n");

    for node in graph.nodes.values() {
        let shape = match node.kind {
            NodeKind::Service => "ellipse",
            NodeKind::Repository => "box",
        };
        let line_style = if node.covered_by_story { "dashed" } else { "solid" };
        let _ = writeln!(
            output,
            "  {} [ fillcolor=\"{}\" style=\"filled,{}\" shape={} ]",
            node.name,
            node.category.fill_color(),
            line_style,
            shape
        );
    }

    for edge in &graph.edges {
        let _ = writeln!(output, "  {} -> {}", edge.from, edge.to);
    }

    output.push_str("}\n");
    output
}

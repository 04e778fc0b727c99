//! Structured-data rendering: the graph value itself as a JSON document
//! with top-level `nodes` and `edges` keys.

use crate::error::Result;
use crate::graph::Graph;

/// Serialize the graph as a pretty-printed JSON document.
pub fn to_string(graph: &Graph) -> Result<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Parse a JSON document back into a graph. Inverse of [`to_string`].
pub fn from_str(document: &str) -> Result<Graph> {
    Ok(serde_json::from_str(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, MigrationCategory, Node, NodeKind};
    use std::collections::BTreeMap;

    fn sample_graph() -> Graph {
        let nodes: BTreeMap<String, Node> = [(
            "FooRepository".to_string(),
            Node {
                name: "FooRepository".to_string(),
                category: MigrationCategory::MigrationCandidate,
                kind: NodeKind::Repository,
                covered_by_story: true,
            },
        )]
        .into_iter()
        .collect();
        let edges = vec![Edge {
            from: "AlphaService".to_string(),
            to: "FooRepository".to_string(),
        }];
        Graph::assemble(nodes, edges)
    }

    #[test]
    fn test_document_shape() {
        let document = to_string(&sample_graph()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&document).unwrap();

        assert!(value["nodes"].is_object());
        assert!(value["edges"].is_array());
        assert_eq!(
            value["nodes"]["FooRepository"]["category"],
            "migration-candidate"
        );
        assert_eq!(value["nodes"]["FooRepository"]["kind"], "repository");
        assert_eq!(value["nodes"]["FooRepository"]["coveredByStory"], true);
        assert_eq!(value["edges"][0]["from"], "AlphaService");
    }

    #[test]
    fn test_round_trip_reproduces_equal_graph() {
        let graph = sample_graph();
        let document = to_string(&graph).unwrap();
        let parsed = from_str(&document).unwrap();
        assert_eq!(graph, parsed);
    }
}

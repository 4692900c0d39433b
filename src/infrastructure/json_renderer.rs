//! JSON exporter: nodes, labelled edges, and positions as one document.

use crate::domain::error::Result;
use crate::domain::graph::{RelationGraph, Relationship};
use crate::domain::layout::PositionMap;
use crate::ports::GraphRenderer;
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonEdge<'a> {
    from: &'a str,
    to: &'a str,
    relationship: Relationship,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    nodes: Vec<&'a str>,
    edges: Vec<JsonEdge<'a>>,
    positions: &'a PositionMap,
}

impl GraphRenderer for JsonRenderer {
    fn render(&self, graph: &RelationGraph, positions: &PositionMap) -> Result<String> {
        let mut edges: Vec<_> = graph.edges().collect();
        edges.sort_unstable();
        let document = JsonDocument {
            nodes: graph.sorted_nodes(),
            edges: edges
                .into_iter()
                .map(|(from, to, relationship)| JsonEdge {
                    from,
                    to,
                    relationship,
                })
                .collect(),
            positions,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

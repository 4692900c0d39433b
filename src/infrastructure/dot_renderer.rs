//! DOT exporter for relationship graphs.

use crate::domain::error::Result;
use crate::domain::graph::RelationGraph;
use crate::domain::layout::PositionMap;
use crate::ports::GraphRenderer;

pub struct DotRenderer;

impl GraphRenderer for DotRenderer {
    fn render(&self, graph: &RelationGraph, positions: &PositionMap) -> Result<String> {
        let mut out = String::from("digraph docgraph {\n");
        for node in graph.sorted_nodes() {
            match positions.get(node) {
                Some([x, y]) => out.push_str(&format!(
                    "    {node:?} [pos=\"{x:.3},{y:.3}!\"];\n"
                )),
                None => out.push_str(&format!("    {node:?};\n")),
            }
        }
        let mut edges: Vec<_> = graph.edges().collect();
        edges.sort_unstable();
        for (from, to, relationship) in edges {
            out.push_str(&format!(
                "    {from:?} -> {to:?} [label=\"{}\"];\n",
                relationship.as_str()
            ));
        }
        out.push_str("}\n");
        Ok(out)
    }

    fn extension(&self) -> &'static str {
        "dot"
    }
}

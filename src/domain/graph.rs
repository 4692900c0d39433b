//! Relationship graph: edge generation from the document model and a
//! petgraph-backed directed multigraph.

use crate::domain::docmodel::{DocEntry, DocModel};
use crate::domain::seealso::FieldKind;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Placeholder parent label for the traversal root. Never a real node.
pub const ROOT: &str = "";

/// Edge label in the relationship graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relationship {
    Calls,
    CalledBy,
    Related,
    Contains,
}

impl From<FieldKind> for Relationship {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Calls => Relationship::Calls,
            FieldKind::CalledBy => Relationship::CalledBy,
            FieldKind::Related => Relationship::Related,
        }
    }
}

impl Relationship {
    pub fn as_str(self) -> &'static str {
        match self {
            Relationship::Calls => "CALLS",
            Relationship::CalledBy => "CALLED_BY",
            Relationship::Related => "RELATED",
            Relationship::Contains => "CONTAINS",
        }
    }
}

/// (source, target, relationship) triple.
pub type Edge = (String, String, Relationship);

/// Flatten a document model into relationship edges.
///
/// Keys are visited in sorted order. Docstring and position entries are
/// skipped; a field entry emits one `(parent, target, field)` edge per
/// target, including the reserved empty-string target of an empty
/// declaration; a function entry emits `(parent, name, CONTAINS)` and is
/// then visited with the function as the new parent. The root call uses the
/// empty-string placeholder parent. Re-invokable: each call walks the model
/// from scratch.
pub fn generate_edges(model: &DocModel) -> Vec<Edge> {
    let mut edges = Vec::new();
    collect_edges(model.entries(), ROOT, &mut edges);
    edges
}

fn collect_edges(map: &BTreeMap<String, DocEntry>, parent: &str, edges: &mut Vec<Edge>) {
    for (key, entry) in map {
        match entry {
            DocEntry::Docstring(_) | DocEntry::Position { .. } => {}
            DocEntry::Field(kind, targets) => {
                for target in targets {
                    edges.push((parent.to_string(), target.clone(), (*kind).into()));
                }
            }
            DocEntry::Function(sub) => {
                edges.push((parent.to_string(), key.clone(), Relationship::Contains));
                collect_edges(sub, key, edges);
            }
        }
    }
}

/// Directed multigraph over function names. Parallel edges between the same
/// node pair and self-loops are both allowed.
#[derive(Debug, Default)]
pub struct RelationGraph {
    graph: DiGraph<String, Relationship>,
    indices: HashMap<String, NodeIndex>,
}

impl RelationGraph {
    /// Build the graph from a document model and drop the placeholder root.
    pub fn from_model(model: &DocModel) -> Self {
        let mut graph = Self::default();
        for (from, to, relationship) in generate_edges(model) {
            graph.add_edge(&from, &to, relationship);
        }
        graph.remove_node(ROOT);
        graph
    }

    fn ensure_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.indices.insert(label.to_string(), idx);
        idx
    }

    pub fn add_edge(&mut self, from: &str, to: &str, relationship: Relationship) {
        let a = self.ensure_node(from);
        let b = self.ensure_node(to);
        self.graph.add_edge(a, b, relationship);
    }

    /// Remove a node and all edges touching it. Removing an absent node is a
    /// no-op.
    pub fn remove_node(&mut self, label: &str) {
        if let Some(idx) = self.indices.remove(label) {
            self.graph.remove_node(idx);
            // petgraph swaps the last node into the freed index
            self.indices = self
                .graph
                .node_indices()
                .map(|i| (self.graph[i].clone(), i))
                .collect();
        }
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.indices.contains_key(label)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node labels in sorted order.
    pub fn sorted_nodes(&self) -> Vec<&str> {
        let mut nodes: Vec<&str> = self
            .graph
            .node_indices()
            .map(|i| self.graph[i].as_str())
            .collect();
        nodes.sort_unstable();
        nodes
    }

    /// All edges as (source label, target label, relationship).
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, Relationship)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
                *e.weight(),
            )
        })
    }
}

use crate::domain::docmodel::ParsedSource;
use crate::domain::error::Result;
use crate::domain::graph::RelationGraph;
use crate::domain::layout::PositionMap;
use std::path::Path;

/// Syntax-tree parser: yields the module docstring plus, per function, a
/// name, 1-based start line, 0-based start column, and doc text.
pub trait SourceParser {
    fn parse_file(&self, path: &Path) -> Result<ParsedSource>;
    fn parse_source(&self, src: &str) -> Result<ParsedSource>;
}

/// Rendering backend: consumes a graph and a coordinate map and produces a
/// rendered document.
pub trait GraphRenderer {
    fn render(&self, graph: &RelationGraph, positions: &PositionMap) -> Result<String>;
    /// File extension for rendered output (e.g. "svg").
    fn extension(&self) -> &'static str;
}

// Infrastructure adapters for docgraph.

mod dot_renderer;
mod json_renderer;
mod svg_renderer;
mod syn_parser;

pub use dot_renderer::DotRenderer;
pub use json_renderer::JsonRenderer;
pub use svg_renderer::SvgRenderer;
pub use syn_parser::SynSourceParser;

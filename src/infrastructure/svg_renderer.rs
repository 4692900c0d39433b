//! SVG renderer: nodes as labelled circles, edges as arrows colored per
//! relationship.

use crate::domain::error::Result;
use crate::domain::graph::{RelationGraph, Relationship};
use crate::domain::layout::PositionMap;
use crate::ports::GraphRenderer;

pub struct SvgRenderer {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 60.0,
        }
    }
}

const NODE_RADIUS: f64 = 14.0;
const NODE_FILL: &str = "#f5f5f5";
const NODE_STROKE: &str = "#333333";
const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE: f64 = 12.0;

fn edge_color(relationship: Relationship) -> &'static str {
    match relationship {
        Relationship::Calls => "#1f77b4",
        Relationship::CalledBy => "#2ca02c",
        Relationship::Related => "#7f7f7f",
        Relationship::Contains => "#9467bd",
    }
}

impl SvgRenderer {
    /// Map unit-square coordinates to pixels. The layout's origin is the
    /// lower left; SVG's is the upper left, so y is flipped.
    fn to_pixels(&self, coords: [f64; 2]) -> (f64, f64) {
        let x = self.margin + coords[0] * (self.width - 2.0 * self.margin);
        let y = self.margin + (1.0 - coords[1]) * (self.height - 2.0 * self.margin);
        (x, y)
    }
}

impl GraphRenderer for SvgRenderer {
    fn render(&self, graph: &RelationGraph, positions: &PositionMap) -> Result<String> {
        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
            self.width, self.height, self.width, self.height
        ));
        svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");
        svg.push_str("<defs>");
        svg.push_str(
            "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" \
             markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\">\
             <path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"#333333\"/></marker>",
        );
        svg.push_str("</defs>");

        // Edges first so nodes draw on top.
        let mut edges: Vec<_> = graph.edges().collect();
        edges.sort_unstable();
        for (from, to, relationship) in edges {
            let (Some(&a), Some(&b)) = (positions.get(from), positions.get(to)) else {
                continue;
            };
            let (x1, y1) = self.to_pixels(a);
            let (x2, y2) = self.to_pixels(b);
            let color = edge_color(relationship);
            if from == to {
                // Self-loop: a small arc beside the node.
                svg.push_str(&format!(
                    "<path d=\"M {:.1} {:.1} C {:.1} {:.1}, {:.1} {:.1}, {:.1} {:.1}\" \
                     fill=\"none\" stroke=\"{color}\" stroke-width=\"1.5\" marker-end=\"url(#arrow)\"/>",
                    x1 + NODE_RADIUS,
                    y1,
                    x1 + 3.0 * NODE_RADIUS,
                    y1 - 2.0 * NODE_RADIUS,
                    x1 + 3.0 * NODE_RADIUS,
                    y1 + 2.0 * NODE_RADIUS,
                    x1 + NODE_RADIUS,
                    y1
                ));
            } else {
                svg.push_str(&format!(
                    "<line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" \
                     stroke=\"{color}\" stroke-width=\"1.5\" marker-end=\"url(#arrow)\"/>"
                ));
            }
        }

        for node in graph.sorted_nodes() {
            let Some(&coords) = positions.get(node) else {
                continue;
            };
            let (x, y) = self.to_pixels(coords);
            svg.push_str(&format!(
                "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"{NODE_RADIUS}\" \
                 fill=\"{NODE_FILL}\" stroke=\"{NODE_STROKE}\"/>"
            ));
            svg.push_str(&format!(
                "<text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\" \
                 font-family=\"{FONT_FAMILY}\" font-size=\"{FONT_SIZE}\" fill=\"{NODE_STROKE}\">{}</text>",
                y + NODE_RADIUS + FONT_SIZE,
                escape_xml(node)
            ));
        }

        // Legend: one line per relationship kind.
        for (i, relationship) in [
            Relationship::Calls,
            Relationship::CalledBy,
            Relationship::Related,
            Relationship::Contains,
        ]
        .into_iter()
        .enumerate()
        {
            let y = 20.0 + i as f64 * 16.0;
            svg.push_str(&format!(
                "<line x1=\"10\" y1=\"{y:.1}\" x2=\"34\" y2=\"{y:.1}\" \
                 stroke=\"{}\" stroke-width=\"2\"/>",
                edge_color(relationship)
            ));
            svg.push_str(&format!(
                "<text x=\"40\" y=\"{:.1}\" font-family=\"{FONT_FAMILY}\" \
                 font-size=\"10\" fill=\"{NODE_STROKE}\">{}</text>",
                y + 3.0,
                relationship.as_str()
            ));
        }

        svg.push_str("</svg>");
        Ok(svg)
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

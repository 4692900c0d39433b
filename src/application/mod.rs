//! Use cases wiring the parser and renderer ports to the domain pipeline.

use crate::domain::docmodel::DocModel;
use crate::domain::error::Result;
use crate::domain::graph::RelationGraph;
use crate::domain::layout::{self, PositionMap};
use crate::ports::{GraphRenderer, SourceParser};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Options for the plot step.
#[derive(Debug, Clone, Default)]
pub struct PlotOptions {
    /// Nodes to anchor in a force-directed layout. Overrides `positions`.
    pub fixed: Vec<String>,
    /// Precomputed coordinates, used when `fixed` is empty.
    pub positions: Option<PositionMap>,
    /// Open the rendered file with the platform viewer.
    pub show: bool,
    /// Where to write the rendering. A temp-dir path is used when absent and
    /// `show` is set.
    pub output: Option<PathBuf>,
}

pub struct PlotUsecase<'a> {
    pub parser: &'a dyn SourceParser,
    pub renderer: &'a dyn GraphRenderer,
}

impl PlotUsecase<'_> {
    /// Full pipeline: parse the file, build the graph, compute positions,
    /// render. Returns the document model for callers that want to inspect
    /// it afterwards.
    ///
    /// Rank positions are always computed when the caller supplied none;
    /// with `fixed` nodes they become the seed of the anchored layout (and
    /// trigger the override warning in [`plot_graph`]).
    pub fn run(&self, input: &Path, mut opts: PlotOptions) -> Result<DocModel> {
        let model = self.build_model(input)?;
        let graph = RelationGraph::from_model(&model);
        if opts.positions.is_none() {
            opts.positions = Some(layout::rank_positions(&model, &graph));
        }
        plot_graph(self.renderer, &graph, &opts)?;
        Ok(model)
    }

    /// Parse a file into its document model without plotting.
    pub fn build_model(&self, input: &Path) -> Result<DocModel> {
        let source = self.parser.parse_file(input)?;
        DocModel::from_source(&source)
    }
}

/// Render a graph and write/show it per `opts`.
///
/// `fixed` wins over `positions`: when both are given a warning is logged
/// and the supplied positions only seed the anchored layout. The file is
/// written before any viewer is opened.
pub fn plot_graph(
    renderer: &dyn GraphRenderer,
    graph: &RelationGraph,
    opts: &PlotOptions,
) -> Result<()> {
    let positions = if !opts.fixed.is_empty() {
        if opts.positions.is_some() {
            log::warn!("`fixed` overrides `positions`: fixed = {:?}", opts.fixed);
        }
        layout::spring_layout(graph, &opts.fixed, opts.positions.as_ref())
    } else if let Some(positions) = &opts.positions {
        positions.clone()
    } else {
        layout::spring_layout(graph, &[], None)
    };

    let rendered = renderer.render(graph, &positions)?;

    let target = match (&opts.output, opts.show) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => {
            Some(std::env::temp_dir().join(format!("docgraph.{}", renderer.extension())))
        }
        (None, false) => None,
    };
    if let Some(path) = &target {
        std::fs::write(path, &rendered)?;
        log::info!("wrote rendering to {}", path.display());
    }
    if opts.show {
        if let Some(path) = &target {
            open_viewer(path)?;
        }
    }
    Ok(())
}

fn open_viewer(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(not(target_os = "macos"))]
    let opener = "xdg-open";
    Command::new(opener).arg(path).spawn()?;
    Ok(())
}

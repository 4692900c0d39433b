// Command-line entry point for docgraph.

use clap::Parser;
use docgraph::application::{PlotOptions, PlotUsecase};
use docgraph::infrastructure::{DotRenderer, JsonRenderer, SvgRenderer, SynSourceParser};
use docgraph::ports::GraphRenderer;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input Rust source file
    #[arg(short, long)]
    input: String,

    /// Output file path
    #[arg(short, long)]
    output: Option<String>,

    /// Output format (svg, dot, json)
    #[arg(short, long, default_value = "svg")]
    format: String,

    /// Node(s) to anchor in a force-directed layout; overrides the
    /// position-derived layout
    #[arg(long)]
    fixed: Vec<String>,

    /// Open the rendering with the platform viewer
    #[arg(long)]
    show: bool,

    /// Pretty-print the document model to stdout
    #[arg(long)]
    print_model: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let renderer: Box<dyn GraphRenderer> = match cli.format.as_str() {
        "svg" => Box::new(SvgRenderer::default()),
        "dot" => Box::new(DotRenderer),
        "json" => Box::new(JsonRenderer),
        other => anyhow::bail!("unsupported format: {other} (expected svg, dot, or json)"),
    };

    let usecase = PlotUsecase {
        parser: &SynSourceParser,
        renderer: renderer.as_ref(),
    };
    let opts = PlotOptions {
        fixed: cli.fixed,
        positions: None,
        show: cli.show,
        output: cli.output.as_ref().map(PathBuf::from),
    };
    let model = usecase.run(Path::new(&cli.input), opts)?;

    if cli.print_model {
        model.pretty_print(&mut std::io::stdout())?;
    }
    if let Some(output) = &cli.output {
        println!("Rendering written to {} (format: {})", output, cli.format);
    }
    Ok(())
}

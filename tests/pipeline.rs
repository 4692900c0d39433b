use docgraph::application::{plot_graph, PlotOptions, PlotUsecase};
use docgraph::domain::graph::{RelationGraph, Relationship};
use docgraph::domain::layout;
use docgraph::domain::seealso::FieldKind;
use docgraph::infrastructure::{DotRenderer, JsonRenderer, SvgRenderer, SynSourceParser};
use docgraph::ports::SourceParser;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

const SAMPLE: &str = "\
//! Sample module.
//!
//! See Also
//! --------
//! RELATED : {}

/// Alpha.
///
/// See Also
/// --------
/// CALLS : {}
/// CALLED_BY : {}
/// RELATED : {beta}
fn alpha() {}
";

fn write_sample(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn round_trip_from_file_to_graph_and_positions() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir, "sample.rs", SAMPLE);

    let usecase = PlotUsecase {
        parser: &SynSourceParser,
        renderer: &DotRenderer,
    };
    let model = usecase.build_model(&path).unwrap();

    // Document model: module docstring plus one entry for `alpha`.
    assert!(model.docstring().is_some());
    let alpha = model.function("alpha").expect("alpha entry");
    let related: Vec<&String> = match alpha.get("RELATED") {
        Some(docgraph::domain::docmodel::DocEntry::Field(FieldKind::Related, targets)) => {
            targets.iter().collect()
        }
        other => panic!("unexpected RELATED entry: {other:?}"),
    };
    assert_eq!(related, vec!["beta"]);

    // Graph: the root and its CONTAINS edge are gone; alpha -> beta RELATED
    // is the only edge left.
    let graph = RelationGraph::from_model(&model);
    assert_eq!(graph.sorted_nodes(), vec!["alpha", "beta"]);
    let edges: Vec<_> = graph.edges().collect();
    assert_eq!(edges, vec![("alpha", "beta", Relationship::Related)]);

    // Positions: beta is synthetic (no declared lineno) and sits strictly
    // below alpha; both coordinates stay in the unit square.
    let positions = layout::rank_positions(&model, &graph);
    assert_eq!(positions.len(), 2);
    assert!(positions["beta"][1] < positions["alpha"][1]);
    for coords in positions.values() {
        assert!((0.0..=1.0).contains(&coords[0]));
        assert!((0.0..=1.0).contains(&coords[1]));
    }
}

#[test]
fn parsing_twice_yields_structurally_equal_models() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir, "sample.rs", SAMPLE);

    let usecase = PlotUsecase {
        parser: &SynSourceParser,
        renderer: &DotRenderer,
    };
    let first = usecase.build_model(&path).unwrap();
    let second = usecase.build_model(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn run_writes_a_rendering_for_each_format() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir, "sample.rs", SAMPLE);

    let svg_out = dir.path().join("graph.svg");
    PlotUsecase {
        parser: &SynSourceParser,
        renderer: &SvgRenderer::default(),
    }
    .run(
        &input,
        PlotOptions {
            output: Some(svg_out.clone()),
            ..PlotOptions::default()
        },
    )
    .unwrap();
    let svg = fs::read_to_string(&svg_out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">alpha</text>"));
    assert!(svg.contains(">beta</text>"));

    let dot_out = dir.path().join("graph.dot");
    PlotUsecase {
        parser: &SynSourceParser,
        renderer: &DotRenderer,
    }
    .run(
        &input,
        PlotOptions {
            output: Some(dot_out.clone()),
            ..PlotOptions::default()
        },
    )
    .unwrap();
    let dot = fs::read_to_string(&dot_out).unwrap();
    assert!(dot.contains("\"alpha\" -> \"beta\" [label=\"RELATED\"];"));

    let json_out = dir.path().join("graph.json");
    PlotUsecase {
        parser: &SynSourceParser,
        renderer: &JsonRenderer,
    }
    .run(
        &input,
        PlotOptions {
            output: Some(json_out.clone()),
            ..PlotOptions::default()
        },
    )
    .unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    assert_eq!(value["nodes"], serde_json::json!(["alpha", "beta"]));
    assert_eq!(value["edges"][0]["relationship"], "RELATED");
}

#[test]
fn fixed_nodes_anchor_at_their_rank_position_seed() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir, "sample.rs", SAMPLE);
    let out = dir.path().join("anchored.json");

    // `run` always computes rank positions; with `fixed` they seed the
    // anchored layout, so alpha must stay at its rank coordinates.
    PlotUsecase {
        parser: &SynSourceParser,
        renderer: &JsonRenderer,
    }
    .run(
        &input,
        PlotOptions {
            fixed: vec!["alpha".to_string()],
            output: Some(out.clone()),
            ..PlotOptions::default()
        },
    )
    .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["positions"]["alpha"], serde_json::json!([0.5, 1.0]));
    assert_ne!(value["positions"]["beta"], serde_json::json!([1.0, 0.5]));
}

#[test]
fn fixed_overrides_supplied_positions_and_still_renders() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir, "sample.rs", SAMPLE);
    let out = dir.path().join("conflict.json");

    let usecase = PlotUsecase {
        parser: &SynSourceParser,
        renderer: &JsonRenderer,
    };
    let model = usecase.build_model(&input).unwrap();
    let graph = RelationGraph::from_model(&model);
    let supplied = layout::rank_positions(&model, &graph);

    // Both `fixed` and `positions` given: the override warning fires and the
    // supplied coordinates only seed the anchored layout.
    plot_graph(
        &JsonRenderer,
        &graph,
        &PlotOptions {
            fixed: vec!["alpha".to_string()],
            positions: Some(supplied.clone()),
            output: Some(out.clone()),
            ..PlotOptions::default()
        },
    )
    .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        value["positions"]["alpha"],
        serde_json::json!(supplied["alpha"]),
        "anchored node keeps its supplied coordinates"
    );
    assert_ne!(
        value["positions"]["beta"],
        serde_json::json!(supplied["beta"]),
        "free node is re-laid out"
    );
}

#[test]
fn duplicate_function_names_keep_the_last_definition() {
    let src = "\
fn dup() {}

mod inner {
    /// Second dup.
    ///
    /// See Also
    /// --------
    /// CALLS : {winner}
    fn dup() {}
}
";
    let parsed = SynSourceParser.parse_source(src).unwrap();
    let model = docgraph::domain::docmodel::DocModel::from_source(&parsed).unwrap();
    let dup = model.function("dup").expect("dup entry");
    assert!(dup.get("CALLS").is_some(), "last definition's fields win");

    let graph = RelationGraph::from_model(&model);
    assert!(graph.contains_node("winner"));
}

#[test]
fn file_with_no_relationships_renders_without_error() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir, "plain.rs", "fn lonely() {}\n");
    let out = dir.path().join("plain.svg");

    PlotUsecase {
        parser: &SynSourceParser,
        renderer: &SvgRenderer::default(),
    }
    .run(
        &input,
        PlotOptions {
            output: Some(out.clone()),
            ..PlotOptions::default()
        },
    )
    .unwrap();
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(">lonely</text>"));
}

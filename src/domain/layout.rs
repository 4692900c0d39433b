//! Node layout: rank-percentile positions from source coordinates, and a
//! deterministic force-directed layout for anchored plots.

use crate::domain::docmodel::{DocEntry, DocModel, POSITION_KEY};
use crate::domain::graph::RelationGraph;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Node label to `[x, y]` coordinates in the unit square.
pub type PositionMap = BTreeMap<String, [f64; 2]>;

/// Raw (lineno, col_offset) per function, in sorted traversal order.
fn collect_raw_positions(model: &DocModel, rows: &mut Vec<(String, f64, f64)>) {
    collect_from(model.entries(), rows);
}

fn collect_from(map: &BTreeMap<String, DocEntry>, rows: &mut Vec<(String, f64, f64)>) {
    for (key, entry) in map {
        match entry {
            DocEntry::Function(sub) => {
                if let Some(DocEntry::Position { lineno, col_offset }) = sub.get(POSITION_KEY) {
                    rows.push((key.clone(), f64::from(*lineno), f64::from(*col_offset)));
                }
                collect_from(sub, rows);
            }
            _ => {}
        }
    }
}

/// Compute layout coordinates for every node in the graph.
///
/// Functions contribute their declared (lineno, col_offset); nodes present
/// only through relationships get a synthetic line number one past the
/// current maximum (incremented per node, assigned in sorted name order) and
/// column 0. Both columns are then converted to descending rank percentiles
/// in (0, 1]: x from the column rank, y from the line rank, so earlier lines
/// plot nearer the top of the unit square.
pub fn rank_positions(model: &DocModel, graph: &RelationGraph) -> PositionMap {
    let mut rows: Vec<(String, f64, f64)> = Vec::new();
    collect_raw_positions(model, &mut rows);

    let placed: BTreeSet<String> = rows.iter().map(|(name, _, _)| name.clone()).collect();
    let mut lineno_max = rows.iter().map(|(_, lineno, _)| *lineno).fold(0.0, f64::max);
    for node in graph.sorted_nodes() {
        if !placed.contains(node) {
            lineno_max += 1.0;
            rows.push((node.to_string(), lineno_max, 0.0));
        }
    }

    // Ascending (lineno, col_offset, name) order defines the input order for
    // the stable descending ranks below.
    rows.sort_by(|a, b| {
        a.1.total_cmp(&b.1)
            .then(a.2.total_cmp(&b.2))
            .then(a.0.cmp(&b.0))
    });

    let linenos: Vec<f64> = rows.iter().map(|r| r.1).collect();
    let cols: Vec<f64> = rows.iter().map(|r| r.2).collect();
    let line_pct = rank_pct_descending(&linenos);
    let col_pct = rank_pct_descending(&cols);

    rows.iter()
        .enumerate()
        .map(|(i, (name, _, _))| (name.clone(), [col_pct[i], line_pct[i]]))
        .collect()
}

/// Descending rank percentile with first-in-input tie-break: the largest
/// value ranks 1, equal values keep input order, percentile = rank / n.
fn rank_pct_descending(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![0.0; n];
    for i in 0..n {
        let mut rank = 1usize;
        for j in 0..n {
            if values[j] > values[i] || (values[j] == values[i] && j < i) {
                rank += 1;
            }
        }
        out[i] = rank as f64 / n as f64;
    }
    out
}

const SPRING_ITERATIONS: usize = 50;
// Golden angle, radians; spreads seed nodes evenly around a spiral.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Deterministic Fruchterman-Reingold layout.
///
/// Nodes named in `fixed` keep their seed coordinates throughout. Seeds come
/// from `seed` where it has an entry, otherwise from a golden-angle spiral,
/// so repeated runs produce identical output. The result is rescaled into
/// the unit square unless any node is anchored.
pub fn spring_layout(graph: &RelationGraph, fixed: &[String], seed: Option<&PositionMap>) -> PositionMap {
    let names: Vec<String> = graph.sorted_nodes().iter().map(|s| s.to_string()).collect();
    let n = names.len();
    if n == 0 {
        return PositionMap::new();
    }

    let mut pos: Vec<[f64; 2]> = (0..n)
        .map(|i| {
            let angle = i as f64 * GOLDEN_ANGLE;
            let radius = 0.5 * (((i + 1) as f64) / n as f64).sqrt();
            [0.5 + radius * angle.cos(), 0.5 + radius * angle.sin()]
        })
        .collect();
    if let Some(seed) = seed {
        for (i, name) in names.iter().enumerate() {
            if let Some(coords) = seed.get(name) {
                pos[i] = *coords;
            }
        }
    }

    let index_of: BTreeMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();
    let anchored: HashSet<usize> = fixed
        .iter()
        .filter_map(|name| index_of.get(name.as_str()).copied())
        .collect();
    let springs: Vec<(usize, usize)> = graph
        .edges()
        .filter_map(|(from, to, _)| {
            let a = index_of[from];
            let b = index_of[to];
            (a != b).then_some((a, b))
        })
        .collect();

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = 0.1;
    let cooling = temperature / (SPRING_ITERATIONS + 1) as f64;

    for _ in 0..SPRING_ITERATIONS {
        let mut disp = vec![[0.0f64; 2]; n];

        // Repulsion between every pair.
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let d2 = (dx * dx + dy * dy).max(1e-9);
                let f = k * k / d2;
                disp[i][0] += dx * f;
                disp[i][1] += dy * f;
                disp[j][0] -= dx * f;
                disp[j][1] -= dy * f;
            }
        }

        // Attraction along edges.
        for &(a, b) in &springs {
            let dx = pos[a][0] - pos[b][0];
            let dy = pos[a][1] - pos[b][1];
            let d = (dx * dx + dy * dy).sqrt().max(1e-9);
            let f = d / k;
            disp[a][0] -= dx / d * f;
            disp[a][1] -= dy / d * f;
            disp[b][0] += dx / d * f;
            disp[b][1] += dy / d * f;
        }

        for i in 0..n {
            if anchored.contains(&i) {
                continue;
            }
            let len = (disp[i][0] * disp[i][0] + disp[i][1] * disp[i][1])
                .sqrt()
                .max(1e-9);
            let step = len.min(temperature);
            pos[i][0] += disp[i][0] / len * step;
            pos[i][1] += disp[i][1] / len * step;
        }
        temperature -= cooling;
    }

    if anchored.is_empty() {
        rescale_unit(&mut pos);
    }

    names.into_iter().zip(pos).collect()
}

fn rescale_unit(pos: &mut [[f64; 2]]) {
    for axis in 0..2 {
        let min = pos.iter().map(|p| p[axis]).fold(f64::INFINITY, f64::min);
        let max = pos.iter().map(|p| p[axis]).fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        for p in pos.iter_mut() {
            p[axis] = if span > f64::EPSILON {
                (p[axis] - min) / span
            } else {
                0.5
            };
        }
    }
}

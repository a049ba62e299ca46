//! Deterministic 2D placement of waypoints.
//!
//! The layout engine assigns every node of a
//! [`MovementGraph`](crate::graphs::MovementGraph) an `(x, y)` coordinate.
//! Fresh layouts come from a seeded force-directed (spring) placement, so
//! the same graph always lands in the same picture. When a previous
//! [`Layout`] is supplied — typically one the hosting layer returned to the
//! user for manual repositioning — coordinates of surviving nodes are kept
//! exactly as given, nodes new to the graph settle around them, and nodes
//! that no longer exist are dropped.
//!
//! Layout state is an explicit value passed in and returned; nothing is
//! stashed in globals between calls.
//!
//! # Examples
//!
//! ```
//! use stampgraph::graphs::build_graph;
//! use stampgraph::layout::LayoutEngine;
//!
//! let graph = build_graph(&[]);
//! let engine = LayoutEngine::default();
//! let layout = engine.compute(&graph, None);
//! assert!(layout.is_empty());
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graphs::MovementGraph;

/// A 2D coordinate in layout space (roughly [-1, 1] on both axes for fresh
/// layouts; user-edited coordinates may lie anywhere).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mapping from point label to coordinate.
///
/// Serializable so the hosting layer can round-trip it through its session
/// store or expose it for manual editing, then hand it back on the next
/// [`LayoutEngine::compute`] call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    positions: FxHashMap<String, Position>,
}

impl Layout {
    /// Creates an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Coordinate of a point, if placed.
    #[must_use]
    pub fn get(&self, point: &str) -> Option<Position> {
        self.positions.get(point).copied()
    }

    /// Places (or replaces) a point.
    pub fn set(&mut self, point: impl Into<String>, position: Position) {
        self.positions.insert(point.into(), position);
    }

    /// Returns `true` if the point has a coordinate.
    #[must_use]
    pub fn contains(&self, point: &str) -> bool {
        self.positions.contains_key(point)
    }

    /// Number of placed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` when nothing is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates placed points in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Position)> {
        self.positions.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Seeded force-directed layout engine.
///
/// The defaults reproduce the reference placement behavior: seed 42 and 50
/// relaxation iterations. Both knobs are adjustable for callers that want a
/// different aesthetic or a tighter time budget on very large graphs.
#[derive(Clone, Copy, Debug)]
pub struct LayoutEngine {
    seed: u64,
    iterations: usize,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            seed: 42,
            iterations: 50,
        }
    }
}

impl LayoutEngine {
    /// Creates an engine with the default seed and iteration count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the placement seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the relaxation iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Computes a complete layout covering exactly the graph's node set.
    ///
    /// With no `previous` layout the result is a pure function of the graph
    /// and the engine's seed. With one, coordinates of nodes present in both
    /// the previous layout and the graph are preserved bit-for-bit; only
    /// nodes missing from the previous layout move during relaxation, and
    /// entries for nodes absent from the graph are dropped. Inconsistencies
    /// between the two inputs are always resolved, never reported as errors.
    #[must_use]
    pub fn compute(&self, graph: &MovementGraph, previous: Option<&Layout>) -> Layout {
        let n = graph.node_count();
        let mut layout = Layout::new();
        if n == 0 {
            return layout;
        }

        let labels = graph.points.labels();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut positions: Vec<Position> = Vec::with_capacity(n);
        let mut pinned: Vec<bool> = Vec::with_capacity(n);

        for label in labels {
            match previous.and_then(|p| p.get(label)) {
                Some(pos) => {
                    positions.push(pos);
                    pinned.push(true);
                }
                None => {
                    positions.push(Position::new(
                        rng.random_range(-1.0..1.0),
                        rng.random_range(-1.0..1.0),
                    ));
                    pinned.push(false);
                }
            }
        }

        let free = pinned.iter().filter(|&&p| !p).count();
        if free > 0 {
            if n == 1 {
                positions[0] = Position::new(0.0, 0.0);
            } else {
                self.relax(graph, &mut positions, &pinned);
                if previous.is_none() {
                    rescale_unit(&mut positions);
                }
            }
        }

        for (label, pos) in labels.iter().zip(&positions) {
            layout.set(label.clone(), *pos);
        }
        debug!(nodes = n, pinned = n - free, "computed layout");
        layout
    }

    /// Fruchterman-Reingold relaxation with pinned nodes held fixed.
    fn relax(&self, graph: &MovementGraph, positions: &mut [Position], pinned: &[bool]) {
        use petgraph::visit::EdgeRef;

        let n = positions.len();
        // Ideal pairwise distance for an n-node graph in a 2x2 region.
        let k = (4.0 / n as f64).sqrt();
        let mut temperature = 0.2_f64;
        let cooling = temperature / (self.iterations as f64 + 1.0);

        for _ in 0..self.iterations {
            let mut disp = vec![(0.0_f64, 0.0_f64); n];

            for i in 0..n {
                for j in (i + 1)..n {
                    let dx = positions[i].x - positions[j].x;
                    let dy = positions[i].y - positions[j].y;
                    let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                    let repulse = k * k / (dist * dist);
                    disp[i].0 += dx * repulse;
                    disp[i].1 += dy * repulse;
                    disp[j].0 -= dx * repulse;
                    disp[j].1 -= dy * repulse;
                }
            }

            for edge in graph.graph.edge_references() {
                let u = edge.source().index();
                let v = edge.target().index();
                if u == v {
                    continue;
                }
                let dx = positions[u].x - positions[v].x;
                let dy = positions[u].y - positions[v].y;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                let weight = *edge.weight() as f64;
                let attract = dist / k * weight;
                disp[u].0 -= dx / dist * attract;
                disp[u].1 -= dy / dist * attract;
                disp[v].0 += dx / dist * attract;
                disp[v].1 += dy / dist * attract;
            }

            for i in 0..n {
                if pinned[i] {
                    continue;
                }
                let (dx, dy) = disp[i];
                let len = (dx * dx + dy * dy).sqrt().max(1e-9);
                let step = len.min(temperature);
                positions[i].x += dx / len * step;
                positions[i].y += dy / len * step;
            }

            temperature -= cooling;
        }
    }
}

/// Centers positions on their mean and scales the largest extent to 1.
fn rescale_unit(positions: &mut [Position]) {
    let n = positions.len() as f64;
    let cx = positions.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = positions.iter().map(|p| p.y).sum::<f64>() / n;
    let mut extent = 0.0_f64;
    for p in positions.iter_mut() {
        p.x -= cx;
        p.y -= cy;
        extent = extent.max(p.x.abs()).max(p.y.abs());
    }
    if extent > 0.0 {
        for p in positions.iter_mut() {
            p.x /= extent;
            p.y /= extent;
        }
    }
}

//! Movement-graph construction from visit records.
//!
//! This module turns a filtered slice of [`VisitRecord`](crate::records::VisitRecord)s
//! into a weighted directed graph of waypoint transitions:
//!
//! - **Nodes** are waypoints, one per distinct `point` label, annotated with
//!   the number of distinct visitors.
//! - **Edges** are observed moves between consecutive waypoints in a single
//!   user's chronological visit sequence, weighted by how often that exact
//!   ordered pair occurred across all users.
//!
//! The entry point is [`build_graph`]; the result is a [`MovementGraph`]
//! bundling the [`petgraph`] digraph with the [`PointIndex`] id mapping and
//! the per-point visitor counts.
//!
//! # Determinism
//!
//! Waypoint ids are assigned 0..N-1 in order of first appearance in the
//! input, never from hash iteration order, and edges are inserted in sorted
//! (from, to) id order. Building twice from the same slice yields an
//! identical graph, which downstream consumers rely on: edge direction
//! styling compares the ids of the two endpoints.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use stampgraph::graphs::build_graph;
//! use stampgraph::records::VisitRecord;
//!
//! let t = |m| {
//!     NaiveDate::from_ymd_opt(2023, 1, 1)
//!         .unwrap()
//!         .and_hms_opt(10, m, 0)
//!         .unwrap()
//! };
//! let records = vec![
//!     VisitRecord::new("1", "A", t(0)),
//!     VisitRecord::new("1", "B", t(5)),
//!     VisitRecord::new("2", "A", t(10)),
//!     VisitRecord::new("2", "C", t(15)),
//! ];
//!
//! let graph = build_graph(&records);
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.weight("A", "B"), Some(1));
//! assert_eq!(graph.visit_count("A"), 2);
//! ```

mod build;
#[cfg(test)]
mod tests;

pub use build::build_graph;

use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

/// Directed graph of waypoint transitions.
///
/// Node weights are point labels, edge weights are transition occurrence
/// counts. `NodeIndex` order matches [`PointIndex`] id order.
pub type TransitionGraph = DiGraph<String, u64>;

/// Rendering-oriented classification of an edge.
///
/// Purely positional: an edge is [`Forward`](EdgeDirection::Forward) when
/// the id of its source is smaller than the id of its target. Self-loops
/// (equal ids) classify as backward. The distinction only selects visual
/// style; it says nothing about the semantics of the movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    /// Source id is smaller than target id; drawn solid.
    Forward,
    /// Source id is greater than or equal to the target id; drawn dashed.
    Backward,
}

impl EdgeDirection {
    /// Classifies the ordered id pair of an edge's endpoints.
    #[must_use]
    pub fn classify(from_id: usize, to_id: usize) -> Self {
        if from_id < to_id {
            EdgeDirection::Forward
        } else {
            EdgeDirection::Backward
        }
    }
}

/// Bidirectional mapping between point labels and dense integer ids.
///
/// Ids are assigned in first-appearance order, 0..N-1, and are stable for a
/// given input ordering. The index never exposes hash iteration order;
/// [`labels`](Self::labels) iterates in id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointIndex {
    labels: Vec<String>,
    ids: FxHashMap<String, usize>,
}

impl PointIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `label`, interning it at the next free id if it
    /// has not been seen before.
    pub fn intern(&mut self, label: &str) -> usize {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.labels.push(label.to_owned());
        self.ids.insert(label.to_owned(), id);
        id
    }

    /// Looks up the id of a label.
    #[must_use]
    pub fn id_of(&self, label: &str) -> Option<usize> {
        self.ids.get(label).copied()
    }

    /// Looks up the label at an id.
    #[must_use]
    pub fn label_of(&self, id: usize) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when no labels have been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in id order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// The built movement graph plus its companion lookups.
///
/// Produced by [`build_graph`]; consumed by the layout engine, the renderer,
/// and the summary tabulator. An empty input slice produces an empty graph
/// (zero nodes, zero edges) rather than an error.
#[derive(Clone, Debug)]
pub struct MovementGraph {
    /// The weighted digraph. Node indices coincide with point ids.
    pub graph: TransitionGraph,
    /// Label ↔ id mapping, first-appearance order.
    pub points: PointIndex,
    /// Distinct-visitor count per point label.
    pub visit_counts: FxHashMap<String, u64>,
}

impl MovementGraph {
    /// Number of waypoints.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct ordered transitions.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` when the graph has no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Distinct visitors at a point, 0 for unknown labels.
    #[must_use]
    pub fn visit_count(&self, point: &str) -> u64 {
        self.visit_counts.get(point).copied().unwrap_or(0)
    }

    /// Transition weight for the ordered pair, if that edge exists.
    #[must_use]
    pub fn weight(&self, from: &str, to: &str) -> Option<u64> {
        let from = NodeIndex::new(self.points.id_of(from)?);
        let to = NodeIndex::new(self.points.id_of(to)?);
        let edge = self.graph.find_edge(from, to)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Direction classification for an edge between two known points.
    #[must_use]
    pub fn direction(&self, from: &str, to: &str) -> Option<EdgeDirection> {
        Some(EdgeDirection::classify(
            self.points.id_of(from)?,
            self.points.id_of(to)?,
        ))
    }
}

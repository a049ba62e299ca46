//! Tabular summaries of a movement graph.
//!
//! Two views back the presentation layer's tables and its CSV export:
//! a per-waypoint visitor table sorted by popularity, and a dense square
//! from/to matrix of transition weights. Both are derived purely from a
//! [`MovementGraph`](crate::graphs::MovementGraph); the hosting layer owns
//! any file I/O around the CSV text.

use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::graphs::MovementGraph;

/// One row of the visitor table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRow {
    /// Waypoint label.
    pub point: String,
    /// Distinct visitors at this waypoint.
    pub visitors: u64,
}

/// Per-waypoint visitor counts, most visited first.
///
/// Ties keep the first-appearance order of the underlying point ids, so the
/// table is reproducible across rebuilds of the same input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTable {
    pub rows: Vec<NodeRow>,
}

impl NodeTable {
    /// Derives the table from a built graph.
    #[must_use]
    pub fn from_graph(graph: &MovementGraph) -> Self {
        let mut rows: Vec<NodeRow> = graph
            .points
            .labels()
            .iter()
            .map(|label| NodeRow {
                point: label.clone(),
                visitors: graph.visit_count(label),
            })
            .collect();
        // Stable sort: equal counts preserve id order.
        rows.sort_by_key(|row| std::cmp::Reverse(row.visitors));
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table as CSV text with a header row.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::from("point,visitors\n");
        for row in &self.rows {
            out.push_str(&csv_field(&row.point));
            out.push(',');
            out.push_str(&row.visitors.to_string());
            out.push('\n');
        }
        out
    }
}

/// Dense square matrix of transition weights.
///
/// Rows are origins, columns are destinations, both indexed by the full node
/// set in id order — isolated nodes contribute all-zero rows and columns.
/// Zero or one nodes degenerate to a 0x0 or 1x1 all-zero matrix without
/// error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMatrix {
    /// Node labels in id order; shared by rows and columns.
    pub labels: Vec<String>,
    /// `weights[from][to]`, 0 where no edge exists.
    pub weights: Vec<Vec<u64>>,
}

impl EdgeMatrix {
    /// Derives the matrix from a built graph.
    #[must_use]
    pub fn from_graph(graph: &MovementGraph) -> Self {
        let n = graph.node_count();
        let labels = graph.points.labels().to_vec();
        let mut weights = vec![vec![0_u64; n]; n];
        for edge in graph.graph.edge_references() {
            weights[edge.source().index()][edge.target().index()] = *edge.weight();
        }
        Self { labels, weights }
    }

    /// Side length of the matrix (== node count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` for the 0x0 matrix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Weight from one label to another, 0 when either label is unknown or
    /// no such edge exists.
    #[must_use]
    pub fn weight(&self, from: &str, to: &str) -> u64 {
        let row = self.labels.iter().position(|l| l == from);
        let col = self.labels.iter().position(|l| l == to);
        match (row, col) {
            (Some(r), Some(c)) => self.weights[r][c],
            _ => 0,
        }
    }

    /// Renders the matrix as CSV text; the first column holds origin labels.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::from("from");
        for label in &self.labels {
            out.push(',');
            out.push_str(&csv_field(label));
        }
        out.push('\n');
        for (row, label) in self.weights.iter().zip(&self.labels) {
            out.push_str(&csv_field(label));
            for cell in row {
                out.push(',');
                out.push_str(&cell.to_string());
            }
            out.push('\n');
        }
        out
    }
}

/// Derives both summary tables in one call.
#[must_use]
pub fn summarize(graph: &MovementGraph) -> (NodeTable, EdgeMatrix) {
    (NodeTable::from_graph(graph), EdgeMatrix::from_graph(graph))
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

//! Graph construction from ordered visit records.

use chrono::NaiveDateTime;
use petgraph::graph::NodeIndex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::{MovementGraph, PointIndex, TransitionGraph};
use crate::records::VisitRecord;

/// Builds the weighted movement graph from an ordered record slice.
///
/// The contract, in order:
///
/// 1. Distinct point labels are interned in first-appearance order and
///    become the node set; every point is a node even with no incident
///    edges, so single-waypoint datasets still produce a drawable graph.
/// 2. `visit_counts[p]` is the number of distinct `user_id`s with at least
///    one record at `p`.
/// 3. Each user's records are sorted by timestamp (stable, so ties keep
///    input order) and every consecutive pair of points in that sequence
///    emits one transition occurrence. Immediately repeated points count
///    too: a sequence A,A,B contributes (A,A) and (A,B).
/// 4. Occurrences aggregate by ordered pair; the edge weight is the total
///    occurrence count across all users, not a distinct-user count.
///
/// Empty input yields an empty graph; callers handle zero-node graphs.
#[must_use]
pub fn build_graph(records: &[VisitRecord]) -> MovementGraph {
    let mut points = PointIndex::new();
    let mut visitors: Vec<FxHashSet<&str>> = Vec::new();
    let mut per_user: FxHashMap<&str, Vec<(NaiveDateTime, usize)>> = FxHashMap::default();
    // Users in first-appearance order so the whole build is reproducible.
    let mut user_order: Vec<&str> = Vec::new();

    for record in records {
        let id = points.intern(&record.point);
        if id == visitors.len() {
            visitors.push(FxHashSet::default());
        }
        visitors[id].insert(record.user_id.as_str());
        per_user
            .entry(record.user_id.as_str())
            .or_insert_with(|| {
                user_order.push(record.user_id.as_str());
                Vec::new()
            })
            .push((record.timestamp, id));
    }

    let mut occurrences: FxHashMap<(usize, usize), u64> = FxHashMap::default();
    for user in &user_order {
        if let Some(visits) = per_user.get_mut(user) {
            // Stable sort: equal timestamps keep their input order.
            visits.sort_by_key(|&(ts, _)| ts);
            for pair in visits.windows(2) {
                *occurrences.entry((pair[0].1, pair[1].1)).or_insert(0) += 1;
            }
        }
    }

    let mut graph = TransitionGraph::new();
    for label in points.labels() {
        graph.add_node(label.clone());
    }

    let mut aggregated: Vec<((usize, usize), u64)> = occurrences.into_iter().collect();
    aggregated.sort_unstable_by_key(|&(pair, _)| pair);
    for ((from, to), weight) in aggregated {
        graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), weight);
    }

    let visit_counts: FxHashMap<String, u64> = points
        .labels()
        .iter()
        .enumerate()
        .map(|(id, label)| (label.clone(), visitors[id].len() as u64))
        .collect();

    debug!(
        records = records.len(),
        users = user_order.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built movement graph"
    );

    MovementGraph {
        graph,
        points,
        visit_counts,
    }
}

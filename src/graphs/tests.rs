//! Unit tests for movement-graph construction.

use chrono::{NaiveDate, NaiveDateTime};

use super::{EdgeDirection, PointIndex, build_graph};
use crate::records::VisitRecord;

fn at(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(10, minute, 0)
        .unwrap()
}

fn record(user: &str, point: &str, minute: u32) -> VisitRecord {
    VisitRecord::new(user, point, at(minute))
}

#[test]
fn point_index_assigns_first_appearance_ids() {
    let mut index = PointIndex::new();
    assert_eq!(index.intern("B"), 0);
    assert_eq!(index.intern("A"), 1);
    assert_eq!(index.intern("B"), 0);
    assert_eq!(index.id_of("A"), Some(1));
    assert_eq!(index.label_of(0), Some("B"));
    assert_eq!(index.labels(), &["B".to_string(), "A".to_string()]);
}

#[test]
fn reference_scenario_two_users() {
    let records = vec![
        record("1", "A", 0),
        record("1", "B", 5),
        record("2", "A", 10),
        record("2", "C", 15),
    ];
    let g = build_graph(&records);

    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.weight("A", "B"), Some(1));
    assert_eq!(g.weight("A", "C"), Some(1));
    assert_eq!(g.weight("B", "A"), None);
    assert_eq!(g.visit_count("A"), 2);
    assert_eq!(g.visit_count("B"), 1);
    assert_eq!(g.visit_count("C"), 1);
}

#[test]
fn single_point_many_users_has_no_edges() {
    let records = vec![
        record("1", "X", 0),
        record("2", "X", 5),
        record("3", "X", 10),
    ];
    let g = build_graph(&records);

    assert_eq!(g.node_count(), 1);
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.visit_count("X"), 3);
}

#[test]
fn empty_input_builds_empty_graph() {
    let g = build_graph(&[]);
    assert!(g.is_empty());
    assert_eq!(g.edge_count(), 0);
    assert!(g.visit_counts.is_empty());
}

#[test]
fn weight_counts_occurrences_not_users() {
    // One user walks A->B twice; the edge weight is 2 even though only
    // one distinct user produced it.
    let records = vec![
        record("1", "A", 0),
        record("1", "B", 1),
        record("1", "A", 2),
        record("1", "B", 3),
    ];
    let g = build_graph(&records);
    assert_eq!(g.weight("A", "B"), Some(2));
    assert_eq!(g.weight("B", "A"), Some(1));
    assert_eq!(g.visit_count("A"), 1);
}

#[test]
fn unsorted_input_is_ordered_per_user_by_timestamp() {
    let records = vec![
        record("1", "B", 5),
        record("1", "A", 0),
        record("2", "C", 20),
        record("2", "A", 10),
    ];
    let g = build_graph(&records);
    assert_eq!(g.weight("A", "B"), Some(1));
    assert_eq!(g.weight("A", "C"), Some(1));
    assert_eq!(g.weight("B", "A"), None);
}

#[test]
fn timestamp_ties_keep_input_order() {
    let records = vec![
        record("1", "A", 0),
        record("1", "B", 0),
        record("1", "C", 0),
    ];
    let g = build_graph(&records);
    assert_eq!(g.weight("A", "B"), Some(1));
    assert_eq!(g.weight("B", "C"), Some(1));
    assert_eq!(g.weight("B", "A"), None);
}

#[test]
fn consecutive_duplicate_points_count_as_self_loops() {
    let records = vec![
        record("1", "A", 0),
        record("1", "A", 1),
        record("1", "B", 2),
    ];
    let g = build_graph(&records);
    assert_eq!(g.weight("A", "A"), Some(1));
    assert_eq!(g.weight("A", "B"), Some(1));
    // Equal endpoint ids classify as backward.
    assert_eq!(g.direction("A", "A"), Some(EdgeDirection::Backward));
}

#[test]
fn direction_follows_id_order_not_labels() {
    // "Z" appears first and gets id 0, so Z->A is forward despite the
    // reversed alphabetical order.
    let records = vec![record("1", "Z", 0), record("1", "A", 5)];
    let g = build_graph(&records);
    assert_eq!(g.points.id_of("Z"), Some(0));
    assert_eq!(g.points.id_of("A"), Some(1));
    assert_eq!(g.direction("Z", "A"), Some(EdgeDirection::Forward));
    assert_eq!(g.direction("A", "Z"), Some(EdgeDirection::Backward));
}

#[test]
fn rebuild_is_deterministic() {
    let records = vec![
        record("2", "C", 0),
        record("1", "A", 1),
        record("2", "A", 2),
        record("1", "B", 3),
        record("3", "B", 4),
        record("3", "C", 5),
    ];
    let first = build_graph(&records);
    let second = build_graph(&records);

    assert_eq!(first.points, second.points);
    assert_eq!(first.visit_counts, second.visit_counts);
    assert_eq!(first.node_count(), second.node_count());
    assert_eq!(first.edge_count(), second.edge_count());
    for from in first.points.labels() {
        for to in first.points.labels() {
            assert_eq!(first.weight(from, to), second.weight(from, to));
        }
    }
}

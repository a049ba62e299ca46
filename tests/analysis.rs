mod common;

use common::*;
use stampgraph::analysis::analyze;
use stampgraph::layout::{LayoutEngine, Position};
use stampgraph::render::RenderConfig;

#[test]
fn full_pipeline_on_reference_records() {
    let result = analyze(
        &reference_records(),
        None,
        &LayoutEngine::default(),
        &RenderConfig::default(),
    )
    .unwrap();

    assert_eq!(result.graph.node_count(), 3);
    assert_eq!(result.graph.edge_count(), 2);
    assert_eq!(result.layout.len(), 3);
    assert!(!result.image.png.is_empty());
    assert_eq!(result.node_table.len(), 3);
    assert_eq!(result.edge_matrix.len(), 3);
    assert_eq!(result.edge_matrix.weight("A", "B"), 1);
}

#[test]
fn empty_input_produces_empty_bundle_without_error() {
    let result = analyze(
        &[],
        None,
        &LayoutEngine::default(),
        &RenderConfig::default(),
    )
    .unwrap();

    assert!(result.graph.is_empty());
    assert!(result.layout.is_empty());
    assert!(result.node_table.is_empty());
    assert!(result.edge_matrix.is_empty());
    assert!(!result.image.png.is_empty());
}

#[test]
fn layout_round_trips_across_calls() {
    let records = reference_records();
    let engine = LayoutEngine::default();
    let config = RenderConfig::default();

    let first = analyze(&records, None, &engine, &config).unwrap();

    // Simulate a user dragging node B, then re-running with unchanged data.
    let mut edited = first.layout.clone();
    edited.set("B", Position::new(5.0, 5.0));
    let second = analyze(&records, Some(&edited), &engine, &config).unwrap();

    assert_eq!(second.layout.get("B"), Some(Position::new(5.0, 5.0)));
    assert_eq!(second.layout.get("A"), first.layout.get("A"));
    assert_eq!(second.layout.get("C"), first.layout.get("C"));
}

#[test]
fn repeated_analysis_is_deterministic() {
    let records = reference_records();
    let engine = LayoutEngine::default();
    let config = RenderConfig::default();

    let a = analyze(&records, None, &engine, &config).unwrap();
    let b = analyze(&records, None, &engine, &config).unwrap();

    assert_eq!(a.layout, b.layout);
    assert_eq!(a.node_table, b.node_table);
    assert_eq!(a.edge_matrix, b.edge_matrix);
    assert_eq!(a.image.png, b.image.png);
}

#[test]
fn filtered_then_analyzed_end_to_end() {
    use chrono::NaiveTime;
    use stampgraph::filter::VisitFilter;

    // Push one record outside the window; it must not appear in the graph.
    let mut records = reference_records();
    records.push(stampgraph::records::VisitRecord::new(
        "9",
        "Late",
        at(0).date().and_hms_opt(23, 0, 0).unwrap(),
    ));

    let filter = VisitFilter::new().with_time_window(
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
    );
    let kept = filter.apply(&records);
    let result = analyze(
        &kept,
        None,
        &LayoutEngine::default(),
        &RenderConfig::default(),
    )
    .unwrap();

    assert_eq!(result.graph.node_count(), 3);
    assert!(result.graph.points.id_of("Late").is_none());
}

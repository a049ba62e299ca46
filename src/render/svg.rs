//! SVG document assembly for the graph renderer.
//!
//! Everything here is plain string building: geometry in, `<svg>` text out.
//! The document is parsed back and rasterized by the parent module.

use petgraph::visit::EdgeRef;

use super::RenderConfig;
use crate::graphs::{EdgeDirection, MovementGraph};
use crate::layout::Layout;

/// Fraction of the chord length used as perpendicular control-point offset.
const CURVATURE: f64 = 0.15;
/// Parametric position of the edge label along the curve.
const LABEL_T: f64 = 0.3;

pub(super) fn document(graph: &MovementGraph, layout: &Layout, config: &RenderConfig) -> String {
    let width = config.width;
    let height = config.height;
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.background
    ));
    svg.push_str("<defs>");
    for (id, color) in [
        ("arrow-fwd", &config.forward_color),
        ("arrow-bwd", &config.backward_color),
    ] {
        svg.push_str(&format!(
            "<marker id=\"{id}\" viewBox=\"0 0 10 10\" refX=\"9\" refY=\"5\" markerWidth=\"7\" markerHeight=\"7\" orient=\"auto\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{color}\"/></marker>"
        ));
    }
    svg.push_str("</defs>");

    if graph.is_empty() {
        svg.push_str("</svg>");
        return svg;
    }

    let centers = canvas_positions(graph, layout, config);
    let radii = node_radii(graph, config);

    // Group maxima drive the per-direction width normalization.
    let mut max_fwd = 0_u64;
    let mut max_bwd = 0_u64;
    for edge in graph.graph.edge_references() {
        let dir = EdgeDirection::classify(edge.source().index(), edge.target().index());
        match dir {
            EdgeDirection::Forward => max_fwd = max_fwd.max(*edge.weight()),
            EdgeDirection::Backward => max_bwd = max_bwd.max(*edge.weight()),
        }
    }

    let mut labels = String::new();
    for edge in graph.graph.edge_references() {
        let from = edge.source().index();
        let to = edge.target().index();
        let weight = *edge.weight();
        let dir = EdgeDirection::classify(from, to);
        let (color, group_max, dash) = match dir {
            EdgeDirection::Forward => (&config.forward_color, max_fwd, ""),
            EdgeDirection::Backward => (
                &config.backward_color,
                max_bwd,
                " stroke-dasharray=\"7 5\"",
            ),
        };
        let stroke = scale(weight, group_max, config.edge_width);
        let marker = match dir {
            EdgeDirection::Forward => "arrow-fwd",
            EdgeDirection::Backward => "arrow-bwd",
        };

        let (path, label_at) = if from == to {
            self_loop(centers[from], radii[from])
        } else {
            curved_edge(centers[from], centers[to], radii[from], radii[to], dir)
        };
        svg.push_str(&format!(
            "<path d=\"{path}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{stroke:.2}\"{dash} marker-end=\"url(#{marker})\"/>"
        ));

        let from_label = graph.points.label_of(from).unwrap_or_default();
        let to_label = graph.points.label_of(to).unwrap_or_default();
        labels.push_str(&edge_label(
            label_at,
            &format!("{from_label}\u{2192}{to_label} ({weight})"),
            color,
            dir,
            config,
        ));
    }

    for (id, label) in graph.points.labels().iter().enumerate() {
        let (x, y) = centers[id];
        let r = radii[id];
        svg.push_str(&format!(
            "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{r:.2}\" fill=\"{}\" fill-opacity=\"0.7\" stroke=\"{}\" stroke-width=\"1\"/>",
            config.node_fill, config.text_color
        ));
        let visitors = graph.visit_count(label);
        let line_height = config.font_size * 1.2;
        labels.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\"><tspan x=\"{x:.2}\" dy=\"0\">{}</tspan><tspan x=\"{x:.2}\" dy=\"{line_height:.2}\">{visitors} visitors</tspan></text>",
            y - line_height / 2.0 + config.font_size / 2.0,
            config.font_family,
            config.font_size,
            config.text_color,
            escape_xml(label),
        ));
    }

    // Labels last so boxes sit above node and edge strokes.
    svg.push_str(&labels);
    svg.push_str("</svg>");
    svg
}

/// Maps layout coordinates onto the canvas, flipping the y axis (layout y
/// grows upward, SVG y grows downward). Nodes without a coordinate fall back
/// to the canvas center instead of failing.
fn canvas_positions(
    graph: &MovementGraph,
    layout: &Layout,
    config: &RenderConfig,
) -> Vec<(f64, f64)> {
    let labels = graph.points.labels();
    let positions: Vec<Option<(f64, f64)>> = labels
        .iter()
        .map(|l| layout.get(l).map(|p| (p.x, p.y)))
        .collect();

    let placed: Vec<(f64, f64)> = positions.iter().flatten().copied().collect();
    let (min_x, max_x) = extent(placed.iter().map(|p| p.0));
    let (min_y, max_y) = extent(placed.iter().map(|p| p.1));
    let span_x = (max_x - min_x).max(f64::EPSILON);
    let span_y = (max_y - min_y).max(f64::EPSILON);

    let inner_w = f64::from(config.width) - 2.0 * config.margin;
    let inner_h = f64::from(config.height) - 2.0 * config.margin;
    let center = (
        f64::from(config.width) / 2.0,
        f64::from(config.height) / 2.0,
    );

    positions
        .iter()
        .map(|pos| match pos {
            Some((x, y)) if placed.len() > 1 => (
                config.margin + (x - min_x) / span_x * inner_w,
                config.margin + (max_y - y) / span_y * inner_h,
            ),
            Some(_) => center,
            None => center,
        })
        .collect()
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() { (min, max) } else { (0.0, 0.0) }
}

fn node_radii(graph: &MovementGraph, config: &RenderConfig) -> Vec<f64> {
    let max_count = graph.visit_counts.values().copied().max().unwrap_or(0);
    graph
        .points
        .labels()
        .iter()
        .map(|l| scale(graph.visit_count(l), max_count, config.node_radius))
        .collect()
}

/// Linear scale of `value` against `max` into `[range.0, range.1]`.
/// A zero maximum substitutes 1 as divisor, so everything lands at the
/// minimum instead of dividing by zero.
fn scale(value: u64, max: u64, range: (f64, f64)) -> f64 {
    let divisor = if max == 0 { 1.0 } else { max as f64 };
    range.0 + (value as f64 / divisor) * (range.1 - range.0)
}

/// Quadratic Bézier between two node rims. Forward edges bow to one side of
/// the chord, backward edges to the other, so an opposing pair stays apart.
/// Returns the path and the label anchor point.
fn curved_edge(
    from: (f64, f64),
    to: (f64, f64),
    from_r: f64,
    to_r: f64,
    dir: EdgeDirection,
) -> (String, (f64, f64)) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let len = (dx * dx + dy * dy).sqrt().max(f64::EPSILON);
    let (ux, uy) = (dx / len, dy / len);
    let side = match dir {
        EdgeDirection::Forward => 1.0,
        EdgeDirection::Backward => -1.0,
    };
    // Perpendicular to the chord.
    let (px, py) = (-uy * side, ux * side);

    let start = (from.0 + ux * from_r, from.1 + uy * from_r);
    // Leave room for the arrowhead in front of the target rim.
    let end = (to.0 - ux * (to_r + 4.0), to.1 - uy * (to_r + 4.0));
    let ctrl = (
        (start.0 + end.0) / 2.0 + px * CURVATURE * len,
        (start.1 + end.1) / 2.0 + py * CURVATURE * len,
    );

    let path = format!(
        "M {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2}",
        start.0, start.1, ctrl.0, ctrl.1, end.0, end.1
    );
    (path, bezier_point(start, ctrl, end, LABEL_T))
}

/// Small loop above the node for same-point transitions.
fn self_loop(center: (f64, f64), r: f64) -> (String, (f64, f64)) {
    let (x, y) = center;
    let top = y - r;
    let path = format!(
        "M {:.2} {:.2} C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
        x - r * 0.4,
        top,
        x - r * 1.6,
        top - r * 2.2,
        x + r * 1.6,
        top - r * 2.2,
        x + r * 0.4,
        top,
    );
    (path, (x, top - r * 1.9))
}

fn bezier_point(p0: (f64, f64), c: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
    let mt = 1.0 - t;
    (
        mt * mt * p0.0 + 2.0 * mt * t * c.0 + t * t * p1.0,
        mt * mt * p0.1 + 2.0 * mt * t * c.1 + t * t * p1.1,
    )
}

/// Edge label in a rounded box; border style mirrors the edge style.
fn edge_label(
    at: (f64, f64),
    text: &str,
    color: &str,
    dir: EdgeDirection,
    config: &RenderConfig,
) -> String {
    let (x, y) = at;
    let text_w = text.chars().count() as f64 * config.font_size * 0.62;
    let box_w = text_w + 12.0;
    let box_h = config.font_size + 10.0;
    let dash = match dir {
        EdgeDirection::Forward => "",
        EdgeDirection::Backward => " stroke-dasharray=\"4 3\"",
    };
    format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{box_w:.2}\" height=\"{box_h:.2}\" rx=\"5\" ry=\"5\" fill=\"{}\" stroke=\"{color}\" stroke-width=\"1\"{dash}/><text x=\"{x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{color}\">{}</text>",
        x - box_w / 2.0,
        y - box_h / 2.0,
        config.background,
        y + config.font_size * 0.35,
        config.font_family,
        config.font_size,
        escape_xml(text),
    )
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;
    use crate::records::VisitRecord;
    use chrono::NaiveDate;

    fn sample_graph() -> MovementGraph {
        let t = |m| {
            NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(10, m, 0)
                .unwrap()
        };
        crate::graphs::build_graph(&[
            VisitRecord::new("1", "A", t(0)),
            VisitRecord::new("1", "B", t(1)),
            VisitRecord::new("2", "B", t(2)),
            VisitRecord::new("2", "A", t(3)),
        ])
    }

    #[test]
    fn document_contains_both_edge_styles() {
        let graph = sample_graph();
        let layout = LayoutEngine::new().compute(&graph, None);
        let config = RenderConfig::default();
        let svg = document(&graph, &layout, &config);

        assert!(svg.contains("url(#arrow-fwd)"));
        assert!(svg.contains("url(#arrow-bwd)"));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains(&config.forward_color));
        assert!(svg.contains(&config.backward_color));
    }

    #[test]
    fn empty_graph_yields_background_only_document() {
        let graph = crate::graphs::build_graph(&[]);
        let svg = document(&graph, &crate::layout::Layout::new(), &RenderConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn node_labels_carry_visitor_counts() {
        let graph = sample_graph();
        let layout = LayoutEngine::new().compute(&graph, None);
        let svg = document(&graph, &layout, &RenderConfig::default());
        assert!(svg.contains("1 visitors") || svg.contains("2 visitors"));
    }

    #[test]
    fn edge_widths_normalize_per_direction_group() {
        let t = |m| {
            NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(10, m, 0)
                .unwrap()
        };
        // Forward group: A->B weight 3, A->C weight 1. Backward group:
        // B->A weight 1 only.
        let graph = crate::graphs::build_graph(&[
            VisitRecord::new("1", "A", t(0)),
            VisitRecord::new("1", "B", t(1)),
            VisitRecord::new("2", "A", t(2)),
            VisitRecord::new("2", "B", t(3)),
            VisitRecord::new("3", "A", t(4)),
            VisitRecord::new("3", "B", t(5)),
            VisitRecord::new("3", "A", t(6)),
            VisitRecord::new("4", "A", t(7)),
            VisitRecord::new("4", "C", t(8)),
        ]);
        assert_eq!(graph.weight("A", "B"), Some(3));
        assert_eq!(graph.weight("B", "A"), Some(1));
        assert_eq!(graph.weight("A", "C"), Some(1));

        let layout = LayoutEngine::new().compute(&graph, None);
        let config = RenderConfig::default();
        let svg = document(&graph, &layout, &config);

        // Each group's heaviest edge hits the configured maximum width:
        // the backward edge weighs 1 but is alone in its group, so it is
        // normalized against 1, not against the forward maximum of 3.
        assert_eq!(
            svg.matches("stroke-width=\"6.00\"").count(),
            2,
            "group maxima should both render at the maximum stroke"
        );
        assert!(svg.contains("stroke-width=\"6.00\" stroke-dasharray=\"7 5\""));
        // The lighter forward edge scales against its own group's maximum.
        assert!(svg.contains("stroke-width=\"2.67\""));
    }

    #[test]
    fn scale_guards_zero_max() {
        assert_eq!(scale(0, 0, (5.0, 10.0)), 5.0);
        assert_eq!(scale(4, 4, (5.0, 10.0)), 10.0);
    }

    #[test]
    fn missing_layout_entries_fall_back_to_center() {
        let graph = sample_graph();
        // Deliberately empty layout: every node falls back to the center.
        let svg = document(&graph, &crate::layout::Layout::new(), &RenderConfig::default());
        assert!(svg.contains("cx=\"500.00\""));
        assert!(svg.contains("cy=\"350.00\""));
    }

    #[test]
    fn labels_are_xml_escaped() {
        let t = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let graph = crate::graphs::build_graph(&[VisitRecord::new("1", "A & B", t)]);
        let layout = LayoutEngine::new().compute(&graph, None);
        let svg = document(&graph, &layout, &RenderConfig::default());
        assert!(svg.contains("A &amp; B"));
        assert!(!svg.contains("A & B<"));
    }
}

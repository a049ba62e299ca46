//! The full analysis pipeline: build, layout, render, tabulate.
//!
//! [`analyze`] is the facade the hosting layer calls once per filtered
//! dataset. It runs the four stages sequentially and synchronously and
//! returns everything the presentation layer needs in one [`Analysis`]
//! bundle: the graph itself, the (possibly merged) layout, the PNG image,
//! and both summary tables.
//!
//! Layout persistence across interactive re-renders is explicit: pass the
//! `layout` from the previous [`Analysis`] (optionally edited by the user)
//! back in as `previous_layout` and surviving nodes keep their coordinates.
//! Pass `None` to reset, e.g. after loading a different dataset.
//!
//! # Examples
//!
//! ```no_run
//! use stampgraph::analysis::analyze;
//! use stampgraph::layout::LayoutEngine;
//! use stampgraph::render::RenderConfig;
//!
//! let engine = LayoutEngine::default();
//! let config = RenderConfig::default();
//!
//! let first = analyze(&[], None, &engine, &config)?;
//! // ... user repositions nodes, filters change, re-run:
//! let second = analyze(&[], Some(&first.layout), &engine, &config)?;
//! # Ok::<(), stampgraph::analysis::AnalysisError>(())
//! ```

use miette::Diagnostic;
use thiserror::Error;
use tracing::{info, instrument};

use crate::graphs::{MovementGraph, build_graph};
use crate::layout::{Layout, LayoutEngine};
use crate::records::VisitRecord;
use crate::render::{RenderConfig, RenderError, RenderedGraph, render_graph};
use crate::tables::{EdgeMatrix, NodeTable, summarize};

/// Everything one analysis pass produces.
#[derive(Clone, Debug)]
pub struct Analysis {
    /// The built movement graph with its id mapping and visitor counts.
    pub graph: MovementGraph,
    /// The layout used for rendering; feed back into the next call to keep
    /// user-adjusted coordinates.
    pub layout: Layout,
    /// The rasterized image.
    pub image: RenderedGraph,
    /// Per-waypoint visitor table, most visited first.
    pub node_table: NodeTable,
    /// Dense from/to transition-weight matrix.
    pub edge_matrix: EdgeMatrix,
}

/// Pipeline failure. Rendering is the only fallible stage; graph building,
/// layout, and tabulation handle their degenerate inputs (empty data,
/// stale layouts) without erroring.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalysisError {
    /// The render stage failed; see the inner error for the cause.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}

/// Runs build → layout → render → tabulate over the given records.
///
/// Records are expected to be pre-validated and, if desired, pre-filtered
/// (see [`VisitFilter`](crate::filter::VisitFilter)). An empty slice is not
/// an error: the result carries an empty graph, empty tables, and a
/// background-only image.
#[instrument(skip_all, fields(records = records.len()))]
pub fn analyze(
    records: &[VisitRecord],
    previous_layout: Option<&Layout>,
    engine: &LayoutEngine,
    config: &RenderConfig,
) -> Result<Analysis, AnalysisError> {
    let graph = build_graph(records);
    let layout = engine.compute(&graph, previous_layout);
    let image = render_graph(&graph, &layout, config)?;
    let (node_table, edge_matrix) = summarize(&graph);

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        image_bytes = image.png.len(),
        "analysis pass complete"
    );

    Ok(Analysis {
        graph,
        layout,
        image,
        node_table,
        edge_matrix,
    })
}

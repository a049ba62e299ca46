//! Rasterized rendering of movement graphs.
//!
//! Rendering is a pure, per-call affair: [`render_graph`] assembles a fresh
//! SVG document from the graph, its layout, and a [`RenderConfig`], then
//! rasterizes it to PNG bytes via `resvg`. No drawing surface or font state
//! survives a call; the pixmap is allocated, encoded, and dropped inside
//! [`render_graph`] even on the error paths.
//!
//! Visual encoding follows the analysis conventions this crate reimplements:
//!
//! - Node radius scales linearly with distinct-visitor count.
//! - Edge width scales linearly with transition weight, normalized per
//!   direction group against that group's own maximum.
//! - Forward edges (source id < target id) are solid, backward edges dashed,
//!   each curved to its own side so an opposing pair never overlaps.
//! - Every node is labeled with its name and visitor count; every edge with
//!   its endpoints and weight in a background box whose border matches the
//!   edge style.
//!
//! All divide-by-zero hazards (zero max visitor count, empty direction
//! group) substitute a divisor of 1; an empty graph renders a background-only
//! image without error.

mod svg;

use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

use crate::graphs::MovementGraph;
use crate::layout::Layout;

/// Visual parameters for [`render_graph`].
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Blank border around the drawing, in pixels.
    pub margin: f64,
    /// Canvas background color.
    pub background: String,
    /// Node fill color.
    pub node_fill: String,
    /// Color of forward (id-ascending) edges and their labels.
    pub forward_color: String,
    /// Color of backward (id-descending) edges and their labels.
    pub backward_color: String,
    /// Node label text color.
    pub text_color: String,
    /// Font family for all labels.
    pub font_family: String,
    /// Font size for all labels, in pixels.
    pub font_size: f64,
    /// Minimum and maximum node radius, in pixels.
    pub node_radius: (f64, f64),
    /// Minimum and maximum edge stroke width, in pixels.
    pub edge_width: (f64, f64),
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
            margin: 90.0,
            background: "#ffffff".into(),
            node_fill: "#87ceeb".into(),
            forward_color: "#1f4fd8".into(),
            backward_color: "#1a8f3c".into(),
            text_color: "#1c1c1c".into(),
            font_family: "sans-serif".into(),
            font_size: 13.0,
            node_radius: (18.0, 42.0),
            edge_width: (1.0, 6.0),
        }
    }
}

/// A finished raster image plus its dimensions.
#[derive(Clone, Debug)]
pub struct RenderedGraph {
    /// PNG-encoded image bytes.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Failures while producing the raster image.
///
/// Rendering errors are fatal for the single call that produced them and are
/// surfaced to the caller; nothing is swallowed or retried.
#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    /// The assembled SVG did not parse back through `usvg`.
    #[error("generated SVG was rejected: {message}")]
    #[diagnostic(
        code(stampgraph::render::svg),
        help("This indicates a rendering bug; please report the graph that triggered it.")
    )]
    Svg { message: String },

    /// The raster surface could not be allocated.
    #[error("could not allocate a {width}x{height} raster surface")]
    #[diagnostic(
        code(stampgraph::render::pixmap),
        help("Check the configured canvas dimensions; both must be non-zero and fit in memory.")
    )]
    PixmapAlloc { width: u32, height: u32 },

    /// PNG encoding of the finished surface failed.
    #[error("PNG encoding failed: {message}")]
    #[diagnostic(code(stampgraph::render::png_encode))]
    PngEncode { message: String },
}

/// Renders the graph to PNG bytes.
///
/// The layout is consulted read-only and passed through unchanged by the
/// pipeline; nodes missing a coordinate fall back to the canvas center
/// rather than failing, per the layout-inconsistency contract.
pub fn render_graph(
    graph: &MovementGraph,
    layout: &Layout,
    config: &RenderConfig,
) -> Result<RenderedGraph, RenderError> {
    let document = svg::document(graph, layout, config);
    let png = rasterize(&document, config)?;
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        width = config.width,
        height = config.height,
        bytes = png.len(),
        "rendered movement graph"
    );
    Ok(RenderedGraph {
        png,
        width: config.width,
        height: config.height,
    })
}

fn rasterize(document: &str, config: &RenderConfig) -> Result<Vec<u8>, RenderError> {
    use resvg::{tiny_skia, usvg};

    if config.width == 0 || config.height == 0 {
        return Err(RenderError::PixmapAlloc {
            width: config.width,
            height: config.height,
        });
    }

    let mut options = usvg::Options::default();
    options.font_family = config.font_family.clone();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(document, &options).map_err(|e| RenderError::Svg {
        message: e.to_string(),
    })?;

    let mut pixmap = tiny_skia::Pixmap::new(config.width, config.height).ok_or(
        RenderError::PixmapAlloc {
            width: config.width,
            height: config.height,
        },
    )?;
    resvg::render(
        &tree,
        tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );
    pixmap.encode_png().map_err(|e| RenderError::PngEncode {
        message: e.to_string(),
    })
}

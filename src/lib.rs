//! # Stampgraph: Movement Analysis for Stamp-Rally Logs
//!
//! Stampgraph turns a log of visitor check-ins at waypoints into a weighted
//! directed movement graph, lays it out deterministically, renders it to a
//! PNG image, and derives tabular summaries. It is the computational core of
//! a stamp-rally analysis tool: the interactive shell (file upload, filter
//! widgets, session wiring) lives in the hosting layer and talks to this
//! crate through plain values.
//!
//! ## Core Concepts
//!
//! - **Records**: immutable check-in rows (user, waypoint, timestamp)
//! - **Graph**: waypoints as nodes (distinct-visitor counts), user
//!   transitions as weighted directed edges
//! - **Layout**: seeded force placement, mergeable with user-edited
//!   coordinates across re-renders
//! - **Rendering**: per-call SVG assembly rasterized to PNG
//! - **Tables**: visitor table and from/to weight matrix
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use stampgraph::analysis::analyze;
//! use stampgraph::layout::LayoutEngine;
//! use stampgraph::records::VisitRecord;
//! use stampgraph::render::RenderConfig;
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
//! let result = analyze(
//!     &records,
//!     None,
//!     &LayoutEngine::default(),
//!     &RenderConfig::default(),
//! )?;
//!
//! assert_eq!(result.graph.node_count(), 3);
//! assert_eq!(result.node_table.rows[0].point, "A");
//! assert!(!result.image.png.is_empty());
//!
//! // Feed the layout back in to preserve positions on the next render.
//! let again = analyze(
//!     &records,
//!     Some(&result.layout),
//!     &LayoutEngine::default(),
//!     &RenderConfig::default(),
//! )?;
//! assert_eq!(again.layout, result.layout);
//! # Ok::<(), stampgraph::analysis::AnalysisError>(())
//! ```
//!
//! ## Determinism
//!
//! Every stage is a pure function of its inputs. Waypoint ids follow
//! first-appearance order, the layout seed is fixed (and overridable), and
//! no drawing or session state survives a call. Re-running an analysis on
//! identical input reproduces the identical graph, layout, and tables.
//!
//! ## Module Guide
//!
//! - [`records`] - Input record type
//! - [`filter`] - Time-of-day and weekday filtering
//! - [`graphs`] - Movement-graph construction
//! - [`layout`] - Deterministic, mergeable 2D placement
//! - [`render`] - SVG assembly and PNG rasterization
//! - [`tables`] - Visitor table and transition matrix
//! - [`analysis`] - The end-to-end pipeline facade
//! - [`telemetry`] - Optional tracing bootstrap for hosts

pub mod analysis;
pub mod filter;
pub mod graphs;
pub mod layout;
pub mod records;
pub mod render;
pub mod tables;
pub mod telemetry;

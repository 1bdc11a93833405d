//! Export of laid-out graphs.
//!
//! Export is the last stage of the pipeline and only reads the graph:
//!
//! ```text
//! TOML document
//!     ↓ input
//! Graph (random or given initial positions)
//!     ↓ layout / animate
//! Graph (settled positions)
//!     ↓ export (this module)
//! SVG document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgRenderer`]

/// SVG export backend.
pub mod svg;

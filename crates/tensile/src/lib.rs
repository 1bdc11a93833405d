//! Tensile - force-directed layout for directed and undirected graphs.
//!
//! Nodes repel each other like charged particles and edges pull their ends
//! together like springs. Repeated layout steps move a graph from random (or
//! given) starting positions towards a readable arrangement, which can then be
//! rendered as SVG. Intermediate states can be captured frame by frame.

pub mod animate;
pub mod config;
pub mod export;
pub mod graph;
pub mod input;
pub mod layout;
pub mod particle;

mod error;

pub use tensile_core::{color, geometry, identifier};

pub use error::TensileError;

use std::{convert::Infallible, path::Path};

use log::{debug, info, trace};

use animate::{Animation, AnimationSummary};
use config::AppConfig;
use export::svg::SvgRenderer;
use graph::Graph;
use input::GraphSource;
use layout::Engine;

/// Builder for reading, laying out and rendering graphs.
///
/// This provides an API for processing graph documents through parsing,
/// layout, and rendering stages.
///
/// # Examples
///
/// ```rust
/// use tensile::{LayoutBuilder, config::AppConfig};
///
/// let source = "[edges.a]\nb = 1.0\nc = 1.0\n";
///
/// let builder = LayoutBuilder::new(AppConfig::default());
///
/// // Parse the document into a graph with random initial positions
/// let mut graph = builder.parse(source).expect("Failed to parse");
///
/// // Run the configured number of layout steps
/// let summary = builder.layout(&mut graph).expect("Failed to lay out");
/// assert_eq!(summary.steps, 200);
///
/// // Render the settled graph
/// let svg = builder.render_svg(&graph).expect("Failed to render");
/// assert!(svg.contains("<circle"));
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout, style and
    ///   animation settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this builder was created with
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML graph document into a graph.
    ///
    /// Nodes without initial coordinates are placed randomly; with a seed in
    /// the layout configuration the placement is reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`TensileError::Input`] for syntax or shape errors in the
    /// document.
    pub fn parse(&self, source: &str) -> Result<Graph, TensileError> {
        info!("Parsing graph document");

        let graph = GraphSource::from_toml_str(source)?
            .into_builder()
            .maybe_seed(self.config.layout().seed())
            .build();

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Graph built"
        );
        trace!(graph:?; "Parsed graph");

        Ok(graph)
    }

    /// Run the configured frame budget of layout steps without rendering.
    ///
    /// # Errors
    ///
    /// Returns [`TensileError::Config`] if the layout constants would make
    /// positions non-finite. The graph is left untouched in that case.
    pub fn layout(&self, graph: &mut Graph) -> Result<AnimationSummary, TensileError> {
        let engine = self.engine()?;
        let animation = Animation::from(self.config.animation());
        info!(
            steps = animation.frames() * animation.steps_per_frame();
            "Laying out graph"
        );

        let mut discard = |_: usize, _: &Graph| Ok::<(), Infallible>(());
        let summary = animation
            .run(graph, &engine, &mut discard)
            .unwrap_or_else(|never| match never {});
        Ok(summary)
    }

    /// Render a graph at its current positions to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`TensileError::Style`] if a configured color is invalid.
    pub fn render_svg(&self, graph: &Graph) -> Result<String, TensileError> {
        let renderer = SvgRenderer::new(self.config.style())?;
        let svg = renderer.render_to_string(graph);

        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render a graph at its current positions and write the SVG to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TensileError::Style`] if a configured color is invalid, or
    /// [`TensileError::Io`] if the file cannot be written.
    pub fn save_svg(&self, graph: &Graph, path: impl AsRef<Path>) -> Result<(), TensileError> {
        SvgRenderer::new(self.config.style())?.save(graph, path)
    }

    /// Animate the layout, handing an SVG rendering of every frame to
    /// `on_frame`.
    ///
    /// # Errors
    ///
    /// Returns [`TensileError::Style`] for invalid colors and
    /// [`TensileError::Config`] for unusable layout constants, both before
    /// any step runs, or the first error returned by `on_frame`.
    pub fn render_frames<F>(
        &self,
        graph: &mut Graph,
        mut on_frame: F,
    ) -> Result<AnimationSummary, TensileError>
    where
        F: FnMut(usize, String) -> Result<(), TensileError>,
    {
        let renderer = SvgRenderer::new(self.config.style())?;
        let engine = self.engine()?;
        let animation = Animation::from(self.config.animation());
        info!(frames = animation.frames(); "Rendering animation frames");

        let mut sink =
            |index: usize, graph: &Graph| on_frame(index, renderer.render_to_string(graph));
        animation.run(graph, &engine, &mut sink)
    }

    fn engine(&self) -> Result<Engine, TensileError> {
        self.config
            .layout()
            .validate()
            .map_err(TensileError::Config)?;
        Ok(Engine::new(self.config.layout()))
    }
}

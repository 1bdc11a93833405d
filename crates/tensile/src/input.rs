//! TOML graph documents.
//!
//! A document lists edges as one table per source node, mapping each target
//! to an edge length. Initial coordinates are optional and given per axis:
//!
//! ```toml
//! [edges.a]
//! b = 1.0
//! c = 2
//!
//! [positions.a]
//! x = 0.0
//! y = 0.0
//! ```
//!
//! Tables keep document order, which becomes the node order of the graph.
//! Edge lengths are only stored, never used by the layout, so a non-numeric
//! length still declares its edge and is recorded as [`DEFAULT_LENGTH`].

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;

use crate::{
    error::TensileError,
    graph::{Graph, GraphBuilder},
    particle::InitialPosition,
};

/// Length recorded for an edge whose declared length is not a number
pub const DEFAULT_LENGTH: f32 = 1.0;

/// Parsed graph document, not yet turned into particles
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraphSource {
    #[serde(default)]
    edges: IndexMap<String, IndexMap<String, toml::Value>>,

    #[serde(default)]
    positions: IndexMap<String, PositionEntry>,
}

/// Raw coordinates of one node. Values are checked when converted, so a
/// malformed axis falls back to random placement instead of failing the load.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct PositionEntry {
    x: Option<toml::Value>,
    y: Option<toml::Value>,
}

impl PositionEntry {
    fn to_initial(&self, node: &str) -> InitialPosition {
        InitialPosition::new(
            coordinate(node, "x", self.x.as_ref()),
            coordinate(node, "y", self.y.as_ref()),
        )
    }
}

fn coordinate(node: &str, axis: &str, value: Option<&toml::Value>) -> Option<f32> {
    match value? {
        toml::Value::Float(v) => Some(*v as f32),
        toml::Value::Integer(v) => Some(*v as f32),
        other => {
            warn!(
                node = node,
                axis = axis,
                value = other.to_string();
                "Ignoring non-numeric coordinate"
            );
            None
        }
    }
}

fn edge_length(source: &str, target: &str, value: &toml::Value) -> f32 {
    match value {
        toml::Value::Float(v) => *v as f32,
        toml::Value::Integer(v) => *v as f32,
        other => {
            warn!(
                source = source,
                target = target,
                value = other.to_string();
                "Ignoring non-numeric edge length"
            );
            DEFAULT_LENGTH
        }
    }
}

impl GraphSource {
    /// Parses a TOML graph document.
    ///
    /// # Errors
    ///
    /// Returns [`TensileError::Input`] with the byte span of the problem when
    /// the text is not valid TOML or does not have the expected shape.
    pub fn from_toml_str(src: &str) -> Result<Self, TensileError> {
        let source: Self = toml::from_str(src).map_err(|err| {
            TensileError::new_input_error(err.message(), err.span(), src)
        })?;
        debug!(
            sources = source.edges.len(),
            positions = source.positions.len();
            "Graph document parsed"
        );
        Ok(source)
    }

    /// Number of declared edges
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexMap::len).sum()
    }

    /// Converts the document into a [`GraphBuilder`]
    pub fn into_builder(self) -> GraphBuilder {
        let mut builder = Graph::builder();
        for (source, targets) in &self.edges {
            for (target, value) in targets {
                let length = edge_length(source, target, value);
                builder = builder.edge(source.as_str(), target.as_str(), length);
            }
        }
        for (node, entry) in &self.positions {
            builder = builder.place(node.as_str(), entry.to_initial(node));
        }
        builder
    }
}

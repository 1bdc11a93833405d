//! Error types for Tensile operations.
//!
//! This module provides the main error type [`TensileError`] which wraps
//! the error conditions that can occur while reading, laying out and
//! rendering a graph.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for Tensile operations.
///
/// # Diagnostic Variants
///
/// The `Input` variant carries the rejected source text and, when known, the
/// byte range of the offending token, so callers can point at it in reports.
#[derive(Debug, Error)]
pub enum TensileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid graph input: {message}")]
    Input {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Style error: {0}")]
    Style(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TensileError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Input {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}

//! CLI logic for the Tensile graph layout tool.
//!
//! This module contains the core CLI logic: reading a graph document, laying
//! it out, and writing the final SVG, optionally with one SVG per frame.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{debug, info};

use tensile::{LayoutBuilder, TensileError};

/// File name of an animation frame, ordered by index
pub fn frame_file_name(index: usize) -> String {
    format!("frame-{index:04}.svg")
}

/// Run the Tensile CLI application
///
/// This function lays out the input graph and writes the resulting SVG to the
/// output file. With `frames_dir`, every animation frame is written there as
/// well.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TensileError` for:
/// - File I/O errors
/// - Configuration loading errors and unusable layout constants
/// - Graph document errors
/// - Invalid style colors
pub fn run(args: &Args) -> Result<(), TensileError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = config::load_config(args.config.as_ref())?.merged(&args.options());

    let source = fs::read_to_string(&args.input)?;

    let builder = LayoutBuilder::new(app_config);
    let mut graph = builder.parse(&source)?;

    let summary = match &args.frames_dir {
        Some(dir) => {
            let dir = Path::new(dir);
            fs::create_dir_all(dir)?;
            builder.render_frames(&mut graph, |index, svg| {
                let path = dir.join(frame_file_name(index));
                fs::write(&path, svg)?;
                debug!(frame = index, path = path.display().to_string(); "Frame written");
                Ok(())
            })?
        }
        None => builder.layout(&mut graph)?,
    };
    info!(
        frames = summary.frames,
        steps = summary.steps;
        "Layout finished"
    );

    builder.save_svg(&graph, &args.output)?;

    Ok(())
}

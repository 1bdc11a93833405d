//! Command-line argument definitions for the Tensile CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select input and output paths and the
//! configuration file, override a few layout settings, and control logging
//! verbosity.

use clap::Parser;

use tensile::config::Options;

/// Command-line arguments for the Tensile graph layout tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of animation frames (overrides the configuration)
    #[arg(long)]
    pub frames: Option<usize>,

    /// Layout steps per frame (overrides the configuration)
    #[arg(long)]
    pub steps_per_frame: Option<usize>,

    /// Seed for the random initial placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Draw arrowheads on edges
    #[arg(long)]
    pub directed: bool,

    /// Directory receiving one SVG file per animation frame
    #[arg(long)]
    pub frames_dir: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Configuration overrides given on the command line
    pub fn options(&self) -> Options {
        Options {
            frames: self.frames,
            steps_per_frame: self.steps_per_frame,
            seed: self.seed,
            directed: self.directed.then_some(true),
            ..Options::default()
        }
    }
}

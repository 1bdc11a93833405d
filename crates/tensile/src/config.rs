//! Configuration types for layout, rendering and animation.
//!
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! configuration file only needs the keys it wants to change. Unknown keys are
//! ignored.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Physical constants of the force simulation.
//! - [`StyleConfig`] - Presentation options consumed only by the renderer.
//! - [`AnimationConfig`] - Frame budget of the animation driver.
//! - [`Options`] - Flat set of optional overrides merged over a configuration.
//!
//! Configurations are plain values. Merging [`Options`] returns a new value
//! and never touches the original, so graphs laid out with different options
//! cannot affect each other.
//!
//! # Example
//!
//! ```
//! # use tensile::config::{AppConfig, Options};
//! let base = AppConfig::default();
//! let options = Options {
//!     k: Some(0.5),
//!     directed: Some(true),
//!     ..Options::default()
//! };
//!
//! let merged = base.merged(&options);
//! assert_eq!(merged.layout().k(), 0.5);
//! assert!(merged.style().directed());
//! assert_eq!(base.layout().k(), 1.0);
//! ```

use serde::Deserialize;

use tensile_core::{color::Color, geometry::Size};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Force simulation section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Rendering section.
    #[serde(default)]
    style: StyleConfig,

    /// Animation section.
    #[serde(default)]
    animation: AnimationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, animation: AnimationConfig) -> Self {
        Self {
            layout,
            style,
            animation,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the animation configuration.
    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    /// Returns a copy with every option that is set in `options` applied.
    pub fn merged(&self, options: &Options) -> Self {
        Self {
            layout: self.layout.merged(options),
            style: self.style.merged(options),
            animation: self.animation.merged(options),
        }
    }
}

/// Physical constants of the force simulation.
///
/// | Key | Meaning | Default |
/// |-----|---------|---------|
/// | `f1` | Repulsion strength between every pair of nodes | `1.0` |
/// | `f2` | Attraction strength along edges | `1.0` |
/// | `k` | Compactness: scales the ideal edge length and repulsion range, must be positive | `1.0` |
/// | `m` | Damper applied to every velocity contribution | `1.0` |
/// | `seed` | Seed for random initial placement | none |
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    f1: f32,
    f2: f32,
    k: f32,
    m: f32,
    seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            f1: 1.0,
            f2: 1.0,
            k: 1.0,
            m: 1.0,
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Creates a layout configuration from the four force constants.
    pub fn new(f1: f32, f2: f32, k: f32, m: f32) -> Self {
        Self {
            f1,
            f2,
            k,
            m,
            seed: None,
        }
    }

    /// Returns a copy using `seed` for random initial placement.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Repulsion strength.
    pub fn f1(&self) -> f32 {
        self.f1
    }

    /// Attraction strength.
    pub fn f2(&self) -> f32 {
        self.f2
    }

    /// Compactness constant.
    pub fn k(&self) -> f32 {
        self.k
    }

    /// Velocity damper.
    pub fn m(&self) -> f32 {
        self.m
    }

    /// Seed for random initial placement.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Checks that the constants keep every position finite.
    ///
    /// Attraction divides by `k`, so a zero, negative or NaN compactness
    /// turns the positions of connected nodes into NaN on the first step.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending constant.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.k.is_finite() && self.k > 0.0) {
            return Err(format!(
                "layout constant `k` must be a positive number, got {}",
                self.k
            ));
        }
        for (name, value) in [("f1", self.f1), ("f2", self.f2), ("m", self.m)] {
            if !value.is_finite() {
                return Err(format!(
                    "layout constant `{name}` must be a finite number, got {value}"
                ));
            }
        }
        Ok(())
    }

    /// Returns a copy with the layout options of `options` applied.
    pub fn merged(&self, options: &Options) -> Self {
        Self {
            f1: options.f1.unwrap_or(self.f1),
            f2: options.f2.unwrap_or(self.f2),
            k: options.k.unwrap_or(self.k),
            m: options.m.unwrap_or(self.m),
            seed: options.seed.or(self.seed),
        }
    }
}

/// Presentation options for the SVG renderer.
///
/// Colors are kept as strings and parsed on use, so an invalid color in a
/// configuration file is reported when rendering, not when loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    directed: bool,
    font: String,
    fill: String,
    stroke: String,
    stroke_width: f32,
    radius: f32,
    width: f32,
    height: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            directed: false,
            font: "10px sans-serif".to_string(),
            fill: "#fff".to_string(),
            stroke: "#000".to_string(),
            stroke_width: 0.5,
            radius: 4.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

impl StyleConfig {
    /// Whether edges are drawn with arrowheads.
    pub fn directed(&self) -> bool {
        self.directed
    }

    /// CSS font shorthand used for node labels.
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Node fill color.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn fill(&self) -> Result<Color, String> {
        Color::new(&self.fill).map_err(|err| format!("Invalid fill color in config: {err}"))
    }

    /// Edge, outline and label color.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn stroke(&self) -> Result<Color, String> {
        Color::new(&self.stroke).map_err(|err| format!("Invalid stroke color in config: {err}"))
    }

    /// Edge width; node outlines are drawn twice as wide.
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Node circle radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Output canvas size.
    pub fn canvas(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns a copy with the style options of `options` applied.
    pub fn merged(&self, options: &Options) -> Self {
        Self {
            directed: options.directed.unwrap_or(self.directed),
            font: options.font.clone().unwrap_or_else(|| self.font.clone()),
            fill: options.fill.clone().unwrap_or_else(|| self.fill.clone()),
            stroke: options.stroke.clone().unwrap_or_else(|| self.stroke.clone()),
            stroke_width: options.stroke_width.unwrap_or(self.stroke_width),
            radius: options.radius.unwrap_or(self.radius),
            width: options.width.unwrap_or(self.width),
            height: options.height.unwrap_or(self.height),
        }
    }
}

/// Frame budget of the animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    frames: usize,
    steps_per_frame: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: 100,
            steps_per_frame: 2,
        }
    }
}

impl AnimationConfig {
    /// Creates an animation configuration.
    pub fn new(frames: usize, steps_per_frame: usize) -> Self {
        Self {
            frames,
            steps_per_frame,
        }
    }

    /// Number of frames to produce.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Layout steps run before each frame.
    pub fn steps_per_frame(&self) -> usize {
        self.steps_per_frame
    }

    /// Returns a copy with the animation options of `options` applied.
    pub fn merged(&self, options: &Options) -> Self {
        Self {
            frames: options.frames.unwrap_or(self.frames),
            steps_per_frame: options.steps_per_frame.unwrap_or(self.steps_per_frame),
        }
    }
}

/// Flat set of named options, each overriding one configuration key.
///
/// Unset options leave the configured value in place.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Options {
    pub f1: Option<f32>,
    pub f2: Option<f32>,
    pub k: Option<f32>,
    pub m: Option<f32>,
    pub seed: Option<u64>,
    pub directed: Option<bool>,
    pub font: Option<String>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,
    pub radius: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub frames: Option<usize>,
    pub steps_per_frame: Option<usize>,
}

//! Frame-by-frame animation driver.
//!
//! An [`Animation`] alternates layout steps with calls to a [`FrameSink`]
//! for a fixed frame budget. The sink decides what a frame is: an SVG written
//! to disk, a redraw, or nothing at all when only the final layout matters.

use log::{debug, info};

use crate::{
    config::AnimationConfig,
    graph::Graph,
    layout::{Engine, StepReport},
};

/// Consumer of animation frames.
///
/// Implemented for every `FnMut(usize, &Graph) -> Result<(), E>`, so a closure
/// can be passed wherever a sink is expected.
pub trait FrameSink {
    /// Error returned by the sink; it aborts the animation.
    type Error;

    /// Called once per frame, after that frame's layout steps.
    ///
    /// The sink gets shared access only and cannot move nodes.
    fn frame(&mut self, index: usize, graph: &Graph) -> Result<(), Self::Error>;
}

impl<F, E> FrameSink for F
where
    F: FnMut(usize, &Graph) -> Result<(), E>,
{
    type Error = E;

    fn frame(&mut self, index: usize, graph: &Graph) -> Result<(), E> {
        self(index, graph)
    }
}

/// Summary of a finished animation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationSummary {
    /// Frames handed to the sink
    pub frames: usize,
    /// Layout steps run
    pub steps: usize,
    /// Coincident pairs skipped, summed over all steps
    pub coincident_pairs: usize,
    /// Report of the last step, if any step ran
    pub last_step: Option<StepReport>,
}

/// Animation driver with a bounded frame budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    frames: usize,
    steps_per_frame: usize,
}

impl Animation {
    /// Create an animation of `frames` frames with `steps_per_frame` layout
    /// steps before each frame
    pub fn new(frames: usize, steps_per_frame: usize) -> Self {
        Self {
            frames,
            steps_per_frame,
        }
    }

    /// Number of frames
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Layout steps per frame
    pub fn steps_per_frame(&self) -> usize {
        self.steps_per_frame
    }

    /// Runs the animation to completion or until the sink fails.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `sink`. Steps already applied to
    /// the graph are kept; the run can be resumed from the current state.
    pub fn run<S>(
        &self,
        graph: &mut Graph,
        engine: &Engine,
        sink: &mut S,
    ) -> Result<AnimationSummary, S::Error>
    where
        S: FrameSink,
    {
        debug!(
            frames = self.frames,
            steps_per_frame = self.steps_per_frame,
            nodes = graph.node_count();
            "Starting animation"
        );

        let mut summary = AnimationSummary::default();
        for index in 0..self.frames {
            for _ in 0..self.steps_per_frame {
                let report = engine.step(graph);
                summary.steps += 1;
                summary.coincident_pairs += report.coincident_pairs;
                summary.last_step = Some(report);
            }
            sink.frame(index, graph)?;
            summary.frames += 1;
        }

        info!(
            frames = summary.frames,
            steps = summary.steps,
            coincident_pairs = summary.coincident_pairs;
            "Animation finished"
        );
        Ok(summary)
    }
}

impl From<&AnimationConfig> for Animation {
    fn from(config: &AnimationConfig) -> Self {
        Self::new(config.frames(), config.steps_per_frame())
    }
}

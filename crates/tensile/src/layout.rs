//! Force-directed layout engine
//!
//! This module implements a spring-electrical layout in the
//! Fruchterman-Reingold family. Every pair of nodes repels within a cutoff
//! radius and every edge acts as a spring with a common rest length. One call
//! to [`Engine::step`] performs a single explicit integration step; the caller
//! decides how many steps to run.
//!
//! # Force model
//!
//! With the configured constants `f1`, `f2`, `k`, `m`, the engine derives the
//! ideal distance `K = 100·k` and the damper `M = 0.1·m`. For a pair at
//! displacement `(dx, dy)` and distance `d`:
//!
//! ```text
//! repulsion  = f1 · K² / d² / 20        if d < 10·K, else 0
//! attraction = f2 · (d² − K²) / K / d   if the pair is connected, else 0
//! delta      = (dx, dy) · (repulsion − attraction) · M
//! ```
//!
//! The first node of the pair gains `delta` and the second loses it, so each
//! pair contributes zero net velocity. After all pairs are processed every
//! node moves by its velocity clamped to `±10` per axis, and the velocity is
//! reset.
//!
//! Coincident nodes (`d = 0`) have no direction to push along. Such pairs are
//! skipped for the step and counted in the [`StepReport`].

use log::{trace, warn};

use tensile_core::geometry::Point;

use crate::{config::LayoutConfig, graph::Graph};

/// Largest displacement applied on each axis in one step
pub const MAX_DISPLACEMENT: f32 = 10.0;

const DISTANCE_SCALE: f32 = 100.0;
const DAMPER_SCALE: f32 = 0.1;
const REPULSION_RANGE: f32 = 10.0;
const REPULSION_DIVISOR: f32 = 20.0;

/// Outcome of a single layout step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Node pairs visited
    pub pairs: usize,
    /// Pairs skipped because both nodes were at the same position
    pub coincident_pairs: usize,
    /// Largest per-axis displacement applied to any node
    pub max_displacement: f32,
}

/// Force layout engine
///
/// The engine holds the derived constants of one [`LayoutConfig`] and is
/// otherwise stateless: all simulation state lives in the [`Graph`].
///
/// # Examples
///
/// ```
/// use tensile::{config::LayoutConfig, graph::Graph, layout::Engine, particle::InitialPosition};
///
/// let mut graph = Graph::builder()
///     .edge("a", "b", 1.0)
///     .place("a", InitialPosition::at(0.0, 0.0))
///     .place("b", InitialPosition::at(300.0, 0.0))
///     .build();
///
/// let engine = Engine::new(&LayoutConfig::default());
/// let report = engine.step(&mut graph);
///
/// assert_eq!(report.pairs, 1);
/// // The stretched spring pulls both ends inwards, at most 10 units per step
/// assert_eq!(graph.position("a".into()).unwrap().x(), 10.0);
/// assert_eq!(graph.position("b".into()).unwrap().x(), 290.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engine {
    repulsion: f32,
    attraction: f32,
    ideal_distance: f32,
    damper: f32,
}

impl Engine {
    /// Create a new engine from layout constants
    pub fn new(config: &LayoutConfig) -> Self {
        if let Err(reason) = config.validate() {
            warn!(reason = reason.as_str(); "Layout constants will not keep positions finite");
        }

        Self {
            repulsion: config.f1(),
            attraction: config.f2(),
            ideal_distance: config.k() * DISTANCE_SCALE,
            damper: config.m() * DAMPER_SCALE,
        }
    }

    /// Rest length of every edge, `K = 100·k`
    pub fn ideal_distance(&self) -> f32 {
        self.ideal_distance
    }

    /// Distance beyond which nodes stop repelling, `10·K`
    pub fn repulsion_range(&self) -> f32 {
        self.ideal_distance * REPULSION_RANGE
    }

    /// Velocity contribution to the first node of a pair.
    ///
    /// `displacement` is the first position minus the second. The second node
    /// receives the negated value. Returns `None` for coincident nodes.
    pub fn pair_force(&self, displacement: Point, connected: bool) -> Option<Point> {
        let d2 = displacement.length_squared();
        if d2 == 0.0 {
            return None;
        }
        let d = d2.sqrt();
        let k = self.ideal_distance;

        let repulsion = if d < self.repulsion_range() {
            self.repulsion * k * k / d2 / REPULSION_DIVISOR
        } else {
            0.0
        };
        let attraction = if connected {
            self.attraction * (d2 - k * k) / k / d
        } else {
            0.0
        };

        Some(displacement.scale((repulsion - attraction) * self.damper))
    }

    /// Accumulates the pairwise forces of the current positions into every
    /// particle's velocity, without moving anything.
    ///
    /// Returns `(pairs, coincident_pairs)`.
    pub fn accumulate_forces(&self, graph: &mut Graph) -> (usize, usize) {
        let ids: Vec<_> = graph.node_ids().collect();
        let positions: Vec<Point> = graph.particles().map(|p| p.position()).collect();
        let mut deltas = vec![Point::default(); positions.len()];
        let mut pairs = 0;
        let mut coincident_pairs = 0;

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                pairs += 1;
                let connected = graph.is_connected(ids[i], ids[j]);
                match self.pair_force(positions[i].sub_point(positions[j]), connected) {
                    Some(delta) => {
                        deltas[i] = deltas[i].add_point(delta);
                        deltas[j] = deltas[j].sub_point(delta);
                    }
                    None => coincident_pairs += 1,
                }
            }
        }

        for (particle, delta) in graph.particles_mut().zip(deltas) {
            particle.accelerate(delta);
        }

        (pairs, coincident_pairs)
    }

    /// Moves every particle by its clamped velocity and resets the velocity.
    ///
    /// Returns the largest per-axis displacement applied.
    pub fn integrate(&self, graph: &mut Graph) -> f32 {
        graph
            .particles_mut()
            .map(|particle| particle.integrate(MAX_DISPLACEMENT).max_abs_axis())
            .fold(0.0, f32::max)
    }

    /// Runs one full layout step: force accumulation followed by integration
    pub fn step(&self, graph: &mut Graph) -> StepReport {
        let (pairs, coincident_pairs) = self.accumulate_forces(graph);
        let max_displacement = self.integrate(graph);

        let report = StepReport {
            pairs,
            coincident_pairs,
            max_displacement,
        };
        trace!(report:?; "Layout step");
        report
    }

    /// Runs `steps` layout steps and returns the report of the last one
    pub fn run(&self, graph: &mut Graph, steps: usize) -> StepReport {
        let mut report = StepReport::default();
        for _ in 0..steps {
            report = self.step(graph);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use tensile_core::identifier::NodeId;

    use super::*;
    use crate::{config::Options, particle::InitialPosition};

    fn id(name: &str) -> NodeId {
        NodeId::new(name)
    }

    fn pinned_pair(a: Point, b: Point, connected: bool) -> Graph {
        let builder = Graph::builder()
            .place("a", InitialPosition::at(a.x(), a.y()))
            .place("b", InitialPosition::at(b.x(), b.y()));
        if connected {
            builder.edge("a", "b", 1.0).build()
        } else {
            builder.build()
        }
    }

    fn without_repulsion() -> LayoutConfig {
        LayoutConfig::default().merged(&Options {
            f1: Some(0.0),
            ..Options::default()
        })
    }

    #[test]
    fn test_derived_constants() {
        let engine = Engine::new(&LayoutConfig::new(1.0, 1.0, 2.0, 1.0));
        assert_eq!(engine.ideal_distance(), 200.0);
        assert_eq!(engine.repulsion_range(), 2000.0);
    }

    #[test]
    fn test_single_node_never_moves() {
        let mut graph = Graph::builder()
            .place("solo", InitialPosition::at(3.0, 4.0))
            .build();
        let engine = Engine::new(&LayoutConfig::default());

        let report = engine.run(&mut graph, 50);

        assert_eq!(report.pairs, 0);
        assert_eq!(report.max_displacement, 0.0);
        assert_eq!(graph.position(id("solo")), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_attraction_vanishes_at_ideal_distance() {
        let engine = Engine::new(&without_repulsion());
        let delta = engine.pair_force(Point::new(-100.0, 0.0), true).unwrap();
        assert!(delta.is_zero());
    }

    #[test]
    fn test_connected_pair_at_ideal_distance_is_at_rest() {
        let mut graph = pinned_pair(Point::new(0.0, 0.0), Point::new(100.0, 0.0), true);
        let engine = Engine::new(&without_repulsion());

        engine.step(&mut graph);

        assert_eq!(graph.position(id("a")), Some(Point::new(0.0, 0.0)));
        assert_eq!(graph.position(id("b")), Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn test_repulsion_alone_at_ideal_distance() {
        // f1·K²/d²/20 = 0.05, times dx = -100 and M = 0.1
        let mut graph = pinned_pair(Point::new(0.0, 0.0), Point::new(100.0, 0.0), true);
        let engine = Engine::new(&LayoutConfig::default());

        engine.step(&mut graph);

        let a = graph.position(id("a")).unwrap();
        let b = graph.position(id("b")).unwrap();
        assert_approx_eq!(f32, a.x(), -0.5, epsilon = 1e-5);
        assert_approx_eq!(f32, b.x(), 100.5, epsilon = 1e-4);
        assert_eq!(a.y(), 0.0);
        assert_eq!(b.y(), 0.0);
    }

    #[test]
    fn test_repulsion_is_cut_off_beyond_range() {
        let engine = Engine::new(&LayoutConfig::default());

        let inside = engine.pair_force(Point::new(999.0, 0.0), false).unwrap();
        let outside = engine.pair_force(Point::new(1000.0, 0.0), false).unwrap();

        assert!(inside.x() > 0.0);
        assert!(outside.is_zero());
    }

    #[test]
    fn test_stretched_spring_pulls_together() {
        let engine = Engine::new(&without_repulsion());
        // First node is left of the second, so a pull moves it right
        let delta = engine.pair_force(Point::new(-150.0, 0.0), true).unwrap();
        assert!(delta.x() > 0.0);
    }

    #[test]
    fn test_compressed_spring_pushes_apart() {
        let engine = Engine::new(&without_repulsion());
        let delta = engine.pair_force(Point::new(-50.0, 0.0), true).unwrap();
        assert!(delta.x() < 0.0);
    }

    #[test]
    fn test_displacement_is_clamped() {
        let mut graph = pinned_pair(Point::new(0.0, 0.0), Point::new(1e6, -1e6), true);
        let engine = Engine::new(&LayoutConfig::default());

        let report = engine.step(&mut graph);

        assert_eq!(report.max_displacement, MAX_DISPLACEMENT);
        assert_eq!(graph.position(id("a")), Some(Point::new(10.0, -10.0)));
        assert_eq!(graph.position(id("b")), Some(Point::new(1e6 - 10.0, -1e6 + 10.0)));
    }

    #[test]
    fn test_coincident_nodes_are_skipped() {
        let mut graph = pinned_pair(Point::new(5.0, 5.0), Point::new(5.0, 5.0), true);
        let engine = Engine::new(&LayoutConfig::default());

        let report = engine.step(&mut graph);

        assert_eq!(report.pairs, 1);
        assert_eq!(report.coincident_pairs, 1);
        assert_eq!(graph.position(id("a")), Some(Point::new(5.0, 5.0)));
        assert_eq!(graph.position(id("b")), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_coincident_pair_does_not_block_others() {
        let mut graph = Graph::builder()
            .edge("a", "b", 1.0)
            .edge("b", "c", 1.0)
            .place("a", InitialPosition::at(0.0, 0.0))
            .place("b", InitialPosition::at(0.0, 0.0))
            .place("c", InitialPosition::at(50.0, 0.0))
            .build();
        let engine = Engine::new(&LayoutConfig::default());

        let report = engine.step(&mut graph);

        assert_eq!(report.pairs, 3);
        assert_eq!(report.coincident_pairs, 1);
        assert_ne!(graph.position(id("c")), Some(Point::new(50.0, 0.0)));
        for (_, position) in graph.positions() {
            assert!(position.is_finite());
        }
    }

    #[test]
    fn test_velocity_is_zero_after_step() {
        let mut graph = Graph::builder()
            .edge("a", "b", 1.0)
            .edge("b", "c", 1.0)
            .seed(5)
            .build();
        let engine = Engine::new(&LayoutConfig::default());

        engine.step(&mut graph);

        for node in graph.node_ids().collect::<Vec<_>>() {
            assert!(graph.particle(node).unwrap().velocity().is_zero());
        }
    }

    #[test]
    fn test_accumulated_velocities_cancel_out() {
        let mut graph = Graph::builder()
            .edge("a", "b", 1.0)
            .edge("a", "c", 1.0)
            .edge("d", "b", 1.0)
            .place("a", InitialPosition::at(0.0, 0.0))
            .place("b", InitialPosition::at(30.0, 40.0))
            .place("c", InitialPosition::at(-120.0, 10.0))
            .place("d", InitialPosition::at(75.0, -60.0))
            .build();
        let engine = Engine::new(&LayoutConfig::default());

        engine.accumulate_forces(&mut graph);

        let total = graph
            .node_ids()
            .map(|node| graph.particle(node).unwrap().velocity())
            .fold(Point::default(), Point::add_point);
        assert_approx_eq!(f32, total.x(), 0.0, epsilon = 1e-4);
        assert_approx_eq!(f32, total.y(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_step_does_not_change_topology() {
        let mut graph = Graph::builder()
            .edge("a", "b", 2.0)
            .edge("c", "a", 3.0)
            .seed(17)
            .build();
        let adjacency = graph.adjacency().clone();
        let engine = Engine::new(&LayoutConfig::default());

        engine.run(&mut graph, 10);

        assert_eq!(graph.adjacency(), &adjacency);
        assert_eq!(graph.node_count(), 3);
    }
}

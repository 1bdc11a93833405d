//! Graph model: a weighted adjacency map plus one particle per node.
//!
//! Every identifier that appears as a source or a target in the adjacency map
//! gets exactly one [`Particle`], created the first time the identifier is
//! seen. Nodes are kept in first-encounter order, which is the order the layout
//! engine visits pairs in.

use indexmap::IndexMap;
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use tensile_core::{
    geometry::{Bounds, Point},
    identifier::NodeId,
};

use crate::particle::{InitialPosition, Particle};

/// Directed adjacency: `source -> { target -> length }`.
///
/// Edge lengths are stored and rendered but do not influence the forces:
/// every edge pulls toward the same ideal distance.
pub type Adjacency = IndexMap<NodeId, IndexMap<NodeId, f32>>;

/// A graph with simulated node positions.
///
/// The graph owns its particles for its whole lifetime; there is no API for
/// removing nodes or edges after construction.
///
/// # Examples
///
/// ```
/// use tensile::graph::Graph;
///
/// let graph = Graph::builder()
///     .edge("a", "b", 1.0)
///     .edge("b", "c", 1.0)
///     .seed(42)
///     .build();
///
/// assert_eq!(graph.node_count(), 3);
/// assert!(graph.is_connected("b".into(), "a".into()));
/// assert!(!graph.is_connected("a".into(), "c".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: IndexMap<NodeId, Particle>,
    edges: Adjacency,
}

impl Graph {
    /// Builds a graph from an adjacency map, placing every node randomly
    pub fn new(edges: Adjacency) -> Self {
        Self::with_rng(edges, &IndexMap::new(), &mut rand::rng())
    }

    /// Returns a [`GraphBuilder`] for incremental construction
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Builds a graph drawing random coordinates from `rng`.
    ///
    /// `placements` supplies initial coordinates for selected nodes. A placed
    /// node that appears in no edge still becomes part of the graph.
    pub fn with_rng<R>(
        edges: Adjacency,
        placements: &IndexMap<NodeId, InitialPosition>,
        rng: &mut R,
    ) -> Self
    where
        R: Rng,
    {
        let mut graph = Self {
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
        };

        for (&source, targets) in &edges {
            for &target in targets.keys() {
                graph.ensure_node(source, placement(placements, source), rng);
                graph.ensure_node(target, placement(placements, target), rng);
            }
        }
        for (&id, &initial) in placements {
            graph.ensure_node(id, initial, rng);
        }

        graph.edges = edges;
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Graph constructed"
        );
        graph
    }

    /// Inserts a particle for `id` unless one already exists.
    ///
    /// Returns `true` if a particle was created.
    fn ensure_node<R>(&mut self, id: NodeId, initial: InitialPosition, rng: &mut R) -> bool
    where
        R: Rng,
    {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, Particle::new(initial, rng));
        true
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of declared (directed) edges
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexMap::len).sum()
    }

    /// Returns true if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks whether `id` is a node of this graph
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Node identifiers in first-encounter order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Returns the particle of a node
    pub fn particle(&self, id: NodeId) -> Option<&Particle> {
        self.nodes.get(&id)
    }

    /// Returns the current position of a node
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(&id).map(Particle::position)
    }

    /// Current positions of all nodes, in node order
    pub fn positions(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.nodes
            .iter()
            .map(|(&id, particle)| (id, particle.position()))
    }

    /// Declared edges as `(source, target, length)` triples
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f32)> + '_ {
        self.edges.iter().flat_map(|(&source, targets)| {
            targets
                .iter()
                .map(move |(&target, &length)| (source, target, length))
        })
    }

    /// The adjacency map the graph was built from
    pub fn adjacency(&self) -> &Adjacency {
        &self.edges
    }

    /// Checks for a declared edge `source -> target`
    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.edges
            .get(&source)
            .is_some_and(|targets| targets.contains_key(&target))
    }

    /// Undirected adjacency test: an edge in either direction connects `a` and `b`
    pub fn is_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.has_edge(a, b) || self.has_edge(b, a)
    }

    /// Smallest rectangle containing every node position.
    ///
    /// See [`Bounds::from_points`] for the degenerate result of an empty graph.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.nodes.values().map(Particle::position))
    }

    pub(crate) fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.nodes.values()
    }

    pub(crate) fn particles_mut(&mut self) -> impl Iterator<Item = &mut Particle> + '_ {
        self.nodes.values_mut()
    }
}

fn placement(placements: &IndexMap<NodeId, InitialPosition>, id: NodeId) -> InitialPosition {
    placements.get(&id).copied().unwrap_or_default()
}

/// Incremental graph construction.
///
/// Collects edges and optional initial coordinates, then creates all
/// particles at once in [`build`](Self::build). With a [`seed`](Self::seed) the
/// random placement of unplaced nodes is reproducible.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    edges: Adjacency,
    placements: IndexMap<NodeId, InitialPosition>,
    seed: Option<u64>,
}

impl GraphBuilder {
    /// Declares the edge `source -> target` with the given length.
    ///
    /// Declaring the same edge twice keeps the last length.
    pub fn edge(
        mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        length: f32,
    ) -> Self {
        self.edges
            .entry(source.into())
            .or_default()
            .insert(target.into(), length);
        self
    }

    /// Adds every edge of an adjacency map
    pub fn edges(mut self, adjacency: Adjacency) -> Self {
        for (source, targets) in adjacency {
            let entry = self.edges.entry(source).or_default();
            entry.extend(targets);
        }
        self
    }

    /// Sets the initial coordinates of a node.
    ///
    /// The node is part of the built graph even if no edge mentions it.
    pub fn place(mut self, id: impl Into<NodeId>, initial: InitialPosition) -> Self {
        self.placements.insert(id.into(), initial);
        self
    }

    /// Seeds the random placement of nodes without initial coordinates
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Optional form of [`seed`](Self::seed)
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Creates the graph and its particles
    pub fn build(self) -> Graph {
        match self.seed {
            Some(seed) => self.build_with_rng(&mut StdRng::seed_from_u64(seed)),
            None => self.build_with_rng(&mut rand::rng()),
        }
    }

    /// Creates the graph drawing random coordinates from `rng`
    pub fn build_with_rng<R>(self, rng: &mut R) -> Graph
    where
        R: Rng,
    {
        Graph::with_rng(self.edges, &self.placements, rng)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn id(name: &str) -> NodeId {
        NodeId::new(name)
    }

    fn adjacency(pairs: &[(&str, &str)]) -> Adjacency {
        let mut edges = Adjacency::new();
        for &(source, target) in pairs {
            edges
                .entry(id(source))
                .or_default()
                .insert(id(target), 1.0);
        }
        edges
    }

    #[test]
    fn test_every_identifier_gets_one_particle() {
        let graph = Graph::new(adjacency(&[("a", "b"), ("a", "c"), ("c", "b"), ("d", "a")]));

        assert_eq!(graph.node_count(), 4);
        for name in ["a", "b", "c", "d"] {
            assert!(graph.contains(id(name)), "missing node {name}");
        }
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_nodes_keep_first_encounter_order() {
        let graph = Graph::new(adjacency(&[("x", "y"), ("z", "x"), ("y", "w")]));
        let order: Vec<NodeId> = graph.node_ids().collect();

        assert_eq!(order, vec![id("x"), id("y"), id("z"), id("w")]);
    }

    #[test]
    fn test_construction_is_idempotent() {
        let edges = adjacency(&[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);
        let expected: HashSet<NodeId> = ["a", "b", "c", "d"].into_iter().map(id).collect();

        let first = Graph::new(edges.clone());
        let second = Graph::new(edges);

        assert_eq!(first.node_ids().collect::<HashSet<_>>(), expected);
        assert_eq!(second.node_ids().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn test_repeated_endpoint_keeps_first_particle() {
        let graph = Graph::builder()
            .edge("hub", "a", 1.0)
            .edge("hub", "b", 1.0)
            .edge("c", "hub", 1.0)
            .place("hub", InitialPosition::at(5.0, 6.0))
            .build();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.position(id("hub")), Some(Point::new(5.0, 6.0)));
    }

    #[test]
    fn test_source_without_targets_creates_no_node() {
        let mut edges = adjacency(&[("a", "b")]);
        edges.insert(id("lonely"), IndexMap::new());

        let graph = Graph::new(edges);

        assert_eq!(graph.node_count(), 2);
        assert!(!graph.contains(id("lonely")));
    }

    #[test]
    fn test_placed_node_without_edges_is_kept() {
        let graph = Graph::builder()
            .place("solo", InitialPosition::at(1.0, 2.0))
            .build();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.position(id("solo")), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_unplaced_nodes_start_in_unit_square() {
        let graph = Graph::builder()
            .edge("a", "b", 1.0)
            .edge("b", "c", 1.0)
            .seed(9)
            .build();

        for (_, position) in graph.positions() {
            assert!((0.0..1.0).contains(&position.x()));
            assert!((0.0..1.0).contains(&position.y()));
        }
    }

    #[test]
    fn test_seed_makes_placement_reproducible() {
        let build = || {
            Graph::builder()
                .edge("a", "b", 1.0)
                .edge("b", "c", 2.0)
                .seed(1234)
                .build()
        };

        let first: Vec<_> = build().positions().collect();
        let second: Vec<_> = build().positions().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_connection_is_undirected() {
        let graph = Graph::new(adjacency(&[("a", "b")]));

        assert!(graph.has_edge(id("a"), id("b")));
        assert!(!graph.has_edge(id("b"), id("a")));
        assert!(graph.is_connected(id("a"), id("b")));
        assert!(graph.is_connected(id("b"), id("a")));
    }

    #[test]
    fn test_edges_iterates_declared_edges() {
        let graph = Graph::builder()
            .edge("a", "b", 2.5)
            .edge("b", "a", 1.0)
            .build();

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(id("a"), id("b"), 2.5), (id("b"), id("a"), 1.0)]);
    }

    #[test]
    fn test_builder_merges_adjacency() {
        let graph = Graph::builder()
            .edges(adjacency(&[("a", "b")]))
            .edges(adjacency(&[("a", "c")]))
            .build();

        assert_eq!(graph.adjacency()[&id("a")].len(), 2);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_bounds_cover_all_positions() {
        let graph = Graph::builder()
            .edge("a", "b", 1.0)
            .edge("b", "c", 1.0)
            .place("a", InitialPosition::at(0.0, 0.0))
            .place("b", InitialPosition::at(4.0, 2.0))
            .place("c", InitialPosition::at(-1.0, 5.0))
            .build();

        let bounds = graph.bounds();
        assert_eq!(bounds.x(), -1.0);
        assert_eq!(bounds.y(), 0.0);
        assert_eq!(bounds.width(), 5.0);
        assert_eq!(bounds.height(), 5.0);
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new(Adjacency::new());
        assert!(graph.is_empty());
        assert!(graph.bounds().is_empty());
    }
}

// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Vertex-colored graphs and canonical labeling.
//!
//! Matrix isomorphism is reduced to colored graph isomorphism: a matrix is
//! encoded as a graph whose color-preserving automorphisms correspond to the
//! matrix symmetries, a [`CanonicalLabelOracle`] orders the vertices
//! canonically, and the order is decoded back into a transformation of the
//! matrix.
//!
//! The oracle is a trait so any exact canonical labeling backend can be
//! plugged in; [`NautyOracle`] is the built-in implementation.
//!
//! ## Module Structure
//!
//! - `mod`: [`ColoredGraph`]
//! - `encode`: conference and orthogonal-array encodings
//! - `oracle`: [`CanonicalLabelOracle`] and [`NautyOracle`]
//! - `extract`: decoding a labeling into a [`ConferenceTransformation`]
//!
//! [`ConferenceTransformation`]: crate::matrix::ConferenceTransformation

pub mod encode;
pub mod extract;
pub mod oracle;

pub use encode::{to_array_graph, to_graph};
pub use extract::{
    check_labeling, extract_transformation, reduce_conference, reduce_conference_transformation,
};
pub use oracle::{CanonicalLabelOracle, NautyOracle};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Undirected simple graph on vertices `0..len`.
///
/// Vertex colors travel separately, as a slice indexed by vertex.
#[derive(Debug, Clone, Default)]
pub struct ColoredGraph {
    graph: UnGraph<(), ()>,
}

impl ColoredGraph {
    /// Graph with `vertices` isolated vertices.
    pub fn new(vertices: usize) -> Self {
        let mut graph = UnGraph::with_capacity(vertices, 0);
        for _ in 0..vertices {
            graph.add_node(());
        }
        Self { graph }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Add the edge `a`–`b`. Loops and repeated edges are ignored.
    pub fn add_edge(&mut self, a: usize, b: usize) {
        if a == b || self.has_edge(a, b) {
            return;
        }
        self.graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.graph.contains_edge(NodeIndex::new(a), NodeIndex::new(b))
    }

    /// Sorted neighbours of `v`.
    pub fn neighbours(&self, v: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(v))
            .map(NodeIndex::index)
            .collect();
        out.sort_unstable();
        out
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edges as `(a, b)` with `a < b`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph.edge_references().map(|e| {
            let (a, b) = (e.source().index(), e.target().index());
            (a.min(b), a.max(b))
        })
    }

    /// The graph with vertex `v` renamed to `perm[v]`.
    pub fn relabeled(&self, perm: &[usize]) -> ColoredGraph {
        let mut out = ColoredGraph::new(self.len());
        for (a, b) in self.edges() {
            out.add_edge(perm[a], perm[b]);
        }
        out
    }

    fn sorted_edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<_> = self.edges().collect();
        edges.sort_unstable();
        edges
    }
}

impl PartialEq for ColoredGraph {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.sorted_edges() == other.sorted_edges()
    }
}

impl Eq for ColoredGraph {}

pub mod edge;
pub mod gnp;
pub mod instances;
pub mod matrix;
pub mod weighted;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u64;

/// Edge weights and path costs
pub type Weight = u64;

/// Sentinel marking a missing edge (or a closed matrix cell); never a legal edge weight.
pub const INFINITE_WEIGHT: Weight = Weight::MAX;

/// Largest weight [`WeightedGraph::add_edge`] accepts. A tour has at most [`NumNodes::MAX`]
/// edges, so the cost of any tour over such weights fits into a [`Weight`].
pub const MAX_EDGE_WEIGHT: Weight = u32::MAX as Weight;

use std::ops::Range;

pub use edge::*;
pub use gnp::*;
pub use matrix::*;
pub use weighted::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns a range over all node indices. It does not borrow self and hence may be used
    /// where additional mutable references of self are needed
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph; an undirected edge counts once
    fn number_of_edges(&self) -> NumEdges;
}

pub trait WeightedAdjacencyList: GraphNodeOrder {
    /// Returns the out-going `(neighbor, weight)` pairs of `u` in insertion order.
    /// ** Panics if u >= n **
    fn neighbors_of(&self, u: Node) -> &[(Node, Weight)];

    /// Returns the number of out-going edges of `u` (parallel edges count individually)
    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).len() as NumNodes
    }

    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices_range().map(|u| self.degree_of(u))
    }
}

/// Provides efficient tests whether an edge exists
pub trait AdjacencyTest {
    /// Returns *true* exactly if the graph contains an edge FROM u TO v
    fn has_edge(&self, u: Node, v: Node) -> bool;
}

/// Everything the exact solvers read from a graph
pub trait TspGraph: WeightedAdjacencyList + GraphEdgeOrder + AdjacencyTest {}

impl<G> TspGraph for G where G: WeightedAdjacencyList + GraphEdgeOrder + AdjacencyTest {}

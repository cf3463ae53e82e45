use std::{error::Error, fmt::Debug};

use thiserror::Error;

use crate::graph::{Node, Weight};

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> Result<(), E>;
}

/// Diagnostics reported by [`crate::graph::WeightedGraph`]. None of them is fatal; an operation
/// returning one of these leaves the graph unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError<V: Debug> {
    #[error("vertex {0:?} does not exist")]
    UnknownVertex(V),

    #[error("vertex {0:?} already exists")]
    DuplicateVertex(V),

    #[error("edge ({0:?}, {1:?}, {2}) does not exist")]
    UnknownEdge(V, V, Weight),

    /// Same endpoints and same weight as an edge already stored
    #[error("edge ({0:?}, {1:?}, {2}) already exists")]
    DuplicateEdge(V, V, Weight),

    #[error("an undirected graph cannot have a self-loop at {0:?}")]
    SelfLoop(V),

    #[error("weight {0} is reserved as the infinite sentinel")]
    InfiniteWeight(Weight),

    #[error("weight {0} exceeds the largest edge weight {max}", max = crate::graph::MAX_EDGE_WEIGHT)]
    WeightTooLarge(Weight),

    #[error("node {0} has an edge to non-existing node {1}")]
    DanglingEdge(Node, Node),

    #[error("undirected edge ({0}, {1}, {2}) is only stored in one direction")]
    AsymmetricAdjacency(Node, Node, Weight),

    #[error("stored edge count {stored} does not match the {counted} edges found")]
    EdgeCountMismatch { stored: u64, counted: u64 },

    #[error("label index of {0:?} is out of sync with the vertex list")]
    IndexMismatch(V),
}

/// Reasons why a tour does not describe a Hamiltonian cycle of a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TourError {
    #[error("tour has {found} stops but a cycle through {expected_nodes} nodes needs {}", .expected_nodes + 1)]
    WrongLength { expected_nodes: usize, found: usize },

    #[error("tour starts at {first} but ends at {last}")]
    NotClosed { first: Node, last: Node },

    #[error("the first stop of a tour must carry weight 0, found {0}")]
    NonZeroStart(Weight),

    #[error("node {0} is visited more than once")]
    RepeatedNode(Node),

    #[error("there is no edge ({0}, {1}) of weight {2}")]
    MissingEdge(Node, Node, Weight),

    #[error("tour claims cost {claimed} but its edges sum to {actual}")]
    CostMismatch { claimed: Weight, actual: Weight },

    #[error("the edge weights of the tour overflow the cost type")]
    CostOverflow,
}

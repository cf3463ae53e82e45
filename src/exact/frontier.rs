use std::{cmp::Ordering, collections::BinaryHeap};

use fixedbitset::FixedBitSet;

use super::Tour;
use crate::graph::*;

/// A partial tour. The full path is stored on every node, so no parent links are needed.
#[derive(Clone, Debug)]
pub struct SearchNode {
    vertex: Node,
    cost: Weight,
    path: Vec<(Node, Weight)>,
    visited: FixedBitSet,
}

impl SearchNode {
    /// The node standing at `start` before any edge was taken
    pub fn root(start: Node, number_of_nodes: NumNodes) -> Self {
        let mut visited = FixedBitSet::with_capacity(number_of_nodes as usize);
        visited.insert(start as usize);

        let mut path = Vec::with_capacity(number_of_nodes as usize + 1);
        path.push((start, 0));

        Self {
            vertex: start,
            cost: 0,
            path,
            visited,
        }
    }

    /// The complete tour of a single node graph: `start` is re-entered at no cost
    pub fn trivial(start: Node) -> Self {
        let mut node = Self::root(start, 1);
        node.path.push((start, 0));
        node
    }

    /// Returns the node reached by following the edge to `v` of weight `weight`, or `None` if
    /// the cost of the longer path does not fit into a [`Weight`].
    pub fn child(&self, v: Node, weight: Weight) -> Option<Self> {
        let cost = self.cost.checked_add(weight)?;
        let mut child = self.clone();
        child.vertex = v;
        child.cost = cost;
        child.path.push((v, weight));
        child.visited.insert(v as usize);
        Some(child)
    }

    pub fn vertex(&self) -> Node {
        self.vertex
    }

    pub fn cost(&self) -> Weight {
        self.cost
    }

    pub fn path(&self) -> &[(Node, Weight)] {
        &self.path
    }

    /// Nodes on the path; the start is included
    pub fn visited(&self) -> &FixedBitSet {
        &self.visited
    }

    /// Number of edges taken so far
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    /// True iff the path visits all nodes and returned to `start`
    pub fn is_complete(&self, start: Node, number_of_nodes: NumNodes) -> bool {
        self.path.len() == number_of_nodes as usize + 1 && self.vertex == start
    }

    /// A node may be entered if it was not visited yet; the start may only be re-entered once
    /// every node is on the path.
    pub fn can_visit(&self, v: Node, start: Node, number_of_nodes: NumNodes) -> bool {
        if v == start {
            self.path.len() == number_of_nodes as usize
        } else {
            !self.visited.contains(v as usize)
        }
    }

    pub fn into_tour(self) -> Tour<Node> {
        Tour {
            path: self.path,
            cost: self.cost,
        }
    }

    pub fn to_tour(&self) -> Tour<Node> {
        self.clone().into_tour()
    }
}

struct Entry<N> {
    priority: Weight,
    seq: u64,
    node: N,
}

impl<N> PartialEq for Entry<N> {
    fn eq(&self, other: &Self) -> bool {
        (self.priority, self.seq) == (other.priority, other.seq)
    }
}

impl<N> Eq for Entry<N> {}

impl<N> PartialOrd for Entry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for Entry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; smallest (priority, seq) must compare greatest
        (other.priority, other.seq).cmp(&(self.priority, self.seq))
    }
}

/// Min-priority queue of search nodes keyed by `(priority, insertion sequence)`. The sequence
/// number is unique, so the order is total and equal priorities leave in FIFO order.
pub struct Frontier<N> {
    heap: BinaryHeap<Entry<N>>,
    next_seq: u64,
}

impl<N> Default for Frontier<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Frontier<N> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, priority: Weight, node: N) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            node,
        });
    }

    /// Removes the node with the smallest priority; ties go to the earliest insertion
    pub fn pop(&mut self) -> Option<(Weight, N)> {
        self.heap.pop().map(|e| (e.priority, e.node))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

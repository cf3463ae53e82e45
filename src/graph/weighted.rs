use std::{fmt, fmt::Debug, hash::Hash};

use fxhash::FxHashMap;
use log::debug;

use super::*;
use crate::errors::{GraphError, InvariantCheck};

/// Requirements on caller supplied vertex labels
pub trait Label: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Label for T {}

pub type GraphResult<T, V> = Result<T, GraphError<V>>;

macro_rules! reject {
    ($err : expr) => {{
        let err = $err;
        debug!("Rejected graph operation: {err}");
        return Err(err);
    }};
}

/// Weighted graph over caller supplied labels, stored as adjacency lists.
///
/// Each label is mapped to a dense [`Node`] index given by its position in insertion order;
/// removing a vertex shifts the indices of all later vertices down by one. Undirected edges are
/// stored in both directions, but are counted and reported once.
///
/// Parallel edges are allowed as long as their weights differ. Operations referencing a missing
/// vertex or edge, self-loops in undirected graphs and duplicated edges are rejected with a
/// [`GraphError`] and leave the graph untouched.
#[derive(Clone)]
pub struct WeightedGraph<V> {
    directed: bool,
    labels: Vec<V>,
    index: FxHashMap<V, Node>,
    adj: Vec<Vec<(Node, Weight)>>,
    number_of_edges: NumEdges,
}

impl<V: Label> Default for WeightedGraph<V> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<V: Label> WeightedGraph<V> {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            labels: Vec::new(),
            index: FxHashMap::default(),
            adj: Vec::new(),
            number_of_edges: 0,
        }
    }

    pub fn new_directed() -> Self {
        Self::new(true)
    }

    pub fn new_undirected() -> Self {
        Self::new(false)
    }

    /// Builds a graph from an edge list; vertices are added in order of first appearance.
    pub fn try_from_edges<I>(directed: bool, edges: I) -> GraphResult<Self, V>
    where
        I: IntoIterator<Item = (V, V, Weight)>,
    {
        let mut graph = Self::new(directed);
        for (u, v, w) in edges {
            for x in [&u, &v] {
                if !graph.contains_vertex(x) {
                    graph.add_vertex(x.clone())?;
                }
            }
            graph.add_edge(u, v, w)?;
        }
        Ok(graph)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Removes all vertices and edges; the orientation is kept.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.index.clear();
        self.adj.clear();
        self.number_of_edges = 0;
    }

    pub fn number_of_vertices(&self) -> usize {
        self.labels.len()
    }

    /// Returns the vertices in their fixed (insertion) order
    pub fn vertices(&self) -> &[V] {
        &self.labels
    }

    pub fn contains_vertex(&self, v: &V) -> bool {
        self.index.contains_key(v)
    }

    pub fn index_of(&self, v: &V) -> GraphResult<Node, V> {
        self.index
            .get(v)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(v.clone()))
    }

    /// Returns the label of node `u`.
    /// ** Panics if u >= n **
    pub fn label_of(&self, u: Node) -> &V {
        &self.labels[u as usize]
    }

    pub fn add_vertex(&mut self, v: V) -> GraphResult<Node, V> {
        if self.contains_vertex(&v) {
            reject!(GraphError::DuplicateVertex(v));
        }

        let u = self.labels.len() as Node;
        self.index.insert(v.clone(), u);
        self.labels.push(v);
        self.adj.push(Vec::new());
        Ok(u)
    }

    /// Removes `v` together with all edges into and out of it.
    pub fn remove_vertex(&mut self, v: &V) -> GraphResult<(), V> {
        let removed = match self.index_of(v) {
            Ok(u) => u,
            Err(err) => reject!(err),
        };

        let out_edges = self.adj[removed as usize].len() as NumEdges;
        let in_edges = if self.directed {
            self.adj
                .iter()
                .enumerate()
                .filter(|&(u, _)| u != removed as usize)
                .map(|(_, nbs)| nbs.iter().filter(|&&(x, _)| x == removed).count() as NumEdges)
                .sum()
        } else {
            0
        };
        self.number_of_edges -= out_edges + in_edges;

        self.adj.remove(removed as usize);
        for nbs in &mut self.adj {
            nbs.retain(|&(x, _)| x != removed);
            for (x, _) in nbs.iter_mut() {
                if *x > removed {
                    *x -= 1;
                }
            }
        }

        let label = self.labels.remove(removed as usize);
        self.index.remove(&label);
        for (u, label) in self.labels.iter().enumerate().skip(removed as usize) {
            self.index.insert(label.clone(), u as Node);
        }

        Ok(())
    }

    /// Adds the edge FROM `u` TO `v`; in an undirected graph also the edge FROM `v` TO `u`.
    pub fn add_edge(&mut self, u: V, v: V, weight: Weight) -> GraphResult<(), V> {
        let (iu, iv) = match (self.index_of(&u), self.index_of(&v)) {
            (Ok(iu), Ok(iv)) => (iu, iv),
            (Err(err), _) | (_, Err(err)) => reject!(err),
        };

        if !self.directed && iu == iv {
            reject!(GraphError::SelfLoop(u));
        }

        if weight == INFINITE_WEIGHT {
            reject!(GraphError::InfiniteWeight(weight));
        }

        if weight > MAX_EDGE_WEIGHT {
            reject!(GraphError::WeightTooLarge(weight));
        }

        if self.adj[iu as usize].contains(&(iv, weight)) {
            reject!(GraphError::DuplicateEdge(u, v, weight));
        }

        self.adj[iu as usize].push((iv, weight));
        if !self.directed {
            self.adj[iv as usize].push((iu, weight));
        }
        self.number_of_edges += 1;

        Ok(())
    }

    /// Removes the edge FROM `u` TO `v` with the given weight (and its mirror if undirected).
    pub fn remove_edge(&mut self, u: V, v: V, weight: Weight) -> GraphResult<(), V> {
        let (iu, iv) = match (self.index_of(&u), self.index_of(&v)) {
            (Ok(iu), Ok(iv)) => (iu, iv),
            (Err(err), _) | (_, Err(err)) => reject!(err),
        };

        let Some(pos) = self.adj[iu as usize]
            .iter()
            .position(|&e| e == (iv, weight))
        else {
            reject!(GraphError::UnknownEdge(u, v, weight));
        };

        self.adj[iu as usize].remove(pos);
        if !self.directed {
            if let Some(pos) = self.adj[iv as usize]
                .iter()
                .position(|&e| e == (iu, weight))
            {
                self.adj[iv as usize].remove(pos);
            }
        }
        self.number_of_edges -= 1;

        Ok(())
    }

    /// Removes every edge into and out of `v`; the vertex itself stays.
    pub fn remove_edges_at_vertex(&mut self, v: &V) -> GraphResult<(), V> {
        let u = match self.index_of(v) {
            Ok(u) => u,
            Err(err) => reject!(err),
        };

        let mut removed = self.adj[u as usize].len() as NumEdges;
        self.adj[u as usize].clear();
        for (x, nbs) in self.adj.iter_mut().enumerate() {
            let before = nbs.len();
            nbs.retain(|&(y, _)| y != u);
            if self.directed && x != u as usize {
                removed += (before - nbs.len()) as NumEdges;
            }
        }
        self.number_of_edges -= removed;

        Ok(())
    }

    /// Returns all edges at index level. Directed edges are reported as stored; undirected
    /// edges are reported once, from the endpoint with the smaller index.
    pub fn weighted_edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.adj.iter().enumerate().flat_map(move |(u, nbs)| {
            let u = u as Node;
            nbs.iter()
                .filter(move |&&(v, _)| self.directed || u < v)
                .map(move |&(v, w)| WeightedEdge(u, v, w))
        })
    }

    /// Returns all edges with their labels, following [`WeightedGraph::weighted_edges`]
    pub fn edges(&self) -> Vec<LabeledEdge<V>> {
        self.weighted_edges()
            .map(|WeightedEdge(u, v, w)| LabeledEdge {
                from: self.label_of(u).clone(),
                to: self.label_of(v).clone(),
                weight: w,
            })
            .collect()
    }

    /// Returns the `(neighbor, weight)` pairs reachable from `v` in insertion order
    pub fn adjacent(&self, v: &V) -> GraphResult<impl Iterator<Item = (&V, Weight)> + '_, V> {
        let u = self.index_of(v)?;
        Ok(self.adj[u as usize]
            .iter()
            .map(|&(x, w)| (self.label_of(x), w)))
    }

    /// Returns true if there is at least one edge FROM `u` TO `v`
    pub fn is_adjacent(&self, u: &V, v: &V) -> GraphResult<bool, V> {
        let iu = self.index_of(u)?;
        let iv = self.index_of(v)?;
        Ok(self.has_edge(iu, iv))
    }

    /// Returns the 0/1 connectivity matrix together with the vertex order used for its rows
    /// and columns.
    pub fn adjacency_matrix(&self) -> (Vec<Vec<bool>>, &[V]) {
        let n = self.len();
        let mut mat = vec![vec![false; n]; n];
        for WeightedEdge(u, v, _) in self.weighted_edges() {
            mat[u as usize][v as usize] = true;
            if !self.directed {
                mat[v as usize][u as usize] = true;
            }
        }
        (mat, &self.labels)
    }

    /// Returns the dense cost matrix with the vertex order of [`WeightedGraph::vertices`]
    pub fn cost_matrix(&self) -> CostMatrix {
        CostMatrix::from_graph(self)
    }
}

impl<V> GraphNodeOrder for WeightedGraph<V> {
    fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }
}

impl<V> GraphEdgeOrder for WeightedGraph<V> {
    fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }
}

impl<V> WeightedAdjacencyList for WeightedGraph<V> {
    fn neighbors_of(&self, u: Node) -> &[(Node, Weight)] {
        &self.adj[u as usize]
    }
}

impl<V> AdjacencyTest for WeightedGraph<V> {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.adj[u as usize].iter().any(|&(x, _)| x == v)
    }
}

impl<V: Label> InvariantCheck<GraphError<V>> for WeightedGraph<V> {
    fn is_correct(&self) -> Result<(), GraphError<V>> {
        let n = self.number_of_nodes();

        if self.index.len() != self.labels.len() {
            // some label is missing in the index, find one to report
            if let Some(v) = self.labels.iter().find(|v| !self.index.contains_key(*v)) {
                return Err(GraphError::IndexMismatch(v.clone()));
            }
        }

        for (u, label) in self.labels.iter().enumerate() {
            if self.index.get(label) != Some(&(u as Node)) {
                return Err(GraphError::IndexMismatch(label.clone()));
            }
        }

        let mut counted: NumEdges = 0;
        for u in self.vertices_range() {
            for &(v, w) in self.neighbors_of(u) {
                if v >= n {
                    return Err(GraphError::DanglingEdge(u, v));
                }

                if self.directed {
                    counted += 1;
                    continue;
                }

                if u == v {
                    return Err(GraphError::SelfLoop(self.label_of(u).clone()));
                }

                if !self.neighbors_of(v).contains(&(u, w)) {
                    return Err(GraphError::AsymmetricAdjacency(u, v, w));
                }

                if u < v {
                    counted += 1;
                }
            }
        }

        if counted != self.number_of_edges {
            return Err(GraphError::EdgeCountMismatch {
                stored: self.number_of_edges,
                counted,
            });
        }

        Ok(())
    }
}

impl<V: Debug> Debug for WeightedGraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.directed { "directed" } else { "undirected" };
        write!(f, "{kind} graph, vertices: {:?}, adjacency: [", self.labels)?;
        for (u, nbs) in self.adj.iter().enumerate() {
            write!(f, "{u}: {nbs:?}, ")?;
        }
        write!(f, "]")
    }
}

impl<V: fmt::Display> fmt::Display for WeightedGraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (u, nbs) in self.adj.iter().enumerate() {
            for &(v, w) in nbs {
                writeln!(
                    f,
                    "{} -> {} edge weight: {w}",
                    self.labels[u], self.labels[v as usize]
                )?;
            }
        }
        Ok(())
    }
}

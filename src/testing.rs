use itertools::Itertools;
use rand::Rng;

use crate::{exact::Tour, graph::*};

/// Random G(n,p) instance on nodes `0..n` with weights in `1..20`
pub fn random_instance(
    rng: &mut impl Rng,
    n: NumNodes,
    p: f64,
    directed: bool,
) -> WeightedGraph<Node> {
    WeightedGraph::<Node>::random_gnp(rng, n, p, 1..20, directed)
}

/// Enumerates every Hamiltonian cycle starting at `start`, using the cheapest edge between
/// consecutive stops. Exponential; only meant for tiny graphs.
pub fn all_tours<G: WeightedAdjacencyList>(graph: &G, start: Node) -> Vec<Tour<Node>> {
    let n = graph.number_of_nodes();
    if n == 1 {
        return vec![Tour::trivial(start)];
    }

    let matrix = CostMatrix::from_graph(graph);
    let others = graph.vertices_range().filter(|&u| u != start).collect_vec();

    others
        .iter()
        .copied()
        .permutations(others.len())
        .filter_map(|order| {
            let mut path = vec![(start, 0)];
            let mut cost: Weight = 0;
            let mut prev = start;
            for v in order.into_iter().chain(std::iter::once(start)) {
                let w = matrix.get(prev, v);
                if w == INFINITE_WEIGHT {
                    return None;
                }
                path.push((v, w));
                cost += w;
                prev = v;
            }
            Some(Tour { path, cost })
        })
        .collect()
}

/// Cost of the cheapest Hamiltonian cycle or `None` if there is none
pub fn brute_force_optimum<G: WeightedAdjacencyList>(graph: &G, start: Node) -> Option<Weight> {
    all_tours(graph, start).into_iter().map(|t| t.cost).min()
}

/// Adjacency lists without the weight limit of [`WeightedGraph::add_edge`]
pub struct RawAdjacency(pub Vec<Vec<(Node, Weight)>>);

impl RawAdjacency {
    /// Directed triangle `0 -> 1 -> 2 -> 0` costing `2h + 1` while the reverse direction
    /// costs `2h + 5`, with `h = Weight::MAX / 2`. Only the first fits into a [`Weight`].
    pub fn heavy_triangle() -> Self {
        let h = Weight::MAX / 2;
        RawAdjacency(vec![
            vec![(1, h), (2, h)],
            vec![(2, h), (0, 5)],
            vec![(0, 1), (1, h)],
        ])
    }
}

impl GraphNodeOrder for RawAdjacency {
    fn number_of_nodes(&self) -> NumNodes {
        self.0.len() as NumNodes
    }
}

impl GraphEdgeOrder for RawAdjacency {
    fn number_of_edges(&self) -> NumEdges {
        self.0.iter().map(|nbs| nbs.len() as NumEdges).sum()
    }
}

impl WeightedAdjacencyList for RawAdjacency {
    fn neighbors_of(&self, u: Node) -> &[(Node, Weight)] {
        &self.0[u as usize]
    }
}

impl AdjacencyTest for RawAdjacency {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.0[u as usize].iter().any(|&(x, _)| x == v)
    }
}

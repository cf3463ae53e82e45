use std::fmt;

use fixedbitset::FixedBitSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{errors::TourError, graph::*};

/// A closed tour. `path` lists every stop together with the weight of the edge used to reach
/// it; the first stop carries weight 0 and the last stop is the start again.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tour<T> {
    pub path: Vec<(T, Weight)>,
    pub cost: Weight,
}

impl<T> Tour<T> {
    /// Number of stops including the return to the start
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn start(&self) -> Option<&T> {
        self.path.first().map(|(v, _)| v)
    }

    pub fn stops(&self) -> impl Iterator<Item = &T> + '_ {
        self.path.iter().map(|(v, _)| v)
    }

    pub fn map_vertices<U, F: FnMut(T) -> U>(self, mut f: F) -> Tour<U> {
        Tour {
            path: self.path.into_iter().map(|(v, w)| (f(v), w)).collect(),
            cost: self.cost,
        }
    }
}

impl Tour<Node> {
    /// The tour of a graph with a single node: leave `start` and stay there at no cost
    pub fn trivial(start: Node) -> Self {
        Self {
            path: vec![(start, 0), (start, 0)],
            cost: 0,
        }
    }

    /// Checks that this tour is a Hamiltonian cycle of `graph` using only existing edges and
    /// that `cost` is the sum of its edge weights.
    pub fn verify<G: WeightedAdjacencyList>(&self, graph: &G) -> Result<(), TourError> {
        let n = graph.len();
        if self.path.len() != n + 1 || n == 0 {
            return Err(TourError::WrongLength {
                expected_nodes: n,
                found: self.path.len(),
            });
        }

        let (first, first_weight) = self.path[0];
        let (last, _) = self.path[n];
        if first != last {
            return Err(TourError::NotClosed { first, last });
        }
        if first_weight != 0 {
            return Err(TourError::NonZeroStart(first_weight));
        }

        let mut seen = FixedBitSet::with_capacity(n);
        for &(u, _) in &self.path[..n] {
            if (u as usize) >= n || seen.put(u as usize) {
                return Err(TourError::RepeatedNode(u));
            }
        }

        if n > 1 {
            for (&(u, _), &(v, w)) in self.path.iter().tuple_windows() {
                if !graph.neighbors_of(u).contains(&(v, w)) {
                    return Err(TourError::MissingEdge(u, v, w));
                }
            }
        }

        let actual = self
            .path
            .iter()
            .try_fold(0 as Weight, |acc, &(_, w)| acc.checked_add(w))
            .ok_or(TourError::CostOverflow)?;
        if actual != self.cost {
            return Err(TourError::CostMismatch {
                claimed: self.cost,
                actual,
            });
        }

        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for Tour<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (cost {})", self.stops().join(" -> "), self.cost)
    }
}

/// Why a search returned before it could prove optimality or infeasibility
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interruption {
    ExpansionLimit,
    Timeout,
    Cancelled,
}

impl fmt::Display for Interruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Interruption::ExpansionLimit => "expansion limit reached",
            Interruption::Timeout => "timeout",
            Interruption::Cancelled => "cancelled",
        };
        write!(f, "{reason}")
    }
}

/// Result of a solver run. Neither a missing Hamiltonian cycle nor an interruption is an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome<T> {
    /// Proven minimum-cost Hamiltonian cycle
    Optimal(Tour<T>),
    /// The search space was exhausted without reaching a Hamiltonian cycle
    NoSolution,
    /// A search limit tripped; `best` is the incumbent at that point, if any
    Interrupted {
        best: Option<Tour<T>>,
        reason: Interruption,
    },
}

impl<T> SearchOutcome<T> {
    /// Returns the optimal tour or the incumbent of an interrupted search
    pub fn tour(&self) -> Option<&Tour<T>> {
        match self {
            SearchOutcome::Optimal(tour) => Some(tour),
            SearchOutcome::Interrupted { best, .. } => best.as_ref(),
            SearchOutcome::NoSolution => None,
        }
    }

    pub fn into_tour(self) -> Option<Tour<T>> {
        match self {
            SearchOutcome::Optimal(tour) => Some(tour),
            SearchOutcome::Interrupted { best, .. } => best,
            SearchOutcome::NoSolution => None,
        }
    }

    pub fn cost(&self) -> Option<Weight> {
        self.tour().map(|t| t.cost)
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, SearchOutcome::Optimal(_))
    }

    pub fn is_no_solution(&self) -> bool {
        matches!(self, SearchOutcome::NoSolution)
    }

    pub fn interruption(&self) -> Option<Interruption> {
        match self {
            SearchOutcome::Interrupted { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    pub fn map_vertices<U, F: FnMut(T) -> U>(self, f: F) -> SearchOutcome<U> {
        match self {
            SearchOutcome::Optimal(tour) => SearchOutcome::Optimal(tour.map_vertices(f)),
            SearchOutcome::NoSolution => SearchOutcome::NoSolution,
            SearchOutcome::Interrupted { best, reason } => SearchOutcome::Interrupted {
                best: best.map(|t| t.map_vertices(f)),
                reason,
            },
        }
    }
}

impl<T: fmt::Display> fmt::Display for SearchOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Optimal(tour) => write!(f, "optimal: {tour}"),
            SearchOutcome::NoSolution => write!(f, "no Hamiltonian cycle"),
            SearchOutcome::Interrupted {
                best: Some(tour),
                reason,
            } => write!(f, "interrupted ({reason}), best known: {tour}"),
            SearchOutcome::Interrupted { best: None, reason } => {
                write!(f, "interrupted ({reason}), no tour known")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn triangle() -> WeightedGraph<Node> {
        WeightedGraph::try_from_edges(false, [(0, 1, 2), (1, 2, 3), (2, 0, 4)]).unwrap()
    }

    #[test]
    fn verify_accepts_cycle() {
        let tour = Tour {
            path: vec![(0, 0), (1, 2), (2, 3), (0, 4)],
            cost: 9,
        };
        assert_eq!(tour.verify(&triangle()), Ok(()));
        assert_eq!(tour.len(), 4);
        assert_eq!(tour.start(), Some(&0));
    }

    #[test]
    fn verify_rejects() {
        let graph = triangle();

        let short = Tour {
            path: vec![(0, 0), (1, 2), (0, 2)],
            cost: 4,
        };
        assert!(matches!(
            short.verify(&graph),
            Err(TourError::WrongLength { .. })
        ));

        let open = Tour {
            path: vec![(0, 0), (1, 2), (2, 3), (1, 3)],
            cost: 8,
        };
        assert!(matches!(open.verify(&graph), Err(TourError::NotClosed { .. })));

        let repeated = Tour {
            path: vec![(0, 0), (1, 2), (1, 0), (0, 2)],
            cost: 4,
        };
        assert_eq!(repeated.verify(&graph), Err(TourError::RepeatedNode(1)));

        let wrong_weight = Tour {
            path: vec![(0, 0), (1, 2), (2, 5), (0, 4)],
            cost: 11,
        };
        assert_eq!(
            wrong_weight.verify(&graph),
            Err(TourError::MissingEdge(1, 2, 5))
        );

        let wrong_cost = Tour {
            path: vec![(0, 0), (2, 4), (1, 3), (0, 2)],
            cost: 10,
        };
        assert_eq!(
            wrong_cost.verify(&graph),
            Err(TourError::CostMismatch {
                claimed: 10,
                actual: 9
            })
        );
    }

    #[test]
    fn verify_rejects_overflowing_cost() {
        let graph = crate::testing::RawAdjacency::heavy_triangle();
        let h = Weight::MAX / 2;

        let cheap = Tour {
            path: vec![(0, 0), (1, h), (2, h), (0, 1)],
            cost: Weight::MAX,
        };
        assert_eq!(cheap.verify(&graph), Ok(()));

        let expensive = Tour {
            path: vec![(0, 0), (2, h), (1, h), (0, 5)],
            cost: Weight::MAX,
        };
        assert_eq!(expensive.verify(&graph), Err(TourError::CostOverflow));
    }

    #[test]
    fn trivial() {
        let mut graph = WeightedGraph::new_undirected();
        graph.add_vertex(0u32).unwrap();
        assert_eq!(Tour::trivial(0).verify(&graph), Ok(()));
        assert_eq!(Tour::trivial(0).cost, 0);
    }

    #[test]
    fn outcome_accessors() {
        let tour = Tour {
            path: vec![(0, 0), (0, 0)],
            cost: 0,
        };
        let optimal = SearchOutcome::Optimal(tour.clone());
        assert!(optimal.is_optimal());
        assert_eq!(optimal.cost(), Some(0));

        let interrupted = SearchOutcome::Interrupted {
            best: Some(tour),
            reason: Interruption::Timeout,
        };
        assert!(!interrupted.is_optimal());
        assert_eq!(interrupted.interruption(), Some(Interruption::Timeout));
        assert_eq!(
            interrupted.map_vertices(|v: Node| v + 1).tour().unwrap().path,
            [(1, 0), (1, 0)]
        );

        assert!(SearchOutcome::<Node>::NoSolution.is_no_solution());
        assert_eq!(SearchOutcome::<Node>::NoSolution.tour(), None);
    }

    #[test]
    fn display() {
        let tour = Tour {
            path: vec![("A", 0), ("B", 1), ("A", 1)],
            cost: 2,
        };
        assert_eq!(format!("{tour}"), "A -> B -> A (cost 2)");
        assert_eq!(
            format!("{}", SearchOutcome::Optimal(tour)),
            "optimal: A -> B -> A (cost 2)"
        );
    }
}

//! Exact solvers for the travelling salesperson problem on [`WeightedGraph`]s.
//!
//! Both solvers search the tree of partial tours rooted at the start vertex and return a
//! [`SearchOutcome`]: either a proven optimal tour, the proof that no Hamiltonian cycle exists,
//! or, if a [`SearchLimits`] tripped, the best tour known at that point.

pub mod branch_and_bound;
pub mod frontier;
pub mod limits;
pub mod reduction;
pub mod stats;
pub mod tour;
pub mod uniform_cost;

pub use branch_and_bound::*;
pub use frontier::*;
pub use limits::*;
pub use reduction::*;
pub use stats::*;
pub use tour::*;
pub use uniform_cost::*;

use crate::{errors::GraphError, graph::*};

/// Cheapest tour through `start` found by uniform cost search.
///
/// Returns an error only if `start` is not a vertex of `graph`.
pub fn solve_ucs<V: Label>(
    graph: &WeightedGraph<V>,
    start: &V,
) -> Result<SearchOutcome<V>, GraphError<V>> {
    solve_ucs_with_limits(graph, start, SearchLimits::unlimited())
}

pub fn solve_ucs_with_limits<V: Label>(
    graph: &WeightedGraph<V>,
    start: &V,
    limits: SearchLimits,
) -> Result<SearchOutcome<V>, GraphError<V>> {
    let start = graph.index_of(start)?;
    let outcome = UniformCostSearch::new(graph, start)
        .with_limits(limits)
        .solve();
    Ok(outcome.map_vertices(|u| graph.label_of(u).clone()))
}

/// Cheapest tour through `start` found by branch and bound with the default
/// [`BranchAndBoundConfig`].
///
/// Returns an error only if `start` is not a vertex of `graph`.
pub fn solve_branch_and_bound<V: Label>(
    graph: &WeightedGraph<V>,
    start: &V,
) -> Result<SearchOutcome<V>, GraphError<V>> {
    solve_branch_and_bound_with_limits(graph, start, SearchLimits::unlimited())
}

pub fn solve_branch_and_bound_with_limits<V: Label>(
    graph: &WeightedGraph<V>,
    start: &V,
    limits: SearchLimits,
) -> Result<SearchOutcome<V>, GraphError<V>> {
    let start = graph.index_of(start)?;
    let outcome = BranchAndBound::new(graph, start)
        .with_limits(limits)
        .solve();
    Ok(outcome.map_vertices(|u| graph.label_of(u).clone()))
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, atomic::AtomicBool};

    use itertools::Itertools;
    use paste::paste;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use rayon::prelude::*;

    use super::*;
    use crate::{graph::instances::*, testing::*};

    fn ucs_on<G: TspGraph>(
        graph: &G,
        start: Node,
        limits: SearchLimits,
    ) -> (SearchOutcome<Node>, SearchStatistics) {
        let mut algo = UniformCostSearch::new(graph, start).with_limits(limits);
        let outcome = algo.solve();
        (outcome, algo.statistics().clone())
    }

    fn bnb_on<G: TspGraph>(
        graph: &G,
        start: Node,
        limits: SearchLimits,
    ) -> (SearchOutcome<Node>, SearchStatistics) {
        let mut algo = BranchAndBound::new(graph, start)
            .with_config(BranchAndBoundConfig {
                paranoid: true,
                ..Default::default()
            })
            .with_limits(limits);
        let outcome = algo.solve();
        (outcome, algo.statistics().clone())
    }

    fn pessimistic_bnb_on<G: TspGraph>(
        graph: &G,
        start: Node,
        limits: SearchLimits,
    ) -> (SearchOutcome<Node>, SearchStatistics) {
        let mut algo = BranchAndBound::new(graph, start)
            .with_config(BranchAndBoundConfig::pessimistic())
            .with_limits(limits);
        let outcome = algo.solve();
        (outcome, algo.statistics().clone())
    }

    macro_rules! solver_tests {
        ($solver:ident, $label_level:ident) => {
            paste! {
                mod [<$solver _tests>] {
                    use super::*;

                    #[test]
                    fn diamond_example() {
                        let graph = diamond().unwrap();
                        let outcome = $label_level(&graph, &"A").unwrap();
                        let tour = match outcome {
                            SearchOutcome::Optimal(tour) => tour,
                            other => panic!("unexpected outcome {other:?}"),
                        };

                        assert_eq!(tour.cost, 12);
                        assert_eq!(tour.len(), 5);
                        assert_eq!(tour.path.first(), Some(&("A", 0)));
                        assert_eq!(tour.path.last().map(|(v, _)| *v), Some("A"));
                        assert_eq!(tour.stops().unique().count(), 4);
                    }

                    #[test]
                    fn unknown_start() {
                        let graph = diamond().unwrap();
                        assert_eq!($label_level(&graph, &"Z"), Err(GraphError::UnknownVertex("Z")));
                    }

                    #[test]
                    fn isolated_vertex() {
                        let mut graph = diamond().unwrap();
                        graph.remove_edges_at_vertex(&"C").unwrap();
                        assert_eq!($label_level(&graph, &"A"), Ok(SearchOutcome::NoSolution));
                        assert_eq!($label_level(&graph, &"C"), Ok(SearchOutcome::NoSolution));
                    }

                    #[test]
                    fn single_vertex() {
                        let mut graph = WeightedGraph::new_undirected();
                        graph.add_vertex("A").unwrap();
                        let outcome = $label_level(&graph, &"A").unwrap();
                        assert_eq!(
                            outcome,
                            SearchOutcome::Optimal(Tour {
                                path: vec![("A", 0), ("A", 0)],
                                cost: 0
                            })
                        );
                    }

                    #[test]
                    fn two_vertices() {
                        let graph = WeightedGraph::try_from_edges(false, [("A", "B", 5)]).unwrap();
                        let outcome = $label_level(&graph, &"B").unwrap();
                        assert_eq!(
                            outcome.into_tour().unwrap().path,
                            [("B", 0), ("A", 5), ("B", 5)]
                        );

                        let graph = WeightedGraph::try_from_edges(true, [("A", "B", 5)]).unwrap();
                        assert!($label_level(&graph, &"A").unwrap().is_no_solution());
                    }

                    #[test]
                    fn idempotent() {
                        let graph = twenty_cities().unwrap();
                        let first = $label_level(&graph, &"A").unwrap();
                        let second = $label_level(&graph, &"A").unwrap();
                        assert_eq!(first.cost(), Some(TWENTY_CITIES_OPTIMUM));
                        assert_eq!(first, second);
                    }

                    #[test]
                    fn directed_asymmetric() {
                        // the cheap direction of the cycle A -> B -> C -> A
                        let graph = WeightedGraph::try_from_edges(
                            true,
                            [
                                ("A", "B", 1),
                                ("B", "C", 1),
                                ("C", "A", 1),
                                ("A", "C", 10),
                                ("C", "B", 10),
                                ("B", "A", 10),
                            ],
                        )
                        .unwrap();

                        for start in ["A", "B", "C"] {
                            let tour = $label_level(&graph, &start).unwrap().into_tour().unwrap();
                            assert_eq!(tour.cost, 3);
                            assert_eq!(tour.start(), Some(&start));
                        }
                    }

                    #[test]
                    fn parallel_edges() {
                        let mut graph = diamond().unwrap();
                        graph.add_edge("C", "D", 1).unwrap();
                        let tour = $label_level(&graph, &"A").unwrap().into_tour().unwrap();
                        // A-B-C-D-A using the cheaper parallel edge
                        assert_eq!(tour.cost, 7);
                    }

                    #[test]
                    fn heavy_weights_keep_exact_costs() {
                        let graph = RawAdjacency::heavy_triangle();
                        let h = Weight::MAX / 2;
                        let (outcome, _) = $solver(&graph, 0, SearchLimits::unlimited());
                        assert_eq!(
                            outcome,
                            SearchOutcome::Optimal(Tour {
                                path: vec![(0, 0), (1, h), (2, h), (0, 1)],
                                cost: 2 * h + 1
                            })
                        );

                        // the largest accepted weight on the cheap direction of a labelled graph
                        let max = MAX_EDGE_WEIGHT;
                        let graph = WeightedGraph::try_from_edges(
                            true,
                            [
                                ("A", "B", max),
                                ("B", "C", max),
                                ("C", "A", 1),
                                ("A", "C", max),
                                ("C", "B", max),
                                ("B", "A", 5),
                            ],
                        )
                        .unwrap();
                        let tour = $label_level(&graph, &"A").unwrap().into_tour().unwrap();
                        assert_eq!(tour.cost, 2 * max + 1);
                        assert_eq!(tour.stops().copied().collect_vec(), ["A", "B", "C", "A"]);
                    }

                    #[test]
                    fn zero_budget() {
                        let graph = diamond().unwrap();
                        let limits = SearchLimits::unlimited().with_max_expansions(0);
                        assert_eq!(
                            [<$label_level _with_limits>](&graph, &"A", limits),
                            Ok(SearchOutcome::Interrupted {
                                best: None,
                                reason: Interruption::ExpansionLimit
                            })
                        );
                    }

                    #[test]
                    fn cancelled() {
                        let graph = twenty_cities().unwrap();
                        let flag = Arc::new(AtomicBool::new(true));
                        let limits = SearchLimits::unlimited().with_cancel_flag(flag);
                        let outcome = [<$label_level _with_limits>](&graph, &"A", limits).unwrap();
                        assert_eq!(outcome.interruption(), Some(Interruption::Cancelled));
                    }

                    #[test]
                    fn generous_budget() {
                        let graph = twenty_cities().unwrap();
                        let unlimited = $label_level(&graph, &"A").unwrap();
                        let limits = SearchLimits::unlimited()
                            .with_max_expansions(u64::MAX)
                            .with_timeout(std::time::Duration::from_secs(3600));
                        let limited = [<$label_level _with_limits>](&graph, &"A", limits).unwrap();
                        assert_eq!(unlimited, limited);
                    }

                    #[test]
                    fn random_against_brute_force() {
                        (0..200u64).into_par_iter().for_each(|seed| {
                            let mut rng = Pcg64::seed_from_u64(seed);
                            let n = 1 + (seed % 7) as NumNodes;
                            let directed = seed % 2 == 0;
                            let graph = random_instance(&mut rng, n, 0.6, directed);

                            let (outcome, stats) = $solver(&graph, 0, SearchLimits::unlimited());
                            match brute_force_optimum(&graph, 0) {
                                Some(optimum) => {
                                    let tour = outcome.into_tour().unwrap();
                                    assert_eq!(tour.cost, optimum, "seed={seed}");
                                    assert_eq!(tour.verify(&graph), Ok(()), "seed={seed}");
                                    assert!(stats.max_expanded_priority.is_none_or(|p| p <= optimum));
                                }
                                None => assert!(outcome.is_no_solution(), "seed={seed}"),
                            }
                        });
                    }
                }
            }
        };
    }

    solver_tests!(ucs_on, solve_ucs);
    solver_tests!(bnb_on, solve_branch_and_bound);
    solver_tests!(pessimistic_bnb_on, solve_branch_and_bound);

    #[test]
    fn solvers_agree() {
        (0..60u64).into_par_iter().for_each(|seed| {
            let mut rng = Pcg64::seed_from_u64(0xdead_0000 + seed);
            let n = 3 + (seed % 6) as NumNodes;
            let graph = random_instance(&mut rng, n, 0.8, seed % 3 == 0);

            for start in graph.vertices_range() {
                let (ucs, _) = ucs_on(&graph, start, SearchLimits::unlimited());
                let (bnb, bnb_stats) = bnb_on(&graph, start, SearchLimits::unlimited());
                assert_eq!(ucs.cost(), bnb.cost(), "seed={seed} start={start}");
                assert_eq!(ucs.is_no_solution(), bnb.is_no_solution());
                if let Some(cost) = bnb.cost() {
                    assert!(bnb_stats.root_lower_bound <= cost);
                }
            }
        });
    }

    #[test]
    fn branch_and_bound_expands_fewer_nodes() {
        let graph = twenty_cities().unwrap();
        let (ucs, ucs_stats) = ucs_on(&graph, 0, SearchLimits::unlimited());
        let (bnb, bnb_stats) = bnb_on(&graph, 0, SearchLimits::unlimited());

        assert_eq!(ucs.cost(), bnb.cost());
        assert!(bnb_stats.expansions <= ucs_stats.expansions);
        assert!(bnb_stats.max_expanded_priority <= bnb.cost());
    }
}

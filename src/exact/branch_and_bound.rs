use std::time::Instant;

use log::{debug, info, trace};

use super::*;
use crate::{algorithm::*, graph::*};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchAndBoundConfig {
    /// Children whose bound already exceeds the incumbent are discarded before entering the
    /// frontier
    pub prune_on_push: bool,
    /// The bound of a child is never smaller than the bound of its parent
    pub monotone_bounds: bool,
    /// Verifies the final tour against the graph
    pub paranoid: bool,
}

impl Default for BranchAndBoundConfig {
    fn default() -> Self {
        Self {
            prune_on_push: true,
            monotone_bounds: true,
            paranoid: cfg!(debug_assertions),
        }
    }
}

impl BranchAndBoundConfig {
    /// Only prunes at pop time and uses the raw reduction bounds; mostly useful to cross check
    /// the default configuration.
    pub fn pessimistic() -> Self {
        Self {
            prune_on_push: false,
            monotone_bounds: false,
            paranoid: true,
        }
    }
}

struct BoundedNode {
    node: SearchNode,
    matrix: CostMatrix,
}

/// Best-first branch and bound over partial tours. The frontier is ordered by an admissible lower
/// bound: the cost of the partial tour plus the reduction cost of the cost matrix in which all
/// rows, columns and cells ruled out by the partial tour are closed.
///
/// Complete tours replace the incumbent if they are strictly cheaper; nodes whose bound exceeds
/// the incumbent are pruned. The search ends once the frontier is exhausted, at which point the
/// incumbent is optimal.
pub struct BranchAndBound<'a, G: TspGraph> {
    graph: &'a G,
    start: Node,
    frontier: Frontier<BoundedNode>,
    incumbent: Option<Tour<Node>>,
    outcome: Option<SearchOutcome<Node>>,

    config: BranchAndBoundConfig,
    limits: SearchLimits,
    started: Option<Instant>,
    stats: SearchStatistics,
}

impl<'a, G: TspGraph> BranchAndBound<'a, G> {
    /// Prepares a search for a cheapest tour of `graph` through `start`.
    /// ** Panics if start >= n **
    pub fn new(graph: &'a G, start: Node) -> Self {
        let n = graph.number_of_nodes();
        assert!(start < n);

        let matrix = CostMatrix::from_graph(graph);
        let root_bound = matrix.reduction_cost();

        let node = if n == 1 {
            SearchNode::trivial(start)
        } else {
            SearchNode::root(start, n)
        };

        let mut frontier = Frontier::new();
        frontier.push(root_bound, BoundedNode { node, matrix });

        let mut stats = SearchStatistics::default();
        stats.on_node_generated();
        stats.on_frontier_len(1);
        stats.set_root_lower_bound(root_bound);

        Self {
            graph,
            start,
            frontier,
            incumbent: None,
            outcome: None,
            config: BranchAndBoundConfig::default(),
            limits: SearchLimits::default(),
            started: None,
            stats,
        }
    }

    /// # Warning
    /// Has to be called before the first execution of the algorithm.
    pub fn with_config(mut self, config: BranchAndBoundConfig) -> Self {
        debug_assert!(self.started.is_none());
        self.config = config;
        self
    }

    /// Sets the limits consulted before every expansion.
    ///
    /// # Warning
    /// Has to be called before the first execution of the algorithm.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        debug_assert!(self.started.is_none());
        self.limits = limits;
        self
    }

    pub fn config(&self) -> &BranchAndBoundConfig {
        &self.config
    }

    /// Runs the search to the end and returns its outcome
    pub fn solve(&mut self) -> SearchOutcome<Node> {
        while !self.is_completed() {
            self.execute_step();
        }
        self.outcome.clone().unwrap_or(SearchOutcome::NoSolution)
    }

    /// Returns the outcome once the search completed
    pub fn outcome(&self) -> Option<&SearchOutcome<Node>> {
        self.outcome.as_ref()
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.stats
    }

    fn started(&mut self) -> Instant {
        if let Some(t) = self.started {
            return t;
        }

        info!(
            "B&B: search tours through node {} of a graph with n={} m={}; root bound {}",
            self.start,
            self.graph.number_of_nodes(),
            self.graph.number_of_edges(),
            self.stats.root_lower_bound
        );
        let now = Instant::now();
        self.started = Some(now);
        now
    }

    fn exceeds_incumbent(&self, bound: Weight) -> bool {
        self.incumbent.as_ref().is_some_and(|best| bound > best.cost)
    }

    fn finish(&mut self, outcome: SearchOutcome<Node>, started: Instant) {
        self.frontier.clear();
        self.stats.set_total_time(started.elapsed());

        if self.config.paranoid {
            if let Some(tour) = outcome.tour() {
                if let Err(err) = tour.verify(self.graph) {
                    panic!("B&B produced an invalid tour {tour:?}: {err}");
                }
            }
        }

        info!(
            "B&B: {outcome} after {} expansions ({} pruned) in {:.2?}",
            self.stats.expansions, self.stats.prunings_bound, self.stats.time_total
        );
        self.outcome = Some(outcome);
    }

    fn expand(&mut self, bound: Weight, parent: BoundedNode) {
        let n = self.graph.number_of_nodes();
        let from = parent.node.vertex();

        for &(v, w) in self.graph.neighbors_of(from) {
            if !parent.node.can_visit(v, self.start, n) {
                continue;
            }

            let Some(node) = parent.node.child(v, w) else {
                debug!("B&B: drop edge ({from}, {v}) as the path cost overflows");
                continue;
            };
            let mut matrix = parent.matrix.clone();
            matrix.close_step(from, v, node.visited(), self.start);

            // the reduction never exceeds the cost of a completion, so an overflow here rules
            // out every tour through this node
            let Some(mut child_bound) = node.cost().checked_add(matrix.reduction_cost()) else {
                self.stats.on_pruning_bound();
                continue;
            };
            if self.config.monotone_bounds {
                child_bound = child_bound.max(bound);
            }

            if self.config.prune_on_push && self.exceeds_incumbent(child_bound) {
                self.stats.on_pruning_bound();
                continue;
            }

            self.frontier.push(child_bound, BoundedNode { node, matrix });
            self.stats.on_node_generated();
        }

        self.stats.on_frontier_len(self.frontier.len());
    }
}

impl<G: TspGraph> IterativeAlgorithm<Tour<Node>> for BranchAndBound<'_, G> {
    fn execute_step(&mut self) {
        assert!(self.outcome.is_none());
        let started = self.started();

        let Some((bound, candidate)) = self.frontier.pop() else {
            let outcome = match self.incumbent.take() {
                Some(tour) => SearchOutcome::Optimal(tour),
                None => SearchOutcome::NoSolution,
            };
            self.finish(outcome, started);
            return;
        };

        if candidate
            .node
            .is_complete(self.start, self.graph.number_of_nodes())
        {
            let cost = candidate.node.cost();
            if self.incumbent.as_ref().is_none_or(|best| cost < best.cost) {
                debug!("B&B: new incumbent of cost {cost}");
                self.stats.on_solution_found();
                self.incumbent = Some(candidate.node.into_tour());
            }
            return;
        }

        if self.exceeds_incumbent(bound) {
            self.stats.on_pruning_bound();
            return;
        }

        if let Some(reason) = self.limits.check(self.stats.expansions, started) {
            let best = self.incumbent.clone();
            self.finish(SearchOutcome::Interrupted { best, reason }, started);
            return;
        }

        self.stats.on_expansion(bound);
        trace!(
            "B&B: expand node {} at depth {} with cost {} and bound {bound}",
            candidate.node.vertex(),
            candidate.node.depth(),
            candidate.node.cost()
        );

        self.expand(bound, candidate);
    }

    fn is_completed(&self) -> bool {
        self.outcome.is_some()
    }

    fn best_known_solution(&mut self) -> Option<Tour<Node>> {
        match &self.outcome {
            Some(outcome) => outcome.tour().cloned(),
            None => self.incumbent.clone(),
        }
    }
}

impl<G: TspGraph> TerminatingIterativeAlgorithm<Tour<Node>> for BranchAndBound<'_, G> {}

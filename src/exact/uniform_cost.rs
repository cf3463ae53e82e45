use std::time::Instant;

use log::{debug, info, trace};

use super::*;
use crate::{algorithm::*, graph::*};

/// Uniform cost search over partial tours. Nodes leave the frontier in order of their
/// accumulated cost, hence the first complete tour popped is a cheapest one.
///
/// Each call to [`IterativeAlgorithm::execute_step`] pops a single node and, unless it is a
/// complete tour, expands it into all legal successors.
pub struct UniformCostSearch<'a, G: TspGraph> {
    graph: &'a G,
    start: Node,
    frontier: Frontier<SearchNode>,
    incumbent: Option<Tour<Node>>,
    outcome: Option<SearchOutcome<Node>>,

    limits: SearchLimits,
    started: Option<Instant>,
    stats: SearchStatistics,
}

impl<'a, G: TspGraph> UniformCostSearch<'a, G> {
    /// Prepares a search for a cheapest tour of `graph` through `start`.
    /// ** Panics if start >= n **
    pub fn new(graph: &'a G, start: Node) -> Self {
        let n = graph.number_of_nodes();
        assert!(start < n);

        let mut frontier = Frontier::new();
        if n == 1 {
            frontier.push(0, SearchNode::trivial(start));
        } else {
            frontier.push(0, SearchNode::root(start, n));
        }

        let mut stats = SearchStatistics::default();
        stats.on_node_generated();
        stats.on_frontier_len(1);

        Self {
            graph,
            start,
            frontier,
            incumbent: None,
            outcome: None,
            limits: SearchLimits::default(),
            started: None,
            stats,
        }
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
            "UCS: search tours through node {} of a graph with n={} m={}",
            self.start,
            self.graph.number_of_nodes(),
            self.graph.number_of_edges()
        );
        let now = Instant::now();
        self.started = Some(now);
        now
    }

    fn finish(&mut self, outcome: SearchOutcome<Node>, started: Instant) {
        self.frontier.clear();
        self.stats.set_total_time(started.elapsed());

        info!(
            "UCS: {outcome} after {} expansions in {:.2?}",
            self.stats.expansions, self.stats.time_total
        );
        self.outcome = Some(outcome);
    }
}

impl<G: TspGraph> IterativeAlgorithm<Tour<Node>> for UniformCostSearch<'_, G> {
    fn execute_step(&mut self) {
        assert!(self.outcome.is_none());
        let started = self.started();
        let n = self.graph.number_of_nodes();

        let Some((cost, node)) = self.frontier.pop() else {
            self.finish(SearchOutcome::NoSolution, started);
            return;
        };

        if node.is_complete(self.start, n) {
            self.finish(SearchOutcome::Optimal(node.into_tour()), started);
            return;
        }

        if let Some(reason) = self.limits.check(self.stats.expansions, started) {
            let best = self.incumbent.clone();
            self.finish(SearchOutcome::Interrupted { best, reason }, started);
            return;
        }

        self.stats.on_expansion(cost);
        trace!(
            "UCS: expand node {} at depth {} with cost {cost}",
            node.vertex(),
            node.depth()
        );

        for &(v, w) in self.graph.neighbors_of(node.vertex()) {
            if !node.can_visit(v, self.start, n) {
                continue;
            }

            let Some(child) = node.child(v, w) else {
                debug!("UCS: drop edge ({}, {v}) as the path cost overflows", node.vertex());
                continue;
            };
            if child.is_complete(self.start, n)
                && self
                    .incumbent
                    .as_ref()
                    .is_none_or(|best| child.cost() < best.cost)
            {
                debug!("UCS: new incumbent of cost {}", child.cost());
                self.stats.on_solution_found();
                self.incumbent = Some(child.to_tour());
            }

            self.frontier.push(child.cost(), child);
            self.stats.on_node_generated();
        }

        self.stats.on_frontier_len(self.frontier.len());
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

impl<G: TspGraph> TerminatingIterativeAlgorithm<Tour<Node>> for UniformCostSearch<'_, G> {}

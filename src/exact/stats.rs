use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::graph::Weight;

/// Counters collected while a solver runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// Nodes pushed into the frontier, including the root
    pub nodes_generated: u64,
    /// Nodes popped and expanded into their children
    pub expansions: u64,
    /// Nodes discarded because their bound exceeded the incumbent (at pop or at push)
    pub prunings_bound: u64,
    /// Complete tours accepted as a new incumbent
    pub solutions_found: u64,
    /// Largest frontier observed
    pub max_frontier_len: usize,
    /// Largest priority (cost for UCS, bound for B&B) of an expanded node
    pub max_expanded_priority: Option<Weight>,
    /// Reduction bound of the root node; zero for UCS
    pub root_lower_bound: Weight,
    /// Wall clock time spent in the solver
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_node_generated(&mut self) {
        self.nodes_generated = self.nodes_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_expansion(&mut self, priority: Weight) {
        self.expansions = self.expansions.saturating_add(1);
        self.max_expanded_priority = Some(
            self.max_expanded_priority
                .map_or(priority, |p| p.max(priority)),
        );
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_frontier_len(&mut self, len: usize) {
        self.max_frontier_len = self.max_frontier_len.max(len);
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: Weight) {
        self.root_lower_bound = bound;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Nodes generated:      {}", self.nodes_generated)?;
        writeln!(f, "  Expansions:           {}", self.expansions)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Max frontier size:    {}", self.max_frontier_len)?;
        writeln!(f, "  Root lower bound:     {}", self.root_lower_bound)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

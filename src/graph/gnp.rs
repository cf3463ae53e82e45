use std::ops::Range;

use log::warn;
use rand::Rng;
use rand_distr::Geometric;

use crate::graph::*;

pub trait WeightedGnpGenerator: Sized {
    /// Generates a Gilbert (also, wrongly, known as Erdos-Reyni) graph with nodes `0..n`.
    /// Each of the `n(n-1)` directed (resp. `n(n-1)/2` undirected) edges exists independently
    /// with probability `p`; weights are drawn uniformly from `weights`.
    fn random_gnp<R: Rng>(
        rng: &mut R,
        n: NumNodes,
        p: f64,
        weights: Range<Weight>,
        directed: bool,
    ) -> Self;

    /// Complete graph on `n` nodes with uniform random weights
    fn random_complete<R: Rng>(
        rng: &mut R,
        n: NumNodes,
        weights: Range<Weight>,
        directed: bool,
    ) -> Self {
        Self::random_gnp(rng, n, 1.0, weights, directed)
    }
}

impl WeightedGnpGenerator for WeightedGraph<Node> {
    fn random_gnp<R: Rng>(
        rng: &mut R,
        n: NumNodes,
        p: f64,
        weights: Range<Weight>,
        directed: bool,
    ) -> Self {
        debug_assert!(!weights.is_empty() && weights.end <= MAX_EDGE_WEIGHT + 1);
        let mut result = Self::new(directed);
        for u in 0..n {
            // labels are fresh, hence insertion cannot fail
            let _ = result.add_vertex(u);
        }

        // indirection via vector as we need a &mut for rng and the weights also need rng
        let pairs: Vec<_> = BernoulliSamplingRange::new(rng, 0, (n as i64) * (n as i64), p)
            .filter_map(|x| {
                let u = (x / (n as i64)) as Node;
                let v = (x % (n as i64)) as Node;
                (u != v && (directed || u < v)).then_some((u, v))
            })
            .collect();

        for (u, v) in pairs {
            let w = rng.gen_range(weights.clone());
            if let Err(err) = result.add_edge(u, v, w) {
                warn!("Skip random edge ({u}, {v}): {err}");
            }
        }

        result
    }
}

/// Provides an iterator similarly to Range, but
/// includes each element i.i.d. with probability of p
pub struct BernoulliSamplingRange<'a, R: Rng> {
    current: i64,
    end: i64,
    distr: Option<Geometric>,
    rng: &'a mut R,
}

impl<'a, R: Rng> BernoulliSamplingRange<'a, R> {
    pub fn new(rng: &'a mut R, begin: i64, end: i64, prob: f64) -> Self {
        debug_assert!(begin <= end);
        debug_assert!((0.0..=1.0).contains(&prob));
        Self {
            rng,
            current: begin - 1,
            end,
            distr: (prob > 0.0).then(|| Geometric::new(prob).ok()).flatten(),
        }
    }

    fn try_advance(&mut self) {
        if self.current >= self.end {
            return;
        }

        let Some(distr) = self.distr else {
            self.current = self.end;
            return;
        };

        let skip = self.rng.sample(distr);
        if skip > i64::MAX as u64 {
            self.current = self.end;
        } else {
            self.current += 1;
            self.current = match self.current.checked_add(skip as i64) {
                Some(x) => x,
                None => self.end,
            }
        }
    }
}

impl<R: Rng> Iterator for BernoulliSamplingRange<'_, R> {
    type Item = i64;
    fn next(&mut self) -> Option<Self::Item> {
        self.try_advance();

        if self.current >= self.end {
            None
        } else {
            Some(self.current)
        }
    }
}

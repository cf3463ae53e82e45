use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use super::Interruption;

/// Caller imposed bounds on a search. The solvers consult them before every node expansion and
/// stop with [`super::SearchOutcome::Interrupted`] (carrying their incumbent) once one trips.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    pub max_expansions: Option<u64>,
    pub timeout: Option<Duration>,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    /// No limits at all; the search runs until it is exhausted
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The search stops as soon as `flag` is observed to be `true`
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_expansions.is_none() && self.timeout.is_none() && self.cancel.is_none()
    }

    /// Returns the first limit that forbids another expansion, given the number of expansions
    /// carried out so far and the instant the search started.
    pub fn check(&self, expansions: u64, started: Instant) -> Option<Interruption> {
        if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Some(Interruption::Cancelled);
        }

        if self.max_expansions.is_some_and(|max| expansions >= max) {
            return Some(Interruption::ExpansionLimit);
        }

        if self.timeout.is_some_and(|t| started.elapsed() >= t) {
            return Some(Interruption::Timeout);
        }

        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unlimited_never_trips() {
        let limits = SearchLimits::unlimited();
        assert!(limits.is_unlimited());
        assert_eq!(limits.check(u64::MAX, Instant::now()), None);
    }

    #[test]
    fn expansion_limit() {
        let limits = SearchLimits::unlimited().with_max_expansions(3);
        let now = Instant::now();
        assert_eq!(limits.check(2, now), None);
        assert_eq!(limits.check(3, now), Some(Interruption::ExpansionLimit));
    }

    #[test]
    fn timeout() {
        let limits = SearchLimits::unlimited().with_timeout(Duration::ZERO);
        assert_eq!(limits.check(0, Instant::now()), Some(Interruption::Timeout));

        let limits = SearchLimits::unlimited().with_timeout(Duration::from_secs(3600));
        assert_eq!(limits.check(0, Instant::now()), None);
    }

    #[test]
    fn cancel_flag_takes_precedence() {
        let flag = Arc::new(AtomicBool::new(false));
        let limits = SearchLimits::unlimited()
            .with_max_expansions(0)
            .with_cancel_flag(flag.clone());

        assert_eq!(
            limits.check(0, Instant::now()),
            Some(Interruption::ExpansionLimit)
        );

        flag.store(true, Ordering::Relaxed);
        assert_eq!(limits.check(0, Instant::now()), Some(Interruption::Cancelled));
    }
}

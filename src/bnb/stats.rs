//! Counters collected during a branch-and-bound run.

use std::fmt;
use std::time::Duration;

/// Statistics of one search run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Calls to `expand`, including ones that returned immediately.
    pub expansions: u64,
    /// Nodes created (root included).
    pub nodes_created: u64,
    /// Children marked inactive at creation because their bound could not
    /// beat the incumbent threshold.
    pub prunings_bound: u64,
    /// Complete nodes discarded because they failed the constraint gate.
    pub prunings_infeasible: u64,
    /// Assignments accepted into the incumbent pool.
    pub solutions_found: u64,
    /// Deepest locked depth reached.
    pub max_depth: usize,
    /// Size of the full search space, `nPk`, when it fits in a `u128`.
    pub search_space: Option<u128>,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl SearchStats {
    #[inline]
    pub(crate) fn on_expand(&mut self, depth: usize) {
        self.expansions = self.expansions.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub(crate) fn on_node_created(&mut self) {
        self.nodes_created = self.nodes_created.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }
}

/// Number of ordered selections of `k` out of `n` items, `n! / (n - k)!`.
///
/// Returns `Some(0)` when `k > n` and `None` on overflow.
pub fn permutation_count(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    ((n - k + 1)..=n).try_fold(1u128, |acc, i| acc.checked_mul(i as u128))
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expansions: {}, nodes: {}, pruned (bound): {}, pruned (infeasible): {}, solutions: {}, max depth: {}",
            self.expansions,
            self.nodes_created,
            self.prunings_bound,
            self.prunings_infeasible,
            self.solutions_found,
            self.max_depth
        )?;
        if let Some(space) = self.search_space {
            write!(f, ", search space: {space}")?;
        }
        write!(f, ", elapsed: {:.3}s", self.elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_count() {
        assert_eq!(permutation_count(4, 4), Some(24));
        assert_eq!(permutation_count(10, 4), Some(5040));
        assert_eq!(permutation_count(5, 0), Some(1));
        assert_eq!(permutation_count(2, 3), Some(0));
        assert_eq!(permutation_count(200, 100), None);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = SearchStats {
            expansions: u64::MAX,
            ..Default::default()
        };
        stats.on_expand(3);
        assert_eq!(stats.expansions, u64::MAX);
        assert_eq!(stats.max_depth, 3);
        stats.on_expand(1);
        assert_eq!(stats.max_depth, 3);
    }
}

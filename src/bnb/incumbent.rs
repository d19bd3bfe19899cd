//! Incumbent tracking for branch-and-bound.
//!
//! The tracker owns copies of the best complete assignments accepted so far,
//! never references into the search tree, so its contents survive the tree
//! being dropped. It also supplies the threshold that candidate bounds must
//! strictly exceed.

use super::node::AssignmentEntry;
use super::types::Assignment;

/// Pool of the best distinct assignments found so far, best first.
#[derive(Debug, Clone)]
pub struct IncumbentTracker {
    capacity: usize,
    pool: Vec<Assignment>,
}

impl IncumbentTracker {
    /// Creates an empty tracker keeping up to `capacity` assignments.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            pool: Vec::with_capacity(capacity),
        }
    }

    /// The value a candidate must strictly exceed to be accepted.
    ///
    /// Negative infinity until the pool is full, then the weakest pooled
    /// weight. Never decreases.
    pub fn threshold(&self) -> f64 {
        if self.pool.len() < self.capacity {
            f64::NEG_INFINITY
        } else {
            self.pool
                .last()
                .map_or(f64::NEG_INFINITY, |a| a.total_weight)
        }
    }

    /// Weight of the best accepted assignment, if any.
    pub fn incumbent_value(&self) -> Option<f64> {
        self.pool.first().map(|a| a.total_weight)
    }

    /// The best accepted assignment, if any.
    pub fn best(&self) -> Option<&Assignment> {
        self.pool.first()
    }

    /// Offers a complete, feasible assignment.
    ///
    /// Accepted iff its weight beats [`threshold`](Self::threshold) and the
    /// same entity sequence is not already pooled. On acceptance the entries
    /// are copied and the weakest assignment is evicted if the pool
    /// overflows.
    pub fn consider(&mut self, entries: &[AssignmentEntry], total_weight: f64) -> bool {
        if total_weight <= self.threshold() {
            return false;
        }
        if self.pool.iter().any(|a| a.same_entities(entries)) {
            return false;
        }

        let position = self
            .pool
            .iter()
            .position(|a| a.total_weight < total_weight)
            .unwrap_or(self.pool.len());
        self.pool
            .insert(position, Assignment::from_entries(entries, total_weight));
        self.pool.truncate(self.capacity);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Consumes the tracker, returning the pool best first.
    pub fn into_solutions(self) -> Vec<Assignment> {
        self.pool
    }
}

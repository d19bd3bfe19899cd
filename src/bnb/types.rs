//! Result types of a branch-and-bound run.

use super::node::AssignmentEntry;
use super::stats::SearchStats;
use crate::model::EntityId;
use std::fmt;

/// A complete assignment copied out of the search tree.
///
/// Owns its data, so it outlives the tree it was found in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// One entry per slot, in slot order.
    pub entries: Vec<AssignmentEntry>,
    /// Sum of the entry weights.
    pub total_weight: f64,
}

impl Assignment {
    pub(crate) fn from_entries(entries: &[AssignmentEntry], total_weight: f64) -> Self {
        Self {
            entries: entries.to_vec(),
            total_weight,
        }
    }

    /// Entity ids in slot order.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entries.iter().map(|e| e.entity).collect()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether both assignments place the same entities in the same slots.
    pub fn same_entities(&self, entries: &[AssignmentEntry]) -> bool {
        self.entries.len() == entries.len()
            && self
                .entries
                .iter()
                .zip(entries)
                .all(|(a, b)| a.entity == b.entity)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{} => {:.3} ", entry.entity, entry.weight)?;
        }
        write!(f, " total weight: {:.3}", self.total_weight)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// The tree was exhausted: the reported assignments are the best ones.
    Optimal,
    /// A limit or cancellation stopped the run early; the reported
    /// assignments are the best found so far.
    Interrupted,
}

/// Result of a branch-and-bound run.
#[derive(Debug, Clone)]
pub struct BnbResult {
    pub(crate) solutions: Vec<Assignment>,
    /// How the run ended.
    pub status: SolveStatus,
    /// Search statistics.
    pub stats: SearchStats,
}

impl BnbResult {
    /// Accepted assignments, best first. Never empty.
    pub fn solutions(&self) -> &[Assignment] {
        &self.solutions
    }

    /// Consumes the result, returning the accepted assignments best first.
    pub fn into_solutions(self) -> Vec<Assignment> {
        self.solutions
    }

    /// The best assignment found.
    pub fn best(&self) -> &Assignment {
        &self.solutions[0]
    }

    /// Weight of the best assignment.
    pub fn best_weight(&self) -> f64 {
        self.best().total_weight
    }

    /// Whether the search ran to completion.
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

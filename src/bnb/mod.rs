//! Best-first branch-and-bound over partial assignments.
//!
//! Each node of the search tree locks a prefix of the slots and fills the
//! remaining slots greedily with the best not-yet-locked entity per slot.
//! The fill may reuse an entity, which makes the node weight an upper bound
//! on every completion of the prefix. The search descends into the heaviest
//! active child, accepts repetition-free nodes as incumbents, and discards
//! every branch whose bound cannot beat the incumbent.
//!
//! # Key Components
//!
//! - [`BnbRunner`]: runs the search (`run`, `run_with_cancel`,
//!   `run_with_monitor`, `run_batch`)
//! - [`BnbConfig`]: number of solutions to keep, limits, constraint gate
//! - [`BnbResult`]: accepted [`Assignment`]s, [`SolveStatus`], [`SearchStats`]
//! - [`SearchMonitor`]: observer hooks; [`LogMonitor`] reports via `log`
//! - [`is_feasible`] / [`validates_constraints`]: acceptance checks
//!
//! # Complexity
//!
//! The tree is bounded by `nPk` nodes for `n` entities and `k` slots; bound
//! pruning is what keeps realistic instances small. Expect good behavior for
//! small to moderate sizes only.

mod config;
mod feasibility;
mod incumbent;
mod monitor;
mod node;
mod runner;
mod stats;
mod tree;
mod types;

pub use config::BnbConfig;
pub use feasibility::{is_feasible, validates_constraints};
pub use incumbent::IncumbentTracker;
pub use monitor::{LogMonitor, NoOpMonitor, PruneReason, SearchMonitor};
pub use node::{AssignmentEntry, NodeId, SolutionNode};
pub use runner::BnbRunner;
pub use stats::{permutation_count, SearchStats};
pub use types::{Assignment, BnbResult, SolveStatus};

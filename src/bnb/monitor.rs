//! Search monitoring.
//!
//! A [`SearchMonitor`] observes a run without influencing it: the runner
//! reports lifecycle events (enter, expand, prune, incumbent, exit) together
//! with the current [`SearchStats`]. All callbacks default to no-ops.
//!
//! Monitors are driven from the single search thread, so they take
//! `&mut self`. Keep callbacks cheap; `on_expand` runs once per node.

use super::node::SolutionNode;
use super::stats::SearchStats;
use super::types::Assignment;
use crate::model::ScheduleModel;
use std::fmt;
use std::time::{Duration, Instant};

/// Why a node was taken out of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneReason {
    /// Its bound cannot beat the incumbent.
    Bound,
    /// It is complete but fails the constraint gate.
    Infeasible,
    /// It was accepted as an incumbent (or was a rejected feasible
    /// candidate) and has nothing better below it.
    Solved,
    /// None of its children remain active.
    Exhausted,
}

impl fmt::Display for PruneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PruneReason::Bound => write!(f, "Bound"),
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::Solved => write!(f, "Solved"),
            PruneReason::Exhausted => write!(f, "Exhausted"),
        }
    }
}

/// Observer of a branch-and-bound run.
pub trait SearchMonitor {
    /// Called once before the root is built.
    fn on_enter_search(&mut self, _model: &ScheduleModel) {}

    /// Called for every node the runner expands.
    fn on_expand(&mut self, _node: &SolutionNode, _stats: &SearchStats) {}

    /// Called when a node is deactivated.
    fn on_prune(&mut self, _node: &SolutionNode, _reason: PruneReason, _stats: &SearchStats) {}

    /// Called when an assignment enters the incumbent pool.
    fn on_incumbent(&mut self, _assignment: &Assignment, _stats: &SearchStats) {}

    /// Called once when the run ends, with final statistics.
    fn on_exit_search(&mut self, _stats: &SearchStats) {}
}

/// A monitor that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl SearchMonitor for NoOpMonitor {}

/// Periodic progress reporting through the `log` facade.
///
/// Emits a `log::info!` line at most once per `log_interval`, checking the
/// clock only every `clock_check_mask + 1` expansions, plus one line per new
/// best assignment.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_weight: Option<f64>,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_weight: None,
        }
    }

    fn log_line(&mut self, node: &SolutionNode, stats: &SearchStats) {
        let now = Instant::now();
        let best = self
            .best_weight
            .map_or_else(|| "-".to_string(), |w| format!("{w:.3}"));
        log::info!(
            "{:.1}s | expansions {} | nodes {} | depth {} | bound {:.3} | best {}",
            now.duration_since(self.start_time).as_secs_f32(),
            stats.expansions,
            stats.nodes_created,
            node.depth(),
            node.total_weight(),
            best
        );
        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 1023)
    }
}

impl SearchMonitor for LogMonitor {
    fn on_enter_search(&mut self, model: &ScheduleModel) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_weight = None;
        log::info!(
            "search started: {} entities, {} slots, {} constraints",
            model.num_people(),
            model.num_slots(),
            model.num_constraints()
        );
    }

    fn on_expand(&mut self, node: &SolutionNode, stats: &SearchStats) {
        if (stats.expansions & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(node, stats);
        }
    }

    fn on_incumbent(&mut self, assignment: &Assignment, stats: &SearchStats) {
        if self.best_weight.map_or(true, |w| assignment.total_weight > w) {
            self.best_weight = Some(assignment.total_weight);
            log::info!(
                "new best after {} expansions: {}",
                stats.expansions,
                assignment
            );
        }
    }

    fn on_exit_search(&mut self, stats: &SearchStats) {
        log::info!("search finished: {stats}");
    }
}

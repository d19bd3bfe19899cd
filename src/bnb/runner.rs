//! Branch-and-bound execution.
//!
//! [`BnbRunner`] drives the search: build the greedy root, expand nodes into
//! one child per unused entity, descend into the best active child, accept
//! feasible candidates into the incumbent pool, and prune until no active
//! branch remains.
//!
//! Every node's speculative slots are filled greedily with the best entity
//! not yet *locked*. Speculative picks may repeat, so a node's
//! `total_weight` is an upper bound on every completion below it, and a node
//! whose fill happens to be repetition-free is itself the best completion of
//! its subtree.

use super::config::BnbConfig;
use super::feasibility::{is_feasible, validates_constraints};
use super::incumbent::IncumbentTracker;
use super::monitor::{NoOpMonitor, PruneReason, SearchMonitor};
use super::node::{AssignmentEntry, NodeId, SolutionNode};
use super::stats::{permutation_count, SearchStats};
use super::tree::SearchTree;
use super::types::{Assignment, BnbResult, SolveStatus};
use crate::error::AssignError;
use crate::model::{ScheduleModel, SlotId};
use fixedbitset::FixedBitSet;
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Executes the branch-and-bound search.
///
/// # Examples
///
/// ```
/// use u_assign::bnb::{BnbConfig, BnbRunner};
/// use u_assign::model::ScheduleModel;
///
/// let mut model = ScheduleModel::new(2).unwrap();
/// model.add_entity(&[5.0, 1.0]).unwrap();
/// model.add_entity(&[1.0, 5.0]).unwrap();
/// model.add_entity(&[3.0, 3.0]).unwrap();
///
/// let result = BnbRunner::run(&model, &BnbConfig::default()).unwrap();
/// assert_eq!(result.best().entity_ids(), vec![0, 1]);
/// assert_eq!(result.best_weight(), 10.0);
/// assert!(result.is_optimal());
/// ```
pub struct BnbRunner;

impl BnbRunner {
    /// Runs the search to completion (or until a configured limit).
    pub fn run(model: &ScheduleModel, config: &BnbConfig) -> Result<BnbResult, AssignError> {
        Self::run_with_cancel(model, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// The token is checked before every expansion; once set, the search
    /// unwinds and reports what it found so far.
    pub fn run_with_cancel(
        model: &ScheduleModel,
        config: &BnbConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BnbResult, AssignError> {
        Self::run_with_monitor(model, config, &mut NoOpMonitor, cancel)
    }

    /// Runs the search, reporting events to `monitor`.
    ///
    /// # Errors
    ///
    /// - [`AssignError::InvalidConfiguration`] for an invalid `config`, or a
    ///   model that cannot fill its slots.
    /// - [`AssignError::NoFeasibleSolution`] when the search completes
    ///   without accepting an assignment.
    /// - [`AssignError::Interrupted`] when a limit or the token stops the
    ///   search before any assignment was accepted.
    /// - [`AssignError::ResourceExhausted`] when the tree cannot grow.
    pub fn run_with_monitor<M: SearchMonitor + ?Sized>(
        model: &ScheduleModel,
        config: &BnbConfig,
        monitor: &mut M,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BnbResult, AssignError> {
        config.validate()?;
        model.validate_for_search(config.enforce_constraints)?;

        let start = Instant::now();
        monitor.on_enter_search(model);

        let mut search = Search {
            model,
            config,
            tree: SearchTree::new(),
            incumbent: IncumbentTracker::new(config.max_solutions),
            stats: SearchStats {
                search_space: permutation_count(model.num_people(), model.num_slots()),
                ..Default::default()
            },
            monitor,
            cancel,
            deadline: config
                .time_limit_ms
                .map(|ms| start + Duration::from_millis(ms)),
            check_constraints: config.enforce_constraints && model.has_constraints(),
            stopped: false,
        };

        if let Some(root) = create_root(model) {
            let root = search.tree.insert_root(root)?;
            search.stats.on_node_created();
            search.expand(root)?;
        }

        search.stats.elapsed = start.elapsed();
        search.monitor.on_exit_search(&search.stats);
        debug!(
            "expanded {} of {} nodes, {} possible assignments",
            search.stats.expansions,
            search.tree.len(),
            search
                .stats
                .search_space
                .map_or_else(|| "too many".to_string(), |n| n.to_string())
        );

        let Search {
            incumbent,
            stats,
            stopped,
            ..
        } = search;

        if incumbent.is_empty() {
            return Err(if stopped {
                AssignError::Interrupted
            } else {
                AssignError::NoFeasibleSolution
            });
        }

        Ok(BnbResult {
            solutions: incumbent.into_solutions(),
            status: if stopped {
                SolveStatus::Interrupted
            } else {
                SolveStatus::Optimal
            },
            stats,
        })
    }

    /// Solves independent models, in parallel with the `parallel` feature.
    ///
    /// Each model gets its own search state; results are in input order.
    pub fn run_batch(
        models: &[ScheduleModel],
        config: &BnbConfig,
    ) -> Vec<Result<BnbResult, AssignError>> {
        #[cfg(feature = "parallel")]
        {
            models.par_iter().map(|m| Self::run(m, config)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            models.iter().map(|m| Self::run(m, config)).collect()
        }
    }
}

/// Best entity for `slot` among those not in `used`.
///
/// Linear scan with strict `>`, so the lowest id wins ties.
fn best_for_slot(
    model: &ScheduleModel,
    slot: SlotId,
    used: &FixedBitSet,
) -> Option<AssignmentEntry> {
    let mut best: Option<AssignmentEntry> = None;
    for entity in 0..model.num_people() {
        if used.contains(entity) {
            continue;
        }
        let weight = model.weight(entity, slot);
        if best.map_or(true, |b| weight > b.weight) {
            best = Some(AssignmentEntry { entity, weight });
        }
    }
    best
}

/// Appends greedy entries for slots `from..num_slots`.
///
/// Returns `None` if some slot has no candidate.
fn fill_greedy(
    model: &ScheduleModel,
    used: &FixedBitSet,
    from: SlotId,
    entries: &mut Vec<AssignmentEntry>,
) -> Option<()> {
    for slot in from..model.num_slots() {
        entries.push(best_for_slot(model, slot, used)?);
    }
    Some(())
}

fn total_of(entries: &[AssignmentEntry]) -> f64 {
    entries.iter().map(|e| e.weight).sum()
}

/// Builds the root: nothing locked, every slot holds its column maximum.
///
/// Returns `None` for a model without entities.
pub(crate) fn create_root(model: &ScheduleModel) -> Option<SolutionNode> {
    let used = FixedBitSet::with_capacity(model.num_people());
    let mut entries = Vec::with_capacity(model.num_slots());
    fill_greedy(model, &used, 0, &mut entries)?;
    Some(SolutionNode {
        total_weight: total_of(&entries),
        entries,
        used,
        depth: 0,
        active: true,
        parent: None,
        children: Vec::new(),
    })
}

/// Per-run search state.
struct Search<'a, M: SearchMonitor + ?Sized> {
    model: &'a ScheduleModel,
    config: &'a BnbConfig,
    tree: SearchTree,
    incumbent: IncumbentTracker,
    stats: SearchStats,
    monitor: &'a mut M,
    cancel: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
    check_constraints: bool,
    stopped: bool,
}

impl<M: SearchMonitor + ?Sized> Search<'_, M> {
    fn should_stop(&self) -> bool {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        if self.config.max_expansions > 0
            && self.stats.expansions > self.config.max_expansions as u64
        {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Expands `id` at its own depth and searches below it until it is
    /// pruned or the run is stopped.
    fn expand(&mut self, id: NodeId) -> Result<(), AssignError> {
        let depth = self.tree.node(id).depth;
        self.stats.on_expand(depth);
        if self.should_stop() {
            self.stopped = true;
            return Ok(());
        }
        if !self.tree.node(id).active {
            return Ok(());
        }
        self.monitor.on_expand(self.tree.node(id), &self.stats);

        if depth == self.model.num_slots() {
            // complete but never accepted: it failed the constraint gate
            self.stats.on_pruning_infeasible();
            self.prune(id, PruneReason::Infeasible);
            return Ok(());
        }

        self.create_branch(id)?;

        while self.tree.node(id).active && !self.stopped {
            let Some(child) = self.select_branch(id) else {
                self.prune(id, PruneReason::Exhausted);
                break;
            };

            if self.is_candidate(child) {
                self.consider(child);
            }

            if self.tree.node(child).active {
                self.expand(child)?;
            }

            if !self.stopped && !self.tree.has_active_child(id) {
                self.prune(id, PruneReason::Exhausted);
            }
        }
        Ok(())
    }

    /// Adds one child per entity not locked in `id`, locking that entity
    /// into slot `depth` and refilling the rest greedily.
    ///
    /// Children whose bound does not beat the incumbent threshold are
    /// created inactive.
    fn create_branch(&mut self, id: NodeId) -> Result<(), AssignError> {
        let parent = self.tree.node(id);
        let depth = parent.depth;
        let threshold = self.incumbent.threshold();
        let num_slots = self.model.num_slots();

        let mut children = Vec::new();
        for entity in 0..self.model.num_people() {
            if parent.used.contains(entity) {
                continue;
            }

            let mut entries = Vec::with_capacity(num_slots);
            entries.extend_from_slice(&parent.entries[..depth]);
            entries.push(AssignmentEntry {
                entity,
                weight: self.model.weight(entity, depth),
            });
            let mut used = parent.used.clone();
            used.insert(entity);
            if fill_greedy(self.model, &used, depth + 1, &mut entries).is_none() {
                continue;
            }

            let total_weight = total_of(&entries);
            children.push(SolutionNode {
                entries,
                used,
                total_weight,
                depth: depth + 1,
                active: total_weight > threshold,
                parent: None,
                children: Vec::new(),
            });
        }

        self.tree.reserve(children.len())?;
        for child in children {
            let bounded_out = !child.active;
            let child_id = self.tree.attach(id, child)?;
            self.stats.on_node_created();
            let node = self.tree.node(child_id);
            trace!(
                "branch depth {} entity {} weight {:.3} active {}",
                node.depth,
                node.entries[depth].entity,
                node.total_weight,
                node.active
            );
            if bounded_out {
                self.stats.on_pruning_bound();
                self.monitor.on_prune(node, PruneReason::Bound, &self.stats);
            }
        }
        Ok(())
    }

    /// Picks the next node to descend into.
    ///
    /// Walks up from `id` to the nearest active ancestor and returns that
    /// ancestor's active child with the strictly greatest weight, provided it
    /// beats the incumbent threshold.
    fn select_branch(&self, id: NodeId) -> Option<NodeId> {
        let anchor = self.tree.nearest_active_ancestor(id);
        let threshold = self.incumbent.threshold();

        let mut best: Option<(NodeId, f64)> = None;
        for &child in self.tree.node(anchor).children() {
            let node = self.tree.node(child);
            if node.active
                && node.total_weight > threshold
                && best.map_or(true, |(_, w)| node.total_weight > w)
            {
                best = Some((child, node.total_weight));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Whether `id` holds a complete, acceptable assignment.
    fn is_candidate(&self, id: NodeId) -> bool {
        let entries = &self.tree.node(id).entries;
        is_feasible(entries, self.model.num_people())
            && (!self.check_constraints || validates_constraints(entries, self.model))
    }

    /// Offers a candidate to the incumbent pool and prunes it unless its
    /// subtree can still contribute further distinct assignments.
    fn consider(&mut self, id: NodeId) {
        let node = self.tree.node(id);
        if self.incumbent.consider(&node.entries, node.total_weight) {
            self.stats.on_solution_found();
            let accepted = Assignment::from_entries(&node.entries, node.total_weight);
            debug!("new incumbent at depth {}: {}", node.depth, accepted);
            self.monitor.on_incumbent(&accepted, &self.stats);
        }

        let node = self.tree.node(id);
        let explore_further = self.config.max_solutions > 1
            && node.depth < self.model.num_slots()
            && node.total_weight > self.incumbent.threshold();
        if !explore_further {
            self.prune(id, PruneReason::Solved);
        }
    }

    fn prune(&mut self, id: NodeId, reason: PruneReason) {
        if self.tree.prune(id) > 0 {
            self.monitor.on_prune(self.tree.node(id), reason, &self.stats);
        }
    }
}

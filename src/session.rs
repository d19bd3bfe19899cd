//! Session facade for binding layers.
//!
//! [`Scheduler`] bundles a [`ScheduleModel`] with a [`BnbConfig`] and exposes
//! the create / add / compute / destroy lifecycle a host-language binding
//! drives. Each handle owns its model; every compute call builds and drops
//! its own search tree, so handles are independent of one another.

use crate::bnb::{Assignment, BnbConfig, BnbResult, BnbRunner};
use crate::error::AssignError;
use crate::model::{EntityId, ScheduleModel, TagSet};
use std::fmt;

/// A solve session.
///
/// # Examples
///
/// ```
/// use u_assign::{AssignError, Scheduler};
///
/// let mut scheduler = Scheduler::create(2).unwrap();
/// scheduler.add_entity_with_attributes(&[1.0, 0.0], [0, 2]).unwrap();
/// scheduler.add_entity_with_attributes(&[0.0, 1.0], [0, 1, 2]).unwrap();
/// scheduler.add_entity_with_attributes(&[1.0, 0.0], [1]).unwrap();
/// scheduler.add_entity_with_attributes(&[0.0, 1.0], [1]).unwrap();
/// scheduler.add_constraint([0, 2]);
/// scheduler.add_constraint([1]);
///
/// let best = scheduler.compute_assignment().unwrap();
/// assert_eq!(best.total_weight, 2.0);
///
/// let empty = Scheduler::create(2).unwrap();
/// assert_eq!(empty.compute_solution(), Err(AssignError::NoFeasibleSolution));
/// empty.destroy();
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    model: ScheduleModel,
    config: BnbConfig,
}

impl Scheduler {
    /// Opens a session with `num_slots` slots and the default configuration.
    pub fn create(num_slots: usize) -> Result<Self, AssignError> {
        Ok(Self {
            model: ScheduleModel::new(num_slots)?,
            config: BnbConfig::default(),
        })
    }

    /// Replaces the search configuration.
    pub fn with_config(mut self, config: BnbConfig) -> Self {
        self.config = config;
        self
    }

    /// Appends an entity's weight row. Returns the new entity id.
    pub fn add_entity(&mut self, weights: &[f64]) -> Result<EntityId, AssignError> {
        self.model.add_entity(weights)
    }

    /// Appends an entity's weight row and attribute set.
    pub fn add_entity_with_attributes(
        &mut self,
        weights: &[f64],
        attributes: impl Into<TagSet>,
    ) -> Result<EntityId, AssignError> {
        self.model.add_entity_with_attributes(weights, attributes)
    }

    /// Appends a constraint set. Returns its index.
    pub fn add_constraint(&mut self, tags: impl Into<TagSet>) -> usize {
        self.model.add_constraint(tags)
    }

    /// The accumulated model.
    pub fn model(&self) -> &ScheduleModel {
        &self.model
    }

    pub fn config(&self) -> &BnbConfig {
        &self.config
    }

    /// Best assignment as entity ids in slot order.
    pub fn compute_solution(&self) -> Result<Vec<EntityId>, AssignError> {
        self.compute_assignment().map(|a| a.entity_ids())
    }

    /// Best assignment with per-slot weights and total.
    pub fn compute_assignment(&self) -> Result<Assignment, AssignError> {
        let config = self.config.clone().with_max_solutions(1);
        let result = BnbRunner::run(&self.model, &config)?;
        result
            .into_solutions()
            .into_iter()
            .next()
            .ok_or(AssignError::NoFeasibleSolution)
    }

    /// Up to `count` distinct best assignments, best first.
    pub fn compute_solutions(&self, count: usize) -> Result<Vec<Assignment>, AssignError> {
        let config = self.config.clone().with_max_solutions(count);
        BnbRunner::run(&self.model, &config).map(BnbResult::into_solutions)
    }

    /// Ends the session, releasing the model.
    pub fn destroy(self) {}
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.model, f)
    }
}

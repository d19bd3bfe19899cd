//! The schedule model: weight grid, attributes and constraint sets.

use super::tags::TagSet;
use crate::error::AssignError;
use std::fmt;

/// Identity of an entity: its insertion index, `0..num_people`.
pub type EntityId = usize;

/// Identity of a slot, `0..num_slots`. Slot order is significant.
pub type SlotId = usize;

/// Input to the assignment search.
///
/// Each entity owns one weight row with exactly `num_slots` entries and an
/// attribute set (empty unless given). Constraint sets are optional; when
/// present, every constraint must be covered by a distinct assigned entity
/// whose attributes are a superset of the constraint's tags.
///
/// # Examples
///
/// ```
/// use u_assign::model::{ScheduleModel, TagSet};
///
/// let mut model = ScheduleModel::new(2).unwrap();
/// model.add_entity_with_attributes(&[1.0, 0.0], [0, 2]).unwrap();
/// model.add_entity_with_attributes(&[0.0, 1.0], [1]).unwrap();
/// model.add_constraint([1]);
///
/// assert_eq!(model.num_people(), 2);
/// assert_eq!(model.weight(1, 1), 1.0);
/// assert!(model.has_constraints());
/// assert!(model.add_entity(&[1.0]).is_err());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleModel {
    num_slots: usize,
    /// Row-major weight grid, `num_people * num_slots` entries.
    weights: Vec<f64>,
    attributes: Vec<TagSet>,
    constraints: Vec<TagSet>,
}

impl ScheduleModel {
    /// Creates an empty model with `num_slots` slots.
    ///
    /// Fails with [`AssignError::InvalidConfiguration`] when `num_slots` is 0.
    pub fn new(num_slots: usize) -> Result<Self, AssignError> {
        if num_slots == 0 {
            return Err(AssignError::invalid("num_slots must be positive"));
        }
        Ok(Self {
            num_slots,
            weights: Vec::new(),
            attributes: Vec::new(),
            constraints: Vec::new(),
        })
    }

    /// Appends an entity without attributes. Returns its id.
    pub fn add_entity(&mut self, weights: &[f64]) -> Result<EntityId, AssignError> {
        self.add_entity_with_attributes(weights, TagSet::new())
    }

    /// Appends an entity with an attribute set. Returns its id.
    ///
    /// The row is rejected, leaving the model unchanged, when its length is
    /// not `num_slots` ([`AssignError::ShapeMismatch`]) or when it holds a
    /// non-finite weight ([`AssignError::InvalidWeight`]).
    pub fn add_entity_with_attributes(
        &mut self,
        weights: &[f64],
        attributes: impl Into<TagSet>,
    ) -> Result<EntityId, AssignError> {
        if weights.len() != self.num_slots {
            return Err(AssignError::ShapeMismatch {
                expected: self.num_slots,
                actual: weights.len(),
            });
        }
        if let Some((slot, &value)) = weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
            return Err(AssignError::InvalidWeight { slot, value });
        }

        let id = self.num_people();
        self.weights.extend_from_slice(weights);
        self.attributes.push(attributes.into());
        Ok(id)
    }

    /// Appends a constraint set. Returns its index.
    ///
    /// Satisfiability is not checked here.
    pub fn add_constraint(&mut self, tags: impl Into<TagSet>) -> usize {
        self.constraints.push(tags.into());
        self.constraints.len() - 1
    }

    /// Number of slots to fill.
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Number of entities added so far.
    pub fn num_people(&self) -> usize {
        self.attributes.len()
    }

    /// Number of constraint sets.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Whether any constraint set has been added.
    pub fn has_constraints(&self) -> bool {
        !self.constraints.is_empty()
    }

    /// Weight of `entity` at `slot`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn weight(&self, entity: EntityId, slot: SlotId) -> f64 {
        debug_assert!(slot < self.num_slots);
        self.weights[entity * self.num_slots + slot]
    }

    /// The full weight row of `entity`.
    pub fn weights(&self, entity: EntityId) -> &[f64] {
        let start = entity * self.num_slots;
        &self.weights[start..start + self.num_slots]
    }

    /// Attribute set of `entity`.
    pub fn attributes(&self, entity: EntityId) -> &TagSet {
        &self.attributes[entity]
    }

    /// All constraint sets, in insertion order.
    pub fn constraints(&self) -> &[TagSet] {
        &self.constraints
    }

    /// Checks that a full assignment can be formed before searching.
    ///
    /// A model without entities is not an error here: the search simply
    /// finds nothing. With `enforce_constraints`, more constraint sets than
    /// slots can never be covered by distinct entities.
    pub(crate) fn validate_for_search(&self, enforce_constraints: bool) -> Result<(), AssignError> {
        let people = self.num_people();
        if people > 0 && people < self.num_slots {
            return Err(AssignError::invalid(format!(
                "{people} entities cannot fill {} slots",
                self.num_slots
            )));
        }
        if enforce_constraints && self.num_constraints() > self.num_slots {
            return Err(AssignError::invalid(format!(
                "{} constraint sets cannot be covered by {} slots",
                self.num_constraints(),
                self.num_slots
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ScheduleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "schedule: {} entities, {} slots, {} constraints",
            self.num_people(),
            self.num_slots,
            self.num_constraints()
        )?;
        for entity in 0..self.num_people() {
            write!(f, "  entity {entity:>3}:")?;
            for w in self.weights(entity) {
                write!(f, " {w:>8.3}")?;
            }
            if !self.attributes[entity].is_empty() {
                write!(f, "  attributes {}", self.attributes[entity])?;
            }
            writeln!(f)?;
        }
        for (i, constraint) in self.constraints.iter().enumerate() {
            writeln!(f, "  constraint {i:>3}: {constraint}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_slots_rejected() {
        assert!(matches!(
            ScheduleModel::new(0),
            Err(AssignError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_add_entity_assigns_sequential_ids() {
        let mut model = ScheduleModel::new(3).unwrap();
        assert_eq!(model.add_entity(&[1.0, 2.0, 3.0]).unwrap(), 0);
        assert_eq!(model.add_entity(&[4.0, 5.0, 6.0]).unwrap(), 1);
        assert_eq!(model.num_people(), 2);
        assert_eq!(model.weights(1), &[4.0, 5.0, 6.0]);
        assert_eq!(model.weight(0, 2), 3.0);
        assert!(model.attributes(0).is_empty());
    }

    #[test]
    fn test_shape_mismatch_leaves_model_unchanged() {
        let mut model = ScheduleModel::new(3).unwrap();
        model.add_entity(&[1.0, 2.0, 3.0]).unwrap();

        let err = model.add_entity(&[1.0]).unwrap_err();
        assert_eq!(
            err,
            AssignError::ShapeMismatch {
                expected: 3,
                actual: 1
            }
        );
        assert_eq!(model.num_people(), 1);

        assert!(model.add_entity(&[]).is_err());
        assert_eq!(model.num_people(), 1);
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let mut model = ScheduleModel::new(2).unwrap();
        let err = model.add_entity(&[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, AssignError::InvalidWeight { slot: 1, .. }));
        assert!(model.add_entity(&[f64::INFINITY, 0.0]).is_err());
        assert_eq!(model.num_people(), 0);
    }

    #[test]
    fn test_constraints_accumulate() {
        let mut model = ScheduleModel::new(2).unwrap();
        assert!(!model.has_constraints());
        assert_eq!(model.add_constraint([0, 2]), 0);
        assert_eq!(model.add_constraint([0, 2]), 1);
        assert_eq!(model.add_constraint(TagSet::new()), 2);
        assert_eq!(model.num_constraints(), 3);
        assert_eq!(model.constraints()[0], TagSet::from([2, 0]));
    }

    #[test]
    fn test_validate_for_search() {
        let mut model = ScheduleModel::new(2).unwrap();
        assert!(model.validate_for_search(true).is_ok());

        model.add_entity(&[1.0, 1.0]).unwrap();
        assert!(matches!(
            model.validate_for_search(true),
            Err(AssignError::InvalidConfiguration(_))
        ));

        model.add_entity(&[1.0, 1.0]).unwrap();
        assert!(model.validate_for_search(true).is_ok());

        for _ in 0..3 {
            model.add_constraint([0]);
        }
        assert!(model.validate_for_search(true).is_err());
        assert!(model.validate_for_search(false).is_ok());
    }

    #[test]
    fn test_display_lists_entities_and_constraints() {
        let mut model = ScheduleModel::new(2).unwrap();
        model.add_entity_with_attributes(&[1.0, 0.5], [3]).unwrap();
        model.add_constraint([3]);
        let text = model.to_string();
        assert!(text.contains("1 entities, 2 slots, 1 constraints"));
        assert!(text.contains("attributes {3}"));
        assert!(text.contains("constraint   0: {3}"));
    }
}

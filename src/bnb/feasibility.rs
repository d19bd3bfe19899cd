//! Feasibility checks for candidate assignments.
//!
//! Both checks are pure functions of an entry sequence and the model, so
//! they can be applied to tree nodes and to copied solutions alike.

use super::node::AssignmentEntry;
use crate::model::ScheduleModel;
use fixedbitset::FixedBitSet;

/// Whether the entity ids in `entries` are pairwise distinct.
///
/// Ids at or above `num_people` never occur in a well-formed node; they are
/// treated as infeasible.
pub fn is_feasible(entries: &[AssignmentEntry], num_people: usize) -> bool {
    let mut seen = FixedBitSet::with_capacity(num_people);
    for entry in entries {
        if entry.entity >= num_people || seen.put(entry.entity) {
            return false;
        }
    }
    true
}

/// Whether every constraint set of `model` can be covered by a distinct
/// entity of `entries`.
///
/// An entity covers a constraint when its attributes are a superset of the
/// constraint's tags, and each entity covers at most one constraint however
/// many slots it occupies. Coverage is found as a bipartite matching
/// (constraints to entities) with augmenting paths; each augmentation visits
/// every entity at most once, so the check always terminates.
pub fn validates_constraints(entries: &[AssignmentEntry], model: &ScheduleModel) -> bool {
    let constraints = model.constraints();
    if constraints.is_empty() {
        return true;
    }

    let mut seen = FixedBitSet::with_capacity(model.num_people());
    let entities: Vec<usize> = entries
        .iter()
        .map(|entry| entry.entity)
        .filter(|&entity| entity < model.num_people() && !seen.put(entity))
        .collect();
    if constraints.len() > entities.len() {
        return false;
    }

    let candidates: Vec<Vec<usize>> = constraints
        .iter()
        .map(|tags| {
            entities
                .iter()
                .enumerate()
                .filter(|(_, &entity)| tags.is_subset(model.attributes(entity)))
                .map(|(index, _)| index)
                .collect()
        })
        .collect();

    let mut owner: Vec<Option<usize>> = vec![None; entities.len()];
    let mut visited = FixedBitSet::with_capacity(entities.len());
    for constraint in 0..constraints.len() {
        visited.clear();
        if !augment(constraint, &candidates, &mut owner, &mut visited) {
            return false;
        }
    }
    true
}

/// Tries to give `constraint` an entity, re-routing earlier matches if needed.
fn augment(
    constraint: usize,
    candidates: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut FixedBitSet,
) -> bool {
    for &index in &candidates[constraint] {
        if visited.put(index) {
            continue;
        }
        let free = match owner[index] {
            None => true,
            Some(other) => augment(other, candidates, owner, visited),
        };
        if free {
            owner[index] = Some(constraint);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(ids: &[usize]) -> Vec<AssignmentEntry> {
        ids.iter()
            .map(|&entity| AssignmentEntry {
                entity,
                weight: 1.0,
            })
            .collect()
    }

    /// Entities 0..=3 with attributes {0,2}, {0,1,2}, {1}, {1}.
    fn staffing_model() -> ScheduleModel {
        let mut model = ScheduleModel::new(2).unwrap();
        model.add_entity_with_attributes(&[1.0, 0.0], [0, 2]).unwrap();
        model.add_entity_with_attributes(&[0.0, 1.0], [0, 1, 2]).unwrap();
        model.add_entity_with_attributes(&[1.0, 0.0], [1]).unwrap();
        model.add_entity_with_attributes(&[0.0, 1.0], [1]).unwrap();
        model
    }

    #[test]
    fn test_distinct_ids_are_feasible() {
        assert!(is_feasible(&entries(&[2, 0, 1]), 3));
        assert!(is_feasible(&entries(&[4, 1]), 5));
        assert!(is_feasible(&[], 0));
    }

    #[test]
    fn test_duplicate_ids_are_infeasible() {
        assert!(!is_feasible(&entries(&[1, 1]), 3));
        assert!(!is_feasible(&entries(&[0, 2, 0]), 3));
    }

    #[test]
    fn test_out_of_range_id_is_infeasible() {
        assert!(!is_feasible(&entries(&[0, 3]), 3));
    }

    #[test]
    fn test_no_constraints_always_validate() {
        let model = ScheduleModel::new(2).unwrap();
        assert!(validates_constraints(&entries(&[0, 0]), &model));
    }

    #[test]
    fn test_constraints_need_distinct_entities() {
        let mut model = staffing_model();
        model.add_constraint([0, 2]);
        model.add_constraint([1]);

        assert!(validates_constraints(&entries(&[2, 1]), &model));
        assert!(validates_constraints(&entries(&[0, 3]), &model));
        // entity 1 covers either constraint but not both
        assert!(!validates_constraints(&entries(&[1, 1]), &model));
        assert!(!validates_constraints(&entries(&[2, 3]), &model));
    }

    #[test]
    fn test_repeated_entity_covers_one_constraint() {
        let mut model = ScheduleModel::new(2).unwrap();
        model.add_entity_with_attributes(&[1.0, 1.0], [0, 1]).unwrap();
        model.add_entity_with_attributes(&[1.0, 1.0], [0]).unwrap();
        model.add_constraint([0]);
        model.add_constraint([1]);

        assert!(!validates_constraints(&entries(&[0, 0]), &model));
        assert!(validates_constraints(&entries(&[1, 0]), &model));
    }

    #[test]
    fn test_matching_reroutes_earlier_choice() {
        let mut model = staffing_model();
        // first-fit would give {1} to entity 1 in slot 0 and strand {0, 2}
        model.add_constraint([1]);
        model.add_constraint([0, 2]);

        assert!(validates_constraints(&entries(&[1, 2]), &model));
    }

    #[test]
    fn test_unknown_tag_fails() {
        let mut model = staffing_model();
        model.add_constraint([5]);
        assert!(!validates_constraints(&entries(&[0, 1]), &model));
    }

    #[test]
    fn test_more_constraints_than_slots_fails() {
        let mut model = staffing_model();
        for _ in 0..3 {
            model.add_constraint(crate::model::TagSet::new());
        }
        assert!(!validates_constraints(&entries(&[0, 1]), &model));
    }
}

//! Property tests for the branch-and-bound search.

use proptest::prelude::*;
use u_assign::bnb::{is_feasible, AssignmentEntry, BnbConfig, BnbRunner};
use u_assign::model::ScheduleModel;
use u_assign::AssignError;

fn model_from(num_slots: usize, rows: &[Vec<f64>]) -> ScheduleModel {
    let mut model = ScheduleModel::new(num_slots).unwrap();
    for row in rows {
        model.add_entity(row).unwrap();
    }
    model
}

fn brute_force(model: &ScheduleModel) -> f64 {
    fn go(model: &ScheduleModel, slot: usize, used: &mut [bool], acc: f64, best: &mut f64) {
        if slot == model.num_slots() {
            *best = best.max(acc);
            return;
        }
        for e in 0..model.num_people() {
            if !used[e] {
                used[e] = true;
                go(model, slot + 1, used, acc + model.weight(e, slot), best);
                used[e] = false;
            }
        }
    }
    let mut best = f64::NEG_INFINITY;
    go(model, 0, &mut vec![false; model.num_people()], 0.0, &mut best);
    best
}

/// (num_slots, weight rows) with at least as many rows as slots.
fn instance() -> impl Strategy<Value = (usize, Vec<Vec<f64>>)> {
    (1usize..=4).prop_flat_map(|slots| {
        let rows = prop::collection::vec(prop::collection::vec(-10.0f64..10.0, slots), slots..=6);
        (Just(slots), rows)
    })
}

proptest! {
    #[test]
    fn result_is_a_distinct_selection((slots, rows) in instance()) {
        let model = model_from(slots, &rows);
        let result = BnbRunner::run(&model, &BnbConfig::default()).unwrap();
        let ids = result.best().entity_ids();
        prop_assert_eq!(ids.len(), slots);
        prop_assert!(is_feasible(&result.best().entries, model.num_people()));
        for (slot, entry) in result.best().entries.iter().enumerate() {
            prop_assert_eq!(entry.weight, model.weight(entry.entity, slot));
        }
    }

    #[test]
    fn result_is_optimal((slots, rows) in instance()) {
        let model = model_from(slots, &rows);
        let result = BnbRunner::run(&model, &BnbConfig::default()).unwrap();
        prop_assert!((result.best_weight() - brute_force(&model)).abs() < 1e-9);
    }

    #[test]
    fn result_beats_feasible_greedy_root((slots, rows) in instance()) {
        let model = model_from(slots, &rows);
        let root: Vec<AssignmentEntry> = (0..slots)
            .map(|slot| {
                let mut best = AssignmentEntry { entity: 0, weight: model.weight(0, slot) };
                for e in 1..model.num_people() {
                    if model.weight(e, slot) > best.weight {
                        best = AssignmentEntry { entity: e, weight: model.weight(e, slot) };
                    }
                }
                best
            })
            .collect();
        let result = BnbRunner::run(&model, &BnbConfig::default()).unwrap();
        if is_feasible(&root, model.num_people()) {
            let root_weight: f64 = root.iter().map(|e| e.weight).sum();
            prop_assert!(result.best_weight() >= root_weight - 1e-9);
        }
    }

    #[test]
    fn empty_constraint_list_changes_nothing((slots, rows) in instance()) {
        let model = model_from(slots, &rows);
        let ungated = BnbConfig::default().with_enforce_constraints(false);
        let plain = BnbRunner::run(&model, &ungated).unwrap();
        let gated = BnbRunner::run(&model, &BnbConfig::default()).unwrap();
        prop_assert_eq!(plain.best().entity_ids(), gated.best().entity_ids());
        prop_assert_eq!(plain.best_weight(), gated.best_weight());
    }

    #[test]
    fn duplicate_ids_are_never_feasible(
        ids in prop::collection::vec(0usize..5, 2..6),
        dup in 0usize..5,
        at in 0usize..6,
    ) {
        let mut ids = ids;
        let at = at % ids.len();
        let other = (at + 1) % ids.len();
        ids[at] = dup;
        ids[other] = dup;
        let entries: Vec<AssignmentEntry> = ids
            .iter()
            .map(|&entity| AssignmentEntry { entity, weight: 0.0 })
            .collect();
        prop_assert!(!is_feasible(&entries, 5));
    }

    #[test]
    fn too_few_entities_is_a_configuration_error(slots in 2usize..6, people in 1usize..6) {
        prop_assume!(people < slots);
        let model = ScheduleModel::random(people, slots, 0).unwrap();
        prop_assert!(matches!(
            BnbRunner::run(&model, &BnbConfig::default()),
            Err(AssignError::InvalidConfiguration(_))
        ));
    }
}

#[test]
fn independent_solves_run_concurrently() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            std::thread::spawn(move || {
                let model = ScheduleModel::random(6, 4, seed).unwrap();
                let result = BnbRunner::run(&model, &BnbConfig::default()).unwrap();
                (brute_force(&model), result.best_weight())
            })
        })
        .collect();
    for handle in handles {
        let (expected, got) = handle.join().unwrap();
        assert!((expected - got).abs() < 1e-9);
    }
}

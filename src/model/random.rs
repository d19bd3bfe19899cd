//! Reproducible random instances for tests and benchmarks.

use super::schedule::ScheduleModel;
use crate::error::AssignError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

impl ScheduleModel {
    /// Builds a model with `num_people` entities whose weights are drawn
    /// uniformly from `[0, 1)`.
    ///
    /// The same seed always yields the same model.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_assign::model::ScheduleModel;
    ///
    /// let a = ScheduleModel::random(6, 3, 42).unwrap();
    /// let b = ScheduleModel::random(6, 3, 42).unwrap();
    /// assert_eq!(a.num_people(), 6);
    /// assert_eq!(a.weights(4), b.weights(4));
    /// ```
    pub fn random(num_people: usize, num_slots: usize, seed: u64) -> Result<Self, AssignError> {
        let mut model = ScheduleModel::new(num_slots)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut row = vec![0.0; num_slots];
        for _ in 0..num_people {
            for w in row.iter_mut() {
                *w = rng.random_range(0.0..1.0);
            }
            model.add_entity(&row)?;
        }
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_is_reproducible() {
        let a = ScheduleModel::random(5, 4, 7).unwrap();
        let b = ScheduleModel::random(5, 4, 7).unwrap();
        for e in 0..5 {
            assert_eq!(a.weights(e), b.weights(e));
        }
    }

    #[test]
    fn test_random_weights_in_unit_interval() {
        let model = ScheduleModel::random(8, 3, 1).unwrap();
        assert_eq!(model.num_people(), 8);
        for e in 0..8 {
            assert!(model.weights(e).iter().all(|w| (0.0..1.0).contains(w)));
        }
    }

    #[test]
    fn test_random_zero_slots_rejected() {
        assert!(ScheduleModel::random(3, 0, 1).is_err());
    }
}

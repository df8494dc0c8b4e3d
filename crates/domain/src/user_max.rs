use crate::{Exercise, ExerciseID, ReadError, Weight, WriteError, catalog};

/// Smallest plate increment a suggested weight is rounded to.
pub const WEIGHT_INCREMENT: f32 = 2.5;

pub trait UserMaxRepository {
    fn read_maxima(&self) -> Result<Option<Vec<UserExerciseMax>>, ReadError>;
    fn write_maxima(&self, maxima: &[UserExerciseMax]) -> Result<(), WriteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserExerciseMax {
    pub exercise_id: ExerciseID,
    pub max_weight: Weight,
}

/// One zero-valued maximum per catalog exercise.
#[must_use]
pub fn default_maxima() -> Vec<UserExerciseMax> {
    catalog::exercises()
        .iter()
        .map(|e| UserExerciseMax {
            exercise_id: e.id.clone(),
            max_weight: Weight::ZERO,
        })
        .collect()
}

#[must_use]
pub fn max_weight(maxima: &[UserExerciseMax], exercise_id: &ExerciseID) -> Option<Weight> {
    maxima
        .iter()
        .find(|m| m.exercise_id == *exercise_id)
        .map(|m| m.max_weight)
}

/// Replace the maximum of an exercise or append it if none is recorded yet.
pub fn set_max_weight(
    maxima: &mut Vec<UserExerciseMax>,
    exercise_id: &ExerciseID,
    weight: Weight,
) {
    if let Some(max) = maxima.iter_mut().find(|m| m.exercise_id == *exercise_id) {
        max.max_weight = weight;
    } else {
        maxima.push(UserExerciseMax {
            exercise_id: exercise_id.clone(),
            max_weight: weight,
        });
    }
}

/// Working weight for an exercise based on the recorded maximum.
///
/// The share of the maximum given by the exercise is rounded half up to the
/// nearest multiple of [`WEIGHT_INCREMENT`]. Zero is returned if no maximum is
/// recorded, which callers present as "no suggestion" rather than as a load.
#[must_use]
pub fn suggested_weight(exercise: &Exercise, maxima: &[UserExerciseMax]) -> Weight {
    let Some(max) = max_weight(maxima, &exercise.id) else {
        return Weight::ZERO;
    };
    let increment = f64::from(WEIGHT_INCREMENT);
    let raw =
        f64::from(f32::from(max)) * f64::from(u32::from(exercise.percentage_of_max)) / 100.0;
    #[allow(clippy::cast_possible_truncation)]
    let rounded = ((raw / increment + 0.5).floor() * increment) as f32;
    Weight(rounded)
}

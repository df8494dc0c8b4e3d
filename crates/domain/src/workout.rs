use chrono::{DateTime, Utc};
use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{
    Exercise, ExerciseID, MuscleGroup, MuscleGroupID, ReadError, Reps, Weight, WriteError, catalog,
};

pub trait WorkoutLogRepository {
    /// Stored workout logs, newest first.
    fn read_workout_logs(&self) -> Result<Option<Vec<WorkoutLog>>, ReadError>;
    fn write_workout_logs(&self, workout_logs: &[WorkoutLog]) -> Result<(), WriteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub id: WorkoutLogID,
    pub date: DateTime<Utc>,
    pub muscle_group_id: MuscleGroupID,
    pub exercises: Vec<ExerciseProgress>,
    pub completed: bool,
}

impl WorkoutLog {
    #[must_use]
    pub fn muscle_group(&self) -> Option<&'static MuscleGroup> {
        catalog::muscle_group(&self.muscle_group_id)
    }

    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Sum of weight times reps over all sets.
    #[must_use]
    pub fn total_volume(&self) -> f32 {
        self.exercises.iter().map(ExerciseProgress::volume).sum()
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutLogID(Uuid);

impl WorkoutLogID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutLogID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutLogID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProgress {
    pub exercise_id: ExerciseID,
    pub sets: Vec<SetRecord>,
}

impl ExerciseProgress {
    #[must_use]
    pub fn exercise(&self) -> Option<&'static Exercise> {
        catalog::exercise(&self.exercise_id)
    }

    #[must_use]
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.sets.iter().all(|s| s.completed)
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(SetRecord::volume).sum()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SetRecord {
    pub weight: Weight,
    pub reps: Reps,
    pub completed: bool,
}

impl SetRecord {
    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let reps = u32::from(self.reps) as f32;
        f32::from(self.weight) * reps
    }
}

/// Changes applied to a stored workout log. Fields set to `None` are kept.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutLogUpdate {
    pub date: Option<DateTime<Utc>>,
    pub muscle_group_id: Option<MuscleGroupID>,
    pub exercises: Option<Vec<ExerciseProgress>>,
    pub completed: Option<bool>,
}

impl WorkoutLogUpdate {
    pub fn apply(self, workout_log: &mut WorkoutLog) {
        if let Some(date) = self.date {
            workout_log.date = date;
        }
        if let Some(muscle_group_id) = self.muscle_group_id {
            workout_log.muscle_group_id = muscle_group_id;
        }
        if let Some(exercises) = self.exercises {
            workout_log.exercises = exercises;
        }
        if let Some(completed) = self.completed {
            workout_log.completed = completed;
        }
    }
}

use derive_more::{Deref, Display};

use crate::{Percentage, RepRange, Time, catalog};

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub muscle_group_id: MuscleGroupID,
    pub name: &'static str,
    pub description: &'static str,
    pub sets: u32,
    pub reps: RepRange,
    pub rest: Time,
    pub percentage_of_max: Percentage,
}

impl Exercise {
    #[must_use]
    pub fn muscle_group(&self) -> Option<&'static MuscleGroup> {
        catalog::muscle_group(&self.muscle_group_id)
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(String);

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleGroup {
    pub id: MuscleGroupID,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl MuscleGroup {
    /// Exercises of this group in catalog order.
    pub fn exercises(&self) -> impl Iterator<Item = &'static Exercise> + '_ {
        catalog::exercises()
            .iter()
            .filter(|e| e.muscle_group_id == self.id)
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MuscleGroupID(String);

impl From<&str> for MuscleGroupID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MuscleGroupID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

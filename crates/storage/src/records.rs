use chrono::{DateTime, Utc};
use log::warn;
use pump_domain as domain;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum InvalidRecord {
    #[error("invalid id {0:?}")]
    ID(String),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserExerciseMax {
    pub exercise_id: String,
    pub max_weight: f32,
}

impl From<&domain::UserExerciseMax> for UserExerciseMax {
    fn from(value: &domain::UserExerciseMax) -> Self {
        Self {
            exercise_id: value.exercise_id.to_string(),
            max_weight: value.max_weight.into(),
        }
    }
}

impl TryFrom<UserExerciseMax> for domain::UserExerciseMax {
    type Error = InvalidRecord;

    fn try_from(value: UserExerciseMax) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise_id: value.exercise_id.into(),
            max_weight: domain::Weight::new(value.max_weight)?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "muscleGroup")]
    pub muscle_group_id: String,
    pub exercises: Vec<ExerciseProgress>,
    pub completed: bool,
}

impl From<&domain::WorkoutLog> for WorkoutLog {
    fn from(value: &domain::WorkoutLog) -> Self {
        Self {
            id: value.id.to_string(),
            date: value.date,
            muscle_group_id: value.muscle_group_id.to_string(),
            exercises: value.exercises.iter().map(ExerciseProgress::from).collect(),
            completed: value.completed,
        }
    }
}

impl TryFrom<WorkoutLog> for domain::WorkoutLog {
    type Error = InvalidRecord;

    fn try_from(value: WorkoutLog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: workout_log_id(&value.id)?,
            date: value.date,
            muscle_group_id: value.muscle_group_id.into(),
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseProgress::from)
                .collect(),
            completed: value.completed,
        })
    }
}

/// Logs are identified by UUIDs. Numeric ids, as created from millisecond
/// timestamps by earlier versions, are mapped onto UUIDs.
fn workout_log_id(id: &str) -> Result<domain::WorkoutLogID, InvalidRecord> {
    if let Ok(uuid) = Uuid::parse_str(id) {
        return Ok(uuid.into());
    }
    id.parse::<u128>()
        .map(domain::WorkoutLogID::from)
        .map_err(|_| InvalidRecord::ID(id.to_string()))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgress {
    pub exercise_id: String,
    pub sets: Vec<SetRecord>,
}

impl From<&domain::ExerciseProgress> for ExerciseProgress {
    fn from(value: &domain::ExerciseProgress) -> Self {
        Self {
            exercise_id: value.exercise_id.to_string(),
            sets: value.sets.iter().map(SetRecord::from).collect(),
        }
    }
}

impl From<ExerciseProgress> for domain::ExerciseProgress {
    fn from(value: ExerciseProgress) -> Self {
        Self {
            exercise_id: value.exercise_id.into(),
            sets: value.sets.into_iter().map(domain::SetRecord::from).collect(),
        }
    }
}

/// Set as entered during a workout. Earlier versions stored the raw input, so
/// negative values are accepted here.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SetRecord {
    pub weight: f32,
    pub reps: i64,
    pub completed: bool,
}

impl From<&domain::SetRecord> for SetRecord {
    fn from(value: &domain::SetRecord) -> Self {
        Self {
            weight: value.weight.into(),
            reps: i64::from(u32::from(value.reps)),
            completed: value.completed,
        }
    }
}

/// Values which are not valid any more are taken as zero, as when entered.
impl From<SetRecord> for domain::SetRecord {
    fn from(value: SetRecord) -> Self {
        let weight = domain::Weight::new(value.weight).unwrap_or_else(|err| {
            warn!("set weight {} taken as zero: {err}", value.weight);
            domain::Weight::ZERO
        });
        let reps = u32::try_from(value.reps)
            .map_err(|_| domain::RepsError::OutOfRange)
            .and_then(domain::Reps::new)
            .unwrap_or_else(|err| {
                warn!("set reps {} taken as zero: {err}", value.reps);
                domain::Reps::default()
            });
        Self {
            weight,
            reps,
            completed: value.completed,
        }
    }
}

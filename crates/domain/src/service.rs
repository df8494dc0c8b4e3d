use chrono::{DateTime, TimeZone, Timelike};
use log::{debug, error};

use crate::{
    DashboardStats, DisplayNameRepository, Exercise, ExerciseID, Greeting, MuscleGroupID, Name,
    ReadError, SessionError, UpdateError, UserExerciseMax, UserMaxRepository, Weight, WorkoutLog,
    WorkoutLogID, WorkoutLogRepository, WorkoutLogUpdate, WorkoutSession, WriteError,
    default_maxima, max_weight, recent_workouts, salutation, set_max_weight, suggested_weight,
    this_week_workouts,
};

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoStorage) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

/// In-memory state of the tracker backed by a repository.
///
/// All records are read once on creation. Every mutation is applied to the
/// in-memory state first and then written in full. A failed write is logged
/// and returned, but the mutation is kept.
pub struct Service<R> {
    repository: R,
    maxima: Vec<UserExerciseMax>,
    workout_logs: Vec<WorkoutLog>,
    display_name: String,
}

impl<R> Service<R>
where
    R: UserMaxRepository + WorkoutLogRepository + DisplayNameRepository,
{
    pub fn new(repository: R) -> Self {
        let maxima = match log_on_error!(repository.read_maxima(), ReadError, "read", "maxima") {
            Ok(Some(maxima)) => maxima,
            Ok(None) => {
                let maxima = default_maxima();
                let _ = log_on_error!(
                    repository.write_maxima(&maxima),
                    WriteError,
                    "initialize",
                    "maxima"
                );
                maxima
            }
            Err(_) => default_maxima(),
        };
        let workout_logs = log_on_error!(
            repository.read_workout_logs(),
            ReadError,
            "read",
            "workout logs"
        )
        .ok()
        .flatten()
        .unwrap_or_default();
        let display_name = log_on_error!(
            repository.read_display_name(),
            ReadError,
            "read",
            "display name"
        )
        .ok()
        .flatten()
        .unwrap_or_default();

        debug!(
            "loaded {} maxima and {} workout logs",
            maxima.len(),
            workout_logs.len()
        );

        Self {
            repository,
            maxima,
            workout_logs,
            display_name,
        }
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    #[must_use]
    pub fn maxima(&self) -> &[UserExerciseMax] {
        &self.maxima
    }

    #[must_use]
    pub fn max_weight(&self, exercise_id: &ExerciseID) -> Option<Weight> {
        max_weight(&self.maxima, exercise_id)
    }

    #[must_use]
    pub fn suggested_weight(&self, exercise: &Exercise) -> Weight {
        suggested_weight(exercise, &self.maxima)
    }

    pub fn update_max_weight(
        &mut self,
        exercise_id: &ExerciseID,
        weight: Weight,
    ) -> Result<(), WriteError> {
        set_max_weight(&mut self.maxima, exercise_id, weight);
        log_on_error!(
            self.repository.write_maxima(&self.maxima),
            WriteError,
            "write",
            "maxima"
        )
    }

    /// Stored workout logs, newest first.
    #[must_use]
    pub fn workout_logs(&self) -> &[WorkoutLog] {
        &self.workout_logs
    }

    #[must_use]
    pub fn recent_workouts(&self, limit: usize) -> &[WorkoutLog] {
        recent_workouts(&self.workout_logs, limit)
    }

    #[must_use]
    pub fn total_workouts(&self) -> usize {
        self.workout_logs.len()
    }

    #[must_use]
    pub fn this_week_workouts<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> usize {
        this_week_workouts(&self.workout_logs, now)
    }

    #[must_use]
    pub fn dashboard_stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardStats {
        DashboardStats::new(&self.workout_logs, now)
    }

    pub fn add_workout_log(&mut self, workout_log: WorkoutLog) -> Result<(), WriteError> {
        debug!("add workout log {}", workout_log.id);
        self.workout_logs.insert(0, workout_log);
        log_on_error!(
            self.repository.write_workout_logs(&self.workout_logs),
            WriteError,
            "write",
            "workout logs"
        )
    }

    pub fn update_workout_log(
        &mut self,
        id: WorkoutLogID,
        update: WorkoutLogUpdate,
    ) -> Result<(), UpdateError> {
        let Some(workout_log) = self.workout_logs.iter_mut().find(|w| w.id == id) else {
            debug!("failed to update workout log {id}: not found");
            return Err(UpdateError::NotFound);
        };
        update.apply(workout_log);
        Ok(log_on_error!(
            self.repository.write_workout_logs(&self.workout_logs),
            WriteError,
            "write",
            "workout logs"
        )?)
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Dashboard headline for the local time `now`.
    #[must_use]
    pub fn salutation<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String {
        salutation(Greeting::at(now.hour()), &self.display_name)
    }

    /// Change the display name.
    ///
    /// A blank name clears the name for the running app, but the stored name is
    /// only overwritten by a non-blank one.
    pub fn set_display_name(&mut self, name: &str) -> Result<(), UpdateError> {
        let Some(name) =
            Name::parse(name).map_err(|err| UpdateError::InvalidValue(err.to_string()))?
        else {
            self.display_name.clear();
            return Ok(());
        };
        self.display_name = name.to_string();
        Ok(log_on_error!(
            self.repository.write_display_name(&name),
            WriteError,
            "write",
            "display name"
        )?)
    }

    pub fn start_workout(
        &self,
        muscle_group_id: &MuscleGroupID,
    ) -> Result<WorkoutSession, SessionError> {
        WorkoutSession::start(muscle_group_id, &self.maxima)
    }
}

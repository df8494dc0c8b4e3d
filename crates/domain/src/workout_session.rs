use chrono::Utc;
use log::debug;

use crate::{
    Exercise, ExerciseProgress, MuscleGroup, MuscleGroupID, Reps, SetRecord, Time,
    UserExerciseMax, Weight, WorkoutLog, WorkoutLogID, catalog, suggested_weight,
};

/// Rest between the last set of an exercise and the first set of the next one.
pub const INTER_EXERCISE_REST: Time = Time(90);

/// Initial weight of a set if no suggestion can be derived from a maximum.
pub const DEFAULT_WEIGHT: Weight = Weight(20.0);

/// Initial reps of a set if the prescribed rep range has no lower bound.
pub const DEFAULT_REPS: Reps = Reps(10);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    InProgress {
        exercise_idx: usize,
        set_idx: usize,
    },
    /// The cursor already points to the set following the rest.
    Resting {
        exercise_idx: usize,
        set_idx: usize,
        remaining: Time,
    },
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetOutcome {
    Rest(Time),
    Completed(WorkoutLog),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("muscle group has no exercises")]
    NoExercises,
    #[error("rest is ongoing")]
    Resting,
    #[error("no rest is ongoing")]
    NotResting,
    #[error("workout is completed")]
    Completed,
}

/// A workout in progress.
///
/// The session walks linearly through all sets of the selected exercises.
/// Completing a set starts a rest, which ends after the countdown expires or
/// when it is skipped. Completing the last set produces the [`WorkoutLog`] of
/// the session. Dropping the session (or calling [`WorkoutSession::cancel`])
/// discards all progress.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    muscle_group_id: MuscleGroupID,
    exercises: Vec<ExerciseProgress>,
    rest_times: Vec<Time>,
    state: SessionState,
}

impl WorkoutSession {
    /// Start a workout for the given muscle group using the catalog exercises.
    ///
    /// Muscle groups without any exercises cannot be trained, so no session is
    /// created for them.
    pub fn start(
        muscle_group_id: &MuscleGroupID,
        maxima: &[UserExerciseMax],
    ) -> Result<Self, SessionError> {
        Self::with_exercises(
            muscle_group_id.clone(),
            &catalog::generate_workout(muscle_group_id),
            maxima,
        )
    }

    /// Start a workout for an explicit list of exercises.
    ///
    /// Exercises without any prescribed sets are left out.
    pub fn with_exercises(
        muscle_group_id: MuscleGroupID,
        exercises: &[&Exercise],
        maxima: &[UserExerciseMax],
    ) -> Result<Self, SessionError> {
        let exercises = exercises
            .iter()
            .filter(|e| e.sets > 0)
            .collect::<Vec<_>>();

        if exercises.is_empty() {
            debug!("no exercises for muscle group {muscle_group_id}");
            return Err(SessionError::NoExercises);
        }

        debug!(
            "start workout for muscle group {muscle_group_id} with {} exercises",
            exercises.len()
        );

        Ok(Self {
            muscle_group_id,
            rest_times: exercises.iter().map(|e| e.rest).collect(),
            exercises: exercises
                .iter()
                .map(|exercise| {
                    let suggestion = suggested_weight(exercise, maxima);
                    let set = SetRecord {
                        weight: if suggestion.is_zero() {
                            DEFAULT_WEIGHT
                        } else {
                            suggestion
                        },
                        reps: exercise.reps.lower_bound().unwrap_or(DEFAULT_REPS),
                        completed: false,
                    };
                    ExerciseProgress {
                        exercise_id: exercise.id.clone(),
                        sets: (0..exercise.sets).map(|_| set).collect(),
                    }
                })
                .collect(),
            state: SessionState::InProgress {
                exercise_idx: 0,
                set_idx: 0,
            },
        })
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn muscle_group_id(&self) -> &MuscleGroupID {
        &self.muscle_group_id
    }

    #[must_use]
    pub fn muscle_group(&self) -> Option<&'static MuscleGroup> {
        catalog::muscle_group(&self.muscle_group_id)
    }

    #[must_use]
    pub fn exercises(&self) -> &[ExerciseProgress] {
        &self.exercises
    }

    /// Position of the current (or, while resting, the next) set.
    #[must_use]
    pub fn cursor(&self) -> Option<(usize, usize)> {
        match self.state {
            SessionState::InProgress {
                exercise_idx,
                set_idx,
            }
            | SessionState::Resting {
                exercise_idx,
                set_idx,
                ..
            } => Some((exercise_idx, set_idx)),
            SessionState::Completed => None,
        }
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<&ExerciseProgress> {
        self.cursor()
            .and_then(|(exercise_idx, _)| self.exercises.get(exercise_idx))
    }

    #[must_use]
    pub fn current_set(&self) -> Option<&SetRecord> {
        self.cursor().and_then(|(exercise_idx, set_idx)| {
            self.exercises
                .get(exercise_idx)
                .and_then(|e| e.sets.get(set_idx))
        })
    }

    #[must_use]
    pub fn remaining_rest(&self) -> Option<Time> {
        match self.state {
            SessionState::Resting { remaining, .. } => Some(remaining),
            SessionState::InProgress { .. } | SessionState::Completed => None,
        }
    }

    #[must_use]
    pub fn is_resting(&self) -> bool {
        matches!(self.state, SessionState::Resting { .. })
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    #[must_use]
    pub fn completed_sets(&self) -> usize {
        self.exercises
            .iter()
            .map(ExerciseProgress::completed_sets)
            .sum()
    }

    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Share of completed sets in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        self.completed_sets() as f32 / self.total_sets() as f32 * 100.0
    }

    /// Mark the current set as completed and advance to the next set.
    ///
    /// A rest follows every set except the last one. Its duration is the rest
    /// time of the exercise between sets of the same exercise, and
    /// [`INTER_EXERCISE_REST`] before the next exercise. After the last set the
    /// session is completed and its log is returned.
    pub fn complete_set(&mut self) -> Result<SetOutcome, SessionError> {
        let (exercise_idx, set_idx) = self.in_progress_cursor()?;
        let num_sets = self.exercises[exercise_idx].sets.len();

        self.exercises[exercise_idx].sets[set_idx].completed = true;

        if set_idx + 1 < num_sets {
            let rest = self.rest_times[exercise_idx];
            self.begin_rest(exercise_idx, set_idx + 1, rest);
            Ok(SetOutcome::Rest(rest))
        } else if exercise_idx + 1 < self.exercises.len() {
            self.begin_rest(exercise_idx + 1, 0, INTER_EXERCISE_REST);
            Ok(SetOutcome::Rest(INTER_EXERCISE_REST))
        } else {
            self.state = SessionState::Completed;
            debug!("workout for muscle group {} completed", self.muscle_group_id);
            Ok(SetOutcome::Completed(WorkoutLog {
                id: WorkoutLogID::new(),
                date: Utc::now(),
                muscle_group_id: self.muscle_group_id.clone(),
                exercises: self.exercises.clone(),
                completed: true,
            }))
        }
    }

    /// Overwrite the weight of the current set.
    ///
    /// Only the leading decimal of the input is read. Input without one, or
    /// with a negative one, is taken as zero instead of being rejected.
    pub fn set_weight(&mut self, input: &str) -> Result<Weight, SessionError> {
        let weight = Weight::try_from(input).unwrap_or_else(|err| {
            debug!("invalid weight {input:?} taken as zero: {err}");
            Weight::ZERO
        });
        self.current_set_mut()?.weight = weight;
        Ok(weight)
    }

    /// Overwrite the reps of the current set.
    ///
    /// Only the leading integer of the input is read, e.g. 6 of `"6.5"`. Input
    /// without one is taken as zero instead of being rejected.
    pub fn set_reps(&mut self, input: &str) -> Result<Reps, SessionError> {
        let reps = Reps::try_from(input).unwrap_or_else(|err| {
            debug!("invalid reps {input:?} taken as zero: {err}");
            Reps::default()
        });
        self.current_set_mut()?.reps = reps;
        Ok(reps)
    }

    /// Count down the rest by one second.
    ///
    /// Returns the remaining rest. The rest ends when it reaches zero.
    pub fn tick(&mut self) -> Result<Time, SessionError> {
        match self.state {
            SessionState::Resting {
                exercise_idx,
                set_idx,
                remaining,
            } => {
                let remaining = remaining.decremented();
                self.begin_rest(exercise_idx, set_idx, remaining);
                Ok(remaining)
            }
            SessionState::InProgress { .. } => Err(SessionError::NotResting),
            SessionState::Completed => Err(SessionError::Completed),
        }
    }

    pub fn skip_rest(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Resting {
                exercise_idx,
                set_idx,
                ..
            } => {
                self.begin_rest(exercise_idx, set_idx, Time::ZERO);
                Ok(())
            }
            SessionState::InProgress { .. } => Err(SessionError::NotResting),
            SessionState::Completed => Err(SessionError::Completed),
        }
    }

    /// Abandon the workout. Nothing of the session is kept.
    pub fn cancel(self) {
        debug!(
            "workout for muscle group {} cancelled after {} of {} sets",
            self.muscle_group_id,
            self.completed_sets(),
            self.total_sets()
        );
    }

    /// A rest of zero seconds continues with the next set immediately.
    fn begin_rest(&mut self, exercise_idx: usize, set_idx: usize, remaining: Time) {
        self.state = if remaining.is_zero() {
            SessionState::InProgress {
                exercise_idx,
                set_idx,
            }
        } else {
            SessionState::Resting {
                exercise_idx,
                set_idx,
                remaining,
            }
        };
    }

    fn in_progress_cursor(&self) -> Result<(usize, usize), SessionError> {
        match self.state {
            SessionState::InProgress {
                exercise_idx,
                set_idx,
            } => Ok((exercise_idx, set_idx)),
            SessionState::Resting { .. } => Err(SessionError::Resting),
            SessionState::Completed => Err(SessionError::Completed),
        }
    }

    fn current_set_mut(&mut self) -> Result<&mut SetRecord, SessionError> {
        let (exercise_idx, set_idx) = self.in_progress_cursor()?;
        Ok(&mut self.exercises[exercise_idx].sets[set_idx])
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{ExerciseID, Percentage, RepRange};

    use super::*;

    fn maxima(exercise_id: &str, max_weight: f32) -> Vec<UserExerciseMax> {
        vec![UserExerciseMax {
            exercise_id: exercise_id.into(),
            max_weight: Weight(max_weight),
        }]
    }

    fn exercise(id: &'static str, sets: u32, reps: &'static str, rest: u32) -> Exercise {
        Exercise {
            id: id.into(),
            muscle_group_id: "chest".into(),
            name: id,
            description: "",
            sets,
            reps: RepRange(reps),
            rest: Time(rest),
            percentage_of_max: Percentage(75),
        }
    }

    fn complete_all(session: &mut WorkoutSession) -> Vec<SetOutcome> {
        let mut outcomes = vec![];
        while !session.is_completed() {
            outcomes.push(session.complete_set().unwrap());
            if session.is_resting() {
                session.skip_rest().unwrap();
            }
        }
        outcomes
    }

    #[test]
    fn test_start() {
        let session = WorkoutSession::start(&"chest".into(), &maxima("bench-press", 80.0)).unwrap();

        assert_eq!(
            session.state(),
            SessionState::InProgress {
                exercise_idx: 0,
                set_idx: 0
            }
        );
        assert_eq!(
            session
                .exercises()
                .iter()
                .map(|e| (e.exercise_id.as_str(), e.sets.len()))
                .collect::<Vec<_>>(),
            vec![
                ("bench-press", 4),
                ("incline-press", 3),
                ("cable-fly", 3),
                ("dips", 3)
            ]
        );
        assert_eq!(
            session.exercises()[0].sets,
            vec![
                SetRecord {
                    weight: Weight(60.0),
                    reps: Reps(8),
                    completed: false,
                };
                4
            ]
        );
        assert_eq!(
            session.exercises()[1].sets[0],
            SetRecord {
                weight: DEFAULT_WEIGHT,
                reps: Reps(10),
                completed: false,
            }
        );
        assert_eq!(session.muscle_group().map(|g| g.name), Some("Chest"));
        assert_eq!(session.total_sets(), 13);
        assert_eq!(session.completed_sets(), 0);
    }

    #[rstest]
    #[case("neck")]
    #[case("")]
    fn test_start_without_exercises(#[case] muscle_group_id: &str) {
        assert_eq!(
            WorkoutSession::start(&muscle_group_id.into(), &[]),
            Err(SessionError::NoExercises)
        );
    }

    #[test]
    fn test_with_exercises_skips_exercises_without_sets() {
        let a = exercise("a", 0, "8", 60);
        let b = exercise("b", 2, "8", 60);
        let session = WorkoutSession::with_exercises("chest".into(), &[&a, &b], &[]).unwrap();
        assert_eq!(session.exercises().len(), 1);
        assert_eq!(session.exercises()[0].exercise_id, ExerciseID::from("b"));

        assert_eq!(
            WorkoutSession::with_exercises("chest".into(), &[&a], &[]),
            Err(SessionError::NoExercises)
        );
    }

    #[rstest]
    #[case("12-15", Reps(12))]
    #[case("45-60s", Reps(45))]
    #[case("AMRAP", DEFAULT_REPS)]
    fn test_start_reps(#[case] reps: &'static str, #[case] expected: Reps) {
        let e = exercise("a", 1, reps, 60);
        let session = WorkoutSession::with_exercises("chest".into(), &[&e], &[]).unwrap();
        assert_eq!(session.current_set().map(|s| s.reps), Some(expected));
    }

    #[test]
    fn test_start_weight_falls_back_if_suggestion_is_zero() {
        let e = exercise("a", 1, "8", 60);
        let session =
            WorkoutSession::with_exercises("chest".into(), &[&e], &maxima("a", 1.0)).unwrap();
        assert_eq!(session.current_set().map(|s| s.weight), Some(DEFAULT_WEIGHT));
    }

    #[test]
    fn test_bench_press_scenario() {
        let mut session =
            WorkoutSession::start(&"chest".into(), &maxima("bench-press", 80.0)).unwrap();

        for set_idx in 1..4 {
            assert_eq!(session.complete_set(), Ok(SetOutcome::Rest(Time(90))));
            assert_eq!(
                session.state(),
                SessionState::Resting {
                    exercise_idx: 0,
                    set_idx,
                    remaining: Time(90)
                }
            );
            session.skip_rest().unwrap();
        }

        assert_eq!(
            session.complete_set(),
            Ok(SetOutcome::Rest(INTER_EXERCISE_REST))
        );
        assert_eq!(
            session.state(),
            SessionState::Resting {
                exercise_idx: 1,
                set_idx: 0,
                remaining: INTER_EXERCISE_REST
            }
        );
        assert!(session.exercises()[0].is_done());
    }

    #[test]
    fn test_rest_between_sets_uses_exercise_rest() {
        let a = exercise("a", 2, "8", 45);
        let b = exercise("b", 2, "8", 30);
        let mut session = WorkoutSession::with_exercises("chest".into(), &[&a, &b], &[]).unwrap();

        let outcomes = complete_all(&mut session);

        assert_eq!(outcomes.len(), 4);
        assert_eq!(
            &outcomes[..3],
            &[
                SetOutcome::Rest(Time(45)),
                SetOutcome::Rest(INTER_EXERCISE_REST),
                SetOutcome::Rest(Time(30)),
            ]
        );
    }

    #[test]
    fn test_zero_rest_continues_immediately() {
        let a = exercise("a", 2, "8", 0);
        let mut session = WorkoutSession::with_exercises("chest".into(), &[&a], &[]).unwrap();

        assert_eq!(session.complete_set(), Ok(SetOutcome::Rest(Time::ZERO)));
        assert_eq!(
            session.state(),
            SessionState::InProgress {
                exercise_idx: 0,
                set_idx: 1
            }
        );
    }

    #[test]
    fn test_complete_all_sets() {
        let mut session =
            WorkoutSession::start(&"legs".into(), &maxima("squat", 100.0)).unwrap();
        let initial = session.exercises().to_vec();

        let outcomes = complete_all(&mut session);
        let logs = outcomes
            .iter()
            .filter_map(|o| match o {
                SetOutcome::Completed(log) => Some(log),
                SetOutcome::Rest(_) => None,
            })
            .collect::<Vec<_>>();

        assert_eq!(outcomes.len(), session.total_sets());
        assert_eq!(logs.len(), 1);
        assert!(matches!(outcomes.last(), Some(SetOutcome::Completed(_))));

        let log = logs[0];
        assert!(log.completed);
        assert!(!log.id.is_nil());
        assert_eq!(log.muscle_group_id, MuscleGroupID::from("legs"));
        assert_eq!(
            log.exercises
                .iter()
                .map(|e| (&e.exercise_id, e.sets.len()))
                .collect::<Vec<_>>(),
            initial
                .iter()
                .map(|e| (&e.exercise_id, e.sets.len()))
                .collect::<Vec<_>>()
        );
        assert!(log.exercises.iter().all(ExerciseProgress::is_done));
        assert_eq!(log.exercises[0].sets[0].weight, Weight(80.0));
        assert!(session.is_completed());
        assert_eq!(session.cursor(), None);
        assert_eq!(session.current_exercise(), None);
        assert_approx_eq!(session.progress(), 100.0);
    }

    #[test]
    fn test_complete_set_after_completion() {
        let a = exercise("a", 1, "8", 60);
        let mut session = WorkoutSession::with_exercises("chest".into(), &[&a], &[]).unwrap();

        assert!(matches!(
            session.complete_set(),
            Ok(SetOutcome::Completed(_))
        ));
        assert_eq!(session.complete_set(), Err(SessionError::Completed));
        assert_eq!(session.set_weight("50"), Err(SessionError::Completed));
        assert_eq!(session.tick(), Err(SessionError::Completed));
        assert_eq!(session.skip_rest(), Err(SessionError::Completed));
    }

    #[test]
    fn test_complete_set_while_resting() {
        let mut session = WorkoutSession::start(&"back".into(), &[]).unwrap();
        session.complete_set().unwrap();
        let before = session.clone();

        assert_eq!(session.complete_set(), Err(SessionError::Resting));
        assert_eq!(session, before);
    }

    #[test]
    fn test_tick() {
        let a = exercise("a", 2, "8", 3);
        let mut session = WorkoutSession::with_exercises("chest".into(), &[&a], &[]).unwrap();

        assert_eq!(session.tick(), Err(SessionError::NotResting));

        session.complete_set().unwrap();
        assert_eq!(session.remaining_rest(), Some(Time(3)));
        assert_eq!(session.tick(), Ok(Time(2)));
        assert_eq!(session.tick(), Ok(Time(1)));
        assert!(session.is_resting());
        assert_eq!(session.tick(), Ok(Time::ZERO));
        assert_eq!(
            session.state(),
            SessionState::InProgress {
                exercise_idx: 0,
                set_idx: 1
            }
        );
        assert_eq!(session.remaining_rest(), None);
        assert_eq!(session.tick(), Err(SessionError::NotResting));
    }

    #[test]
    fn test_rest_does_not_change_sets() {
        let a = exercise("a", 2, "8", 3);
        let mut session = WorkoutSession::with_exercises("chest".into(), &[&a], &[]).unwrap();
        session.complete_set().unwrap();
        let sets = session.exercises().to_vec();

        session.tick().unwrap();
        session.skip_rest().unwrap();

        assert_eq!(session.exercises(), sets);
        assert_eq!(session.completed_sets(), 1);
    }

    #[test]
    fn test_skip_rest() {
        let mut session = WorkoutSession::start(&"arms".into(), &[]).unwrap();

        assert_eq!(session.skip_rest(), Err(SessionError::NotResting));

        session.complete_set().unwrap();
        session.tick().unwrap();
        assert_eq!(session.skip_rest(), Ok(()));
        assert_eq!(
            session.state(),
            SessionState::InProgress {
                exercise_idx: 0,
                set_idx: 1
            }
        );
        assert_eq!(session.current_set().map(|s| s.completed), Some(false));
    }

    #[rstest]
    #[case("62.5", Weight(62.5))]
    #[case(" 70 ", Weight(70.0))]
    #[case("62.5kg", Weight(62.5))]
    #[case("1000", Weight(1000.0))]
    #[case("", Weight::ZERO)]
    #[case("heavy", Weight::ZERO)]
    #[case("-5", Weight::ZERO)]
    fn test_set_weight(#[case] input: &str, #[case] expected: Weight) {
        let mut session = WorkoutSession::start(&"chest".into(), &[]).unwrap();

        assert_eq!(session.set_weight(input), Ok(expected));
        assert_eq!(session.current_set().map(|s| s.weight), Some(expected));
        assert_eq!(session.exercises()[0].sets[1].weight, DEFAULT_WEIGHT);
    }

    #[rstest]
    #[case("6", Reps(6))]
    #[case("6.5", Reps(6))]
    #[case("12 reps", Reps(12))]
    #[case("-3", Reps(0))]
    #[case("many", Reps(0))]
    fn test_set_reps(#[case] input: &str, #[case] expected: Reps) {
        let mut session = WorkoutSession::start(&"chest".into(), &[]).unwrap();

        assert_eq!(session.set_reps(input), Ok(expected));
        assert_eq!(session.current_set().map(|s| s.reps), Some(expected));
        assert_eq!(session.exercises()[0].sets[1].reps, Reps(8));
    }

    #[test]
    fn test_edit_while_resting() {
        let mut session = WorkoutSession::start(&"chest".into(), &[]).unwrap();
        session.complete_set().unwrap();

        assert_eq!(session.set_weight("100"), Err(SessionError::Resting));
        assert_eq!(session.set_reps("1"), Err(SessionError::Resting));
        assert_eq!(session.exercises()[0].sets[1].weight, DEFAULT_WEIGHT);
    }

    #[test]
    fn test_edited_values_are_logged() {
        let a = exercise("a", 2, "8", 60);
        let mut session = WorkoutSession::with_exercises("chest".into(), &[&a], &[]).unwrap();

        session.set_weight("42.5").unwrap();
        session.complete_set().unwrap();
        session.skip_rest().unwrap();
        session.set_reps("5").unwrap();
        let Ok(SetOutcome::Completed(log)) = session.complete_set() else {
            panic!("workout not completed");
        };

        assert_eq!(
            log.exercises[0].sets,
            vec![
                SetRecord {
                    weight: Weight(42.5),
                    reps: Reps(8),
                    completed: true,
                },
                SetRecord {
                    weight: DEFAULT_WEIGHT,
                    reps: Reps(5),
                    completed: true,
                },
            ]
        );
    }

    #[test]
    fn test_progress() {
        let mut session = WorkoutSession::start(&"shoulders".into(), &[]).unwrap();
        assert_approx_eq!(session.progress(), 0.0);

        session.complete_set().unwrap();
        session.skip_rest().unwrap();
        session.complete_set().unwrap();

        assert_eq!(session.completed_sets(), 2);
        assert_approx_eq!(session.progress(), 2.0 / 14.0 * 100.0);
    }

    #[test]
    fn test_cursor_while_resting_points_to_next_set() {
        let mut session = WorkoutSession::start(&"core".into(), &[]).unwrap();
        session.complete_set().unwrap();

        assert_eq!(session.cursor(), Some((0, 1)));
        assert_eq!(
            session.current_exercise().map(|e| e.exercise_id.as_str()),
            Some("cable-crunch")
        );
    }
}

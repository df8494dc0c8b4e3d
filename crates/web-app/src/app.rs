use log::debug;
use pump_domain::{
    DisplayNameRepository, ExerciseID, MuscleGroupID, Service, SessionError, SetOutcome,
    UpdateError, UserMaxRepository, Weight, WeightError, WorkoutLogRepository, WorkoutSession,
    WriteError,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum Tab {
    #[default]
    Dashboard,
    Generator,
    Profile,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SelectMuscleGroup(MuscleGroupID),
    CompleteSet,
    EditWeight(String),
    EditReps(String),
    Tick,
    SkipRest,
    CancelSession,
    UpdateName(String),
    UpdateMax {
        exercise_id: ExerciseID,
        input: String,
    },
    SwitchTab(Tab),
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no workout in progress")]
    NoSession,
    #[error("workout already in progress")]
    SessionInProgress,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    InvalidWeight(#[from] WeightError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Update(#[from] UpdateError),
}

/// State of the application behind the views.
///
/// While a workout is active, the session view replaces the tab views. The
/// selected tab is kept and shown again after the workout.
pub struct App<R> {
    service: Service<R>,
    tab: Tab,
    session: Option<WorkoutSession>,
}

impl<R> App<R>
where
    R: UserMaxRepository + WorkoutLogRepository + DisplayNameRepository,
{
    pub fn new(repository: R) -> Self {
        Self {
            service: Service::new(repository),
            tab: Tab::default(),
            session: None,
        }
    }

    #[must_use]
    pub fn service(&self) -> &Service<R> {
        &self.service
    }

    #[must_use]
    pub fn tab(&self) -> Tab {
        self.tab
    }

    #[must_use]
    pub fn session(&self) -> Option<&WorkoutSession> {
        self.session.as_ref()
    }

    /// Whether a rest countdown is running and needs to be ticked.
    #[must_use]
    pub fn is_resting(&self) -> bool {
        self.session.as_ref().is_some_and(WorkoutSession::is_resting)
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<(), Error> {
        match intent {
            Intent::SelectMuscleGroup(muscle_group_id) => {
                if self.session.is_some() {
                    return Err(Error::SessionInProgress);
                }
                self.session = Some(self.service.start_workout(&muscle_group_id)?);
            }
            Intent::CompleteSet => {
                if let SetOutcome::Completed(workout_log) = self.session_mut()?.complete_set()? {
                    self.session = None;
                    self.tab = Tab::Dashboard;
                    self.service.add_workout_log(workout_log)?;
                }
            }
            Intent::EditWeight(input) => {
                self.session_mut()?.set_weight(&input)?;
            }
            Intent::EditReps(input) => {
                self.session_mut()?.set_reps(&input)?;
            }
            Intent::Tick => {
                self.session_mut()?.tick()?;
            }
            Intent::SkipRest => {
                self.session_mut()?.skip_rest()?;
            }
            Intent::CancelSession => {
                self.session.take().ok_or(Error::NoSession)?.cancel();
            }
            Intent::UpdateName(name) => {
                self.service.set_display_name(&name)?;
            }
            Intent::UpdateMax { exercise_id, input } => {
                let weight = Weight::try_from(input.as_str()).inspect_err(|err| {
                    debug!("kept maximum of {exercise_id}, as {input:?} is invalid: {err}");
                })?;
                self.service.update_max_weight(&exercise_id, weight)?;
            }
            Intent::SwitchTab(tab) => {
                self.tab = tab;
            }
        }
        Ok(())
    }

    fn session_mut(&mut self) -> Result<&mut WorkoutSession, Error> {
        self.session.as_mut().ok_or(Error::NoSession)
    }
}

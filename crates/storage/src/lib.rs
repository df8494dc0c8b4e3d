#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::{collections::VecDeque, fmt::Display};

use log::{error, warn};
use pump_domain::{
    DisplayNameRepository, Name, ReadError, StorageError, UserExerciseMax, UserMaxRepository,
    WorkoutLog, WorkoutLogRepository, WriteError,
};
use pump_web_app::log as app_log;
use serde::{Serialize, de::DeserializeOwned};

#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;
pub mod records;

pub const KEY_MAXIMA: &str = "pump-tracker-maxes";
pub const KEY_WORKOUT_LOGS: &str = "pump-tracker-logs";
pub const KEY_DISPLAY_NAME: &str = "pump-tracker-name";
pub const KEY_LOG: &str = "log";

/// Number of log entries kept.
pub const LOG_CAPACITY: usize = 100;

/// A store of string values under string keys.
pub trait Backend {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Other(String),
}

impl From<Error> for StorageError {
    fn from(value: Error) -> Self {
        match value {
            Error::Unavailable(_) => StorageError::NoStorage,
            Error::Other(message) => StorageError::Other(message.into()),
        }
    }
}

/// Persistence of all records in a single backend.
///
/// Maxima and workout logs are stored as JSON, the display name as plain
/// string. Entries which cannot be converted into domain values are skipped on
/// reading.
pub struct Storage<B> {
    backend: B,
}

impl<B: Backend> Storage<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(value) = self.backend.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&value)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Like `read`, but an unreadable value is first copied to its backup key,
    /// as the next write replaces it.
    fn read_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(value) = self.backend.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&value).map(Some).map_err(|err| {
            self.back_up(key, &value);
            StorageError::Serialization(err.to_string())
        })
    }

    fn back_up(&self, key: &str, value: &str) {
        let backup_key = backup_key(key);
        match self.backend.set_item(&backup_key, value) {
            Ok(()) => warn!("kept unreadable value of {key} as {backup_key}"),
            Err(err) => error!("failed to back up unreadable value of {key}: {err}"),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_string(value)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(self.backend.set_item(key, &value)?)
    }
}

#[must_use]
pub fn backup_key(key: &str) -> String {
    format!("{key}-backup")
}

fn valid<R, T>(records: Vec<R>, entity: &str) -> Vec<T>
where
    T: TryFrom<R>,
    T::Error: Display,
{
    records
        .into_iter()
        .filter_map(|record| {
            T::try_from(record)
                .inspect_err(|err| warn!("skipped invalid {entity}: {err}"))
                .ok()
        })
        .collect()
}

impl<B: Backend> UserMaxRepository for Storage<B> {
    fn read_maxima(&self) -> Result<Option<Vec<UserExerciseMax>>, ReadError> {
        Ok(self
            .read_record::<Vec<records::UserExerciseMax>>(KEY_MAXIMA)?
            .map(|maxima| valid(maxima, "maximum")))
    }

    fn write_maxima(&self, maxima: &[UserExerciseMax]) -> Result<(), WriteError> {
        Ok(self.write(
            KEY_MAXIMA,
            &maxima
                .iter()
                .map(records::UserExerciseMax::from)
                .collect::<Vec<_>>(),
        )?)
    }
}

impl<B: Backend> WorkoutLogRepository for Storage<B> {
    fn read_workout_logs(&self) -> Result<Option<Vec<WorkoutLog>>, ReadError> {
        Ok(self
            .read_record::<Vec<records::WorkoutLog>>(KEY_WORKOUT_LOGS)?
            .map(|workout_logs| valid(workout_logs, "workout log")))
    }

    fn write_workout_logs(&self, workout_logs: &[WorkoutLog]) -> Result<(), WriteError> {
        Ok(self.write(
            KEY_WORKOUT_LOGS,
            &workout_logs
                .iter()
                .map(records::WorkoutLog::from)
                .collect::<Vec<_>>(),
        )?)
    }
}

impl<B: Backend> DisplayNameRepository for Storage<B> {
    fn read_display_name(&self) -> Result<Option<String>, ReadError> {
        Ok(self
            .backend
            .get_item(KEY_DISPLAY_NAME)
            .map_err(StorageError::from)?)
    }

    fn write_display_name(&self, name: &Name) -> Result<(), WriteError> {
        Ok(self
            .backend
            .set_item(KEY_DISPLAY_NAME, &name.to_string())
            .map_err(StorageError::from)?)
    }
}

impl<B: Backend + Send + Sync + 'static> app_log::Repository for Storage<B> {
    fn read_entries(&self) -> Result<VecDeque<app_log::Entry>, app_log::Error> {
        self.read(KEY_LOG)
            .map(Option::unwrap_or_default)
            .map_err(|err| app_log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: app_log::Entry) -> Result<(), app_log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(LOG_CAPACITY);
        self.write(KEY_LOG, &entries)
            .map_err(|err| app_log::Error::Unknown(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    pub mod data;

    use pretty_assertions::assert_eq;
    use pump_domain::{MuscleGroupID, Service, WorkoutLogID};
    use pump_web_app::log::{Entry, Repository};

    use super::{memory::Memory, *};
    use data::{MAXIMA, WORKOUT_LOG, WORKOUT_LOGS};

    fn storage() -> Storage<Memory> {
        Storage::new(Memory::new())
    }

    struct Unavailable;

    impl Backend for Unavailable {
        fn get_item(&self, _: &str) -> Result<Option<String>, Error> {
            Err(Error::Unavailable("no window".to_string()))
        }

        fn set_item(&self, _: &str, _: &str) -> Result<(), Error> {
            Err(Error::Unavailable("no window".to_string()))
        }
    }

    #[test]
    fn test_absent_records() {
        let storage = storage();
        assert_eq!(storage.read_maxima().unwrap(), None);
        assert_eq!(storage.read_workout_logs().unwrap(), None);
        assert_eq!(storage.read_display_name().unwrap(), None);
    }

    #[test]
    fn test_maxima() {
        let storage = storage();
        storage.write_maxima(&MAXIMA).unwrap();

        assert_eq!(storage.read_maxima().unwrap(), Some(MAXIMA.clone()));
        assert_eq!(
            storage.backend.get_item(KEY_MAXIMA).unwrap().as_deref(),
            Some(r#"[{"exerciseId":"bench-press","maxWeight":80.0},{"exerciseId":"squat","maxWeight":120.0}]"#)
        );
    }

    #[test]
    fn test_workout_logs() {
        let storage = storage();
        storage.write_workout_logs(&WORKOUT_LOGS).unwrap();

        assert_eq!(storage.read_workout_logs().unwrap(), Some(WORKOUT_LOGS.clone()));
    }

    #[test]
    fn test_workout_logs_skip_invalid_entries() {
        let storage = storage();
        let mut stored = WORKOUT_LOGS
            .iter()
            .map(records::WorkoutLog::from)
            .collect::<Vec<_>>();
        stored[0].id = String::from("invalid");
        storage
            .backend
            .set_item(KEY_WORKOUT_LOGS, &serde_json::to_string(&stored).unwrap())
            .unwrap();

        assert_eq!(
            storage.read_workout_logs().unwrap(),
            Some(vec![WORKOUT_LOG.clone()])
        );
    }

    #[test]
    fn test_malformed_record() {
        let storage = storage();
        storage.backend.set_item(KEY_MAXIMA, "{").unwrap();

        assert!(matches!(
            storage.read_maxima(),
            Err(ReadError::Storage(StorageError::Serialization(_)))
        ));
        assert_eq!(
            storage.backend.get_item(&backup_key(KEY_MAXIMA)).unwrap(),
            Some(String::from("{"))
        );
    }

    #[test]
    fn test_workout_logs_written_by_browser_app() {
        let stored = r#"[{"id":"1709577000000","date":"2024-03-04T18:30:00.000Z","muscleGroup":"chest","exercises":[{"exerciseId":"bench-press","sets":[{"weight":1000,"reps":5,"completed":true},{"weight":-5,"reps":-1,"completed":false}]}],"completed":true}]"#;
        let storage = storage();
        storage.backend.set_item(KEY_WORKOUT_LOGS, stored).unwrap();

        let mut service = Service::new(storage);
        assert_eq!(service.total_workouts(), 1);
        let workout_log = &service.workout_logs()[0];
        assert_eq!(workout_log.id, WorkoutLogID::from(1_709_577_000_000));
        assert_eq!(workout_log.muscle_group_id, MuscleGroupID::from("chest"));
        assert_eq!(workout_log.total_sets(), 2);
        assert_eq!(workout_log.exercises[0].completed_sets(), 1);

        service.add_workout_log(WORKOUT_LOG.clone()).unwrap();
        assert_eq!(service.total_workouts(), 2);
    }

    #[test]
    fn test_unreadable_workout_logs_are_kept() {
        let stored = r#"[{"id":"1","date":"yesterday"}]"#;
        let storage = storage();
        storage.backend.set_item(KEY_WORKOUT_LOGS, stored).unwrap();

        let mut service = Service::new(storage);
        assert_eq!(service.total_workouts(), 0);
        service.add_workout_log(WORKOUT_LOG.clone()).unwrap();

        let storage = service.repository();
        assert_eq!(
            storage.read_workout_logs().unwrap(),
            Some(vec![WORKOUT_LOG.clone()])
        );
        assert_eq!(
            storage
                .backend
                .get_item(&backup_key(KEY_WORKOUT_LOGS))
                .unwrap()
                .as_deref(),
            Some(stored)
        );
    }

    #[test]
    fn test_display_name_is_stored_as_plain_string() {
        let storage = storage();
        storage
            .write_display_name(&Name::parse("Alice").unwrap().unwrap())
            .unwrap();

        assert_eq!(
            storage.backend.get_item(KEY_DISPLAY_NAME).unwrap(),
            Some(String::from("Alice"))
        );
        assert_eq!(
            storage.read_display_name().unwrap(),
            Some(String::from("Alice"))
        );
    }

    #[test]
    fn test_unavailable_backend() {
        let storage = Storage::new(Unavailable);

        assert!(matches!(
            storage.read_maxima(),
            Err(ReadError::Storage(StorageError::NoStorage))
        ));
        assert!(matches!(
            storage.write_workout_logs(&WORKOUT_LOGS),
            Err(WriteError::Storage(StorageError::NoStorage))
        ));
        assert!(matches!(
            storage.read_display_name(),
            Err(ReadError::Storage(StorageError::NoStorage))
        ));
    }

    #[test]
    fn test_log_entries_are_truncated() {
        let storage = storage();
        assert!(storage.read_entries().unwrap().is_empty());

        for i in 0..=LOG_CAPACITY {
            storage
                .write_entry(Entry {
                    time: String::from("Mar 04 18:30:00"),
                    level: log::Level::Info,
                    message: format!("entry {i}"),
                })
                .unwrap();
        }

        let entries = storage.read_entries().unwrap();
        assert_eq!(entries.len(), LOG_CAPACITY);
        assert_eq!(entries[0].message, format!("entry {LOG_CAPACITY}"));
        assert_eq!(entries[LOG_CAPACITY - 1].message, "entry 1");
    }
}

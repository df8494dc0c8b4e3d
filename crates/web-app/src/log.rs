use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

static REPOSITORY: Mutex<Option<Arc<dyn Repository>>> = Mutex::new(None);

static LOGGER: Logger = Logger;

/// Persistent store of the most recent log entries, newest first.
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

impl Entry {
    fn new(record: &Record) -> Self {
        Self {
            time: Local::now().format("%b %d %H:%M:%S").to_string(),
            level: record.level(),
            message: record.args().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Install the logger, which writes to the browser console and to the given
/// repository.
///
/// # Errors
///
/// Returns an error if a logger has already been installed.
pub fn init(repository: Arc<dyn Repository>, level: LevelFilter) -> Result<(), SetLoggerError> {
    if let Ok(mut current) = REPOSITORY.lock() {
        *current = Some(repository);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Stored log entries, newest first. Empty if no logger is installed.
pub fn entries() -> Result<VecDeque<Entry>, Error> {
    match REPOSITORY.lock() {
        Ok(repository) => repository
            .as_ref()
            .map_or_else(|| Ok(VecDeque::new()), |r| r.read_entries()),
        Err(err) => Err(Error::Unknown(err.to_string())),
    }
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        match record.level() {
            Level::Error => gloo_console::error!(message),
            Level::Warn => gloo_console::warn!(message),
            Level::Info => gloo_console::info!(message),
            Level::Debug | Level::Trace => gloo_console::debug!(message),
        }

        // The repository is cloned out of the lock, as writing an entry may log itself.
        let repository = REPOSITORY.lock().ok().and_then(|r| r.clone());
        if let Some(repository) = repository {
            let _ = repository.write_entry(Entry::new(record));
        }
    }

    fn flush(&self) {}
}

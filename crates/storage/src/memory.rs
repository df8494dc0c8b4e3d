use std::{collections::BTreeMap, sync::Mutex};

use super::{Backend, Error};

/// Backend keeping all values in process memory.
#[derive(Debug, Default)]
pub struct Memory {
    items: Mutex<BTreeMap<String, String>>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for Memory {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        let items = self
            .items
            .lock()
            .map_err(|err| Error::Other(err.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut items = self
            .items
            .lock()
            .map_err(|err| Error::Other(err.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

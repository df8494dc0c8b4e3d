use gloo_storage::Storage as _;

use super::{Backend, Error};

/// Backend using the local storage of the browser.
pub struct LocalStorage;

impl Backend for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .map_err(|err| Error::Unavailable(format!("{err:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| Error::Other(format!("{err:?}")))
    }
}

use derive_more::{AsRef, Display};

use crate::{Greeting, ReadError, WriteError};

pub trait DisplayNameRepository {
    fn read_display_name(&self) -> Result<Option<String>, ReadError>;
    fn write_display_name(&self, name: &Name) -> Result<(), WriteError>;
}

/// Display name used to address the user on the dashboard.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    pub const MAX_CHARS: usize = 64;

    /// A blank input means that the user has no name.
    pub fn parse(input: &str) -> Result<Option<Self>, NameError> {
        let trimmed = input.trim();
        let chars = trimmed.chars().count();

        if chars > Self::MAX_CHARS {
            return Err(NameError::TooLong(chars));
        }

        Ok((chars > 0).then(|| Name(trimmed.to_string())))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

/// Headline of the dashboard, e.g. `Good evening, Alice!`.
#[must_use]
pub fn salutation(greeting: Greeting, display_name: &str) -> String {
    if display_name.is_empty() {
        format!("{greeting}!")
    } else {
        format!("{greeting}, {display_name}!")
    }
}

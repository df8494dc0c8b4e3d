#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("not found")]
    NotFound,
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<WriteError> for UpdateError {
    fn from(value: WriteError) -> Self {
        match value {
            WriteError::Storage(storage) => UpdateError::Storage(storage),
            WriteError::Other(other) => UpdateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no storage")]
    NoStorage,
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

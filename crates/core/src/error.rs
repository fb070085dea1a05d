//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Malformed task id: {0}")]
    MalformedId(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Whether the error came from the backing store rather than the request
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Serialization(_) | Self::Storage(_))
    }
}

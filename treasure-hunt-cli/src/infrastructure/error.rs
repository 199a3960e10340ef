use std::path::PathBuf;
use treasure_hunt_core::{CoreError, DirectoryError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Quest file not found: {path}")]
    QuestFileNotFound { path: PathBuf },

    #[error("Invalid data directory: {path}")]
    InvalidDataDirectory { path: PathBuf },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("{command} failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("Invalid location: {0} (expected <latitude>,<longitude>)")]
    InvalidLocation(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl CliError {
    pub fn quest_file_not_found(path: PathBuf) -> Self {
        CliError::QuestFileNotFound { path }
    }

    pub fn invalid_directory(path: PathBuf) -> Self {
        CliError::InvalidDataDirectory { path }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

use crate::domain::QuestError;
use crate::storage::{DirectoryError, StorageError};

/// Errors surfaced by the application layer
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Quest error: {0}")]
    Quest(#[from] QuestError),

    #[error("User directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Administrators do not play the quest: {0}")]
    AdminHasNoQuest(String),

    #[error("No quest state for user: {0}")]
    QuestStateNotFound(String),

    #[error("No active user with that master key")]
    InvalidMasterKey,

    #[error("Unlock request not found: {0}")]
    UnlockRequestNotFound(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

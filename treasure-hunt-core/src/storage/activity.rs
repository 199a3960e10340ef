use crate::domain::ActivityData;
use crate::storage::{JsonStoreExt, KeyValueStore, StorageError};

const ACTIVITY_DATA_KEY_PREFIX: &str = "treasure-activity-data-";

pub fn activity_key(username: &str) -> String {
    format!("{}{}", ACTIVITY_DATA_KEY_PREFIX, username)
}

/// Per-player distance and effort tracking
pub struct ActivityStore<'a, S: KeyValueStore + ?Sized> {
    kv: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> ActivityStore<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self { kv }
    }

    /// Stored record, or a fresh one starting now
    pub fn read(&self, username: &str) -> Result<ActivityData, StorageError> {
        Ok(self
            .kv
            .load_json(&activity_key(username))?
            .unwrap_or_else(ActivityData::starting_now))
    }

    pub fn write(&self, username: &str, data: &ActivityData) -> Result<(), StorageError> {
        self.kv.save_json(&activity_key(username), data)
    }

    pub fn reset(&self, username: &str) -> Result<(), StorageError> {
        self.kv.remove(&activity_key(username))
    }
}

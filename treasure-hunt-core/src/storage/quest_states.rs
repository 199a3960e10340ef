use crate::domain::QuestState;
use crate::storage::{ActivityStore, JsonStoreExt, KeyValueStore, MasterTemplateStore, StorageError};

const QUEST_STATE_KEY_PREFIX: &str = "treasure-quest-state-";

pub fn quest_state_key(username: &str) -> String {
    format!("{}{}", QUEST_STATE_KEY_PREFIX, username)
}

/// Each player's live quest copy, keyed by username
pub struct QuestStateStore<'a, S: KeyValueStore + ?Sized> {
    kv: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> QuestStateStore<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self { kv }
    }

    pub fn read(&self, username: &str) -> Result<Option<QuestState>, StorageError> {
        self.kv.load_json(&quest_state_key(username))
    }

    pub fn write(&self, username: &str, state: &QuestState) -> Result<(), StorageError> {
        self.kv.save_json(&quest_state_key(username), state)
    }

    /// Start the player over on the current master template
    pub fn create_fresh(&self, username: &str) -> Result<QuestState, StorageError> {
        let master = MasterTemplateStore::new(self.kv).ensure_initialized()?;
        let state = QuestState::fresh(&master);
        self.write(username, &state)?;

        tracing::info!(
            "Created quest state for {} ({} tasks)",
            username,
            state.quest.tasks.len()
        );
        Ok(state)
    }

    /// Stored state, creating a fresh one on first access
    pub fn read_or_create(&self, username: &str) -> Result<QuestState, StorageError> {
        match self.read(username)? {
            Some(state) => Ok(state),
            None => self.create_fresh(username),
        }
    }

    /// Drop the player's quest state and activity record
    pub fn reset(&self, username: &str) -> Result<(), StorageError> {
        self.kv.remove(&quest_state_key(username))?;
        ActivityStore::new(self.kv).reset(username)?;

        tracing::info!("Reset quest and activity data for {}", username);
        Ok(())
    }
}

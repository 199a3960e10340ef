use crate::domain::Quest;
use crate::storage::{JsonStoreExt, KeyValueStore, StorageError};

pub const MASTER_QUEST_KEY: &str = "treasure-hunt-master-quest";

/// Holds the single canonical quest definition edited by the administrator
pub struct MasterTemplateStore<'a, S: KeyValueStore + ?Sized> {
    kv: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> MasterTemplateStore<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self { kv }
    }

    pub fn read(&self) -> Result<Option<Quest>, StorageError> {
        self.kv.load_json(MASTER_QUEST_KEY)
    }

    /// Replace the stored template
    pub fn write(&self, quest: &Quest) -> Result<(), StorageError> {
        self.kv.save_json(MASTER_QUEST_KEY, quest)
    }

    /// Stored template, seeding the default one on first access
    pub fn ensure_initialized(&self) -> Result<Quest, StorageError> {
        if let Some(quest) = self.read()? {
            return Ok(quest);
        }

        tracing::info!("No master quest found, seeding the default template");
        let quest = Quest::default_template();
        self.write(&quest)?;
        Ok(quest)
    }
}

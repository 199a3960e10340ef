use crate::domain::UserAsset;
use crate::storage::{JsonStoreExt, KeyValueStore, StorageError};

pub const USER_ASSETS_KEY: &str = "treasure-hunt-user-assets";

/// Captured photos of every player, persisted as one list
pub struct AssetStore<'a, S: KeyValueStore + ?Sized> {
    kv: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> AssetStore<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self { kv }
    }

    pub fn add(&self, asset: UserAsset) -> Result<(), StorageError> {
        let mut assets = self.load()?;
        assets.push(asset);
        self.kv.save_json(USER_ASSETS_KEY, &assets)
    }

    /// One player's assets, newest first
    pub fn for_user(&self, user_id: &str) -> Result<Vec<UserAsset>, StorageError> {
        let mut assets: Vec<UserAsset> = self
            .load()?
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect();
        assets.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(assets)
    }

    fn load(&self) -> Result<Vec<UserAsset>, StorageError> {
        Ok(self.kv.load_json(USER_ASSETS_KEY)?.unwrap_or_default())
    }
}

use crate::domain::{LocationFix, PlayerLocation};
use crate::storage::{JsonStoreExt, KeyValueStore, StorageError, UserDirectory};
use chrono::{DateTime, Utc};

const LOCATION_DATA_KEY_PREFIX: &str = "treasure-location-data-";

pub fn location_key(username: &str) -> String {
    format!("{}{}", LOCATION_DATA_KEY_PREFIX, username)
}

/// Last known position of each player, one key per player
pub struct LocationStore<'a, S: KeyValueStore + ?Sized> {
    kv: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> LocationStore<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self { kv }
    }

    pub fn read(&self, username: &str) -> Result<Option<LocationFix>, StorageError> {
        self.kv.load_json(&location_key(username))
    }

    /// Replace the player's last position
    pub fn write(&self, username: &str, fix: &LocationFix) -> Result<(), StorageError> {
        self.kv.save_json(&location_key(username), fix)
    }

    /// Live map as of now
    pub fn players(&self) -> Result<Vec<PlayerLocation>, StorageError> {
        self.players_at(Utc::now())
    }

    /// Every active (not deleted) player with a known position, in directory order
    pub fn players_at(&self, now: DateTime<Utc>) -> Result<Vec<PlayerLocation>, StorageError> {
        let mut locations = Vec::new();
        for user in UserDirectory::new(self.kv).players()? {
            if user.is_deleted {
                continue;
            }
            if let Some(fix) = self.read(&user.username)? {
                locations.push(PlayerLocation::from_fix(&user, &fix, now));
            }
        }
        Ok(locations)
    }
}

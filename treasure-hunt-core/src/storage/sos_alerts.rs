use crate::domain::SosAlert;
use crate::storage::{JsonStoreExt, KeyValueStore, StorageError};

pub const SOS_ALERTS_KEY: &str = "treasure-hunt-sos-alerts";

/// Emergency alerts from all players
pub struct SosAlertStore<'a, S: KeyValueStore + ?Sized> {
    kv: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> SosAlertStore<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self { kv }
    }

    /// All alerts, newest first
    pub fn list(&self) -> Result<Vec<SosAlert>, StorageError> {
        let mut alerts = self.load()?;
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(alerts)
    }

    /// Record an alert in front of the existing ones
    pub fn add(&self, alert: SosAlert) -> Result<(), StorageError> {
        let mut alerts = self.list()?;
        alerts.insert(0, alert);
        self.kv.save_json(SOS_ALERTS_KEY, &alerts)
    }

    fn load(&self) -> Result<Vec<SosAlert>, StorageError> {
        Ok(self.kv.load_json(SOS_ALERTS_KEY)?.unwrap_or_default())
    }
}

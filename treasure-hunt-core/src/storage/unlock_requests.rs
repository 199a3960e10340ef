use crate::domain::{UnlockRequest, UnlockRequestStatus};
use crate::storage::{JsonStoreExt, KeyValueStore, StorageError};

pub const UNLOCK_REQUESTS_KEY: &str = "treasure-hunt-unlock-requests";

/// Pending and reviewed unlock requests from all players
pub struct UnlockRequestStore<'a, S: KeyValueStore + ?Sized> {
    kv: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> UnlockRequestStore<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self { kv }
    }

    /// All requests, newest first
    pub fn list(&self) -> Result<Vec<UnlockRequest>, StorageError> {
        let mut requests = self.load()?;
        requests.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(requests)
    }

    pub fn pending(&self) -> Result<Vec<UnlockRequest>, StorageError> {
        Ok(self.list()?.into_iter().filter(|r| r.is_pending()).collect())
    }

    pub fn get(&self, request_id: &str) -> Result<Option<UnlockRequest>, StorageError> {
        Ok(self.load()?.into_iter().find(|r| r.id == request_id))
    }

    pub fn add(&self, request: UnlockRequest) -> Result<(), StorageError> {
        let mut requests = self.load()?;
        requests.push(request);
        self.kv.save_json(UNLOCK_REQUESTS_KEY, &requests)
    }

    /// Update a request's status. Returns the updated request, or `None` if unknown.
    pub fn set_status(
        &self,
        request_id: &str,
        status: UnlockRequestStatus,
    ) -> Result<Option<UnlockRequest>, StorageError> {
        let mut requests = self.load()?;
        let Some(request) = requests.iter_mut().find(|r| r.id == request_id) else {
            return Ok(None);
        };

        request.status = status;
        let updated = request.clone();
        self.kv.save_json(UNLOCK_REQUESTS_KEY, &requests)?;
        Ok(Some(updated))
    }

    fn load(&self) -> Result<Vec<UnlockRequest>, StorageError> {
        Ok(self.kv.load_json(UNLOCK_REQUESTS_KEY)?.unwrap_or_default())
    }
}

//! In-memory asset ledger.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{Asset, CreateAsset};
use crate::services::ServiceError;

/// Asset records guarded by a single lock.
///
/// `transfer` re-checks ownership under the write guard, so when N
/// callers race to move the same asset exactly one of them wins.
#[derive(Clone, Default)]
pub struct AssetStore {
    assets: Arc<RwLock<Vec<Asset>>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new asset owned by `owner_id`.
    pub fn create(&self, owner_id: &str, input: CreateAsset) -> Result<Asset, ServiceError> {
        let asset = Asset::new(owner_id.to_string(), input);
        let mut assets = self.write_guard()?;
        assets.push(asset.clone());
        Ok(asset)
    }

    /// All assets currently owned by `owner_id`, oldest first.
    pub fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Asset>, ServiceError> {
        let assets = self.read_guard()?;
        Ok(assets
            .iter()
            .filter(|asset| asset.owner_id == owner_id)
            .cloned()
            .collect())
    }

    /// Fetches one asset owned by `owner_id`. A missing id and an id
    /// owned by someone else both come back as `AssetNotFound`, so
    /// callers cannot probe other users' ledgers.
    pub fn get_for_owner(&self, id: Uuid, owner_id: &str) -> Result<Asset, ServiceError> {
        let assets = self.read_guard()?;
        assets
            .iter()
            .find(|asset| asset.id == id && asset.owner_id == owner_id)
            .cloned()
            .ok_or(ServiceError::AssetNotFound)
    }

    /// Reassigns ownership of `id` from `owner_id` to `new_owner_id`
    /// and stamps the update time.
    pub fn transfer(
        &self,
        id: Uuid,
        owner_id: &str,
        new_owner_id: &str,
    ) -> Result<Asset, ServiceError> {
        let mut assets = self.write_guard()?;
        let asset = assets
            .iter_mut()
            .find(|asset| asset.id == id && asset.owner_id == owner_id)
            .ok_or(ServiceError::AssetNotFound)?;

        asset.owner_id = new_owner_id.to_string();
        asset.updated_at = Some(Utc::now());
        Ok(asset.clone())
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Vec<Asset>>, ServiceError> {
        self.assets
            .read()
            .map_err(|_| ServiceError::Internal(anyhow!("asset store lock poisoned")))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Vec<Asset>>, ServiceError> {
        self.assets
            .write()
            .map_err(|_| ServiceError::Internal(anyhow!("asset store lock poisoned")))
    }
}

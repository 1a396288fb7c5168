//! Shop settings repository.

use cakestack_core::ShopId;

use crate::error::StoreError;
use crate::models::SettingsDoc;
use crate::paths;
use crate::store::DocumentStore;

/// Reads and writes the `shops/{shopId}/settings/general` document.
pub struct SettingsRepo<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> SettingsRepo<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// The shop's settings, or the permissive defaults when no document has
    /// been written yet.
    pub async fn get(&self, shop_id: &ShopId) -> Result<SettingsDoc, StoreError> {
        let doc = self.store.get(&paths::settings(shop_id)).await?;
        doc.map_or_else(|| Ok(SettingsDoc::default()), |doc| doc.decode())
    }

    /// Merge settings fields, creating the document on first write.
    pub async fn upsert(&self, shop_id: &ShopId, patch: serde_json::Value) -> Result<(), StoreError> {
        let path = paths::settings(shop_id);
        match self.store.merge(&path, patch.clone()).await {
            Err(StoreError::NotFound) => {
                self.store
                    .create(&path.parent(), Some(path.id()), patch)
                    .await?;
                Ok(())
            }
            other => other,
        }
    }
}

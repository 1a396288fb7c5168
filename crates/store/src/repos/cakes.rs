//! Cake catalog repository.

use cakestack_core::{CakeId, ShopId};

use crate::error::StoreError;
use crate::models::{Cake, CakeDoc};
use crate::paths;
use crate::store::{Document, DocumentStore, ListOrder};

fn decode_cake(doc: &Document) -> Result<Cake, StoreError> {
    Ok(Cake {
        id: CakeId::new(doc.id()),
        doc: doc.decode()?,
    })
}

/// Reads and writes `shops/{shopId}/cakes/{cakeId}` documents.
pub struct CakeRepo<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CakeRepo<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn list(&self, shop_id: &ShopId) -> Result<Vec<Cake>, StoreError> {
        let docs = self
            .store
            .list(&paths::cakes(shop_id), ListOrder::CreatedDesc)
            .await?;
        docs.iter().map(decode_cake).collect()
    }

    pub async fn get(
        &self,
        shop_id: &ShopId,
        cake_id: &CakeId,
    ) -> Result<Option<Cake>, StoreError> {
        let doc = self.store.get(&paths::cake(shop_id, cake_id)).await?;
        doc.as_ref().map(decode_cake).transpose()
    }

    pub async fn create(&self, shop_id: &ShopId, doc: &CakeDoc) -> Result<CakeId, StoreError> {
        let data = serde_json::to_value(doc)
            .map_err(|e| StoreError::DataCorruption(e.to_string()))?;
        let path = self.store.create(&paths::cakes(shop_id), None, data).await?;
        Ok(CakeId::new(path.id()))
    }

    /// Merge edited fields into an existing cake.
    pub async fn update(
        &self,
        shop_id: &ShopId,
        cake_id: &CakeId,
        patch: serde_json::Value,
    ) -> Result<(), StoreError> {
        self.store.merge(&paths::cake(shop_id, cake_id), patch).await
    }

    pub async fn delete(&self, shop_id: &ShopId, cake_id: &CakeId) -> Result<(), StoreError> {
        self.store.delete(&paths::cake(shop_id, cake_id)).await
    }
}

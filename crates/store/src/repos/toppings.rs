//! Topping repository.

use cakestack_core::pricing::ToppingPrice;
use cakestack_core::{ShopId, ToppingId};

use crate::error::StoreError;
use crate::models::{Topping, ToppingDoc};
use crate::paths;
use crate::store::{DocumentStore, ListOrder};

/// Reads and writes `shops/{shopId}/toppings/{toppingId}` documents.
pub struct ToppingRepo<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ToppingRepo<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn list(&self, shop_id: &ShopId) -> Result<Vec<Topping>, StoreError> {
        let docs = self
            .store
            .list(&paths::toppings(shop_id), ListOrder::CreatedAsc)
            .await?;
        docs.into_iter()
            .map(|doc| {
                Ok(Topping {
                    id: ToppingId::new(doc.id()),
                    doc: doc.decode()?,
                })
            })
            .collect()
    }

    /// The shop's toppings as name/price pairs, for pricing lookups.
    pub async fn prices(&self, shop_id: &ShopId) -> Result<Vec<ToppingPrice>, StoreError> {
        let toppings = self.list(shop_id).await?;
        Ok(toppings.iter().map(|t| t.doc.as_price()).collect())
    }

    pub async fn create(&self, shop_id: &ShopId, doc: &ToppingDoc) -> Result<ToppingId, StoreError> {
        let data = serde_json::to_value(doc)
            .map_err(|e| StoreError::DataCorruption(e.to_string()))?;
        let path = self
            .store
            .create(&paths::toppings(shop_id), None, data)
            .await?;
        Ok(ToppingId::new(path.id()))
    }

    pub async fn update(
        &self,
        shop_id: &ShopId,
        topping_id: &ToppingId,
        patch: serde_json::Value,
    ) -> Result<(), StoreError> {
        self.store
            .merge(&paths::topping(shop_id, topping_id), patch)
            .await
    }

    pub async fn delete(&self, shop_id: &ShopId, topping_id: &ToppingId) -> Result<(), StoreError> {
        self.store.delete(&paths::topping(shop_id, topping_id)).await
    }
}

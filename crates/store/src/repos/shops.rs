//! Shop repository.

use serde_json::json;

use cakestack_core::ShopId;

use crate::error::StoreError;
use crate::models::{Shop, ShopDoc};
use crate::paths;
use crate::store::{DocumentStore, ListOrder};

/// Reads and writes `shops/{shopId}` documents.
pub struct ShopRepo<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ShopRepo<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Every shop, newest first. Platform-admin view.
    pub async fn list_all(&self) -> Result<Vec<Shop>, StoreError> {
        let docs = self.store.list(&paths::shops(), ListOrder::CreatedDesc).await?;
        docs.into_iter()
            .map(|doc| {
                Ok(Shop {
                    id: ShopId::parse(doc.id())
                        .map_err(|e| StoreError::DataCorruption(format!("{}: {e}", doc.path)))?,
                    doc: doc.decode()?,
                })
            })
            .collect()
    }

    /// Shops visible on the public directory: active only.
    pub async fn list_active(&self) -> Result<Vec<Shop>, StoreError> {
        let shops = self.list_all().await?;
        Ok(shops.into_iter().filter(|shop| shop.doc.active).collect())
    }

    pub async fn get(&self, shop_id: &ShopId) -> Result<Option<Shop>, StoreError> {
        let doc = self.store.get(&paths::shop(shop_id)).await?;
        doc.map(|doc| {
            Ok(Shop {
                id: shop_id.clone(),
                doc: doc.decode()?,
            })
        })
        .transpose()
    }

    pub async fn exists(&self, shop_id: &ShopId) -> Result<bool, StoreError> {
        Ok(self.store.get(&paths::shop(shop_id)).await?.is_some())
    }

    /// Create a shop under an explicit slug. Fails if the slug is taken.
    pub async fn create(&self, shop_id: &ShopId, doc: &ShopDoc) -> Result<(), StoreError> {
        let data = serde_json::to_value(doc)
            .map_err(|e| StoreError::DataCorruption(e.to_string()))?;
        self.store
            .create(&paths::shops(), Some(shop_id.as_str()), data)
            .await?;
        Ok(())
    }

    /// Merge branding/profile fields into an existing shop.
    pub async fn update(&self, shop_id: &ShopId, patch: serde_json::Value) -> Result<(), StoreError> {
        self.store.merge(&paths::shop(shop_id), patch).await
    }

    pub async fn set_active(&self, shop_id: &ShopId, active: bool) -> Result<(), StoreError> {
        self.store
            .merge(&paths::shop(shop_id), json!({ "active": active }))
            .await
    }

    /// Delete the shop and everything beneath it: cakes, toppings, orders,
    /// settings.
    pub async fn delete_cascade(&self, shop_id: &ShopId) -> Result<(), StoreError> {
        self.store.delete_tree(&paths::shop(shop_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use chrono::Utc;

    fn shop_doc(name: &str) -> ShopDoc {
        ShopDoc::new(name.to_owned(), String::new(), None, None, None, Utc::now())
    }

    #[tokio::test]
    async fn directory_lists_only_active_shops() {
        let store = MemoryStore::new();
        let repo = ShopRepo::new(&store);
        let open = ShopId::parse("sweet-treats").expect("slug");
        let closed = ShopId::parse("crumb-and-co").expect("slug");
        repo.create(&open, &shop_doc("Sweet Treats")).await.expect("create");
        repo.create(&closed, &shop_doc("Crumb & Co")).await.expect("create");
        repo.set_active(&closed, false).await.expect("deactivate");

        let active = repo.list_active().await.expect("list");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, open);
        assert_eq!(repo.list_all().await.expect("list").len(), 2);
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected() {
        let store = MemoryStore::new();
        let repo = ShopRepo::new(&store);
        let id = ShopId::parse("sweet-treats").expect("slug");
        repo.create(&id, &shop_doc("Sweet Treats")).await.expect("create");
        let err = repo
            .create(&id, &shop_doc("Impostor"))
            .await
            .expect_err("conflict");
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }
}

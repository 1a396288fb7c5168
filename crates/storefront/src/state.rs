//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use cakestack_core::ShopId;
use cakestack_store::models::{Cake, SettingsDoc, Shop};
use cakestack_store::repos::{CakeRepo, SettingsRepo, ShopRepo};
use cakestack_store::{DocumentStore, StoreError};

use crate::config::StorefrontConfig;

/// How long cached shop and catalog reads stay fresh. Staff edits land on
/// the public surface within this window.
const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_CAPACITY: u64 = 1_000;

/// A shop profile together with its fulfillment settings.
#[derive(Debug, Clone)]
pub struct ShopSnapshot {
    pub shop: Shop,
    pub settings: SettingsDoc,
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Arc<dyn DocumentStore>,
    pool: Option<PgPool>,
    shop_cache: Cache<String, Arc<ShopSnapshot>>,
    cake_cache: Cache<String, Arc<Vec<Cake>>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// `pool` is the underlying database pool when the store is Postgres,
    /// used only by the readiness probe. Tests pass `None` with a
    /// `MemoryStore`.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        store: Arc<dyn DocumentStore>,
        pool: Option<PgPool>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                pool,
                shop_cache: Cache::builder()
                    .max_capacity(CACHE_CAPACITY)
                    .time_to_live(CACHE_TTL)
                    .build(),
                cake_cache: Cache::builder()
                    .max_capacity(CACHE_CAPACITY)
                    .time_to_live(CACHE_TTL)
                    .build(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the document store handle.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    /// Get the database pool, if the store is backed by one.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Load a shop profile and its settings, through the cache.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the underlying store read fails.
    pub async fn shop_snapshot(
        &self,
        shop_id: &ShopId,
    ) -> Result<Option<Arc<ShopSnapshot>>, StoreError> {
        if let Some(hit) = self.inner.shop_cache.get(shop_id.as_str()).await {
            return Ok(Some(hit));
        }
        let Some(shop) = ShopRepo::new(self.store()).get(shop_id).await? else {
            return Ok(None);
        };
        let settings = SettingsRepo::new(self.store()).get(shop_id).await?;
        let snapshot = Arc::new(ShopSnapshot { shop, settings });
        self.inner
            .shop_cache
            .insert(shop_id.as_str().to_owned(), Arc::clone(&snapshot))
            .await;
        Ok(Some(snapshot))
    }

    /// Load a shop's catalog, through the cache.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the underlying store read fails.
    pub async fn shop_cakes(&self, shop_id: &ShopId) -> Result<Arc<Vec<Cake>>, StoreError> {
        if let Some(hit) = self.inner.cake_cache.get(shop_id.as_str()).await {
            return Ok(hit);
        }
        let cakes = Arc::new(CakeRepo::new(self.store()).list(shop_id).await?);
        self.inner
            .cake_cache
            .insert(shop_id.as_str().to_owned(), Arc::clone(&cakes))
            .await;
        Ok(cakes)
    }
}

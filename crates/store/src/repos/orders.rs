//! Order repository.

use chrono::{DateTime, Utc};
use serde_json::json;

use cakestack_core::{OrderId, OrderStatus, ShopId};

use crate::error::StoreError;
use crate::models::{Order, OrderDoc};
use crate::paths;
use crate::store::{DocumentStore, ListOrder};

/// Reads and writes `shops/{shopId}/orders/{orderId}` documents.
///
/// Status transition rules live in the domain layer; this repository only
/// persists an already-validated transition.
pub struct OrderRepo<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> OrderRepo<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// The shop's orders, newest first.
    pub async fn list(&self, shop_id: &ShopId) -> Result<Vec<Order>, StoreError> {
        let docs = self
            .store
            .list(&paths::orders(shop_id), ListOrder::CreatedDesc)
            .await?;
        docs.into_iter()
            .map(|doc| {
                Ok(Order {
                    id: OrderId::new(doc.id()),
                    doc: doc.decode()?,
                })
            })
            .collect()
    }

    pub async fn get(
        &self,
        shop_id: &ShopId,
        order_id: &OrderId,
    ) -> Result<Option<Order>, StoreError> {
        let doc = self.store.get(&paths::order(shop_id, order_id)).await?;
        doc.map(|doc| {
            Ok(Order {
                id: order_id.clone(),
                doc: doc.decode()?,
            })
        })
        .transpose()
    }

    pub async fn create(&self, shop_id: &ShopId, doc: &OrderDoc) -> Result<OrderId, StoreError> {
        let data = serde_json::to_value(doc)
            .map_err(|e| StoreError::DataCorruption(e.to_string()))?;
        let path = self.store.create(&paths::orders(shop_id), None, data).await?;
        Ok(OrderId::new(path.id()))
    }

    /// Persist a validated status change, stamping `updatedAt`.
    pub async fn set_status(
        &self,
        shop_id: &ShopId,
        order_id: &OrderId,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.store
            .merge(
                &paths::order(shop_id, order_id),
                json!({
                    "status": status,
                    "updatedAt": now,
                }),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use cakestack_core::Money;

    fn order_doc() -> OrderDoc {
        OrderDoc {
            customer_name: "Maria Santos".to_owned(),
            customer_email: "maria@example.com".to_owned(),
            customer_phone: String::new(),
            is_pickup: true,
            delivery_address: None,
            requested_date: None,
            requested_time: None,
            special_instructions: None,
            items: vec![],
            total_amount: Money::ZERO,
            status: OrderStatus::PendingApproval,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn set_status_patches_status_and_timestamp() {
        let store = MemoryStore::new();
        let repo = OrderRepo::new(&store);
        let shop = ShopId::parse("sweet-treats").expect("slug");
        let id = repo.create(&shop, &order_doc()).await.expect("create");

        repo.set_status(&shop, &id, OrderStatus::Pending, Utc::now())
            .await
            .expect("set status");
        let order = repo.get(&shop, &id).await.expect("get").expect("exists");
        assert_eq!(order.doc.status, OrderStatus::Pending);
        // Untouched fields survive the merge.
        assert_eq!(order.doc.customer_name, "Maria Santos");
    }

    #[tokio::test]
    async fn status_change_on_missing_order_is_not_found() {
        let store = MemoryStore::new();
        let repo = OrderRepo::new(&store);
        let shop = ShopId::parse("sweet-treats").expect("slug");
        let err = repo
            .set_status(&shop, &OrderId::new("ghost"), OrderStatus::Pending, Utc::now())
            .await
            .expect_err("missing");
        assert!(matches!(err, StoreError::NotFound));
    }
}

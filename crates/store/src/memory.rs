//! In-memory document store for tests and seeding.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::{
    CollectionPath, Document, DocumentPath, DocumentStore, ListOrder, push_id,
};

/// An in-memory [`DocumentStore`] backed by a path-keyed map.
///
/// Listing order follows the same `createdAt` field contract as the
/// production store: RFC 3339 timestamps compare correctly as strings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn created_at(data: &Value) -> String {
    data.get("createdAt")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Whether `path` is a direct member of `collection`.
fn in_collection(path: &str, collection: &CollectionPath) -> bool {
    path.strip_prefix(collection.as_str())
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|id| !id.is_empty() && !id.contains('/'))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.get(path.as_str()).map(|data| Document {
            path: path.clone(),
            data: data.clone(),
        }))
    }

    async fn list(
        &self,
        collection: &CollectionPath,
        order: ListOrder,
    ) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.read().await;
        let mut matches: Vec<Document> = documents
            .iter()
            .filter(|(path, _)| in_collection(path, collection))
            .map(|(path, data)| Document {
                path: DocumentPath::parse(path).unwrap_or_else(|_| collection.doc(path)),
                data: data.clone(),
            })
            .collect();
        matches.sort_by_key(|doc| created_at(&doc.data));
        if matches!(order, ListOrder::CreatedDesc) {
            matches.reverse();
        }
        Ok(matches)
    }

    async fn create(
        &self,
        collection: &CollectionPath,
        id: Option<&str>,
        data: Value,
    ) -> Result<DocumentPath, StoreError> {
        let mut documents = self.documents.write().await;
        let path = match id {
            Some(id) => {
                let path = collection.doc(id);
                if documents.contains_key(path.as_str()) {
                    return Err(StoreError::AlreadyExists(path.to_string()));
                }
                path
            }
            None => loop {
                let candidate = collection.doc(&push_id());
                if !documents.contains_key(candidate.as_str()) {
                    break candidate;
                }
            },
        };
        documents.insert(path.as_str().to_owned(), data);
        Ok(path)
    }

    async fn merge(&self, path: &DocumentPath, patch: Value) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let existing = documents
            .get_mut(path.as_str())
            .ok_or(StoreError::NotFound)?;
        if let (Value::Object(existing), Value::Object(patch)) = (existing, patch) {
            for (key, value) in patch {
                existing.insert(key, value);
            }
            Ok(())
        } else {
            Err(StoreError::DataCorruption(format!(
                "{path}: merge requires object documents"
            )))
        }
    }

    async fn delete(&self, path: &DocumentPath) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        documents.remove(path.as_str());
        Ok(())
    }

    async fn delete_tree(&self, path: &DocumentPath) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let prefix = format!("{}/", path.as_str());
        documents.retain(|key, _| key != path.as_str() && !key.starts_with(&prefix));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn orders() -> CollectionPath {
        CollectionPath::parse("shops/sweet-treats/orders").expect("valid path")
    }

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let store = MemoryStore::new();
        let path = store
            .create(&orders(), None, json!({"status": "pending-approval"}))
            .await
            .expect("create");
        let doc = store.get(&path).await.expect("get").expect("exists");
        assert_eq!(doc.data["status"], "pending-approval");
    }

    #[tokio::test]
    async fn explicit_id_conflicts_are_rejected() {
        let store = MemoryStore::new();
        let shops = CollectionPath::root("shops");
        store
            .create(&shops, Some("sweet-treats"), json!({"name": "Sweet Treats"}))
            .await
            .expect("first create");
        let err = store
            .create(&shops, Some("sweet-treats"), json!({"name": "Impostor"}))
            .await
            .expect_err("conflict");
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn list_is_scoped_and_ordered() {
        let store = MemoryStore::new();
        store
            .create(&orders(), Some("a"), json!({"createdAt": "2026-08-01T10:00:00Z"}))
            .await
            .expect("create a");
        store
            .create(&orders(), Some("b"), json!({"createdAt": "2026-08-02T10:00:00Z"}))
            .await
            .expect("create b");
        // A different shop's orders must not leak in.
        let other = CollectionPath::parse("shops/crumb-and-co/orders").expect("valid path");
        store
            .create(&other, Some("c"), json!({"createdAt": "2026-08-03T10:00:00Z"}))
            .await
            .expect("create c");

        let newest_first = store
            .list(&orders(), ListOrder::CreatedDesc)
            .await
            .expect("list");
        let ids: Vec<&str> = newest_first.iter().map(Document::id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn merge_updates_only_patched_fields() {
        let store = MemoryStore::new();
        let path = store
            .create(
                &orders(),
                Some("o1"),
                json!({"status": "pending", "totalAmount": 825}),
            )
            .await
            .expect("create");
        store
            .merge(&path, json!({"status": "baking", "updatedAt": "2026-08-25T09:00:00Z"}))
            .await
            .expect("merge");
        let doc = store.get(&path).await.expect("get").expect("exists");
        assert_eq!(doc.data["status"], "baking");
        assert_eq!(doc.data["totalAmount"], 825);
    }

    #[tokio::test]
    async fn merge_into_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let path = orders().doc("ghost");
        let err = store
            .merge(&path, json!({"status": "baking"}))
            .await
            .expect_err("missing");
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn delete_tree_cascades_to_subcollections() {
        let store = MemoryStore::new();
        let shops = CollectionPath::root("shops");
        store
            .create(&shops, Some("sweet-treats"), json!({"name": "Sweet Treats"}))
            .await
            .expect("create shop");
        store
            .create(&orders(), Some("o1"), json!({"status": "pending"}))
            .await
            .expect("create order");
        store
            .create(&shops, Some("crumb-and-co"), json!({"name": "Crumb & Co"}))
            .await
            .expect("create other shop");

        let shop_path = shops.doc("sweet-treats");
        store.delete_tree(&shop_path).await.expect("cascade");

        assert!(store.get(&shop_path).await.expect("get").is_none());
        assert!(
            store
                .get(&orders().doc("o1"))
                .await
                .expect("get")
                .is_none()
        );
        assert!(
            store
                .get(&shops.doc("crumb-and-co"))
                .await
                .expect("get")
                .is_some()
        );
    }
}

//! Admin role repository.

use cakestack_core::AdminUid;

use crate::error::StoreError;
use crate::models::{Admin, AdminDoc};
use crate::paths;
use crate::store::{DocumentStore, ListOrder};

/// Reads and writes `admins/{uid}` role documents.
pub struct AdminRepo<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> AdminRepo<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn get(&self, uid: &AdminUid) -> Result<Option<Admin>, StoreError> {
        let doc = self.store.get(&paths::admin(uid)).await?;
        doc.map(|doc| {
            Ok(Admin {
                uid: uid.clone(),
                doc: doc.decode()?,
            })
        })
        .transpose()
    }

    pub async fn list(&self) -> Result<Vec<Admin>, StoreError> {
        let docs = self.store.list(&paths::admins(), ListOrder::CreatedAsc).await?;
        docs.into_iter()
            .map(|doc| {
                Ok(Admin {
                    uid: AdminUid::new(doc.id()),
                    doc: doc.decode()?,
                })
            })
            .collect()
    }

    /// Create a role record under the identity provider's UID.
    pub async fn create(&self, uid: &AdminUid, doc: &AdminDoc) -> Result<(), StoreError> {
        let data = serde_json::to_value(doc)
            .map_err(|e| StoreError::DataCorruption(e.to_string()))?;
        self.store
            .create(&paths::admins(), Some(uid.as_str()), data)
            .await?;
        Ok(())
    }

    /// Merge updated fields (e.g. a changed `assignedShops` list).
    pub async fn update(&self, uid: &AdminUid, patch: serde_json::Value) -> Result<(), StoreError> {
        self.store.merge(&paths::admin(uid), patch).await
    }

    /// Remove the role record. The identity account is deleted separately.
    pub async fn delete(&self, uid: &AdminUid) -> Result<(), StoreError> {
        self.store.delete(&paths::admin(uid)).await
    }
}

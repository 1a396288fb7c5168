//! `PostgreSQL` document store.
//!
//! Documents live in a single JSONB table keyed by their slash-joined path,
//! with the parent collection path denormalized for listing. Merge maps to
//! the JSONB `||` operator, which matches the hosted store's top-level
//! update-merge semantics.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::Value;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::StoreError;
use crate::store::{
    CollectionPath, Document, DocumentPath, DocumentStore, ListOrder, push_id,
};

/// Embedded migrations for the documents table.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// [`DocumentStore`] backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for health checks.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn row_to_document(path: String, data: Value) -> Result<Document, StoreError> {
    let path = DocumentPath::parse(&path)?;
    Ok(Document { path, data })
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query("SELECT data FROM documents WHERE path = $1")
            .bind(path.as_str())
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let data: Value = row.try_get("data")?;
                Ok(Some(Document {
                    path: path.clone(),
                    data,
                }))
            }
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        collection: &CollectionPath,
        order: ListOrder,
    ) -> Result<Vec<Document>, StoreError> {
        let query = match order {
            ListOrder::CreatedDesc => {
                "SELECT path, data FROM documents WHERE parent = $1 \
                 ORDER BY data->>'createdAt' DESC NULLS LAST"
            }
            ListOrder::CreatedAsc => {
                "SELECT path, data FROM documents WHERE parent = $1 \
                 ORDER BY data->>'createdAt' ASC NULLS LAST"
            }
        };
        let rows = sqlx::query(query)
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|row| {
                let path: String = row.try_get("path")?;
                let data: Value = row.try_get("data")?;
                row_to_document(path, data)
            })
            .collect()
    }

    async fn create(
        &self,
        collection: &CollectionPath,
        id: Option<&str>,
        data: Value,
    ) -> Result<DocumentPath, StoreError> {
        let generated = id.is_none();
        let mut id = id.map_or_else(push_id, str::to_owned);
        loop {
            let path = collection.doc(&id);
            let result = sqlx::query(
                "INSERT INTO documents (path, parent, data) VALUES ($1, $2, $3) \
                 ON CONFLICT (path) DO NOTHING",
            )
            .bind(path.as_str())
            .bind(collection.as_str())
            .bind(&data)
            .execute(&self.pool)
            .await?;
            if result.rows_affected() > 0 {
                return Ok(path);
            }
            if !generated {
                return Err(StoreError::AlreadyExists(path.to_string()));
            }
            // Collision on a generated push ID: draw another.
            id = push_id();
        }
    }

    async fn merge(&self, path: &DocumentPath, patch: Value) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE documents SET data = data || $2, updated_at = now() WHERE path = $1",
        )
        .bind(path.as_str())
        .bind(&patch)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE path = $1")
            .bind(path.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_tree(&self, path: &DocumentPath) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE path = $1 OR path LIKE $2")
            .bind(path.as_str())
            .bind(format!("{}/%", path.as_str()))
            .execute(&self.pool)
            .await?;
        tracing::debug!(path = %path, deleted = result.rows_affected(), "document tree deleted");
        Ok(())
    }
}

//! The document store contract.

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::error::StoreError;

/// Length of generated document IDs, matching the hosted store's push IDs.
const PUSH_ID_LEN: usize = 20;

/// Error produced when parsing a document or collection path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path must not be empty")]
    Empty,
    #[error("path contains an empty segment")]
    EmptySegment,
    #[error("expected an even number of segments, got {0}")]
    NotADocument(usize),
    #[error("expected an odd number of segments, got {0}")]
    NotACollection(usize),
}

fn split_segments(path: &str) -> Result<Vec<&str>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(PathError::EmptySegment);
    }
    Ok(segments)
}

/// Address of a collection: an odd number of slash-joined segments
/// (`shops`, `shops/sweet-treats/orders`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// A top-level collection.
    #[must_use]
    pub fn root(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// Parse a collection path.
    ///
    /// # Errors
    ///
    /// Returns `PathError` for empty segments or an even segment count.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let segments = split_segments(path)?;
        if segments.len() % 2 == 0 {
            return Err(PathError::NotACollection(segments.len()));
        }
        Ok(Self(path.to_owned()))
    }

    /// The document at `id` within this collection.
    #[must_use]
    pub fn doc(&self, id: &str) -> DocumentPath {
        DocumentPath(format!("{}/{id}", self.0))
    }

    /// The slash-joined path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address of a document: an even number of slash-joined segments
/// (`shops/sweet-treats`, `shops/sweet-treats/orders/k3j…`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Parse a document path.
    ///
    /// # Errors
    ///
    /// Returns `PathError` for empty segments or an odd segment count.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let segments = split_segments(path)?;
        if segments.len() % 2 != 0 {
            return Err(PathError::NotADocument(segments.len()));
        }
        Ok(Self(path.to_owned()))
    }

    /// A subcollection of this document.
    #[must_use]
    pub fn collection(&self, name: &str) -> CollectionPath {
        CollectionPath(format!("{}/{name}", self.0))
    }

    /// The document's own ID (final segment).
    #[must_use]
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// The collection this document belongs to.
    #[must_use]
    pub fn parent(&self) -> CollectionPath {
        match self.0.rsplit_once('/') {
            Some((parent, _)) => CollectionPath(parent.to_owned()),
            None => CollectionPath(self.0.clone()),
        }
    }

    /// The slash-joined path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored document: its address plus raw JSON data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: DocumentPath,
    pub data: Value,
}

impl Document {
    /// The document's ID within its collection.
    #[must_use]
    pub fn id(&self) -> &str {
        self.path.id()
    }

    /// Decode the raw data into a typed record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DataCorruption` naming the path if the data does
    /// not match the expected shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(self.data.clone())
            .map_err(|e| StoreError::DataCorruption(format!("{}: {e}", self.path)))
    }
}

/// Listing order for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Newest first, by the `createdAt` field.
    #[default]
    CreatedDesc,
    /// Oldest first, by the `createdAt` field.
    CreatedAsc,
}

/// The hosted document database, reduced to the operations the platform
/// uses. Implementations must be safe to share across requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by path.
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError>;

    /// List every document in a collection.
    async fn list(
        &self,
        collection: &CollectionPath,
        order: ListOrder,
    ) -> Result<Vec<Document>, StoreError>;

    /// Create a document. With `id: None` a push ID is generated; with an
    /// explicit ID the call fails if the document already exists.
    async fn create(
        &self,
        collection: &CollectionPath,
        id: Option<&str>,
        data: Value,
    ) -> Result<DocumentPath, StoreError>;

    /// Merge `patch`'s top-level fields into an existing document.
    ///
    /// Fails with `StoreError::NotFound` if the document does not exist.
    async fn merge(&self, path: &DocumentPath, patch: Value) -> Result<(), StoreError>;

    /// Delete one document. Deleting a missing document is a no-op.
    async fn delete(&self, path: &DocumentPath) -> Result<(), StoreError>;

    /// Delete a document and every document beneath it (subcollections at
    /// any depth). Used by the shop-deletion cascade.
    async fn delete_tree(&self, path: &DocumentPath) -> Result<(), StoreError>;
}

/// Generate a 20-character alphanumeric document ID.
#[must_use]
pub fn push_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(PUSH_ID_LEN)
        .map(char::from)
        .collect()
}

//! Cakestack Store - document store collaborator and repositories.
//!
//! The hosted document database is modeled as the [`DocumentStore`] trait:
//! hierarchical `(collection, id)` addressing with get-by-id, ordered
//! listing, create, update-merge, and delete. Two implementations ship:
//!
//! - [`PgDocumentStore`] - `PostgreSQL` JSONB table, the production store
//! - [`MemoryStore`] - in-memory map for tests and seeding
//!
//! The store handle is passed explicitly into every repository - there is no
//! module-level client singleton. Repositories validate raw documents into
//! typed records at this boundary, so pricing/lifecycle/access logic never
//! sees loosely-shaped data.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod memory;
pub mod models;
pub mod paths;
pub mod postgres;
pub mod repos;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::{MIGRATOR, PgDocumentStore, create_pool};
pub use store::{CollectionPath, Document, DocumentPath, DocumentStore, ListOrder, PathError, push_id};

//! Admin record management commands.
//!
//! These commands write the store-side admin record only. The
//! identity-provider account must already exist; pass its user ID as
//! `--uid`. Creating both at once is what the admin console's
//! `POST /admin/admins` endpoint is for.
//!
//! # Usage
//!
//! ```bash
//! cake-cli admin create --uid abc123 --email admin@example.com --shop sweet-treats
//! cake-cli admin assign --uid abc123 --shop sweet-treats --shop second-shop
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use chrono::Utc;
use serde_json::json;
use thiserror::Error;

use cakestack_core::{AdminUid, ShopId, ShopIdError};
use cakestack_store::models::AdminDoc;
use cakestack_store::repos::AdminRepo;
use cakestack_store::{PgDocumentStore, StoreError};

use super::ConnectError;

/// Errors that can occur during admin record operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Connection setup error.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Document store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid shop slug passed on the command line.
    #[error("Invalid shop slug: {0}")]
    Slug(#[from] ShopIdError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
}

fn parse_shops(slugs: &[String]) -> Result<Vec<ShopId>, ShopIdError> {
    slugs.iter().map(|slug| ShopId::parse(slug)).collect()
}

/// Create an admin record for an existing identity-provider account.
pub async fn create(uid: &str, email: &str, shops: &[String]) -> Result<(), AdminError> {
    // Basic email validation
    if !email.contains('@') || !email.contains('.') {
        return Err(AdminError::InvalidEmail(email.to_owned()));
    }
    let assigned = parse_shops(shops)?;

    let pool = super::connect().await?;
    let store = PgDocumentStore::new(pool);
    let uid = AdminUid::new(uid);

    tracing::info!("Creating admin record: {} ({})", uid, email);
    let doc = AdminDoc::new(email.to_owned(), assigned, Utc::now());
    AdminRepo::new(&store).create(&uid, &doc).await?;

    tracing::info!("Admin record created for {}", uid);
    Ok(())
}

/// Replace an admin's shop assignments.
pub async fn assign(uid: &str, shops: &[String]) -> Result<(), AdminError> {
    let assigned = parse_shops(shops)?;

    let pool = super::connect().await?;
    let store = PgDocumentStore::new(pool);
    let uid = AdminUid::new(uid);

    tracing::info!("Assigning {} shop(s) to {}", assigned.len(), uid);
    AdminRepo::new(&store)
        .update(
            &uid,
            json!({
                "assignedShops": assigned,
                "updatedAt": Utc::now(),
            }),
        )
        .await?;

    tracing::info!("Assignments updated for {}", uid);
    Ok(())
}

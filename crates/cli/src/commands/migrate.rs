//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! cake-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use thiserror::Error;

use super::ConnectError;

/// Errors that can occur during migration.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Connection setup error.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending database migrations.
pub async fn run() -> Result<(), MigrateError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    cakestack_store::MIGRATOR.run(&pool).await?;
    tracing::info!("Migrations complete!");

    Ok(())
}

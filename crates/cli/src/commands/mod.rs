//! CLI command implementations.

pub mod connections;
pub mod migrate;

use catalog_sync_server::config::{ConfigError, get_database_url};
use sqlx::PgPool;

/// Errors shared by commands that need the database.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] catalog_sync_server::db::RepositoryError),

    #[error("Connection not found: {0}")]
    NotFound(i32),
}

/// Connect to the synchronizer database named by `SYNC_DATABASE_URL`.
async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();
    let database_url = get_database_url("SYNC_DATABASE_URL")?;

    tracing::info!("Connecting to sync database...");
    Ok(catalog_sync_server::db::create_pool(&database_url).await?)
}

//! Database migration command.
//!
//! # Environment Variables
//!
//! - `SYNC_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Stored in `crates/server/migrations/`, embedded at compile time.

use super::{CommandError, connect};

/// Run the synchronizer's database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running sync migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Sync migrations complete!");
    Ok(())
}

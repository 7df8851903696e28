//! Tenant connection management commands.

use catalog_sync_core::ConnectionId;
use catalog_sync_server::db::{ConnectionRepository, SyncLineRepository};
use catalog_sync_server::sync::{ConnectionRegistry, SyncIndex};

use super::{CommandError, connect};

/// Print every connection with its number of sync lines.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be read.
pub async fn list() -> Result<(), CommandError> {
    let pool = connect().await?;
    let connections = ConnectionRepository::new(pool.clone());
    let lines = SyncLineRepository::new(pool);

    let all = connections.list().await?;
    if all.is_empty() {
        tracing::info!("No connections configured");
        return Ok(());
    }

    for connection in all {
        let count = lines.list_for_connection(connection.id).await?.len();
        #[allow(clippy::print_stdout)]
        {
            println!(
                "{}\tcompany {}\t{}\t{}\t{} lines",
                connection.id,
                connection.tenant_id,
                connection.inventory_url,
                connection.storefront_url,
                count
            );
        }
    }
    Ok(())
}

/// Delete a connection; its sync lines go with it.
///
/// # Errors
///
/// Returns `CommandError::NotFound` if no connection has this ID.
pub async fn delete(id: i32) -> Result<(), CommandError> {
    let pool = connect().await?;
    let connections = ConnectionRepository::new(pool);

    if !connections.delete(ConnectionId::new(id)).await? {
        return Err(CommandError::NotFound(id));
    }
    tracing::info!(connection_id = id, "Connection deleted");
    Ok(())
}

//! In-memory implementation of both persistence ports.
//!
//! Enforces the same constraints as the `PostgreSQL` schema: one connection
//! per tenant, one sync line per (connection, inventory product), and cascade
//! of lines when their connection is deleted.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use catalog_sync_core::{ConnectionId, InventoryProductId, SyncLineId, TenantId};

use super::model::{Connection, ConnectionUpdate, NewSyncLine, SyncLine, ValidConnection};
use super::ports::{ConnectionRegistry, SyncIndex};
use crate::db::RepositoryError;

#[derive(Default)]
struct Tables {
    connections: BTreeMap<ConnectionId, Connection>,
    lines: BTreeMap<(ConnectionId, InventoryProductId), SyncLine>,
    next_connection_id: i32,
    next_line_id: i64,
}

/// Connection registry and sync index backed by process memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of sync lines across all connections.
    pub async fn line_count(&self) -> usize {
        self.tables.read().await.lines.len()
    }
}

#[async_trait]
impl ConnectionRegistry for MemoryStore {
    async fn find_by_tenant(
        &self,
        tenant: TenantId,
    ) -> Result<Option<Connection>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .connections
            .values()
            .find(|c| c.tenant_id == tenant)
            .cloned())
    }

    async fn find(&self, id: ConnectionId) -> Result<Option<Connection>, RepositoryError> {
        Ok(self.tables.read().await.connections.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Connection>, RepositoryError> {
        Ok(self.tables.read().await.connections.values().cloned().collect())
    }

    async fn insert(&self, connection: ValidConnection) -> Result<Connection, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables
            .connections
            .values()
            .any(|c| c.tenant_id == connection.tenant_id)
        {
            return Err(RepositoryError::Conflict(format!(
                "connection for tenant {} already exists",
                connection.tenant_id
            )));
        }

        tables.next_connection_id += 1;
        let now = Utc::now();
        let stored = Connection {
            id: ConnectionId::new(tables.next_connection_id),
            tenant_id: connection.tenant_id,
            inventory_url: connection.inventory_url,
            storefront_url: connection.storefront_url,
            storefront_key: connection.storefront_key,
            storefront_secret: connection.storefront_secret,
            created_at: now,
            updated_at: now,
        };
        tables.connections.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: ConnectionId,
        update: ConnectionUpdate,
    ) -> Result<Connection, RepositoryError> {
        let mut tables = self.tables.write().await;
        let connection = tables
            .connections
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        update.apply(connection);
        connection.updated_at = Utc::now();
        Ok(connection.clone())
    }

    async fn delete(&self, id: ConnectionId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        let removed = tables.connections.remove(&id).is_some();
        if removed {
            tables.lines.retain(|(connection, _), _| *connection != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl SyncIndex for MemoryStore {
    async fn find(
        &self,
        connection: ConnectionId,
        product: InventoryProductId,
    ) -> Result<Option<SyncLine>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .lines
            .get(&(connection, product))
            .cloned())
    }

    async fn list_for_connection(
        &self,
        connection: ConnectionId,
    ) -> Result<Vec<SyncLine>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut lines: Vec<SyncLine> = tables
            .lines
            .values()
            .filter(|l| l.connection_id == connection)
            .cloned()
            .collect();
        lines.sort_by_key(|l| l.id);
        Ok(lines)
    }

    async fn insert(&self, line: NewSyncLine) -> Result<SyncLine, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.connections.contains_key(&line.connection_id) {
            return Err(RepositoryError::Conflict(format!(
                "connection {} does not exist",
                line.connection_id
            )));
        }
        let key = (line.connection_id, line.product_id);
        if tables.lines.contains_key(&key) {
            return Err(RepositoryError::Conflict(format!(
                "product {} already linked in connection {}",
                line.product_id, line.connection_id
            )));
        }

        tables.next_line_id += 1;
        let stored = SyncLine {
            id: SyncLineId::new(tables.next_line_id),
            connection_id: line.connection_id,
            product_id: line.product_id,
            storefront_id: line.storefront_id,
            storefront_name: line.storefront_name,
            created_at: Utc::now(),
        };
        tables.lines.insert(key, stored.clone());
        Ok(stored)
    }

    async fn delete(
        &self,
        connection: ConnectionId,
        product: InventoryProductId,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .tables
            .write()
            .await
            .lines
            .remove(&(connection, product))
            .is_some())
    }
}

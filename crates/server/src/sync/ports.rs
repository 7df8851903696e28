//! Ports the sync engine depends on.
//!
//! The engine never talks to `PostgreSQL` or HTTP directly; it goes through
//! these traits so the same reconciliation and command logic runs against the
//! real adapters in production and the in-memory ones in tests.

use std::sync::Arc;

use async_trait::async_trait;

use catalog_sync_core::{
    ConnectionId, InventoryProduct, InventoryProductId, ProductDraft, ProductPatch,
    StorefrontProduct, StorefrontProductId, TenantId,
};

use super::error::RemoteError;
use super::model::{Connection, ConnectionUpdate, NewSyncLine, SyncLine, ValidConnection};
use crate::db::RepositoryError;

/// Persistence of tenant connections. At most one per tenant.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    async fn find_by_tenant(&self, tenant: TenantId)
    -> Result<Option<Connection>, RepositoryError>;

    async fn find(&self, id: ConnectionId) -> Result<Option<Connection>, RepositoryError>;

    async fn list(&self) -> Result<Vec<Connection>, RepositoryError>;

    /// Insert a connection. A second connection for the same tenant fails with
    /// `RepositoryError::Conflict`.
    async fn insert(&self, connection: ValidConnection) -> Result<Connection, RepositoryError>;

    /// Update URLs/credentials. Fails with `RepositoryError::NotFound` when absent.
    async fn update(
        &self,
        id: ConnectionId,
        update: ConnectionUpdate,
    ) -> Result<Connection, RepositoryError>;

    /// Delete a connection and all of its sync lines. Returns whether a row
    /// was removed.
    async fn delete(&self, id: ConnectionId) -> Result<bool, RepositoryError>;
}

/// Persistence of sync lines, unique on (connection, inventory product).
#[async_trait]
pub trait SyncIndex: Send + Sync {
    async fn find(
        &self,
        connection: ConnectionId,
        product: InventoryProductId,
    ) -> Result<Option<SyncLine>, RepositoryError>;

    async fn list_for_connection(
        &self,
        connection: ConnectionId,
    ) -> Result<Vec<SyncLine>, RepositoryError>;

    /// Insert a line. A duplicate (connection, product) fails with
    /// `RepositoryError::Conflict`.
    async fn insert(&self, line: NewSyncLine) -> Result<SyncLine, RepositoryError>;

    async fn delete(
        &self,
        connection: ConnectionId,
        product: InventoryProductId,
    ) -> Result<bool, RepositoryError>;
}

/// Read access to the authoritative inventory catalog.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Case-insensitive barcode lookup within the connection's tenant.
    async fn find_by_barcode(
        &self,
        connection: &Connection,
        barcode: &str,
    ) -> Result<Option<InventoryProduct>, RemoteError>;

    /// Case-insensitive name lookup within the connection's tenant.
    async fn find_by_name(
        &self,
        connection: &Connection,
        name: &str,
    ) -> Result<Option<InventoryProduct>, RemoteError>;
}

/// Read/write access to a storefront catalog.
#[async_trait]
pub trait StorefrontClient: Send + Sync {
    /// The complete catalog, all pages.
    async fn list_all_products(
        &self,
        connection: &Connection,
    ) -> Result<Vec<StorefrontProduct>, RemoteError>;

    /// Create a hidden, stock-managed product.
    async fn create_product(
        &self,
        connection: &Connection,
        draft: &ProductDraft,
    ) -> Result<StorefrontProduct, RemoteError>;

    /// Overwrite barcode, name, price, and stock.
    async fn replace_product(
        &self,
        connection: &Connection,
        product: &StorefrontProduct,
    ) -> Result<StorefrontProduct, RemoteError>;

    /// Apply only the fields the patch touches.
    async fn patch_product(
        &self,
        connection: &Connection,
        patch: &ProductPatch,
    ) -> Result<StorefrontProduct, RemoteError>;

    /// Remove a product from the public catalog without deleting it.
    async fn hide_product(
        &self,
        connection: &Connection,
        id: StorefrontProductId,
    ) -> Result<StorefrontProduct, RemoteError>;
}

/// Fire-and-forget tenant notifications. Failures are logged by the
/// implementation and never reach the caller.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn publish(&self, tenant: TenantId, text: &str);
}

/// The full set of collaborators the engine needs.
#[derive(Clone)]
pub struct SyncPorts {
    pub connections: Arc<dyn ConnectionRegistry>,
    pub index: Arc<dyn SyncIndex>,
    pub inventory: Arc<dyn InventoryClient>,
    pub storefront: Arc<dyn StorefrontClient>,
    pub notifications: Arc<dyn NotificationSink>,
}

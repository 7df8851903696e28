//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::SyncConfig;
use crate::db::{ConnectionRepository, SyncLineRepository};
use crate::http::build_client;
use crate::inventory::HalInventoryClient;
use crate::notifications::HttpNotificationSink;
use crate::sync::{CommandHandler, Reconciler, RemoteError, SyncPorts};
use crate::woocommerce::WooCommerceClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The pool is only present when the state is
/// backed by `PostgreSQL`; in-memory states report ready unconditionally.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    ports: SyncPorts,
    reconciler: Reconciler,
    commands: CommandHandler,
    pool: Option<PgPool>,
}

impl AppState {
    /// Create state from an arbitrary set of ports.
    #[must_use]
    pub fn new(ports: SyncPorts, pool: Option<PgPool>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                reconciler: Reconciler::new(ports.clone()),
                commands: CommandHandler::new(ports.clone()),
                ports,
                pool,
            }),
        }
    }

    /// Wire the production adapters: `PostgreSQL` repositories, the HAL
    /// inventory client, the `WooCommerce` client, and the notification service.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Http` if the shared HTTP client cannot be built.
    pub fn from_config(config: &SyncConfig, pool: PgPool) -> Result<Self, RemoteError> {
        let client = build_client(config.remote_timeout)?;

        let ports = SyncPorts {
            connections: Arc::new(ConnectionRepository::new(pool.clone())),
            index: Arc::new(SyncLineRepository::new(pool.clone())),
            inventory: Arc::new(HalInventoryClient::new(client.clone())),
            storefront: Arc::new(WooCommerceClient::new(client.clone())),
            notifications: Arc::new(HttpNotificationSink::new(
                client,
                config.notification_url.clone(),
            )),
        };

        Ok(Self::new(ports, Some(pool)))
    }

    /// Get a reference to the engine's ports.
    #[must_use]
    pub fn ports(&self) -> &SyncPorts {
        &self.inner.ports
    }

    /// Get a reference to the reconciliation engine.
    #[must_use]
    pub fn reconciler(&self) -> &Reconciler {
        &self.inner.reconciler
    }

    /// Get a reference to the command handlers.
    #[must_use]
    pub fn commands(&self) -> &CommandHandler {
        &self.inner.commands
    }

    /// Get the database pool, if this state is backed by `PostgreSQL`.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }
}

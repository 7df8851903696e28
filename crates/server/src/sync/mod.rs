//! Synchronization engine.
//!
//! - [`reconcile`] - One-time bulk merge when a tenant connects
//! - [`commands`] - Incremental create/price/stock/name/delete handlers
//! - [`ports`] - Traits for persistence and the remote systems
//! - [`memory`] - In-memory persistence with the same constraints as `PostgreSQL`

pub mod commands;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod fakes;
pub mod memory;
pub mod messages;
pub mod model;
pub mod ports;
pub mod reconcile;
pub mod report;

pub use commands::{CommandHandler, CreateProduct, DeleteProduct, UpdateName, UpdatePrice, UpdateStock};
pub use error::{RemoteError, SyncError};
pub use memory::MemoryStore;
pub use model::{Connection, ConnectionUpdate, ConnectionView, NewConnection, NewSyncLine, SyncLine};
pub use ports::{
    ConnectionRegistry, InventoryClient, NotificationSink, StorefrontClient, SyncIndex, SyncPorts,
};
pub use reconcile::Reconciler;
pub use report::{ItemOutcome, ReconcileEvent, ReconciliationReport};

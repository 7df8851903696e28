//! Error types for the sync engine and its remote collaborators.

use thiserror::Error;

use catalog_sync_core::{InventoryProductId, TenantId};

use crate::db::RepositoryError;

/// Failure talking to the inventory service, the storefront, or the
/// notification service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("{system} API error ({status}): {message}")]
    Api {
        system: &'static str,
        status: u16,
        message: String,
    },

    /// The remote answered with a body we could not read.
    #[error("{system} response could not be parsed: {message}")]
    Parse {
        system: &'static str,
        message: String,
    },
}

/// Errors surfaced by the reconciliation engine and command handlers.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A required connection field is missing or malformed.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The tenant already has a connection.
    #[error("a connection already exists for company {0}")]
    DuplicateConnection(TenantId),

    /// The inventory product is already linked within this connection.
    #[error("product {product_id} of company {tenant_id} is already synced")]
    DuplicateSyncLine {
        tenant_id: TenantId,
        product_id: InventoryProductId,
    },

    #[error("remote call failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl SyncError {
    /// Shorthand for a validation failure.
    #[must_use]
    pub fn validation(field: &'static str, message: &str) -> Self {
        Self::Validation {
            field,
            message: message.to_string(),
        }
    }
}

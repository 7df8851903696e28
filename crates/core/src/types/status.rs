//! Status enums for synchronization outcomes.

use serde::{Deserialize, Serialize};

use super::product::StorefrontProduct;

/// Outcome status of an incremental sync command.
///
/// None of these are errors: "not synced" is expected for every inventory
/// product that was never mirrored, and "accepted" means the storefront could
/// not be reached and the command is safe to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// The storefront was updated (or the notification sent).
    Synced,
    /// The tenant has no connection, or the product has no sync line.
    NotSynced,
    /// The storefront call failed; nothing was recorded locally.
    Accepted,
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Synced => write!(f, "synced"),
            Self::NotSynced => write!(f, "not_synced"),
            Self::Accepted => write!(f, "accepted"),
        }
    }
}

/// Result of a command handler: a status plus the storefront record, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub status: SyncStatus,
    pub product: Option<StorefrontProduct>,
}

impl CommandOutcome {
    /// The tenant or product is not mirrored; nothing was done.
    #[must_use]
    pub const fn not_synced() -> Self {
        Self {
            status: SyncStatus::NotSynced,
            product: None,
        }
    }

    /// The remote call failed and was swallowed.
    #[must_use]
    pub const fn accepted() -> Self {
        Self {
            status: SyncStatus::Accepted,
            product: None,
        }
    }

    /// The command went through.
    #[must_use]
    pub const fn synced(product: Option<StorefrontProduct>) -> Self {
        Self {
            status: SyncStatus::Synced,
            product,
        }
    }
}

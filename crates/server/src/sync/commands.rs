//! Incremental command handlers driven by inventory-side events.
//!
//! Every handler first resolves the tenant's connection and, except for
//! `create_product`, the product's sync line. A missing connection or line is
//! the ordinary "not synced" outcome. Storefront failures are logged and
//! reported as `Accepted` so the caller can retry; repository failures
//! propagate.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use catalog_sync_core::{
    CommandOutcome, InventoryProductId, ProductDraft, ProductPatch, TenantId, UnitOfMeasure,
};

use super::error::SyncError;
use super::messages;
use super::model::{Connection, NewSyncLine, SyncLine};
use super::ports::SyncPorts;
use crate::db::RepositoryError;

/// A product was added to inventory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub company_id: TenantId,
    pub product_id: InventoryProductId,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uom: Option<String>,
    #[serde(default, rename = "pricePerUom", alias = "price")]
    pub price: Option<Decimal>,
}

/// An inventory product's unit price changed. `null` clears it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrice {
    pub company_id: TenantId,
    pub product_id: InventoryProductId,
    #[serde(default, rename = "pricePerUom", alias = "price")]
    pub price: Option<Decimal>,
}

/// An inventory product's stock changed. `null` clears it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStock {
    pub company_id: TenantId,
    pub product_id: InventoryProductId,
    #[serde(default)]
    pub stock: Option<Decimal>,
}

/// An inventory product was renamed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateName {
    pub company_id: TenantId,
    pub product_id: InventoryProductId,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub name: String,
}

/// An inventory product was removed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProduct {
    pub company_id: TenantId,
    pub product_id: InventoryProductId,
}

/// Handles the five incremental commands against a set of ports.
#[derive(Clone)]
pub struct CommandHandler {
    ports: SyncPorts,
}

impl CommandHandler {
    #[must_use]
    pub const fn new(ports: SyncPorts) -> Self {
        Self { ports }
    }

    /// Connection and sync line for a product, if it is mirrored.
    async fn resolve(
        &self,
        tenant: TenantId,
        product: InventoryProductId,
    ) -> Result<Option<(Connection, SyncLine)>, SyncError> {
        let Some(connection) = self.ports.connections.find_by_tenant(tenant).await? else {
            return Ok(None);
        };
        let line = self.ports.index.find(connection.id, product).await?;
        Ok(line.map(|line| (connection, line)))
    }

    /// Create a hidden storefront product and link it.
    ///
    /// # Errors
    ///
    /// - `SyncError::DuplicateSyncLine` if the product is already linked (no
    ///   storefront call is made), or if a concurrent create linked it first
    /// - `SyncError::Repository` if the index cannot be read or written
    #[instrument(skip(self, command), fields(company_id = %command.company_id, product_id = %command.product_id))]
    pub async fn create_product(&self, command: CreateProduct) -> Result<CommandOutcome, SyncError> {
        let Some(connection) = self
            .ports
            .connections
            .find_by_tenant(command.company_id)
            .await?
        else {
            return Ok(CommandOutcome::not_synced());
        };

        let duplicate = || SyncError::DuplicateSyncLine {
            tenant_id: command.company_id,
            product_id: command.product_id,
        };
        if self
            .ports
            .index
            .find(connection.id, command.product_id)
            .await?
            .is_some()
        {
            return Err(duplicate());
        }

        let uom = command.uom.as_deref().and_then(parse_uom);
        let draft = ProductDraft {
            barcode: command.barcode.clone(),
            name: command.name.clone(),
            uom,
            price: command.price,
        };

        let created = match self.ports.storefront.create_product(&connection, &draft).await {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!(error = %e, "Storefront create failed, nothing linked");
                return Ok(CommandOutcome::accepted());
            }
        };

        let line = NewSyncLine {
            connection_id: connection.id,
            product_id: command.product_id,
            storefront_id: created.id,
            storefront_name: None,
        };
        match self.ports.index.insert(line).await {
            Ok(_) => {}
            Err(RepositoryError::Conflict(_)) => {
                tracing::error!(
                    storefront_id = %created.id,
                    "Lost race linking product, leaving created storefront product hidden"
                );
                if let Err(e) = self
                    .ports
                    .storefront
                    .hide_product(&connection, created.id)
                    .await
                {
                    tracing::warn!(storefront_id = %created.id, error = %e, "Failed to hide orphaned product");
                }
                return Err(duplicate());
            }
            Err(e) => {
                tracing::error!(storefront_id = %created.id, error = %e, "Created product could not be linked");
                return Err(e.into());
            }
        }

        let text = messages::product_created(&created, uom, &connection.storefront_url);
        self.ports
            .notifications
            .publish(command.company_id, &text)
            .await;

        Ok(CommandOutcome::synced(Some(created)))
    }

    /// Set or clear the storefront price of a linked product.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Repository` if the connection or index cannot be read.
    #[instrument(skip(self, command), fields(company_id = %command.company_id, product_id = %command.product_id))]
    pub async fn update_price(&self, command: UpdatePrice) -> Result<CommandOutcome, SyncError> {
        let Some((connection, line)) = self.resolve(command.company_id, command.product_id).await?
        else {
            return Ok(CommandOutcome::not_synced());
        };
        let patch = ProductPatch::price(line.storefront_id, command.price);
        Ok(self.patch(&connection, &patch).await)
    }

    /// Set or clear the storefront stock of a linked product.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Repository` if the connection or index cannot be read.
    #[instrument(skip(self, command), fields(company_id = %command.company_id, product_id = %command.product_id))]
    pub async fn update_stock(&self, command: UpdateStock) -> Result<CommandOutcome, SyncError> {
        let Some((connection, line)) = self.resolve(command.company_id, command.product_id).await?
        else {
            return Ok(CommandOutcome::not_synced());
        };
        let patch = ProductPatch::stock(line.storefront_id, command.stock);
        Ok(self.patch(&connection, &patch).await)
    }

    async fn patch(&self, connection: &Connection, patch: &ProductPatch) -> CommandOutcome {
        match self.ports.storefront.patch_product(connection, patch).await {
            Ok(product) => CommandOutcome::synced(Some(product)),
            Err(e) => {
                tracing::warn!(storefront_id = %patch.id, error = %e, "Storefront patch failed");
                CommandOutcome::accepted()
            }
        }
    }

    /// Tell the tenant a linked product was renamed. The storefront is not
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Repository` if the connection or index cannot be read.
    #[instrument(skip(self, command), fields(company_id = %command.company_id, product_id = %command.product_id))]
    pub async fn update_name(&self, command: UpdateName) -> Result<CommandOutcome, SyncError> {
        let Some((connection, line)) = self.resolve(command.company_id, command.product_id).await?
        else {
            return Ok(CommandOutcome::not_synced());
        };
        let text = messages::name_changed(
            command.product_id,
            line.storefront_id,
            &command.barcode,
            &command.name,
            &connection.storefront_url,
        );
        self.ports
            .notifications
            .publish(command.company_id, &text)
            .await;
        Ok(CommandOutcome::synced(None))
    }

    /// Hide a linked product and unlink it.
    ///
    /// The line is only removed once the hide went through, so an `Accepted`
    /// outcome can be retried.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Repository` if the index cannot be read or written.
    #[instrument(skip(self, command), fields(company_id = %command.company_id, product_id = %command.product_id))]
    pub async fn delete_product(&self, command: DeleteProduct) -> Result<CommandOutcome, SyncError> {
        let Some((connection, line)) = self.resolve(command.company_id, command.product_id).await?
        else {
            return Ok(CommandOutcome::not_synced());
        };

        let hidden = match self
            .ports
            .storefront
            .hide_product(&connection, line.storefront_id)
            .await
        {
            Ok(hidden) => hidden,
            Err(e) => {
                tracing::warn!(storefront_id = %line.storefront_id, error = %e, "Storefront hide failed, line kept");
                return Ok(CommandOutcome::accepted());
            }
        };

        self.ports
            .index
            .delete(connection.id, command.product_id)
            .await?;
        Ok(CommandOutcome::synced(Some(hidden)))
    }
}

/// Unknown units are dropped rather than failing the create.
fn parse_uom(code: &str) -> Option<UnitOfMeasure> {
    if code.trim().is_empty() {
        return None;
    }
    match UnitOfMeasure::parse(code) {
        Ok(uom) => Some(uom),
        Err(e) => {
            tracing::warn!(error = %e, "Creating product without a unit");
            None
        }
    }
}

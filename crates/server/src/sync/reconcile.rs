//! One-time bulk merge run when a tenant connection is created.
//!
//! The storefront catalog is walked in listing order. Each product is matched
//! against inventory (barcode first, then name), corrected toward inventory's
//! barcode, price, and stock, and linked in the sync index. Products with no
//! inventory counterpart are hidden. A failure on one product is recorded in
//! the report and the walk continues.

use tracing::instrument;

use catalog_sync_core::{InventoryProduct, StorefrontProduct};

use super::error::SyncError;
use super::model::{Connection, NewConnection, NewSyncLine};
use super::ports::SyncPorts;
use super::report::{ItemOutcome, ReconcileEvent, ReconciliationReport};
use crate::db::RepositoryError;

/// Runs reconciliation against a set of ports.
#[derive(Clone)]
pub struct Reconciler {
    ports: SyncPorts,
}

impl Reconciler {
    #[must_use]
    pub const fn new(ports: SyncPorts) -> Self {
        Self { ports }
    }

    /// Persist a new connection and reconcile the tenant's storefront catalog.
    ///
    /// # Errors
    ///
    /// - `SyncError::Validation` if a required field is missing or malformed
    /// - `SyncError::DuplicateConnection` if the tenant already has a connection
    /// - `SyncError::Remote` if the storefront catalog cannot be listed; the
    ///   connection is removed again so onboarding can be retried
    /// - `SyncError::Repository` if the connection cannot be stored
    #[instrument(skip(self, request), fields(tenant_id = tracing::field::Empty))]
    pub async fn create_connection(
        &self,
        request: NewConnection,
    ) -> Result<(Connection, ReconciliationReport), SyncError> {
        let valid = request.validate()?;
        let tenant_id = valid.tenant_id;
        tracing::Span::current().record("tenant_id", tenant_id.get());

        if self.ports.connections.find_by_tenant(tenant_id).await?.is_some() {
            return Err(SyncError::DuplicateConnection(tenant_id));
        }

        let connection = match self.ports.connections.insert(valid).await {
            Ok(connection) => connection,
            Err(RepositoryError::Conflict(_)) => {
                return Err(SyncError::DuplicateConnection(tenant_id));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::info!(connection_id = %connection.id, "Connection created, reconciling catalog");

        let catalog = match self.ports.storefront.list_all_products(&connection).await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(error = %e, "Storefront catalog unavailable, removing connection");
                if let Err(cleanup) = self.ports.connections.delete(connection.id).await {
                    tracing::error!(
                        connection_id = %connection.id,
                        error = %cleanup,
                        "Failed to remove connection after aborted reconciliation"
                    );
                }
                return Err(e.into());
            }
        };

        let report = self.reconcile(&connection, catalog).await;
        tracing::info!(
            connection_id = %connection.id,
            total = report.total,
            deactivated = report.deactivated,
            name_diverged = report.name_diverged,
            price_changed = report.price_changed,
            stock_changed = report.stock_changed,
            failed = report.failed,
            "Reconciliation finished"
        );

        Ok((connection, report))
    }

    /// Reconcile every product of a catalog, strictly in order.
    pub async fn reconcile(
        &self,
        connection: &Connection,
        catalog: Vec<StorefrontProduct>,
    ) -> ReconciliationReport {
        let mut report = ReconciliationReport::default();
        for product in catalog {
            let outcome = self.reconcile_item(connection, product).await;
            report.record(outcome);
        }
        report
    }

    /// Reconcile one storefront product, turning any failure into an outcome.
    #[instrument(skip(self, connection, product), fields(storefront_id = %product.id))]
    pub async fn reconcile_item(
        &self,
        connection: &Connection,
        product: StorefrontProduct,
    ) -> ItemOutcome {
        let storefront_id = product.id;
        let barcode = product.barcode.clone();
        match self.try_reconcile_item(connection, product).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reconcile product");
                ItemOutcome::Failed {
                    storefront_id,
                    barcode,
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_reconcile_item(
        &self,
        connection: &Connection,
        mut product: StorefrontProduct,
    ) -> Result<ItemOutcome, SyncError> {
        let Some(matched) = self.find_match(connection, &product).await? else {
            if !product.visible {
                return Ok(ItemOutcome::Skipped);
            }
            self.ports
                .storefront
                .hide_product(connection, product.id)
                .await?;
            return Ok(ItemOutcome::Deactivated(ReconcileEvent::Deactivated {
                storefront_id: product.id,
                barcode: product.barcode,
                name: product.name,
            }));
        };

        // A second storefront listing for an already linked inventory product
        // is left untouched.
        let existing = self.ports.index.find(connection.id, matched.id).await?;
        if let Some(line) = &existing
            && line.storefront_id != product.id
        {
            return Ok(ItemOutcome::Failed {
                storefront_id: product.id,
                barcode: product.barcode,
                reason: format!(
                    "inventory product {} already linked to storefront product {}",
                    matched.id, line.storefront_id
                ),
            });
        }

        let (events, dirty, name_diverged) = apply_inventory_values(&mut product, &matched);
        if dirty {
            self.ports
                .storefront
                .replace_product(connection, &product)
                .await?;
        }

        if existing.is_none() {
            let line = NewSyncLine {
                connection_id: connection.id,
                product_id: matched.id,
                storefront_id: product.id,
                storefront_name: name_diverged.then(|| product.name.clone()),
            };
            match self.ports.index.insert(line).await {
                Ok(_) => {}
                Err(RepositoryError::Conflict(_)) => {
                    return Err(SyncError::DuplicateSyncLine {
                        tenant_id: connection.tenant_id,
                        product_id: matched.id,
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(ItemOutcome::Linked { events })
    }

    /// Barcode match first, then name. Blank keys are never looked up.
    async fn find_match(
        &self,
        connection: &Connection,
        product: &StorefrontProduct,
    ) -> Result<Option<InventoryProduct>, SyncError> {
        if !product.barcode.trim().is_empty()
            && let Some(found) = self
                .ports
                .inventory
                .find_by_barcode(connection, &product.barcode)
                .await?
        {
            return Ok(Some(found));
        }

        if product.name.trim().is_empty() {
            return Ok(None);
        }
        Ok(self
            .ports
            .inventory
            .find_by_name(connection, &product.name)
            .await?)
    }
}

/// Move a storefront product toward its inventory counterpart.
///
/// Returns the events, whether the product needs pushing, and whether the
/// names diverged. The storefront name is never overwritten.
fn apply_inventory_values(
    product: &mut StorefrontProduct,
    matched: &InventoryProduct,
) -> (Vec<ReconcileEvent>, bool, bool) {
    let mut events = Vec::new();
    let mut dirty = false;

    if !product.same_barcode(matched) {
        events.push(ReconcileEvent::BarcodeCorrected {
            storefront_id: product.id,
            before: product.barcode.clone(),
            after: matched.barcode.clone(),
        });
        product.barcode.clone_from(&matched.barcode);
        dirty = true;
    }

    let name_diverged = !product.same_name(matched);
    if name_diverged {
        events.push(ReconcileEvent::NameDiverged {
            storefront_id: product.id,
            product_id: matched.id,
            storefront_name: product.name.clone(),
            inventory_name: matched.name.clone(),
        });
    }

    if product.price != matched.price {
        events.push(ReconcileEvent::PriceChanged {
            storefront_id: product.id,
            barcode: product.barcode.clone(),
            before: product.price,
            after: matched.price,
        });
        product.price = matched.price;
        dirty = true;
    }

    if product.stock != matched.stock {
        events.push(ReconcileEvent::StockChanged {
            storefront_id: product.id,
            barcode: product.barcode.clone(),
            before: product.stock,
            after: matched.stock,
        });
        product.stock = matched.stock;
        dirty = true;
    }

    (events, dirty, name_diverged)
}

//! Reconciliation report: per-item outcomes and run counters.

use std::fmt;

use rust_decimal::Decimal;

use catalog_sync_core::{InventoryProductId, StorefrontProductId};

/// Something that happened to one storefront product during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileEvent {
    /// No inventory match; the visible product was hidden.
    Deactivated {
        storefront_id: StorefrontProductId,
        barcode: String,
        name: String,
    },
    /// Matched by name; the storefront barcode was corrected.
    BarcodeCorrected {
        storefront_id: StorefrontProductId,
        before: String,
        after: String,
    },
    /// Names differ; reported only, the storefront name is left alone.
    NameDiverged {
        storefront_id: StorefrontProductId,
        product_id: InventoryProductId,
        storefront_name: String,
        inventory_name: String,
    },
    PriceChanged {
        storefront_id: StorefrontProductId,
        barcode: String,
        before: Option<Decimal>,
        after: Option<Decimal>,
    },
    StockChanged {
        storefront_id: StorefrontProductId,
        barcode: String,
        before: Option<Decimal>,
        after: Option<Decimal>,
    },
}

fn amount(value: Option<&Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), Decimal::to_string)
}

impl fmt::Display for ReconcileEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deactivated {
                storefront_id,
                barcode,
                name,
            } => write!(
                f,
                "Deactivated product {storefront_id} (barcode {barcode}, name {name}): not found in inventory"
            ),
            Self::BarcodeCorrected {
                storefront_id,
                before,
                after,
            } => write!(
                f,
                "Barcode of product {storefront_id} corrected from {before} to {after}"
            ),
            Self::NameDiverged {
                storefront_id,
                product_id,
                storefront_name,
                inventory_name,
            } => write!(
                f,
                "Name differs for product {storefront_id}: storefront \"{storefront_name}\", inventory product {product_id} \"{inventory_name}\""
            ),
            Self::PriceChanged {
                storefront_id,
                barcode,
                before,
                after,
            } => write!(
                f,
                "Price of product {storefront_id} (barcode {barcode}) changed from {} to {}",
                amount(before.as_ref()),
                amount(after.as_ref())
            ),
            Self::StockChanged {
                storefront_id,
                barcode,
                before,
                after,
            } => write!(
                f,
                "Stock of product {storefront_id} (barcode {barcode}) changed from {} to {}",
                amount(before.as_ref()),
                amount(after.as_ref())
            ),
        }
    }
}

/// Result of reconciling one storefront product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Unmatched and visible; now hidden.
    Deactivated(ReconcileEvent),
    /// Unmatched and already hidden; nothing to do.
    Skipped,
    /// Matched and linked, with whatever changed along the way.
    Linked { events: Vec<ReconcileEvent> },
    /// A remote or index call failed for this product.
    Failed {
        storefront_id: StorefrontProductId,
        barcode: String,
        reason: String,
    },
}

/// Accumulated outcome of one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    pub total: usize,
    pub deactivated: usize,
    pub name_diverged: usize,
    pub price_changed: usize,
    pub stock_changed: usize,
    pub failed: usize,
    /// One line per event, in the order encountered.
    pub lines: Vec<String>,
}

impl ReconciliationReport {
    /// Fold one item outcome into the counters.
    pub fn record(&mut self, outcome: ItemOutcome) {
        self.total += 1;
        match outcome {
            ItemOutcome::Deactivated(event) => {
                self.deactivated += 1;
                self.lines.push(event.to_string());
            }
            ItemOutcome::Skipped => {}
            ItemOutcome::Linked { events } => {
                for event in events {
                    match event {
                        ReconcileEvent::NameDiverged { .. } => self.name_diverged += 1,
                        ReconcileEvent::PriceChanged { .. } => self.price_changed += 1,
                        ReconcileEvent::StockChanged { .. } => self.stock_changed += 1,
                        ReconcileEvent::Deactivated { .. }
                        | ReconcileEvent::BarcodeCorrected { .. } => {}
                    }
                    self.lines.push(event.to_string());
                }
            }
            ItemOutcome::Failed {
                storefront_id,
                barcode,
                reason,
            } => {
                self.failed += 1;
                self.lines.push(format!(
                    "Failed to sync product {storefront_id} (barcode {barcode}): {reason}"
                ));
            }
        }
    }
}

impl fmt::Display for ReconciliationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        let total = self.total;
        writeln!(f, "Deactivated products {}/{total}", self.deactivated)?;
        writeln!(f, "Products with a different name {}/{total}", self.name_diverged)?;
        writeln!(f, "Price changes {}/{total}", self.price_changed)?;
        writeln!(f, "Stock changes {}/{total}", self.stock_changed)?;
        if self.failed > 0 {
            writeln!(f, "Failed products {}/{total}", self.failed)?;
        }
        Ok(())
    }
}

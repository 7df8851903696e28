//! Inventory service HAL wire types.

use rust_decimal::Decimal;
use serde::Deserialize;

use catalog_sync_core::{InventoryProduct, InventoryProductId, TenantId};

use crate::decimal::deserialize_lenient;

/// Search result: `{"_embedded": {"products": [...]}}`. A missing
/// `_embedded` means no match.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub products: Vec<HalProduct>,
}

impl SearchResult {
    /// First product of the result, if any.
    #[must_use]
    pub fn into_first(self) -> Option<InventoryProduct> {
        self.embedded
            .and_then(|e| e.products.into_iter().next())
            .map(Into::into)
    }
}

/// A product as the inventory service reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalProduct {
    pub id: i32,
    #[serde(default)]
    pub company_id: Option<i32>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uom: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub price_per_uom: Option<Decimal>,
    #[serde(default, alias = "stocuri", deserialize_with = "deserialize_lenient")]
    pub stock: Option<Decimal>,
}

impl From<HalProduct> for InventoryProduct {
    fn from(p: HalProduct) -> Self {
        Self {
            id: InventoryProductId::new(p.id),
            tenant: p.company_id.map(TenantId::new),
            barcode: p.barcode.unwrap_or_default(),
            name: p.name.unwrap_or_default(),
            uom: p.uom,
            price: p.price_per_uom,
            stock: p.stock,
            visible: true,
        }
    }
}

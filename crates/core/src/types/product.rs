//! Catalog product shapes exchanged with the inventory and storefront systems.
//!
//! Products are transient: they are fetched for comparison and pushed back as
//! mutations, but never persisted as-is.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{InventoryProductId, StorefrontProductId, TenantId};
use super::uom::UnitOfMeasure;

/// A product as reported by one of the two catalog systems.
///
/// Generic over the id type so an inventory product can never be passed where
/// a storefront product is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct<Id> {
    /// Id in the system that produced this record.
    pub id: Id,
    /// Owning tenant, when the producing system reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<TenantId>,
    /// Barcode / SKU.
    #[serde(default)]
    pub barcode: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Unit of measure code as reported by the producing system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    /// Unit price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Stock quantity.
    #[serde(default)]
    pub stock: Option<Decimal>,
    /// Whether the product is visible in the catalog.
    #[serde(default)]
    pub visible: bool,
}

/// Product as known by the authoritative inventory service.
pub type InventoryProduct = CatalogProduct<InventoryProductId>;

/// Product as listed on the storefront.
pub type StorefrontProduct = CatalogProduct<StorefrontProductId>;

impl<Id> CatalogProduct<Id> {
    /// Case-insensitive barcode comparison.
    #[must_use]
    pub fn same_barcode<Other>(&self, other: &CatalogProduct<Other>) -> bool {
        eq_ignore_case(&self.barcode, &other.barcode)
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn same_name<Other>(&self, other: &CatalogProduct<Other>) -> bool {
        eq_ignore_case(&self.name, &other.name)
    }
}

/// Compare two strings ignoring case, using Unicode lowercase folding.
///
/// Product names routinely carry diacritics, so ASCII-only folding is not
/// enough.
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Seed data for a product created on the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub barcode: String,
    pub name: String,
    pub uom: Option<UnitOfMeasure>,
    pub price: Option<Decimal>,
}

/// A three-state field update for partial mutations.
///
/// `Keep` leaves the remote field untouched, `Clear` empties it, and `Set`
/// overwrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// An explicit new value: `None` clears, `Some` sets.
    #[must_use]
    pub fn from_value(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }

    /// Whether this update leaves the field untouched.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// A partial storefront mutation: only fields that are not `Keep` are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPatch {
    pub id: StorefrontProductId,
    pub price: FieldUpdate<Decimal>,
    pub stock: FieldUpdate<Decimal>,
}

impl ProductPatch {
    /// Patch touching only the price.
    #[must_use]
    pub fn price(id: StorefrontProductId, price: Option<Decimal>) -> Self {
        Self {
            id,
            price: FieldUpdate::from_value(price),
            stock: FieldUpdate::Keep,
        }
    }

    /// Patch touching only the stock quantity.
    #[must_use]
    pub fn stock(id: StorefrontProductId, stock: Option<Decimal>) -> Self {
        Self {
            id,
            price: FieldUpdate::Keep,
            stock: FieldUpdate::from_value(stock),
        }
    }
}

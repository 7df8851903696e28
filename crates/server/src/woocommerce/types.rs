//! WooCommerce legacy REST (v2) wire types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use catalog_sync_core::{FieldUpdate, ProductDraft, ProductPatch, StorefrontProduct, StorefrontProductId};

use crate::decimal::{deserialize_lenient, serialize_as_number};

/// `GET /products` page.
#[derive(Debug, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<WooProduct>,
}

/// Single-product requests and responses are wrapped in `{"product": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductEnvelope<T> {
    pub product: T,
}

/// A product as WooCommerce reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct WooProduct {
    pub id: i32,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub regular_price: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub stock_quantity: Option<Decimal>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub catalog_visibility: Option<String>,
}

impl From<WooProduct> for StorefrontProduct {
    fn from(p: WooProduct) -> Self {
        // catalog_visibility is what hide_product sets, so it wins over `visible`
        let visible = p
            .catalog_visibility
            .as_deref()
            .map_or_else(|| p.visible.unwrap_or(true), |v| v != "hidden");
        Self {
            id: StorefrontProductId::new(p.id),
            tenant: None,
            barcode: p.sku.unwrap_or_default(),
            name: p.title.unwrap_or_default(),
            uom: None,
            price: p.regular_price,
            stock: p.stock_quantity,
            visible,
        }
    }
}

/// Request body for create and update calls. Absent fields are not sent.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct WooProductBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// WooCommerce prices are strings; an empty string clears the price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<String>,
    /// `Some(None)` clears the quantity.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_stock"
    )]
    pub stock_quantity: Option<Option<Decimal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_visibility: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managing_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backorders: Option<&'static str>,
}

#[allow(clippy::ref_option)]
fn serialize_stock<S>(value: &Option<Option<Decimal>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(inner) => serialize_as_number(inner, serializer),
        None => serializer.serialize_none(),
    }
}

fn price_field(price: Option<Decimal>) -> String {
    price.map(|p| p.normalize().to_string()).unwrap_or_default()
}

impl WooProductBody {
    /// Hidden, stock-managed product seeded from a draft.
    #[must_use]
    pub fn create(draft: &ProductDraft) -> Self {
        Self {
            sku: Some(draft.barcode.clone()),
            title: Some(draft.name.clone()),
            regular_price: Some(price_field(draft.price)),
            catalog_visibility: Some("hidden"),
            managing_stock: Some(true),
            backorders: Some("notify"),
            ..Self::default()
        }
    }

    /// All four synced fields, `None` values clearing the remote field.
    #[must_use]
    pub fn replace(product: &StorefrontProduct) -> Self {
        Self {
            sku: Some(product.barcode.clone()),
            title: Some(product.name.clone()),
            regular_price: Some(price_field(product.price)),
            stock_quantity: Some(product.stock),
            ..Self::default()
        }
    }

    /// Only the fields the patch touches.
    #[must_use]
    pub fn patch(patch: &ProductPatch) -> Self {
        let regular_price = match patch.price {
            FieldUpdate::Keep => None,
            FieldUpdate::Clear => Some(String::new()),
            FieldUpdate::Set(p) => Some(price_field(Some(p))),
        };
        let stock_quantity = match patch.stock {
            FieldUpdate::Keep => None,
            FieldUpdate::Clear => Some(None),
            FieldUpdate::Set(s) => Some(Some(s)),
        };
        Self {
            regular_price,
            stock_quantity,
            ..Self::default()
        }
    }

    /// Remove from the public catalog.
    #[must_use]
    pub fn hide() -> Self {
        Self {
            catalog_visibility: Some("hidden"),
            ..Self::default()
        }
    }
}

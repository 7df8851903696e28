//! Tenant-facing notification texts.

use std::fmt::Write as _;

use catalog_sync_core::{InventoryProductId, StorefrontProduct, StorefrontProductId, UnitOfMeasure};

/// Sent after a product was created (hidden) on the storefront.
#[must_use]
pub fn product_created(
    product: &StorefrontProduct,
    uom: Option<UnitOfMeasure>,
    storefront_url: &str,
) -> String {
    let mut text = String::from("Product added to storefront\n");
    let _ = writeln!(text, "ID: {}", product.id);
    let _ = writeln!(text, "Barcode: {}", product.barcode);
    let _ = writeln!(text, "Name: {}", product.name);
    if let Some(price) = product.price {
        let _ = writeln!(text, "Price: {price}");
    }
    if let Some(uom) = uom {
        let _ = writeln!(text, "Unit: {uom}");
    }
    let _ = write!(text, "Visit {storefront_url} to edit");
    text
}

/// Sent when inventory renames a linked product. Storefront names are edited
/// by hand.
#[must_use]
pub fn name_changed(
    product_id: InventoryProductId,
    storefront_id: StorefrontProductId,
    barcode: &str,
    name: &str,
    storefront_url: &str,
) -> String {
    format!(
        "Product name changed\nID: {product_id}\nStorefront ID: {storefront_id}\nBarcode: {barcode}\nNew name: {name}\nVisit {storefront_url} to edit"
    )
}

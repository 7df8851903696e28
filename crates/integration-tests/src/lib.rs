//! Integration tests for Catalog Sync.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-sync-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `sync_routes` - Onboarding and connection administration over HTTP
//! - `update_routes` - Inventory events over HTTP
//! - `reconciliation` - Engine scenarios across several products
//!
//! Every test runs against [`TestContext`]: a [`MemoryStore`] plus recording
//! fakes for the inventory, the storefront, and the notification service.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use rust_decimal::Decimal;
use tower::ServiceExt;

use catalog_sync_core::{
    InventoryProduct, InventoryProductId, StorefrontProduct, StorefrontProductId, TenantId,
};
use catalog_sync_server::routes;
use catalog_sync_server::state::AppState;
use catalog_sync_server::sync::fakes::{FakeInventory, FakeStorefront, RecordingNotifier};
use catalog_sync_server::sync::{MemoryStore, SyncPorts};

/// Tenant used by the fixtures.
pub const TENANT: i32 = 1;

/// In-memory service with handles on every fake.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub inventory: Arc<FakeInventory>,
    pub storefront: Arc<FakeStorefront>,
    pub notifier: Arc<RecordingNotifier>,
    pub state: AppState,
}

impl TestContext {
    #[must_use]
    pub fn new(inventory: Vec<InventoryProduct>, storefront: Vec<StorefrontProduct>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let inventory = Arc::new(FakeInventory::new(inventory));
        let storefront = Arc::new(FakeStorefront::new(storefront));
        let notifier = Arc::new(RecordingNotifier::new());
        let ports = SyncPorts {
            connections: store.clone(),
            index: store.clone(),
            inventory: inventory.clone(),
            storefront: storefront.clone(),
            notifications: notifier.clone(),
        };
        Self {
            store,
            inventory,
            storefront,
            notifier,
            state: AppState::new(ports, None),
        }
    }

    /// The application router over this context's state.
    #[must_use]
    pub fn router(&self) -> Router {
        routes::app(self.state.clone())
    }

    /// Send one request and collect the response.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    #[allow(clippy::unwrap_used)]
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, String) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// Onboard [`TENANT`] through `POST /sync` and return the report.
    ///
    /// # Panics
    ///
    /// Panics if onboarding does not answer 200.
    pub async fn onboard(&self) -> String {
        let (status, body) = self
            .send("POST", "/sync", Some(connection_request(TENANT)))
            .await;
        assert_eq!(status, StatusCode::OK, "onboarding failed: {body}");
        body
    }
}

/// A complete onboarding body for `tenant`.
#[must_use]
pub fn connection_request(tenant: i32) -> serde_json::Value {
    serde_json::json!({
        "companyId": tenant,
        "inventoryServiceUrl": "http://inventory:8080/",
        "websiteUrl": "https://shop.example",
        "websiteKey": "ck_live",
        "websiteSecret": "cs_live",
    })
}

/// An inventory product of [`TENANT`].
#[must_use]
pub fn inventory_product(
    id: i32,
    barcode: &str,
    name: &str,
    price: Decimal,
    stock: Decimal,
) -> InventoryProduct {
    InventoryProduct {
        id: InventoryProductId::new(id),
        tenant: Some(TenantId::new(TENANT)),
        barcode: barcode.to_string(),
        name: name.to_string(),
        uom: None,
        price: Some(price),
        stock: Some(stock),
        visible: true,
    }
}

/// A visible storefront listing.
#[must_use]
pub fn storefront_product(
    id: i32,
    barcode: &str,
    name: &str,
    price: Decimal,
    stock: Decimal,
) -> StorefrontProduct {
    StorefrontProduct {
        id: StorefrontProductId::new(id),
        tenant: None,
        barcode: barcode.to_string(),
        name: name.to_string(),
        uom: None,
        price: Some(price),
        stock: Some(stock),
        visible: true,
    }
}

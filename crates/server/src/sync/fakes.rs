//! Recording fakes for the remote ports.
//!
//! Compiled for unit tests and behind the `test-support` feature so the
//! integration tests can drive the engine and the router without network
//! access.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use catalog_sync_core::{
    FieldUpdate, InventoryProduct, ProductDraft, ProductPatch, StorefrontProduct,
    StorefrontProductId, TenantId,
};

use super::error::RemoteError;
use super::model::Connection;
use super::ports::{InventoryClient, NotificationSink, StorefrontClient};

fn injected(system: &'static str) -> RemoteError {
    RemoteError::Api {
        system,
        status: 503,
        message: "injected failure".to_string(),
    }
}

/// Inventory catalog held in memory.
#[derive(Default)]
pub struct FakeInventory {
    products: Mutex<Vec<InventoryProduct>>,
    lookups: Mutex<usize>,
}

impl FakeInventory {
    #[must_use]
    pub fn new(products: Vec<InventoryProduct>) -> Self {
        Self {
            products: Mutex::new(products),
            lookups: Mutex::new(0),
        }
    }

    /// Number of lookups served so far.
    pub async fn lookups(&self) -> usize {
        *self.lookups.lock().await
    }

    async fn find_by(
        &self,
        connection: &Connection,
        matches: impl Fn(&InventoryProduct) -> bool + Send,
    ) -> Option<InventoryProduct> {
        *self.lookups.lock().await += 1;
        self.products
            .lock()
            .await
            .iter()
            .filter(|p| p.tenant.is_none_or(|t| t == connection.tenant_id))
            .find(|p| matches(p))
            .cloned()
    }
}

#[async_trait]
impl InventoryClient for FakeInventory {
    async fn find_by_barcode(
        &self,
        connection: &Connection,
        barcode: &str,
    ) -> Result<Option<InventoryProduct>, RemoteError> {
        Ok(self
            .find_by(connection, |p| {
                catalog_sync_core::eq_ignore_case(&p.barcode, barcode)
            })
            .await)
    }

    async fn find_by_name(
        &self,
        connection: &Connection,
        name: &str,
    ) -> Result<Option<InventoryProduct>, RemoteError> {
        Ok(self
            .find_by(connection, |p| catalog_sync_core::eq_ignore_case(&p.name, name))
            .await)
    }
}

/// A mutation the fake storefront received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontCall {
    Create(ProductDraft),
    Replace(StorefrontProduct),
    Patch(ProductPatch),
    Hide(StorefrontProductId),
}

#[derive(Default)]
struct StorefrontState {
    products: Vec<StorefrontProduct>,
    calls: Vec<StorefrontCall>,
    failing: BTreeSet<StorefrontProductId>,
    fail_listing: bool,
    fail_mutations: bool,
    next_id: i32,
}

/// Storefront catalog held in memory that records every mutation.
#[derive(Default)]
pub struct FakeStorefront {
    state: Mutex<StorefrontState>,
}

impl FakeStorefront {
    #[must_use]
    pub fn new(products: Vec<StorefrontProduct>) -> Self {
        let next_id = products.iter().map(|p| p.id.get()).max().unwrap_or(0);
        Self {
            state: Mutex::new(StorefrontState {
                products,
                next_id,
                ..StorefrontState::default()
            }),
        }
    }

    /// Make every mutation of `id` fail.
    pub async fn fail_product(&self, id: StorefrontProductId) {
        self.state.lock().await.failing.insert(id);
    }

    /// Make the catalog listing fail.
    pub async fn fail_listing(&self) {
        self.state.lock().await.fail_listing = true;
    }

    /// Make every mutation fail, including creates.
    pub async fn fail_mutations(&self) {
        self.state.lock().await.fail_mutations = true;
    }

    /// Mutations received so far, in order.
    pub async fn calls(&self) -> Vec<StorefrontCall> {
        self.state.lock().await.calls.clone()
    }

    /// Current state of a product.
    pub async fn product(&self, id: StorefrontProductId) -> Option<StorefrontProduct> {
        self.state
            .lock()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    async fn mutate(
        &self,
        call: StorefrontCall,
        id: StorefrontProductId,
        apply: impl FnOnce(&mut StorefrontProduct) + Send,
    ) -> Result<StorefrontProduct, RemoteError> {
        let mut state = self.state.lock().await;
        state.calls.push(call);
        if state.fail_mutations || state.failing.contains(&id) {
            return Err(injected("storefront"));
        }
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RemoteError::Api {
                system: "storefront",
                status: 404,
                message: format!("product {id} not found"),
            })?;
        apply(product);
        Ok(product.clone())
    }
}

#[async_trait]
impl StorefrontClient for FakeStorefront {
    async fn list_all_products(
        &self,
        _connection: &Connection,
    ) -> Result<Vec<StorefrontProduct>, RemoteError> {
        let state = self.state.lock().await;
        if state.fail_listing {
            return Err(injected("storefront"));
        }
        Ok(state.products.clone())
    }

    async fn create_product(
        &self,
        _connection: &Connection,
        draft: &ProductDraft,
    ) -> Result<StorefrontProduct, RemoteError> {
        let mut state = self.state.lock().await;
        state.calls.push(StorefrontCall::Create(draft.clone()));
        if state.fail_mutations {
            return Err(injected("storefront"));
        }
        state.next_id += 1;
        let product = StorefrontProduct {
            id: StorefrontProductId::new(state.next_id),
            tenant: None,
            barcode: draft.barcode.clone(),
            name: draft.name.clone(),
            uom: draft.uom.map(|u| u.canonical_id().to_string()),
            price: draft.price,
            stock: None,
            visible: false,
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn replace_product(
        &self,
        _connection: &Connection,
        product: &StorefrontProduct,
    ) -> Result<StorefrontProduct, RemoteError> {
        let replacement = product.clone();
        self.mutate(StorefrontCall::Replace(product.clone()), product.id, |p| {
            p.barcode = replacement.barcode;
            p.name = replacement.name;
            p.price = replacement.price;
            p.stock = replacement.stock;
        })
        .await
    }

    async fn patch_product(
        &self,
        _connection: &Connection,
        patch: &ProductPatch,
    ) -> Result<StorefrontProduct, RemoteError> {
        let (price, stock) = (patch.price, patch.stock);
        self.mutate(StorefrontCall::Patch(patch.clone()), patch.id, |p| {
            match price {
                FieldUpdate::Keep => {}
                FieldUpdate::Clear => p.price = None,
                FieldUpdate::Set(v) => p.price = Some(v),
            }
            match stock {
                FieldUpdate::Keep => {}
                FieldUpdate::Clear => p.stock = None,
                FieldUpdate::Set(v) => p.stock = Some(v),
            }
        })
        .await
    }

    async fn hide_product(
        &self,
        _connection: &Connection,
        id: StorefrontProductId,
    ) -> Result<StorefrontProduct, RemoteError> {
        self.mutate(StorefrontCall::Hide(id), id, |p| p.visible = false)
            .await
    }
}

/// Notification sink that keeps every message.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(TenantId, String)>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages published so far, in order.
    pub async fn messages(&self) -> Vec<(TenantId, String)> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn publish(&self, tenant: TenantId, text: &str) {
        self.messages.lock().await.push((tenant, text.to_string()));
    }
}

//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (database ping)
//!
//! # Connections
//! POST   /sync                    - Create a connection and reconcile its catalog
//! GET    /sync                    - List connections
//! PUT    /sync/{id}               - Update URLs/credentials
//! DELETE /sync/{id}               - Delete a connection and its sync lines
//! GET    /sync/{id}/lines         - List sync lines of a connection
//!
//! # Inventory events
//! POST   /update/createProduct    - Mirror a new inventory product
//! POST   /update/deleteProduct    - Hide a mirrored product and unlink it
//! POST   /update/price            - Propagate a price change
//! POST   /update/stock            - Propagate a stock change
//! POST   /update/name             - Report a rename to the tenant
//! ```

pub mod health;
pub mod sync;
pub mod update;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the connection administration router.
pub fn sync_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sync::index).post(sync::create))
        .route("/{id}", put(sync::update).delete(sync::delete))
        .route("/{id}/lines", get(sync::lines))
}

/// Create the inventory event router.
pub fn update_routes() -> Router<AppState> {
    Router::new()
        .route("/createProduct", post(update::create_product))
        .route("/deleteProduct", post(update::delete_product))
        .route("/price", post(update::price))
        .route("/stock", post(update::stock))
        .route("/name", post(update::name))
}

/// Build the full application router with state applied.
///
/// Observability layers are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/sync", sync_routes())
        .nest("/update", update_routes())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::sync::fakes::{FakeInventory, FakeStorefront, RecordingNotifier};
    use crate::sync::{MemoryStore, SyncPorts};

    fn memory_app() -> Router {
        let store = Arc::new(MemoryStore::new());
        app(AppState::new(
            SyncPorts {
                connections: store.clone(),
                index: store,
                inventory: Arc::new(FakeInventory::default()),
                storefront: Arc::new(FakeStorefront::default()),
                notifications: Arc::new(RecordingNotifier::new()),
            },
            None,
        ))
    }

    async fn status_of(method: &str, uri: &str, body: &str) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        memory_app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_health_without_pool_is_ready() {
        assert_eq!(status_of("GET", "/health", "").await, StatusCode::OK);
        assert_eq!(status_of("GET", "/health/ready", "").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_for_unknown_tenant_is_ok() {
        let status = status_of(
            "POST",
            "/update/stock",
            r#"{"companyId":5,"productId":1,"stock":3}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        assert_eq!(status_of("GET", "/nope", "").await, StatusCode::NOT_FOUND);
    }
}

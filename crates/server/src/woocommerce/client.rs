//! WooCommerce storefront client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use secrecy::ExposeSecret;
use tracing::instrument;

use catalog_sync_core::{ProductDraft, ProductPatch, StorefrontProduct, StorefrontProductId};

use super::types::{ProductEnvelope, ProductList, WooProduct, WooProductBody};
use crate::http::{endpoint, handle_response, parse_error};
use crate::sync::{Connection, RemoteError, StorefrontClient};

const SYSTEM: &str = "storefront";

/// Legacy REST API root, relative to the storefront URL.
const PRODUCTS_PATH: &str = "/wc-api/v2/products";

/// Header carrying the page count of a listing.
const TOTAL_PAGES_HEADER: &str = "X-WC-TotalPages";

/// WooCommerce client. Credentials come from the connection on every call.
#[derive(Clone)]
pub struct WooCommerceClient {
    inner: Arc<WooCommerceClientInner>,
}

struct WooCommerceClientInner {
    client: reqwest::Client,
}

impl WooCommerceClient {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(WooCommerceClientInner { client }),
        }
    }

    /// Attach HTTP Basic auth when the connection carries credentials.
    fn authorize(request: RequestBuilder, connection: &Connection) -> RequestBuilder {
        match (&connection.storefront_key, &connection.storefront_secret) {
            (Some(key), Some(secret)) => {
                request.basic_auth(key.expose_secret(), Some(secret.expose_secret()))
            }
            _ => request,
        }
    }

    async fn put(
        &self,
        connection: &Connection,
        id: StorefrontProductId,
        body: WooProductBody,
    ) -> Result<StorefrontProduct, RemoteError> {
        let url = endpoint(
            SYSTEM,
            &connection.storefront_url,
            &format!("{PRODUCTS_PATH}/{id}"),
            &[],
        )?;
        let request = self
            .inner
            .client
            .put(url)
            .json(&ProductEnvelope { product: body });
        let response = Self::authorize(request, connection).send().await?;
        let envelope: ProductEnvelope<WooProduct> = handle_response(SYSTEM, response).await?;
        Ok(envelope.product.into())
    }
}

#[async_trait]
impl StorefrontClient for WooCommerceClient {
    #[instrument(skip(self, connection), fields(tenant_id = %connection.tenant_id))]
    async fn list_all_products(
        &self,
        connection: &Connection,
    ) -> Result<Vec<StorefrontProduct>, RemoteError> {
        let mut products = Vec::new();
        let mut page: u32 = 1;
        let mut total_pages: u32 = 1;

        loop {
            let page_param = page.to_string();
            let url = endpoint(
                SYSTEM,
                &connection.storefront_url,
                PRODUCTS_PATH,
                &[("page", page_param.as_str())],
            )?;
            let request = self.inner.client.get(url);
            let response = Self::authorize(request, connection).send().await?;

            if !response.status().is_success() {
                return Err(parse_error(SYSTEM, response).await);
            }
            if let Some(total) = response
                .headers()
                .get(TOTAL_PAGES_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
            {
                total_pages = total;
            }

            let list: ProductList = handle_response(SYSTEM, response).await?;
            products.extend(list.products.into_iter().map(StorefrontProduct::from));

            page += 1;
            if page > total_pages {
                break;
            }
        }

        tracing::debug!(count = products.len(), pages = total_pages, "Listed storefront catalog");
        Ok(products)
    }

    #[instrument(skip(self, connection, draft), fields(tenant_id = %connection.tenant_id))]
    async fn create_product(
        &self,
        connection: &Connection,
        draft: &ProductDraft,
    ) -> Result<StorefrontProduct, RemoteError> {
        let url = endpoint(SYSTEM, &connection.storefront_url, PRODUCTS_PATH, &[])?;
        let request = self.inner.client.post(url).json(&ProductEnvelope {
            product: WooProductBody::create(draft),
        });
        let response = Self::authorize(request, connection).send().await?;
        let envelope: ProductEnvelope<WooProduct> = handle_response(SYSTEM, response).await?;
        Ok(envelope.product.into())
    }

    #[instrument(skip(self, connection, product), fields(storefront_id = %product.id))]
    async fn replace_product(
        &self,
        connection: &Connection,
        product: &StorefrontProduct,
    ) -> Result<StorefrontProduct, RemoteError> {
        self.put(connection, product.id, WooProductBody::replace(product))
            .await
    }

    #[instrument(skip(self, connection, patch), fields(storefront_id = %patch.id))]
    async fn patch_product(
        &self,
        connection: &Connection,
        patch: &ProductPatch,
    ) -> Result<StorefrontProduct, RemoteError> {
        self.put(connection, patch.id, WooProductBody::patch(patch))
            .await
    }

    #[instrument(skip(self, connection), fields(storefront_id = %id))]
    async fn hide_product(
        &self,
        connection: &Connection,
        id: StorefrontProductId,
    ) -> Result<StorefrontProduct, RemoteError> {
        self.put(connection, id, WooProductBody::hide()).await
    }
}

impl std::fmt::Debug for WooCommerceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooCommerceClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode, header},
        response::{IntoResponse, Response},
        routing::get,
    };
    use chrono::Utc;
    use secrecy::SecretString;
    use serde::Deserialize;
    use serde_json::json;

    use catalog_sync_core::{ConnectionId, TenantId};

    use super::*;

    #[derive(Deserialize)]
    struct PageQuery {
        page: u32,
    }

    fn page_body(page: u32) -> serde_json::Value {
        let first = i32::try_from(page).unwrap() * 10;
        json!({
            "products": [
                {"id": first, "sku": format!("sku-{first}"), "title": "cement", "regular_price": "27"},
                {"id": first + 1, "sku": format!("sku-{}", first + 1), "title": "sand", "regular_price": "12"}
            ]
        })
    }

    async fn two_pages(headers: HeaderMap, Query(query): Query<PageQuery>) -> Response {
        if !headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("Basic "))
        {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        ([(TOTAL_PAGES_HEADER, "2")], Json(page_body(query.page))).into_response()
    }

    async fn second_page_fails(Query(query): Query<PageQuery>) -> Response {
        if query.page > 1 {
            return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
        }
        ([(TOTAL_PAGES_HEADER, "2")], Json(page_body(query.page))).into_response()
    }

    async fn no_page_count(Query(query): Query<PageQuery>) -> Json<serde_json::Value> {
        Json(page_body(query.page))
    }

    async fn garbled_page_count(Query(query): Query<PageQuery>) -> Response {
        ([(TOTAL_PAGES_HEADER, "many")], Json(page_body(query.page))).into_response()
    }

    /// Serve `router` on an ephemeral port and return a connection pointing at it.
    async fn serve(router: Router) -> Connection {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let now = Utc::now();
        Connection {
            id: ConnectionId::new(1),
            tenant_id: TenantId::new(1),
            inventory_url: "http://inventory.invalid".to_string(),
            storefront_url: format!("http://{addr}"),
            storefront_key: Some(SecretString::from("ck".to_string())),
            storefront_secret: Some(SecretString::from("cs".to_string())),
            created_at: now,
            updated_at: now,
        }
    }

    fn client() -> WooCommerceClient {
        WooCommerceClient::new(reqwest::Client::builder().no_proxy().build().unwrap())
    }

    #[tokio::test]
    async fn test_listing_walks_every_page_in_order() {
        let connection = serve(Router::new().route(PRODUCTS_PATH, get(two_pages))).await;

        let products = client().list_all_products(&connection).await.unwrap();

        let ids: Vec<i32> = products.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![10, 11, 20, 21]);
        assert_eq!(products.first().map(|p| p.barcode.as_str()), Some("sku-10"));
    }

    #[tokio::test]
    async fn test_listing_aborts_on_failed_page() {
        let connection = serve(Router::new().route(PRODUCTS_PATH, get(second_page_fails))).await;

        let err = client().list_all_products(&connection).await.unwrap_err();

        assert!(matches!(err, RemoteError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_listing_stops_without_usable_page_count() {
        for router in [
            Router::new().route(PRODUCTS_PATH, get(no_page_count)),
            Router::new().route(PRODUCTS_PATH, get(garbled_page_count)),
        ] {
            let connection = serve(router).await;

            let products = client().list_all_products(&connection).await.unwrap();

            let ids: Vec<i32> = products.iter().map(|p| p.id.get()).collect();
            assert_eq!(ids, vec![10, 11]);
        }
    }
}

//! Inventory service client.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use catalog_sync_core::InventoryProduct;

use super::types::SearchResult;
use crate::http::{endpoint, handle_response};
use crate::sync::{Connection, InventoryClient, RemoteError};

const SYSTEM: &str = "inventory";

const BY_BARCODE_PATH: &str = "/products/search/findByCompanyIdAndBarcode";
const BY_NAME_PATH: &str = "/products/search/findByCompanyIdAndNameIgnoreCase";

/// HAL client for the inventory service's product search endpoints.
#[derive(Clone)]
pub struct HalInventoryClient {
    inner: Arc<HalInventoryClientInner>,
}

struct HalInventoryClientInner {
    client: reqwest::Client,
}

impl HalInventoryClient {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(HalInventoryClientInner { client }),
        }
    }

    async fn search(
        &self,
        connection: &Connection,
        path: &str,
        key: &str,
        value: &str,
    ) -> Result<Option<InventoryProduct>, RemoteError> {
        let company = connection.tenant_id.to_string();
        let url = endpoint(
            SYSTEM,
            &connection.inventory_url,
            path,
            &[("companyId", company.as_str()), (key, value)],
        )?;
        let response = self
            .inner
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/hal+json")
            .send()
            .await?;

        // Spring Data REST answers an empty search with 404 on some versions
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let result: SearchResult = handle_response(SYSTEM, response).await?;
        Ok(result.into_first())
    }
}

#[async_trait]
impl InventoryClient for HalInventoryClient {
    #[instrument(skip(self, connection), fields(tenant_id = %connection.tenant_id))]
    async fn find_by_barcode(
        &self,
        connection: &Connection,
        barcode: &str,
    ) -> Result<Option<InventoryProduct>, RemoteError> {
        self.search(connection, BY_BARCODE_PATH, "barcode", barcode)
            .await
    }

    #[instrument(skip(self, connection), fields(tenant_id = %connection.tenant_id))]
    async fn find_by_name(
        &self,
        connection: &Connection,
        name: &str,
    ) -> Result<Option<InventoryProduct>, RemoteError> {
        self.search(connection, BY_NAME_PATH, "name", name).await
    }
}

impl std::fmt::Debug for HalInventoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HalInventoryClient").finish_non_exhaustive()
    }
}

//! Notification service adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use catalog_sync_core::TenantId;

use crate::http::{endpoint, parse_error};
use crate::sync::{NotificationSink, RemoteError};

const SYSTEM: &str = "notifications";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateNotification<'a> {
    company_id: TenantId,
    notification: &'a str,
}

/// Posts tenant notifications to the notification service.
///
/// Delivery is best effort: failures are logged at `warn` and dropped.
#[derive(Clone)]
pub struct HttpNotificationSink {
    inner: Arc<HttpNotificationSinkInner>,
}

struct HttpNotificationSinkInner {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotificationSink {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            inner: Arc::new(HttpNotificationSinkInner { client, base_url }),
        }
    }

    async fn send(&self, tenant: TenantId, text: &str) -> Result<(), RemoteError> {
        let url = endpoint(SYSTEM, &self.inner.base_url, "/notification", &[])?;
        let response = self
            .inner
            .client
            .post(url)
            .json(&CreateNotification {
                company_id: tenant,
                notification: text,
            })
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(parse_error(SYSTEM, response).await)
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    async fn publish(&self, tenant: TenantId, text: &str) {
        if let Err(e) = self.send(tenant, text).await {
            tracing::warn!(tenant_id = %tenant, error = %e, "Failed to deliver notification");
        }
    }
}

impl std::fmt::Debug for HttpNotificationSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpNotificationSink")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_body_shape() {
        let body = serde_json::to_value(CreateNotification {
            company_id: TenantId::new(1),
            notification: "Product name changed",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"companyId": 1, "notification": "Product name changed"})
        );
    }

    #[tokio::test]
    async fn test_publish_swallows_unreachable_service() {
        let client = crate::http::build_client(std::time::Duration::from_millis(200)).unwrap();
        let sink = HttpNotificationSink::new(client, "http://127.0.0.1:9".to_string());
        sink.publish(TenantId::new(1), "hello").await;
    }
}

//! Persisted records: tenant connections and sync lines.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use catalog_sync_core::{
    ConnectionId, InventoryProductId, StorefrontProductId, SyncLineId, TenantId,
};

use super::error::SyncError;

/// A tenant's link between one inventory service and one storefront.
#[derive(Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub tenant_id: TenantId,
    /// Base URL of the inventory service.
    pub inventory_url: String,
    /// Base URL of the storefront.
    pub storefront_url: String,
    /// Storefront API key.
    pub storefront_key: Option<SecretString>,
    /// Storefront API secret.
    pub storefront_secret: Option<SecretString>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("tenant_id", &self.tenant_id)
            .field("inventory_url", &self.inventory_url)
            .field("storefront_url", &self.storefront_url)
            .field("storefront_key", &self.storefront_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "storefront_secret",
                &self.storefront_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Public view of this connection, without credentials.
    #[must_use]
    pub fn view(&self) -> ConnectionView {
        ConnectionView {
            id: self.id,
            tenant_id: self.tenant_id,
            inventory_service_url: self.inventory_url.clone(),
            website_url: self.storefront_url.clone(),
            has_credentials: self.storefront_key.is_some() && self.storefront_secret.is_some(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Connection as exposed over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionView {
    pub id: ConnectionId,
    #[serde(rename = "companyId")]
    pub tenant_id: TenantId,
    pub inventory_service_url: String,
    pub website_url: String,
    pub has_credentials: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Onboarding request for a tenant.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConnection {
    #[serde(rename = "companyId")]
    pub tenant_id: Option<TenantId>,
    #[serde(default)]
    pub inventory_service_url: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub website_key: Option<SecretString>,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub website_secret: Option<SecretString>,
}

impl std::fmt::Debug for NewConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewConnection")
            .field("tenant_id", &self.tenant_id)
            .field("inventory_service_url", &self.inventory_service_url)
            .field("website_url", &self.website_url)
            .finish_non_exhaustive()
    }
}

/// A connection that passed validation and is ready to insert.
#[derive(Clone)]
pub struct ValidConnection {
    pub tenant_id: TenantId,
    pub inventory_url: String,
    pub storefront_url: String,
    pub storefront_key: Option<SecretString>,
    pub storefront_secret: Option<SecretString>,
}

impl std::fmt::Debug for ValidConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidConnection")
            .field("tenant_id", &self.tenant_id)
            .field("inventory_url", &self.inventory_url)
            .field("storefront_url", &self.storefront_url)
            .field("storefront_key", &self.storefront_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "storefront_secret",
                &self.storefront_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl NewConnection {
    /// Check required fields and URL syntax.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Validation` naming the first offending field.
    pub fn validate(self) -> Result<ValidConnection, SyncError> {
        let tenant_id = self
            .tenant_id
            .ok_or_else(|| SyncError::validation("companyId", "required"))?;
        let inventory_url = validate_url("inventoryServiceUrl", &self.inventory_service_url)?;
        let storefront_url = validate_url("websiteUrl", &self.website_url)?;

        Ok(ValidConnection {
            tenant_id,
            inventory_url,
            storefront_url,
            storefront_key: self.website_key,
            storefront_secret: self.website_secret,
        })
    }
}

/// Read an optional credential straight into a `SecretString`. Blank values
/// count as absent.
fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from))
}

fn validate_url(field: &'static str, value: &str) -> Result<String, SyncError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SyncError::validation(field, "required"));
    }
    url::Url::parse(value).map_err(|e| SyncError::validation(field, &e.to_string()))?;
    Ok(value.trim_end_matches('/').to_string())
}

/// Administrative update of a connection. Absent fields are left as-is.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionUpdate {
    pub inventory_service_url: Option<String>,
    pub website_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub website_key: Option<SecretString>,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub website_secret: Option<SecretString>,
}

impl ConnectionUpdate {
    /// Validate any URLs present in the update.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Validation` for an empty or unparseable URL.
    pub fn validate(mut self) -> Result<Self, SyncError> {
        if let Some(url) = self.inventory_service_url.take() {
            self.inventory_service_url = Some(validate_url("inventoryServiceUrl", &url)?);
        }
        if let Some(url) = self.website_url.take() {
            self.website_url = Some(validate_url("websiteUrl", &url)?);
        }
        Ok(self)
    }

    /// Apply this update to a connection in place.
    pub fn apply(self, connection: &mut Connection) {
        if let Some(url) = self.inventory_service_url {
            connection.inventory_url = url;
        }
        if let Some(url) = self.website_url {
            connection.storefront_url = url;
        }
        if let Some(key) = self.website_key {
            connection.storefront_key = Some(key);
        }
        if let Some(secret) = self.website_secret {
            connection.storefront_secret = Some(secret);
        }
    }
}

impl std::fmt::Debug for ConnectionUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionUpdate")
            .field("inventory_service_url", &self.inventory_service_url)
            .field("website_url", &self.website_url)
            .finish_non_exhaustive()
    }
}

/// Persisted link between an inventory product and a storefront product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncLine {
    pub id: SyncLineId,
    pub connection_id: ConnectionId,
    pub product_id: InventoryProductId,
    pub storefront_id: StorefrontProductId,
    /// Storefront display name, cached only when it diverged from inventory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storefront_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A sync line before insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSyncLine {
    pub connection_id: ConnectionId,
    pub product_id: InventoryProductId,
    pub storefront_id: StorefrontProductId,
    pub storefront_name: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn request(json: &str) -> NewConnection {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        let valid = request(
            r#"{"companyId":1,"inventoryServiceUrl":"http://inventory:8080/","websiteUrl":"https://shop.example","websiteKey":"ck","websiteSecret":"cs"}"#,
        )
        .validate()
        .unwrap();
        assert_eq!(valid.tenant_id, TenantId::new(1));
        assert_eq!(valid.inventory_url, "http://inventory:8080");
        let debug = format!("{valid:?}");
        assert!(!debug.contains("\"ck\""));
        assert!(!debug.contains("\"cs\""));
        assert!(debug.contains("[REDACTED]"));
        assert_eq!(valid.storefront_key.unwrap().expose_secret(), "ck");
    }

    #[test]
    fn test_validate_names_missing_field() {
        let err = request(r#"{"companyId":1,"websiteUrl":"https://shop.example"}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            SyncError::Validation { field: "inventoryServiceUrl", .. }
        ));

        let err = request(r#"{"inventoryServiceUrl":"http://a","websiteUrl":"http://b"}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SyncError::Validation { field: "companyId", .. }));
    }

    #[test]
    fn test_validate_rejects_unparseable_url() {
        let err = request(r#"{"companyId":1,"inventoryServiceUrl":"http://a","websiteUrl":"not a url"}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SyncError::Validation { field: "websiteUrl", .. }));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let now = Utc::now();
        let connection = Connection {
            id: ConnectionId::new(1),
            tenant_id: TenantId::new(1),
            inventory_url: "http://inventory".to_string(),
            storefront_url: "https://shop".to_string(),
            storefront_key: Some(SecretString::from("ck_live".to_string())),
            storefront_secret: Some(SecretString::from("cs_live".to_string())),
            created_at: now,
            updated_at: now,
        };
        let debug = format!("{connection:?}");
        assert!(!debug.contains("ck_live"));
        assert!(!debug.contains("cs_live"));

        let view = serde_json::to_value(connection.view()).unwrap();
        assert_eq!(view["companyId"], 1);
        assert_eq!(view["hasCredentials"], true);
        assert!(view.get("websiteKey").is_none());
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let now = Utc::now();
        let mut connection = Connection {
            id: ConnectionId::new(1),
            tenant_id: TenantId::new(1),
            inventory_url: "http://inventory".to_string(),
            storefront_url: "https://shop".to_string(),
            storefront_key: None,
            storefront_secret: None,
            created_at: now,
            updated_at: now,
        };
        let update: ConnectionUpdate =
            serde_json::from_str(r#"{"websiteUrl":"https://new-shop/"}"#).unwrap();
        update.validate().unwrap().apply(&mut connection);
        assert_eq!(connection.storefront_url, "https://new-shop");
        assert_eq!(connection.inventory_url, "http://inventory");
    }
}

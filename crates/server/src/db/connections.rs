//! Connection repository for database operations.
//!
//! One row per tenant; the unique constraint on `tenant_id` is what enforces
//! the single-connection rule under concurrent onboarding.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use catalog_sync_core::{ConnectionId, TenantId};

use super::RepositoryError;
use crate::sync::model::{Connection, ConnectionUpdate, ValidConnection};
use crate::sync::ports::ConnectionRegistry;

const COLUMNS: &str = "id, tenant_id, inventory_url, storefront_url, storefront_key, \
                       storefront_secret, created_at, updated_at";

/// Internal row type for database queries.
#[derive(sqlx::FromRow)]
struct ConnectionRow {
    id: ConnectionId,
    tenant_id: TenantId,
    inventory_url: String,
    storefront_url: String,
    storefront_key: Option<String>,
    storefront_secret: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ConnectionRow> for Connection {
    fn from(row: ConnectionRow) -> Self {
        Self {
            id: row.id,
            tenant_id: row.tenant_id,
            inventory_url: row.inventory_url,
            storefront_url: row.storefront_url,
            storefront_key: row.storefront_key.map(SecretString::from),
            storefront_secret: row.storefront_secret.map(SecretString::from),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn expose(secret: Option<&SecretString>) -> Option<&str> {
    secret.map(ExposeSecret::expose_secret)
}

/// Repository for tenant connections.
#[derive(Clone)]
pub struct ConnectionRepository {
    pool: PgPool,
}

impl ConnectionRepository {
    /// Create a new connection repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionRegistry for ConnectionRepository {
    async fn find_by_tenant(
        &self,
        tenant: TenantId,
    ) -> Result<Option<Connection>, RepositoryError> {
        let row = sqlx::query_as::<_, ConnectionRow>(&format!(
            "SELECT {COLUMNS} FROM sync.connections WHERE tenant_id = $1"
        ))
        .bind(tenant)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find(&self, id: ConnectionId) -> Result<Option<Connection>, RepositoryError> {
        let row = sqlx::query_as::<_, ConnectionRow>(&format!(
            "SELECT {COLUMNS} FROM sync.connections WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Connection>, RepositoryError> {
        let rows = sqlx::query_as::<_, ConnectionRow>(&format!(
            "SELECT {COLUMNS} FROM sync.connections ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, connection: ValidConnection) -> Result<Connection, RepositoryError> {
        let row = sqlx::query_as::<_, ConnectionRow>(&format!(
            r"
            INSERT INTO sync.connections
                (tenant_id, inventory_url, storefront_url, storefront_key, storefront_secret)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "
        ))
        .bind(connection.tenant_id)
        .bind(&connection.inventory_url)
        .bind(&connection.storefront_url)
        .bind(expose(connection.storefront_key.as_ref()))
        .bind(expose(connection.storefront_secret.as_ref()))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: ConnectionId,
        update: ConnectionUpdate,
    ) -> Result<Connection, RepositoryError> {
        let row = sqlx::query_as::<_, ConnectionRow>(&format!(
            r"
            UPDATE sync.connections SET
                inventory_url = COALESCE($2, inventory_url),
                storefront_url = COALESCE($3, storefront_url),
                storefront_key = COALESCE($4, storefront_key),
                storefront_secret = COALESCE($5, storefront_secret),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(update.inventory_service_url.as_deref())
        .bind(update.website_url.as_deref())
        .bind(expose(update.website_key.as_ref()))
        .bind(expose(update.website_secret.as_ref()))
        .fetch_optional(&self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: ConnectionId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM sync.connections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

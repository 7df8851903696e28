//! Sync line repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use catalog_sync_core::{ConnectionId, InventoryProductId, StorefrontProductId, SyncLineId};

use super::RepositoryError;
use crate::sync::model::{NewSyncLine, SyncLine};
use crate::sync::ports::SyncIndex;

const COLUMNS: &str = "id, connection_id, product_id, storefront_id, storefront_name, created_at";

#[derive(sqlx::FromRow)]
struct SyncLineRow {
    id: SyncLineId,
    connection_id: ConnectionId,
    product_id: InventoryProductId,
    storefront_id: StorefrontProductId,
    storefront_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SyncLineRow> for SyncLine {
    fn from(row: SyncLineRow) -> Self {
        Self {
            id: row.id,
            connection_id: row.connection_id,
            product_id: row.product_id,
            storefront_id: row.storefront_id,
            storefront_name: row.storefront_name,
            created_at: row.created_at,
        }
    }
}

/// Repository for sync lines.
#[derive(Clone)]
pub struct SyncLineRepository {
    pool: PgPool,
}

impl SyncLineRepository {
    /// Create a new sync line repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SyncIndex for SyncLineRepository {
    async fn find(
        &self,
        connection: ConnectionId,
        product: InventoryProductId,
    ) -> Result<Option<SyncLine>, RepositoryError> {
        let row = sqlx::query_as::<_, SyncLineRow>(&format!(
            "SELECT {COLUMNS} FROM sync.sync_lines WHERE connection_id = $1 AND product_id = $2"
        ))
        .bind(connection)
        .bind(product)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_for_connection(
        &self,
        connection: ConnectionId,
    ) -> Result<Vec<SyncLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, SyncLineRow>(&format!(
            "SELECT {COLUMNS} FROM sync.sync_lines WHERE connection_id = $1 ORDER BY id"
        ))
        .bind(connection)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, line: NewSyncLine) -> Result<SyncLine, RepositoryError> {
        let row = sqlx::query_as::<_, SyncLineRow>(&format!(
            r"
            INSERT INTO sync.sync_lines (connection_id, product_id, storefront_id, storefront_name)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "
        ))
        .bind(line.connection_id)
        .bind(line.product_id)
        .bind(line.storefront_id)
        .bind(line.storefront_name.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete(
        &self,
        connection: ConnectionId,
        product: InventoryProductId,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM sync.sync_lines WHERE connection_id = $1 AND product_id = $2")
                .bind(connection)
                .bind(product)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! Unified error handling for the HTTP surface.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::sync::SyncError;

/// Application-level error type for route handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Sync engine failure.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Database operation failed outside the engine.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(RepositoryError::Database(_))
                | Self::Sync(SyncError::Repository(RepositoryError::Database(_)))
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Sync(SyncError::Validation { .. }) => StatusCode::BAD_REQUEST,
            Self::Sync(
                SyncError::DuplicateConnection(_)
                | SyncError::DuplicateSyncLine { .. }
                | SyncError::Repository(RepositoryError::Conflict(_)),
            )
            | Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Sync(SyncError::Remote(_)) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_)
            | Self::Database(RepositoryError::NotFound)
            | Self::Sync(SyncError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            Self::Database(_) | Self::Sync(SyncError::Repository(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Sync request error"
            );
        } else if let Self::Sync(SyncError::Remote(e)) = &self {
            tracing::warn!(error = %e, "Remote system unavailable");
        }

        let status = self.status();

        // Validation errors name the offending field
        if let Self::Sync(SyncError::Validation { field, message }) = &self {
            let mut body = serde_json::Map::new();
            body.insert((*field).to_string(), serde_json::Value::from(message.as_str()));
            return (status, Json(serde_json::Value::Object(body))).into_response();
        }

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use catalog_sync_core::{InventoryProductId, TenantId};

    use super::*;
    use crate::sync::RemoteError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("connection 9".to_string());
        assert_eq!(err.to_string(), "Not found: connection 9");

        let err = AppError::from(SyncError::DuplicateConnection(TenantId::new(1)));
        assert_eq!(err.to_string(), "a connection already exists for company 1");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(SyncError::validation("websiteUrl", "required").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(SyncError::DuplicateConnection(TenantId::new(1)).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(
                SyncError::DuplicateSyncLine {
                    tenant_id: TenantId::new(1),
                    product_id: InventoryProductId::new(22),
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(
                SyncError::Remote(RemoteError::Api {
                    system: "storefront",
                    status: 503,
                    message: "down".to_string(),
                })
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Database(
                sqlx::Error::PoolTimedOut
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

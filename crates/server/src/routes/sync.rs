//! Connection administration route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use catalog_sync_core::ConnectionId;

use crate::db::RepositoryError;
use crate::error::AppError;
use crate::state::AppState;
use crate::sync::{Connection, ConnectionUpdate, ConnectionView, NewConnection, SyncLine};

/// Create a connection and reconcile the tenant's storefront catalog.
///
/// POST /sync
///
/// Responds with the plain-text reconciliation report.
///
/// # Errors
///
/// - 400 naming the missing or malformed field
/// - 409 if the tenant already has a connection
/// - 502 if the storefront catalog cannot be listed
#[instrument(skip(state, request))]
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<NewConnection>,
) -> Result<String, AppError> {
    let (_, report) = state.reconciler().create_connection(request).await?;
    Ok(report.to_string())
}

/// List all connections. Credentials are never included.
///
/// GET /sync
///
/// # Errors
///
/// Returns 500 if the registry cannot be read.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ConnectionView>>, AppError> {
    let connections = state.ports().connections.list().await?;
    Ok(Json(connections.iter().map(Connection::view).collect()))
}

/// Update a connection's URLs or credentials.
///
/// PUT /sync/{id}
///
/// # Errors
///
/// - 400 for an empty or malformed URL
/// - 404 if the connection does not exist
#[instrument(skip(state, update))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ConnectionId>,
    Json(update): Json<ConnectionUpdate>,
) -> Result<Json<ConnectionView>, AppError> {
    let update = update.validate()?;
    match state.ports().connections.update(id, update).await {
        Ok(connection) => {
            tracing::info!(tenant_id = %connection.tenant_id, "Connection updated");
            Ok(Json(connection.view()))
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("connection {id}"))),
        Err(e) => Err(e.into()),
    }
}

/// Delete a connection together with all of its sync lines.
///
/// DELETE /sync/{id}
///
/// # Errors
///
/// Returns 404 if the connection does not exist.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ConnectionId>,
) -> Result<StatusCode, AppError> {
    if state.ports().connections.delete(id).await? {
        tracing::info!("Connection deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("connection {id}")))
    }
}

/// List the sync lines of a connection.
///
/// GET /sync/{id}/lines
///
/// # Errors
///
/// Returns 404 if the connection does not exist.
pub async fn lines(
    State(state): State<AppState>,
    Path(id): Path<ConnectionId>,
) -> Result<Json<Vec<SyncLine>>, AppError> {
    if state.ports().connections.find(id).await?.is_none() {
        return Err(AppError::NotFound(format!("connection {id}")));
    }
    let lines = state.ports().index.list_for_connection(id).await?;
    Ok(Json(lines))
}

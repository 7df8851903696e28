//! Inventory event route handlers.
//!
//! Each handler maps the command outcome onto a status code: synced answers
//! 200 (with the storefront product when one was touched), a tenant or
//! product that is not mirrored answers 200 with an empty body, and a
//! storefront failure answers 202 so the event source does not retry
//! synchronously.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use catalog_sync_core::{CommandOutcome, SyncStatus};

use crate::error::AppError;
use crate::state::AppState;
use crate::sync::{CreateProduct, DeleteProduct, UpdateName, UpdatePrice, UpdateStock};

fn respond(outcome: CommandOutcome) -> Response {
    match (outcome.status, outcome.product) {
        (SyncStatus::Synced, Some(product)) => (StatusCode::OK, Json(product)).into_response(),
        (SyncStatus::Synced | SyncStatus::NotSynced, _) => StatusCode::OK.into_response(),
        (SyncStatus::Accepted, _) => StatusCode::ACCEPTED.into_response(),
    }
}

/// POST /update/createProduct
///
/// # Errors
///
/// Returns 409 if the product is already mirrored.
pub async fn create_product(
    State(state): State<AppState>,
    Json(command): Json<CreateProduct>,
) -> Result<Response, AppError> {
    Ok(respond(state.commands().create_product(command).await?))
}

/// POST /update/deleteProduct
///
/// # Errors
///
/// Returns 500 if the sync index cannot be read or written.
pub async fn delete_product(
    State(state): State<AppState>,
    Json(command): Json<DeleteProduct>,
) -> Result<Response, AppError> {
    Ok(respond(state.commands().delete_product(command).await?))
}

/// POST /update/price
///
/// # Errors
///
/// Returns 500 if the sync index cannot be read.
pub async fn price(
    State(state): State<AppState>,
    Json(command): Json<UpdatePrice>,
) -> Result<Response, AppError> {
    Ok(respond(state.commands().update_price(command).await?))
}

/// POST /update/stock
///
/// # Errors
///
/// Returns 500 if the sync index cannot be read.
pub async fn stock(
    State(state): State<AppState>,
    Json(command): Json<UpdateStock>,
) -> Result<Response, AppError> {
    Ok(respond(state.commands().update_stock(command).await?))
}

/// POST /update/name
///
/// # Errors
///
/// Returns 500 if the sync index cannot be read.
pub async fn name(
    State(state): State<AppState>,
    Json(command): Json<UpdateName>,
) -> Result<Response, AppError> {
    Ok(respond(state.commands().update_name(command).await?))
}

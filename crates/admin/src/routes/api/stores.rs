//! Store management endpoints. Every route requires the owner.
//!
//! ```text
//! GET    /api/stores               - the caller's stores
//! POST   /api/stores               - create a store
//! GET    /api/stores/{store_id}    - one store
//! PATCH  /api/stores/{store_id}    - rename
//! DELETE /api/stores/{store_id}    - delete (409 while products/categories exist)
//! ```

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use storedash_core::{STORE_CONFLICT_MESSAGE, Store, StoreInput, Validate};

use crate::db::{RepositoryError, StoreRepository};
use crate::error::{AppError, Result};
use crate::middleware::{OwnedStore, RequireOwner};
use crate::state::AppState;

fn body(payload: std::result::Result<Json<StoreInput>, JsonRejection>) -> Result<StoreInput> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

#[instrument(skip_all, fields(owner = %owner))]
async fn list(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
) -> Result<Json<Vec<Store>>> {
    let stores = StoreRepository::new(state.pool())
        .list_for_owner(&owner)
        .await?;
    Ok(Json(stores))
}

#[instrument(skip_all, fields(owner = %owner))]
async fn create(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    payload: std::result::Result<Json<StoreInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Store>)> {
    let valid = body(payload)?.validate()?;
    let store = StoreRepository::new(state.pool())
        .create(&owner, &valid)
        .await?;

    tracing::info!(store_id = %store.id, "Store created");
    Ok((StatusCode::CREATED, Json(store)))
}

#[instrument(skip_all, fields(store_id = %owned.store.id))]
async fn show(owned: OwnedStore) -> Json<Store> {
    Json(owned.store)
}

#[instrument(skip_all, fields(store_id = %store_id))]
async fn rename(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Path(store_id): Path<String>,
    payload: std::result::Result<Json<StoreInput>, JsonRejection>,
) -> Result<Json<Store>> {
    let valid = body(payload)?.validate()?;
    let owned = OwnedStore::resolve(&state, owner, &store_id)
        .await?
        .ok_or_else(|| AppError::NotFound("store".to_string()))?;

    let store = StoreRepository::new(state.pool())
        .rename(owned.id(), &owned.owner, &valid)
        .await?;
    Ok(Json(store))
}

#[instrument(skip_all, fields(store_id = %owned.store.id))]
async fn delete(State(state): State<AppState>, owned: OwnedStore) -> Result<StatusCode> {
    match StoreRepository::new(state.pool())
        .delete(owned.id(), &owned.owner)
        .await
    {
        Ok(()) => {
            tracing::info!("Store deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(RepositoryError::Conflict(_)) => Err(AppError::Conflict(STORE_CONFLICT_MESSAGE.to_string())),
        Err(err) => Err(err.into()),
    }
}

/// Build the store router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stores", get(list).post(create))
        .route(
            "/api/stores/{store_id}",
            get(show).patch(rename).delete(delete),
        )
}

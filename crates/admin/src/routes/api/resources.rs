//! Generic per-store REST endpoints.
//!
//! ```text
//! GET    /api/{store_id}/{kind}        - list (public)
//! GET    /api/{store_id}/{kind}/{id}   - get (public)
//! POST   /api/{store_id}/{kind}        - create (owner)
//! PATCH  /api/{store_id}/{kind}/{id}   - update (owner)
//! DELETE /api/{store_id}/{kind}/{id}   - delete (owner)
//! ```
//!
//! Orders are read-only and, since they carry customer details, only
//! visible to the owner.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use storedash_core::{CategoryId, ColorId, Product, SizeId, StoreId, Validate};

use crate::db::{ProductFilter, ProductRepository, RepositoryError, StoreRepository};
use crate::error::{AppError, Result};
use crate::middleware::{OptionalOwner, OwnedStore, RequireOwner};
use crate::resources::{
    Billboards, Categories, Colors, EditableResource, Orders, Products, Resource, Sizes,
};
use crate::state::AppState;

/// Path of a single record.
#[derive(Debug, Deserialize)]
pub struct ItemPath {
    pub store_id: String,
    pub id: String,
}

/// Public product filters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    pub is_featured: Option<bool>,
}

fn not_found(what: &str) -> AppError {
    AppError::NotFound(what.to_string())
}

/// Parse a path id; malformed ids are simply not found.
fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.parse().map_err(|_| not_found(what))
}

/// Parse an optional filter id; malformed ids are the client's fault.
fn parse_filter<T: FromStr>(raw: Option<&str>, name: &str) -> Result<Option<T>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("invalid {name}"))),
    }
}

/// Resolve a store for public reads.
async fn public_store(state: &AppState, raw_id: &str) -> Result<StoreId> {
    let store_id: StoreId = parse_id(raw_id, "store")?;
    if StoreRepository::new(state.pool()).exists(store_id).await? {
        Ok(store_id)
    } else {
        Err(not_found("store"))
    }
}

/// Resolve a store the caller must own.
async fn owned_store(state: &AppState, owner: RequireOwner, raw_id: &str) -> Result<OwnedStore> {
    OwnedStore::resolve(state, owner.0, raw_id)
        .await?
        .ok_or_else(|| not_found("store"))
}

fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// =============================================================================
// Reads
// =============================================================================

#[instrument(skip_all, fields(kind = %R::KIND, store_id = %store_id))]
async fn list<R: Resource>(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<R::Entity>>> {
    let store_id = public_store(&state, &store_id).await?;
    Ok(Json(R::list(state.pool(), store_id).await?))
}

#[instrument(skip_all, fields(kind = %R::KIND, store_id = %path.store_id, id = %path.id))]
async fn show<R: Resource>(
    State(state): State<AppState>,
    Path(path): Path<ItemPath>,
) -> Result<Json<R::Entity>> {
    let store_id = public_store(&state, &path.store_id).await?;
    let id: R::Id = parse_id(&path.id, R::KIND.singular())?;

    R::get(state.pool(), store_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(R::KIND.singular()))
}

#[instrument(skip_all, fields(kind = %R::KIND))]
async fn list_owned<R: Resource>(
    State(state): State<AppState>,
    owned: OwnedStore,
) -> Result<Json<Vec<R::Entity>>> {
    Ok(Json(R::list(state.pool(), owned.id()).await?))
}

#[instrument(skip_all, fields(kind = %R::KIND, id = %path.id))]
async fn show_owned<R: Resource>(
    State(state): State<AppState>,
    owned: OwnedStore,
    Path(path): Path<ItemPath>,
) -> Result<Json<R::Entity>> {
    let id: R::Id = parse_id(&path.id, R::KIND.singular())?;

    R::get(state.pool(), owned.id(), id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(R::KIND.singular()))
}

/// Product listing with storefront filters.
///
/// Archived products are hidden unless the caller owns the store.
#[instrument(skip_all, fields(store_id = %store_id))]
async fn list_products(
    State(state): State<AppState>,
    OptionalOwner(owner): OptionalOwner,
    Path(store_id): Path<String>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let store_id = public_store(&state, &store_id).await?;

    let include_archived = match owner {
        Some(owner) => StoreRepository::new(state.pool())
            .get_owned(store_id, &owner)
            .await?
            .is_some(),
        None => false,
    };

    let filter = ProductFilter {
        category_id: parse_filter::<CategoryId>(query.category_id.as_deref(), "categoryId")?,
        color_id: parse_filter::<ColorId>(query.color_id.as_deref(), "colorId")?,
        size_id: parse_filter::<SizeId>(query.size_id.as_deref(), "sizeId")?,
        is_featured: query.is_featured,
        include_archived,
    };

    let products = ProductRepository::new(state.pool())
        .list(store_id, filter)
        .await?;
    Ok(Json(products))
}

// =============================================================================
// Writes
// =============================================================================

/// Validation runs before the store is looked up, so invalid payloads never
/// reach the database.
#[instrument(skip_all, fields(kind = %R::KIND, store_id = %store_id))]
async fn create<R: EditableResource>(
    State(state): State<AppState>,
    owner: RequireOwner,
    Path(store_id): Path<String>,
    payload: std::result::Result<Json<R::Input>, JsonRejection>,
) -> Result<(StatusCode, Json<R::Entity>)> {
    let valid = body(payload)?.validate()?;
    let owned = owned_store(&state, owner, &store_id).await?;

    let entity = R::create(state.pool(), owned.id(), &valid).await?;
    tracing::info!(id = %R::id_of(&entity), "Created via API");
    Ok((StatusCode::CREATED, Json(entity)))
}

#[instrument(skip_all, fields(kind = %R::KIND, store_id = %path.store_id, id = %path.id))]
async fn update<R: EditableResource>(
    State(state): State<AppState>,
    owner: RequireOwner,
    Path(path): Path<ItemPath>,
    payload: std::result::Result<Json<R::Input>, JsonRejection>,
) -> Result<Json<R::Entity>> {
    let valid = body(payload)?.validate()?;
    let owned = owned_store(&state, owner, &path.store_id).await?;
    let id: R::Id = parse_id(&path.id, R::KIND.singular())?;

    Ok(Json(R::update(state.pool(), owned.id(), id, &valid).await?))
}

#[instrument(skip_all, fields(kind = %R::KIND, id = %path.id))]
async fn delete<R: EditableResource>(
    State(state): State<AppState>,
    owned: OwnedStore,
    Path(path): Path<ItemPath>,
) -> Result<StatusCode> {
    let id: R::Id = parse_id(&path.id, R::KIND.singular())?;

    match R::delete(state.pool(), owned.id(), id).await {
        Ok(()) => {
            tracing::info!("Deleted via API");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(RepositoryError::Conflict(constraint)) => {
            tracing::info!(%constraint, "Delete blocked by dependents");
            Err(AppError::Conflict(R::KIND.conflict_message()))
        }
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Router
// =============================================================================

fn collection_path<R: Resource>() -> String {
    format!("/api/{{store_id}}/{}", R::KIND.path())
}

fn item_path<R: Resource>() -> String {
    format!("{}/{{id}}", collection_path::<R>())
}

/// Routes of one editable resource.
fn editable<R: EditableResource>() -> Router<AppState> {
    Router::new()
        .route(&collection_path::<R>(), get(list::<R>).post(create::<R>))
        .route(
            &item_path::<R>(),
            get(show::<R>).patch(update::<R>).delete(delete::<R>),
        )
}

/// Build the per-store resource router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(editable::<Billboards>())
        .merge(editable::<Categories>())
        .merge(editable::<Sizes>())
        .merge(editable::<Colors>())
        .route(
            &collection_path::<Products>(),
            get(list_products).post(create::<Products>),
        )
        .route(
            &item_path::<Products>(),
            get(show::<Products>)
                .patch(update::<Products>)
                .delete(delete::<Products>),
        )
        .route(&collection_path::<Orders>(), get(list_owned::<Orders>))
        .route(&item_path::<Orders>(), get(show_owned::<Orders>))
}

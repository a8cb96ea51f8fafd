//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                 - Liveness
//! GET  /health/ready                           - Readiness (database)
//!
//! # Dashboard (owner identity required)
//! GET  /                                       - First store, or create-store form
//! POST /stores                                 - Create store
//! GET  /{store_id}                             - Overview
//! GET  /{store_id}/{kind}                      - Entity list
//! GET  /{store_id}/{kind}/new                  - Create form
//! POST /{store_id}/{kind}                      - Create
//! GET  /{store_id}/{kind}/{id}                 - Edit form
//! POST /{store_id}/{kind}/{id}                 - Update
//! GET  /{store_id}/{kind}/{id}/delete          - Delete confirmation
//! POST /{store_id}/{kind}/{id}/delete          - Delete
//! GET  /{store_id}/settings                    - Store settings
//! POST /{store_id}/settings                    - Rename store
//! GET  /{store_id}/settings/delete             - Store delete confirmation
//! POST /{store_id}/settings/delete             - Delete store
//!
//! # API
//! GET|POST              /api/stores
//! GET|PATCH|DELETE      /api/stores/{store_id}
//! GET|POST              /api/{store_id}/{kind}
//! GET|PATCH|DELETE      /api/{store_id}/{kind}/{id}
//! ```
//!
//! `{kind}` is one of `billboards`, `categories`, `sizes`, `colors`,
//! `products` or `orders`. Orders are read-only.

pub mod api;
pub mod dashboard;

use axum::Router;

use crate::state::AppState;

/// Build every dashboard and API route.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(api::router())
        .merge(dashboard::router())
}

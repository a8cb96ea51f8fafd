//! JSON API consumed by storefronts and the `storedash-client` crate.
//!
//! Errors are JSON `{"error": "..."}` bodies, except validation failures
//! which list field errors as `{"errors": [{"field", "message"}]}`.

pub mod resources;
pub mod stores;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(stores::router())
        .merge(resources::router())
}

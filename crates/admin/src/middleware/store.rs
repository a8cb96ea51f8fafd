//! Per-store context.
//!
//! Every `/{store_id}/...` page and owner API route works on exactly one
//! store. [`OwnedStore`] resolves it from the path and checks it belongs to
//! the caller. A store that exists but belongs to someone else is treated
//! exactly like a missing one.

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use storedash_core::{OwnerId, Store, StoreId};

use super::auth::{OwnerRejection, RequireOwner, is_api_request};
use crate::db::StoreRepository;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the path parameter holding the store id.
pub const STORE_PARAM: &str = "store_id";

/// The caller's store named by the request path.
#[derive(Debug, Clone)]
pub struct OwnedStore {
    pub store: Store,
    pub owner: OwnerId,
}

/// Why a store could not be resolved.
#[derive(Debug)]
pub enum StoreRejection {
    Owner(OwnerRejection),
    /// API: 404, indistinguishable from a missing store.
    NotFound,
    /// Dashboard: back to `/`, which picks a store the caller owns.
    RedirectHome,
    Failed(AppError),
}

impl IntoResponse for StoreRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Owner(rejection) => rejection.into_response(),
            Self::NotFound => AppError::NotFound("store".to_string()).into_response(),
            Self::RedirectHome => Redirect::to("/").into_response(),
            Self::Failed(err) => err.into_response(),
        }
    }
}

impl OwnedStore {
    /// Look up `raw_id` and check it belongs to `owner`.
    ///
    /// Returns `Ok(None)` for malformed ids, missing stores and stores of
    /// other owners alike.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the lookup fails.
    pub async fn resolve(
        state: &AppState,
        owner: OwnerId,
        raw_id: &str,
    ) -> Result<Option<Self>, AppError> {
        let Ok(store_id) = raw_id.parse::<StoreId>() else {
            return Ok(None);
        };

        let store = StoreRepository::new(state.pool())
            .get_owned(store_id, &owner)
            .await?;

        Ok(store.map(|store| Self { store, owner }))
    }

    #[must_use]
    pub const fn id(&self) -> StoreId {
        self.store.id
    }
}

impl FromRequestParts<AppState> for OwnedStore {
    type Rejection = StoreRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireOwner(owner) = RequireOwner::from_request_parts(parts, state)
            .await
            .map_err(StoreRejection::Owner)?;

        let missing = if is_api_request(parts) {
            StoreRejection::NotFound
        } else {
            StoreRejection::RedirectHome
        };

        let Ok(Path(params)) = Path::<HashMap<String, String>>::from_request_parts(parts, state).await
        else {
            return Err(missing);
        };
        let raw_id = params.get(STORE_PARAM).map(String::as_str).unwrap_or_default();

        match Self::resolve(state, owner, raw_id).await {
            Ok(Some(owned)) => Ok(owned),
            Ok(None) => {
                tracing::debug!(store_id = raw_id, "Store missing or not owned by caller");
                Err(missing)
            }
            Err(err) => Err(StoreRejection::Failed(err)),
        }
    }
}

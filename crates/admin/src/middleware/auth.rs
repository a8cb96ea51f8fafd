//! Caller identity extractors.
//!
//! The dashboard sits behind an authenticating proxy that puts the signed-in
//! user's id in a trusted header (see `DASHBOARD_IDENTITY_HEADER`). These
//! extractors read that header; they never talk to the database.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

use storedash_core::OwnerId;

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Extractor that requires a caller identity.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireOwner(owner): RequireOwner) -> impl IntoResponse {
///     format!("Hello, {owner}!")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireOwner(pub OwnerId);

/// Error returned when no usable identity header is present.
#[derive(Debug)]
pub enum OwnerRejection {
    /// JSON 401 for API requests.
    Unauthorized,
    /// Plain page for dashboard requests; signing in is the proxy's job.
    SignInRequired,
}

impl IntoResponse for OwnerRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => {
                AppError::Unauthorized("missing caller identity".to_string()).into_response()
            }
            Self::SignInRequired => (
                StatusCode::UNAUTHORIZED,
                "Sign in to manage your stores.",
            )
                .into_response(),
        }
    }
}

pub(crate) fn is_api_request(parts: &Parts) -> bool {
    parts.uri.path().starts_with("/api/")
}

/// Read the owner id from the configured identity header.
fn owner_from_parts(parts: &Parts, state: &AppState) -> Option<OwnerId> {
    let value = parts
        .headers
        .get(&state.config().identity.header)?
        .to_str()
        .ok()?;
    OwnerId::parse(value).ok()
}

impl FromRequestParts<AppState> for RequireOwner {
    type Rejection = OwnerRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let owner = owner_from_parts(parts, state).ok_or_else(|| {
            if is_api_request(parts) {
                OwnerRejection::Unauthorized
            } else {
                OwnerRejection::SignInRequired
            }
        })?;

        set_sentry_user(owner.as_str());
        Ok(Self(owner))
    }
}

/// Extractor that optionally gets the caller identity.
///
/// Public API routes use it to show owners more than anonymous callers.
#[derive(Debug, Clone)]
pub struct OptionalOwner(pub Option<OwnerId>);

impl FromRequestParts<AppState> for OptionalOwner {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(owner_from_parts(parts, state)))
    }
}

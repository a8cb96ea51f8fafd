//! Server-rendered dashboard pages.
//!
//! Every `/{store_id}/...` page takes an [`OwnedStore`]; a store that is
//! missing or owned by someone else redirects to `/`, which picks one of
//! the caller's stores or offers to create the first one.

pub mod resources;
pub mod settings;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use storedash_core::{
    DeleteFlow, FlowError, GENERIC_ERROR_MESSAGE, Notice, ResourceKind, StoreInput, Validate,
};

use crate::components::{Layout, Section};
use crate::db::{RepositoryError, StoreRepository};
use crate::error::PageResult;
use crate::middleware::{OwnedStore, RequireOwner, flash, take_notice};
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// First-store form, shown while the owner has no store.
#[derive(Template, WebTemplate)]
#[template(path = "stores/new.html")]
pub struct NewStoreTemplate {
    pub owner: String,
    pub name: String,
    pub error: Option<String>,
    pub notice: Option<Notice>,
}

/// One entity count on the overview.
#[derive(Debug, Clone)]
pub struct CountCard {
    pub label: &'static str,
    pub count: i64,
    pub href: String,
}

/// Store overview page.
#[derive(Template, WebTemplate)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    pub layout: Layout,
    pub cards: Vec<CountCard>,
}

/// Shared delete confirmation, the server-side stand-in for a modal.
#[derive(Template, WebTemplate)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub layout: Layout,
    pub subject: String,
    /// Where the confirmed delete is posted.
    pub action: String,
    pub cancel_href: String,
}

/// Page chrome for `owned`, with the pending flash notice.
pub(crate) async fn load_layout(
    state: &AppState,
    owned: &OwnedStore,
    section: Section,
    notice: Option<Notice>,
) -> Result<Layout, RepositoryError> {
    let stores = StoreRepository::new(state.pool())
        .list_for_owner(&owned.owner)
        .await?;
    Ok(Layout::new(&owned.store, &stores, section, notice))
}

/// Close a confirmed delete with the notice for `result`.
///
/// A record still referenced by others gets `conflict`; any other failure
/// gets the generic error. Either way the flow ends `Closed`.
pub(crate) fn settle_delete(
    flow: &mut DeleteFlow,
    result: &Result<(), RepositoryError>,
    deleted: String,
    conflict: String,
) -> Result<Notice, FlowError> {
    let outcome = match result {
        Ok(()) => {
            tracing::info!("Deleted");
            Ok(deleted)
        }
        Err(RepositoryError::Conflict(constraint)) => {
            tracing::info!(%constraint, "Delete blocked by dependents");
            Err(conflict)
        }
        Err(RepositoryError::NotFound) => {
            tracing::info!("Delete target already gone");
            Err(GENERIC_ERROR_MESSAGE.to_string())
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to delete");
            Err(GENERIC_ERROR_MESSAGE.to_string())
        }
    };
    flow.finish(outcome)
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Root: the caller's first store, or the create-store form.
#[instrument(skip_all, fields(owner = %owner))]
async fn home(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    session: Session,
) -> PageResult<Response> {
    let first = StoreRepository::new(state.pool())
        .first_for_owner(&owner)
        .await?;

    if let Some(store) = first {
        return Ok(Redirect::to(&format!("/{}", store.id)).into_response());
    }

    Ok(NewStoreTemplate {
        owner: owner.to_string(),
        name: String::new(),
        error: None,
        notice: take_notice(&session).await,
    }
    .into_response())
}

/// Create a store and open it.
#[instrument(skip_all, fields(owner = %owner))]
async fn create_store(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    session: Session,
    Form(input): Form<StoreInput>,
) -> PageResult<Response> {
    let valid = match input.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            let page = NewStoreTemplate {
                owner: owner.to_string(),
                error: errors.for_field("name").map(str::to_owned),
                name: input.name,
                notice: None,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    match StoreRepository::new(state.pool()).create(&owner, &valid).await {
        Ok(store) => {
            tracing::info!(store_id = %store.id, "Store created");
            flash(&session, Notice::Success("Store created.".to_string())).await;
            Ok(Redirect::to(&format!("/{}", store.id)).into_response())
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to create store");
            let page = NewStoreTemplate {
                owner: owner.to_string(),
                name: input.name,
                error: None,
                notice: Some(Notice::generic_error()),
            };
            Ok((StatusCode::INTERNAL_SERVER_ERROR, page).into_response())
        }
    }
}

/// Store overview with entity counts.
#[instrument(skip_all, fields(store_id = %owned.store.id))]
async fn overview(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
) -> PageResult<OverviewTemplate> {
    let counts = StoreRepository::new(state.pool()).counts(owned.id()).await?;

    let cards = ResourceKind::ALL
        .into_iter()
        .map(|kind| CountCard {
            label: kind.title(),
            count: counts.of(kind),
            href: format!("/{}/{}", owned.store.id, kind.path()),
        })
        .collect();

    let notice = take_notice(&session).await;
    let layout = load_layout(&state, &owned, Section::Overview, notice).await?;
    Ok(OverviewTemplate { layout, cards })
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/stores", post(create_store))
        .route("/{store_id}", get(overview))
        .merge(settings::router())
        .merge(resources::router())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deleting() -> DeleteFlow {
        let mut flow = DeleteFlow::default();
        flow.open().expect("open");
        flow.confirm().expect("confirm");
        flow
    }

    fn settle(result: &Result<(), RepositoryError>) -> (Notice, DeleteFlow) {
        let mut flow = deleting();
        let notice = settle_delete(
            &mut flow,
            result,
            ResourceKind::Sizes.deleted_message(),
            ResourceKind::Sizes.conflict_message(),
        )
        .expect("in flight");
        (notice, flow)
    }

    #[test]
    fn test_settle_delete_success() {
        let (notice, flow) = settle(&Ok(()));
        assert_eq!(notice, Notice::Success("Size deleted.".to_string()));
        assert_eq!(flow, DeleteFlow::Closed);
    }

    #[test]
    fn test_settle_delete_conflict_uses_kind_message() {
        let (notice, flow) = settle(&Err(RepositoryError::Conflict("fk".to_string())));
        assert_eq!(notice, Notice::Error(ResourceKind::Sizes.conflict_message()));
        assert_eq!(flow, DeleteFlow::Closed);
    }

    #[test]
    fn test_settle_delete_database_failure_closes_with_generic_error() {
        let (notice, flow) = settle(&Err(RepositoryError::Database(sqlx::Error::PoolTimedOut)));
        assert_eq!(notice, Notice::generic_error());
        assert_eq!(flow, DeleteFlow::Closed);

        let (notice, flow) = settle(&Err(RepositoryError::NotFound));
        assert_eq!(notice.message(), "Something went wrong.");
        assert_eq!(flow, DeleteFlow::Closed);
    }

    #[test]
    fn test_settle_delete_requires_confirmation() {
        let mut flow = DeleteFlow::default();
        let result = settle_delete(&mut flow, &Ok(()), String::new(), String::new());
        assert!(result.is_err());
        assert_eq!(flow, DeleteFlow::Closed);
    }
}

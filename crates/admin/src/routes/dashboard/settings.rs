//! Store settings: rename and delete.
//!
//! ```text
//! GET  /{store_id}/settings           - settings form
//! POST /{store_id}/settings           - rename
//! GET  /{store_id}/settings/delete    - delete confirmation
//! POST /{store_id}/settings/delete    - delete, back to `/`
//! ```

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;

use storedash_core::{
    DeleteFlow, Notice, STORE_CONFLICT_MESSAGE, StoreInput, Validate, ValidationErrors,
};

use super::{ConfirmDeleteTemplate, load_layout, settle_delete};
use crate::components::form::apply_errors;
use crate::components::{FormField, Layout, Section, Widget};
use crate::db::{RepositoryError, StoreRepository};
use crate::error::PageResult;
use crate::middleware::{OwnedStore, flash, take_notice};
use crate::state::AppState;

/// Settings page.
#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub layout: Layout,
    pub fields: Vec<FormField>,
    pub action: String,
    pub delete_href: String,
    /// Public API root of this store, for storefront configuration.
    pub api_url: String,
}

fn settings_href(owned: &OwnedStore) -> String {
    format!("/{}/settings", owned.store.id)
}

async fn render(
    state: &AppState,
    owned: &OwnedStore,
    input: &StoreInput,
    errors: Option<&ValidationErrors>,
    notice: Option<Notice>,
) -> Result<SettingsTemplate, RepositoryError> {
    let mut fields: Vec<FormField> = StoreInput::schema()
        .iter()
        .map(|spec| FormField::text(spec, &input.name))
        .collect();
    if let Some(errors) = errors {
        apply_errors(&mut fields, errors);
    }

    let href = settings_href(owned);
    Ok(SettingsTemplate {
        layout: load_layout(state, owned, Section::Settings, notice).await?,
        fields,
        delete_href: format!("{href}/delete"),
        action: href,
        api_url: format!(
            "{}/api/{}",
            state.config().base_url.trim_end_matches('/'),
            owned.store.id
        ),
    })
}

#[instrument(skip_all, fields(store_id = %owned.store.id))]
async fn show(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
) -> PageResult<SettingsTemplate> {
    let notice = take_notice(&session).await;
    let input = StoreInput::from(&owned.store);
    Ok(render(&state, &owned, &input, None, notice).await?)
}

#[instrument(skip_all, fields(store_id = %owned.store.id))]
async fn update(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
    Form(input): Form<StoreInput>,
) -> PageResult<Response> {
    let valid = match input.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            let page = render(&state, &owned, &input, Some(&errors), None).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    match StoreRepository::new(state.pool())
        .rename(owned.id(), &owned.owner, &valid)
        .await
    {
        Ok(store) => {
            tracing::info!(name = %store.name, "Store renamed");
            flash(&session, Notice::Success("Store updated.".to_string())).await;
            Ok(Redirect::to(&settings_href(&owned)).into_response())
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to rename store");
            let notice = Notice::generic_error();
            let page = render(&state, &owned, &input, None, Some(notice)).await?;
            Ok((StatusCode::INTERNAL_SERVER_ERROR, page).into_response())
        }
    }
}

#[instrument(skip_all, fields(store_id = %owned.store.id))]
async fn confirm_delete(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
) -> PageResult<ConfirmDeleteTemplate> {
    let mut flow = DeleteFlow::default();
    flow.open()?;

    let href = settings_href(&owned);
    let notice = take_notice(&session).await;
    Ok(ConfirmDeleteTemplate {
        layout: load_layout(&state, &owned, Section::Settings, notice).await?,
        subject: format!("store \"{}\"", owned.store.name),
        action: format!("{href}/delete"),
        cancel_href: href,
    })
}

/// Delete the store. Stores that still have products or categories stay.
#[instrument(skip_all, fields(store_id = %owned.store.id))]
async fn delete(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
) -> PageResult<Response> {
    let mut flow = DeleteFlow::default();
    flow.open()?;
    flow.confirm()?;

    let result = StoreRepository::new(state.pool())
        .delete(owned.id(), &owned.owner)
        .await;
    let back = match &result {
        Ok(()) => "/".to_string(),
        Err(_) => settings_href(&owned),
    };
    let notice = settle_delete(
        &mut flow,
        &result,
        "Store deleted.".to_string(),
        STORE_CONFLICT_MESSAGE.to_string(),
    )?;
    flash(&session, notice).await;
    Ok(Redirect::to(&back).into_response())
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/settings", get(show).post(update))
        .route("/{store_id}/settings/delete", get(confirm_delete).post(delete))
}

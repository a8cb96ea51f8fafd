//! Generic list, form and delete pages for every entity.
//!
//! ```text
//! GET  /{store_id}/{kind}                  - list, ?q= search
//! GET  /{store_id}/{kind}/new              - blank form
//! POST /{store_id}/{kind}                  - create
//! GET  /{store_id}/{kind}/{id}             - edit form
//! POST /{store_id}/{kind}/{id}             - update
//! GET  /{store_id}/{kind}/{id}/delete      - confirmation
//! POST /{store_id}/{kind}/{id}/delete      - delete
//! ```
//!
//! Orders only get the list page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use storedash_core::{
    DeleteFlow, FormFlow, FormMode, Notice, ResourceKind, Validate, ValidationErrors,
};

use super::{ConfirmDeleteTemplate, load_layout, settle_delete};
use crate::components::form::apply_errors;
use crate::components::{DataTableConfig, FormData, FormField, Layout, Section, Widget};
use crate::db::RepositoryError;
use crate::error::{AppError, PageError, PageResult};
use crate::middleware::{OwnedStore, flash, take_notice};
use crate::resources::{
    Billboards, Categories, Choices, Colors, EditableResource, Orders, Products, Resource, Sizes,
};
use crate::state::AppState;

/// List page search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Path of a single record.
#[derive(Debug, Deserialize)]
pub struct ItemPath {
    pub id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Entity list page.
#[derive(Template, WebTemplate)]
#[template(path = "resource/index.html")]
pub struct IndexTemplate {
    pub layout: Layout,
    pub table: DataTableConfig,
}

/// Entity create/edit form.
#[derive(Template, WebTemplate)]
#[template(path = "resource/form.html")]
pub struct FormTemplate {
    pub layout: Layout,
    pub title: String,
    pub description: String,
    pub submit_label: &'static str,
    /// Where the form posts to.
    pub action: String,
    pub list_href: String,
    /// Delete confirmation link, in edit mode only.
    pub delete_href: Option<String>,
    pub fields: Vec<FormField>,
}

// =============================================================================
// Helpers
// =============================================================================

fn list_href<R: Resource>(owned: &OwnedStore) -> String {
    format!("/{}/{}", owned.store.id, R::KIND.path())
}

fn item_href<R: Resource>(owned: &OwnedStore, id: R::Id) -> String {
    format!("{}/{id}", list_href::<R>(owned))
}

/// Parse the record id of the path; malformed ids are not found.
fn parse_id<R: Resource>(raw: &str) -> PageResult<R::Id> {
    raw.parse()
        .map_err(|_| PageError(AppError::NotFound(R::KIND.singular().to_string())))
}

async fn fetch<R: Resource>(
    state: &AppState,
    owned: &OwnedStore,
    raw: &str,
) -> PageResult<R::Entity> {
    let id = parse_id::<R>(raw)?;
    R::get(state.pool(), owned.id(), id)
        .await?
        .ok_or_else(|| PageError(AppError::NotFound(R::KIND.singular().to_string())))
}

/// Everything needed to render one form.
struct FormView<'a, R: EditableResource> {
    owned: &'a OwnedStore,
    flow: &'a FormFlow,
    id: Option<R::Id>,
    input: &'a R::Input,
    errors: Option<&'a ValidationErrors>,
    notice: Option<Notice>,
}

impl<R: EditableResource> FormView<'_, R> {
    async fn render(self, state: &AppState) -> PageResult<FormTemplate> {
        let mode = self.flow.mode();
        let choices = Choices::load(state.pool(), self.owned.id(), R::KIND).await?;

        let mut fields = R::fields(self.input, &choices);
        if let Some(errors) = self.errors {
            apply_errors(&mut fields, errors);
        }

        let (action, delete_href) = match self.id {
            Some(id) if mode.offers_delete() => {
                let href = item_href::<R>(self.owned, id);
                (href.clone(), Some(format!("{href}/delete")))
            }
            Some(id) => (item_href::<R>(self.owned, id), None),
            None => (list_href::<R>(self.owned), None),
        };

        let section = Section::Resource(R::KIND);
        Ok(FormTemplate {
            layout: load_layout(state, self.owned, section, self.notice).await?,
            title: mode.title(R::KIND),
            description: mode.description(R::KIND),
            submit_label: mode.action(),
            action,
            list_href: list_href::<R>(self.owned),
            delete_href,
            fields,
        })
    }
}

/// Shared create/update submission.
///
/// Walks the form state machine: invalid input re-renders the form with
/// field messages, a failed write re-renders it with the generic notice,
/// success redirects to the list with the confirmation notice.
async fn submit<R: EditableResource>(
    state: &AppState,
    owned: &OwnedStore,
    session: &Session,
    id: Option<R::Id>,
    data: &FormData,
) -> PageResult<Response> {
    let mode = if id.is_some() {
        FormMode::Edit
    } else {
        FormMode::Create
    };
    let mut flow = FormFlow::new(R::KIND, mode);
    flow.submit()?;

    let input = R::from_form(data);
    let valid = match input.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            flow.reject()?;
            tracing::debug!(fields = %errors, "Form rejected");
            let page = FormView::<R> {
                owned,
                flow: &flow,
                id,
                input: &input,
                errors: Some(&errors),
                notice: None,
            }
            .render(state)
            .await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let result = match id {
        Some(id) => R::update(state.pool(), owned.id(), id, &valid).await,
        None => R::create(state.pool(), owned.id(), &valid).await,
    };

    match result {
        Ok(entity) => {
            tracing::info!(id = %R::id_of(&entity), kind = %R::KIND, "Saved");
            let notice = flow.succeed()?;
            flash(session, notice).await;
            Ok(Redirect::to(&list_href::<R>(owned)).into_response())
        }
        Err(err) => {
            let err = AppError::from(err);
            let status = err.status();
            if status.is_server_error() {
                tracing::error!(error = %err, kind = %R::KIND, "Failed to save");
            } else {
                tracing::info!(error = %err, kind = %R::KIND, "Save rejected");
            }

            let notice = flow.fail()?;
            let page = FormView::<R> {
                owned,
                flow: &flow,
                id,
                input: &input,
                errors: None,
                notice: Some(notice),
            }
            .render(state)
            .await?;
            Ok((status, page).into_response())
        }
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// List page.
#[instrument(skip_all, fields(kind = %R::KIND, store_id = %owned.store.id))]
async fn index<R: Resource>(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> PageResult<IndexTemplate> {
    let entities = R::list(state.pool(), owned.id()).await?;
    let store_id = owned.store.id.to_string();

    let table = DataTableConfig::new(R::KIND, &store_id)
        .columns(R::columns())
        .with_api(&state.config().base_url, &store_id)
        .rows(entities.iter().map(R::row).collect(), query.q.as_deref());

    let notice = take_notice(&session).await;
    let layout = load_layout(&state, &owned, Section::Resource(R::KIND), notice).await?;
    Ok(IndexTemplate { layout, table })
}

/// Blank form.
#[instrument(skip_all, fields(kind = %R::KIND, store_id = %owned.store.id))]
async fn new<R: EditableResource>(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
) -> PageResult<FormTemplate> {
    let flow = FormFlow::new(R::KIND, FormMode::Create);
    FormView::<R> {
        owned: &owned,
        flow: &flow,
        id: None,
        input: &R::Input::default(),
        errors: None,
        notice: take_notice(&session).await,
    }
    .render(&state)
    .await
}

/// Create from the blank form.
#[instrument(skip_all, fields(kind = %R::KIND, store_id = %owned.store.id))]
async fn create<R: EditableResource>(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> PageResult<Response> {
    submit::<R>(&state, &owned, &session, None, &FormData::from(pairs)).await
}

/// Edit form, pre-populated with the persisted values.
#[instrument(skip_all, fields(kind = %R::KIND, id = %path.id))]
async fn edit<R: EditableResource>(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
    Path(path): Path<ItemPath>,
) -> PageResult<FormTemplate> {
    let entity = fetch::<R>(&state, &owned, &path.id).await?;
    let flow = FormFlow::new(R::KIND, FormMode::Edit);

    FormView::<R> {
        owned: &owned,
        flow: &flow,
        id: Some(R::id_of(&entity)),
        input: &R::input_of(&entity),
        errors: None,
        notice: take_notice(&session).await,
    }
    .render(&state)
    .await
}

/// Save the edit form.
#[instrument(skip_all, fields(kind = %R::KIND, id = %path.id))]
async fn update<R: EditableResource>(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
    Path(path): Path<ItemPath>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> PageResult<Response> {
    let id = parse_id::<R>(&path.id)?;
    submit::<R>(&state, &owned, &session, Some(id), &FormData::from(pairs)).await
}

/// Delete confirmation.
#[instrument(skip_all, fields(kind = %R::KIND, id = %path.id))]
async fn confirm_delete<R: EditableResource>(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
    Path(path): Path<ItemPath>,
) -> PageResult<ConfirmDeleteTemplate> {
    let entity = fetch::<R>(&state, &owned, &path.id).await?;
    let mut flow = DeleteFlow::default();
    flow.open()?;

    let href = item_href::<R>(&owned, R::id_of(&entity));
    let notice = take_notice(&session).await;
    Ok(ConfirmDeleteTemplate {
        layout: load_layout(&state, &owned, Section::Resource(R::KIND), notice).await?,
        subject: format!("{} \"{}\"", R::KIND.label(), R::display(&entity)),
        action: format!("{href}/delete"),
        cancel_href: href,
    })
}

/// Delete after confirmation.
///
/// A record still referenced by others stays, and the edit form shows the
/// kind's conflict message. Other failures land there with the generic
/// error.
#[instrument(skip_all, fields(kind = %R::KIND, id = %path.id))]
async fn delete<R: EditableResource>(
    State(state): State<AppState>,
    owned: OwnedStore,
    session: Session,
    Path(path): Path<ItemPath>,
) -> PageResult<Response> {
    let id = parse_id::<R>(&path.id)?;
    let mut flow = DeleteFlow::default();
    flow.open()?;
    flow.confirm()?;

    let result = R::delete(state.pool(), owned.id(), id).await;
    let back = match &result {
        Ok(()) | Err(RepositoryError::NotFound) => list_href::<R>(&owned),
        Err(_) => item_href::<R>(&owned, id),
    };
    let notice = settle_delete(
        &mut flow,
        &result,
        R::KIND.deleted_message(),
        R::KIND.conflict_message(),
    )?;
    flash(&session, notice).await;
    Ok(Redirect::to(&back).into_response())
}

// =============================================================================
// Router
// =============================================================================

fn editable<R: EditableResource>() -> Router<AppState> {
    let collection = format!("/{{store_id}}/{}", R::KIND.path());
    Router::new()
        .route(&collection, get(index::<R>).post(create::<R>))
        .route(&format!("{collection}/new"), get(new::<R>))
        .route(&format!("{collection}/{{id}}"), get(edit::<R>).post(update::<R>))
        .route(
            &format!("{collection}/{{id}}/delete"),
            get(confirm_delete::<R>).post(delete::<R>),
        )
}

/// Build the entity page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(editable::<Billboards>())
        .merge(editable::<Categories>())
        .merge(editable::<Sizes>())
        .merge(editable::<Colors>())
        .merge(editable::<Products>())
        .route(
            &format!("/{{store_id}}/{}", ResourceKind::Orders.path()),
            get(index::<Orders>),
        )
}

//! Generic handlers shared by every catalog resource.
//!
//! A resource is a marker type implementing [`Resource`]; the router mounts
//! `list::<R>`, `create::<R>` and friends for it.

use axum::body::Bytes;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_core::validation::{FieldRules, ValidatedInput};
use catalog_db::repositories::CrudRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::validation::validate_body;

/// Binds a repository to its validation rules and input conversions.
pub trait Resource: Send + Sync + 'static {
    type Repo: CrudRepo;

    /// Rules applied to both create and replace bodies.
    const RULES: &'static [FieldRules];

    fn create_input(
        input: &ValidatedInput,
    ) -> Result<<Self::Repo as CrudRepo>::Create, CoreError>;

    fn update_input(
        input: &ValidatedInput,
    ) -> Result<<Self::Repo as CrudRepo>::Update, CoreError>;
}

/// The `{id}` path segment as a UUID.
///
/// A malformed id is rejected with the JSON `BAD_REQUEST` body instead of
/// axum's plain-text rejection.
pub struct ResourceId(pub DbId);

impl<S: Send + Sync> FromRequestParts<S> for ResourceId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(id))
    }
}

fn entity_name<R: Resource>() -> &'static str {
    <R::Repo as CrudRepo>::ENTITY
}

fn not_found<R: Resource>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: entity_name::<R>(),
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/{resource}
pub async fn list<R: Resource>(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = R::Repo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/{resource}
///
/// Validate the body, then create the record. Returns 201. The body is taken
/// as raw bytes so that an empty or missing body still reaches validation.
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input = validate_body(&state.pool, R::RULES, &body).await?;
    let input = R::create_input(&input)?;

    let created = R::Repo::create(&state.pool, &input).await?;
    let id = R::Repo::entity_id(&created);
    tracing::info!(entity = entity_name::<R>(), %id, "Record created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/{resource}/{id}
pub async fn get_by_id<R: Resource>(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<impl IntoResponse> {
    let item = R::Repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/{resource}/{id}
///
/// Replace a record. The body is validated before the record is looked up,
/// so an invalid body on a missing id yields 422.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input = validate_body(&state.pool, R::RULES, &body).await?;
    let input = R::update_input(&input)?;

    let updated = R::Repo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    tracing::info!(entity = entity_name::<R>(), %id, "Record updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/{resource}/{id}
///
/// Soft-delete a record. Returns 204.
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<StatusCode> {
    if R::Repo::soft_delete(&state.pool, id).await? {
        tracing::info!(entity = entity_name::<R>(), %id, "Record deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found::<R>(id))
    }
}

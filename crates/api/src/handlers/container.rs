//! Handlers for the `/containers` resource.
//!
//! Every write that sets a parent goes through the repository's hierarchy
//! check, so a container can never end up inside itself.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::models::container::{
    ContainerListParams, ContainerSearchParams, CreateContainer, UpdateContainer,
};
use stockroom_db::repositories::{ContainerRepo, ItemRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::payload::{many, ContainerPayload, ContentsPayload, DeletedContainerPayload};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/containers
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateContainer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let container = ContainerRepo::create(&state.pool, &input).await?;

    tracing::info!(
        container_id = container.id,
        parent_id = ?container.parent_id,
        container_type = %container.container_type,
        "Container created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ContainerPayload::from(container),
        }),
    ))
}

/// GET /api/v1/containers
///
/// Optional `?parent=` narrows to one container's children, `?roots=true`
/// to top-level containers.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ContainerListParams>,
) -> AppResult<impl IntoResponse> {
    let containers = ContainerRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse {
        data: many::<_, ContainerPayload>(containers),
    }))
}

/// GET /api/v1/containers/search?text__contains=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<ContainerSearchParams>,
) -> AppResult<impl IntoResponse> {
    let text = params.text_contains.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest(
            "text__contains must not be empty".into(),
        ));
    }

    let containers = ContainerRepo::search(&state.pool, text, params.limit).await?;
    Ok(Json(DataResponse {
        data: many::<_, ContainerPayload>(containers),
    }))
}

/// GET /api/v1/containers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let container = ContainerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Container", id))?;
    Ok(Json(DataResponse {
        data: ContainerPayload::from(container),
    }))
}

/// GET /api/v1/containers/{id}/contents
///
/// Containers and items stored directly inside the container.
pub async fn contents(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if ContainerRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(CoreError::not_found("Container", id).into());
    }

    let containers = ContainerRepo::children(&state.pool, id).await?;
    let items = ItemRepo::list_by_parent(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: ContentsPayload {
            containers: many(containers),
            items: many(items),
        },
    }))
}

/// PUT /api/v1/containers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateContainer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let container = ContainerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Container", id))?;

    tracing::info!(container_id = id, parent_id = ?container.parent_id, "Container updated");

    Ok(Json(DataResponse {
        data: ContainerPayload::from(container),
    }))
}

/// DELETE /api/v1/containers/{id}
///
/// Child containers and items are detached (parent set to null), never deleted.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detached = ContainerRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Container", id))?;

    tracing::info!(
        container_id = id,
        detached_containers = detached.containers,
        detached_items = detached.items,
        "Container deleted",
    );

    Ok(Json(DataResponse {
        data: DeletedContainerPayload { id, detached },
    }))
}

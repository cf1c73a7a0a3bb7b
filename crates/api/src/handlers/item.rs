//! Handlers for the `/items` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::models::item::{CreateItem, ItemListParams, UpdateItem};
use stockroom_db::repositories::ItemRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::payload::{many, ItemPayload};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/items
///
/// Tags are normalized and created on first use.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateItem>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let item = ItemRepo::create(&state.pool, &input).await?;

    tracing::info!(
        item_id = item.id,
        parent_id = ?item.parent_id,
        tags = item.tags.len(),
        "Item created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ItemPayload::from(item),
        }),
    ))
}

/// GET /api/v1/items
///
/// Optional `?parent=` and `?tag=` filters.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ItemListParams>,
) -> AppResult<impl IntoResponse> {
    let items = ItemRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse {
        data: many::<_, ItemPayload>(items),
    }))
}

/// GET /api/v1/items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Item", id))?;
    Ok(Json(DataResponse {
        data: ItemPayload::from(item),
    }))
}

/// PUT /api/v1/items/{id}
///
/// A present `tags` list replaces the item's tag set.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateItem>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let item = ItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Item", id))?;

    tracing::info!(item_id = id, quantity = item.quantity, "Item updated");

    Ok(Json(DataResponse {
        data: ItemPayload::from(item),
    }))
}

/// DELETE /api/v1/items/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if !ItemRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Item", id).into());
    }

    tracing::info!(item_id = id, "Item deleted");

    Ok(StatusCode::NO_CONTENT)
}

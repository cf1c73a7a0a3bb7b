//! Handlers for the `/tags` resource.
//!
//! Tag names in paths and bodies are normalized before use, so
//! `/tags/Hardware` and `/tags/hardware` address the same tag.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stockroom_core::error::CoreError;
use stockroom_db::models::item_tag::CreateItemTag;
use stockroom_db::models::Page;
use stockroom_db::repositories::ItemTagRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::payload::{many, ItemTagPayload};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tags
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> AppResult<impl IntoResponse> {
    let tags = ItemTagRepo::list(&state.pool, &page).await?;
    Ok(Json(DataResponse {
        data: many::<_, ItemTagPayload>(tags),
    }))
}

/// POST /api/v1/tags
///
/// Idempotent: returns the existing tag when the normalized name is taken.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateItemTag>,
) -> AppResult<impl IntoResponse> {
    let tag = ItemTagRepo::create_or_get(&state.pool, &input.name).await?;

    tracing::info!(tag = %tag.name, "Tag created or fetched");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ItemTagPayload::from(tag),
        }),
    ))
}

/// GET /api/v1/tags/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tag = ItemTagRepo::find(&state.pool, &name)
        .await?
        .ok_or_else(|| CoreError::not_found("ItemTag", name.as_str()))?;
    Ok(Json(DataResponse {
        data: ItemTagPayload::from(tag),
    }))
}

/// DELETE /api/v1/tags/{name}
///
/// Removes the tag from every item; the items themselves are untouched.
pub async fn delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<StatusCode> {
    if !ItemTagRepo::delete(&state.pool, &name).await? {
        return Err(CoreError::not_found("ItemTag", name.as_str()).into());
    }

    tracing::info!(tag = %name, "Tag deleted");

    Ok(StatusCode::NO_CONTENT)
}

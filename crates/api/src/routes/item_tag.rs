//! Route definitions for the `/tags` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::item_tag;
use crate::state::AppState;

/// Tag routes mounted at `/tags`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create (create-or-get)
/// GET    /{name}            -> get_by_name
/// DELETE /{name}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(item_tag::list).post(item_tag::create))
        .route(
            "/{name}",
            get(item_tag::get_by_name).delete(item_tag::delete),
        )
}

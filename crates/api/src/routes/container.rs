//! Route definitions for the `/containers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::container;
use crate::state::AppState;

/// Container routes mounted at `/containers`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /search            -> search
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// GET    /{id}/contents     -> contents
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(container::list).post(container::create))
        .route("/search", get(container::search))
        .route(
            "/{id}",
            get(container::get_by_id)
                .put(container::update)
                .delete(container::delete),
        )
        .route("/{id}/contents", get(container::contents))
}

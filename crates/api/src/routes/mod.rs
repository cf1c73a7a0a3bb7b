pub mod container;
pub mod health;
pub mod item;
pub mod item_tag;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /containers                          list, create
/// /containers/search                   name substring search (GET)
/// /containers/{id}                     get, update, delete
/// /containers/{id}/contents            child containers and items (GET)
///
/// /items                               list, create
/// /items/{id}                          get, update, delete
///
/// /tags                                list, create-or-get
/// /tags/{name}                         get, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/containers", container::router())
        .nest("/items", item::router())
        .nest("/tags", item_tag::router())
}

//! Read-only frontend paths derived from entity identity.

use crate::types::DbId;

pub fn container_link(id: DbId) -> String {
    format!("/container/{id}")
}

pub fn item_link(id: DbId) -> String {
    format!("/item/{id}")
}

pub fn tag_link(name: &str) -> String {
    format!("/tag/{name}")
}

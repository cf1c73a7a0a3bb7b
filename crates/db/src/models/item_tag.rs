//! Item tag model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

/// A row from the `item_tags` table with the ids of the items carrying it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemTag {
    pub name: String,
    /// Ids of tagged items, ascending.
    pub item_set: Vec<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a tag. The name is normalized before storage.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemTag {
    pub name: String,
}

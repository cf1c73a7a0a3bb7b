//! Item entity model and DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::metadata::validate_metadata;
use stockroom_core::patch::double_option;
use stockroom_core::types::{DbId, Timestamp};
use validator::Validate;

use crate::models::Page;

/// A row from the `items` table, with its tag names aggregated in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub location: String,
    pub parent_id: Option<DbId>,
    pub metadata: serde_json::Value,
    pub quantity: i32,
    /// Restock threshold. Informational only; nothing is triggered by it.
    pub alert_quantity: i32,
    pub source: String,
    pub source_url: Option<String>,
    /// Normalized tag names, sorted.
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.name, self.quantity)
    }
}

/// DTO for creating a new item.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub parent: Option<DbId>,
    #[validate(custom(function = "validate_metadata"))]
    pub metadata: Option<serde_json::Value>,
    /// Defaults to 0.
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    /// Defaults to 0.
    #[validate(range(min = 0))]
    pub alert_quantity: Option<i32>,
    #[validate(length(max = 200))]
    pub source: Option<String>,
    #[validate(url)]
    pub source_url: Option<String>,
    /// Tag names; normalized and created on first use.
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing item. All fields are optional.
///
/// `tags`, when present, replaces the item's whole tag set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image: Option<Option<String>>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent: Option<Option<DbId>>,
    #[validate(custom(function = "validate_metadata"))]
    pub metadata: Option<serde_json::Value>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0))]
    pub alert_quantity: Option<i32>,
    #[validate(length(max = 200))]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(url)]
    pub source_url: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

/// Query parameters for `GET /api/v1/items`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemListParams {
    /// Only items directly inside this container.
    pub parent: Option<DbId>,
    /// Only items carrying this tag (normalized before matching).
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ItemListParams {
    pub fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

//! Container entity model and DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::container_type::ContainerType;
use stockroom_core::metadata::validate_metadata;
use stockroom_core::patch::double_option;
use stockroom_core::types::{DbId, Timestamp};
use validator::Validate;

use crate::models::Page;

/// A row from the `containers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Container {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub location: String,
    pub parent_id: Option<DbId>,
    pub metadata: serde_json::Value,
    #[sqlx(try_from = "String")]
    pub container_type: ContainerType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{} at {}", self.name, self.location)
        }
    }
}

/// DTO for creating a new container.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateContainer {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub parent: Option<DbId>,
    #[validate(custom(function = "validate_metadata"))]
    pub metadata: Option<serde_json::Value>,
    /// Defaults to `box` if omitted.
    pub container_type: Option<ContainerType>,
}

/// DTO for updating an existing container. All fields are optional.
///
/// `image` and `parent` distinguish "absent" (keep) from `null` (clear).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateContainer {
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
    pub container_type: Option<ContainerType>,
}

/// Query parameters for `GET /api/v1/containers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContainerListParams {
    /// Only containers directly inside this container.
    pub parent: Option<DbId>,
    /// Only top-level containers (no parent). Ignored when `parent` is set.
    #[serde(default)]
    pub roots: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ContainerListParams {
    pub fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Query parameters for `GET /api/v1/containers/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerSearchParams {
    /// Case-insensitive substring matched against container names.
    #[serde(rename = "text__contains")]
    pub text_contains: String,
    pub limit: Option<i64>,
}

/// Children released when a container is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetachedChildren {
    pub containers: u64,
    pub items: u64,
}

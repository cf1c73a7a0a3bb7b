//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

pub mod container;
pub mod item;
pub mod item_tag;

use serde::Deserialize;

/// Pagination parameters shared by list endpoints (`?limit=&offset=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Default page size for listings.
pub const DEFAULT_LIMIT: i64 = 100;

/// Maximum page size for listings.
pub const MAX_LIMIT: i64 = 500;

impl Page {
    /// Clamp to `1..=MAX_LIMIT`, defaulting to [`DEFAULT_LIMIT`].
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Negative offsets are treated as zero.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

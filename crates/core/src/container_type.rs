//! Physical container kinds.
//!
//! Stored as a two-letter code in `containers.container_type` and exposed on
//! the wire as the lowercase name (`"box"`, `"shelf"`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    #[default]
    Box,
    Shelf,
    Drawer,
    Room,
    Surface,
    Wall,
    Other,
}

impl ContainerType {
    pub const ALL: [ContainerType; 7] = [
        ContainerType::Box,
        ContainerType::Shelf,
        ContainerType::Drawer,
        ContainerType::Room,
        ContainerType::Surface,
        ContainerType::Wall,
        ContainerType::Other,
    ];

    /// The storage code for this type.
    pub fn code(self) -> &'static str {
        match self {
            ContainerType::Box => "BX",
            ContainerType::Shelf => "SL",
            ContainerType::Drawer => "DR",
            ContainerType::Room => "RM",
            ContainerType::Surface => "SR",
            ContainerType::Wall => "WL",
            ContainerType::Other => "OT",
        }
    }

    /// Human-readable name, identical to the wire representation.
    pub fn verbose(self) -> &'static str {
        match self {
            ContainerType::Box => "box",
            ContainerType::Shelf => "shelf",
            ContainerType::Drawer => "drawer",
            ContainerType::Room => "room",
            ContainerType::Surface => "surface",
            ContainerType::Wall => "wall",
            ContainerType::Other => "other",
        }
    }

    /// Parse a storage code. Unknown codes are a validation error.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| CoreError::Validation(format!("Unknown container type code '{code}'")))
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verbose())
    }
}

/// Lets sqlx decode the `CHAR(2)` column straight into the enum.
impl TryFrom<String> for ContainerType {
    type Error = CoreError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_code(code.trim_end())
    }
}

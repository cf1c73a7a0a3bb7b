use std::fmt;

/// Identifier carried by [`CoreError::NotFound`].
///
/// Containers and items are keyed by numeric id, tags by their name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKey {
    Id(crate::types::DbId),
    Name(String),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Id(id) => write!(f, "{id}"),
            EntityKey::Name(name) => f.write_str(name),
        }
    }
}

impl From<crate::types::DbId> for EntityKey {
    fn from(id: crate::types::DbId) -> Self {
        EntityKey::Id(id)
    }
}

impl From<&str> for EntityKey {
    fn from(name: &str) -> Self {
        EntityKey::Name(name.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: EntityKey },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by anything convertible to [`EntityKey`].
    pub fn not_found(entity: &'static str, id: impl Into<EntityKey>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(msg) => msg.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                format!("{field}: {}", reasons.join(", "))
            })
            .collect();
        fields.sort();
        CoreError::Validation(fields.join("; "))
    }
}

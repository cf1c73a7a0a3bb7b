//! Free-form `metadata` documents attached to containers and items.

use serde_json::Value;
use validator::ValidationError;

/// Value stored when a payload omits `metadata`.
pub fn empty_metadata() -> Value {
    Value::Object(serde_json::Map::new())
}

/// `metadata` must be a JSON object; scalars and arrays are rejected.
pub fn validate_metadata(value: &Value) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("metadata_not_object")
            .with_message("metadata must be a JSON object".into()))
    }
}

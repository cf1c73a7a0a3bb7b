//! Item tag name rules.
//!
//! Tag names are case-insensitive identifiers: every write stores the trimmed,
//! lowercased form so "Electronics" and "electronics" are the same tag.

use crate::error::CoreError;

/// Maximum length of a normalized tag name, in characters.
pub const MAX_TAG_NAME_LEN: usize = 30;

/// Trim and lowercase a tag name, rejecting empty or over-long names.
pub fn normalize_tag_name(raw: &str) -> Result<String, CoreError> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(CoreError::Validation("Tag name must not be empty".into()));
    }
    let len = normalized.chars().count();
    if len > MAX_TAG_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Tag name '{normalized}' is {len} characters, maximum is {MAX_TAG_NAME_LEN}"
        )));
    }
    Ok(normalized)
}

/// Normalize a list of tag names into a sorted, de-duplicated set.
pub fn normalize_tag_set<S: AsRef<str>>(raw: &[S]) -> Result<Vec<String>, CoreError> {
    let mut names = raw
        .iter()
        .map(|name| normalize_tag_name(name.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    names.sort();
    names.dedup();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize_tag_name("  Hardware ").unwrap(), "hardware");
    }

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(normalize_tag_name("hardware").unwrap(), "hardware");
    }

    #[test]
    fn non_ascii_is_lowercased() {
        assert_eq!(normalize_tag_name("ÉTAGÈRE").unwrap(), "étagère");
    }

    #[test]
    fn blank_is_rejected() {
        assert_matches!(normalize_tag_name("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn length_limit_counts_characters() {
        assert!(normalize_tag_name(&"é".repeat(MAX_TAG_NAME_LEN)).is_ok());
        assert_matches!(
            normalize_tag_name(&"a".repeat(MAX_TAG_NAME_LEN + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn tag_set_collapses_case_variants() {
        let set = normalize_tag_set(&["Tools", "tools", "Electronics"]).unwrap();
        assert_eq!(set, vec!["electronics".to_string(), "tools".to_string()]);
    }

    #[test]
    fn tag_set_fails_on_any_invalid_name() {
        assert!(normalize_tag_set(&["ok", ""]).is_err());
    }
}

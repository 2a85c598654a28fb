//! Required-field checks for report submissions.

use crate::error::CoreError;

/// Fields a person report submission must carry.
pub const PERSON_REQUIRED_FIELDS: &[&str] =
    &["report_type", "name", "age", "gender", "location", "contact"];

/// Fields an item report submission must carry.
pub const ITEM_REQUIRED_FIELDS: &[&str] = &["report_type", "category", "color", "location", "contact"];

/// Check that every `(field, value)` pair has a non-blank value.
///
/// Fields are checked in order and the first missing one is reported.
pub fn require_fields<'a, I>(fields: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    for (field, value) in fields {
        if !matches!(value, Some(v) if !v.trim().is_empty()) {
            return Err(CoreError::Validation(format!(
                "Missing required field: {field}"
            )));
        }
    }
    Ok(())
}

/// Parse a contact number, rejecting blank input.
pub fn validate_contact(contact: &str) -> Result<&str, CoreError> {
    let trimmed = contact.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Missing contact parameter".to_string()));
    }
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Borrow an optional free-text attribute, treating an empty string the
/// same as an absent one.
///
/// Reports keep `None` (never supplied) and `Some("")` (supplied blank)
/// apart, but neither takes part in matching or satisfies a required field.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_filters_blank_values() {
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&Some("Ram".into())), Some("Ram"));
    }

    #[test]
    fn non_empty_keeps_whitespace() {
        assert_eq!(non_empty(&Some(" ".into())), Some(" "));
    }
}

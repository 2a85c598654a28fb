//! Report entities and their text-valued enums.
//!
//! A report is either a person report (missing/found) or an item report
//! (lost/found). Both share the same lifecycle: created `active`, later
//! `resolved` by an explicit action, never reverted.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

define_text_enum! {
    /// Direction of a person report.
    PersonReportType {
        Missing = "missing",
        Found = "found",
    }
}

define_text_enum! {
    /// Direction of an item report.
    ItemReportType {
        Lost = "lost",
        Found = "found",
    }
}

define_text_enum! {
    /// Report lifecycle status.
    ReportStatus {
        Active = "active",
        Resolved = "resolved",
    }
}

define_text_enum! {
    /// Report category; also selects the alert message template.
    MatchType {
        Person = "person",
        Item = "item",
    }
}

impl PersonReportType {
    /// The type a report must have to be a match candidate for this one.
    pub fn opposite(self) -> Self {
        match self {
            PersonReportType::Missing => PersonReportType::Found,
            PersonReportType::Found => PersonReportType::Missing,
        }
    }
}

impl ItemReportType {
    /// The type a report must have to be a match candidate for this one.
    pub fn opposite(self) -> Self {
        match self {
            ItemReportType::Lost => ItemReportType::Found,
            ItemReportType::Found => ItemReportType::Lost,
        }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A missing or found person report.
///
/// `age` is kept as submitted text: the matcher parses it per comparison and
/// simply skips the age factor when it is not an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonReport {
    pub id: DbId,
    pub report_type: PersonReportType,
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact: String,
    pub status: ReportStatus,
    pub has_photos: bool,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

/// A lost or found item report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    pub id: DbId,
    pub report_type: ItemReportType,
    pub category: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact: String,
    pub status: ReportStatus,
    pub has_photos: bool,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    #[test]
    fn text_values_round_trip_through_from_str() {
        for value in PersonReportType::VALUES {
            let parsed: PersonReportType = value.parse().unwrap();
            assert_eq!(parsed.as_str(), *value);
        }
        assert_eq!("lost".parse::<ItemReportType>().unwrap(), ItemReportType::Lost);
        assert_eq!("resolved".parse::<ReportStatus>().unwrap(), ReportStatus::Resolved);
    }

    #[test]
    fn unknown_text_value_is_a_validation_error() {
        let err = "stolen".parse::<ItemReportType>().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("lost, found"));
    }

    #[test]
    fn opposite_types() {
        assert_eq!(PersonReportType::Missing.opposite(), PersonReportType::Found);
        assert_eq!(PersonReportType::Found.opposite(), PersonReportType::Missing);
        assert_eq!(ItemReportType::Lost.opposite(), ItemReportType::Found);
        assert_eq!(ItemReportType::Found.opposite(), ItemReportType::Lost);
    }

    #[test]
    fn enums_serialize_as_lowercase_text() {
        assert_eq!(
            serde_json::to_string(&PersonReportType::Missing).unwrap(),
            "\"missing\""
        );
        assert_eq!(serde_json::to_string(&MatchType::Item).unwrap(), "\"item\"");
        let status: ReportStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, ReportStatus::Active);
    }
}

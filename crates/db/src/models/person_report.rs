//! Person report row model.

use milaap_core::error::CoreError;
use milaap_core::report::{PersonReport, PersonReportType};
use milaap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `person_reports` table.
#[derive(Debug, Clone, FromRow)]
pub struct PersonReportRow {
    pub id: DbId,
    pub report_type: String,
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact: String,
    pub status: String,
    pub has_photos: bool,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

impl TryFrom<PersonReportRow> for PersonReport {
    type Error = CoreError;

    fn try_from(row: PersonReportRow) -> Result<Self, Self::Error> {
        Ok(PersonReport {
            id: row.id,
            report_type: row.report_type.parse()?,
            name: row.name,
            age: row.age,
            gender: row.gender,
            description: row.description,
            location: row.location,
            contact: row.contact,
            status: row.status.parse()?,
            has_photos: row.has_photos,
            created_at: row.created_at,
            resolved_at: row.resolved_at,
        })
    }
}

/// DTO for inserting a person report.
#[derive(Debug, Clone)]
pub struct CreatePersonReport {
    pub report_type: PersonReportType,
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact: String,
}

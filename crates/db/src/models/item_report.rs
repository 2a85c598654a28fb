//! Item report row model.

use milaap_core::error::CoreError;
use milaap_core::report::{ItemReport, ItemReportType};
use milaap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `item_reports` table.
#[derive(Debug, Clone, FromRow)]
pub struct ItemReportRow {
    pub id: DbId,
    pub report_type: String,
    pub category: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact: String,
    pub status: String,
    pub has_photos: bool,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

impl TryFrom<ItemReportRow> for ItemReport {
    type Error = CoreError;

    fn try_from(row: ItemReportRow) -> Result<Self, Self::Error> {
        Ok(ItemReport {
            id: row.id,
            report_type: row.report_type.parse()?,
            category: row.category,
            color: row.color,
            brand: row.brand,
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

/// DTO for inserting an item report.
#[derive(Debug, Clone)]
pub struct CreateItemReport {
    pub report_type: ItemReportType,
    pub category: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact: String,
}

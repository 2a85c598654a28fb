//! Notification record model.

use milaap_core::report::MatchType;
use milaap_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
///
/// Returned as-is by the history endpoint, so text columns stay text.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub kind: String,
    pub contact_number: String,
    pub message: String,
    pub status: String,
    pub match_type: Option<String>,
    pub similarity_score: Option<f64>,
    pub report_id: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording an outbound match alert before it is sent.
#[derive(Debug, Clone)]
pub struct CreateMatchAlert {
    pub contact_number: String,
    pub message: String,
    pub match_type: MatchType,
    pub similarity_score: f64,
    pub report_id: String,
}

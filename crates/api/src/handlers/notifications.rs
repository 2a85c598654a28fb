//! Handlers for match-alert notifications.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use milaap_core::notification::{MatchDetails, NotificationTask, NOT_AVAILABLE};
use milaap_core::report::MatchType;
use milaap_core::validation::require_fields;
use milaap_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::text_or_number;
use crate::state::AppState;

/// Score used for hand-built alerts that do not carry one.
pub const DEFAULT_MANUAL_SCORE: f64 = 80.0;

/// Default and maximum page size for the history listing.
const DEFAULT_HISTORY_LIMIT: i64 = 20;
const MAX_HISTORY_LIMIT: i64 = 100;

/// Request body for `POST /notifications/manual`.
#[derive(Debug, Deserialize)]
pub struct ManualNotificationRequest {
    pub contact_number: Option<String>,
    pub match_type: Option<String>,
    pub match_details: Option<MatchDetails>,
    pub similarity_score: Option<f64>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub report_id: Option<String>,
}

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationListParams {
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// POST /notifications/manual
// ---------------------------------------------------------------------------

/// Queue a hand-built match alert, e.g. after a volunteer confirms a match.
pub async fn send_manual_notification(
    State(state): State<AppState>,
    Json(input): Json<ManualNotificationRequest>,
) -> AppResult<impl IntoResponse> {
    require_fields([
        ("contact_number", input.contact_number.as_deref()),
        ("match_type", input.match_type.as_deref()),
    ])?;
    let match_type: MatchType = input.match_type.as_deref().unwrap_or_default().parse()?;
    let match_details = input
        .match_details
        .ok_or_else(|| AppError::BadRequest("Missing required field: match_details".into()))?;

    let similarity_score = input.similarity_score.unwrap_or(DEFAULT_MANUAL_SCORE);
    if !(0.0..=100.0).contains(&similarity_score) {
        return Err(AppError::BadRequest(format!(
            "similarity_score must be between 0 and 100, got {similarity_score}"
        )));
    }

    let task = NotificationTask {
        contact_number: input.contact_number.unwrap_or_default(),
        match_type,
        match_details,
        similarity_score,
        report_id: input
            .report_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    };
    tracing::info!(contact = %task.contact_number, %match_type, "Manual notification queued");
    state.notifications.enqueue(task);

    Ok(Json(json!({ "message": "Notification queued successfully" })))
}

// ---------------------------------------------------------------------------
// GET /notifications
// ---------------------------------------------------------------------------

/// Most recent notification records, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(params): Query<NotificationListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_history_limit(params.limit);
    let records = NotificationRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(records))
}

fn clamp_history_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_limit_defaults_and_clamps() {
        assert_eq!(clamp_history_limit(None), 20);
        assert_eq!(clamp_history_limit(Some(5)), 5);
        assert_eq!(clamp_history_limit(Some(0)), 1);
        assert_eq!(clamp_history_limit(Some(1_000)), 100);
    }
}

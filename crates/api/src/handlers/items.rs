//! Handlers for item reports.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use milaap_core::matching::match_items_above;
use milaap_core::notification::{MatchDetails, MatchParty, NotificationTask};
use milaap_core::report::{ItemReport, ItemReportType, MatchType, ReportStatus};
use milaap_core::validation::require_fields;
use milaap_db::models::item_report::CreateItemReport;
use milaap_db::repositories::ItemReportRepo;

use crate::error::AppResult;
use crate::handlers::persons::{PotentialMatch, ReportListParams, SubmissionResponse};
use crate::handlers::{parse_filter, LIST_LIMIT};
use crate::state::AppState;

/// Request body for `POST /items`.
#[derive(Debug, Deserialize)]
pub struct ItemReportRequest {
    pub report_type: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /items
// ---------------------------------------------------------------------------

/// Submit a lost or found item report.
pub async fn submit_item_report(
    State(state): State<AppState>,
    Json(input): Json<ItemReportRequest>,
) -> AppResult<impl IntoResponse> {
    require_fields([
        ("report_type", input.report_type.as_deref()),
        ("category", input.category.as_deref()),
        ("color", input.color.as_deref()),
        ("location", input.location.as_deref()),
        ("contact", input.contact.as_deref()),
    ])?;
    let report_type: ItemReportType = input.report_type.as_deref().unwrap_or_default().parse()?;

    let create = CreateItemReport {
        report_type,
        category: input.category,
        color: input.color,
        brand: input.brand,
        description: input.description,
        location: input.location,
        contact: input.contact.unwrap_or_default(),
    };
    let report = ItemReportRepo::create(&state.pool, &create).await?;

    let existing =
        ItemReportRepo::list_active_of_type(&state.pool, report_type.opposite(), Some(report.id))
            .await?;
    let matches = match_items_above(&report, &existing, state.config.match_threshold);

    let report_details = MatchDetails::from(&report);
    let mut potential_matches = Vec::with_capacity(matches.len());
    for candidate in &matches {
        let candidate_details = MatchDetails::from(candidate.report);
        for task in NotificationTask::for_pair(
            MatchType::Item,
            MatchParty {
                id: report.id,
                contact: &report.contact,
                details: &report_details,
            },
            MatchParty {
                id: candidate.report.id,
                contact: &candidate.report.contact,
                details: &candidate_details,
            },
            candidate.score,
        ) {
            state.notifications.enqueue(task);
        }
        potential_matches.push(PotentialMatch::new(candidate.report.clone(), candidate.score));
    }

    tracing::info!(
        report_id = report.id,
        report_type = %report_type,
        matches = potential_matches.len(),
        "Item report submitted",
    );

    Ok(Json(SubmissionResponse::<ItemReport> {
        message: "Item report submitted successfully",
        report_id: report.id,
        matches_found: potential_matches.len(),
        potential_matches,
    }))
}

// ---------------------------------------------------------------------------
// GET /items
// ---------------------------------------------------------------------------

/// List the newest item reports, filtered by `type` and `status`.
pub async fn list_item_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<impl IntoResponse> {
    let report_type = parse_filter::<ItemReportType>(params.report_type.as_deref(), None)?;
    let status = parse_filter(params.status.as_deref(), Some(ReportStatus::Active))?;

    let reports = ItemReportRepo::list(&state.pool, report_type, status, LIST_LIMIT).await?;
    Ok(Json(reports))
}

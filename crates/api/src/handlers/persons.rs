//! Handlers for person reports.
//!
//! Submitting a report runs the matcher against the active reports of the
//! opposite type and queues an alert for both parties of every match.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use milaap_core::matching::match_persons_above;
use milaap_core::notification::{score_percent, MatchDetails, MatchParty, NotificationTask};
use milaap_core::report::{MatchType, PersonReport, PersonReportType, ReportStatus};
use milaap_core::types::DbId;
use milaap_core::validation::require_fields;
use milaap_db::models::person_report::CreatePersonReport;
use milaap_db::repositories::PersonReportRepo;

use crate::error::AppResult;
use crate::handlers::{parse_filter, text_or_number, LIST_LIMIT};
use crate::state::AppState;

/// Request body for `POST /persons`.
#[derive(Debug, Deserialize)]
pub struct PersonReportRequest {
    pub report_type: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub age: Option<String>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact: Option<String>,
}

/// One match reported back to the submitter.
#[derive(Debug, Serialize)]
pub struct PotentialMatch<R> {
    pub match_details: R,
    /// Percentage, two decimals.
    pub similarity_score: f64,
    pub match_message: String,
}

impl<R> PotentialMatch<R> {
    pub fn new(match_details: R, score: f64) -> Self {
        Self {
            match_details,
            similarity_score: score_percent(score),
            match_message: format!("Potential match found with {:.1}% confidence", score * 100.0),
        }
    }
}

/// Response body for a report submission.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse<R> {
    pub message: &'static str,
    pub report_id: DbId,
    pub matches_found: usize,
    pub potential_matches: Vec<PotentialMatch<R>>,
}

/// Query parameters for listing reports.
#[derive(Debug, Deserialize)]
pub struct ReportListParams {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /persons
// ---------------------------------------------------------------------------

/// Submit a missing or found person report.
pub async fn submit_person_report(
    State(state): State<AppState>,
    Json(input): Json<PersonReportRequest>,
) -> AppResult<impl IntoResponse> {
    require_fields([
        ("report_type", input.report_type.as_deref()),
        ("name", input.name.as_deref()),
        ("age", input.age.as_deref()),
        ("gender", input.gender.as_deref()),
        ("location", input.location.as_deref()),
        ("contact", input.contact.as_deref()),
    ])?;
    let report_type: PersonReportType = input.report_type.as_deref().unwrap_or_default().parse()?;

    let create = CreatePersonReport {
        report_type,
        name: input.name,
        age: input.age,
        gender: input.gender,
        description: input.description,
        location: input.location,
        contact: input.contact.unwrap_or_default(),
    };
    let report = PersonReportRepo::create(&state.pool, &create).await?;

    let existing =
        PersonReportRepo::list_active_of_type(&state.pool, report_type.opposite(), Some(report.id))
            .await?;
    let matches = match_persons_above(&report, &existing, state.config.match_threshold);

    let report_details = MatchDetails::from(&report);
    let mut potential_matches = Vec::with_capacity(matches.len());
    for candidate in &matches {
        let candidate_details = MatchDetails::from(candidate.report);
        for task in NotificationTask::for_pair(
            MatchType::Person,
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
        "Person report submitted",
    );

    Ok(Json(SubmissionResponse::<PersonReport> {
        message: "Person report submitted successfully",
        report_id: report.id,
        matches_found: potential_matches.len(),
        potential_matches,
    }))
}

// ---------------------------------------------------------------------------
// GET /persons
// ---------------------------------------------------------------------------

/// List the newest person reports, filtered by `type` and `status`.
///
/// `status` defaults to `active`; `all` disables either filter.
pub async fn list_person_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<impl IntoResponse> {
    let report_type = parse_filter::<PersonReportType>(params.report_type.as_deref(), None)?;
    let status = parse_filter(params.status.as_deref(), Some(ReportStatus::Active))?;

    let reports = PersonReportRepo::list(&state.pool, report_type, status, LIST_LIMIT).await?;
    Ok(Json(reports))
}

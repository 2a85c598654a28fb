//! Cross-category report handlers: a contact's own reports, resolution and
//! aggregate statistics.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;

use milaap_core::matching::{match_items_above, match_persons_above, MatchCandidate};
use milaap_core::notification::{NotificationKind, NotificationStatus};
use milaap_core::report::{ItemReportType, MatchType, PersonReportType, ReportStatus};
use milaap_core::types::DbId;
use milaap_core::validation::validate_contact;
use milaap_db::repositories::{ItemReportRepo, NotificationRepo, PersonReportRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /my-reports
// ---------------------------------------------------------------------------

/// Query parameters for `GET /my-reports`.
#[derive(Debug, Deserialize)]
pub struct MyReportsParams {
    pub contact: Option<String>,
}

/// A contact's report with its current matches.
#[derive(Debug, Serialize)]
struct OwnReport<'a, R> {
    #[serde(rename = "type")]
    category: MatchType,
    #[serde(flatten)]
    report: &'a R,
    matches: Vec<MatchCandidate<'a, R>>,
}

/// Active reports filed from a contact number.
///
/// Missing-person and lost-item reports carry live matches against the
/// currently active found reports; found reports carry none.
pub async fn my_reports(
    State(state): State<AppState>,
    Query(params): Query<MyReportsParams>,
) -> AppResult<impl IntoResponse> {
    let contact = validate_contact(params.contact.as_deref().unwrap_or_default())?;
    let threshold = state.config.match_threshold;

    let persons = PersonReportRepo::list_active_by_contact(&state.pool, contact).await?;
    let found_persons = if persons.iter().any(|p| p.report_type == PersonReportType::Missing) {
        PersonReportRepo::list_active_of_type(&state.pool, PersonReportType::Found, None).await?
    } else {
        Vec::new()
    };

    let items = ItemReportRepo::list_active_by_contact(&state.pool, contact).await?;
    let found_items = if items.iter().any(|i| i.report_type == ItemReportType::Lost) {
        ItemReportRepo::list_active_of_type(&state.pool, ItemReportType::Found, None).await?
    } else {
        Vec::new()
    };

    let mut body = Vec::with_capacity(persons.len() + items.len());
    for person in &persons {
        let matches = match person.report_type {
            PersonReportType::Missing => match_persons_above(person, &found_persons, threshold),
            PersonReportType::Found => Vec::new(),
        };
        body.push(to_json(&OwnReport {
            category: MatchType::Person,
            report: person,
            matches,
        })?);
    }
    for item in &items {
        let matches = match item.report_type {
            ItemReportType::Lost => match_items_above(item, &found_items, threshold),
            ItemReportType::Found => Vec::new(),
        };
        body.push(to_json(&OwnReport {
            category: MatchType::Item,
            report: item,
            matches,
        })?);
    }

    Ok(Json(body))
}

fn to_json<T: Serialize>(value: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| AppError::InternalError(e.to_string()))
}

// ---------------------------------------------------------------------------
// POST /reports/resolve
// ---------------------------------------------------------------------------

/// Request body for `POST /reports/resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveReportRequest {
    pub report_id: DbId,
    #[serde(alias = "report_type")]
    pub category: MatchType,
}

/// Mark an active report resolved.
pub async fn resolve_report(
    State(state): State<AppState>,
    Json(input): Json<ResolveReportRequest>,
) -> AppResult<impl IntoResponse> {
    let resolved = match input.category {
        MatchType::Person => PersonReportRepo::resolve(&state.pool, input.report_id).await?,
        MatchType::Item => ItemReportRepo::resolve(&state.pool, input.report_id).await?,
    };
    if !resolved {
        return Err(AppError::NotFound(
            "Report not found or already resolved".to_string(),
        ));
    }

    tracing::info!(report_id = input.report_id, category = %input.category, "Report resolved");
    Ok(Json(json!({ "message": "Report resolved successfully" })))
}

// ---------------------------------------------------------------------------
// GET /stats
// ---------------------------------------------------------------------------

/// Total and active counts for one report type.
#[derive(Debug, Serialize)]
pub struct TypeCounts {
    pub total_count: i64,
    pub active_count: i64,
}

#[derive(Debug, Serialize)]
pub struct PersonStats {
    pub missing: TypeCounts,
    pub found: TypeCounts,
}

#[derive(Debug, Serialize)]
pub struct ItemStats {
    pub lost: TypeCounts,
    pub found: TypeCounts,
}

#[derive(Debug, Serialize)]
pub struct AlertStats {
    pub sent: i64,
    pub failed: i64,
}

/// Response body for `GET /stats`.
#[derive(Debug, Serialize)]
pub struct Stats {
    pub persons: PersonStats,
    pub items: ItemStats,
    pub notifications: AlertStats,
}

/// Report and match-alert counters.
pub async fn get_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;

    let stats = Stats {
        persons: PersonStats {
            missing: person_counts(pool, PersonReportType::Missing).await?,
            found: person_counts(pool, PersonReportType::Found).await?,
        },
        items: ItemStats {
            lost: item_counts(pool, ItemReportType::Lost).await?,
            found: item_counts(pool, ItemReportType::Found).await?,
        },
        notifications: AlertStats {
            sent: NotificationRepo::count_by_status(
                pool,
                NotificationKind::MatchAlert,
                NotificationStatus::Sent,
            )
            .await?,
            failed: NotificationRepo::count_by_status(
                pool,
                NotificationKind::MatchAlert,
                NotificationStatus::Failed,
            )
            .await?,
        },
    };

    Ok(Json(stats))
}

async fn person_counts(pool: &PgPool, report_type: PersonReportType) -> Result<TypeCounts, sqlx::Error> {
    Ok(TypeCounts {
        total_count: PersonReportRepo::count(pool, report_type, None).await?,
        active_count: PersonReportRepo::count(pool, report_type, Some(ReportStatus::Active)).await?,
    })
}

async fn item_counts(pool: &PgPool, report_type: ItemReportType) -> Result<TypeCounts, sqlx::Error> {
    Ok(TypeCounts {
        total_count: ItemReportRepo::count(pool, report_type, None).await?,
        active_count: ItemReportRepo::count(pool, report_type, Some(ReportStatus::Active)).await?,
    })
}

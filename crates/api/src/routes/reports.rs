//! Route definitions for person and item reports.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{items, persons, reports};
use crate::state::AppState;

/// Report routes.
///
/// ```text
/// POST   /persons            -> submit_person_report
/// GET    /persons            -> list_person_reports
/// POST   /items              -> submit_item_report
/// GET    /items              -> list_item_reports
/// GET    /my-reports         -> my_reports
/// POST   /reports/resolve    -> resolve_report
/// GET    /stats              -> get_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/persons",
            post(persons::submit_person_report).get(persons::list_person_reports),
        )
        .route(
            "/items",
            post(items::submit_item_report).get(items::list_item_reports),
        )
        .route("/my-reports", get(reports::my_reports))
        .route("/reports/resolve", post(reports::resolve_report))
        .route("/stats", get(reports::get_stats))
}

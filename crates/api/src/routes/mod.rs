pub mod health;
pub mod notifications;
pub mod reports;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /persons                    submit (POST), list (GET ?type=&status=)
/// /items                      submit (POST), list (GET ?type=&status=)
/// /my-reports                 a contact's active reports with matches (GET ?contact=)
/// /reports/resolve            resolve a report (POST)
/// /stats                      report and alert counters (GET)
///
/// /notifications              recent notification records (GET ?limit=)
/// /notifications/manual       queue a hand-built alert (POST)
///
/// /whatsapp                   inbound chat webhook (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(reports::router())
        .nest("/notifications", notifications::router())
        .route("/whatsapp", post(handlers::whatsapp::whatsapp_webhook))
}

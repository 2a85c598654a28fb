//! Route definitions for match-alert notifications.
//!
//! Mounted at `/notifications` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Notification routes.
///
/// ```text
/// GET    /           -> list_notifications
/// POST   /manual     -> send_manual_notification
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/manual", post(notifications::send_manual_notification))
}

use std::sync::Arc;

use milaap_events::NotificationQueue;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and queue are handles, config is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: milaap_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Producer side of the match-alert queue.
    pub notifications: NotificationQueue,
}

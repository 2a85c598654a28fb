//! Notification-record store seam.
//!
//! The dispatcher only needs two writes: create a `pending` record, then
//! move it to its terminal status. [`PgNotificationStore`] backs those with
//! [`NotificationRepo`].

use async_trait::async_trait;
use milaap_core::notification::NotificationStatus;
use milaap_core::types::DbId;
use milaap_db::models::notification::CreateMatchAlert;
use milaap_db::repositories::NotificationRepo;
use milaap_db::DbPool;

/// Error type for notification-record writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Where the dispatcher records alerts.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist an alert in `pending`, returning its record id.
    async fn create_pending(&self, alert: &CreateMatchAlert) -> Result<DbId, StoreError>;

    /// Move a pending record to a terminal status.
    ///
    /// Returns `false` when the record was not pending.
    async fn set_status(&self, id: DbId, status: NotificationStatus) -> Result<bool, StoreError>;
}

/// Postgres-backed store.
#[derive(Debug, Clone)]
pub struct PgNotificationStore {
    pool: DbPool,
}

impl PgNotificationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn create_pending(&self, alert: &CreateMatchAlert) -> Result<DbId, StoreError> {
        Ok(NotificationRepo::create_pending(&self.pool, alert).await?)
    }

    async fn set_status(&self, id: DbId, status: NotificationStatus) -> Result<bool, StoreError> {
        Ok(NotificationRepo::set_status(&self.pool, id, status).await?)
    }
}

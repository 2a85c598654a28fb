//! Repository for the `notifications` table.

use milaap_core::notification::{NotificationKind, NotificationStatus};
use milaap_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{CreateMatchAlert, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str = "\
    id, kind, contact_number, message, status, match_type, \
    similarity_score, report_id, created_at";

/// Provides persistence operations for notification records.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Record an outbound match alert in `pending`, returning the generated ID.
    pub async fn create_pending(
        pool: &PgPool,
        input: &CreateMatchAlert,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications \
                (kind, contact_number, message, status, match_type, similarity_score, report_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id",
        )
        .bind(NotificationKind::MatchAlert.as_str())
        .bind(&input.contact_number)
        .bind(&input.message)
        .bind(NotificationStatus::Pending.as_str())
        .bind(input.match_type.as_str())
        .bind(input.similarity_score)
        .bind(&input.report_id)
        .fetch_one(pool)
        .await
    }

    /// Move a pending record to `status`.
    ///
    /// Returns `false` if the record is missing or no longer pending; a
    /// terminal status is never overwritten.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: NotificationStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET status = $1 \
             WHERE id = $2 AND status = 'pending'",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record an inbound chat message as already processed.
    pub async fn log_incoming(
        pool: &PgPool,
        contact_number: &str,
        message: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications (kind, contact_number, message, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(NotificationKind::Incoming.as_str())
        .bind(contact_number)
        .bind(message)
        .bind(NotificationStatus::Processed.as_str())
        .fetch_one(pool)
        .await
    }

    /// Find a notification record by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent records of any kind, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Number of records with the given kind and status.
    pub async fn count_by_status(
        pool: &PgPool,
        kind: NotificationKind,
        status: NotificationStatus,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE kind = $1 AND status = $2")
            .bind(kind.as_str())
            .bind(status.as_str())
            .fetch_one(pool)
            .await
    }
}

//! Repository for the `person_reports` table.

use milaap_core::report::{PersonReport, PersonReportType, ReportStatus};
use milaap_core::types::DbId;
use sqlx::PgPool;

use crate::models::into_domain;
use crate::models::person_report::{CreatePersonReport, PersonReportRow};

/// Column list for `person_reports` queries.
const COLUMNS: &str = "\
    id, report_type, name, age, gender, description, location, contact, \
    status, has_photos, created_at, resolved_at";

/// Provides persistence operations for person reports.
pub struct PersonReportRepo;

impl PersonReportRepo {
    /// Insert a new active report, returning the full row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePersonReport,
    ) -> Result<PersonReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO person_reports \
                (report_type, name, age, gender, description, location, contact) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PersonReportRow>(&query)
            .bind(input.report_type.as_str())
            .bind(&input.name)
            .bind(&input.age)
            .bind(&input.gender)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.contact)
            .fetch_one(pool)
            .await?;
        into_domain(row)
    }

    /// Find a person report by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PersonReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM person_reports WHERE id = $1");
        sqlx::query_as::<_, PersonReportRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(into_domain)
            .transpose()
    }

    /// Active reports of `report_type`, excluding `exclude_id`.
    ///
    /// This is the candidate snapshot handed to the matcher; ordered by id so
    /// ties in the ranking keep insertion order.
    pub async fn list_active_of_type(
        pool: &PgPool,
        report_type: PersonReportType,
        exclude_id: Option<DbId>,
    ) -> Result<Vec<PersonReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM person_reports \
             WHERE status = 'active' AND report_type = $1 \
               AND ($2::BIGINT IS NULL OR id <> $2) \
             ORDER BY id"
        );
        sqlx::query_as::<_, PersonReportRow>(&query)
            .bind(report_type.as_str())
            .bind(exclude_id)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    /// List reports with optional type and status filters, newest first.
    pub async fn list(
        pool: &PgPool,
        report_type: Option<PersonReportType>,
        status: Option<ReportStatus>,
        limit: i64,
    ) -> Result<Vec<PersonReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM person_reports \
             WHERE ($1::TEXT IS NULL OR report_type = $1) \
               AND ($2::TEXT IS NULL OR status = $2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3"
        );
        sqlx::query_as::<_, PersonReportRow>(&query)
            .bind(report_type.map(PersonReportType::as_str))
            .bind(status.map(ReportStatus::as_str))
            .bind(limit)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    /// Active reports filed from `contact`, newest first.
    pub async fn list_active_by_contact(
        pool: &PgPool,
        contact: &str,
    ) -> Result<Vec<PersonReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM person_reports \
             WHERE contact = $1 AND status = 'active' \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PersonReportRow>(&query)
            .bind(contact)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    /// Mark an active report resolved.
    ///
    /// Returns `false` when the report does not exist or is already resolved.
    pub async fn resolve(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE person_reports \
             SET status = 'resolved', resolved_at = NOW() \
             WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count reports of `report_type`, optionally restricted to `status`.
    pub async fn count(
        pool: &PgPool,
        report_type: PersonReportType,
        status: Option<ReportStatus>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM person_reports \
             WHERE report_type = $1 AND ($2::TEXT IS NULL OR status = $2)",
        )
        .bind(report_type.as_str())
        .bind(status.map(ReportStatus::as_str))
        .fetch_one(pool)
        .await
    }
}

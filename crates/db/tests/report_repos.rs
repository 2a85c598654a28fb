//! Integration tests for the report repositories.
//!
//! Require a live Postgres via `DATABASE_URL`; run with `--ignored`.

use milaap_core::report::{ItemReportType, PersonReportType, ReportStatus};
use milaap_db::models::item_report::CreateItemReport;
use milaap_db::models::person_report::CreatePersonReport;
use milaap_db::repositories::{ItemReportRepo, PersonReportRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn person(report_type: PersonReportType, name: &str, contact: &str) -> CreatePersonReport {
    CreatePersonReport {
        report_type,
        name: Some(name.to_string()),
        age: Some("25".to_string()),
        gender: Some("male".to_string()),
        description: None,
        location: Some("Ujjain Ghat".to_string()),
        contact: contact.to_string(),
    }
}

fn item(report_type: ItemReportType, category: &str, contact: &str) -> CreateItemReport {
    CreateItemReport {
        report_type,
        category: Some(category.to_string()),
        color: Some("red".to_string()),
        brand: None,
        description: Some("leather strap".to_string()),
        location: Some("Ram Ghat".to_string()),
        contact: contact.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Person reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_bootstrap_health_check(pool: PgPool) {
    milaap_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_person_report_defaults(pool: PgPool) {
    let report = PersonReportRepo::create(&pool, &person(PersonReportType::Missing, "Ram", "+911"))
        .await
        .unwrap();

    assert_eq!(report.status, ReportStatus::Active);
    assert!(!report.has_photos);
    assert!(report.resolved_at.is_none());

    let found = PersonReportRepo::find_by_id(&pool, report.id).await.unwrap();
    assert_eq!(found, Some(report));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_candidate_snapshot_filters_type_status_and_self(pool: PgPool) {
    let a = PersonReportRepo::create(&pool, &person(PersonReportType::Found, "A", "+911"))
        .await
        .unwrap();
    let b = PersonReportRepo::create(&pool, &person(PersonReportType::Found, "B", "+912"))
        .await
        .unwrap();
    PersonReportRepo::create(&pool, &person(PersonReportType::Missing, "C", "+913"))
        .await
        .unwrap();
    assert!(PersonReportRepo::resolve(&pool, b.id).await.unwrap());

    let snapshot = PersonReportRepo::list_active_of_type(&pool, PersonReportType::Found, None)
        .await
        .unwrap();
    assert_eq!(snapshot.iter().map(|r| r.id).collect::<Vec<_>>(), vec![a.id]);

    let excluded = PersonReportRepo::list_active_of_type(&pool, PersonReportType::Found, Some(a.id))
        .await
        .unwrap();
    assert!(excluded.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_resolve_only_once(pool: PgPool) {
    let report = PersonReportRepo::create(&pool, &person(PersonReportType::Missing, "Ram", "+911"))
        .await
        .unwrap();

    assert!(PersonReportRepo::resolve(&pool, report.id).await.unwrap());
    assert!(!PersonReportRepo::resolve(&pool, report.id).await.unwrap());
    assert!(!PersonReportRepo::resolve(&pool, 999_999).await.unwrap());

    let resolved = PersonReportRepo::find_by_id(&pool, report.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.status, ReportStatus::Resolved);
    assert!(resolved.resolved_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_filters_and_counts(pool: PgPool) {
    for (t, name) in [
        (PersonReportType::Missing, "A"),
        (PersonReportType::Missing, "B"),
        (PersonReportType::Found, "C"),
    ] {
        PersonReportRepo::create(&pool, &person(t, name, "+911"))
            .await
            .unwrap();
    }

    let missing = PersonReportRepo::list(&pool, Some(PersonReportType::Missing), None, 50)
        .await
        .unwrap();
    assert_eq!(missing.len(), 2);
    assert_eq!(missing[0].name.as_deref(), Some("B"), "newest first");

    let all = PersonReportRepo::list(&pool, None, Some(ReportStatus::Active), 50)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let by_contact = PersonReportRepo::list_active_by_contact(&pool, "+911")
        .await
        .unwrap();
    assert_eq!(by_contact.len(), 3);

    assert_eq!(
        PersonReportRepo::count(&pool, PersonReportType::Missing, None)
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        PersonReportRepo::count(&pool, PersonReportType::Found, Some(ReportStatus::Resolved))
            .await
            .unwrap(),
        0
    );
}

// ---------------------------------------------------------------------------
// Item reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_item_report_lifecycle(pool: PgPool) {
    let lost = ItemReportRepo::create(&pool, &item(ItemReportType::Lost, "bag", "+915"))
        .await
        .unwrap();
    let found = ItemReportRepo::create(&pool, &item(ItemReportType::Found, "bag", "+916"))
        .await
        .unwrap();

    assert_eq!(lost.category.as_deref(), Some("bag"));
    assert_eq!(lost.status, ReportStatus::Active);

    let snapshot = ItemReportRepo::list_active_of_type(&pool, ItemReportType::Found, Some(lost.id))
        .await
        .unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, found.id);

    assert!(ItemReportRepo::resolve(&pool, found.id).await.unwrap());
    assert_eq!(
        ItemReportRepo::count(&pool, ItemReportType::Found, Some(ReportStatus::Active))
            .await
            .unwrap(),
        0
    );
}

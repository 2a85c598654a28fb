//! Integration tests for the notification repository.
//!
//! Require a live Postgres via `DATABASE_URL`; run with `--ignored`.

use milaap_core::notification::{NotificationKind, NotificationStatus};
use milaap_core::report::MatchType;
use milaap_db::models::notification::CreateMatchAlert;
use milaap_db::repositories::NotificationRepo;
use sqlx::PgPool;

fn alert(contact: &str) -> CreateMatchAlert {
    CreateMatchAlert {
        contact_number: contact.to_string(),
        message: "match".to_string(),
        match_type: MatchType::Person,
        similarity_score: 72.25,
        report_id: "42".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_pending_moves_to_terminal_once(pool: PgPool) {
    let id = NotificationRepo::create_pending(&pool, &alert("+911"))
        .await
        .unwrap();

    let record = NotificationRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(record.status, "pending");
    assert_eq!(record.kind, "match_alert");
    assert_eq!(record.similarity_score, Some(72.25));

    assert!(NotificationRepo::set_status(&pool, id, NotificationStatus::Sent)
        .await
        .unwrap());
    assert!(!NotificationRepo::set_status(&pool, id, NotificationStatus::Failed)
        .await
        .unwrap());

    let record = NotificationRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(record.status, "sent");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_incoming_messages_and_counts(pool: PgPool) {
    NotificationRepo::log_incoming(&pool, "+919", "namaste")
        .await
        .unwrap();
    let failed = NotificationRepo::create_pending(&pool, &alert("+911"))
        .await
        .unwrap();
    NotificationRepo::set_status(&pool, failed, NotificationStatus::Failed)
        .await
        .unwrap();

    let recent = NotificationRepo::list_recent(&pool, 10).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, failed);
    assert_eq!(recent[1].kind, "incoming");
    assert_eq!(recent[1].status, "processed");
    assert!(recent[1].match_type.is_none());

    assert_eq!(
        NotificationRepo::count_by_status(&pool, NotificationKind::MatchAlert, NotificationStatus::Failed)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        NotificationRepo::count_by_status(&pool, NotificationKind::MatchAlert, NotificationStatus::Sent)
            .await
            .unwrap(),
        0
    );
}

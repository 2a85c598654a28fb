//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod item_report_repo;
pub mod notification_repo;
pub mod person_report_repo;

pub use item_report_repo::ItemReportRepo;
pub use notification_repo::NotificationRepo;
pub use person_report_repo::PersonReportRepo;

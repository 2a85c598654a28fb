//! Row structs and insert DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` row struct mirroring the table, text columns as `String`
//! - A conversion from the row into the domain type from `milaap_core`
//! - A create DTO with typed fields for inserts

use milaap_core::error::CoreError;

pub mod item_report;
pub mod notification;
pub mod person_report;

/// Convert a fetched row into its domain type, reporting bad column values
/// as decode errors.
pub(crate) fn into_domain<R, T>(row: R) -> Result<T, sqlx::Error>
where
    R: TryInto<T, Error = CoreError>,
{
    row.try_into().map_err(|e: CoreError| sqlx::Error::Decode(Box::new(e)))
}

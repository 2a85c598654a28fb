//! Match-alert notification tasks and their message templates.
//!
//! A [`NotificationTask`] carries a snapshot of the other party's report
//! ([`MatchDetails`]), not a reference to it, so later edits to that report
//! do not change an alert that is already queued.

use serde::{Deserialize, Serialize};

use crate::report::{ItemReport, MatchType, PersonReport};
use crate::types::DbId;

/// Placeholder rendered for absent snapshot fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Help-center number printed in alerts when none is configured.
pub const DEFAULT_HELP_CENTER_NUMBER: &str = "+91-XXXXXXXXXX";

define_text_enum! {
    /// Delivery status of a notification record.
    ///
    /// Match alerts start `pending` and move exactly once to `sent` or
    /// `failed`. Inbound chat messages are logged as `processed`.
    NotificationStatus {
        Pending = "pending",
        Sent = "sent",
        Failed = "failed",
        Processed = "processed",
    }
}

define_text_enum! {
    /// Kind of notification record.
    NotificationKind {
        MatchAlert = "match_alert",
        Incoming = "incoming",
    }
}

impl NotificationStatus {
    /// Whether the status can no longer change.
    pub fn is_terminal(self) -> bool {
        !matches!(self, NotificationStatus::Pending)
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Copy of a report's attributes taken when an alert is queued.
///
/// Holds the union of person and item attributes; the template selected by
/// [`MatchType`] decides which fields are printed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl From<&PersonReport> for MatchDetails {
    fn from(report: &PersonReport) -> Self {
        Self {
            name: report.name.clone(),
            age: report.age.clone(),
            gender: report.gender.clone(),
            description: report.description.clone(),
            location: report.location.clone(),
            contact: Some(report.contact.clone()),
            ..Self::default()
        }
    }
}

impl From<&ItemReport> for MatchDetails {
    fn from(report: &ItemReport) -> Self {
        Self {
            category: report.category.clone(),
            color: report.color.clone(),
            brand: report.brand.clone(),
            description: report.description.clone(),
            location: report.location.clone(),
            contact: Some(report.contact.clone()),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// One outbound match alert waiting for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationTask {
    pub contact_number: String,
    pub match_type: MatchType,
    pub match_details: MatchDetails,
    /// Percentage in `[0, 100]`, rounded to two decimals.
    pub similarity_score: f64,
    /// Identifier the recipient should quote when following up.
    pub report_id: String,
}

/// One party of a matched pair.
#[derive(Debug, Clone, Copy)]
pub struct MatchParty<'a> {
    pub id: DbId,
    pub contact: &'a str,
    pub details: &'a MatchDetails,
}

impl NotificationTask {
    /// The two alerts for a matched pair, one per party.
    ///
    /// Each party receives the other's snapshot and is told to quote its own
    /// report id.
    pub fn for_pair(
        match_type: MatchType,
        new_report: MatchParty<'_>,
        candidate: MatchParty<'_>,
        score: f64,
    ) -> [NotificationTask; 2] {
        let similarity_score = score_percent(score);
        [
            NotificationTask {
                contact_number: new_report.contact.to_string(),
                match_type,
                match_details: candidate.details.clone(),
                similarity_score,
                report_id: new_report.id.to_string(),
            },
            NotificationTask {
                contact_number: candidate.contact.to_string(),
                match_type,
                match_details: new_report.details.clone(),
                similarity_score,
                report_id: candidate.id.to_string(),
            },
        ]
    }

    /// Render the alert text for this task.
    ///
    /// Deterministic: the same task and help-center number always produce
    /// the same bytes.
    pub fn render_message(&self, help_center: &str) -> String {
        let d = &self.match_details;
        let body = match self.match_type {
            MatchType::Person => format!(
                "✅ Potential MATCH found for your missing person report!\n\n\
                 Name: {} (approx age {})\n\
                 Gender: {}\n\
                 Description: {}\n\
                 Location: {}\n\
                 Found report contact: {}\n\n",
                or_na(&d.name),
                or_na(&d.age),
                or_na(&d.gender),
                or_na(&d.description),
                or_na(&d.location),
                or_na(&d.contact),
            ),
            MatchType::Item => format!(
                "✅ Potential MATCH found for your lost item report!\n\n\
                 Category: {} | Color: {} | Brand: {}\n\
                 Description: {}\n\
                 Location: {}\n\
                 Found by contact: {}\n\n",
                or_na(&d.category),
                or_na(&d.color),
                or_na(&d.brand),
                or_na(&d.description),
                or_na(&d.location),
                or_na(&d.contact),
            ),
        };

        format!(
            "{body}Similarity Score: {}%\n\n\
             Please contact our help center for verification: {help_center}\n\
             Reference ID: {}",
            self.similarity_score, self.report_id
        )
    }
}

/// Convert a `[0, 1]` match score to a percentage rounded to two decimals.
pub fn score_percent(score: f64) -> f64 {
    (score * 100.0 * 100.0).round() / 100.0
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

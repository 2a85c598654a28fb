//! Render, record and send one match alert.

use std::sync::Arc;

use milaap_core::notification::{NotificationStatus, NotificationTask};
use milaap_db::models::notification::CreateMatchAlert;

use crate::delivery::MessageChannel;
use crate::persistence::{NotificationStore, StoreError};

/// Error type for a dispatch that could not be recorded.
///
/// A failed send is not an error: it is recorded as `failed` and reported
/// through the `Ok(false)` outcome.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Failed to record notification: {0}")]
    Store(#[from] StoreError),
}

/// Turns a [`NotificationTask`] into a sent (or failed) notification record.
pub struct NotificationDispatcher {
    store: Arc<dyn NotificationStore>,
    channel: Arc<dyn MessageChannel>,
    help_center: String,
}

impl NotificationDispatcher {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        channel: Arc<dyn MessageChannel>,
        help_center: impl Into<String>,
    ) -> Self {
        Self {
            store,
            channel,
            help_center: help_center.into(),
        }
    }

    /// Deliver one alert.
    ///
    /// Persists the record as `pending`, sends through the channel exactly
    /// once, then marks the record `sent` or `failed`. Returns whether the
    /// send succeeded.
    pub async fn dispatch(&self, task: &NotificationTask) -> Result<bool, DispatchError> {
        let message = task.render_message(&self.help_center);

        let alert = CreateMatchAlert {
            contact_number: task.contact_number.clone(),
            message,
            match_type: task.match_type,
            similarity_score: task.similarity_score,
            report_id: task.report_id.clone(),
        };
        let record_id = self.store.create_pending(&alert).await?;
        tracing::debug!(record_id, contact = %task.contact_number, "Notification recorded");

        let outcome = self.channel.send(&task.contact_number, &alert.message).await;
        let status = match &outcome {
            Ok(()) => NotificationStatus::Sent,
            Err(e) => {
                tracing::warn!(
                    record_id,
                    channel = self.channel.name(),
                    error = %e,
                    "Failed to send notification"
                );
                NotificationStatus::Failed
            }
        };

        if !self.store.set_status(record_id, status).await? {
            tracing::warn!(record_id, %status, "Notification record was no longer pending");
        }
        tracing::info!(record_id, %status, contact = %task.contact_number, "Notification dispatched");

        Ok(outcome.is_ok())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

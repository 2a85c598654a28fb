//! In-memory doubles for the store and channel seams.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use milaap_core::notification::{MatchDetails, NotificationStatus, NotificationTask};
use milaap_core::report::MatchType;
use milaap_core::types::DbId;
use milaap_db::models::notification::CreateMatchAlert;

use crate::delivery::{ChannelError, MessageChannel};
use crate::persistence::{NotificationStore, StoreError};

pub fn task_for(contact: &str) -> NotificationTask {
    NotificationTask {
        contact_number: contact.to_string(),
        match_type: MatchType::Person,
        match_details: MatchDetails {
            name: Some("Ram Kumer".into()),
            age: Some("26".into()),
            ..MatchDetails::default()
        },
        similarity_score: 72.25,
        report_id: "42".into(),
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub id: DbId,
    pub contact_number: String,
    pub message: String,
    pub status: NotificationStatus,
    pub history: Vec<NotificationStatus>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredRecord>>,
    unavailable: bool,
}

impl MemoryStore {
    /// A store whose every write fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<StoredRecord> {
        self.records.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn create_pending(&self, alert: &CreateMatchAlert) -> Result<DbId, StoreError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let id = records.len() as DbId + 1;
        records.push(StoredRecord {
            id,
            contact_number: alert.contact_number.clone(),
            message: alert.message.clone(),
            status: NotificationStatus::Pending,
            history: vec![NotificationStatus::Pending],
        });
        Ok(id)
    }

    async fn set_status(&self, id: DbId, status: NotificationStatus) -> Result<bool, StoreError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) if record.status == NotificationStatus::Pending => {
                record.status = status;
                record.history.push(status);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<(String, String)>>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
}

impl RecordingChannel {
    /// Sends to these numbers return an error.
    pub fn failing_for<'a>(numbers: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            failing: numbers.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    /// Sends to these numbers panic.
    pub fn panicking_for<'a>(numbers: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            panicking: numbers.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    /// Every successful send, in order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self) -> Vec<String> {
        self.sent().into_iter().map(|(to, _)| to).collect()
    }
}

#[async_trait]
impl MessageChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, to: &str, body: &str) -> Result<(), ChannelError> {
        if self.panicking.contains(to) {
            panic!("channel exploded for {to}");
        }
        if self.failing.contains(to) {
            return Err(ChannelError::HttpStatus(503));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}

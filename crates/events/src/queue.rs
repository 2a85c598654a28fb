//! Unbounded FIFO of notification tasks.
//!
//! Any number of request handlers hold a cloned [`NotificationQueue`] and
//! enqueue without blocking; the one [`NotificationReceiver`] belongs to the
//! worker. [`QueueMessage::Shutdown`] is the sentinel that ends the worker.

use milaap_core::notification::{MatchDetails, NotificationTask};
use milaap_core::report::MatchType;
use tokio::sync::mpsc;

/// One entry in the queue.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueMessage {
    Task(NotificationTask),
    /// Stop the worker once every earlier entry has been processed.
    Shutdown,
}

/// Producer handle. Cheap to clone.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    tx: mpsc::UnboundedSender<QueueMessage>,
}

/// Consumer half, owned by the worker.
#[derive(Debug)]
pub struct NotificationReceiver {
    rx: mpsc::UnboundedReceiver<QueueMessage>,
}

impl NotificationQueue {
    /// Create a queue and its receiver.
    pub fn new() -> (Self, NotificationReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, NotificationReceiver { rx })
    }

    /// Push a task. Never blocks.
    ///
    /// If the worker is already gone the task is dropped with a warning; the
    /// producer is never told.
    pub fn enqueue(&self, task: NotificationTask) {
        let contact = task.contact_number.clone();
        if self.tx.send(QueueMessage::Task(task)).is_err() {
            tracing::warn!(contact = %contact, "Notification queue closed, dropping alert");
        }
    }

    /// Build and push a task from its parts.
    pub fn enqueue_alert(
        &self,
        contact_number: impl Into<String>,
        match_type: MatchType,
        match_details: MatchDetails,
        similarity_score: f64,
        report_id: impl Into<String>,
    ) {
        self.enqueue(NotificationTask {
            contact_number: contact_number.into(),
            match_type,
            match_details,
            similarity_score,
            report_id: report_id.into(),
        });
    }

    /// Push the shutdown sentinel behind everything already queued.
    pub fn shutdown(&self) {
        if self.tx.send(QueueMessage::Shutdown).is_err() {
            tracing::debug!("Notification queue already closed");
        }
    }
}

impl NotificationReceiver {
    /// Wait for the next entry.
    ///
    /// Returns `None` only when every producer handle has been dropped.
    pub async fn recv(&mut self) -> Option<QueueMessage> {
        self.rx.recv().await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

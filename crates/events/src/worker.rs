//! The single background consumer of the notification queue.
//!
//! [`NotificationWorker`] takes one entry at a time and hands tasks to the
//! [`NotificationDispatcher`]. Only the shutdown sentinel (or every producer
//! going away) ends the loop: dispatch errors and panics are logged, the
//! worker pauses, and the next task is processed.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::dispatcher::NotificationDispatcher;
use crate::queue::{NotificationReceiver, QueueMessage};

/// Pause after a task whose dispatch errored or panicked.
pub const DEFAULT_ERROR_PAUSE: Duration = Duration::from_secs(5);

/// Counters returned when the worker stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub sent: u64,
    pub failed: u64,
    pub errored: u64,
}

impl WorkerSummary {
    /// Tasks taken off the queue.
    pub fn processed(&self) -> u64 {
        self.sent + self.failed + self.errored
    }
}

pub struct NotificationWorker {
    receiver: NotificationReceiver,
    dispatcher: NotificationDispatcher,
    error_pause: Duration,
}

impl NotificationWorker {
    pub fn new(receiver: NotificationReceiver, dispatcher: NotificationDispatcher) -> Self {
        Self {
            receiver,
            dispatcher,
            error_pause: DEFAULT_ERROR_PAUSE,
        }
    }

    /// Override the pause taken after a dispatch error.
    pub fn with_error_pause(mut self, pause: Duration) -> Self {
        self.error_pause = pause;
        self
    }

    /// Run the worker on its own task.
    pub fn spawn(self) -> JoinHandle<WorkerSummary> {
        tokio::spawn(self.run())
    }

    /// Drain the queue until the shutdown sentinel.
    pub async fn run(mut self) -> WorkerSummary {
        let mut summary = WorkerSummary::default();
        tracing::info!("Notification worker started");

        loop {
            let task = match self.receiver.recv().await {
                Some(QueueMessage::Task(task)) => task,
                Some(QueueMessage::Shutdown) => {
                    tracing::info!("Shutdown sentinel received, notification worker stopping");
                    break;
                }
                None => {
                    tracing::info!("Notification queue closed, worker stopping");
                    break;
                }
            };

            let outcome = AssertUnwindSafe(self.dispatcher.dispatch(&task))
                .catch_unwind()
                .await;

            match outcome {
                Ok(Ok(true)) => summary.sent += 1,
                Ok(Ok(false)) => summary.failed += 1,
                Ok(Err(e)) => {
                    summary.errored += 1;
                    tracing::error!(error = %e, contact = %task.contact_number, "Notification dispatch failed");
                    tokio::time::sleep(self.error_pause).await;
                }
                Err(_) => {
                    summary.errored += 1;
                    tracing::error!(contact = %task.contact_number, "Notification dispatch panicked");
                    tokio::time::sleep(self.error_pause).await;
                }
            }
        }

        tracing::info!(
            sent = summary.sent,
            failed = summary.failed,
            errored = summary.errored,
            "Notification worker stopped"
        );
        summary
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use milaap_core::notification::NotificationStatus;

    use super::*;
    use crate::queue::NotificationQueue;
    use crate::testing::{task_for, MemoryStore, RecordingChannel};

    fn worker(
        store: Arc<MemoryStore>,
        channel: Arc<RecordingChannel>,
    ) -> (NotificationQueue, NotificationWorker) {
        let (queue, receiver) = NotificationQueue::new();
        let dispatcher = NotificationDispatcher::new(store, channel, "+91-0000000000");
        let worker = NotificationWorker::new(receiver, dispatcher).with_error_pause(Duration::ZERO);
        (queue, worker)
    }

    #[tokio::test]
    async fn processes_tasks_in_fifo_order_then_stops() {
        let store = Arc::new(MemoryStore::default());
        let channel = Arc::new(RecordingChannel::default());
        let (queue, worker) = worker(store.clone(), channel.clone());

        let contacts: Vec<String> = (1..=10).map(|i| format!("+91{i}")).collect();
        for c in &contacts {
            queue.enqueue(task_for(c));
        }
        queue.shutdown();

        let summary = worker.run().await;

        assert_eq!(summary.sent, 10);
        assert_eq!(channel.sent_to(), contacts);
        let recorded: Vec<String> = store.records().into_iter().map(|r| r.contact_number).collect();
        assert_eq!(recorded, contacts);
    }

    #[tokio::test]
    async fn failed_send_does_not_block_the_next_task() {
        let store = Arc::new(MemoryStore::default());
        let channel = Arc::new(RecordingChannel::failing_for(["+912"]));
        let (queue, worker) = worker(store.clone(), channel.clone());

        for c in ["+911", "+912", "+913"] {
            queue.enqueue(task_for(c));
        }
        queue.shutdown();

        let summary = worker.run().await;

        assert_eq!(summary, WorkerSummary { sent: 2, failed: 1, errored: 0 });
        assert_eq!(channel.sent_to(), vec!["+911", "+913"]);
        let statuses: Vec<_> = store.records().into_iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![NotificationStatus::Sent, NotificationStatus::Failed, NotificationStatus::Sent]
        );
    }

    #[tokio::test]
    async fn panicking_dispatch_is_contained() {
        let store = Arc::new(MemoryStore::default());
        let channel = Arc::new(RecordingChannel::panicking_for(["+911"]));
        let (queue, worker) = worker(store.clone(), channel.clone());

        queue.enqueue(task_for("+911"));
        queue.enqueue(task_for("+912"));
        queue.shutdown();

        let summary = worker.spawn().await.unwrap();

        assert_eq!(summary.errored, 1);
        assert_eq!(summary.sent, 1);
        assert_eq!(channel.sent_to(), vec!["+912"]);
        // The panicked task's record is left pending, never marked twice.
        assert_eq!(store.records()[0].history, vec![NotificationStatus::Pending]);
    }

    #[tokio::test]
    async fn store_errors_are_logged_and_skipped() {
        let store = Arc::new(MemoryStore::unavailable());
        let channel = Arc::new(RecordingChannel::default());
        let (queue, worker) = worker(store, channel.clone());

        queue.enqueue(task_for("+911"));
        queue.enqueue(task_for("+912"));
        queue.shutdown();

        let summary = worker.run().await;

        assert_eq!(summary.errored, 2);
        assert!(channel.sent().is_empty());
    }

    #[tokio::test]
    async fn sentinel_stops_before_later_entries() {
        let store = Arc::new(MemoryStore::default());
        let channel = Arc::new(RecordingChannel::default());
        let (queue, worker) = worker(store, channel.clone());

        queue.enqueue(task_for("+911"));
        queue.shutdown();
        queue.enqueue(task_for("+912"));

        let summary = worker.run().await;

        assert_eq!(summary.processed(), 1);
        assert_eq!(channel.sent_to(), vec!["+911"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_producers_get_exactly_n_dispatches() {
        let store = Arc::new(MemoryStore::default());
        let channel = Arc::new(RecordingChannel::default());
        let (queue, worker) = worker(store.clone(), channel.clone());
        let handle = worker.spawn();

        let producers: Vec<_> = (0..4)
            .map(|p| {
                let queue = queue.clone();
                tokio::spawn(async move {
                    for i in 0..25 {
                        queue.enqueue(task_for(&format!("p{p}-{i:02}")));
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.await.unwrap();
        }
        queue.shutdown();

        let summary = handle.await.unwrap();
        assert_eq!(summary.sent, 100);

        let sent = channel.sent_to();
        assert_eq!(sent.len(), 100);
        for p in 0..4 {
            let prefix = format!("p{p}-");
            let mine: Vec<&String> = sent.iter().filter(|c| c.starts_with(&prefix)).collect();
            let mut sorted = mine.clone();
            sorted.sort();
            assert_eq!(mine, sorted, "producer {p} order preserved");
        }
        assert!(store.records().iter().all(|r| r.status == NotificationStatus::Sent));
    }

    #[tokio::test]
    async fn dropping_every_producer_ends_the_worker() {
        let store = Arc::new(MemoryStore::default());
        let channel = Arc::new(RecordingChannel::default());
        let (queue, worker) = worker(store, channel);

        queue.enqueue(task_for("+911"));
        drop(queue);

        assert_eq!(worker.run().await.sent, 1);
    }
}

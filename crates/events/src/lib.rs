//! Milaap match-alert notification pipeline.
//!
//! - [`NotificationQueue`]: unbounded FIFO of alert tasks, cloned into
//!   every request handler.
//! - [`NotificationWorker`]: the single background consumer draining the
//!   queue until it sees the shutdown sentinel.
//! - [`NotificationDispatcher`]: renders, records and sends one alert.
//! - [`persistence`]: the notification-record store seam.
//! - [`delivery`]: outbound message channels (WhatsApp, simulated).

pub mod delivery;
pub mod dispatcher;
pub mod persistence;
pub mod queue;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use delivery::simulated::SimulatedChannel;
pub use delivery::whatsapp::{TwilioConfig, WhatsAppChannel};
pub use delivery::{channel_from_env, ChannelError, MessageChannel};
pub use dispatcher::{DispatchError, NotificationDispatcher};
pub use persistence::{NotificationStore, PgNotificationStore, StoreError};
pub use queue::{NotificationQueue, NotificationReceiver, QueueMessage};
pub use worker::NotificationWorker;

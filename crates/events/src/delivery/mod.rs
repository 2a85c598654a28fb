//! Outbound message channels.
//!
//! The dispatcher talks to a [`MessageChannel`]; which one is chosen at
//! startup by [`channel_from_env`]: WhatsApp over Twilio when credentials
//! are configured, otherwise the log-only [`SimulatedChannel`].

use std::sync::Arc;

use async_trait::async_trait;

pub mod simulated;
pub mod whatsapp;

use simulated::SimulatedChannel;
use whatsapp::{TwilioConfig, WhatsAppChannel};

/// Error type for a failed send.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status code.
    #[error("Provider returned HTTP {0}")]
    HttpStatus(u16),
}

/// Something that can deliver a text message to a phone number.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Deliver `body` to `to`. Exactly one attempt.
    async fn send(&self, to: &str, body: &str) -> Result<(), ChannelError>;
}

/// Pick the outbound channel from the environment.
pub fn channel_from_env() -> Arc<dyn MessageChannel> {
    match TwilioConfig::from_env() {
        Some(config) => {
            tracing::info!(from = %config.from_number, "WhatsApp delivery enabled");
            Arc::new(WhatsAppChannel::new(config))
        }
        None => {
            tracing::warn!("Twilio credentials not set, alerts will be simulated");
            Arc::new(SimulatedChannel)
        }
    }
}

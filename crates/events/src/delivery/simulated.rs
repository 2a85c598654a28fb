//! Log-only channel used when no provider is configured.

use async_trait::async_trait;

use super::{ChannelError, MessageChannel};

/// Logs every message and reports success.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedChannel;

#[async_trait]
impl MessageChannel for SimulatedChannel {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn send(&self, to: &str, body: &str) -> Result<(), ChannelError> {
        tracing::info!(to, body, "Simulated WhatsApp message");
        Ok(())
    }
}

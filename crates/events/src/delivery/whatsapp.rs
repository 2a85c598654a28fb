//! WhatsApp delivery through the Twilio Messages REST API.
//!
//! [`WhatsAppChannel`] posts one form-encoded message per call. There is no
//! retry: a transport error or non-2xx answer is returned to the dispatcher,
//! which records the alert as failed.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{ChannelError, MessageChannel};

/// Default API base URL.
pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// HTTP request timeout for a single send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const WHATSAPP_PREFIX: &str = "whatsapp:";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Twilio credentials and sender number.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub api_base: String,
}

impl TwilioConfig {
    /// Read `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN` and
    /// `TWILIO_WHATSAPP_NUMBER`.
    ///
    /// Returns `None` unless all three are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Some(Self {
            account_sid: var("TWILIO_ACCOUNT_SID")?,
            auth_token: var("TWILIO_AUTH_TOKEN")?,
            from_number: var("TWILIO_WHATSAPP_NUMBER")?,
            api_base: TWILIO_API_BASE.to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base.trim_end_matches('/'),
            self.account_sid
        )
    }
}

/// Prefix a phone number with `whatsapp:` unless it already has it.
pub fn whatsapp_address(number: &str) -> String {
    if number.starts_with(WHATSAPP_PREFIX) {
        number.to_string()
    } else {
        format!("{WHATSAPP_PREFIX}{number}")
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: Option<String>,
}

/// Sends messages as WhatsApp through Twilio.
pub struct WhatsAppChannel {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl WhatsAppChannel {
    /// Create a channel with a pre-configured HTTP client.
    pub fn new(config: TwilioConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }
}

#[async_trait]
impl MessageChannel for WhatsAppChannel {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    async fn send(&self, to: &str, body: &str) -> Result<(), ChannelError> {
        let to = whatsapp_address(to);
        let from = whatsapp_address(&self.config.from_number);
        let form = [("From", from.as_str()), ("To", to.as_str()), ("Body", body)];

        let response = self
            .client
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChannelError::HttpStatus(status.as_u16()));
        }

        let sid = response
            .json::<MessageResource>()
            .await
            .ok()
            .and_then(|m| m.sid)
            .unwrap_or_default();
        tracing::info!(to = %to, sid = %sid, "WhatsApp message sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

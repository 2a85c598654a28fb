//! Inbound chat webhook.
//!
//! Accepts a JSON body `{from, body}` or the provider's form-encoded
//! `From`/`Body`, logs the message and answers with a canned reply.

use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;

use milaap_core::inbound::reply_for;
use milaap_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Reply sent when the message could not be logged.
pub const ERROR_REPLY: &str = "We encountered an error. Please try again later.";

#[derive(Debug, Default, Deserialize)]
struct JsonMessage {
    #[serde(default)]
    from: String,
    #[serde(default)]
    body: String,
}

#[derive(Debug, Default, Deserialize)]
struct FormMessage {
    #[serde(rename = "From", default)]
    from: String,
    #[serde(rename = "Body", default)]
    body: String,
}

/// An inbound message in either wire shape.
#[derive(Debug)]
pub struct InboundMessage {
    pub from: String,
    pub body: String,
}

impl<S: Send + Sync> FromRequest<S> for InboundMessage {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        if is_json {
            let Json(m) = Json::<JsonMessage>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Self { from: m.from, body: m.body })
        } else {
            let Form(m) = Form::<FormMessage>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Self { from: m.from, body: m.body })
        }
    }
}

// ---------------------------------------------------------------------------
// POST /whatsapp
// ---------------------------------------------------------------------------

/// Log an inbound chat message and return the reply text.
pub async fn whatsapp_webhook(
    State(state): State<AppState>,
    message: InboundMessage,
) -> AppResult<impl IntoResponse> {
    tracing::info!(from = %message.from, body = %message.body, "Inbound WhatsApp message");

    let response = match NotificationRepo::log_incoming(&state.pool, &message.from, &message.body)
        .await
    {
        Ok(_) => reply_for(&message.body),
        Err(e) => {
            tracing::error!(error = %e, from = %message.from, "Failed to log inbound message");
            ERROR_REPLY.to_string()
        }
    };

    Ok(Json(json!({ "response": response })))
}

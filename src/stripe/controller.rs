use axum::{extract::State, http::HeaderMap, Json};
use axum_macros::debug_handler;
use bytes::Bytes;
use serde_json::{json, Value};

use crate::{app::models::api_error::ApiError, AppState};

use super::{errors::StripeApiError, service, signature::SignatureVerifier};

pub static SIGNATURE_HEADER: &str = "stripe-signature";

/// The body is taken as raw bytes; the signature covers them exactly as sent.
#[debug_handler]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    let (Some(signature), Some(secret)) = (signature, state.stripe.webhook_secret.as_deref())
    else {
        tracing::warn!("stripe webhook rejected: missing signature header or webhook secret");
        return Err(StripeApiError::SignatureNotFound.value());
    };

    let verifier = SignatureVerifier::new(secret, state.stripe.tolerance_secs);
    let event = match verifier.construct_event(&body, signature) {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(error = %e.value(), "stripe webhook verification failed");
            return Err(StripeApiError::VerificationFailed.value());
        }
    };

    match service::handle_event(&event, &state.stripe, &state.handlers).await {
        Ok(outcome) => {
            tracing::info!(
                event_id = %event.id,
                event_type = %event.event_type,
                created = event.created,
                livemode = event.livemode,
                ?outcome,
                "stripe webhook received"
            );
            Ok(Json(json!({ "message": "Webhook received" })))
        }
        Err(e) => {
            tracing::error!(
                event_id = %event.id,
                event_type = %event.event_type,
                error = %e.value().message,
                "stripe webhook processing failed"
            );
            Err(StripeApiError::ProcessingFailed.value())
        }
    }
}

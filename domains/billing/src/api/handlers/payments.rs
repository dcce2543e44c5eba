//! Payment API handlers
//!
//! Intent creation requires an authenticated caller; the webhook endpoint is
//! unauthenticated but only acknowledges payloads carrying a valid provider
//! signature.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use taskhub_auth::AuthUser;
use taskhub_common::{Error, Result, ValidatedJson};
use taskhub_payments::signature::verify_signature;
use validator::Validate;

use crate::api::middleware::BillingState;

const DEFAULT_CURRENCY: &str = "usd";

/// Request for creating a payment intent
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIntentRequest {
    /// Amount in the currency's smallest unit
    #[validate(range(min = 1))]
    pub amount: i64,
    #[validate(length(min = 3, max = 3))]
    pub currency: Option<String>,
}

/// Payment intent response DTO
#[derive(Debug, Serialize)]
pub struct PaymentIntentResponse {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

/// Create a payment intent through the configured gateway
pub async fn create_intent(
    AuthUser(ctx): AuthUser,
    State(state): State<BillingState>,
    ValidatedJson(req): ValidatedJson<CreateIntentRequest>,
) -> Result<(StatusCode, Json<PaymentIntentResponse>)> {
    let currency = req
        .currency
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
        .to_lowercase();

    let intent = state
        .gateway
        .create_intent(req.amount, &currency)
        .await
        .map_err(|e| Error::Internal(format!("Payment gateway error: {}", e)))?;

    tracing::info!(
        organization_id = %ctx.organization_id(),
        intent_id = %intent.id,
        amount = intent.amount,
        "Created payment intent"
    );

    Ok((
        StatusCode::CREATED,
        Json(PaymentIntentResponse {
            id: intent.id,
            amount: intent.amount,
            currency: intent.currency,
            status: intent.status,
        }),
    ))
}

/// Receive a provider webhook.
///
/// The raw body is verified against the `Stripe-Signature` header before any
/// parsing; an absent or invalid signature is rejected as unauthenticated.
pub async fn webhook(
    State(state): State<BillingState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>> {
    let header = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| Error::Authentication("Missing webhook signature".to_string()))?;

    verify_signature(
        &state.webhook_secret,
        header,
        &body,
        Utc::now().timestamp(),
    )
    .map_err(|e| {
        tracing::warn!("Rejected webhook: {}", e);
        Error::Authentication("Invalid webhook signature".to_string())
    })?;

    Ok(Json(json!({ "received": true })))
}

//! Route definitions for Billing domain API

use axum::{routing::post, Router};

use super::handlers::payments;
use super::middleware::BillingState;

/// Create all Billing domain API routes
pub fn routes() -> Router<BillingState> {
    Router::new()
        .route("/v1/payments/create-intent", post(payments::create_intent))
        .route("/v1/payments/webhook", post(payments::webhook))
}

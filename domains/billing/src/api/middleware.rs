//! Billing domain state and auth backend integration

use std::sync::Arc;

use axum::extract::FromRef;
use taskhub_auth::AuthBackend;
use taskhub_payments::PaymentGateway;

/// Application state for the Billing domain
#[derive(Clone)]
pub struct BillingState {
    pub gateway: Arc<dyn PaymentGateway>,
    /// Shared secret for verifying inbound webhook signatures
    pub webhook_secret: String,
    pub auth: AuthBackend,
}

impl FromRef<BillingState> for AuthBackend {
    fn from_ref(state: &BillingState) -> Self {
        state.auth.clone()
    }
}

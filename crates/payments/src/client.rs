//! Stripe-style HTTP gateway implementation
//!
//! POSTs form-encoded payment intent requests to
//! `{base_url}/v1/payment_intents` authenticated with the secret key.

use crate::{PaymentConfig, PaymentError, PaymentGateway, PaymentIntent};

/// Real payment gateway speaking the Stripe payment-intents API shape.
pub struct StripeGateway {
    http: reqwest::Client,
    intents_url: String,
    secret_key: String,
}

impl StripeGateway {
    /// Create a new gateway from configuration.
    pub fn new(config: PaymentConfig) -> Self {
        let intents_url = format!(
            "{}/v1/payment_intents",
            config.base_url.trim_end_matches('/')
        );
        Self {
            http: reqwest::Client::new(),
            intents_url,
            secret_key: config.secret_key,
        }
    }
}

#[async_trait::async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let params = [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
        ];

        let response = self
            .http
            .post(&self.intents_url)
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(PaymentError::Response(format!(
                "Payment API returned {}: {}",
                status, body
            )));
        }

        let intent: PaymentIntent = response
            .json()
            .await
            .map_err(|e| PaymentError::Response(e.to_string()))?;

        tracing::debug!(intent_id = %intent.id, amount, "Payment intent created");
        Ok(intent)
    }
}

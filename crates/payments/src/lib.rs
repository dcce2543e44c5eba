//! TaskHub payment provider interface
//!
//! Provides payment-intent issuing with support for:
//! - Stripe-style HTTP provider integration for production
//! - Mock gateway for testing and development (a test double, never a
//!   stand-in for verified behavior)
//! - Mandatory webhook signature verification

pub mod client;
pub mod mock;
pub mod signature;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Payment configuration error: {0}")]
    Configuration(String),

    #[error("Payment request error: {0}")]
    Request(String),

    #[error("Payment response error: {0}")]
    Response(String),

    #[error("Webhook signature error: {0}")]
    Signature(String),
}

/// A payment intent as returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Amount in the currency's smallest unit (cents for usd)
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

/// Payment service configuration.
#[derive(Clone)]
pub struct PaymentConfig {
    /// Payment provider (stripe, mock)
    pub provider: String,
    /// Secret key for authenticating with the provider API
    pub secret_key: String,
    /// Base URL for the provider API
    pub base_url: String,
    /// Shared secret for verifying inbound webhook signatures
    pub webhook_secret: String,
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("provider", &self.provider)
            .field("secret_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("webhook_secret", &"[REDACTED]")
            .finish()
    }
}

impl PaymentConfig {
    /// Create payment config from environment variables.
    pub fn from_env() -> Result<Self, PaymentError> {
        let provider = std::env::var("PAYMENT_PROVIDER").unwrap_or_else(|_| "mock".to_string());

        let secret_key = std::env::var("PAYMENT_SECRET_KEY").unwrap_or_else(|_| {
            if provider == "mock" {
                "mock-secret-key".to_string()
            } else {
                String::new()
            }
        });

        let base_url = std::env::var("PAYMENT_BASE_URL")
            .unwrap_or_else(|_| "https://api.stripe.com".to_string());

        let webhook_secret = std::env::var("PAYMENT_WEBHOOK_SECRET").unwrap_or_else(|_| {
            if provider == "mock" {
                "mock-webhook-secret".to_string()
            } else {
                String::new()
            }
        });

        if provider != "mock" && secret_key.is_empty() {
            return Err(PaymentError::Configuration(
                "PAYMENT_SECRET_KEY is required for the stripe provider".to_string(),
            ));
        }

        if webhook_secret.is_empty() {
            return Err(PaymentError::Configuration(
                "PAYMENT_WEBHOOK_SECRET is required".to_string(),
            ));
        }

        Ok(Self {
            provider,
            secret_key,
            base_url,
            webhook_secret,
        })
    }
}

/// Payment gateway trait for different provider implementations.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for the given amount and currency.
    async fn create_intent(&self, amount: i64, currency: &str)
        -> Result<PaymentIntent, PaymentError>;
}

/// Factory for creating PaymentGateway implementations.
pub struct PaymentGatewayFactory;

impl PaymentGatewayFactory {
    /// Create a PaymentGateway based on configuration.
    pub fn create(config: PaymentConfig) -> Result<Box<dyn PaymentGateway>, PaymentError> {
        match config.provider.as_str() {
            "stripe" => {
                tracing::info!("Creating Stripe payment gateway");
                if config.secret_key.is_empty() {
                    return Err(PaymentError::Configuration(
                        "PAYMENT_SECRET_KEY is required for the stripe provider".to_string(),
                    ));
                }
                Ok(Box::new(client::StripeGateway::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock payment gateway");
                Ok(Box::new(mock::MockPaymentGateway::new()))
            }
            provider => Err(PaymentError::Configuration(format!(
                "Unknown payment provider: {}. Supported providers: stripe, mock",
                provider
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_debug_redacts_secrets() {
        let config = PaymentConfig {
            provider: "stripe".to_string(),
            secret_key: "sk_live_abc".to_string(),
            base_url: "https://api.stripe.com".to_string(),
            webhook_secret: "whsec_xyz".to_string(),
        };
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("sk_live_abc"));
        assert!(!rendered.contains("whsec_xyz"));
    }

    #[test]
    fn test_factory_rejects_stripe_without_secret_key() {
        let config = PaymentConfig {
            provider: "stripe".to_string(),
            secret_key: String::new(),
            base_url: "https://api.stripe.com".to_string(),
            webhook_secret: "whsec".to_string(),
        };
        assert!(PaymentGatewayFactory::create(config).is_err());
    }

    #[test]
    fn test_factory_mock_succeeds() {
        let config = PaymentConfig {
            provider: "mock".to_string(),
            secret_key: String::new(),
            base_url: "https://api.stripe.com".to_string(),
            webhook_secret: "whsec".to_string(),
        };
        assert!(PaymentGatewayFactory::create(config).is_ok());
    }

    #[test]
    fn test_factory_stripe_succeeds() {
        let config = PaymentConfig {
            provider: "stripe".to_string(),
            secret_key: "sk_test_key".to_string(),
            base_url: "https://api.stripe.com".to_string(),
            webhook_secret: "whsec".to_string(),
        };
        assert!(PaymentGatewayFactory::create(config).is_ok());
    }

    #[test]
    fn test_factory_unknown_provider() {
        let config = PaymentConfig {
            provider: "paypal".to_string(),
            secret_key: "key".to_string(),
            base_url: "https://example.com".to_string(),
            webhook_secret: "whsec".to_string(),
        };
        let err = match PaymentGatewayFactory::create(config) {
            Err(e) => e,
            Ok(_) => panic!("Expected error for unknown provider"),
        };
        assert!(err.to_string().contains("Unknown payment provider: paypal"));
    }

    #[test]
    fn test_intent_serialization() {
        let intent = PaymentIntent {
            id: "pi_mock_1700000000000_1".to_string(),
            amount: 500,
            currency: "usd".to_string(),
            status: "succeeded".to_string(),
        };

        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["id"], "pi_mock_1700000000000_1");
        assert_eq!(json["amount"], 500);
        assert_eq!(json["currency"], "usd");
        assert_eq!(json["status"], "succeeded");
    }

    #[test]
    fn test_error_display() {
        let config_err = PaymentError::Configuration("bad config".to_string());
        assert_eq!(
            config_err.to_string(),
            "Payment configuration error: bad config"
        );

        let sig_err = PaymentError::Signature("header missing".to_string());
        assert_eq!(
            sig_err.to_string(),
            "Webhook signature error: header missing"
        );
    }
}

//! Mock payment gateway implementation
//!
//! Fabricates always-succeeding payment intents and records them in memory
//! for test assertions. Thread-safe via `Arc<Mutex<>>`.

use crate::{PaymentError, PaymentGateway, PaymentIntent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Mock payment gateway that records intents for test assertions.
///
/// Intent ids are time-based with a process-wide counter suffix so two
/// intents created within the same millisecond still get distinct ids.
#[derive(Debug, Clone)]
pub struct MockPaymentGateway {
    intents: Arc<Mutex<Vec<PaymentIntent>>>,
    sequence: Arc<AtomicU64>,
}

impl MockPaymentGateway {
    /// Create a new mock payment gateway.
    pub fn new() -> Self {
        Self {
            intents: Arc::new(Mutex::new(Vec::new())),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Return all recorded intents.
    pub fn recorded_intents(&self) -> Vec<PaymentIntent> {
        self.intents
            .lock()
            .expect("intents lock poisoned")
            .clone()
    }

    /// Clear all recorded intents.
    pub fn reset(&self) {
        self.intents
            .lock()
            .expect("intents lock poisoned")
            .clear();
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let intent = PaymentIntent {
            id: format!(
                "pi_mock_{}_{}",
                chrono::Utc::now().timestamp_millis(),
                sequence
            ),
            amount,
            currency: currency.to_string(),
            status: "succeeded".to_string(),
        };

        tracing::debug!(intent_id = %intent.id, amount, "Mock gateway: recording intent");
        self.intents
            .lock()
            .map_err(|e| PaymentError::Request(format!("intents lock poisoned: {e}")))?
            .push(intent.clone());
        Ok(intent)
    }
}

//! Webhook signature verification
//!
//! Inbound webhooks carry a signature header of the form
//! `t=<unix-ts>,v1=<hex(hmac-sha256(secret, "<ts>.<payload>"))>`.
//! Verification is mandatory: unsigned or stale payloads are rejected
//! before any webhook processing happens.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::PaymentError;

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted age (and clock skew) of a signed payload, in seconds.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// Compute the hex signature for a timestamped payload.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Build a signature header for a payload, as a provider (or test) would.
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    format!("t={},v1={}", timestamp, sign_payload(secret, timestamp, payload))
}

/// Verify a signature header against the payload.
///
/// `now` is the verifier's clock (unix seconds); timestamps outside
/// [`SIGNATURE_TOLERANCE_SECS`] are rejected even when the MAC matches.
/// The MAC comparison is constant-time.
pub fn verify_signature(
    secret: &str,
    header: &str,
    payload: &[u8],
    now: i64,
) -> Result<(), PaymentError> {
    let (timestamp, candidate) = parse_header(header)?;

    if (now - timestamp).abs() > SIGNATURE_TOLERANCE_SECS {
        return Err(PaymentError::Signature(
            "Signature timestamp outside tolerance".to_string(),
        ));
    }

    let candidate_bytes = hex::decode(candidate)
        .map_err(|_| PaymentError::Signature("Signature is not valid hex".to_string()))?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    mac.verify_slice(&candidate_bytes)
        .map_err(|_| PaymentError::Signature("Signature mismatch".to_string()))
}

/// Parse `t=<ts>,v1=<hex>` into its components.
fn parse_header(header: &str) -> Result<(i64, &str), PaymentError> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        match part.split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(value.parse::<i64>().map_err(|_| {
                    PaymentError::Signature("Malformed signature timestamp".to_string())
                })?);
            }
            Some(("v1", value)) => signature = Some(value),
            _ => {}
        }
    }

    match (timestamp, signature) {
        (Some(t), Some(v1)) => Ok((t, v1)),
        _ => Err(PaymentError::Signature(
            "Signature header must contain t= and v1=".to_string(),
        )),
    }
}

//! Stripe webhook signature verification.
//!
//! The `Stripe-Signature` header carries a timestamp and one or more
//! HMAC-SHA256 signatures over `"{timestamp}.{raw body}"`.
//! See https://stripe.com/docs/webhooks/signatures

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::app::util::time::current_time_in_secs;

use super::structs::stripe_event::StripeEvent;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_SCHEME: &str = "v1";

#[derive(Debug, PartialEq, Eq)]
pub enum SignatureError {
    MalformedHeader,
    NoSignatures,
    TimestampOutsideTolerance { timestamp: i64, now: i64 },
    Mismatch,
    InvalidPayload(String),
}

impl SignatureError {
    pub fn value(&self) -> String {
        match self {
            Self::MalformedHeader => {
                "Unable to extract timestamp and signatures from header".to_string()
            }
            Self::NoSignatures => "No signatures found with expected scheme".to_string(),
            Self::TimestampOutsideTolerance { timestamp, now } => format!(
                "Timestamp outside the tolerance zone (timestamp={}, now={})",
                timestamp, now
            ),
            Self::Mismatch => "No signatures found matching the expected signature".to_string(),
            Self::InvalidPayload(e) => format!("Invalid event payload: {}", e),
        }
    }
}

pub struct SignatureVerifier<'a> {
    secret: &'a str,
    tolerance_secs: i64,
}

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<Vec<u8>>,
}

impl<'a> SignatureVerifier<'a> {
    pub fn new(secret: &'a str, tolerance_secs: i64) -> Self {
        SignatureVerifier {
            secret,
            tolerance_secs,
        }
    }

    /// Verifies `header` against the untouched request body and only then
    /// parses the body into an event.
    pub fn construct_event(&self, payload: &[u8], header: &str) -> Result<StripeEvent, SignatureError> {
        self.verify_at(payload, header, current_time_in_secs() as i64)?;

        serde_json::from_slice::<StripeEvent>(payload)
            .map_err(|e| SignatureError::InvalidPayload(e.to_string()))
    }

    pub fn verify_at(&self, payload: &[u8], header: &str, now: i64) -> Result<(), SignatureError> {
        let header = parse_header(header)?;

        let expected = compute_signature(self.secret, header.timestamp, payload);
        let matched = header
            .signatures
            .iter()
            .any(|signature| bool::from(signature.as_slice().ct_eq(expected.as_slice())));

        if !matched {
            return Err(SignatureError::Mismatch);
        }

        if self.tolerance_secs > 0 && header.timestamp < now - self.tolerance_secs {
            return Err(SignatureError::TimestampOutsideTolerance {
                timestamp: header.timestamp,
                now,
            });
        }

        Ok(())
    }
}

fn parse_header(header: &str) -> Result<SignatureHeader, SignatureError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for item in header.split(',') {
        let Some((key, value)) = item.split_once('=')
        else {
            continue;
        };

        match key.trim() {
            "t" => timestamp = value.trim().parse::<i64>().ok(),
            SIGNATURE_SCHEME => {
                // A signature that isn't hex can never match; skip it.
                if let Ok(bytes) = hex::decode(value.trim()) {
                    signatures.push(bytes);
                }
            }
            _ => {}
        }
    }

    let Some(timestamp) = timestamp
    else {
        return Err(SignatureError::MalformedHeader);
    };

    if signatures.is_empty() {
        return Err(SignatureError::NoSignatures);
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> Vec<u8> {
    // new_from_slice accepts keys of any length for HMAC.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return Vec::new(),
    };
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    mac.finalize().into_bytes().to_vec()
}

/// Builds a header the way Stripe does when signing a delivery.
#[cfg(test)]
pub fn generate_header(payload: &[u8], secret: &str, timestamp: i64) -> String {
    format!(
        "t={},{}={}",
        timestamp,
        SIGNATURE_SCHEME,
        hex::encode(compute_signature(secret, timestamp, payload))
    )
}

//! Stripe webhook signature verification and payload parsing.
//!
//! The webhook route hands this module the raw body and the
//! `Stripe-Signature` header; nothing downstream sees an event that
//! failed verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature check with constant-time comparison
//! - Timestamp window for replay protection

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::foundation::{DomainError, ErrorCode};

type HmacSha256 = Hmac<Sha256>;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Error parsing the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureParseError {
    /// Header is empty or missing.
    MissingHeader,
    /// Missing timestamp component (t=...).
    MissingTimestamp,
    /// Missing v1 signature component.
    MissingV1Signature,
    /// Invalid timestamp format.
    InvalidTimestamp,
    /// Invalid signature format (not valid hex).
    InvalidSignatureFormat,
}

impl std::fmt::Display for SignatureParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "Missing Stripe-Signature header"),
            Self::MissingTimestamp => write!(f, "Missing timestamp (t=) in signature"),
            Self::MissingV1Signature => write!(f, "Missing v1 signature in header"),
            Self::InvalidTimestamp => write!(f, "Invalid timestamp format"),
            Self::InvalidSignatureFormat => write!(f, "Invalid signature format (not valid hex)"),
        }
    }
}

impl std::error::Error for SignatureParseError {}

/// Parsed Stripe-Signature header components.
///
/// The header format is `t=timestamp,v1=signature`, with optional
/// extra schemes we ignore.
#[derive(Debug, Clone)]
pub struct SignatureHeader {
    /// Unix timestamp when Stripe generated the event.
    pub timestamp: i64,

    /// Primary v1 signature (HMAC-SHA256, hex-encoded).
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parse a Stripe-Signature header into components.
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        if header.is_empty() {
            return Err(SignatureParseError::MissingHeader);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or(SignatureParseError::MissingTimestamp)?;

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| SignatureParseError::InvalidTimestamp)?,
                    );
                }
                "v1" => {
                    v1_signature = Some(
                        hex_decode(value.trim())
                            .ok_or(SignatureParseError::InvalidSignatureFormat)?,
                    );
                }
                _ => {
                    // Ignore unknown schemes for forward compatibility
                }
            }
        }

        Ok(Self {
            timestamp: timestamp.ok_or(SignatureParseError::MissingTimestamp)?,
            v1_signature: v1_signature.ok_or(SignatureParseError::MissingV1Signature)?,
        })
    }
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        let byte = u8::from_str_radix(&hex[i..i + 2], 16).ok()?;
        bytes.push(byte);
    }
    Some(bytes)
}

/// Encode bytes to hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Raw Stripe webhook event envelope as received from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventEnvelope {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type, e.g. "payment_intent.succeeded".
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    /// Event payload containing the affected object.
    pub data: StripeEventData,

    /// Whether this is a live or test event.
    pub livemode: bool,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    /// The object affected by this event.
    pub object: serde_json::Value,
}

/// A payment event that passed signature verification.
#[derive(Debug, Clone)]
pub struct VerifiedPaymentEvent {
    /// Stripe event identifier (evt_...).
    pub event_id: String,
    pub event_type: String,
    /// Present on payment_intent.* events.
    pub payment_intent_id: Option<String>,
}

/// Verifies and parses incoming Stripe webhook deliveries.
pub struct StripeWebhookVerifier {
    webhook_secret: SecretString,
    tolerance_secs: i64,
}

impl StripeWebhookVerifier {
    /// Creates a verifier for the given signing secret.
    ///
    /// `tolerance_secs` is the maximum accepted event age.
    pub fn new(webhook_secret: impl Into<String>, tolerance_secs: u64) -> Self {
        Self {
            webhook_secret: SecretString::new(webhook_secret.into()),
            tolerance_secs: tolerance_secs as i64,
        }
    }

    /// Verify the signature and parse the event.
    ///
    /// # Errors
    ///
    /// `ValidationFailed` on a malformed header, a stale or future
    /// timestamp, a bad signature, or an unparseable payload.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<VerifiedPaymentEvent, DomainError> {
        let header = SignatureHeader::parse(signature_header).map_err(|e| {
            DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid Stripe-Signature header: {}", e),
            )
        })?;

        self.verify_signature(payload, &header)?;

        let envelope: StripeEventEnvelope = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid webhook payload: {}", e),
            )
        })?;

        // On payment_intent.* events the affected object is the intent
        // itself, so its id is the intent id.
        let payment_intent_id = if envelope.event_type.starts_with("payment_intent.") {
            envelope
                .data
                .object
                .get("id")
                .and_then(|v| v.as_str())
                .map(String::from)
        } else {
            None
        };

        Ok(VerifiedPaymentEvent {
            event_id: envelope.id,
            event_type: envelope.event_type,
            payment_intent_id,
        })
    }

    /// Verify webhook signature using HMAC-SHA256.
    fn verify_signature(
        &self,
        payload: &[u8],
        header: &SignatureHeader,
    ) -> Result<(), DomainError> {
        // 1. Validate timestamp to bound replay
        let now = chrono::Utc::now().timestamp();
        let age = now - header.timestamp;

        if age > self.tolerance_secs {
            tracing::warn!(
                event_timestamp = header.timestamp,
                age_secs = age,
                "Webhook event outside the replay window"
            );
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Event too old ({} seconds)", age),
            ));
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook event timestamp in the future"
            );
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Event timestamp in future",
            ));
        }

        // 2. Compute expected signature over `timestamp.payload`
        let signed_payload = format!(
            "{}.{}",
            header.timestamp,
            String::from_utf8_lossy(payload)
        );

        let mut mac =
            HmacSha256::new_from_slice(self.webhook_secret.expose_secret().as_bytes())
                .expect("HMAC can take key of any size");
        mac.update(signed_payload.as_bytes());
        let expected = mac.finalize().into_bytes();

        // 3. Constant-time comparison
        let expected_bytes: &[u8] = expected.as_slice();
        let provided_bytes: &[u8] = &header.v1_signature;

        if expected_bytes.ct_eq(provided_bytes).unwrap_u8() != 1 {
            tracing::warn!("Invalid webhook signature");
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Invalid signature",
            ));
        }

        Ok(())
    }
}

//! Webhook signature verification.
//!
//! Verifies provider webhook deliveries with HMAC-SHA256 over a
//! timestamped payload, using constant-time comparison and a timestamp
//! window to reject replays.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;

/// Maximum allowed age for webhook deliveries (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future timestamps (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of the signature header.
///
/// Format: `t=<unix-timestamp>,v1=<hex-hmac>`. Unknown fields are ignored
/// for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// HMAC-SHA256 signature bytes.
    pub signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses a signature header string.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                WebhookError::MalformedPayload("invalid signature header format".to_string())
            })?;

            match key.trim() {
                "t" => {
                    timestamp = Some(value.trim().parse().map_err(|_| {
                        WebhookError::MalformedPayload("invalid signature timestamp".to_string())
                    })?);
                }
                "v1" => {
                    signature = Some(hex_decode(value.trim()).ok_or_else(|| {
                        WebhookError::MalformedPayload("invalid signature hex".to_string())
                    })?);
                }
                _ => {
                    // Ignore unknown fields for forward compatibility
                }
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            WebhookError::MalformedPayload("missing signature timestamp".to_string())
        })?;
        let signature = signature
            .ok_or_else(|| WebhookError::MalformedPayload("missing v1 signature".to_string()))?;

        Ok(SignatureHeader {
            timestamp,
            signature,
        })
    }
}

/// Verifier for provider webhook signatures.
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    /// Creates a new verifier with the given signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies a delivery's signature header against the raw payload.
    ///
    /// # Verification Steps
    ///
    /// 1. Parse the signature header
    /// 2. Validate the timestamp window
    /// 3. Compute the expected HMAC-SHA256 signature
    /// 4. Compare in constant time
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` - signature mismatch
    /// - `TimestampOutOfRange` - delivery older than 5 minutes
    /// - `InvalidTimestamp` - timestamp in the future
    /// - `MalformedPayload` - unparseable header
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;
        self.validate_timestamp(header.timestamp)?;

        let expected = compute_signature_bytes(&self.secret, header.timestamp, payload);
        if !constant_time_compare(&expected, &header.signature) {
            return Err(WebhookError::InvalidSignature);
        }
        Ok(())
    }

    fn validate_timestamp(&self, timestamp: i64) -> Result<(), WebhookError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - timestamp;

        if age > MAX_EVENT_AGE_SECS {
            return Err(WebhookError::TimestampOutOfRange);
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::InvalidTimestamp);
        }
        Ok(())
    }
}

/// Computes the hex-encoded signature for a timestamped payload.
///
/// Exposed so test fixtures and local tooling can sign synthetic
/// deliveries the same way the provider does.
pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    hex_encode(&compute_signature_bytes(secret, timestamp, payload))
}

fn compute_signature_bytes(secret: &str, timestamp: i64, payload: &[u8]) -> Vec<u8> {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    let chars: Vec<char> = hex.chars().collect();
    for pair in chars.chunks(2) {
        let high = pair[0].to_digit(16)?;
        let low = pair[1].to_digit(16)?;
        bytes.push((high * 16 + low) as u8);
    }
    Some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "whk_test_secret_12345";

    fn signed_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
        format!(
            "t={},v1={}",
            timestamp,
            compute_signature(secret, timestamp, payload)
        )
    }

    // ══════════════════════════════════════════════════════════════
    // Header Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parses_well_formed_header() {
        let header = SignatureHeader::parse("t=1704067200,v1=deadbeef").unwrap();
        assert_eq!(header.timestamp, 1704067200);
        assert_eq!(header.signature, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn ignores_unknown_header_fields() {
        let header = SignatureHeader::parse("t=1704067200,v1=00ff,v0=legacy_ignored=").ok();
        // v0 carries an '=' inside its value, which still splits fine on the first '='
        assert!(header.is_some());
    }

    #[test]
    fn rejects_header_without_timestamp() {
        assert!(SignatureHeader::parse("v1=deadbeef").is_err());
    }

    #[test]
    fn rejects_header_without_signature() {
        assert!(SignatureHeader::parse("t=1704067200").is_err());
    }

    #[test]
    fn rejects_non_hex_signature() {
        assert!(SignatureHeader::parse("t=1704067200,v1=zzzz").is_err());
    }

    #[test]
    fn rejects_garbage_header() {
        assert!(SignatureHeader::parse("no separators here").is_err());
    }

    // ══════════════════════════════════════════════════════════════
    // Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn accepts_correctly_signed_payload() {
        let payload = br#"{"webhook_event_type":"order_paid"}"#;
        let now = chrono::Utc::now().timestamp();
        let verifier = WebhookVerifier::new(TEST_SECRET);

        let result = verifier.verify(payload, &signed_header(TEST_SECRET, now, payload));
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_payload_signed_with_wrong_secret() {
        let payload = br#"{"webhook_event_type":"order_paid"}"#;
        let now = chrono::Utc::now().timestamp();
        let verifier = WebhookVerifier::new(TEST_SECRET);

        let result = verifier.verify(payload, &signed_header("other_secret", now, payload));
        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn rejects_tampered_payload() {
        let payload = br#"{"webhook_event_type":"order_paid"}"#;
        let tampered = br#"{"webhook_event_type":"refund"}"#;
        let now = chrono::Utc::now().timestamp();
        let verifier = WebhookVerifier::new(TEST_SECRET);

        let result = verifier.verify(tampered, &signed_header(TEST_SECRET, now, payload));
        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn rejects_replayed_old_delivery() {
        let payload = b"{}";
        let old = chrono::Utc::now().timestamp() - MAX_EVENT_AGE_SECS - 10;
        let verifier = WebhookVerifier::new(TEST_SECRET);

        let result = verifier.verify(payload, &signed_header(TEST_SECRET, old, payload));
        assert!(matches!(result, Err(WebhookError::TimestampOutOfRange)));
    }

    #[test]
    fn rejects_future_timestamp_beyond_skew() {
        let payload = b"{}";
        let future = chrono::Utc::now().timestamp() + MAX_CLOCK_SKEW_SECS + 10;
        let verifier = WebhookVerifier::new(TEST_SECRET);

        let result = verifier.verify(payload, &signed_header(TEST_SECRET, future, payload));
        assert!(matches!(result, Err(WebhookError::InvalidTimestamp)));
    }

    #[test]
    fn tolerates_small_clock_skew() {
        let payload = b"{}";
        let slightly_ahead = chrono::Utc::now().timestamp() + 30;
        let verifier = WebhookVerifier::new(TEST_SECRET);

        let result = verifier.verify(payload, &signed_header(TEST_SECRET, slightly_ahead, payload));
        assert!(result.is_ok());
    }

    // ══════════════════════════════════════════════════════════════
    // Hex Helper Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn hex_roundtrip() {
        let original = vec![0x00, 0xff, 0x10, 0xab];
        let encoded = hex_encode(&original);
        assert_eq!(encoded, "00ff10ab");
        assert_eq!(hex_decode(&encoded).unwrap(), original);
    }

    #[test]
    fn hex_decode_rejects_odd_length() {
        assert!(hex_decode("abc").is_none());
    }
}

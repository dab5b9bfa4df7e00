//! Keyed request signatures.
//!
//! The canonical message is the concatenation, without separators, of the
//! UTC timestamp as `YYYYMMDDhhmmss`, the partner key, the partner reference
//! number, the total amount in decimal and the partner secret. The signature
//! is the standard base64 encoding of the SHA-256 digest of its UTF-8 bytes.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::domain::TransactionRequest;
use crate::utils::timestamp::to_signature_timestamp;

/// Builds the canonical message, or `None` when the timestamp does not parse.
pub fn canonical_message(request: &TransactionRequest, secret: &str) -> Option<String> {
    let timestamp = to_signature_timestamp(&request.timestamp)?;

    Some(format!(
        "{}{}{}{}{}",
        timestamp, request.partner_key, request.partner_ref_no, request.total_amount, secret
    ))
}

pub fn digest_message(message: &str) -> String {
    STANDARD.encode(Sha256::digest(message.as_bytes()))
}

/// The signature a partner holding `secret` would send for `request`.
pub fn compute_signature(request: &TransactionRequest, secret: &str) -> Option<String> {
    canonical_message(request, secret).map(|message| digest_message(&message))
}

/// Recomputes the signature and compares it with the submitted one.
/// Never fails: an unparseable timestamp is a verification failure.
pub fn verify(request: &TransactionRequest, secret: &str) -> bool {
    match compute_signature(request, secret) {
        Some(expected) => expected
            .as_bytes()
            .ct_eq(request.sig.trim().as_bytes())
            .into(),
        None => {
            tracing::debug!(
                partner_key = %request.partner_key,
                "signature timestamp could not be parsed"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "RkFLRVBBU1NXT1JEMTIzNA==";
    const EXPECTED_SIG: &str = "adn2eTMNceldt3WB/rl/V8wVrXS8Fuc1y5U9DSicRjE=";

    fn signed_request() -> TransactionRequest {
        TransactionRequest {
            partner_key: "FAKEGOOGLE".to_string(),
            partner_ref_no: "REF-001".to_string(),
            partner_password: SECRET.to_string(),
            total_amount: 1000,
            items: None,
            timestamp: "2024-01-01T10:00:00Z".to_string(),
            sig: EXPECTED_SIG.to_string(),
        }
    }

    #[test]
    fn builds_canonical_message() {
        assert_eq!(
            canonical_message(&signed_request(), SECRET).as_deref(),
            Some("20240101100000FAKEGOOGLEREF-0011000RkFLRVBBU1NXT1JEMTIzNA==")
        );
    }

    #[test]
    fn matches_known_signature() {
        assert_eq!(
            compute_signature(&signed_request(), SECRET).as_deref(),
            Some(EXPECTED_SIG)
        );
        assert!(verify(&signed_request(), SECRET));
    }

    #[test]
    fn offset_timestamp_signs_like_its_utc_instant() {
        let mut request = signed_request();
        request.timestamp = "2024-01-01T17:00:00+07:00".to_string();
        assert!(verify(&request, SECRET));
    }

    #[test]
    fn tolerates_surrounding_whitespace_in_submitted_sig() {
        let mut request = signed_request();
        request.sig = format!("{}\r\n", EXPECTED_SIG);
        assert!(verify(&request, SECRET));
    }

    #[test]
    fn any_canonical_field_change_breaks_the_signature() {
        let mut request = signed_request();
        request.total_amount = 1001;
        assert!(!verify(&request, SECRET));

        let mut request = signed_request();
        request.partner_ref_no = "REF-002".to_string();
        assert!(!verify(&request, SECRET));

        let mut request = signed_request();
        request.partner_key = "FAKEPEOPLE".to_string();
        assert!(!verify(&request, SECRET));

        let mut request = signed_request();
        request.timestamp = "2024-01-01T10:00:01Z".to_string();
        assert!(!verify(&request, SECRET));

        assert!(!verify(&signed_request(), "RkFLRVBBU1NXT1JENTc4"));
    }

    #[test]
    fn truncated_or_extended_sig_is_rejected() {
        let mut request = signed_request();
        request.sig = EXPECTED_SIG[..EXPECTED_SIG.len() - 1].to_string();
        assert!(!verify(&request, SECRET));

        request.sig = format!("{}A", EXPECTED_SIG);
        assert!(!verify(&request, SECRET));

        request.sig = EXPECTED_SIG.to_lowercase();
        assert!(!verify(&request, SECRET));
    }

    #[test]
    fn unparseable_timestamp_fails_closed() {
        let mut request = signed_request();
        request.timestamp = "not-a-time".to_string();
        assert!(!verify(&request, SECRET));
    }
}

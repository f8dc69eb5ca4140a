//! Advisory payload validation.
//!
//! Partial or corrupted captures are still diagnostically useful, so the
//! policy is accept-but-warn: only payloads too short to carry a signature
//! are rejected outright.

/// Leading bytes of a well-formed JPEG payload.
pub const IMAGE_SIGNATURE: [u8; 2] = [0xFF, 0xD8];

/// Outcome of validating a completed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Signature present; persist silently.
    Accept,
    /// Persist anyway, but surface the reason.
    AcceptWithWarning(String),
    /// Drop the payload.
    Reject(String),
}

/// Validate a completed payload against the expected image signature.
pub fn validate(payload: &[u8]) -> Verdict {
    if payload.len() < 2 {
        return Verdict::Reject(format!("payload too short ({} bytes)", payload.len()));
    }

    if payload[..2] != IMAGE_SIGNATURE {
        return Verdict::AcceptWithWarning(format!(
            "unexpected signature {:02X} {:02X} (expected FF D8)",
            payload[0], payload[1]
        ));
    }

    Verdict::Accept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_signature_accepted() {
        assert_eq!(validate(&[0xFF, 0xD8]), Verdict::Accept);
        assert_eq!(validate(&[0xFF, 0xD8, 0x01, 0x02]), Verdict::Accept);
    }

    #[test]
    fn empty_payload_rejected() {
        assert!(matches!(validate(&[]), Verdict::Reject(_)));
    }

    #[test]
    fn one_byte_payload_rejected() {
        assert!(matches!(validate(&[0xFF]), Verdict::Reject(_)));
    }

    #[test]
    fn wrong_signature_accepted_with_warning() {
        match validate(&[0x00, 0x01, 0x02]) {
            Verdict::AcceptWithWarning(reason) => {
                assert!(reason.contains("00 01"));
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }
}

//! Deterministic, content-derived receipt identifiers.
//!
//! A receipt's identifier is a name-based (version 3) UUID over the DNS
//! namespace, computed from the submitted payload text exactly as it
//! arrived, byte for byte, never re-serialized. Two submissions with
//! identical bytes therefore always map to the same identifier, on any
//! platform and across process restarts, which is what makes resubmission
//! idempotent end to end.

use uuid::Uuid;

/// Derive the identifier for a submitted payload.
///
/// Pure and total: no payload is rejected, and the same text always yields
/// the same UUID. Collisions between distinct payloads are negligible in
/// practice, but this is a convenience key, not a security boundary: the
/// hash is not meant to resist adversarial input.
pub fn derive_receipt_id(payload: &str) -> Uuid {
    Uuid::new_v3(&Uuid::NAMESPACE_DNS, payload.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let payload = r#"{"retailer":"Target","total":"35.35"}"#;
        assert_eq!(derive_receipt_id(payload), derive_receipt_id(payload));
    }

    #[test]
    fn test_known_vector() {
        // RFC 4122's v3 example, shared by every conforming implementation.
        // Pins the scheme across library upgrades and platforms.
        assert_eq!(
            derive_receipt_id("python.org").to_string(),
            "6fa459ea-ee8a-3ca4-894e-db77e160355e"
        );
    }

    #[test]
    fn test_distinct_payloads_distinct_ids() {
        // byte-for-byte means whitespace matters
        assert_ne!(
            derive_receipt_id(r#"{"retailer":"Target"}"#),
            derive_receipt_id(r#"{"retailer": "Target"}"#)
        );
    }
}

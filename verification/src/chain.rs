//! Hash chaining for the attestation log.
//!
//! Each attestation commits to the digest of the one before it, so rewriting or
//! dropping any logged outcome breaks every later link.

use genevault_store::Attestation;
use genevault_types::{blake2b_256_multi, AttestationId};

/// Digest of `attestation` chained onto `prev`.
///
/// Covers every field except `digest` itself. Variable-length fields are
/// length-prefixed so distinct records cannot collide by concatenation.
pub fn attestation_digest(prev: &[u8; 32], attestation: &Attestation) -> [u8; 32] {
    let verifier = attestation.verifier.as_str().as_bytes();
    let kind = attestation.verification_type.as_bytes();
    blake2b_256_multi(&[
        prev,
        &attestation.id.as_u64().to_le_bytes(),
        &attestation.entry.as_u64().to_le_bytes(),
        &(verifier.len() as u64).to_le_bytes(),
        verifier,
        &attestation.height.as_u64().to_le_bytes(),
        attestation.provided_hash.as_bytes(),
        &[attestation.verified as u8, attestation.confidence],
        &attestation.matched.to_le_bytes(),
        &attestation.total.to_le_bytes(),
        &(kind.len() as u64).to_le_bytes(),
        kind,
    ])
}

/// The first attestation whose link does not check out, or `None` for an intact log.
///
/// `log` must be ordered by id, starting from the first attestation ever written.
pub fn find_chain_break(log: &[Attestation]) -> Option<AttestationId> {
    let mut prev = [0u8; 32];
    for attestation in log {
        if attestation.prev_digest != prev
            || attestation_digest(&prev, attestation) != attestation.digest
        {
            return Some(attestation.id);
        }
        prev = attestation.digest;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use genevault_types::{ActorId, EntryId, Fingerprint, Height};

    fn chain(n: u64) -> Vec<Attestation> {
        let mut prev = [0u8; 32];
        (1..=n)
            .map(|i| {
                let mut a = Attestation {
                    id: AttestationId::new(i),
                    entry: EntryId::new(1),
                    verifier: ActorId::new("lab"),
                    height: Height::new(i * 10),
                    provided_hash: Fingerprint::new([i as u8; 32]),
                    verified: i % 2 == 0,
                    confidence: 80,
                    matched: 4,
                    total: 5,
                    verification_type: "dna".into(),
                    prev_digest: prev,
                    digest: [0u8; 32],
                };
                a.digest = attestation_digest(&prev, &a);
                prev = a.digest;
                a
            })
            .collect()
    }

    #[test]
    fn intact_chain_has_no_break() {
        assert_eq!(find_chain_break(&chain(4)), None);
        assert_eq!(find_chain_break(&[]), None);
    }

    #[test]
    fn edited_field_is_detected() {
        let mut log = chain(4);
        log[2].confidence = 100;
        assert_eq!(find_chain_break(&log), Some(AttestationId::new(3)));
    }

    #[test]
    fn dropped_attestation_is_detected() {
        let mut log = chain(4);
        log.remove(1);
        assert_eq!(find_chain_break(&log), Some(AttestationId::new(3)));
    }

    #[test]
    fn verifier_and_type_boundaries_are_unambiguous() {
        let mut a = chain(1).remove(0);
        let d1 = attestation_digest(&[0u8; 32], &a);
        a.verifier = ActorId::new("labd");
        a.verification_type = "na".into();
        assert_ne!(d1, attestation_digest(&[0u8; 32], &a));
    }
}

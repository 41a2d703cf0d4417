use proptest::prelude::*;

use genevault_types::{EntryId, Fingerprint, Height, VaultParams};

proptest! {
    /// Fingerprint accepts exactly 32 bytes and nothing else.
    #[test]
    fn fingerprint_width_enforced(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let parsed = Fingerprint::from_slice(&bytes);
        prop_assert_eq!(parsed.is_some(), bytes.len() == 32);
        if let Some(fp) = parsed {
            prop_assert_eq!(&fp.as_bytes()[..], &bytes[..]);
        }
    }

    /// Fingerprint digests are always 32 bytes and deterministic.
    #[test]
    fn fingerprint_digest_deterministic(material in prop::collection::vec(any::<u8>(), 0..256)) {
        let a = Fingerprint::digest(&material);
        let b = Fingerprint::digest(&material);
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.as_bytes().len(), 32);
    }

    /// Height ordering matches the underlying counter.
    #[test]
    fn height_ordering(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(Height::new(a) <= Height::new(b), a <= b);
    }

    /// Height::plus never overflows.
    #[test]
    fn height_plus_saturates(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(Height::new(a).plus(b).as_u64(), a.saturating_add(b));
    }

    /// EntryId ordering matches the underlying counter.
    #[test]
    fn entry_id_ordering(a in 1u64..u64::MAX, b in 1u64..u64::MAX) {
        prop_assert_eq!(EntryId::new(a) < EntryId::new(b), a < b);
    }

    /// Fingerprint bincode serialization preserves the bytes.
    #[test]
    fn fingerprint_bincode_preserves_bytes(bytes in prop::array::uniform32(any::<u8>())) {
        let fp = Fingerprint::new(bytes);
        let encoded = bincode::serialize(&fp).unwrap();
        let decoded: Fingerprint = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, fp);
    }

    /// Certification range check agrees with the default bounds.
    #[test]
    fn certification_range(level in any::<u8>()) {
        let params = VaultParams::default();
        prop_assert_eq!(params.certification_in_range(level), (1..=5).contains(&level));
    }
}

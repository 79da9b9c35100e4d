use sha3::{Digest, Keccak256};
use tracing::trace;

use bftcore_codec::{decode_header, encode_header_for_hash, CodecError};
use bftcore_types::{Hash32, Header};

/// Keccak-256 of arbitrary bytes.
pub fn keccak256(bytes: &[u8]) -> Hash32 {
    let mut hasher = Keccak256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Header hash: keccak256 over the canonical hash encoding.
///
/// Legacy headers hash their legacy field list. BFT headers hash the same
/// list with the committee in the extra-data slot and seals and round
/// written as constants, so attaching seals never moves the hash.
pub fn header_hash(h: &Header) -> Hash32 {
    let bytes = encode_header_for_hash(h);
    trace!(mode = ?h.mode(), len = bytes.len(), "hashing header");
    keccak256(&bytes)
}

/// Recompute the hash of a header received in wire encoding.
pub fn hash_wire_header(bytes: &[u8]) -> Result<Hash32, CodecError> {
    let header = decode_header(bytes)?;
    Ok(header_hash(&header))
}

#[cfg(test)]
mod tests {
    use super::*;

    use bftcore_codec::{encode_header, RlpError};
    use bftcore_types::{CommitteeMember, BFT_DIGEST};
    use num_bigint::BigUint;

    fn bft_header() -> Header {
        Header {
            number: BigUint::from(42u64),
            mix_digest: BFT_DIGEST,
            committee: vec![
                CommitteeMember::new([0xa1; 20], 10u64),
                CommitteeMember::new([0xb2; 20], 20u64),
                CommitteeMember::new([0xc3; 20], 30u64),
            ]
            .into(),
            ..Header::default()
        }
    }

    #[test]
    fn keccak_of_empty_input() {
        assert_eq!(
            hex::encode(keccak256(&[])),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn hashing_is_deterministic() {
        let h = bft_header();
        assert_eq!(header_hash(&h), header_hash(&h));
        assert_eq!(header_hash(&h), header_hash(&h.clone()));
    }

    #[test]
    fn seals_and_round_never_move_the_hash() {
        let base = bft_header();
        let expected = header_hash(&base);

        for round in [0u64, 1, 3, 1997, u64::MAX] {
            let h = Header {
                round,
                ..base.clone()
            };
            assert_eq!(header_hash(&h), expected, "round {round}");
        }

        for seal in [vec![], vec![0x01], vec![0xff; 65]] {
            let h = Header {
                proposer_seal: seal,
                ..base.clone()
            };
            assert_eq!(header_hash(&h), expected);
        }

        for n in 0..5usize {
            let h = Header {
                committed_seals: (0..n).map(|i| vec![i as u8; 65]).collect(),
                ..base.clone()
            };
            assert_eq!(header_hash(&h), expected, "{n} committed seals");
        }
    }

    #[test]
    fn committee_changes_move_the_hash() {
        let base = bft_header();
        let expected = header_hash(&base);

        let mut power = base.clone();
        let mut members = power.committee.clone().into_members();
        members[1].voting_power += 1u32;
        power.committee = members.into();
        assert_ne!(header_hash(&power), expected);

        let mut address = base.clone();
        let mut members = address.committee.clone().into_members();
        members[0].address[19] ^= 1;
        address.committee = members.into();
        assert_ne!(header_hash(&address), expected);

        let mut longer = base.clone();
        longer.committee.push(CommitteeMember::new([0xd4; 20], 40u64));
        assert_ne!(header_hash(&longer), expected);

        let mut shorter = base.clone();
        let mut members = shorter.committee.clone().into_members();
        members.pop();
        shorter.committee = members.into();
        assert_ne!(header_hash(&shorter), expected);

        let mut reordered = base.clone();
        let mut members = reordered.committee.clone().into_members();
        members.swap(0, 2);
        reordered.committee = members.into();
        assert_ne!(header_hash(&reordered), expected);
    }

    #[test]
    fn legacy_hash_is_blind_to_bft_fields() {
        let plain = Header {
            number: BigUint::from(42u64),
            extra: b"vanity".to_vec(),
            ..Header::default()
        };
        let populated = Header {
            committee: bft_header().committee,
            proposer_seal: vec![1, 2, 3],
            committed_seals: vec![vec![4, 5], vec![6]],
            round: 77,
            ..plain.clone()
        };
        assert_eq!(header_hash(&plain), header_hash(&populated));
    }

    #[test]
    fn mode_switch_moves_the_hash() {
        let legacy = Header {
            number: BigUint::from(42u64),
            ..Header::default()
        };
        let bft = Header {
            mix_digest: BFT_DIGEST,
            ..legacy.clone()
        };
        assert_ne!(header_hash(&legacy), header_hash(&bft));
    }

    #[test]
    fn wire_hash_matches_in_memory_hash() {
        let mut h = bft_header();
        h.proposer_seal = vec![0xee; 65];
        h.committed_seals = vec![vec![0x01; 65]];
        h.round = 5;

        let wire = encode_header(&h);
        assert_eq!(hash_wire_header(&wire).unwrap(), header_hash(&h));
        assert_ne!(keccak256(&wire), header_hash(&h));
    }

    #[test]
    fn wire_hash_rejects_truncated_input() {
        let wire = encode_header(&bft_header());
        assert_eq!(
            hash_wire_header(&wire[..wire.len() - 1]),
            Err(CodecError::Rlp(RlpError::InputTooShort))
        );
    }
}

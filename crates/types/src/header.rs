use num_bigint::BigUint;

use crate::{Address, BlockNonce, Bloom, Committee, Hash32, BFT_DIGEST};

/// Which canonical field set a header is hashed and encoded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderMode {
    /// Legacy proof-of-work layout. BFT fields are ignored.
    Legacy,
    /// BFT layout. The committee is hashed, seals and round are not.
    Bft,
}

/// Block header holding both legacy and BFT extension fields.
///
/// Plain data: the header has no hashing logic of its own. `Default` gives
/// the all-zero legacy header with no base fee and an empty committee.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub parent_hash: Hash32,
    pub uncle_hash: Hash32,
    pub coinbase: Address,
    pub root: Hash32,
    pub tx_hash: Hash32,
    pub receipt_hash: Hash32,
    pub bloom: Bloom,
    pub difficulty: BigUint,
    pub number: BigUint,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub time: u64,
    /// Free-form extra data. Only encoded in legacy mode; in BFT mode the
    /// extra-data slot carries the consensus extension instead.
    pub extra: Vec<u8>,
    pub mix_digest: Hash32,
    pub nonce: BlockNonce,
    /// Absent on headers from before the fee market.
    pub base_fee: Option<BigUint>,

    pub committee: Committee,
    pub proposer_seal: Vec<u8>,
    pub round: u64,
    pub committed_seals: Vec<Vec<u8>>,
}

impl Header {
    pub fn mode(&self) -> HeaderMode {
        if self.mix_digest == BFT_DIGEST {
            HeaderMode::Bft
        } else {
            HeaderMode::Legacy
        }
    }

    pub fn is_bft(&self) -> bool {
        self.mode() == HeaderMode::Bft
    }

    /// Copy of this header with proposer seal, committed seals and round
    /// reset. Hashing a header and its unsealed copy gives the same digest.
    pub fn unsealed(&self) -> Header {
        Header {
            proposer_seal: Vec::new(),
            round: 0,
            committed_seals: Vec::new(),
            ..self.clone()
        }
    }
}

//! Block header data model shared by the codec and hashing crates.
//!
//! A header carries both the legacy proof-of-work fields and the BFT
//! extension fields. Which set participates in hashing is decided by the
//! mix digest alone: see [`BFT_DIGEST`] and [`Header::mode`].

mod committee;
mod header;

pub use committee::{Committee, CommitteeMember};
pub use header::{Header, HeaderMode};

use thiserror::Error;

pub const HASH32_LEN: usize = 32;
pub const ADDRESS_LEN: usize = 20;
pub const BLOOM_LEN: usize = 256;
pub const NONCE_LEN: usize = 8;

pub type Hash32 = [u8; HASH32_LEN];
pub type Address = [u8; ADDRESS_LEN];
pub type BlockNonce = [u8; NONCE_LEN];

/// Mix digest value that marks a header as produced by the BFT engine.
///
/// Block builders write it into `mix_digest` to opt into BFT hashing;
/// validators compare against it to detect the mode.
pub const BFT_DIGEST: Hash32 = *b"ctical byzantine fault tolerance";

/// 2048-bit log bloom filter of the legacy header.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bloom(pub [u8; BLOOM_LEN]);

impl Default for Bloom {
    fn default() -> Self {
        Bloom([0u8; BLOOM_LEN])
    }
}

impl std::fmt::Debug for Bloom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.iter().all(|b| *b == 0) {
            return f.write_str("Bloom(0)");
        }
        write!(f, "Bloom(0x{})", hex::encode(self.0))
    }
}

impl AsRef<[u8]> for Bloom {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Rejected fixed-length value. Raised before any hashing happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Exact-length conversion of a fixed-size field such as a hash or address.
/// Never pads or truncates.
pub fn fixed<const N: usize>(
    field: &'static str,
    bytes: &[u8],
) -> Result<[u8; N], ValidationError> {
    bytes
        .try_into()
        .map_err(|_| ValidationError::InvalidLength {
            field,
            expected: N,
            actual: bytes.len(),
        })
}

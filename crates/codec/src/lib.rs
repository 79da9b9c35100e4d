//! Canonical wire encoding of block headers.
//!
//! Headers are encoded as RLP lists. The same encoding is the network/storage
//! format and (with seals stripped for BFT headers) the hash input.

mod header;
pub mod rlp;

pub use header::{
    decode_header, encode_consensus_extension, encode_fields, encode_header,
    encode_header_for_hash, hash_fields, wire_fields, HeaderField, SealPolicy, BFT_HASH_FIELDS,
    BFT_WIRE_FIELDS, LEGACY_FIELDS,
};

pub use alloy_rlp::Error as RlpError;

use bftcore_types::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("rlp: {0}")]
    Rlp(#[from] RlpError),
    #[error("trailing bytes after item")]
    TrailingBytes,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

//! Canonical header encoding.
//!
//! Field order and field selection are CONSENSUS-RELEVANT. Changing any of
//! the tables below is a hard fork.

use bftcore_types::{Bloom, Committee, CommitteeMember, Header, HeaderMode};
use tracing::debug;

use crate::rlp::{
    finish, read_array, read_biguint, read_bytes, read_list, read_u64, write_biguint,
    write_bytes, write_list, write_u64,
};
use crate::CodecError;

/// What happens to proposer seal, committed seals and round when the
/// consensus extension is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SealPolicy {
    /// Write the real values (wire encoding).
    Keep,
    /// Write empty seals and round 0 (hash input).
    Strip,
}

/// One position of the canonical header list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderField {
    ParentHash,
    UncleHash,
    Coinbase,
    Root,
    TxHash,
    ReceiptHash,
    Bloom,
    Difficulty,
    Number,
    GasLimit,
    GasUsed,
    Time,
    /// Free-form extra data.
    Extra,
    /// Extra-data slot holding `[committee, proposer_seal, round, committed_seals]`.
    Consensus(SealPolicy),
    MixDigest,
    Nonce,
    /// Optional trailing field, omitted when the header has no base fee.
    BaseFee,
}

pub const LEGACY_FIELDS: [HeaderField; 16] = [
    HeaderField::ParentHash,
    HeaderField::UncleHash,
    HeaderField::Coinbase,
    HeaderField::Root,
    HeaderField::TxHash,
    HeaderField::ReceiptHash,
    HeaderField::Bloom,
    HeaderField::Difficulty,
    HeaderField::Number,
    HeaderField::GasLimit,
    HeaderField::GasUsed,
    HeaderField::Time,
    HeaderField::Extra,
    HeaderField::MixDigest,
    HeaderField::Nonce,
    HeaderField::BaseFee,
];

pub const BFT_WIRE_FIELDS: [HeaderField; 16] = bft_fields(SealPolicy::Keep);

/// Hash input of a BFT header. Seals and round are written as constants.
pub const BFT_HASH_FIELDS: [HeaderField; 16] = bft_fields(SealPolicy::Strip);

const fn bft_fields(policy: SealPolicy) -> [HeaderField; 16] {
    let mut fields = LEGACY_FIELDS;
    fields[12] = HeaderField::Consensus(policy);
    fields
}

pub fn wire_fields(mode: HeaderMode) -> &'static [HeaderField] {
    match mode {
        HeaderMode::Legacy => &LEGACY_FIELDS,
        HeaderMode::Bft => &BFT_WIRE_FIELDS,
    }
}

pub fn hash_fields(mode: HeaderMode) -> &'static [HeaderField] {
    match mode {
        HeaderMode::Legacy => &LEGACY_FIELDS,
        HeaderMode::Bft => &BFT_HASH_FIELDS,
    }
}

fn write_committee(out: &mut Vec<u8>, committee: &Committee) {
    let mut body = Vec::new();
    for member in committee {
        let mut entry = Vec::new();
        write_bytes(&mut entry, &member.address);
        write_biguint(&mut entry, &member.voting_power);
        write_list(&mut body, &entry);
    }
    write_list(out, &body);
}

fn write_seals(out: &mut Vec<u8>, seals: &[Vec<u8>]) {
    let mut body = Vec::new();
    for seal in seals {
        write_bytes(&mut body, seal);
    }
    write_list(out, &body);
}

/// Encoded consensus extension as stored in the extra-data slot.
pub fn encode_consensus_extension(h: &Header, policy: SealPolicy) -> Vec<u8> {
    let mut body = Vec::new();
    write_committee(&mut body, &h.committee);
    match policy {
        SealPolicy::Keep => {
            write_bytes(&mut body, &h.proposer_seal);
            write_u64(&mut body, h.round);
            write_seals(&mut body, &h.committed_seals);
        }
        SealPolicy::Strip => {
            write_bytes(&mut body, &[]);
            write_u64(&mut body, 0);
            write_seals(&mut body, &[]);
        }
    }
    let mut out = Vec::with_capacity(body.len() + 9);
    write_list(&mut out, &body);
    out
}

fn write_field(out: &mut Vec<u8>, h: &Header, field: HeaderField) {
    match field {
        HeaderField::ParentHash => write_bytes(out, &h.parent_hash),
        HeaderField::UncleHash => write_bytes(out, &h.uncle_hash),
        HeaderField::Coinbase => write_bytes(out, &h.coinbase),
        HeaderField::Root => write_bytes(out, &h.root),
        HeaderField::TxHash => write_bytes(out, &h.tx_hash),
        HeaderField::ReceiptHash => write_bytes(out, &h.receipt_hash),
        HeaderField::Bloom => write_bytes(out, h.bloom.as_ref()),
        HeaderField::Difficulty => write_biguint(out, &h.difficulty),
        HeaderField::Number => write_biguint(out, &h.number),
        HeaderField::GasLimit => write_u64(out, h.gas_limit),
        HeaderField::GasUsed => write_u64(out, h.gas_used),
        HeaderField::Time => write_u64(out, h.time),
        HeaderField::Extra => write_bytes(out, &h.extra),
        HeaderField::Consensus(policy) => {
            write_bytes(out, &encode_consensus_extension(h, policy))
        }
        HeaderField::MixDigest => write_bytes(out, &h.mix_digest),
        HeaderField::Nonce => write_bytes(out, &h.nonce),
        HeaderField::BaseFee => {
            if let Some(fee) = &h.base_fee {
                write_biguint(out, fee);
            }
        }
    }
}

/// Encode the given fields of `h`, in order, as one list.
pub fn encode_fields(h: &Header, fields: &[HeaderField]) -> Vec<u8> {
    let mut body = Vec::new();
    for field in fields {
        write_field(&mut body, h, *field);
    }
    let mut out = Vec::with_capacity(body.len() + 9);
    write_list(&mut out, &body);
    out
}

/// Wire encoding of a header, seals and round included.
///
/// In BFT mode the extra-data slot carries the consensus extension, so
/// `h.extra` is not encoded and does not survive a round trip.
pub fn encode_header(h: &Header) -> Vec<u8> {
    let mode = h.mode();
    if mode == HeaderMode::Bft && !h.extra.is_empty() {
        debug!(
            len = h.extra.len(),
            number = %h.number,
            "discarding free-form extra data of bft header"
        );
    }
    encode_fields(h, wire_fields(mode))
}

/// Bytes the header hash is computed over. Identical to [`encode_header`]
/// for legacy headers.
pub fn encode_header_for_hash(h: &Header) -> Vec<u8> {
    encode_fields(h, hash_fields(h.mode()))
}

fn decode_committee(input: &mut &[u8]) -> Result<Committee, CodecError> {
    let mut body = read_list(input)?;
    let mut committee = Committee::default();
    while !body.is_empty() {
        let mut entry = read_list(&mut body)?;
        let address = read_array(&mut entry, "committee.address")?;
        let voting_power = read_biguint(&mut entry)?;
        finish(entry)?;
        committee.push(CommitteeMember {
            address,
            voting_power,
        });
    }
    Ok(committee)
}

fn decode_seals(input: &mut &[u8]) -> Result<Vec<Vec<u8>>, CodecError> {
    let mut body = read_list(input)?;
    let mut seals = Vec::new();
    while !body.is_empty() {
        seals.push(read_bytes(&mut body)?.to_vec());
    }
    Ok(seals)
}

fn decode_consensus_extension(slot: &[u8], h: &mut Header) -> Result<(), CodecError> {
    let mut input = slot;
    let mut body = read_list(&mut input)?;
    finish(input)?;

    h.committee = decode_committee(&mut body)?;
    h.proposer_seal = read_bytes(&mut body)?.to_vec();
    h.round = read_u64(&mut body)?;
    h.committed_seals = decode_seals(&mut body)?;
    finish(body)
}

/// Decode a wire header.
///
/// The mode comes from the decoded mix digest. For a BFT header the
/// extra-data slot is decoded into committee, seals and round, and
/// `extra` is left empty.
pub fn decode_header(bytes: &[u8]) -> Result<Header, CodecError> {
    let mut input = bytes;
    let mut fields = read_list(&mut input)?;
    finish(input)?;

    let mut h = Header::default();
    let mut extra_slot: &[u8] = &[];
    for field in LEGACY_FIELDS {
        match field {
            HeaderField::ParentHash => h.parent_hash = read_array(&mut fields, "parent_hash")?,
            HeaderField::UncleHash => h.uncle_hash = read_array(&mut fields, "uncle_hash")?,
            HeaderField::Coinbase => h.coinbase = read_array(&mut fields, "coinbase")?,
            HeaderField::Root => h.root = read_array(&mut fields, "root")?,
            HeaderField::TxHash => h.tx_hash = read_array(&mut fields, "tx_hash")?,
            HeaderField::ReceiptHash => {
                h.receipt_hash = read_array(&mut fields, "receipt_hash")?
            }
            HeaderField::Bloom => h.bloom = Bloom(read_array(&mut fields, "bloom")?),
            HeaderField::Difficulty => h.difficulty = read_biguint(&mut fields)?,
            HeaderField::Number => h.number = read_biguint(&mut fields)?,
            HeaderField::GasLimit => h.gas_limit = read_u64(&mut fields)?,
            HeaderField::GasUsed => h.gas_used = read_u64(&mut fields)?,
            HeaderField::Time => h.time = read_u64(&mut fields)?,
            HeaderField::Extra | HeaderField::Consensus(_) => {
                extra_slot = read_bytes(&mut fields)?
            }
            HeaderField::MixDigest => h.mix_digest = read_array(&mut fields, "mix_digest")?,
            HeaderField::Nonce => h.nonce = read_array(&mut fields, "nonce")?,
            HeaderField::BaseFee => {
                if !fields.is_empty() {
                    h.base_fee = Some(read_biguint(&mut fields)?);
                }
            }
        }
    }
    finish(fields)?;

    match h.mode() {
        HeaderMode::Legacy => h.extra = extra_slot.to_vec(),
        HeaderMode::Bft => {
            if let Err(err) = decode_consensus_extension(extra_slot, &mut h) {
                debug!(%err, number = %h.number, "malformed consensus extension");
                return Err(err);
            }
        }
    }
    Ok(h)
}

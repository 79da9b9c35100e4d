//! Canonical RLP helpers over `alloy-rlp`.
//!
//! `alloy-rlp` enforces the item rules (single-byte strings, minimal size
//! prefixes, minimal integers). This module adds the pieces the header codec
//! needs on top: payload splitting for nested lists, arbitrary-precision
//! integers, fixed-length byte arrays and the trailing-bytes check.

use alloy_rlp::{Decodable, Encodable, Error as RlpError, Header as RlpHeader};
use bftcore_types::fixed;
use num_bigint::BigUint;

use crate::CodecError;

pub fn write_bytes(out: &mut Vec<u8>, b: &[u8]) {
    b.encode(out);
}

pub fn write_list(out: &mut Vec<u8>, body: &[u8]) {
    RlpHeader {
        list: true,
        payload_length: body.len(),
    }
    .encode(out);
    out.extend_from_slice(body);
}

pub fn write_u64(out: &mut Vec<u8>, v: u64) {
    v.encode(out);
}

/// Big-endian with leading zeros stripped, so zero becomes the empty string.
pub fn write_biguint(out: &mut Vec<u8>, v: &BigUint) {
    let be = v.to_bytes_be();
    let zeros = be.iter().take_while(|x| **x == 0).count();
    write_bytes(out, &be[zeros..]);
}

fn read_payload<'a>(input: &mut &'a [u8], list: bool) -> Result<&'a [u8], CodecError> {
    let header = RlpHeader::decode(input)?;
    if header.list != list {
        let err = if list {
            RlpError::UnexpectedString
        } else {
            RlpError::UnexpectedList
        };
        return Err(err.into());
    }
    if input.len() < header.payload_length {
        return Err(RlpError::InputTooShort.into());
    }
    let (payload, rest) = input.split_at(header.payload_length);
    *input = rest;
    Ok(payload)
}

pub fn read_bytes<'a>(input: &mut &'a [u8]) -> Result<&'a [u8], CodecError> {
    read_payload(input, false)
}

/// Returns the payload of a list item; the caller reads its elements from it.
pub fn read_list<'a>(input: &mut &'a [u8]) -> Result<&'a [u8], CodecError> {
    read_payload(input, true)
}

pub fn read_array<const N: usize>(
    input: &mut &[u8],
    field: &'static str,
) -> Result<[u8; N], CodecError> {
    Ok(fixed(field, read_bytes(input)?)?)
}

pub fn read_u64(input: &mut &[u8]) -> Result<u64, CodecError> {
    Ok(u64::decode(input)?)
}

pub fn read_biguint(input: &mut &[u8]) -> Result<BigUint, CodecError> {
    let b = read_bytes(input)?;
    if b.first() == Some(&0) {
        return Err(RlpError::LeadingZero.into());
    }
    Ok(BigUint::from_bytes_be(b))
}

/// Fails unless `input` was fully consumed.
pub fn finish(input: &[u8]) -> Result<(), CodecError> {
    if !input.is_empty() {
        return Err(CodecError::TrailingBytes);
    }
    Ok(())
}

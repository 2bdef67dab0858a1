//! Bit packing of Huffman codes.
//!
//! A packed payload starts with one descriptor byte holding the number of zero
//! bits appended after the codes to reach a byte boundary, followed by the
//! concatenated codes and that padding, all most significant bit first. A code
//! stream whose length is already a multiple of eight still receives a full
//! byte of padding (descriptor 8); only an empty code stream is left unpadded.

use bitvec::prelude::*;
use log::debug;

use crate::compression::codes::{Code, CodeTable};
use crate::compression::Result;
use crate::error::Error;

/// Width of the padding descriptor at the front of every payload.
pub const DESCRIPTOR_BITS: usize = 8;

/// Largest padding a well-formed payload can carry.
pub const MAX_PADDING: u8 = 8;

/// Number of zero bits appended to `code_bits` bits of codes.
pub fn padding_for(code_bits: usize) -> u8 {
    if code_bits == 0 {
        0
    } else {
        (8 - code_bits % 8) as u8
    }
}

/// Replace every byte of `data` with its code and pack the result.
///
/// # Errors
///
/// * [`Error::InvalidInput`] if a byte of `data` has no code in `codes`.
/// * [`Error::PaddingMismatch`] if the packed bits do not fill whole bytes.
pub fn pack(data: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    let mut body: Code = BitVec::with_capacity(data.len() * codes.max_code_len().max(1));
    for &byte in data {
        let code = codes
            .code(byte)
            .ok_or_else(|| Error::invalid_input(format!("byte {:#04x} has no code", byte)))?;
        body.extend_from_bitslice(code);
    }

    let padding = padding_for(body.len());
    let mut packed: Code = BitVec::with_capacity(DESCRIPTOR_BITS + body.len() + padding as usize);
    packed.extend_from_bitslice(padding.view_bits::<Msb0>());
    packed.extend_from_bitslice(body.as_bitslice());
    packed.resize(packed.len() + padding as usize, false);

    if packed.len() % 8 != 0 {
        return Err(Error::PaddingMismatch { bits: packed.len() });
    }
    debug!(
        "packed {} bytes into {} code bits, padding {}",
        data.len(),
        body.len(),
        padding
    );
    Ok(packed.into_vec())
}

/// Decode a packed payload with the reverse mapping of `codes`.
///
/// # Errors
///
/// [`Error::CorruptPayload`] when the descriptor is missing or out of range,
/// when the bits end partway through a code, or when a run of bits longer
/// than the longest code matches nothing.
pub fn unpack(payload: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    let Some((&padding, _)) = payload.split_first() else {
        return Err(Error::corrupt_payload(
            "payload is missing its padding descriptor",
        ));
    };
    if padding > MAX_PADDING {
        return Err(Error::corrupt_payload(format!(
            "padding descriptor {} is out of range",
            padding
        )));
    }

    let bits = &payload.view_bits::<Msb0>()[DESCRIPTOR_BITS..];
    let padding = padding as usize;
    if padding > bits.len() {
        return Err(Error::corrupt_payload(format!(
            "padding of {} bits exceeds the {} bits that follow",
            padding,
            bits.len()
        )));
    }
    let encoded = &bits[..bits.len() - padding];

    let max_len = codes.max_code_len();
    let mut output = Vec::new();
    let mut candidate: Code = BitVec::with_capacity(max_len);
    for bit in encoded.iter().by_vals() {
        candidate.push(bit);
        if let Some(symbol) = codes.symbol(&candidate) {
            output.push(symbol);
            candidate.clear();
        } else if candidate.len() >= max_len {
            return Err(Error::corrupt_payload(format!(
                "{} bits match no code",
                candidate.len()
            )));
        }
    }
    if !candidate.is_empty() {
        return Err(Error::corrupt_payload(format!(
            "stream ends inside a code ({} dangling bits)",
            candidate.len()
        )));
    }

    debug!(
        "unpacked {} code bits into {} bytes",
        encoded.len(),
        output.len()
    );
    Ok(output)
}

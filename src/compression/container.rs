//! Container framing: frequency header, terminator, packed payload.
//!
//! ```text
//! repeat per distinct symbol:
//!   [1 byte]  symbol length, always 0x01
//!   [1 byte]  symbol value
//!   [4 bytes] frequency, big-endian unsigned
//! [1 byte]  0xFF terminator
//! [N bytes] packed payload
//! ```

use std::io::{Cursor, Read, Write};

use log::{debug, trace, warn};

use crate::compression::frequency::FrequencyTable;
use crate::compression::Result;
use crate::error::Error;

/// Length byte that introduces a header entry. Symbols are single bytes.
pub const SYMBOL_LEN: u8 = 0x01;

/// Byte that ends the frequency header.
pub const HEADER_TERMINATOR: u8 = 0xFF;

/// Size of one serialized header entry, length byte included.
pub const ENTRY_LEN: usize = 6;

/// A parsed artifact, borrowing its payload from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<'a> {
    pub frequencies: FrequencyTable,
    pub payload: &'a [u8],
    /// Whether the header ended with a terminator rather than at end of input.
    pub terminated: bool,
}

/// Write the header entries for `table` followed by the terminator.
pub fn write_header<W: Write>(writer: &mut W, table: &FrequencyTable) -> Result<()> {
    for (symbol, freq) in table.iter() {
        writer.write_all(&[SYMBOL_LEN, symbol])?;
        writer.write_all(&freq.to_be_bytes())?;
    }
    writer.write_all(&[HEADER_TERMINATOR])?;
    Ok(())
}

/// Serialize a complete artifact.
pub fn serialize(table: &FrequencyTable, payload: &[u8]) -> Result<Vec<u8>> {
    let header_len = table.len() * ENTRY_LEN + 1;
    let mut artifact = Vec::with_capacity(header_len + payload.len());
    write_header(&mut artifact, table)?;
    trace!("container header: {}", hex::encode(&artifact));
    artifact.write_all(payload)?;
    Ok(artifact)
}

/// Split an artifact into its frequency table and payload.
///
/// Length bytes are read until the terminator or the end of input. Anything
/// after the terminator is payload.
///
/// # Errors
///
/// [`Error::MalformedHeader`] for a length byte other than `0x01`/`0xFF`, an
/// entry cut short by the end of input, or a symbol listed twice.
pub fn parse(artifact: &[u8]) -> Result<Container<'_>> {
    let mut cursor = Cursor::new(artifact);
    let mut entries = Vec::new();
    let mut terminated = false;

    loop {
        let offset = cursor.position();
        let mut len = [0u8; 1];
        if cursor.read(&mut len)? == 0 {
            break;
        }
        match len[0] {
            HEADER_TERMINATOR => {
                terminated = true;
                break;
            }
            SYMBOL_LEN => {
                let mut entry = [0u8; ENTRY_LEN - 1];
                cursor.read_exact(&mut entry).map_err(|_| {
                    Error::malformed_header(format!("entry at offset {} is truncated", offset))
                })?;
                let freq = u32::from_be_bytes([entry[1], entry[2], entry[3], entry[4]]);
                if freq == 0 {
                    warn!("header lists symbol {:#04x} with frequency 0", entry[0]);
                }
                entries.push((entry[0], freq));
            }
            other => {
                return Err(Error::malformed_header(format!(
                    "invalid symbol length {:#04x} at offset {}",
                    other, offset
                )));
            }
        }
    }

    let header_len = cursor.position() as usize;
    let frequencies = FrequencyTable::from_entries(entries)?;
    if !terminated {
        debug!("header ran to end of input without a terminator");
    }
    trace!("container header: {}", hex::encode(&artifact[..header_len]));

    Ok(Container {
        frequencies,
        payload: &artifact[header_len..],
        terminated,
    })
}

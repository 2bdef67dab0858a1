//! Byte frequency analysis.
//!
//! The table produced here is the only state the container persists besides the
//! packed payload, so its iteration order matters: symbols are kept in the order
//! they first appear in the input, and a table parsed back out of a header keeps
//! the order it was written in. Both the encoder and the decoder feed the tree
//! builder in that order, which makes the rebuilt tree identical.

use crate::compression::Result;
use crate::error::Error;
use log::debug;
use rayon::prelude::*;

const ALPHABET: usize = 256;

/// Occurrence counts for the distinct bytes of an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [Option<u32>; ALPHABET],
    order: Vec<u8>,
}

impl FrequencyTable {
    fn empty() -> Self {
        FrequencyTable {
            counts: [None; ALPHABET],
            order: Vec::new(),
        }
    }

    /// Count every byte of `data` on the current thread.
    ///
    /// Fails with [`Error::InputTooLarge`] if any single byte value occurs more
    /// than `u32::MAX` times.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut counts = [0u64; ALPHABET];
        let mut order = Vec::new();
        for &byte in data {
            let count = &mut counts[byte as usize];
            if *count == 0 {
                order.push(byte);
            }
            *count += 1;
        }
        Self::from_counts(&counts, order, data.len())
    }

    /// Count `data` in disjoint chunks on the rayon pool and merge the partial
    /// counts.
    ///
    /// The result is identical to [`FrequencyTable::from_bytes`], including the
    /// first-occurrence ordering of the symbols.
    pub fn from_bytes_parallel(data: &[u8], chunk_size: usize) -> Result<Self> {
        let chunk_size = chunk_size.max(1);
        let merged = data
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(index, chunk)| ChunkCounts::scan(index * chunk_size, chunk))
            .reduce(ChunkCounts::default, ChunkCounts::merge);

        let mut order: Vec<u8> = (0..ALPHABET)
            .filter(|&symbol| merged.counts[symbol] > 0)
            .map(|symbol| symbol as u8)
            .collect();
        order.sort_by_key(|&symbol| merged.first_seen[symbol as usize]);

        debug!(
            "parallel frequency count over {} bytes in chunks of {}",
            data.len(),
            chunk_size
        );
        Self::from_counts(&merged.counts, order, data.len())
    }

    /// Build a table from `(symbol, count)` pairs, keeping their order.
    ///
    /// This is how a container header is turned back into a table. A symbol
    /// listed twice cannot be represented and is reported as a malformed header.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u32)>,
    {
        let mut table = Self::empty();
        for (symbol, count) in entries {
            let slot = &mut table.counts[symbol as usize];
            if slot.is_some() {
                return Err(Error::malformed_header(format!(
                    "symbol {:#04x} is listed more than once",
                    symbol
                )));
            }
            *slot = Some(count);
            table.order.push(symbol);
        }
        Ok(table)
    }

    fn from_counts(counts: &[u64; ALPHABET], order: Vec<u8>, input_len: usize) -> Result<Self> {
        let mut table = Self::empty();
        for &symbol in &order {
            let count = u32::try_from(counts[symbol as usize]).map_err(|_| {
                Error::InputTooLarge {
                    size: input_len,
                    max: u32::MAX as usize,
                }
            })?;
            table.counts[symbol as usize] = Some(count);
        }
        table.order = order;
        Ok(table)
    }

    /// Count recorded for `symbol`, if it is part of the table.
    pub fn get(&self, symbol: u8) -> Option<u32> {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts, i.e. the length of the input the table describes.
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, count)| u64::from(count)).sum()
    }

    /// Entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.order
            .iter()
            .map(move |&symbol| (symbol, self.counts[symbol as usize].unwrap_or(0)))
    }
}

/// Partial result of counting one chunk.
struct ChunkCounts {
    counts: [u64; ALPHABET],
    first_seen: [usize; ALPHABET],
}

impl Default for ChunkCounts {
    fn default() -> Self {
        ChunkCounts {
            counts: [0; ALPHABET],
            first_seen: [usize::MAX; ALPHABET],
        }
    }
}

impl ChunkCounts {
    fn scan(offset: usize, chunk: &[u8]) -> Self {
        let mut partial = Self::default();
        for (i, &byte) in chunk.iter().enumerate() {
            let symbol = byte as usize;
            if partial.counts[symbol] == 0 {
                partial.first_seen[symbol] = offset + i;
            }
            partial.counts[symbol] += 1;
        }
        partial
    }

    fn merge(mut self, other: Self) -> Self {
        for symbol in 0..ALPHABET {
            self.counts[symbol] += other.counts[symbol];
            self.first_seen[symbol] = self.first_seen[symbol].min(other.first_seen[symbol]);
        }
        self
    }
}

/// Build the frequency table for `input`.
pub fn build_frequency_table(input: &[u8]) -> Result<FrequencyTable> {
    FrequencyTable::from_bytes(input)
}

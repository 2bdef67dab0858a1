//! Huffman compression engine.
//!
//! The pipeline is split along its stages:
//! - [`frequency`]: byte frequency analysis
//! - [`tree`]: Huffman tree construction
//! - [`codes`]: bidirectional code tables
//! - [`bits`]: bit packing and unpacking of the payload
//! - [`container`]: frequency header and artifact framing
//! - [`huffman`]: the [`Huffman`] codec that runs all of the above
//!
//! # Examples
//!
//! ```rust
//! use huffpack::compression::{Compression, Huffman};
//!
//! let codec = Huffman::new();
//! let artifact = codec.compress(b"abb").unwrap();
//! assert_eq!(codec.decompress(&artifact).unwrap(), b"abb");
//! ```

pub use crate::error::Result;

/// Trait for compression algorithms
pub trait Compression {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

pub mod bits;
pub mod codes;
pub mod container;
pub mod frequency;
pub mod huffman;
pub mod tree;

pub use codes::{Code, CodeTable};
pub use container::Container;
pub use frequency::{build_frequency_table, FrequencyTable};
pub use huffman::{compress, decompress, Huffman, HuffmanConfig};
pub use tree::{build_huffman_tree, HuffmanNode};

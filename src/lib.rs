//! # huffpack
//!
//! Lossless byte-stream compression with Huffman codes. An artifact carries
//! the frequency table it was built from, so decompression needs nothing but
//! the artifact itself.
//!
//! ```rust
//! let artifact = huffpack::compress(b"mississippi").unwrap();
//! assert_eq!(huffpack::decompress(&artifact).unwrap(), b"mississippi");
//! ```

pub mod compression;
pub mod error;

pub use compression::{compress, decompress, Compression, Huffman, HuffmanConfig};
pub use error::{Error, Result};

//! Huffman compression of whole byte buffers.
//!
//! [`Huffman`] wires the pipeline together: count frequencies, build the tree,
//! derive the code table, pack the payload and frame it with the frequency
//! header. Decompression parses the header, rebuilds the identical tree and
//! code table from it, and unpacks the payload.
//!
//! # Examples
//!
//! ```
//! use huffpack::compression::huffman::{compress, decompress};
//!
//! let input = b"this is an example for huffman encoding";
//! let artifact = compress(input).unwrap();
//! assert_eq!(decompress(&artifact).unwrap(), input);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::compression::bits::{pack, unpack};
use crate::compression::codes::CodeTable;
use crate::compression::container;
use crate::compression::frequency::FrequencyTable;
use crate::compression::tree::build_huffman_tree;
use crate::compression::{Compression, Result};
use crate::error::Error;

/// Inputs at least this long are counted in parallel when the `parallel`
/// feature is enabled.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 20;

/// Chunk size used by the parallel frequency count.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Tuning knobs for [`Huffman`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanConfig {
    /// Inputs of at least this many bytes use the parallel frequency count.
    pub parallel_threshold: usize,
    /// Chunk size for the parallel frequency count
    pub chunk_size: usize,
    /// Longest input `compress` accepts.
    pub max_input_len: usize,
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        let parallel_threshold = if cfg!(feature = "parallel") {
            DEFAULT_PARALLEL_THRESHOLD
        } else {
            usize::MAX
        };
        Self {
            parallel_threshold,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_input_len: u32::MAX as usize,
        }
    }
}

/// Huffman compressor producing self-describing artifacts.
#[derive(Debug, Clone, Default)]
pub struct Huffman {
    config: HuffmanConfig,
}

impl Huffman {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HuffmanConfig) -> Self {
        Huffman { config }
    }

    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }

    /// Count the bytes of `data`, in parallel for large enough inputs.
    pub fn frequencies(&self, data: &[u8]) -> Result<FrequencyTable> {
        if data.len() >= self.config.parallel_threshold {
            FrequencyTable::from_bytes_parallel(data, self.config.chunk_size)
        } else {
            FrequencyTable::from_bytes(data)
        }
    }

    /// Compress `data` into a container artifact.
    ///
    /// Empty input produces the one-byte artifact `[0xFF]`: no header entries,
    /// the terminator, and no payload.
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() > self.config.max_input_len {
            return Err(Error::InputTooLarge {
                size: data.len(),
                max: self.config.max_input_len,
            });
        }

        let table = self.frequencies(data)?;
        let Some(tree) = build_huffman_tree(&table) else {
            debug!("empty input, writing a bare header");
            return container::serialize(&table, &[]);
        };
        let codes = CodeTable::from_tree(&tree);
        let payload = pack(data, &codes)?;
        let artifact = container::serialize(&table, &payload)?;

        debug!(
            "compressed {} bytes to {} ({} symbols, longest code {} bits)",
            data.len(),
            artifact.len(),
            table.len(),
            codes.max_code_len()
        );
        Ok(artifact)
    }

    /// Restore the original bytes from a container artifact.
    ///
    /// # Errors
    ///
    /// * [`Error::MalformedHeader`] if the frequency header cannot be parsed.
    /// * [`Error::CorruptPayload`] if the payload does not decode, or decodes
    ///   to a different number of bytes than the header accounts for.
    pub fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>> {
        let container = container::parse(artifact)?;
        let expected = container.frequencies.total();

        if container.payload.is_empty() && expected == 0 {
            return Ok(Vec::new());
        }
        let tree = build_huffman_tree(&container.frequencies)
            .ok_or_else(|| Error::corrupt_payload("payload present but the header lists no symbols"))?;
        let codes = CodeTable::from_tree(&tree);
        let output = unpack(container.payload, &codes)?;

        if output.len() as u64 != expected {
            return Err(Error::corrupt_payload(format!(
                "decoded {} bytes but the header accounts for {}",
                output.len(),
                expected
            )));
        }
        debug!(
            "decompressed {} bytes to {}",
            artifact.len(),
            output.len()
        );
        Ok(output)
    }

    /// Compress the file at `src` into `dst`, returning the artifact size.
    ///
    /// `dst` is only written once the whole artifact has been built.
    pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, src: P, dst: Q) -> Result<usize> {
        let data = fs::read(src.as_ref())?;
        let artifact = self.compress(&data)?;
        fs::write(dst.as_ref(), &artifact)?;
        info!(
            "compressed {} -> {}",
            src.as_ref().display(),
            dst.as_ref().display()
        );
        Ok(artifact.len())
    }

    /// Decompress the artifact at `src` into `dst`, returning the restored size.
    pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        src: P,
        dst: Q,
    ) -> Result<usize> {
        let artifact = fs::read(src.as_ref())?;
        let output = self.decompress(&artifact)?;
        fs::write(dst.as_ref(), &output)?;
        info!(
            "decompressed {} -> {}",
            src.as_ref().display(),
            dst.as_ref().display()
        );
        Ok(output.len())
    }
}

impl Compression for Huffman {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Huffman::compress(self, data)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Huffman::decompress(self, data)
    }
}

/// Compress `input` with the default configuration.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    Huffman::default().compress(input)
}

/// Decompress an artifact produced by [`compress`].
pub fn decompress(artifact: &[u8]) -> Result<Vec<u8>> {
    Huffman::default().decompress(artifact)
}

/// Artifact path for `input`: the same stem with a `.bin` extension.
pub fn compressed_path(input: &Path) -> PathBuf {
    input.with_extension("bin")
}

/// Restored-file path for `original`: `<stem>_decompressed` with the original
/// extension, if any.
pub fn decompressed_path(original: &Path) -> PathBuf {
    let stem = original
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{}_decompressed", stem);
    if let Some(ext) = original.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    original.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let input = b"huffman coding in rust is fun!";
        let artifact = compress(input).unwrap();
        assert_eq!(decompress(&artifact).unwrap(), input);
    }

    #[test]
    fn test_trait_object() {
        let codec: Box<dyn Compression> = Box::new(Huffman::new());
        let input = b"abracadabra";
        let artifact = codec.compress(input).unwrap();
        assert_eq!(codec.decompress(&artifact).unwrap(), input);
    }

    #[test]
    fn test_max_input_len() {
        let codec = Huffman::with_config(HuffmanConfig {
            max_input_len: 4,
            ..HuffmanConfig::default()
        });
        assert!(codec.compress(b"abcd").is_ok());
        assert!(matches!(
            codec.compress(b"abcde"),
            Err(Error::InputTooLarge { size: 5, max: 4 })
        ));
    }

    #[test]
    fn test_parallel_threshold_gives_same_artifact() {
        let input: Vec<u8> = (0..20_000u32).map(|i| (i % 97) as u8 ^ (i / 300) as u8).collect();
        let parallel = Huffman::with_config(HuffmanConfig {
            parallel_threshold: 0,
            chunk_size: 333,
            ..HuffmanConfig::default()
        });
        let sequential = Huffman::with_config(HuffmanConfig {
            parallel_threshold: usize::MAX,
            ..HuffmanConfig::default()
        });
        assert_eq!(
            parallel.compress(&input).unwrap(),
            sequential.compress(&input).unwrap()
        );
    }

    #[test]
    fn test_length_mismatch_is_corrupt() {
        // Header claims three bytes but the payload decodes to "ab".
        let mut artifact = compress(b"abb").unwrap();
        let payload_start = artifact.len() - 2;
        artifact[payload_start] = 0x06;
        artifact[payload_start + 1] = 0b0100_0000;
        assert!(matches!(
            decompress(&artifact),
            Err(Error::CorruptPayload(_))
        ));
    }

    #[test]
    fn test_payload_without_symbols() {
        assert!(matches!(
            decompress(&[0xFF, 0x07, 0x00]),
            Err(Error::CorruptPayload(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("huffpack-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let original = dir.join("sample.txt");
        fs::write(&original, b"a file worth compressing, compressing, compressing").unwrap();

        let codec = Huffman::new();
        let artifact_path = compressed_path(&original);
        let restored_path = decompressed_path(&original);
        codec.compress_file(&original, &artifact_path).unwrap();
        codec.decompress_file(&artifact_path, &restored_path).unwrap();

        assert_eq!(fs::read(&original).unwrap(), fs::read(&restored_path).unwrap());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_output_paths() {
        let input = Path::new("data/report.txt");
        assert_eq!(compressed_path(input), PathBuf::from("data/report.bin"));
        assert_eq!(
            decompressed_path(input),
            PathBuf::from("data/report_decompressed.txt")
        );
        assert_eq!(
            decompressed_path(Path::new("notes")),
            PathBuf::from("notes_decompressed")
        );
    }
}

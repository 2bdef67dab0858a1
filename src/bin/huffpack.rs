use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use huffpack::compression::codes::to_bit_string;
use huffpack::compression::container;
use huffpack::compression::huffman::{compressed_path, decompressed_path};
use huffpack::compression::CodeTable;
use huffpack::{Huffman, HuffmanConfig};

/// Huffpack: lossless Huffman compression for single files.
#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(author, version, about = "Compress and restore files with Huffman codes", long_about = None)]
struct Cli {
    /// Count byte frequencies in parallel for inputs of at least this many bytes
    #[arg(long, global = true)]
    parallel_threshold: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compress a file into a `.bin` artifact.
    Compress {
        /// File to compress
        input: PathBuf,

        /// Artifact path (default: input with a `.bin` extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore a file from an artifact.
    Decompress {
        /// Artifact to decompress
        input: PathBuf,

        /// Restored file path (default: `<stem>_decompressed` next to the artifact)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compress a file, then restore it next to the original.
    Roundtrip {
        /// File to compress
        input: PathBuf,
    },

    /// Show the frequency header and code table of an artifact.
    Inspect {
        /// Artifact to inspect
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = HuffmanConfig::default();
    if let Some(threshold) = cli.parallel_threshold {
        config.parallel_threshold = threshold;
    }
    let codec = Huffman::with_config(config);

    match cli.command {
        Commands::Compress { input, output } => {
            let output = output.unwrap_or_else(|| compressed_path(&input));
            compress(&codec, &input, &output)?;
        }
        Commands::Decompress { input, output } => {
            let output =
                output.unwrap_or_else(|| decompressed_path(&input.with_extension("")));
            decompress(&codec, &input, &output)?;
        }
        Commands::Roundtrip { input } => {
            let artifact = compressed_path(&input);
            compress(&codec, &input, &artifact)?;
            decompress(&codec, &artifact, &decompressed_path(&input))?;
        }
        Commands::Inspect { input } => inspect(&input)?,
    }

    Ok(())
}

fn compress(codec: &Huffman, input: &Path, output: &Path) -> Result<()> {
    let original = fs::metadata(input)
        .with_context(|| format!("Failed to read {}", input.display()))?
        .len();
    let written = codec
        .compress_file(input, output)
        .with_context(|| format!("Failed to compress {}", input.display()))?;
    println!("Compressed file path: {}", output.display());
    println!("  {} -> {} bytes", original, written);
    Ok(())
}

fn decompress(codec: &Huffman, input: &Path, output: &Path) -> Result<()> {
    let written = codec
        .decompress_file(input, output)
        .with_context(|| format!("Failed to decompress {}", input.display()))?;
    println!("Decompressed file path: {}", output.display());
    println!("  {} bytes restored", written);
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let artifact =
        fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let parsed = container::parse(&artifact)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    let codes = CodeTable::from_frequencies(&parsed.frequencies);

    println!("Artifact: {}", input.display());
    println!("  Symbols:       {}", parsed.frequencies.len());
    println!("  Original size: {} bytes", parsed.frequencies.total());
    println!("  Payload size:  {} bytes", parsed.payload.len());
    if let Some(padding) = parsed.payload.first() {
        println!("  Padding:       {} bits", padding);
    }
    if !parsed.terminated {
        println!("  Header is not terminated");
    }

    println!();
    println!("{:>6}  {:>10}  code", "symbol", "count");
    for (symbol, count) in parsed.frequencies.iter() {
        let code = codes.code(symbol).map(to_bit_string).unwrap_or_default();
        println!("{:>#6x}  {:>10}  {}", symbol, count, code);
    }
    Ok(())
}

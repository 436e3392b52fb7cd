//! Argument parsing and dispatch for the `retrolz` binary.
//!
//! Grounded on `original_source/examples/Main.cc` (a `CLI11`-based
//! `compress`/`decompress` driver with `-t/--type`, `-o/--output`, and a
//! positional input path): parse, dispatch, translate the result into a
//! process exit code. `anyhow` is used here and nowhere else in the
//! crate — the library itself only ever returns [`crate::error::Error`].

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use crate::error::Error as CodecError;
use crate::formats;

#[derive(Parser, Debug)]
#[command(name = "retrolz", about = "LZ-family codecs for retro-game asset formats")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a file.
    Compress(Args),
    /// Decompress a file.
    Decompress(Args),
    /// Compress then decompress a file and compare the result to the original.
    Verify(Args),
}

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Wire format to use. The original shipped CLI only wired up
    /// `lz80`; this one exposes all three formats the library implements.
    #[arg(short = 't', long = "type", value_enum)]
    pub format: Format,

    /// Output path. Required for `compress`/`decompress`; optional for
    /// `verify`, where it additionally writes the compressed bytes.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Input file path.
    pub input: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Lz80,
    Lz01,
    Lz03,
}

fn compress(format: Format, data: &[u8]) -> Vec<u8> {
    match format {
        Format::Lz80 => formats::compress_f80(data),
        Format::Lz01 => formats::compress_f01(data),
        Format::Lz03 => formats::compress_f03(data),
    }
}

fn decompress(format: Format, data: &[u8]) -> Result<Vec<u8>, CodecError> {
    match format {
        Format::Lz80 => formats::decompress_f80(data),
        Format::Lz01 => formats::decompress_f01(data),
        Format::Lz03 => formats::decompress_f03(data),
    }
}

fn run_compress(args: &Args) -> anyhow::Result<()> {
    let data = fs::read(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let output_path = args.output.as_ref().context("--output is required for compress")?;
    let compressed = compress(args.format, &data);
    fs::write(output_path, compressed).with_context(|| format!("writing {}", output_path.display()))?;
    crate::displaylevel!(2, "compressed {} -> {}", args.input.display(), output_path.display());
    Ok(())
}

fn run_decompress(args: &Args) -> anyhow::Result<()> {
    let data = fs::read(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let output_path = args.output.as_ref().context("--output is required for decompress")?;
    let decompressed = decompress(args.format, &data)?;
    fs::write(output_path, decompressed).with_context(|| format!("writing {}", output_path.display()))?;
    crate::displaylevel!(2, "decompressed {} -> {}", args.input.display(), output_path.display());
    Ok(())
}

fn run_verify(args: &Args) -> anyhow::Result<()> {
    let data = fs::read(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let compressed = compress(args.format, &data);
    let round_tripped = decompress(args.format, &compressed)?;
    if round_tripped != data {
        anyhow::bail!(
            "round-trip mismatch for {}: {} bytes in, {} bytes out",
            args.input.display(),
            data.len(),
            round_tripped.len()
        );
    }
    if let Some(output_path) = &args.output {
        fs::write(output_path, &compressed).with_context(|| format!("writing {}", output_path.display()))?;
    }
    crate::displaylevel!(2, "verify OK: {} ({} -> {} bytes)", args.input.display(), data.len(), compressed.len());
    Ok(())
}

/// Dispatches a parsed [`Cli`] invocation and returns a process exit code:
/// 0 on success, 1 on I/O error, 2 on codec error or verification failure.
pub fn run(cli: Cli) -> i32 {
    let result = match &cli.command {
        Command::Compress(args) => run_compress(args),
        Command::Decompress(args) => run_decompress(args),
        Command::Verify(args) => run_verify(args),
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            if err.downcast_ref::<std::io::Error>().is_some() {
                crate::displaylevel!(1, "error: {err:#}");
                1
            } else {
                crate::displaylevel!(1, "error: {err:#}");
                2
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compress_invocation() {
        let cli = Cli::try_parse_from(["retrolz", "compress", "-t", "lz80", "-o", "out.bin", "in.bin"]).unwrap();
        match cli.command {
            Command::Compress(args) => {
                assert_eq!(args.format, Format::Lz80);
                assert_eq!(args.output, Some(PathBuf::from("out.bin")));
                assert_eq!(args.input, PathBuf::from("in.bin"));
            }
            other => panic!("expected Compress, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["retrolz", "compress", "-t", "lz99", "-o", "o", "i"]).is_err());
    }

    #[test]
    fn round_trip_via_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("in.bin");
        let compressed_path = dir.path().join("out.f80");
        let restored_path = dir.path().join("restored.bin");
        fs::write(&input_path, b"hello hello hello world").unwrap();

        let compress_cli = Cli {
            command: Command::Compress(Args { format: Format::Lz80, output: Some(compressed_path.clone()), input: input_path.clone() }),
        };
        assert_eq!(run(compress_cli), 0);

        let decompress_cli = Cli {
            command: Command::Decompress(Args { format: Format::Lz80, output: Some(restored_path.clone()), input: compressed_path }),
        };
        assert_eq!(run(decompress_cli), 0);

        assert_eq!(fs::read(restored_path).unwrap(), fs::read(input_path).unwrap());
    }

    #[test]
    fn decompress_of_truncated_stream_is_a_codec_error() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("truncated.f80");
        let output_path = dir.path().join("out.bin");
        fs::write(&input_path, [0x01]).unwrap();

        let cli = Cli {
            command: Command::Decompress(Args { format: Format::Lz80, output: Some(output_path), input: input_path }),
        };
        assert_eq!(run(cli), 2);
    }

    #[test]
    fn missing_input_file_is_an_io_error() {
        let cli = Cli {
            command: Command::Compress(Args {
                format: Format::Lz80,
                output: Some(PathBuf::from("/nonexistent/out.bin")),
                input: PathBuf::from("/nonexistent/in.bin"),
            }),
        };
        assert_eq!(run(cli), 1);
    }
}

//! Generic LZ engine plus wire-format bindings for retro-game asset
//! compression.
//!
//! [`core`] is the reusable engine: windowed match finding (brute-force
//! and binary-search-tree variants), a greedy tokenizer driver, and a
//! decompression scratchpad. [`formats`] binds that engine to concrete
//! wire formats. Nothing in this crate depends on `anyhow` — errors are
//! the plain [`error::Error`] enum; the CLI binary (`src/cli`) is the
//! only place that reaches for `anyhow`.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod formats;

pub use error::{Error, Result};
pub use formats::{
    compress_f01, compress_f03, compress_f80, decompress_f01, decompress_f03, decompress_f80,
};

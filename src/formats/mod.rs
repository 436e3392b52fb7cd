//! Concrete wire-format bindings built on [`crate::core`].

mod f01f03;
mod f80;
mod prefill;

pub use f01f03::{compress_f01, compress_f03, decompress_f01, decompress_f03};
pub use f80::{compress_f80, decompress_f80};

//! Codec error type.
//!
//! A plain `enum` with `Display` + `std::error::Error` impls, no string
//! payloads for the cases that are fully described by their variant.

use std::error;
use std::fmt;

/// Errors surfaced by a compressor or decompressor.
///
/// Every error is terminal: the codec never retries and never guesses,
/// and any output accumulated before the error is discarded by the
/// caller rather than returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The compressed stream ended in the middle of a token.
    TruncatedInput,
    /// A match's offset exceeds the number of bytes produced so far.
    OffsetUnderflow,
    /// Decoded output crossed the configured size cap.
    OutputLimitExceeded,
    /// A token's encoding is not valid for the format (not simply truncation).
    InvalidToken,
    /// A compressor's configured match class has contradictory ranges.
    ConfigurationError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TruncatedInput => write!(f, "truncated input: stream ended mid-token"),
            Error::OffsetUnderflow => write!(f, "match offset exceeds current output length"),
            Error::OutputLimitExceeded => write!(f, "decoded output exceeded the configured limit"),
            Error::InvalidToken => write!(f, "invalid token in compressed stream"),
            Error::ConfigurationError => write!(f, "match class configuration is contradictory"),
        }
    }
}

impl error::Error for Error {}

/// Convenience alias used throughout the codec modules.
pub type Result<T> = std::result::Result<T, Error>;

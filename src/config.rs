//! Compile-time configuration constants.
//!
//! Each constant here ties back to a specific part of a format's wire
//! layout rather than being a free-floating magic number.

/// F80's sliding window length in bytes: a 32 KiB window, matching
/// class 2's offset range topping out at 32768.
pub const F80_WINDOW_LENGTH: usize = 32 * 1024;

/// F01/F03's ring-buffer window length in bytes.
pub const RING_WINDOW_LENGTH: usize = 4096;

/// Default multiplier applied to the compressed input size to bound a
/// decompressor's output allocation: a crafted stream cannot make the
/// decoder allocate more than `input_size * this` bytes.
pub const DEFAULT_OUTPUT_LIMIT_MULTIPLIER: usize = 256;

/// Floor under the default output limit so a tiny or empty compressed
/// input (e.g. only a prefill, no real payload) isn't bounded to zero.
pub const DEFAULT_OUTPUT_LIMIT_FLOOR: usize = 8192;

/// Hard cap on nodes visited during a single `BinaryTreeMatcher` query:
/// a quality/latency trade-off, not a correctness bound.
pub const BST_QUERY_TRY_CAP: usize = 4096;

/// F80 literal-run flush threshold: pending literals are flushed once
/// this many bytes have accumulated, the largest length the two-byte
/// literal-run header can encode in one shot.
pub const F80_LITERAL_FLUSH_THRESHOLD: usize = 0x8000;

/// Minimum length either matcher will ever report; a match of length 1
/// provides no benefit over a literal and is never produced.
pub const MIN_USEFUL_MATCH_LENGTH: usize = 2;

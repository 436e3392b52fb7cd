//! Decompressor scratchpad.
//!
//! Grounded on `squeeze::LzDecompressor` (`original_source/squeeze.h`):
//! an append-only output buffer plus an input cursor, with primitive
//! emit-literal / emit-run / emit-match operations. Overlapping matches
//! (`offset < length`, e.g. run-style `offset = 1`) require a byte-wise
//! copy so freshly appended bytes are re-read during the copy.

use crate::config::{DEFAULT_OUTPUT_LIMIT_FLOOR, DEFAULT_OUTPUT_LIMIT_MULTIPLIER};
use crate::error::{Error, Result};

/// Constructed per compress/decompress call and discarded; holds no
/// state beyond the current call's output and input cursor.
pub struct Scratchpad<'a> {
    input: &'a [u8],
    position: usize,
    output: Vec<u8>,
    max_output_size: usize,
}

impl<'a> Scratchpad<'a> {
    /// Creates a scratchpad over `input`, optionally pre-filling the
    /// output with `prefill` bytes (installed before decoding begins;
    /// part of the back-reference history, stripped or kept per format
    /// policy via [`Scratchpad::finish_stripping_prefill`]).
    ///
    /// `max_output_size` bounds total output length and defaults to
    /// `input.len() * DEFAULT_OUTPUT_LIMIT_MULTIPLIER` when `None`.
    pub fn new(input: &'a [u8], prefill: Option<&[u8]>, max_output_size: Option<usize>) -> Self {
        let mut output = Vec::new();
        if let Some(pre) = prefill {
            output.extend_from_slice(pre);
        }
        let max_output_size = max_output_size
            .unwrap_or_else(|| (input.len() * DEFAULT_OUTPUT_LIMIT_MULTIPLIER).max(DEFAULT_OUTPUT_LIMIT_FLOOR));
        Scratchpad { input, position: 0, output, max_output_size }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    #[inline]
    pub fn input_position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn output_len(&self) -> usize {
        self.output.len()
    }

    /// Reads the byte at the input cursor and advances past it.
    pub fn fetch(&mut self) -> Result<u8> {
        let b = *self.input.get(self.position).ok_or(Error::TruncatedInput)?;
        self.position += 1;
        Ok(b)
    }

    fn reserve(&mut self, additional: usize) -> Result<()> {
        if self.output.len() + additional > self.max_output_size {
            return Err(Error::OutputLimitExceeded);
        }
        Ok(())
    }

    /// Copies `n` bytes from the input cursor into the output, advancing
    /// the input cursor by `n`.
    pub fn emit_literals(&mut self, n: usize) -> Result<()> {
        self.reserve(n)?;
        let end = self.position.checked_add(n).ok_or(Error::TruncatedInput)?;
        let bytes = self.input.get(self.position..end).ok_or(Error::TruncatedInput)?;
        self.output.extend_from_slice(bytes);
        self.position = end;
        Ok(())
    }

    /// Appends `n` copies of `value`.
    pub fn emit_run(&mut self, n: usize, value: u8) -> Result<()> {
        self.reserve(n)?;
        self.output.resize(self.output.len() + n, value);
        Ok(())
    }

    /// Appends `length` bytes copied from `output[len - offset + i]`.
    ///
    /// Non-overlapping (`offset >= length`): copied as a single block.
    /// Overlapping (`offset < length`): copied one byte at a time so
    /// that freshly appended bytes are visible to later reads within
    /// the same match (e.g. `(offset = 1, length = N)` run extension).
    pub fn emit_match(&mut self, offset: usize, length: usize) -> Result<()> {
        if offset == 0 || offset > self.output.len() {
            return Err(Error::OffsetUnderflow);
        }
        self.reserve(length)?;
        let start = self.output.len() - offset;
        if offset >= length {
            self.output.extend_from_within(start..start + length);
        } else {
            self.output.reserve(length);
            for i in 0..length {
                let b = self.output[start + i];
                self.output.push(b);
            }
        }
        Ok(())
    }

    /// Takes ownership of the accumulated output, unchanged.
    pub fn finish(self) -> Vec<u8> {
        self.output
    }

    /// Like [`Scratchpad::finish`], but drops the first `prefill_len`
    /// bytes that were installed by `reset`/`new` before decoding began.
    pub fn finish_stripping_prefill(mut self, prefill_len: usize) -> Vec<u8> {
        self.output.drain(0..prefill_len);
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_advance_input_cursor() {
        let input = [1u8, 2, 3, 4];
        let mut pad = Scratchpad::new(&input, None, None);
        pad.emit_literals(2).unwrap();
        assert_eq!(pad.input_position(), 2);
        assert_eq!(pad.finish(), vec![1, 2]);
    }

    #[test]
    fn run_appends_constant_byte() {
        let mut pad = Scratchpad::new(&[], None, None);
        pad.emit_run(3, 0x55).unwrap();
        assert_eq!(pad.finish(), vec![0x55, 0x55, 0x55]);
    }

    #[test]
    fn non_overlapping_match_copies_block() {
        let mut pad = Scratchpad::new(&[], None, None);
        pad.emit_run(4, 1).unwrap();
        pad.emit_match(4, 2).unwrap();
        assert_eq!(pad.finish(), vec![1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn overlapping_match_replicates_byte_by_byte() {
        let mut pad = Scratchpad::new(&[], None, None);
        pad.emit_run(1, 0xAB).unwrap();
        pad.emit_match(1, 5).unwrap();
        assert_eq!(pad.finish(), vec![0xAB; 6]);
    }

    #[test]
    fn offset_underflow_is_an_error() {
        let mut pad = Scratchpad::new(&[], None, None);
        assert_eq!(pad.emit_match(1, 1), Err(Error::OffsetUnderflow));
    }

    #[test]
    fn truncated_fetch_is_an_error() {
        let mut pad = Scratchpad::new(&[], None, None);
        assert_eq!(pad.fetch(), Err(Error::TruncatedInput));
    }

    #[test]
    fn output_limit_is_enforced() {
        let input = [0u8; 4];
        let mut pad = Scratchpad::new(&input, None, Some(2));
        assert_eq!(pad.emit_literals(3), Err(Error::OutputLimitExceeded));
    }

    #[test]
    fn prefill_is_stripped_on_finish() {
        let pre = [9u8, 9, 9];
        let input = [1u8, 2];
        let mut pad = Scratchpad::new(&input, Some(&pre), None);
        pad.emit_literals(2).unwrap();
        assert_eq!(pad.finish_stripping_prefill(3), vec![1, 2]);
    }
}

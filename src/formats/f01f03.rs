//! F01/F03: 4 KiB ring-buffer-prefilled LZ formats with a 1-bit flag
//! stream; F03 additionally reserves one match code as an RLE escape.
//!
//! Grounded on `original_source/examples/namco/Lz0103.cc`. Both formats
//! prepend a fixed 4096-byte prefill to the logical window so the first
//! real output byte can already reference up to 4 KiB of history, and
//! drive a single-class [`BinaryTreeMatcher`] over the combined buffer
//! (matching the original's choice of matcher for this format).
//!
//! Match offsets are not written directly: they are rotated through a
//! `zero_offset`/`ring_offset` pair so the on-wire value stays within
//! the 12 bits `nc1 | (ctrl2 << 8)` can hold. The rotation is linear mod
//! 4096, so unlike the original's unsigned bookkeeping (which grows
//! `zero_offset` by 4096 whenever `ring_offset` would overtake it, purely
//! to dodge an unsigned underflow) this port just does the arithmetic in
//! `i64` and reduces with `rem_euclid`.
//!
//! One more deviation: the flag byte's LSB-first bit trick only lands
//! token `i` at bit `i - 1` once a full group of 8 tokens has shifted
//! through it (see [`RingSink::finish`]). The original never corrects a
//! trailing partial group for this, which breaks any stream whose token
//! count isn't a multiple of 8 — effectively all of them. This port
//! right-shifts the final partial byte into alignment before returning.

use crate::config::RING_WINDOW_LENGTH;
use crate::core::binary_tree::BinaryTreeMatcher;
use crate::core::compressor::{LzCompressor, Sink};
use crate::core::matcher::MatcherKind;
use crate::core::range::{Match, MatchClass, Range, RleMatchClass};
use crate::core::rle::RleMatcher;
use crate::core::scratchpad::Scratchpad;
use crate::error::Result;
use crate::formats::prefill;

/// F01's match-length encoding leaves no room for an RLE escape.
const F01_ZERO_OFFSET: i64 = 0x12;
/// F03 reserves `ctrl1 == 0xF` as the RLE escape, so its back-reference
/// class tops out one byte shorter than F01's.
const F03_ZERO_OFFSET: i64 = 0x11;

pub fn compress_f01(data: &[u8]) -> Vec<u8> {
    compress(data, false)
}

pub fn decompress_f01(data: &[u8]) -> Result<Vec<u8>> {
    decompress(data, false)
}

pub fn compress_f03(data: &[u8]) -> Vec<u8> {
    compress(data, true)
}

pub fn decompress_f03(data: &[u8]) -> Result<Vec<u8>> {
    decompress(data, true)
}

fn compress(data: &[u8], rle: bool) -> Vec<u8> {
    let prefill = if rle { prefill::f03_prefill() } else { prefill::f01_prefill() };
    let mut prefixed = Vec::with_capacity(prefill.len() + data.len());
    prefixed.extend_from_slice(prefill);
    prefixed.extend_from_slice(data);

    let match_length = if rle { Range::new(3, 17) } else { Range::new(3, 18) };
    let bst = MatcherKind::BinaryTree(BinaryTreeMatcher::new(
        RING_WINDOW_LENGTH,
        vec![MatchClass::new(0, match_length, Range::new(1, 4096))],
    ));
    let mut matchers = vec![bst];
    if rle {
        matchers.push(MatcherKind::Rle(RleMatcher::new(vec![
            RleMatchClass::new(0, Range::new(4, 18)),
            RleMatchClass::new(1, Range::new(19, 274)),
        ])));
    }

    let zero_offset = if rle { F03_ZERO_OFFSET } else { F01_ZERO_OFFSET };
    let mut lz = LzCompressor::new(matchers);
    let mut sink = RingSink::new(zero_offset, rle);
    lz.compress(&prefixed, &mut sink, RING_WINDOW_LENGTH);
    sink.finish()
}

fn decompress(data: &[u8], rle: bool) -> Result<Vec<u8>> {
    let prefill = if rle { prefill::f03_prefill() } else { prefill::f01_prefill() };
    let zero_offset = if rle { F03_ZERO_OFFSET } else { F01_ZERO_OFFSET };

    let mut pad = Scratchpad::new(data, Some(prefill), None);
    let mut ring_offset: i64 = 0;
    let mut control: u8 = 0xFF;
    let mut bits_remaining: u8 = 0;

    while !pad.is_at_end() {
        if bits_remaining == 0 {
            control = pad.fetch()?;
            bits_remaining = 8;
        }
        bits_remaining -= 1;

        if control & 1 != 0 {
            pad.emit_literals(1)?;
            ring_offset += 1;
        } else {
            let nc1 = pad.fetch()?;
            let nc2 = pad.fetch()?;
            let ctrl1 = nc2 & 0x0F;
            let ctrl2 = nc2 >> 4;

            if rle && ctrl1 == 0x0F {
                let (run_length, value) = if ctrl2 == 0 {
                    (nc1 as usize + 19, pad.fetch()?)
                } else {
                    (ctrl2 as usize + 3, nc1)
                };
                pad.emit_run(run_length, value)?;
                ring_offset += run_length as i64;
            } else {
                let ref_length = 3 + ctrl1 as usize;
                let ref_offset = nc1 as i64 | ((ctrl2 as i64) << 8);
                let absolute_offset = (zero_offset + ref_offset - ring_offset).rem_euclid(4096);
                let offset = (4096 - absolute_offset) as usize;
                pad.emit_match(offset, ref_length)?;
                ring_offset += ref_length as i64;
            }
        }
        control >>= 1;
    }
    Ok(pad.finish_stripping_prefill(RING_WINDOW_LENGTH))
}

/// Serialises tokens into the flag-stream wire encoding shared by F01/F03.
///
/// The flag byte for the next 8 tokens is reserved up front (`last_flag`
/// points at it); each token shifts it right one bit and, for a literal,
/// sets the top bit. After 8 tokens the byte is fully written LSB-first
/// in token order and a fresh placeholder is reserved.
struct RingSink {
    output: Vec<u8>,
    last_flag: usize,
    flags_left: u8,
    ring_offset: i64,
    zero_offset: i64,
    rle: bool,
}

impl RingSink {
    fn new(zero_offset: i64, rle: bool) -> Self {
        RingSink { output: vec![0x00], last_flag: 0, flags_left: 8, ring_offset: 0, zero_offset, rle }
    }

    fn encode_match(&mut self, m: Match) {
        let shifted = 4096 - m.offset as i64 + self.ring_offset;
        let blub = (shifted - self.zero_offset).rem_euclid(4096);
        let a = (blub & 0xFF) as u8;
        let b = ((m.length - 3) as u8) | (((blub >> 8) as u8) << 4);
        self.output.push(a);
        self.output.push(b);
    }

    fn encode_rle(&mut self, length: usize, value: u8) {
        if length <= 18 {
            let ctrl2 = (length - 3) as u8;
            self.output.push(value);
            self.output.push((ctrl2 << 4) | 0x0F);
        } else {
            let nc1 = (length - 19) as u8;
            self.output.push(nc1);
            self.output.push(0x0F);
            self.output.push(value);
        }
    }

    fn advance(&mut self, length: usize) {
        self.ring_offset += length as i64;
        self.flags_left -= 1;
        if self.flags_left == 0 {
            self.flags_left = 8;
            self.last_flag = self.output.len();
            self.output.push(0x00);
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.flags_left == 8 {
            // Reserved byte for a group that never received a token.
            self.output.pop();
        } else if self.flags_left > 0 {
            // A trailing partial group: each token's flag bit only
            // reaches its final bit-`i` slot once 8 shifts have been
            // applied to it. With fewer than 8 tokens written, the bits
            // are still sitting `flags_left` places too high; shift them
            // down so the decoder's LSB-first read lines up.
            self.output[self.last_flag] >>= self.flags_left;
        }
        self.output
    }
}

impl Sink for RingSink {
    fn consume_literal(&mut self, input: &[u8], pos: usize) {
        self.output[self.last_flag] >>= 1;
        self.output[self.last_flag] |= 0x80;
        self.output.push(input[pos]);
        self.advance(1);
    }

    fn consume_match(&mut self, input: &[u8], pos: usize, _matcher_index: usize, m: Match) {
        self.output[self.last_flag] >>= 1;
        if self.rle && m.offset == 0 {
            self.encode_rle(m.length, input[pos]);
        } else {
            self.encode_match(m);
        }
        self.advance(m.length);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f01_empty_input_round_trips() {
        assert_eq!(decompress_f01(&compress_f01(&[])).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn f01_short_repeat_round_trips() {
        let data = b"ABABABABABABAB";
        assert_eq!(decompress_f01(&compress_f01(data)).unwrap(), data);
    }

    #[test]
    fn f01_prefill_reference_round_trips() {
        // The first output byte can legally reference into the prefill,
        // which only exists because compression prepends it too.
        let mut data = prefill::f01_prefill()[..8].to_vec();
        data.extend_from_slice(b" trailing text after a prefill hit");
        assert_eq!(decompress_f01(&compress_f01(&data)).unwrap(), data);
    }

    #[test]
    fn f03_long_run_uses_rle_and_round_trips() {
        let data = vec![0x77u8; 300];
        let compressed = compress_f03(&data);
        assert_eq!(decompress_f03(&compressed).unwrap(), data);
    }

    #[test]
    fn f03_short_run_round_trips() {
        let mut data = b"xx".to_vec();
        data.extend(std::iter::repeat_n(b'q', 6));
        data.extend_from_slice(b"yy");
        assert_eq!(decompress_f03(&compress_f03(&data)).unwrap(), data);
    }

    #[test]
    fn f03_mixed_content_round_trips() {
        let data = b"mississippi river, mississippi river, aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
        assert_eq!(decompress_f03(&compress_f03(data)).unwrap(), data);
    }

    #[test]
    fn f01_has_no_rle_escape_available() {
        // Every match class-1 control nibble (0..=15) is a valid length
        // for F01, so ctrl1 == 0xF is never special-cased on decode.
        let data = vec![0x33u8; 40];
        let compressed = compress_f01(&data);
        assert_eq!(decompress_f01(&compressed).unwrap(), data);
    }
}

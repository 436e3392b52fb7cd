//! F80: 32 KiB-window, byte-aligned LZ format with three match classes
//! and a variable-length literal-run class.
//!
//! Grounded on `original_source/examples/namco/Lz80.cc`. The compressor
//! is driven by [`BruteForceMatcher`] over the full window, matching the
//! original source's choice for this format.
//!
//! One deviation: the original's literal-run encoder writes the
//! medium/long extended-length forms as a bare first byte (`0x80 |
//! ...`, or a two-byte big length), but its own decoder only recognises
//! those forms after reading a flags byte of all zero bits — the
//! encoder never actually emits that leading zero byte. Any literal run
//! longer than 63 bytes round-trips to garbage as a result. This port
//! emits the leading `0x00` escape the decoder expects.

use crate::config::{F80_LITERAL_FLUSH_THRESHOLD, F80_WINDOW_LENGTH};
use crate::core::brute_force::BruteForceMatcher;
use crate::core::compressor::{LzCompressor, Sink};
use crate::core::matcher::MatcherKind;
use crate::core::range::{Match, MatchClass, Range};
use crate::core::scratchpad::Scratchpad;
use crate::error::Result;

fn match_classes() -> Vec<MatchClass> {
    vec![
        MatchClass::new(0, Range::new(2, 5), Range::new(1, 16)),
        MatchClass::new(1, Range::new(3, 18), Range::new(1, 1024)),
        MatchClass::new(2, Range::new(4, 131), Range::new(1, 32768)),
    ]
}

/// Compresses `data` into the F80 wire format.
pub fn compress_f80(data: &[u8]) -> Vec<u8> {
    let matcher = MatcherKind::BruteForce(BruteForceMatcher::new(F80_WINDOW_LENGTH, match_classes()));
    let mut lz = LzCompressor::new(vec![matcher]);
    let mut sink = F80Sink::new(data.len());
    lz.compress(data, &mut sink, 0);
    sink.finish(data)
}

/// Decompresses an F80 wire-format stream.
pub fn decompress_f80(data: &[u8]) -> Result<Vec<u8>> {
    let mut pad = Scratchpad::new(data, None, None);
    loop {
        if pad.is_at_end() {
            break;
        }
        let flags = pad.fetch()?;
        match flags >> 6 {
            0 => {
                if copy_uncompressed(&mut pad, flags)? {
                    break;
                }
            }
            1 => {
                let length = 2 + ((flags >> 4) & 0x3) as usize;
                let offset = 1 + (flags & 0xF) as usize;
                pad.emit_match(offset, length)?;
            }
            2 => {
                let lsb = pad.fetch()?;
                let length = 3 + ((flags >> 2) & 0xF) as usize;
                let offset = 1 + ((((flags & 0x3) as usize) << 8) | lsb as usize);
                pad.emit_match(offset, length)?;
            }
            3 => {
                let lsb1 = pad.fetch()?;
                let lsb2 = pad.fetch()?;
                let length = 4 + ((((flags & 0x3F) as usize) << 1) | ((lsb1 >> 7) as usize));
                let offset = 1 + ((((lsb1 & 0x7F) as usize) << 8) | lsb2 as usize);
                pad.emit_match(offset, length)?;
            }
            _ => unreachable!("flags >> 6 is always in 0..=3"),
        }
    }
    Ok(pad.finish())
}

/// Returns `Ok(true)` when the end-of-stream marker (`00 00 00`) was read.
fn copy_uncompressed(pad: &mut Scratchpad, flags: u8) -> Result<bool> {
    let mut length = (flags & 0x3F) as usize;
    if length == 0 {
        let first = pad.fetch()?;
        if first >> 7 == 0 {
            let second = pad.fetch()?;
            if first == 0 && second == 0 {
                return Ok(true);
            }
            length = 0xBF + (((first as usize) << 8) | second as usize);
        } else {
            length = 0x40 + (first & 0x7F) as usize;
        }
    }
    pad.emit_literals(length)?;
    Ok(false)
}

struct F80Sink {
    output: Vec<u8>,
    literal_start: usize,
    literal_end: usize,
}

impl F80Sink {
    fn new(_input_len: usize) -> Self {
        F80Sink { output: Vec::new(), literal_start: 0, literal_end: 0 }
    }

    fn encode_uncompressed(&mut self, input: &[u8]) {
        let length = self.literal_end - self.literal_start;
        if length < 0x40 {
            self.output.push(length as u8);
        } else if length < 0xC0 {
            // The decoder only enters this extended-length path when the
            // flags byte it dispatched on is all zero bits; the escape
            // byte below is what makes that true, not just the length
            // byte that follows it.
            self.output.push(0x00);
            self.output.push(0x80 | (length - 0x40) as u8);
        } else {
            self.output.push(0x00);
            let adjusted = length - 0xBF;
            self.output.push((adjusted >> 8) as u8);
            self.output.push(adjusted as u8);
        }
        self.output.extend_from_slice(&input[self.literal_start..self.literal_end]);
    }

    fn encode_match(&mut self, m: Match) {
        match m.class {
            0 => {
                let flags = 0x40 | (((m.length - 2) as u8) << 4) | (m.offset - 1) as u8;
                self.output.push(flags);
            }
            1 => {
                let adj_offset = m.offset - 1;
                let byte0 = 0x80 | (((m.length - 3) as u8) << 2) | ((adj_offset >> 8) as u8);
                self.output.push(byte0);
                self.output.push(adj_offset as u8);
            }
            2 => {
                let adj_length = m.length - 4;
                let adj_offset = m.offset - 1;
                let byte0 = 0xC0 | (adj_length >> 1) as u8;
                let byte1 = (((adj_offset >> 8) & 0x7F) as u8) | (((adj_length & 1) as u8) << 7);
                self.output.push(byte0);
                self.output.push(byte1);
                self.output.push(adj_offset as u8);
            }
            other => unreachable!("F80 only configures classes 0..=2, got {other}"),
        }
    }

    fn finish(mut self, input: &[u8]) -> Vec<u8> {
        if self.literal_start != self.literal_end {
            self.encode_uncompressed(input);
        }
        self.output.extend_from_slice(&[0x00, 0x00, 0x00]);
        self.output
    }
}

impl Sink for F80Sink {
    fn consume_literal(&mut self, input: &[u8], pos: usize) {
        self.literal_end = pos + 1;
        if self.literal_end - self.literal_start >= F80_LITERAL_FLUSH_THRESHOLD {
            self.encode_uncompressed(input);
            self.literal_start = self.literal_end;
        }
    }

    fn consume_match(&mut self, input: &[u8], pos: usize, _matcher_index: usize, m: Match) {
        if self.literal_start != self.literal_end {
            self.encode_uncompressed(input);
        }
        self.encode_match(m);
        self.literal_start = pos + m.length;
        self.literal_end = self.literal_start;
    }
}

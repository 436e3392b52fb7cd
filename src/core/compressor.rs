//! Greedy tokenizer driver.
//!
//! Grounded on `squeeze::LzCompressor` (`original_source/squeeze.h`):
//! holds an ordered set of matchers, and at each position asks every
//! matcher for its best match, picks the globally best by quality
//! (ties broken by matcher order, then by lower class index), and hands
//! the winning token to a format-specific sink.

use crate::core::matcher::{Matcher, MatcherKind};
use crate::core::range::Match;

/// Receives tokens from the driver and serialises them into a
/// format-specific wire encoding. One sink implementation per codec.
pub trait Sink {
    /// `pos` is the index of the first literal byte to consume.
    fn consume_literal(&mut self, input: &[u8], pos: usize);
    /// `class` identifies which matcher (by position in the driver's
    /// matcher list) produced `m`.
    fn consume_match(&mut self, input: &[u8], pos: usize, matcher_index: usize, m: Match);
}

pub struct LzCompressor {
    matchers: Vec<MatcherKind>,
}

impl LzCompressor {
    pub fn new(matchers: Vec<MatcherKind>) -> Self {
        LzCompressor { matchers }
    }

    fn advance_all(&mut self, input: &[u8], window_start: usize, pos: usize, end: usize, steps: usize) {
        for m in self.matchers.iter_mut() {
            m.advance(input, window_start, pos, end, steps);
        }
    }

    /// Tokenizes `input`, starting at `start_offset` (the matchers are
    /// first advanced through `[0, start_offset)` without emitting any
    /// tokens, letting a format prime the window with a known prefix —
    /// used by F01/F03's ring-buffer prefill).
    pub fn compress<S: Sink>(&mut self, input: &[u8], sink: &mut S, start_offset: usize) {
        let end = input.len();
        let window_start = 0;

        self.advance_all(input, window_start, 0, end, start_offset);

        let mut pos = start_offset;
        while pos < end {
            let old_pos = pos;
            match self.find_best(input, window_start, pos, end) {
                Some((matcher_index, m)) => {
                    sink.consume_match(input, pos, matcher_index, m);
                    pos += m.length;
                }
                None => {
                    sink.consume_literal(input, pos);
                    pos += 1;
                }
            }
            self.advance_all(input, window_start, old_pos, end, pos - old_pos);
        }
    }

    /// Earlier matcher wins ties; within one matcher, [`Matcher::best_match`]
    /// already applies the lower-class-index tiebreak.
    fn find_best(&mut self, input: &[u8], window_start: usize, pos: usize, end: usize) -> Option<(usize, Match)> {
        let mut best: Option<(usize, Match, i64)> = None;
        for (idx, matcher) in self.matchers.iter_mut().enumerate() {
            if !matcher.find_matches(input, window_start, pos, end) {
                continue;
            }
            let Some(cls) = matcher.best_match() else { continue };
            let quality = matcher.quality_at(cls);
            let m = matcher.match_at(cls);
            if best.as_ref().is_none_or(|(_, _, bq)| quality > *bq) {
                best = Some((idx, m, quality));
            }
        }
        best.map(|(idx, m, _)| (idx, m))
    }
}

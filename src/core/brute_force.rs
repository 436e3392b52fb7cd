//! Brute-force longest-match search.
//!
//! Grounded on `squeez::BruteForceMatcher` (`original_source/squeeze.h`):
//! for every offset in the window, compare the bytes at `pos` and
//! `pos - offset` up to `max_match_length` and record the longest common
//! prefix per class. `O(window * lookahead)` per step — used for
//! correctness oracles and for the F80 codec, whose 32 KiB window is
//! small enough that this is acceptable (the original source drives
//! F80's compressor with exactly this matcher).

use crate::core::matcher::Matcher;
use crate::core::range::{Match, MatchClass};

pub struct BruteForceMatcher {
    classes: Vec<MatchClass>,
    matches: Vec<Match>,
    window_length: usize,
    max_match_length: usize,
}

impl BruteForceMatcher {
    pub fn new(window_length: usize, classes: Vec<MatchClass>) -> Self {
        let max_match_length = classes.iter().map(|c| c.length.max).max().unwrap_or(0);
        let n = classes.len();
        BruteForceMatcher { classes, matches: vec![Match::INVALID; n], window_length, max_match_length }
    }
}

impl Matcher for BruteForceMatcher {
    fn find_matches(&mut self, input: &[u8], window_start: usize, pos: usize, end: usize) -> bool {
        for m in self.matches.iter_mut() {
            *m = Match::INVALID;
        }
        let mut found = false;
        let search_length = (pos - window_start).min(self.window_length);
        let look_ahead_length = end - pos;

        for offset in 1..search_length {
            let mut length = 0;
            while length < look_ahead_length && length < self.max_match_length {
                if input[pos - offset + length] != input[pos + length] {
                    break;
                }
                length += 1;
            }
            if length <= 1 {
                continue;
            }
            for (cls_idx, cls) in self.classes.iter().enumerate() {
                if cls.offset.contains(offset)
                    && cls.length.contains(length)
                    && length > self.matches[cls_idx].length
                {
                    self.matches[cls_idx] = Match { class: cls_idx, offset, length };
                    found = true;
                }
            }
        }
        found
    }

    fn best_match(&self) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (i, cls) in self.classes.iter().enumerate() {
            if !self.matches[i].is_valid() {
                continue;
            }
            let q = cls.quality(&self.matches[i]);
            if best.is_none_or(|(_, bq)| q > bq) {
                best = Some((i, q));
            }
        }
        best.map(|(i, _)| i)
    }

    fn match_at(&self, class: usize) -> Match {
        self.matches[class]
    }

    fn quality_at(&self, class: usize) -> i64 {
        self.classes[class].quality(&self.matches[class])
    }

    fn max_match_length(&self) -> usize {
        self.max_match_length
    }

    fn advance(&mut self, _input: &[u8], _window_start: usize, _pos: usize, _end: usize, _steps: usize) {
        // Stateless: every query rescans the window, so there is nothing to advance.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::range::Range;

    fn classes() -> Vec<MatchClass> {
        vec![MatchClass::new(1, Range::new(2, 18), Range::new(1, 1024))]
    }

    #[test]
    fn finds_longest_repeat_in_window() {
        let input = b"ABABABAB";
        let mut m = BruteForceMatcher::new(32, classes());
        m.find_matches(input, 0, 4, input.len());
        let best = m.best_match().unwrap();
        let mtc = m.match_at(best);
        assert_eq!(mtc.offset, 2);
        assert_eq!(mtc.length, 4);
    }

    #[test]
    fn no_match_below_length_two() {
        let input = b"XYZQRS";
        let mut m = BruteForceMatcher::new(32, classes());
        let found = m.find_matches(input, 0, 3, input.len());
        assert!(!found);
    }

    #[test]
    fn advance_is_a_no_op() {
        let mut m = BruteForceMatcher::new(32, classes());
        m.advance(b"", 0, 0, 0, 5);
    }
}

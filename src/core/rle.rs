//! Run-length matcher.
//!
//! Grounded on `squeeze::RleMatcher` (`original_source/squeeze.h`):
//! counts the run of the byte at the current position forward, bounded
//! by `max_match_length` and the remaining lookahead, and reports a
//! match (clamped to each class's `length.max`) for every class whose
//! length range admits it.
//!
//! Represented with the shared [`Match`] type: RLE matches always carry
//! `offset == 0`, the sentinel this crate uses to mean "replicate the
//! byte at the current position" rather than a real back-reference.

use crate::core::matcher::Matcher;
use crate::core::range::{Match, RleMatchClass};

pub struct RleMatcher {
    classes: Vec<RleMatchClass>,
    matches: Vec<Match>,
    max_match_length: usize,
}

impl RleMatcher {
    pub fn new(classes: Vec<RleMatchClass>) -> Self {
        let max_match_length = classes.iter().map(|c| c.length.max).max().unwrap_or(0);
        let n = classes.len();
        RleMatcher { classes, matches: vec![Match::INVALID; n], max_match_length }
    }
}

impl Matcher for RleMatcher {
    fn find_matches(&mut self, input: &[u8], _window_start: usize, pos: usize, end: usize) -> bool {
        for m in self.matches.iter_mut() {
            *m = Match::INVALID;
        }
        if pos >= end {
            return false;
        }
        let value = input[pos];
        let mut rle_pos = pos;
        while rle_pos < end && input[rle_pos] == value && rle_pos - pos < self.max_match_length {
            rle_pos += 1;
        }
        let length = rle_pos - pos;
        if length <= 1 {
            return false;
        }
        let mut found = false;
        for (i, cls) in self.classes.iter().enumerate() {
            if length >= cls.length.min {
                self.matches[i] = Match { class: i, offset: 0, length: length.min(cls.length.max) };
                found = true;
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
            let q = self.matches[i].length as i64 - cls.overhead as i64;
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
        self.matches[class].length as i64 - self.classes[class].overhead as i64
    }

    fn max_match_length(&self) -> usize {
        self.max_match_length
    }

    fn advance(&mut self, _input: &[u8], _window_start: usize, _pos: usize, _end: usize, _steps: usize) {
        // Stateless: every query re-derives the run from the input directly.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::range::Range;

    #[test]
    fn finds_run_clamped_to_class_max() {
        let mut m = RleMatcher::new(vec![RleMatchClass::new(0, Range::new(2, 5))]);
        let input = [0xAAu8; 20];
        assert!(m.find_matches(&input, 0, 0, input.len()));
        let mtc = m.match_at(0);
        assert_eq!(mtc.offset, 0);
        assert_eq!(mtc.length, 5);
    }

    #[test]
    fn no_run_found_for_single_byte() {
        let mut m = RleMatcher::new(vec![RleMatchClass::new(0, Range::new(2, 5))]);
        let input = [1u8, 2, 3];
        assert!(!m.find_matches(&input, 0, 0, input.len()));
    }
}

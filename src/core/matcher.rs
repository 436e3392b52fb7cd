//! Matcher capability set shared by all window-matching strategies.
//!
//! The engine runs a tuple of matchers rather than a single one. Rather
//! than modelling that tuple with virtual dispatch, matchers here are a
//! closed sum type (`MatcherKind`) behind one capability set:
//! `find_matches`, `best_match`, `match_at`, `max_match_length`, `advance`
//! (the names `squeeze::StringMatcher` uses in `original_source/squeeze.h`).
//!
//! A single [`Match`] type represents both back-references and RLE runs:
//! `offset == 0` flags an RLE run (replicate the byte at the current
//! input position `length` times) since a real back-reference always has
//! `offset >= 1`. This keeps the driver and format sinks working
//! against one token shape instead of two.

use super::range::Match;

/// Common operations every window matcher supports.
pub trait Matcher {
    /// Searches for matches at `pos` within `input[window_start..pos]`,
    /// bounded by `input[..end]` for lookahead. Returns `true` if any
    /// configured class produced a match of length > 1.
    fn find_matches(&mut self, input: &[u8], window_start: usize, pos: usize, end: usize) -> bool;

    /// Index of the configured class with the highest quality among the
    /// matches found by the last [`Matcher::find_matches`] call, or
    /// `None` if none was valid.
    fn best_match(&self) -> Option<usize>;

    /// The match recorded for `class` by the last `find_matches` call.
    /// `Match::INVALID` if that class found nothing.
    fn match_at(&self, class: usize) -> Match;

    /// Quality (`length - overhead`) of the match recorded for `class`.
    fn quality_at(&self, class: usize) -> i64;

    /// Longest length any configured class could possibly record.
    fn max_match_length(&self) -> usize;

    /// Advances the matcher's internal state by `steps` positions,
    /// starting at `pos` (exclusive of the step already taken).
    fn advance(&mut self, input: &[u8], window_start: usize, pos: usize, end: usize, steps: usize);
}

/// Sum type over the three matcher strategies.
pub enum MatcherKind {
    BruteForce(super::brute_force::BruteForceMatcher),
    BinaryTree(super::binary_tree::BinaryTreeMatcher),
    Rle(super::rle::RleMatcher),
}

impl Matcher for MatcherKind {
    fn find_matches(&mut self, input: &[u8], window_start: usize, pos: usize, end: usize) -> bool {
        match self {
            MatcherKind::BruteForce(m) => m.find_matches(input, window_start, pos, end),
            MatcherKind::BinaryTree(m) => m.find_matches(input, window_start, pos, end),
            MatcherKind::Rle(m) => m.find_matches(input, window_start, pos, end),
        }
    }

    fn best_match(&self) -> Option<usize> {
        match self {
            MatcherKind::BruteForce(m) => m.best_match(),
            MatcherKind::BinaryTree(m) => m.best_match(),
            MatcherKind::Rle(m) => m.best_match(),
        }
    }

    fn match_at(&self, class: usize) -> Match {
        match self {
            MatcherKind::BruteForce(m) => m.match_at(class),
            MatcherKind::BinaryTree(m) => m.match_at(class),
            MatcherKind::Rle(m) => m.match_at(class),
        }
    }

    fn quality_at(&self, class: usize) -> i64 {
        match self {
            MatcherKind::BruteForce(m) => m.quality_at(class),
            MatcherKind::BinaryTree(m) => m.quality_at(class),
            MatcherKind::Rle(m) => m.quality_at(class),
        }
    }

    fn max_match_length(&self) -> usize {
        match self {
            MatcherKind::BruteForce(m) => m.max_match_length(),
            MatcherKind::BinaryTree(m) => m.max_match_length(),
            MatcherKind::Rle(m) => m.max_match_length(),
        }
    }

    fn advance(&mut self, input: &[u8], window_start: usize, pos: usize, end: usize, steps: usize) {
        match self {
            MatcherKind::BruteForce(m) => m.advance(input, window_start, pos, end, steps),
            MatcherKind::BinaryTree(m) => m.advance(input, window_start, pos, end, steps),
            MatcherKind::Rle(m) => m.advance(input, window_start, pos, end, steps),
        }
    }
}

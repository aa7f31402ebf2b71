//! Width allocation for agenda card rows.
//!
//! Provides:
//! - Two-block and three-block percentage splits driven by title length
//! - Square-root weighting so long titles don't dominate linearly
//! - "TBD" placeholder sizing (reserved at 20 chars, not content-sized)
//! - Exact 100.0 row totals despite per-block rounding

use std::fmt;

use crate::agenda::PLACEHOLDER_TITLE;

/// Bonus multiplier applied to the single heaviest block in a row.
pub const WIDTH_BONUS: f64 = 1.15;

/// Effective length a placeholder title is sized as. A literal "TBD" is
/// visually short but its slot must fit the full title revealed later.
const PLACEHOLDER_LEN: usize = 20;

/// A width percentage rounded to one decimal place.
///
/// Formats as `"48.9%"`; resolves to terminal columns via [`Percent::cells`]
/// at commit time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent(f64);

impl Percent {
    pub fn value(self) -> f64 {
        self.0
    }

    /// Full-width block (a row with a single item).
    pub fn full() -> Self {
        Percent(100.0)
    }

    /// Resolve to a column count within `total` terminal cells.
    pub fn cells(self, total: u16) -> u16 {
        ((f64::from(total) * self.0) / 100.0).round() as u16
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

/// Length used for weighting: character count, except the literal
/// placeholder which is forced to [`PLACEHOLDER_LEN`].
fn effective_len(title: &str) -> usize {
    if title == PLACEHOLDER_TITLE {
        PLACEHOLDER_LEN
    } else {
        title.chars().count()
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Split a row between two blocks based on their title lengths.
pub fn two_block_percents(title1: &str, title2: &str) -> [Percent; 2] {
    two_block_percents_with_bonus(title1, title2, WIDTH_BONUS)
}

pub fn two_block_percents_with_bonus(title1: &str, title2: &str, bonus: f64) -> [Percent; 2] {
    let mut w1 = (effective_len(title1) as f64).sqrt();
    let mut w2 = (effective_len(title2) as f64).sqrt();

    // Strict comparisons: on a tie neither block gets the bonus.
    if w1 > w2 {
        w1 *= bonus;
    } else if w2 > w1 {
        w2 *= bonus;
    }

    let mut total = w1 + w2;
    if total == 0.0 {
        // Both titles empty: equal split.
        w1 = 1.0;
        total = 2.0;
    }

    let width1 = round1(w1 / total * 100.0);
    // Last block absorbs the rounding drift so the row sums to 100.0.
    let width2 = round1(100.0 - width1);
    [Percent(width1), Percent(width2)]
}

/// Split a row between three blocks based on their title lengths.
pub fn three_block_percents(title1: &str, title2: &str, title3: &str) -> [Percent; 3] {
    three_block_percents_with_bonus(title1, title2, title3, WIDTH_BONUS)
}

pub fn three_block_percents_with_bonus(
    title1: &str,
    title2: &str,
    title3: &str,
    bonus: f64,
) -> [Percent; 3] {
    let mut w1 = (effective_len(title1) as f64).sqrt();
    let mut w2 = (effective_len(title2) as f64).sqrt();
    let mut w3 = (effective_len(title3) as f64).sqrt();

    // First match wins among equal maxima.
    let max = w1.max(w2).max(w3);
    if w1 == max {
        w1 *= bonus;
    } else if w2 == max {
        w2 *= bonus;
    } else if w3 == max {
        w3 *= bonus;
    }

    let mut total = w1 + w2 + w3;
    if total == 0.0 {
        w1 = 1.0;
        w2 = 1.0;
        total = 3.0;
    }

    let width1 = round1(w1 / total * 100.0);
    let width2 = round1(w2 / total * 100.0);
    let width3 = round1(100.0 - width1 - width2);
    [Percent(width1), Percent(width2), Percent(width3)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum2(p: [Percent; 2]) -> f64 {
        p[0].value() + p[1].value()
    }

    fn sum3(p: [Percent; 3]) -> f64 {
        p[0].value() + p[1].value() + p[2].value()
    }

    #[test]
    fn test_two_block_sums_to_100() {
        let cases = [
            ("Executive Breakfast", "What's new in OpenAPI 3.2"),
            ("TBD", "Spec-First API Designs Without Codegen"),
            ("a", "a very much longer title than the first one"),
            ("", "nonempty"),
            ("", ""),
        ];
        for (a, b) in cases {
            let p = two_block_percents(a, b);
            assert!((sum2(p) - 100.0).abs() < 0.05, "{:?} for ({a:?}, {b:?})", p);
            assert!(p[0].value() >= 0.0 && p[0].value() <= 100.0);
            assert!(p[1].value() >= 0.0 && p[1].value() <= 100.0);
        }
    }

    #[test]
    fn test_three_block_sums_to_100() {
        let cases = [
            ("Executive Breakfast", "Conference Welcome", "TBD"),
            ("a", "bb", "ccc"),
            ("", "", ""),
            ("same", "same", "same"),
        ];
        for (a, b, c) in cases {
            let p = three_block_percents(a, b, c);
            assert!(
                (sum3(p) - 100.0).abs() < 0.05,
                "{:?} for ({a:?}, {b:?}, {c:?})",
                p
            );
        }
    }

    #[test]
    fn test_placeholder_pair_splits_evenly() {
        // Equal effective lengths, so no bonus and an even split.
        let p = two_block_percents("TBD", "TBD");
        assert_eq!(p[0].value(), 50.0);
        assert_eq!(p[1].value(), 50.0);
    }

    #[test]
    fn test_placeholder_beats_short_title() {
        // "TBD" is reserved-sized at 20 chars, not its literal 3.
        let p = two_block_percents("TBD", "Hi");
        assert!(p[0].value() > p[1].value());
        assert_eq!(p[0].value(), 78.4);
        assert_eq!(p[1].value(), 21.6);
    }

    #[test]
    fn test_longer_title_never_narrower() {
        let short = "short";
        let long = "a considerably longer session title";
        let p = two_block_percents(long, short);
        assert!(p[0].value() >= p[1].value());
        let p = two_block_percents(short, long);
        assert!(p[1].value() >= p[0].value());
    }

    #[test]
    fn test_empty_title_gets_zero() {
        let p = two_block_percents("", "Closing Remarks");
        assert_eq!(p[0].value(), 0.0);
        assert_eq!(p[1].value(), 100.0);
    }

    #[test]
    fn test_all_empty_equal_split() {
        let p = two_block_percents("", "");
        assert_eq!(p[0].value(), 50.0);
        assert_eq!(p[1].value(), 50.0);

        let p = three_block_percents("", "", "");
        assert_eq!(p[0].value(), 33.3);
        assert_eq!(p[1].value(), 33.3);
        assert_eq!(p[2].value(), 33.4);
    }

    #[test]
    fn test_three_block_tie_bonus_first_match() {
        // All three tie; only the first block gets the bonus.
        let p = three_block_percents("TBD", "TBD", "TBD");
        assert_eq!(p[0].value(), 36.5);
        assert_eq!(p[1].value(), 31.7);
        assert_eq!(p[2].value(), 31.8);
        assert!(p[0].value() > p[1].value());
    }

    #[test]
    fn test_percent_display() {
        let p = two_block_percents("TBD", "TBD");
        assert_eq!(p[0].to_string(), "50.0%");
        assert_eq!(three_block_percents("", "", "")[2].to_string(), "33.4%");
    }

    #[test]
    fn test_percent_cells() {
        assert_eq!(Percent::full().cells(120), 120);
        let p = two_block_percents("TBD", "TBD");
        assert_eq!(p[0].cells(100), 50);
        assert_eq!(p[0].cells(81), 41); // 40.5 rounds up
    }
}

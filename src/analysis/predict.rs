//! Prediction heuristics.
//!
//! None of this predicts anything; these are the descriptive heuristics
//! the `/prediksi` command reports.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;

use super::{DigitFrequency, Draw};

/// Last digit of the day and of the month.
#[must_use]
pub fn date_digits(date: NaiveDate) -> BTreeSet<char> {
    [date.day() % 10, date.month() % 10]
        .into_iter()
        .filter_map(|d| char::from_digit(d, 10))
        .collect()
}

/// Samples up to `amount` digits, weighted by frequency, without replacement.
pub fn weighted_sample<R: Rng + ?Sized>(
    freq: &DigitFrequency,
    amount: usize,
    rng: &mut R,
) -> Vec<char> {
    freq.weighted_pool()
        .choose_multiple(rng, amount)
        .copied()
        .collect()
}

/// Result of the cross-pattern heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossPattern {
    /// Fewer than five draws.
    NotEnoughData,
    /// Five draws but no usable digits.
    Unavailable,
    Digits(BTreeSet<char>),
}

/// First digit of the three most recent results plus last digit of the
/// next two.
#[must_use]
pub fn cross_pattern(draws: &[Draw]) -> CrossPattern {
    if draws.len() < 5 {
        return CrossPattern::NotEnoughData;
    }

    let firsts = draws[..3].iter().filter_map(|d| d.result.chars().next());
    let lasts = draws[3..5].iter().filter_map(|d| d.result.chars().last());
    let digits: BTreeSet<char> = firsts.chain(lasts).collect();

    if digits.is_empty() {
        CrossPattern::Unavailable
    } else {
        CrossPattern::Digits(digits)
    }
}

/// Builds `count` combinations of up to four distinct digits from the union
/// of the top digits, the hot digits and the date digits.
pub fn recommendations<R: Rng + ?Sized>(
    top: &[char],
    hot: &BTreeSet<char>,
    date_based: &BTreeSet<char>,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let pool: Vec<char> = top
        .iter()
        .chain(hot)
        .chain(date_based)
        .copied()
        .collect::<BTreeSet<char>>()
        .into_iter()
        .collect();

    if pool.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|_| pool.choose_multiple(rng, 4).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::analysis::tests::draws;

    #[test]
    fn test_date_digits() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 21).unwrap();
        assert_eq!(date_digits(date), BTreeSet::from(['1', '2']));

        let same = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
        assert_eq!(date_digits(same), BTreeSet::from(['1']));
    }

    #[test]
    fn test_weighted_sample_draws_only_seen_digits() {
        let freq = DigitFrequency::from_draws(&draws(&["1112", "1113"]));
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let sample = weighted_sample(&freq, 3, &mut rng);
            assert_eq!(sample.len(), 3);
            assert!(sample.iter().all(|d| ['1', '2', '3'].contains(d)));
        }
    }

    #[test]
    fn test_weighted_sample_small_pool() {
        let freq = DigitFrequency::from_draws(&draws(&["7"]));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(weighted_sample(&freq, 3, &mut rng), vec!['7']);
        assert!(weighted_sample(&DigitFrequency::default(), 3, &mut rng).is_empty());
    }

    #[test]
    fn test_cross_pattern() {
        let recent = draws(&["1234", "5678", "9012", "3456", "7890", "1111"]);
        assert_eq!(
            cross_pattern(&recent),
            CrossPattern::Digits(BTreeSet::from(['0', '1', '5', '6', '9']))
        );
    }

    #[test]
    fn test_cross_pattern_needs_five() {
        let recent = draws(&["1234", "5678"]);
        assert_eq!(cross_pattern(&recent), CrossPattern::NotEnoughData);
    }

    #[test]
    fn test_cross_pattern_blank_results() {
        let recent = draws(&["", "", "", "", ""]);
        assert_eq!(cross_pattern(&recent), CrossPattern::Unavailable);
    }

    #[test]
    fn test_recommendations_shape() {
        let hot: BTreeSet<char> = BTreeSet::from(['1', '2']);
        let date_based: BTreeSet<char> = BTreeSet::from(['3']);
        let mut rng = StdRng::seed_from_u64(3);

        let recs = recommendations(&['4', '1'], &hot, &date_based, 3, &mut rng);
        assert_eq!(recs.len(), 3);
        for rec in &recs {
            assert_eq!(rec.chars().count(), 4);
            let distinct: BTreeSet<char> = rec.chars().collect();
            assert_eq!(distinct.len(), 4);
            assert!(rec.chars().all(|c| ['1', '2', '3', '4'].contains(&c)));
        }
    }

    #[test]
    fn test_recommendations_small_pool() {
        let hot: BTreeSet<char> = BTreeSet::from(['5']);
        let mut rng = StdRng::seed_from_u64(3);
        let recs = recommendations(&[], &hot, &BTreeSet::new(), 3, &mut rng);
        assert_eq!(recs, vec!["5", "5", "5"]);
    }

    #[test]
    fn test_recommendations_empty_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(recommendations(&[], &BTreeSet::new(), &BTreeSet::new(), 3, &mut rng).is_empty());
    }
}

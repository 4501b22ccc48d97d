//! Digit frequency and hot/cold digit sets.

use std::collections::BTreeSet;

use super::Draw;

/// Digit counts in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitFrequency {
    counts: Vec<(char, usize)>,
}

impl DigitFrequency {
    /// Counts the ASCII digits of every result.
    #[must_use]
    pub fn from_draws(draws: &[Draw]) -> Self {
        let mut freq = Self::default();
        for digit in draws.iter().flat_map(|d| d.digits()) {
            match freq.counts.iter_mut().find(|(c, _)| *c == digit) {
                Some((_, count)) => *count += 1,
                None => freq.counts.push((digit, 1)),
            }
        }
        freq
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// How often `digit` was seen.
    #[must_use]
    pub fn count(&self, digit: char) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == digit)
            .map_or(0, |(_, n)| *n)
    }

    /// Every digit by descending count; ties keep first-appearance order.
    #[must_use]
    pub fn ranking(&self) -> Vec<(char, usize)> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `n` most frequent digits.
    #[must_use]
    pub fn most_common(&self, n: usize) -> Vec<(char, usize)> {
        self.ranking().into_iter().take(n).collect()
    }

    /// The `n` least frequent digits, rarest first.
    #[must_use]
    pub fn least_common(&self, n: usize) -> Vec<(char, usize)> {
        self.ranking().into_iter().rev().take(n).collect()
    }

    /// Each digit repeated by its count, for weighted sampling.
    #[must_use]
    pub fn weighted_pool(&self) -> Vec<char> {
        self.counts
            .iter()
            .flat_map(|&(digit, count)| std::iter::repeat_n(digit, count))
            .collect()
    }
}

/// Digits seen in the `window` most recent draws.
#[must_use]
pub fn hot_digits(draws: &[Draw], window: usize) -> BTreeSet<char> {
    draws.iter().take(window).flat_map(Draw::digits).collect()
}

/// Digits not seen in the `window` most recent draws.
#[must_use]
pub fn cold_digits(draws: &[Draw], window: usize) -> BTreeSet<char> {
    let recent = hot_digits(draws, window);
    ('0'..='9').filter(|d| !recent.contains(d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tests::draws;

    #[test]
    fn test_frequency_counts() {
        let freq = DigitFrequency::from_draws(&draws(&["1123", "1456"]));
        assert_eq!(freq.count('1'), 3);
        assert_eq!(freq.count('2'), 1);
        assert_eq!(freq.count('9'), 0);
        assert_eq!(freq.most_common(1), vec![('1', 3)]);
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let freq = DigitFrequency::from_draws(&draws(&["5731"]));
        assert_eq!(
            freq.most_common(4),
            vec![('5', 1), ('7', 1), ('3', 1), ('1', 1)]
        );
        assert_eq!(freq.least_common(2), vec![('1', 1), ('3', 1)]);
    }

    #[test]
    fn test_weighted_pool() {
        let freq = DigitFrequency::from_draws(&draws(&["1121"]));
        assert_eq!(freq.weighted_pool(), vec!['1', '1', '1', '2']);
    }

    #[test]
    fn test_non_digits_ignored() {
        let freq = DigitFrequency::from_draws(&draws(&["12ab", ""]));
        assert_eq!(freq.ranking().len(), 2);
    }

    #[test]
    fn test_hot_digits_window() {
        let recent = draws(&["1234", "1111", "5555", "6666", "7777", "8888"]);
        let hot = hot_digits(&recent, 5);
        assert_eq!(hot, BTreeSet::from(['1', '2', '3', '4', '5', '6', '7']));
    }

    #[test]
    fn test_cold_digits_window() {
        let recent = draws(&[
            "0123", "4567", "0000", "0000", "0000", "0000", "0000", "0000", "0000", "0000", "8899",
        ]);
        let cold = cold_digits(&recent, 10);
        assert_eq!(cold, BTreeSet::from(['8', '9']));
    }

    #[test]
    fn test_cold_digits_without_data() {
        assert_eq!(cold_digits(&[], 10).len(), 10);
    }
}

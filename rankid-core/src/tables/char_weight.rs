//! Per-language character weight table

use crate::counts::normalize_score_dict;
use std::collections::{BTreeMap, HashMap};

/// L1-normalized relative frequency of each character in one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharWeightTable {
    weights: BTreeMap<char, f64>,
}

impl CharWeightTable {
    /// Normalize raw character counts.
    ///
    /// When every count is zero the weights are uniform.
    pub fn from_counts(counts: &HashMap<char, u64>) -> Self {
        let raw: BTreeMap<char, f64> = counts.iter().map(|(ch, n)| (*ch, *n as f64)).collect();
        Self {
            weights: normalize_score_dict(&raw),
        }
    }

    /// Use weights as given, without normalizing
    pub fn from_weights(weights: BTreeMap<char, f64>) -> Self {
        Self { weights }
    }

    /// Weight of `ch`, if present
    pub fn weight(&self, ch: char) -> Option<f64> {
        self.weights.get(&ch).copied()
    }

    /// Iterate over `(char, weight)` pairs in character order
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.weights.iter().map(|(ch, w)| (*ch, *w))
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True if no characters were counted
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_counts_normalizes() {
        let counts: HashMap<char, u64> = [('a', 3), ('b', 1)].into_iter().collect();
        let table = CharWeightTable::from_counts(&counts);
        assert_eq!(table.weight('a'), Some(0.75));
        assert_eq!(table.weight('b'), Some(0.25));
        assert_eq!(table.weight('c'), None);
        let total: f64 = table.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_counts_are_uniform() {
        let counts: HashMap<char, u64> = [('x', 0), ('y', 0), ('z', 0), ('w', 0)]
            .into_iter()
            .collect();
        let table = CharWeightTable::from_counts(&counts);
        assert!(table.iter().all(|(_, w)| w == 0.25));
    }
}

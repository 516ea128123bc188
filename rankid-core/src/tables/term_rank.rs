//! Per-language term rank table

use std::collections::HashMap;

/// Maps a lowercased term to its 1-based frequency rank in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermRankTable {
    ranks: HashMap<String, u32>,
}

impl TermRankTable {
    /// Build from terms in rank order, reading at most `max_terms` entries.
    ///
    /// Rank is the 1-based position in the input. A repeated term keeps its
    /// first (best) rank but still consumes a position, and empty terms take
    /// a position without being stored.
    pub fn from_ranked_terms<I, S>(terms: I, max_terms: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranks = HashMap::new();
        for (index, term) in terms.into_iter().take(max_terms).enumerate() {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            ranks.entry(term.to_string()).or_insert(index as u32 + 1);
        }
        Self { ranks }
    }

    /// Rank of `term`, if it is in the table
    #[inline]
    pub fn rank(&self, term: &str) -> Option<u32> {
        self.ranks.get(term).copied()
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// True if the table has no terms
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Terms sorted by rank, best first
    pub fn ranked_terms(&self) -> Vec<&str> {
        let mut terms: Vec<(&str, u32)> = self
            .ranks
            .iter()
            .map(|(term, rank)| (term.as_str(), *rank))
            .collect();
        terms.sort_by_key(|(_, rank)| *rank);
        terms.into_iter().map(|(term, _)| term).collect()
    }
}

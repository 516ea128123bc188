//! Character → language inverted index
//!
//! Character scoring needs, for each character of the input, every language
//! that uses it. Inverting the per-language tables once at load time turns
//! that into a single lookup per distinct character.

use super::char_weight::CharWeightTable;
use crate::counts::normalize_score_dict;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// For each character, the languages using it with weights summing to one,
/// strongest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharInvertedIndex {
    entries: HashMap<char, Vec<(String, f64)>>,
}

impl CharInvertedIndex {
    /// Invert `language → char → weight` tables.
    ///
    /// Weights for a character are L1-normalized across the languages that
    /// contain it and sorted descending. Equal weights keep the language
    /// iteration order of `tables`.
    pub fn from_char_tables(tables: &BTreeMap<String, CharWeightTable>) -> Self {
        let mut by_char: HashMap<char, Vec<(String, f64)>> = HashMap::new();
        for (lang, table) in tables {
            for (ch, weight) in table.iter() {
                by_char.entry(ch).or_default().push((lang.clone(), weight));
            }
        }

        let entries = by_char
            .into_iter()
            .map(|(ch, langs)| {
                let raw: BTreeMap<&str, f64> = langs.iter().map(|(l, w)| (l.as_str(), *w)).collect();
                let normalized = normalize_score_dict(&raw);
                let mut list: Vec<(String, f64)> = langs
                    .iter()
                    .map(|(lang, _)| (lang.clone(), normalized[lang.as_str()]))
                    .collect();
                list.sort_by(|a, b| b.1.total_cmp(&a.1));
                (ch, list)
            })
            .collect();

        Self { entries }
    }

    /// Ranked `(language, weight)` list for `ch`
    #[inline]
    pub fn get(&self, ch: char) -> Option<&[(String, f64)]> {
        self.entries.get(&ch).map(Vec::as_slice)
    }

    /// True if `ch` appears in any language
    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    /// Number of indexed characters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every language mentioned anywhere in the index
    pub fn languages(&self) -> BTreeSet<&str> {
        self.entries
            .values()
            .flat_map(|list| list.iter().map(|(lang, _)| lang.as_str()))
            .collect()
    }

    /// Drop languages not accepted by `keep`.
    ///
    /// Remaining weights are left as they were, matching how a restricted
    /// table set behaves when it is filtered after inversion. Characters with
    /// no remaining language are removed.
    pub fn retain_languages<F>(&self, keep: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let entries = self
            .entries
            .iter()
            .filter_map(|(ch, list)| {
                let kept: Vec<(String, f64)> =
                    list.iter().filter(|(lang, _)| keep(lang)).cloned().collect();
                (!kept.is_empty()).then_some((*ch, kept))
            })
            .collect();
        Self { entries }
    }
}

//! Scoring engine
//!
//! Two kinds of evidence are combined:
//!
//! - **Character scores** come from the inverted char index. Every language
//!   gets `weight * count` for each alphabetic character of the text.
//! - **Term scores** reward languages whose vocabulary contains the tokens,
//!   favouring frequent terms through `1 / sqrt(damping + rank)`.
//!
//! Character scores decide which languages are worth term-scoring at all;
//! the product of both normalized scores ranks the survivors. Inputs with
//! no usable evidence produce an empty ranking, never a guess.
//!
//! All functions here are pure over immutable tables. Evidence is summed
//! in character, token and language order, so identical calls return
//! bit-identical scores.

use crate::config::ClassifierConfig;
use crate::counts::normalize_score_dict;
use crate::tables::{CharInvertedIndex, TermRankTables};
use crate::tokenizer::tokenize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Per-language scores for a single call, ordered by language code
pub type ScoreMap<'a> = BTreeMap<&'a str, f64>;

/// Languages with scores, best first
pub type RankedScores<'a> = Vec<(&'a str, f64)>;

/// Character evidence for each language.
///
/// Only alphabetic characters known to the index are counted. The text is
/// used as given; callers lower-case it when configured to.
pub fn score_chars<'a>(index: &'a CharInvertedIndex, text: &str) -> ScoreMap<'a> {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for ch in text.chars().filter(|ch| ch.is_alphabetic() && index.contains(*ch)) {
        *counts.entry(ch).or_insert(0) += 1;
    }

    let mut scores = ScoreMap::new();
    for (ch, count) in counts {
        let Some(langs) = index.get(ch) else {
            continue;
        };
        for (lang, weight) in langs {
            *scores.entry(lang.as_str()).or_insert(0.0) += weight * count as f64;
        }
    }
    scores
}

/// Term evidence for each candidate language.
///
/// Every candidate starts at the baseline term score. Single ASCII lowercase
/// letters are not counted. An empty `languages` slice scores every language
/// that has a term table.
pub fn score_terms<'a>(
    term_ranks: &'a TermRankTables,
    text: &str,
    languages: &[&'a str],
    config: &ClassifierConfig,
) -> ScoreMap<'a> {
    let mut tokens: BTreeMap<String, usize> = BTreeMap::new();
    for token in tokenize(text) {
        if is_single_letter(&token) {
            continue;
        }
        *tokens.entry(token).or_insert(0) += 1;
    }

    let all_languages: Vec<&'a str>;
    let languages = if languages.is_empty() {
        all_languages = term_ranks.keys().map(String::as_str).collect();
        all_languages.as_slice()
    } else {
        languages
    };

    let baseline = config.baseline_term_score();
    languages
        .iter()
        .map(|&lang| {
            let mut score = baseline;
            if let Some(ranks) = term_ranks.get(lang) {
                for (token, count) in &tokens {
                    if let Some(rank) = ranks.rank(token) {
                        let rank_score = 1.0 / (config.top_rank_damping + rank as f64).sqrt();
                        score += (config.term_presence_weight + rank_score) * *count as f64;
                    }
                }
            }
            (lang, score)
        })
        .collect()
}

fn is_single_letter(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(ch), None) if ch.is_ascii_lowercase())
}

/// Combined ranking of languages for `text`, best first.
///
/// Returns an empty ranking when the text is computerese, has no character
/// evidence, or its character contenders have no lexical support. When a
/// single language passes the character gate it is returned alone with its
/// normalized character score, without consulting term tables.
pub fn score_text<'a>(
    term_ranks: &'a TermRankTables,
    index: &'a CharInvertedIndex,
    config: &ClassifierConfig,
    text: &str,
) -> RankedScores<'a> {
    if config.is_computerese(text) {
        tracing::trace!("Skipping computerese text");
        return Vec::new();
    }

    let char_scores = score_chars(index, &lowercase_if(text, config.lowercase_chars));
    let char_max = char_scores.values().copied().fold(0.0, f64::max);
    if char_max <= 0.0 {
        tracing::trace!("No character evidence");
        return Vec::new();
    }

    let survivors: ScoreMap<'a> = char_scores
        .into_iter()
        .filter(|(_, score)| *score > char_max * config.char_min_to_play)
        .collect();
    if survivors.is_empty() {
        return Vec::new();
    }
    let survivors = normalize_score_dict(&survivors);
    if survivors.len() == 1 {
        return survivors.into_iter().collect();
    }

    let mut candidates: Vec<&'a str> = survivors.keys().copied().collect();
    candidates.sort_unstable();
    let term_scores = score_terms(
        term_ranks,
        &lowercase_if(text, config.lowercase_words),
        &candidates,
        config,
    );

    let baseline = config.baseline_term_score();
    let term_max = term_scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
    if term_max < baseline + config.term_presence_weight {
        tracing::trace!(
            "Rejecting {} character contenders without term matches",
            candidates.len()
        );
        return Vec::new();
    }
    let term_scores = normalize_score_dict(&term_scores);

    let mut combined: RankedScores<'a> = survivors
        .iter()
        .map(|(&lang, &char_score)| {
            let term_score = term_scores.get(lang).copied().unwrap_or(baseline);
            (lang, term_score * char_score)
        })
        .collect();
    sort_descending(&mut combined);
    combined
}

fn lowercase_if(text: &str, lowercase: bool) -> Cow<'_, str> {
    if lowercase {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    }
}

/// Sort by score, highest first.
///
/// Exact ties are ordered by language code so repeated calls agree; callers
/// should not rely on which tied language comes first.
pub fn sort_descending(scores: &mut RankedScores<'_>) {
    scores.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
}

/// Top language of a ranking, if its score is positive
pub fn winner<'a>(ranked: &[(&'a str, f64)]) -> Option<&'a str> {
    match ranked.first() {
        Some(&(lang, score)) if score > 0.0 => Some(lang),
        _ => None,
    }
}

/// Top language and its score; `(None, 0.0)` for an empty ranking
pub fn winner_score<'a>(ranked: &[(&'a str, f64)]) -> (Option<&'a str>, f64) {
    match ranked.first() {
        Some(&(lang, score)) => ((score > 0.0).then_some(lang), score),
        None => (None, 0.0),
    }
}

/// Top language and how far it leads the runner-up.
///
/// A lone candidate is returned with its full score as the margin, treating
/// an uncontested survivor as maximally unambiguous.
pub fn winner_margin<'a>(ranked: &[(&'a str, f64)]) -> (Option<&'a str>, f64) {
    match ranked {
        [] => (None, 0.0),
        [(lang, score)] => (Some(*lang), *score),
        [(lang, top), (_, second), ..] => ((*top > 0.0).then_some(*lang), top - second),
    }
}

/// Language with the highest raw character score, ignoring the contender
/// gate and term evidence.
pub fn char_winner<'a>(
    index: &'a CharInvertedIndex,
    config: &ClassifierConfig,
    text: &str,
) -> Option<&'a str> {
    let mut scores: RankedScores<'a> = score_chars(index, &lowercase_if(text, config.lowercase_chars))
        .into_iter()
        .collect();
    sort_descending(&mut scores);
    winner(&scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{CharWeightTable, TermRankTable};
    use std::collections::BTreeMap;

    fn term_ranks() -> TermRankTables {
        [
            ("en", vec!["the", "is", "this", "no", "a"]),
            ("es", vec!["de", "la", "no", "es", "esto"]),
            ("it", vec!["di", "no", "il", "la"]),
        ]
        .into_iter()
        .map(|(lang, terms)| (lang.to_string(), TermRankTable::from_ranked_terms(terms, 100)))
        .collect()
    }

    fn char_index() -> CharInvertedIndex {
        let tables: BTreeMap<String, CharWeightTable> = [
            ("en", vec![('t', 3), ('h', 2), ('i', 2), ('s', 2), ('e', 3), ('n', 1), ('o', 1), ('a', 1)]),
            ("es", vec![('d', 2), ('e', 3), ('s', 2), ('t', 1), ('o', 2), ('n', 1), ('ñ', 1), ('a', 2)]),
            ("it", vec![('d', 1), ('i', 3), ('l', 2), ('n', 1), ('o', 2), ('a', 2)]),
            ("ko", vec![('안', 1), ('녕', 1)]),
        ]
        .into_iter()
        .map(|(lang, counts)| {
            let counts = counts.into_iter().collect();
            (lang.to_string(), CharWeightTable::from_counts(&counts))
        })
        .collect();
        CharInvertedIndex::from_char_tables(&tables)
    }

    #[test]
    fn test_score_chars_counts_alphabetic_only() {
        let index = char_index();
        let scores = score_chars(&index, "안 123 안!");
        assert_eq!(scores.len(), 1);
        assert!((scores["ko"] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_chars_unknown_characters() {
        let index = char_index();
        assert!(score_chars(&index, "xyz 書").is_empty());
    }

    #[test]
    fn test_score_terms_formula() {
        let ranks = term_ranks();
        let config = ClassifierConfig::default();
        let scores = score_terms(&ranks, "this is this", &["en", "es"], &config);

        let expected_en = config.baseline_term_score()
            + (0.05 + 1.0 / (10.0f64 + 3.0).sqrt()) * 2.0
            + (0.05 + 1.0 / (10.0f64 + 2.0).sqrt());
        assert!((scores["en"] - expected_en).abs() < 1e-12);
        assert_eq!(scores["es"], config.baseline_term_score());
        assert!(!scores.contains_key("it"));
    }

    #[test]
    fn test_score_terms_ignores_single_letters() {
        let ranks = term_ranks();
        let config = ClassifierConfig::default();
        let scores = score_terms(&ranks, "a a a", &["en"], &config);
        assert_eq!(scores["en"], config.baseline_term_score());
    }

    #[test]
    fn test_score_terms_all_languages_when_unrestricted() {
        let ranks = term_ranks();
        let scores = score_terms(&ranks, "no", &[], &ClassifierConfig::default());
        assert_eq!(scores.len(), 3);
    }

    #[test]
    fn test_score_terms_unknown_language_gets_baseline() {
        let ranks = term_ranks();
        let config = ClassifierConfig::default();
        let scores = score_terms(&ranks, "esto es", &["ko"], &config);
        assert_eq!(scores["ko"], config.baseline_term_score());
    }

    #[test]
    fn test_score_text_single_survivor_early_out() {
        let (ranks, index) = (term_ranks(), char_index());
        let scores = score_text(&ranks, &index, &ClassifierConfig::default(), "안녕");
        assert_eq!(scores, vec![("ko", 1.0)]);
    }

    #[test]
    fn test_score_text_computerese() {
        let (ranks, index) = (term_ranks(), char_index());
        let config = ClassifierConfig::default();
        assert!(score_text(&ranks, &index, &config, "http this is the").is_empty());
        assert!(score_text(&ranks, &index, &config, "displayText this is").is_empty());
    }

    #[test]
    fn test_score_text_requires_term_evidence() {
        let (ranks, index) = (term_ranks(), char_index());
        let scores = score_text(&ranks, &index, &ClassifierConfig::default(), "tost sodo");
        assert!(scores.is_empty());
    }

    #[test]
    fn test_score_text_no_characters() {
        let (ranks, index) = (term_ranks(), char_index());
        assert!(score_text(&ranks, &index, &ClassifierConfig::default(), "123 ?!").is_empty());
        assert!(score_text(&ranks, &index, &ClassifierConfig::default(), "").is_empty());
    }

    #[test]
    fn test_score_text_ranks_by_combined_evidence() {
        let (ranks, index) = (term_ranks(), char_index());
        let scores = score_text(&ranks, &index, &ClassifierConfig::default(), "This is the thing");
        assert_eq!(scores[0].0, "en");
        assert!(scores.windows(2).all(|w| w[0].1 >= w[1].1));
        assert!(scores.iter().all(|(lang, _)| *lang != "ko"));
    }

    #[test]
    fn test_score_text_is_bit_identical_across_instances() {
        let config = ClassifierConfig::default();
        let text = "Esto es, no is this la thing di il";
        let (ranks, index) = (term_ranks(), char_index());
        let expected: Vec<(&str, u64)> = score_text(&ranks, &index, &config, text)
            .into_iter()
            .map(|(lang, score)| (lang, score.to_bits()))
            .collect();
        assert!(expected.len() > 1);

        for _ in 0..50 {
            let (ranks, index) = (term_ranks(), char_index());
            let scores: Vec<(&str, u64)> = score_text(&ranks, &index, &config, text)
                .into_iter()
                .map(|(lang, score)| (lang, score.to_bits()))
                .collect();
            assert_eq!(scores, expected);
        }
    }

    #[test]
    fn test_gate_of_one_rejects_everything() {
        let (ranks, index) = (term_ranks(), char_index());
        let config = ClassifierConfig {
            char_min_to_play: 1.0,
            ..ClassifierConfig::default()
        };
        assert!(score_text(&ranks, &index, &config, "this is").is_empty());
    }

    #[test]
    fn test_case_sensitive_chars() {
        let (ranks, index) = (term_ranks(), char_index());
        let config = ClassifierConfig {
            lowercase_chars: false,
            ..ClassifierConfig::default()
        };
        assert!(score_text(&ranks, &index, &config, "THIS").is_empty());
        assert!(!score_text(&ranks, &index, &ClassifierConfig::default(), "THIS IS").is_empty());
    }

    #[test]
    fn test_winner_helpers() {
        let ranked = vec![("it", 0.5), ("es", 0.3), ("en", 0.2)];
        assert_eq!(winner(&ranked), Some("it"));
        assert_eq!(winner_score(&ranked), (Some("it"), 0.5));
        let (lang, margin) = winner_margin(&ranked);
        assert_eq!(lang, Some("it"));
        assert!((margin - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_winner_helpers_empty_and_single() {
        let empty: Vec<(&str, f64)> = Vec::new();
        assert_eq!(winner(&empty), None);
        assert_eq!(winner_score(&empty), (None, 0.0));
        assert_eq!(winner_margin(&empty), (None, 0.0));

        let single = vec![("ko", 0.8)];
        assert_eq!(winner_margin(&single), (Some("ko"), 0.8));
    }

    #[test]
    fn test_zero_top_score_has_no_winner() {
        let ranked = vec![("en", 0.0), ("es", 0.0)];
        assert_eq!(winner(&ranked), None);
        assert_eq!(winner_score(&ranked), (None, 0.0));
        assert_eq!(winner_margin(&ranked), (None, 0.0));
    }

    #[test]
    fn test_char_winner() {
        let index = char_index();
        let config = ClassifierConfig::default();
        assert_eq!(char_winner(&index, &config, "안녕 안녕 is"), Some("ko"));
        assert_eq!(char_winner(&index, &config, "ñ"), Some("es"));
        assert_eq!(char_winner(&index, &config, "42"), None);
    }
}

//! Loading a complete table set from a data directory

use super::format::{open, read_char_counts, read_rank_lines};
use super::{CharWeightTable, TermRankTable};
use crate::error::{LoadError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Suffix of the term rank file for a language code
pub const TERM_RANK_SUFFIX: &str = "_term_rank.csv";

/// Suffix of the character frequency file for a language code
pub const CHAR_FREQ_SUFFIX: &str = "_char_freq.csv";

/// Term rank and char weight tables for every language in a directory
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    /// Language code → term ranks
    pub term_ranks: BTreeMap<String, TermRankTable>,
    /// Language code → character weights
    pub char_tables: BTreeMap<String, CharWeightTable>,
}

impl TableSet {
    /// Language codes present in the set
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.term_ranks.keys().map(String::as_str)
    }
}

/// Path of the term rank file for `lang` inside `dir`
pub fn term_rank_path(dir: &Path, lang: &str) -> PathBuf {
    dir.join(format!("{lang}{TERM_RANK_SUFFIX}"))
}

/// Path of the char frequency file for `lang` inside `dir`
pub fn char_freq_path(dir: &Path, lang: &str) -> PathBuf {
    dir.join(format!("{lang}{CHAR_FREQ_SUFFIX}"))
}

/// Language codes with data in `dir`.
///
/// Every visible `*.csv` file contributes the first two characters of its
/// name as a code.
pub fn discover_languages(dir: &Path) -> Result<BTreeSet<String>> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut languages = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with('.') || !name.ends_with(".csv") {
            continue;
        }
        let code: String = name.chars().take(2).collect();
        if code.chars().count() == 2 {
            languages.insert(code);
        }
    }
    Ok(languages)
}

/// Load every language's tables from `dir`.
///
/// Both files must exist for each discovered code; any missing file or
/// malformed row aborts the whole load.
pub fn load_tables(dir: &Path, max_words_per_lang: usize) -> Result<TableSet> {
    let languages = discover_languages(dir)?;
    if languages.is_empty() {
        return Err(LoadError::NoLanguages {
            path: dir.to_path_buf(),
        });
    }

    let mut tables = TableSet::default();
    for lang in languages {
        let term_ranks = load_term_ranks(dir, &lang, max_words_per_lang)?;
        let char_table = load_char_weights(dir, &lang)?;
        tracing::debug!(
            "Loaded '{}': {} terms, {} characters",
            lang,
            term_ranks.len(),
            char_table.len()
        );
        tables.term_ranks.insert(lang.clone(), term_ranks);
        tables.char_tables.insert(lang, char_table);
    }

    tracing::debug!(
        "Prepared term and character tables for languages: {:?}",
        tables.languages().collect::<Vec<_>>()
    );
    Ok(tables)
}

/// Load the term rank table for one language
pub fn load_term_ranks(dir: &Path, lang: &str, max_words: usize) -> Result<TermRankTable> {
    let path = existing_file(term_rank_path(dir, lang), lang)?;
    let lines = read_rank_lines(open(&path)?, max_words, &path)?;
    Ok(TermRankTable::from_ranked_terms(lines, max_words))
}

/// Load and normalize the char weight table for one language
pub fn load_char_weights(dir: &Path, lang: &str) -> Result<CharWeightTable> {
    let path = existing_file(char_freq_path(dir, lang), lang)?;
    let counts = read_char_counts(open(&path)?, &path)?;
    Ok(CharWeightTable::from_counts(&counts))
}

fn existing_file(path: PathBuf, lang: &str) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(LoadError::MissingFile {
            lang: lang.to_string(),
            path,
        })
    }
}

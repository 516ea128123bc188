//! Classifier facade
//!
//! [`LanguageClassifier`] owns an immutable table set and exposes the query
//! operations of the scoring engine as methods. It is `Send + Sync`; build it
//! once and share it by reference or `Arc`.

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::scoring::{self, RankedScores};
use crate::tables::{load_tables, CharInvertedIndex, CharTables, TableSet, TermRankTables};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data root
pub const DATA_DIR_ENV: &str = "RANKID_DATA_DIR";

/// Anything that can name the language of a text.
///
/// Evaluation harnesses depend on this trait only, so this classifier and
/// external backends are interchangeable.
pub trait LanguageIdentifier {
    /// Language code of `text`, or `None` when there is no confident answer
    fn classify(&self, text: &str) -> Option<String>;
}

/// Pre-built table sets selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corpus {
    /// Wikipedia-trained tables with hand overrides (the default)
    Wikipedia,
    /// Tables trained on parallel Bible translations; many languages
    Bible,
    /// Tables trained on small Wikipedia samples
    SmallWiki,
}

impl Corpus {
    /// Subdirectory name under the data root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Corpus::Wikipedia => "wikipedia",
            Corpus::Bible => "bible",
            Corpus::SmallWiki => "small_wiki",
        }
    }

    /// Directory holding this corpus's tables
    pub fn data_dir(&self) -> PathBuf {
        data_root().join(self.dir_name())
    }
}

/// Root directory for named corpora.
///
/// `RANKID_DATA_DIR` when set, otherwise the sample tables shipped with
/// this crate.
pub fn data_root() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("freq_data"))
}

/// Reciprocal-rank language classifier over an immutable table set
#[derive(Debug, Clone)]
pub struct LanguageClassifier {
    term_ranks: TermRankTables,
    char_index: CharInvertedIndex,
    config: ClassifierConfig,
}

impl LanguageClassifier {
    /// Create from in-memory tables with the default configuration
    pub fn new(term_ranks: TermRankTables, char_index: CharInvertedIndex) -> Self {
        Self {
            term_ranks,
            char_index,
            config: ClassifierConfig::default(),
        }
    }

    /// Create from per-language char weight tables, inverting them
    pub fn from_char_tables(term_ranks: TermRankTables, char_tables: &CharTables) -> Self {
        Self::new(term_ranks, CharInvertedIndex::from_char_tables(char_tables))
    }

    /// Create from a loaded table set
    pub fn from_table_set(tables: TableSet) -> Self {
        Self::from_char_tables(tables.term_ranks, &tables.char_tables)
    }

    /// Load every language in `dir` with the default configuration
    pub fn from_dir(dir: &Path) -> Result<Self> {
        Self::from_dir_with_config(dir, ClassifierConfig::default())
    }

    /// Load every language in `dir`, reading as many terms as `config` allows
    pub fn from_dir_with_config(dir: &Path, config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let tables = load_tables(dir, config.max_words_per_lang)?;
        let classifier = Self::from_table_set(tables).with_config(config);
        tracing::info!(
            "Loaded classifier with term ranks and character frequencies for these languages: {}",
            classifier.languages().join(", ")
        );
        Ok(classifier)
    }

    /// Load a named corpus from the data root
    pub fn from_corpus(corpus: Corpus) -> Result<Self> {
        Self::from_dir(&corpus.data_dir())
    }

    /// The default Wikipedia-trained instance
    pub fn default_instance() -> Result<Self> {
        Self::from_corpus(Corpus::Wikipedia)
    }

    /// Instance trained on Bible translations
    pub fn bible_instance() -> Result<Self> {
        Self::from_corpus(Corpus::Bible)
    }

    /// Instance trained on small Wikipedia samples
    pub fn small_wiki_instance() -> Result<Self> {
        Self::from_corpus(Corpus::SmallWiki)
    }

    /// Replace the scoring configuration.
    ///
    /// `max_words_per_lang` only matters at load time and has no effect here.
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Keep only `languages`, dropping everything else from both tables
    pub fn restrict_to<S: AsRef<str>>(&self, languages: &[S]) -> Self {
        let keep: BTreeSet<&str> = languages.iter().map(AsRef::as_ref).collect();
        Self {
            term_ranks: self
                .term_ranks
                .iter()
                .filter(|(lang, _)| keep.contains(lang.as_str()))
                .map(|(lang, table)| (lang.clone(), table.clone()))
                .collect(),
            char_index: self.char_index.retain_languages(|lang| keep.contains(lang)),
            config: self.config.clone(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Term rank tables
    pub fn term_ranks(&self) -> &TermRankTables {
        &self.term_ranks
    }

    /// Inverted character index
    pub fn char_index(&self) -> &CharInvertedIndex {
        &self.char_index
    }

    /// Sorted language codes known to either table
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: BTreeSet<&str> = self.term_ranks.keys().map(String::as_str).collect();
        langs.extend(self.char_index.languages());
        langs.into_iter().collect()
    }

    /// The language with the best score, if positive
    pub fn get_winner(&self, text: &str) -> Option<&str> {
        scoring::winner(&self.get_language_scores(text))
    }

    /// The winning language and its score; `(None, 0.0)` without candidates
    pub fn get_winner_score(&self, text: &str) -> (Option<&str>, f64) {
        scoring::winner_score(&self.get_language_scores(text))
    }

    /// The winning language and its lead over the runner-up.
    ///
    /// A single candidate reports its whole score as the margin.
    pub fn get_winner_margin(&self, text: &str) -> (Option<&str>, f64) {
        scoring::winner_margin(&self.get_language_scores(text))
    }

    /// Every surviving language with its combined score, best first
    pub fn get_language_scores(&self, text: &str) -> RankedScores<'_> {
        scoring::score_text(&self.term_ranks, &self.char_index, &self.config, text)
    }

    /// Best language by character evidence alone
    pub fn get_char_winner(&self, text: &str) -> Option<&str> {
        scoring::char_winner(&self.char_index, &self.config, text)
    }

    /// Classify many texts, in parallel when the `parallel` feature is on
    pub fn classify_batch<S>(&self, texts: &[S]) -> Vec<Option<&str>>
    where
        S: AsRef<str> + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            texts.par_iter().map(|text| self.get_winner(text.as_ref())).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            texts.iter().map(|text| self.get_winner(text.as_ref())).collect()
        }
    }
}

impl LanguageIdentifier for LanguageClassifier {
    fn classify(&self, text: &str) -> Option<String> {
        self.get_winner(text).map(str::to_string)
    }
}

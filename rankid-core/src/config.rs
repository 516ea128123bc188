//! Classifier tuning parameters
//!
//! Every weight and threshold the scoring engine uses lives here so that
//! alternative tunings can be loaded from TOML without recompiling.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Added to a language's term score for every matched token.
pub const TERM_PRESENCE_WEIGHT: f64 = 0.05;

/// Starting term score of every candidate language.
pub const BASELINE_TERM_SCORE: f64 = TERM_PRESENCE_WEIGHT / 2.0;

/// Additive rank damping so the single top-ranked term cannot dominate.
pub const TOP_RANK_DAMPING: f64 = 10.0;

/// Languages whose char score falls at or below this fraction of the best
/// char score are dropped before term scoring.
///
/// Tuned towards rejecting Chinese when a text has enough Japanese-only
/// characters; it may not generalize to other script pairs.
pub const CHAR_MIN_TO_PLAY: f64 = 0.6;

/// Maximum number of ranked terms read per language.
pub const MAX_WORDS_PER_LANG: usize = 10_000;

/// Text starting with any of these is never classified.
pub const COMPUTERESE_STARTS: &[&str] = &[
    "<!",
    "EndToEndSystemTest",
    "Metadata",
    "[public/comment]",
    "displayText",
    "http",
];

/// Scoring configuration shared by every call on a classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Weight added per matched term occurrence
    pub term_presence_weight: f64,

    /// Rank damping constant in `1 / sqrt(damping + rank)`
    pub top_rank_damping: f64,

    /// Char contender gate as a fraction of the best char score
    pub char_min_to_play: f64,

    /// Term-rank lines read per language
    pub max_words_per_lang: usize,

    /// Lower-case text before character scoring
    pub lowercase_chars: bool,

    /// Lower-case text before term scoring
    pub lowercase_words: bool,

    /// Literal prefixes marking non-linguistic text
    pub computerese_prefixes: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            term_presence_weight: TERM_PRESENCE_WEIGHT,
            top_rank_damping: TOP_RANK_DAMPING,
            char_min_to_play: CHAR_MIN_TO_PLAY,
            max_words_per_lang: MAX_WORDS_PER_LANG,
            lowercase_chars: true,
            lowercase_words: true,
            computerese_prefixes: COMPUTERESE_STARTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ClassifierConfig {
    /// Baseline term score: half the presence weight
    #[inline]
    pub fn baseline_term_score(&self) -> f64 {
        self.term_presence_weight / 2.0
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ClassifierConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check that every value is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.term_presence_weight.is_finite() && self.term_presence_weight > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "term_presence_weight",
                reason: format!("must be positive, got {}", self.term_presence_weight),
            });
        }
        if !(self.top_rank_damping.is_finite() && self.top_rank_damping >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "top_rank_damping",
                reason: format!("must be non-negative, got {}", self.top_rank_damping),
            });
        }
        if !(0.0..=1.0).contains(&self.char_min_to_play) {
            return Err(ConfigError::InvalidValue {
                field: "char_min_to_play",
                reason: format!("must be within [0, 1], got {}", self.char_min_to_play),
            });
        }
        if self.max_words_per_lang == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_words_per_lang",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// True if `text` starts with a configured non-linguistic prefix
    pub fn is_computerese(&self, text: &str) -> bool {
        self.computerese_prefixes
            .iter()
            .any(|prefix| text.starts_with(prefix.as_str()))
    }
}

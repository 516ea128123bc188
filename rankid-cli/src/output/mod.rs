//! Output formatting module

use anyhow::Result;
use rankid_core::LanguageClassifier;
use serde::{Deserialize, Serialize};

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single classification
    fn format_result(&mut self, result: &Classification) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One tab-separated line per input
    #[default]
    Text,
    /// JSON array of results
    Json,
}

/// A language and its combined score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageScore {
    /// Language code
    pub language: String,
    /// Combined score
    pub score: f64,
}

/// Classification result for one input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Where the text came from, e.g. `notes.txt:3` or `text:1`
    pub source: String,
    /// The classified text
    pub text: String,
    /// Winning language, if any
    pub language: Option<String>,
    /// Score of the winner
    pub score: f64,
    /// Lead of the winner over the runner-up
    pub margin: f64,
    /// Every surviving language, best first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<LanguageScore>,
}

impl Classification {
    /// Classify `text`, keeping the full ranking when `with_scores` is set
    pub fn new(classifier: &LanguageClassifier, source: String, text: String, with_scores: bool) -> Self {
        let ranked = classifier.get_language_scores(&text);
        let (language, score) = rankid_core::scoring::winner_score(&ranked);
        let (_, margin) = rankid_core::scoring::winner_margin(&ranked);
        let scores = if with_scores {
            ranked
                .iter()
                .map(|(language, score)| LanguageScore {
                    language: language.to_string(),
                    score: *score,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            source,
            language: language.map(str::to_string),
            text,
            score,
            margin,
            scores,
        }
    }
}

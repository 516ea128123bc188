//! Reciprocal-rank language identification for short, noisy text
//!
//! This crate names the language of chat messages, support transcripts and
//! similar fragments using only precomputed per-language statistics. A call
//! is a pure function over immutable tables and typically takes well under a
//! millisecond.
//!
//! # Architecture
//!
//! - **Tables**: per-language term ranks and character weights, loaded once
//!   from CSV files (or built in memory) and inverted into a char index
//! - **Scoring**: character evidence gates the candidates, term evidence
//!   ranks them, and inputs without enough evidence get no answer
//! - **Classifier**: an immutable facade bundling the tables with a
//!   [`ClassifierConfig`]
//!
//! # Example
//!
//! ```rust
//! use rankid_core::LanguageClassifier;
//!
//! let classifier = LanguageClassifier::default_instance().unwrap();
//!
//! assert_eq!(classifier.get_winner("This is English"), Some("en"));
//! assert_eq!(classifier.get_winner("123"), None);
//! ```

#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod counts;
pub mod error;
pub mod eval;
pub mod scoring;
pub mod tables;
pub mod tokenizer;

pub use classifier::{data_root, Corpus, LanguageClassifier, LanguageIdentifier, DATA_DIR_ENV};
pub use config::ClassifierConfig;
pub use error::{ConfigError, LoadError, Result};
pub use eval::{Evaluation, EvaluationReport};
pub use scoring::{RankedScores, ScoreMap};
pub use tables::{CharInvertedIndex, CharWeightTable, TableSet, TermRankTable};
pub use tokenizer::tokenize;

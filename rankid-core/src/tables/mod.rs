//! Frequency tables
//!
//! Tables are built once, from files or in memory, and never mutated.

pub mod char_weight;
pub mod format;
pub mod inverted;
pub mod loader;
pub mod term_rank;

pub use char_weight::CharWeightTable;
pub use format::{read_char_counts, read_rank_lines, write_freq_file, write_rank_file};
pub use inverted::CharInvertedIndex;
pub use loader::{discover_languages, load_tables, TableSet};
pub use term_rank::TermRankTable;

use std::collections::BTreeMap;

/// Term rank tables keyed by language code
pub type TermRankTables = BTreeMap<String, TermRankTable>;

/// Char weight tables keyed by language code
pub type CharTables = BTreeMap<String, CharWeightTable>;

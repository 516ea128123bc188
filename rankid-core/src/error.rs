//! Error types for table loading and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading frequency tables from disk.
///
/// All of these are fatal: a classifier is never built from a partial table set.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data directory does not exist or is not a directory
    #[error("data directory not found: {}", path.display())]
    MissingDirectory {
        /// Directory that was requested
        path: PathBuf,
    },

    /// A per-language file expected next to its sibling is absent
    #[error("missing frequency file for language '{lang}': {}", path.display())]
    MissingFile {
        /// Language code whose file is missing
        lang: String,
        /// Expected location of the file
        path: PathBuf,
    },

    /// I/O or encoding failure while reading a file
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A character-frequency row could not be parsed
    #[error("malformed row at {}:{line}: {reason}", path.display())]
    MalformedRow {
        /// File containing the row
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What was wrong with the row
        reason: String,
    },

    /// The directory contained no language tables at all
    #[error("no frequency tables found in {}", path.display())]
    NoLanguages {
        /// Directory that was scanned
        path: PathBuf,
    },

    /// Invalid classifier configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration loading or validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("failed to parse classifier config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file could not be read
    #[error("failed to read classifier config {}: {source}", path.display())]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A value is outside its permitted range
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Offending field name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type for loading operations
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_display() {
        let error = LoadError::MissingFile {
            lang: "en".to_string(),
            path: PathBuf::from("/data/en_char_freq.csv"),
        };
        assert_eq!(
            error.to_string(),
            "missing frequency file for language 'en': /data/en_char_freq.csv"
        );
    }

    #[test]
    fn test_malformed_row_display() {
        let error = LoadError::MalformedRow {
            path: PathBuf::from("xx_char_freq.csv"),
            line: 3,
            reason: "count 'abc' is not an integer".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "malformed row at xx_char_freq.csv:3: count 'abc' is not an integer"
        );
    }

    #[test]
    fn test_config_error_is_transparent() {
        let error: LoadError = ConfigError::InvalidValue {
            field: "char_min_to_play",
            reason: "must be within [0, 1]".to_string(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "invalid value for 'char_min_to_play': must be within [0, 1]"
        );
    }
}

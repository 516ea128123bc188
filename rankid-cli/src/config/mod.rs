//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use rankid_core::ClassifierConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Scoring configuration passed to the classifier
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when `--format` is not given
    pub default_format: OutputFormat,

    /// Include every language's score in the output
    pub include_scores: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            include_scores: false,
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or use defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config
            .classifier
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_sections() {
        let config = CliConfig::from_toml_str(
            r#"
[classifier]
char_min_to_play = 0.5
computerese_prefixes = ["<!", "[bot]"]

[output]
default_format = "json"
include_scores = true
"#,
        )
        .unwrap();
        assert_eq!(config.classifier.char_min_to_play, 0.5);
        assert_eq!(config.classifier.computerese_prefixes, vec!["<!", "[bot]"]);
        assert_eq!(config.classifier.term_presence_weight, 0.05);
        assert_eq!(config.output.default_format, OutputFormat::Json);
        assert!(config.output.include_scores);
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = CliConfig::from_toml_str("[classifier]\nchar_min_to_play = 2.0\n").unwrap_err();
        assert!(err.to_string().contains("char_min_to_play"));

        let err = CliConfig::from_toml_str("[output]\ndefault_format = \"xml\"\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\npretty_json = false").unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert!(!config.output.pretty_json);
        assert_eq!(CliConfig::load(None).unwrap(), CliConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::from_file(Path::new("/nonexistent/rankid.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

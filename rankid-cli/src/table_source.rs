//! Table source selection shared by every command

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use rankid_core::{Corpus, LanguageClassifier, DATA_DIR_ENV};
use std::path::PathBuf;

/// Named corpora selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CorpusArg {
    /// Wikipedia-trained tables (default)
    Wikipedia,
    /// Tables trained on Bible translations
    Bible,
    /// Tables trained on small Wikipedia samples
    SmallWiki,
}

impl From<CorpusArg> for Corpus {
    fn from(arg: CorpusArg) -> Self {
        match arg {
            CorpusArg::Wikipedia => Corpus::Wikipedia,
            CorpusArg::Bible => Corpus::Bible,
            CorpusArg::SmallWiki => Corpus::SmallWiki,
        }
    }
}

/// Where the frequency tables come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// A named corpus under the data root
    Corpus(Corpus),
    /// An explicit directory of table files
    Directory(PathBuf),
}

impl TableSource {
    /// Directory the tables are read from
    pub fn dir(&self) -> PathBuf {
        match self {
            TableSource::Corpus(corpus) => corpus.data_dir(),
            TableSource::Directory(path) => path.clone(),
        }
    }

    /// Get the display name for the table source
    pub fn display_name(&self) -> String {
        match self {
            TableSource::Corpus(corpus) => format!("Corpus: {} ({})", corpus.dir_name(), self.dir().display()),
            TableSource::Directory(path) => format!("Directory: {}", path.display()),
        }
    }
}

/// Arguments selecting and tuning the classifier
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Directory holding LANG_term_rank.csv and LANG_char_freq.csv tables
    #[arg(short = 'd', long, value_name = "DIR", conflicts_with = "corpus")]
    pub data_dir: Option<PathBuf>,

    /// Named corpus under the data root
    #[arg(long, value_enum, default_value = "wikipedia")]
    pub corpus: CorpusArg,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only consider these languages (comma separated)
    #[arg(short, long = "languages", value_name = "LANG", value_delimiter = ',')]
    pub languages: Vec<String>,
}

impl SourceArgs {
    /// Resolve the table source from the arguments
    pub fn table_source(&self) -> TableSource {
        match &self.data_dir {
            Some(dir) => TableSource::Directory(dir.clone()),
            None => TableSource::Corpus(self.corpus.into()),
        }
    }

    /// Load the configuration file, if any
    pub fn load_config(&self) -> Result<CliConfig> {
        CliConfig::load(self.config.as_deref())
    }

    /// Build the classifier described by these arguments
    pub fn load_classifier(&self, config: &CliConfig) -> Result<LanguageClassifier> {
        let source = self.table_source();
        log::info!("Loading tables from {}", source.display_name());

        let classifier = LanguageClassifier::from_dir_with_config(&source.dir(), config.classifier.clone())
            .with_context(|| {
                format!(
                    "Failed to load frequency tables ({}); set {} or pass --data-dir",
                    source.display_name(),
                    DATA_DIR_ENV
                )
            })?;

        if self.languages.is_empty() {
            return Ok(classifier);
        }

        let known = classifier.languages();
        for lang in &self.languages {
            if !known.contains(&lang.as_str()) {
                log::warn!("Language '{}' is not in the loaded tables", lang);
            }
        }
        Ok(classifier.restrict_to(&self.languages))
    }
}

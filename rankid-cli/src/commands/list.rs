//! List command implementation

use crate::table_source::SourceArgs;
use anyhow::Result;
use clap::Args;
use rankid_core::{data_root, Corpus, LanguageClassifier};
use std::io::{self, Write};

/// Arguments for `list languages`
#[derive(Debug, Args)]
pub struct ListLanguagesArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl ListLanguagesArgs {
    /// Print every language in the loaded tables with its table sizes
    pub fn execute(&self) -> Result<()> {
        super::init_logging(0, false);
        let config = self.source.load_config()?;
        let classifier = self.source.load_classifier(&config)?;

        let stdout = io::stdout();
        write_languages(&mut stdout.lock(), &classifier)
    }
}

/// Terms shown per language by `list languages`
const TOP_TERMS: usize = 5;

/// Write one `LANG<TAB>TERMS<TAB>CHARS<TAB>TOP` row per language
pub fn write_languages<W: Write>(writer: &mut W, classifier: &LanguageClassifier) -> Result<()> {
    let char_languages = classifier.char_index().languages();
    for lang in classifier.languages() {
        let table = classifier.term_ranks().get(lang);
        let terms = table.map_or(0, |table| table.len());
        let has_chars = if char_languages.contains(lang) { "chars" } else { "-" };
        let top = table
            .map(|table| table.ranked_terms().into_iter().take(TOP_TERMS).collect::<Vec<_>>().join(","))
            .filter(|top| !top.is_empty())
            .unwrap_or_else(|| "-".to_string());
        writeln!(writer, "{lang}\t{terms} terms\t{has_chars}\t{top}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Print the named corpora and their directories
pub fn list_corpora() -> Result<()> {
    let stdout = io::stdout();
    write_corpora(&mut stdout.lock())
}

fn write_corpora<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "Data root: {}", data_root().display())?;
    for corpus in [Corpus::Wikipedia, Corpus::Bible, Corpus::SmallWiki] {
        let dir = corpus.data_dir();
        let status = if dir.is_dir() { "available" } else { "missing" };
        writeln!(writer, "{}\t{}\t{}", corpus.dir_name(), status, dir.display())?;
    }
    Ok(())
}

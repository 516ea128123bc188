//! Classify command implementation

use crate::input::{resolve_patterns, FileReader, InputLine};
use crate::output::{Classification, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter};
use crate::table_source::SourceArgs;
use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Arguments for the classify command
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Text to classify (repeatable)
    #[arg(short, long, value_name = "TEXT")]
    pub text: Vec<String>,

    /// Input files or patterns (supports glob); each line is one text
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Include every surviving language's score
    #[arg(long)]
    pub scores: bool,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// A text waiting to be classified, labelled with its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingText {
    /// Origin such as `text:1`, `notes.txt:4` or `stdin:2`
    pub source: String,
    /// Text content
    pub text: String,
}

impl ClassifyArgs {
    /// Execute the classify command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        log::info!("Starting classification");
        log::debug!("Arguments: {:?}", self);

        let config = self.source.load_config()?;
        let classifier = self.source.load_classifier(&config)?;
        let pending = self.collect_texts()?;
        log::info!("Classifying {} texts", pending.len());

        let with_scores = self.scores || config.output.include_scores;
        let results: Vec<Classification> = pending
            .into_par_iter()
            .map(|item| Classification::new(&classifier, item.source, item.text, with_scores))
            .collect();

        let format = self.format.unwrap_or(config.output.default_format);
        let mut formatter = create_formatter(format, self.output.as_deref(), config.output.pretty_json)?;
        for result in &results {
            formatter.format_result(result)?;
        }
        formatter.finish()?;

        let identified = results.iter().filter(|r| r.language.is_some()).count();
        log::info!("Identified {} of {} texts", identified, results.len());
        Ok(())
    }

    /// Gather texts from `--text`, then `--input` files, else standard input
    fn collect_texts(&self) -> Result<Vec<PendingText>> {
        let mut pending: Vec<PendingText> = self
            .text
            .iter()
            .enumerate()
            .map(|(index, text)| PendingText {
                source: format!("text:{}", index + 1),
                text: text.clone(),
            })
            .collect();

        if !self.input.is_empty() {
            for path in resolve_patterns(&self.input)? {
                log::debug!("Reading {}", path.display());
                let lines = FileReader::read_lines(&path)?;
                pending.extend(label_lines(&path.display().to_string(), lines));
            }
        }

        if self.text.is_empty() && self.input.is_empty() {
            log::debug!("Reading texts from standard input");
            pending.extend(label_lines("stdin", FileReader::read_stdin_lines()?));
        }

        Ok(pending)
    }
}

fn label_lines(origin: &str, lines: Vec<InputLine>) -> impl Iterator<Item = PendingText> + '_ {
    lines.into_iter().map(move |InputLine { line, text }| PendingText {
        source: format!("{origin}:{line}"),
        text,
    })
}

/// Create a formatter writing to `output`, or stdout when `None`
pub fn create_formatter(format: OutputFormat, output: Option<&Path>, pretty_json: bool) -> Result<Box<dyn OutputFormatter>> {
    let formatter: Box<dyn OutputFormatter> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let writer = BufWriter::new(file);
            match format {
                OutputFormat::Text => Box::new(TextFormatter::new(writer)),
                OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
            }
        }
        None => match format {
            OutputFormat::Text => Box::new(TextFormatter::stdout()),
            OutputFormat::Json => Box::new(JsonFormatter::new(io::stdout(), pretty_json)),
        },
    };
    Ok(formatter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_source::CorpusArg;
    use std::fs;
    use tempfile::TempDir;

    fn args(text: Vec<&str>, input: Vec<String>) -> ClassifyArgs {
        ClassifyArgs {
            text: text.into_iter().map(str::to_string).collect(),
            input,
            output: None,
            format: None,
            scores: false,
            source: SourceArgs {
                data_dir: None,
                corpus: CorpusArg::Wikipedia,
                config: None,
                languages: Vec::new(),
            },
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_collect_texts_and_files() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("notes.txt");
        fs::write(&file_path, "Gracias\n\nMerci beaucoup\n").unwrap();

        let pending = args(vec!["Hello"], vec![file_path.display().to_string()])
            .collect_texts()
            .unwrap();

        let sources: Vec<&str> = pending.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(sources[0], "text:1");
        assert!(sources[1].ends_with("notes.txt:1"));
        assert!(sources[2].ends_with("notes.txt:3"));
        assert_eq!(pending[2].text, "Merci beaucoup");
    }

    #[test]
    fn test_create_formatter_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.json");
        {
            let mut formatter = create_formatter(OutputFormat::Json, Some(&output), false).unwrap();
            formatter.finish().unwrap();
        }
        assert_eq!(fs::read_to_string(&output).unwrap(), "[]\n");
    }
}

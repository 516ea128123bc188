//! Eval command implementation

use crate::input::{resolve_patterns, FileReader, LabelledSample};
use crate::output::OutputFormat;
use crate::progress::ProgressReporter;
use crate::table_source::SourceArgs;
use anyhow::Result;
use clap::Args;
use rankid_core::{Evaluation, LanguageIdentifier};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Arguments for the eval command
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Labelled sample files or patterns (supports glob), one LANG<TAB>TEXT row per line
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Counts and derived measures for one group of samples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalLine {
    /// Samples seen
    pub total: usize,
    /// Samples that received an answer
    pub attempted: usize,
    /// Answers equal to the label
    pub correct: usize,
    /// correct / attempted
    pub precision: Option<f64>,
    /// correct / total
    pub recall: Option<f64>,
    /// F1 score
    pub f_measure: Option<f64>,
}

impl From<&Evaluation> for EvalLine {
    fn from(evaluation: &Evaluation) -> Self {
        let report = evaluation.report();
        Self {
            total: evaluation.total,
            attempted: evaluation.attempted,
            correct: evaluation.correct,
            precision: report.precision,
            recall: report.recall,
            f_measure: report.f_measure,
        }
    }
}

/// Evaluation summary, overall and per label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalSummary {
    /// All samples together
    pub overall: EvalLine,
    /// Samples grouped by expected language
    pub per_language: BTreeMap<String, EvalLine>,
}

impl EvalArgs {
    /// Execute the eval command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        let config = self.source.load_config()?;
        let classifier = self.source.load_classifier(&config)?;

        let mut files = Vec::new();
        for path in resolve_patterns(&self.input)? {
            let rows = FileReader::read_samples(&path)?;
            log::info!("Read {} samples from {}", rows.len(), path.display());
            files.push((path, rows));
        }

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_samples(files.iter().map(|(_, rows)| rows.len() as u64).sum());
        let mut per_language = BTreeMap::new();
        for (path, rows) in &files {
            progress.set_file(&path.display().to_string());
            let groups = evaluate_samples(&classifier, rows, || progress.sample_completed());
            per_language = merge_groups(per_language, groups);
        }
        progress.finish();

        let summary = summarize(&per_language);
        let format = self.format.unwrap_or(config.output.default_format);
        let stdout = io::stdout();
        write_summary(&mut stdout.lock(), &summary, format, config.output.pretty_json)
    }
}

/// Classify every sample in parallel, grouping counts by label
pub fn evaluate_samples<I, F>(identifier: &I, samples: &[LabelledSample], on_sample: F) -> BTreeMap<String, Evaluation>
where
    I: LanguageIdentifier + Sync + ?Sized,
    F: Fn() + Sync,
{
    samples
        .par_iter()
        .fold(BTreeMap::new, |mut groups: BTreeMap<String, Evaluation>, sample| {
            groups
                .entry(sample.label.clone())
                .or_default()
                .evaluate(identifier, &sample.label, &sample.text);
            on_sample();
            groups
        })
        .reduce(BTreeMap::new, merge_groups)
}

/// Add the per-label counts of `right` into `left`
pub fn merge_groups(
    mut left: BTreeMap<String, Evaluation>,
    right: BTreeMap<String, Evaluation>,
) -> BTreeMap<String, Evaluation> {
    for (label, evaluation) in right {
        let merged = left.remove(&label).unwrap_or_default().merge(evaluation);
        left.insert(label, merged);
    }
    left
}

/// Build the overall and per-label summary
pub fn summarize(per_language: &BTreeMap<String, Evaluation>) -> EvalSummary {
    let overall = per_language
        .values()
        .fold(Evaluation::default(), |total, evaluation| total.merge(*evaluation));
    EvalSummary {
        overall: EvalLine::from(&overall),
        per_language: per_language
            .iter()
            .map(|(label, evaluation)| (label.clone(), EvalLine::from(evaluation)))
            .collect(),
    }
}

/// Write the summary as a table or JSON
pub fn write_summary<W: Write>(writer: &mut W, summary: &EvalSummary, format: OutputFormat, pretty_json: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            if pretty_json {
                serde_json::to_writer_pretty(&mut *writer, summary)?;
            } else {
                serde_json::to_writer(&mut *writer, summary)?;
            }
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            writeln!(writer, "language\ttotal\tattempted\tcorrect\tprecision\trecall\tf_measure")?;
            for (label, line) in &summary.per_language {
                write_line(writer, label, line)?;
            }
            write_line(writer, "overall", &summary.overall)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_line<W: Write>(writer: &mut W, label: &str, line: &EvalLine) -> Result<()> {
    let measure = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"));
    writeln!(
        writer,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        label,
        line.total,
        line.attempted,
        line.correct,
        measure(line.precision),
        measure(line.recall),
        measure(line.f_measure)
    )?;
    Ok(())
}

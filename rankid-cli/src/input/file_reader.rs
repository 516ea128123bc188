//! File reading utilities

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

/// One non-blank input line with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// 1-based line number in the source
    pub line: usize,
    /// Line content without the trailing newline
    pub text: String,
}

/// A `LANG<TAB>TEXT` evaluation row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledSample {
    /// Expected language code
    pub label: String,
    /// Text to classify
    pub text: String,
}

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read the non-blank lines of a file
    pub fn read_lines(path: &Path) -> Result<Vec<InputLine>> {
        Ok(Self::non_blank_lines(&Self::read_text(path)?))
    }

    /// Read the non-blank lines of standard input
    pub fn read_stdin_lines() -> Result<Vec<InputLine>> {
        let mut lines = Vec::new();
        for (index, line) in io::stdin().lock().lines().enumerate() {
            let text = line.context("Failed to read standard input")?;
            if !text.trim().is_empty() {
                lines.push(InputLine {
                    line: index + 1,
                    text,
                });
            }
        }
        Ok(lines)
    }

    /// Read labelled samples, skipping blank lines and `#` comments
    pub fn read_samples(path: &Path) -> Result<Vec<LabelledSample>> {
        let mut samples = Vec::new();
        for InputLine { line, text } in Self::read_lines(path)? {
            if text.starts_with('#') {
                continue;
            }
            let (label, sample) = text.split_once('\t').ok_or_else(|| CliError::InvalidSample {
                path: path.display().to_string(),
                line,
            })?;
            let label = label.trim();
            if label.is_empty() {
                return Err(CliError::InvalidSample {
                    path: path.display().to_string(),
                    line,
                }
                .into());
            }
            samples.push(LabelledSample {
                label: label.to_string(),
                text: sample.to_string(),
            });
        }
        Ok(samples)
    }

    fn non_blank_lines(content: &str) -> Vec<InputLine> {
        content
            .lines()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(index, text)| InputLine {
                line: index + 1,
                text: text.to_string(),
            })
            .collect()
    }
}

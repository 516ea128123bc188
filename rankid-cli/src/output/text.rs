//! Plain text output formatter

use super::{Classification, OutputFormatter};
use anyhow::Result;
use std::io::{self, Write};

/// Placeholder printed when no language was identified
pub const NO_LANGUAGE: &str = "-";

/// Plain text formatter - outputs `LANG<TAB>TEXT` per input
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_result(&mut self, result: &Classification) -> Result<()> {
        let language = result.language.as_deref().unwrap_or(NO_LANGUAGE);
        write!(self.writer, "{}\t{}", language, result.text.trim())?;
        if !result.scores.is_empty() {
            let scores: Vec<String> = result
                .scores
                .iter()
                .map(|entry| format!("{}={:.4}", entry.language, entry.score))
                .collect();
            write!(self.writer, "\t{}", scores.join(" "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

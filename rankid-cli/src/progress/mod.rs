//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for evaluation runs
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize progress bar for `total_samples` labelled samples
    pub fn init_samples(&mut self, total_samples: u64) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total_samples);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} samples {msg}")
        {
            pb.set_style(style.progress_chars("##-"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a classified sample; callable from worker threads
    pub fn sample_completed(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
        }
    }

    /// Show which file is being evaluated
    pub fn set_file(&self, filename: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Evaluating: {}", filename));
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_has_no_bar() {
        let mut reporter = ProgressReporter::new(true);
        reporter.init_samples(10);
        assert!(reporter.progress_bar.is_none());
        reporter.sample_completed();
        reporter.finish();
    }

    #[test]
    fn test_progress_counts() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init_samples(3);
        reporter.set_file("samples.tsv");
        let message = reporter.progress_bar.as_ref().map(ProgressBar::message);
        assert_eq!(message.as_deref(), Some("Evaluating: samples.tsv"));
        reporter.sample_completed();
        reporter.sample_completed();
        let position = reporter.progress_bar.as_ref().map(ProgressBar::position);
        assert_eq!(position, Some(2));
        reporter.finish();
    }
}

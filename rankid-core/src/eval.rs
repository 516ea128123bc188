//! Accuracy accounting over labelled samples
//!
//! A sample counts as attempted when the identifier gives any answer, and as
//! correct when that answer equals the label.

use crate::classifier::LanguageIdentifier;
use crate::counts::precision_recall_f;

/// Running counts for one identifier over a labelled data set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Samples seen
    pub total: usize,
    /// Samples that received an answer
    pub attempted: usize,
    /// Answers equal to the label
    pub correct: usize,
}

/// Precision, recall and F-measure of an [`Evaluation`]
///
/// Each measure is `None` while its denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationReport {
    /// correct / attempted
    pub precision: Option<f64>,
    /// correct / total
    pub recall: Option<f64>,
    /// F1 score, undefined when precision and recall are both zero
    pub f_measure: Option<f64>,
}

impl Evaluation {
    /// Record one prediction against its label
    pub fn record(&mut self, label: &str, predicted: Option<&str>) {
        self.total += 1;
        if let Some(predicted) = predicted {
            self.attempted += 1;
            if predicted == label {
                self.correct += 1;
            }
        }
    }

    /// Classify and record one sample
    pub fn evaluate<I: LanguageIdentifier + ?Sized>(&mut self, identifier: &I, label: &str, text: &str) {
        let predicted = identifier.classify(text);
        self.record(label, predicted.as_deref());
    }

    /// Run every `(label, text)` pair through `identifier`
    pub fn run<'s, I, It>(identifier: &I, samples: It) -> Self
    where
        I: LanguageIdentifier + ?Sized,
        It: IntoIterator<Item = (&'s str, &'s str)>,
    {
        let mut evaluation = Self::default();
        for (label, text) in samples {
            evaluation.evaluate(identifier, label, text);
        }
        evaluation
    }

    /// Combine counts from independent runs
    pub fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            attempted: self.attempted + other.attempted,
            correct: self.correct + other.correct,
        }
    }

    /// Precision/recall/F1 for the samples seen so far
    pub fn report(&self) -> EvaluationReport {
        let precision = (self.attempted > 0).then(|| self.correct as f64 / self.attempted as f64);
        let recall = (self.total > 0).then(|| self.correct as f64 / self.total as f64);
        // correct > 0 implies both denominators and precision + recall are nonzero
        let f_measure = (self.correct > 0).then(|| precision_recall_f(self.total, self.attempted, self.correct, 1.0).2);
        EvaluationReport {
            precision,
            recall,
            f_measure,
        }
    }
}

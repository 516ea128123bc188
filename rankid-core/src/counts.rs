//! Score normalization and counting utilities
//!
//! Small pure functions over score maps, shared by the scoring engine and by
//! tools that build or evaluate frequency tables.
//!
//! Score maps are ordered so that floating-point sums are always taken in
//! key order and repeated calls give bit-identical results.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// L1-normalize a score map so its values sum to one.
///
/// If the values sum to zero every key gets `1 / len`. An empty map stays empty.
pub fn normalize_score_dict<K>(input: &BTreeMap<K, f64>) -> BTreeMap<K, f64>
where
    K: Ord + Clone,
{
    let total: f64 = input.values().sum();
    let uniform = 1.0 / input.len() as f64;
    input
        .iter()
        .map(|(key, value)| {
            let normalized = if total > 0.0 { value / total } else { uniform };
            (key.clone(), normalized)
        })
        .collect()
}

/// Apply the softmax function to a score map.
///
/// Differences between inputs become more pronounced; unlike L1
/// normalization this is not idempotent.
pub fn softmax_score_dict<K>(input: &BTreeMap<K, f64>) -> BTreeMap<K, f64>
where
    K: Ord + Clone,
{
    let total: f64 = input.values().map(|value| value.exp()).sum();
    input
        .iter()
        .map(|(key, value)| (key.clone(), value.exp() / total))
        .collect()
}

/// Recover the distribution whose softmax is `input`.
///
/// Exact only when the pre-softmax values summed to one; the input itself is
/// not checked.
pub fn softmax_to_l1<K>(input: &BTreeMap<K, f64>) -> BTreeMap<K, f64>
where
    K: Ord + Clone,
{
    let logs: BTreeMap<K, f64> = input
        .iter()
        .map(|(key, value)| (key.clone(), value.ln()))
        .collect();
    let sum_logs: f64 = logs.values().sum();
    let remainder_shared = (1.0 - sum_logs) / input.len() as f64;
    logs.into_iter()
        .map(|(key, value)| (key, value + remainder_shared))
        .collect()
}

/// Convert frequencies to 1-based ranks, most frequent first.
///
/// Equal frequencies keep their input order.
pub fn freq_table_to_ranks<K, I>(input: I) -> HashMap<K, usize>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, u64)>,
{
    let mut items: Vec<(K, u64)> = input.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
        .into_iter()
        .enumerate()
        .map(|(index, (key, _))| (key, index + 1))
        .collect()
}

/// Merge keys that are equal after lower-casing, summing their counts.
pub fn freq_dict_to_lowercase(input: &HashMap<String, u64>) -> HashMap<String, u64> {
    let mut output = HashMap::with_capacity(input.len());
    for (key, count) in input {
        *output.entry(key.to_lowercase()).or_insert(0) += count;
    }
    output
}

/// Precision, recall and F-measure for a classification run.
///
/// `attempted` counts non-empty answers; `total_positives` counts all
/// samples. Callers must not pass zero denominators.
pub fn precision_recall_f(
    total_positives: usize,
    attempted: usize,
    correct: usize,
    beta: f64,
) -> (f64, f64, f64) {
    let precision = correct as f64 / attempted as f64;
    let recall = correct as f64 / total_positives as f64;
    let beta_sq = beta * beta;
    let f_measure = (1.0 + beta_sq) * precision * recall / (beta_sq * precision + recall);
    (precision, recall, f_measure)
}

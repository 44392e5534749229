//! Set-overlap scoring and latency aggregation.

use std::collections::BTreeSet;

/// Precision, recall, F1 between predicted and gold identifier sets.
///
/// Boundary cases are fixed by contract: both empty → (1, 1, 1); gold empty
/// with non-empty predictions → (0, 1, 0); empty predictions against
/// non-empty gold → (0, 0, 0).
pub fn prf(pred: &BTreeSet<String>, gold: &BTreeSet<String>) -> (f64, f64, f64) {
    if gold.is_empty() && pred.is_empty() {
        return (1.0, 1.0, 1.0);
    }
    if gold.is_empty() {
        return (0.0, 1.0, 0.0);
    }
    let tp = pred.intersection(gold).count() as f64;
    let p = tp / pred.len().max(1) as f64;
    let r = tp / gold.len() as f64;
    let f1 = if p + r == 0.0 {
        0.0
    } else {
        2.0 * p * r / (p + r)
    };
    (p, r, f1)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 0.5)
}

/// Nearest-rank percentile over unsorted input (0.0–1.0).
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let idx = ((p * (sorted.len() - 1) as f64).round() as usize).min(sorted.len() - 1);
    Some(sorted[idx])
}

use std::cmp::Ordering;

use crate::model::errors::RankError;

/// Tie-averaged competition ranks, highest score first.
///
/// Output is aligned with `scores`: position `i` holds the rank of `scores[i]`.
/// Positions sharing a value receive the mean of the ordinal ranks they occupy.
pub fn rank_with_ties(scores: &[f64]) -> Vec<f64> {
    let n = scores.len();
    if n == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut ordinal = vec![0.0f64; n];
    for (pos, &idx) in order.iter().enumerate() {
        ordinal[idx] = (pos + 1) as f64;
    }

    mean_over_ties(scores, &ordinal)
}

/// Give every position the mean of `raw_ranks` over the positions sharing its value.
///
/// `values` and `raw_ranks` are index-aligned; neither needs to be sorted.
pub fn aggregate_by_mean(values: &[f64], raw_ranks: &[f64]) -> Result<Vec<f64>, RankError> {
    if values.len() != raw_ranks.len() {
        return Err(RankError::LengthMismatch {
            values: values.len(),
            ranks: raw_ranks.len(),
        });
    }
    Ok(mean_over_ties(values, raw_ranks))
}

/// Callers guarantee `values.len() == raw_ranks.len()`.
fn mean_over_ties(values: &[f64], raw_ranks: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

    let mut out = vec![0.0f64; n];
    let mut i = 0usize;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        let group = &order[i..=j];
        let sum: f64 = group.iter().map(|&idx| raw_ranks[idx]).sum();
        let mean = sum / group.len() as f64;
        for &idx in group {
            out[idx] = mean;
        }
        i = j + 1;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_ties.rs"]
mod tests;

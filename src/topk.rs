//! Ranking utilities over rank vectors.

use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

/// The `k` highest-scoring nodes, best first. Non-finite and non-positive scores are skipped.
///
/// Ties are broken by node iteration order of the heap, so callers that need a total order on
/// ties should sort the result themselves.
pub fn top_k<N: Clone + Eq + Hash>(scores: &HashMap<N, f64>, k: usize) -> Vec<(N, f64)> {
    if k == 0 || scores.is_empty() {
        return Vec::new();
    }
    let entries: Vec<(&N, NotNan<f64>)> = scores
        .iter()
        .filter(|(_, &s)| s.is_finite() && s > 0.0)
        .filter_map(|(n, &s)| NotNan::new(s).ok().map(|s| (n, s)))
        .collect();

    // Min-heap of (score, position in `entries`).
    let mut heap = BinaryHeap::with_capacity(k + 1);
    for (i, &(_, s)) in entries.iter().enumerate() {
        if heap.len() < k {
            heap.push(Reverse((s, i)));
        } else if let Some(&Reverse((min_score, _))) = heap.peek() {
            if s > min_score {
                heap.pop();
                heap.push(Reverse((s, i)));
            }
        }
    }
    let mut results: Vec<(N, f64)> = heap
        .into_iter()
        .map(|Reverse((s, i))| (entries[i].0.clone(), s.into_inner()))
        .collect();
    results.sort_unstable_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_k_skips_junk_and_sorts() {
        let scores: HashMap<&str, f64> = [
            ("a", 0.0),
            ("b", 2.0),
            ("c", f64::NAN),
            ("d", 1.0),
            ("e", f64::INFINITY),
            ("f", -1.0),
            ("g", 0.5),
        ]
        .into_iter()
        .collect();
        let got = top_k(&scores, 2);
        assert_eq!(got, vec![("b", 2.0), ("d", 1.0)]);
        assert_eq!(top_k(&scores, 10).len(), 3);
        assert!(top_k(&scores, 0).is_empty());
    }
}

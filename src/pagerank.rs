//! Monte-Carlo PageRank.
//!
//! "Complete path" estimator: every visit of every walk counts, and the estimate for node `j` is
//! the total visits received by `j` divided by the total visits overall, i.e. the column sums of
//! the walk-statistics cache over its grand total.
//!
//! Reference: Avrachenkov, Litvak, Nemirovsky, Osipova, "Monte Carlo methods in PageRank
//! computation: When one iteration is sufficient".

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::WalkStatisticsCache;
use crate::graph::Graph;
use crate::node_index::NodeIndex;
use crate::progress::{LogProgress, ProgressSink};
use crate::random_walk::WalkConfig;
use crate::topk::top_k;
use crate::Result;

/// A freshly built cache together with the PageRank estimate it yields.
#[derive(Debug, Clone)]
pub struct MonteCarloPageRank<N> {
    pub cache: WalkStatisticsCache,
    pub scores: HashMap<N, f64>,
}

impl<N: Clone + Eq + Hash> MonteCarloPageRank<N> {
    /// The `k` highest-ranked nodes, best first.
    pub fn top(&self, k: usize) -> Vec<(N, f64)> {
        top_k(&self.scores, k)
    }
}

/// Column sums over the grand total, keyed by node.
///
/// An all-zero cache yields all-zero scores.
pub fn scores_from_cache<N: Clone + Eq + Hash>(
    cache: &WalkStatisticsCache,
    index: &NodeIndex<N>,
) -> Result<HashMap<N, f64>> {
    cache.check_dim(index.len())?;
    let sums = cache.column_sums();
    let total: u64 = sums.iter().sum();
    let one_over_total = if total > 0 { 1.0 / total as f64 } else { 0.0 };
    Ok(index
        .nodes()
        .iter()
        .zip(sums)
        .map(|(n, s)| (n.clone(), s as f64 * one_over_total))
        .collect())
}

pub fn mc_pagerank<G: Graph>(
    graph: &G,
    index: &NodeIndex<G::Node>,
    config: WalkConfig,
) -> Result<MonteCarloPageRank<G::Node>> {
    mc_pagerank_with(graph, index, config, &LogProgress::new())
}

pub fn mc_pagerank_with<G, P>(
    graph: &G,
    index: &NodeIndex<G::Node>,
    config: WalkConfig,
    progress: &P,
) -> Result<MonteCarloPageRank<G::Node>>
where
    G: Graph,
    P: ProgressSink + ?Sized,
{
    let cache = WalkStatisticsCache::build_with(graph, index, config, progress)?;
    let scores = scores_from_cache(&cache, index)?;
    Ok(MonteCarloPageRank { cache, scores })
}

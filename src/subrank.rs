//! Subrank: PageRank on an induced subgraph from a reused walk-statistics cache.
//!
//! Instead of re-simulating the subgraph, take the cached visits of walks that started inside
//! it, then fix the boundary error (see [`boundary`](crate::boundary)) by running the corrective
//! walks on the subgraph only: positive corrections add their visits, negative ones subtract
//! theirs. The corrected counts are normalized into a distribution.
//!
//! Reference: Pippellia, "Pagerank on subgraphs, efficient Monte-Carlo estimation".

use std::collections::HashMap;

use crate::boundary::{self, Corrections};
use crate::cache::WalkStatisticsCache;
use crate::graph::Graph;
use crate::node_index::NodeIndex;
use crate::progress::{LogProgress, ProgressSink};
use crate::random_walk::AbsorbingWalk;
use crate::topk::top_k;
use crate::{validate_dampening, Error, Result};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// How corrected visit counts become a distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Normalization {
    /// Clamp negative corrected counts to zero, then divide by the total.
    #[default]
    ClampNegative,
    /// Divide the signed counts by their signed total.
    Signed,
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubrankConfig {
    /// Must equal [`WalkStatisticsCache::dampening`].
    pub dampening: f64,
    /// Seed for the corrective walks.
    pub seed: u64,
    pub normalization: Normalization,
}

impl Default for SubrankConfig {
    fn default() -> Self {
        Self { dampening: 0.85, seed: 42, normalization: Normalization::ClampNegative }
    }
}

impl SubrankConfig {
    pub fn validate(&self) -> Result<()> {
        validate_dampening(self.dampening)
    }
}

/// Result of one subgraph estimate plus its bookkeeping.
#[derive(Debug, Clone)]
pub struct SubrankRun<N: Eq + std::hash::Hash> {
    /// Rank per subgraph node; sums to 1.
    pub scores: HashMap<N, f64>,
    pub corrections: Corrections<N>,
    /// Corrective walks actually simulated.
    pub walks_performed: u64,
    /// Walks a from-scratch simulation of the subgraph would have needed.
    pub walks_from_scratch: u64,
}

impl<N: Clone + Eq + std::hash::Hash> SubrankRun<N> {
    /// The `k` highest-ranked subgraph nodes, best first.
    pub fn top(&self, k: usize) -> Vec<(N, f64)> {
        top_k(&self.scores, k)
    }
}

/// Estimator bound to one base graph and its cache; reusable across subgraphs.
pub struct SubgraphRankEstimator<'a, G: Graph> {
    base: &'a G,
    cache: &'a WalkStatisticsCache,
    index: &'a NodeIndex<G::Node>,
    config: SubrankConfig,
}

impl<'a, G: Graph> SubgraphRankEstimator<'a, G> {
    /// Validates the base side once: non-empty graph, dampening, cache shape, index, and that
    /// the cache was simulated with the same dampening.
    pub fn new(
        base: &'a G,
        cache: &'a WalkStatisticsCache,
        index: &'a NodeIndex<G::Node>,
        config: SubrankConfig,
    ) -> Result<Self> {
        if base.is_empty() {
            return Err(Error::EmptyGraph("base graph has no nodes"));
        }
        config.validate()?;
        cache.check_dim(base.node_count())?;
        index.check_matches(base)?;
        if cache.dampening() != config.dampening {
            return Err(Error::DampeningMismatch {
                cache: cache.dampening(),
                requested: config.dampening,
            });
        }
        Ok(Self { base, cache, index, config })
    }

    pub fn config(&self) -> &SubrankConfig {
        &self.config
    }

    /// Estimate with a ChaCha8 RNG seeded from the config, logging through [`LogProgress`].
    ///
    /// `sub` must be an induced subgraph of the base graph; edge containment is not checked
    /// (see [`verify_subgraph`](crate::graph::verify_subgraph)).
    pub fn estimate<S>(&self, sub: &S) -> Result<SubrankRun<G::Node>>
    where
        S: Graph<Node = G::Node>,
    {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.estimate_with_rng(sub, &mut rng, &LogProgress::new())
    }

    pub fn estimate_with_rng<S, R, P>(
        &self,
        sub: &S,
        rng: &mut R,
        progress: &P,
    ) -> Result<SubrankRun<G::Node>>
    where
        S: Graph<Node = G::Node>,
        R: Rng,
        P: ProgressSink + ?Sized,
    {
        if sub.is_empty() {
            return Err(Error::EmptyGraph("subgraph has no nodes"));
        }
        let visits = self.cache.visits_from(self.index, sub.nodes())?;
        let corrections = boundary::analyze(sub, self.base, &visits, self.config.dampening)?;

        let walks_performed = corrections.total_walks();
        let walks_from_scratch = (sub.node_count() * self.cache.walks_per_node()) as u64;
        progress.corrections(walks_performed, walks_from_scratch);

        let dampening = self.config.dampening;
        let positive =
            run_walks(sub, |n| corrections.positive(n), dampening, &mut *rng, progress)?;
        let negative =
            run_walks(sub, |n| corrections.negative(n), dampening, &mut *rng, progress)?;

        let corrected: Vec<(&G::Node, i64)> = sub
            .nodes()
            .map(|n| {
                let cached = visits.get(n) as i64;
                let plus = positive.get(n).copied().unwrap_or(0) as i64;
                let minus = negative.get(n).copied().unwrap_or(0) as i64;
                let count = cached + plus - minus;
                match self.config.normalization {
                    Normalization::ClampNegative => (n, count.max(0)),
                    Normalization::Signed => (n, count),
                }
            })
            .collect();

        let total: i64 = corrected.iter().map(|&(_, c)| c).sum();
        if total <= 0 {
            return Err(Error::NonPositiveTotal(total));
        }
        let scores = corrected
            .into_iter()
            .map(|(n, c)| (n.clone(), c as f64 / total as f64))
            .collect();

        Ok(SubrankRun { scores, corrections, walks_performed, walks_from_scratch })
    }
}

/// Run `count(v)` absorbing walks on `sub` from every node `v`, in `sub`'s node order.
fn run_walks<'s, S, F, R, P>(
    sub: &'s S,
    count: F,
    dampening: f64,
    rng: &mut R,
    progress: &P,
) -> Result<HashMap<&'s S::Node, u64>>
where
    S: Graph,
    F: Fn(&S::Node) -> u64,
    R: Rng,
    P: ProgressSink + ?Sized,
{
    let mut visited: HashMap<&S::Node, u64> = HashMap::new();
    for start in sub.nodes() {
        for _ in 0..count(start) {
            if progress.is_cancelled() {
                return Err(Error::Cancelled);
            }
            for node in AbsorbingWalk::new(sub, start, dampening, &mut *rng) {
                *visited.entry(node).or_default() += 1;
            }
        }
    }
    Ok(visited)
}

/// One-shot subrank: rank per subgraph node.
pub fn subrank<S, G>(
    sub: &S,
    base: &G,
    cache: &WalkStatisticsCache,
    index: &NodeIndex<G::Node>,
    config: SubrankConfig,
) -> Result<HashMap<G::Node, f64>>
where
    S: Graph<Node = G::Node>,
    G: Graph,
{
    Ok(subrank_run(sub, base, cache, index, config)?.scores)
}

pub fn subrank_run<S, G>(
    sub: &S,
    base: &G,
    cache: &WalkStatisticsCache,
    index: &NodeIndex<G::Node>,
    config: SubrankConfig,
) -> Result<SubrankRun<G::Node>>
where
    S: Graph<Node = G::Node>,
    G: Graph,
{
    SubgraphRankEstimator::new(base, cache, index, config)?.estimate(sub)
}

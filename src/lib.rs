//! `subrank`: Monte-Carlo PageRank with reusable walk statistics.
//!
//! A base graph is simulated once: every node starts `R` absorbing random walks and the visit
//! counts land in a [`WalkStatisticsCache`]. That cache can then be reused to estimate PageRank
//! on any induced subgraph: cached visits from subgraph-origin walks are corrected at the
//! subgraph boundary by a small number of extra walks confined to the subgraph.
//!
//! Public invariants (must not drift):
//! - **Node order**: cache rows/columns are addressed through a [`NodeIndex`] whose node set
//!   equals the base graph's node set exactly.
//! - **Determinism**: every randomized operation is reproducible given the same seed (or the
//!   same injected RNG) and the same graph iteration order.
//! - **Fail fast**: inputs are validated before the first walk; there are no partial results.
//!
//! Swappable (allowed to change without breaking the contract):
//! - iteration strategy (serial vs parallel cache construction)
//! - internal matrix layout (so long as the accessors keep their meaning)

pub mod boundary;
pub mod cache;
pub mod graph;
pub mod node_index;
pub mod pagerank;
pub mod progress;
pub mod random_walk;
pub mod subrank;
pub mod topk;

pub use boundary::{analyze, classify, correction_deltas, Boundary, Corrections};
pub use cache::{VisitCounts, WalkStatisticsCache};
pub use graph::{verify_subgraph, DiGraph, Graph};
pub use node_index::NodeIndex;
pub use pagerank::{mc_pagerank, mc_pagerank_with, scores_from_cache, MonteCarloPageRank};
pub use progress::{CancelFlag, LogProgress, NoProgress, ProgressSink};
pub use random_walk::{
    absorbing_walk, for_each_walk_from_nodes, generate_walks, generate_walks_from_nodes,
    AbsorbingWalk, WalkConfig,
};
pub use subrank::{
    subrank, subrank_run, Normalization, SubgraphRankEstimator, SubrankConfig, SubrankRun,
};
pub use topk::top_k;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("empty graph: {0}")]
    EmptyGraph(&'static str),
    #[error("walks per node must be a positive integer (got {0})")]
    InvalidWalkBudget(usize),
    #[error("dampening must be strictly between 0 and 1 (got {0})")]
    InvalidDampening(f64),
    #[error("cache was simulated with dampening {cache}, estimator asked for {requested}")]
    DampeningMismatch { cache: f64, requested: f64 },
    #[error("node index does not match the graph: {0}")]
    NodeIndexMismatch(String),
    #[error("walk statistics cache shape mismatch: {0}")]
    CacheShapeMismatch(String),
    #[error("not a subgraph of the base graph: {0}")]
    NotASubgraph(String),
    #[error("corrected visit total must be > 0 (got {0})")]
    NonPositiveTotal(i64),
    #[error("computation cancelled")]
    Cancelled,
}

impl Error {
    /// True for errors raised by input validation, before any walk was simulated.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Error::NonPositiveTotal(_) | Error::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Dampening must lie strictly inside `(0, 1)`; NaN is rejected.
pub(crate) fn validate_dampening(dampening: f64) -> Result<()> {
    if dampening > 0.0 && dampening < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidDampening(dampening))
    }
}

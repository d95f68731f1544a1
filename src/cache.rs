//! Walk-statistics cache.
//!
//! Entry `(i, j)` counts how many times walks started at node `i` visited node `j`, over
//! `walks_per_node` absorbing walks per start node, each continuing with probability `dampening`.
//! The diagonal includes the start visit, so a
//! simulated cache always has `visits[i][i] >= walks_per_node`.
//!
//! Storage is CSR: rows are appended once by an exclusively owned builder and the finished
//! matrix is never mutated again. Rows and columns are positions of a [`NodeIndex`].

use crate::graph::Graph;
use crate::node_index::NodeIndex;
use crate::progress::{LogProgress, ProgressSink, PROGRESS_BATCH};
use crate::random_walk::{AbsorbingWalk, WalkConfig};
use crate::{validate_dampening, Error, Result};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkStatisticsCache {
    dim: usize,
    walks_per_node: usize,
    dampening: f64,
    row_offsets: Vec<usize>,
    columns: Vec<usize>,
    visits: Vec<u64>,
}

impl WalkStatisticsCache {
    /// Simulate `config.walks_per_node` walks from every node of `graph`, logging progress.
    ///
    /// Row `i` draws from its own ChaCha8 stream (seed `config.seed`, stream `i`), so the
    /// result does not depend on the order rows are processed in.
    pub fn build<G: Graph>(
        graph: &G,
        index: &NodeIndex<G::Node>,
        config: WalkConfig,
    ) -> Result<Self> {
        Self::build_with(graph, index, config, &LogProgress::new())
    }

    pub fn build_with<G, P>(
        graph: &G,
        index: &NodeIndex<G::Node>,
        config: WalkConfig,
        progress: &P,
    ) -> Result<Self>
    where
        G: Graph,
        P: ProgressSink + ?Sized,
    {
        validate_build(graph, index, &config)?;
        build_rows(index, &config, progress, |row, start, scratch| {
            let mut rng = row_rng(config.seed, row);
            simulate_row(graph, index, start, &config, &mut rng, progress, scratch)
        })
    }

    /// Like [`build_with`](Self::build_with), but every walk draws from `rng`, row after row.
    pub fn build_with_rng<G, R, P>(
        graph: &G,
        index: &NodeIndex<G::Node>,
        config: WalkConfig,
        rng: &mut R,
        progress: &P,
    ) -> Result<Self>
    where
        G: Graph,
        R: Rng,
        P: ProgressSink + ?Sized,
    {
        validate_build(graph, index, &config)?;
        build_rows(index, &config, progress, |_, start, scratch| {
            simulate_row(graph, index, start, &config, &mut *rng, progress, scratch)
        })
    }

    /// Parallel [`build_with`](Self::build_with). Produces the same matrix for the same config.
    #[cfg(feature = "parallel")]
    pub fn build_parallel<G, P>(
        graph: &G,
        index: &NodeIndex<G::Node>,
        config: WalkConfig,
        progress: &P,
    ) -> Result<Self>
    where
        G: Graph + Sync,
        G::Node: Send + Sync,
        P: ProgressSink + Sync + ?Sized,
    {
        use rayon::prelude::*;
        use std::sync::atomic::{AtomicUsize, Ordering};

        validate_build(graph, index, &config)?;
        let n = index.len();
        let done = AtomicUsize::new(0);
        let rows = index
            .nodes()
            .par_iter()
            .enumerate()
            .map_init(
                || RowScratch::new(n),
                |scratch, (row, start)| {
                    if progress.is_cancelled() {
                        return Err(Error::Cancelled);
                    }
                    let mut rng = row_rng(config.seed, row);
                    simulate_row(graph, index, start, &config, &mut rng, progress, scratch)?;
                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    if finished % PROGRESS_BATCH == 0 && finished != n {
                        progress.progress(finished, n);
                    }
                    Ok(scratch.take_row())
                },
            )
            .collect::<Result<Vec<SparseRow>>>()?;

        let mut builder = CacheBuilder::new(n, &config);
        for row in rows {
            builder.push_row(row);
        }
        progress.progress(n, n);
        progress.finished((n * config.walks_per_node) as u64);
        Ok(builder.finish())
    }

    /// Import a dense matrix simulated with `config`. Rows must all have length `rows.len()`.
    ///
    /// Only `walks_per_node` and `dampening` are recorded; the seed is not part of the cache.
    pub fn from_dense(rows: &[Vec<u64>], config: WalkConfig) -> Result<Self> {
        let dim = rows.len();
        if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != dim) {
            return Err(Error::CacheShapeMismatch(format!(
                "row {i} has {} columns, expected {dim}",
                r.len()
            )));
        }
        config.validate()?;
        let mut builder = CacheBuilder::new(dim, &config);
        for r in rows {
            builder.push_row(SparseRow {
                columns: r.iter().enumerate().filter(|(_, &v)| v > 0).map(|(j, _)| j).collect(),
                visits: r.iter().copied().filter(|&v| v > 0).collect(),
            });
        }
        Ok(builder.finish())
    }

    /// Import CSR parts (`row_offsets.len() == dim + 1`, sorted columns per row).
    pub fn from_csr_parts(
        dim: usize,
        config: WalkConfig,
        row_offsets: Vec<usize>,
        columns: Vec<usize>,
        visits: Vec<u64>,
    ) -> Result<Self> {
        let cache = Self {
            dim,
            walks_per_node: config.walks_per_node,
            dampening: config.dampening,
            row_offsets,
            columns,
            visits,
        };
        cache.validate()?;
        Ok(cache)
    }

    /// Check the CSR invariants, e.g. after deserializing.
    pub fn validate(&self) -> Result<()> {
        if self.walks_per_node == 0 {
            return Err(Error::InvalidWalkBudget(self.walks_per_node));
        }
        validate_dampening(self.dampening)?;
        if self.row_offsets.len() != self.dim + 1 || self.row_offsets.first() != Some(&0) {
            return Err(Error::CacheShapeMismatch(format!(
                "expected {} row offsets starting at 0, got {}",
                self.dim + 1,
                self.row_offsets.len()
            )));
        }
        if self.columns.len() != self.visits.len()
            || self.row_offsets.last() != Some(&self.columns.len())
        {
            return Err(Error::CacheShapeMismatch(
                "row offsets, columns and visits disagree on length".to_string(),
            ));
        }
        if let Some(i) = self.row_offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(Error::CacheShapeMismatch(format!("row offsets decrease at row {i}")));
        }
        for (i, w) in self.row_offsets.windows(2).enumerate() {
            let cols = &self.columns[w[0]..w[1]];
            if cols.iter().any(|&c| c >= self.dim) {
                return Err(Error::CacheShapeMismatch(format!("column out of range in row {i}")));
            }
            if cols.windows(2).any(|c| c[0] >= c[1]) {
                return Err(Error::CacheShapeMismatch(format!("unsorted columns in row {i}")));
            }
        }
        Ok(())
    }

    /// Fails unless the cache is `n × n`.
    pub fn check_dim(&self, n: usize) -> Result<()> {
        if self.dim != n {
            return Err(Error::CacheShapeMismatch(format!(
                "cache is {0}x{0}, expected {n}x{n}",
                self.dim
            )));
        }
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn walks_per_node(&self) -> usize {
        self.walks_per_node
    }

    /// Continuation probability the walks were simulated with.
    pub fn dampening(&self) -> f64 {
        self.dampening
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.visits.len()
    }

    /// `(column, visits)` pairs of row `i`, by increasing column. Panics if `i >= dim`.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        let (lo, hi) = (self.row_offsets[i], self.row_offsets[i + 1]);
        self.columns[lo..hi].iter().copied().zip(self.visits[lo..hi].iter().copied())
    }

    /// Panics if `i >= dim`.
    pub fn get(&self, i: usize, j: usize) -> u64 {
        let (lo, hi) = (self.row_offsets[i], self.row_offsets[i + 1]);
        match self.columns[lo..hi].binary_search(&j) {
            Ok(k) => self.visits[lo + k],
            Err(_) => 0,
        }
    }

    pub fn row_sum(&self, i: usize) -> u64 {
        self.row(i).map(|(_, v)| v).sum()
    }

    /// Total visits received by every node, over all start nodes.
    pub fn column_sums(&self) -> Vec<u64> {
        let mut sums = vec![0u64; self.dim];
        for (&c, &v) in self.columns.iter().zip(&self.visits) {
            sums[c] += v;
        }
        sums
    }

    pub fn total(&self) -> u64 {
        self.visits.iter().sum()
    }

    /// Element-wise sum of the given rows. Panics on an out-of-range row.
    pub fn sum_rows(&self, rows: &[usize]) -> Vec<u64> {
        let mut sums = vec![0u64; self.dim];
        for &i in rows {
            for (c, v) in self.row(i) {
                sums[c] += v;
            }
        }
        sums
    }

    /// Visits received by every node from walks that started at one of `origins`.
    pub fn visits_from<'a, 'n, N, I>(
        &self,
        index: &'a NodeIndex<N>,
        origins: I,
    ) -> Result<VisitCounts<'a, N>>
    where
        N: Clone + Eq + std::hash::Hash + 'n,
        I: IntoIterator<Item = &'n N>,
    {
        self.check_dim(index.len())?;
        let rows = index.positions_of(origins)?;
        Ok(VisitCounts { index, counts: self.sum_rows(&rows) })
    }

    pub fn to_dense(&self) -> Vec<Vec<u64>> {
        (0..self.dim)
            .map(|i| {
                let mut r = vec![0u64; self.dim];
                for (c, v) in self.row(i) {
                    r[c] = v;
                }
                r
            })
            .collect()
    }

    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn visits(&self) -> &[u64] {
        &self.visits
    }
}

/// Per-node visit totals, addressed by node through a [`NodeIndex`].
#[derive(Debug, Clone)]
pub struct VisitCounts<'a, N> {
    index: &'a NodeIndex<N>,
    counts: Vec<u64>,
}

impl<'a, N: Clone + Eq + std::hash::Hash> VisitCounts<'a, N> {
    /// Visits to `node`; 0 for nodes the index does not know.
    pub fn get(&self, node: &N) -> u64 {
        self.index.position(node).map_or(0, |p| self.counts[p])
    }

    /// Counts by index position.
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

fn validate_build<G: Graph>(
    graph: &G,
    index: &NodeIndex<G::Node>,
    config: &WalkConfig,
) -> Result<()> {
    if graph.is_empty() {
        return Err(Error::EmptyGraph("base graph has no nodes"));
    }
    config.validate()?;
    index.check_matches(graph)
}

fn row_rng(seed: u64, row: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(row as u64);
    rng
}

/// Sequential row loop shared by the sequential builds; `fill` simulates one row into `scratch`.
fn build_rows<N, P, F>(
    index: &NodeIndex<N>,
    config: &WalkConfig,
    progress: &P,
    mut fill: F,
) -> Result<WalkStatisticsCache>
where
    N: Clone + Eq + std::hash::Hash,
    P: ProgressSink + ?Sized,
    F: FnMut(usize, &N, &mut RowScratch) -> Result<()>,
{
    let n = index.len();
    let mut builder = CacheBuilder::new(n, config);
    let mut scratch = RowScratch::new(n);
    for (row, start) in index.nodes().iter().enumerate() {
        if progress.is_cancelled() {
            return Err(Error::Cancelled);
        }
        fill(row, start, &mut scratch)?;
        builder.push_scratch(&mut scratch);
        let done = row + 1;
        if done % PROGRESS_BATCH == 0 && done != n {
            progress.progress(done, n);
        }
    }
    progress.progress(n, n);
    progress.finished((n * config.walks_per_node) as u64);
    Ok(builder.finish())
}

fn simulate_row<G, R, P>(
    graph: &G,
    index: &NodeIndex<G::Node>,
    start: &G::Node,
    config: &WalkConfig,
    rng: &mut R,
    progress: &P,
    scratch: &mut RowScratch,
) -> Result<()>
where
    G: Graph,
    R: Rng,
    P: ProgressSink + ?Sized,
{
    for _ in 0..config.walks_per_node {
        if progress.is_cancelled() {
            return Err(Error::Cancelled);
        }
        for node in AbsorbingWalk::new(graph, start, config.dampening, &mut *rng) {
            let col = index.position(node).ok_or_else(|| {
                Error::NodeIndexMismatch("walk reached a node missing from the index".to_string())
            })?;
            scratch.record(col);
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct SparseRow {
    columns: Vec<usize>,
    visits: Vec<u64>,
}

/// Dense counters for the row being simulated plus the list of touched columns.
///
/// Draining resets only the touched counters, so one scratch serves every row.
struct RowScratch {
    dense: Vec<u64>,
    touched: Vec<usize>,
}

impl RowScratch {
    fn new(n: usize) -> Self {
        Self { dense: vec![0; n], touched: Vec::new() }
    }

    fn record(&mut self, col: usize) {
        if self.dense[col] == 0 {
            self.touched.push(col);
        }
        self.dense[col] += 1;
    }

    fn drain_into(&mut self, columns: &mut Vec<usize>, visits: &mut Vec<u64>) {
        self.touched.sort_unstable();
        for &c in &self.touched {
            columns.push(c);
            visits.push(std::mem::take(&mut self.dense[c]));
        }
        self.touched.clear();
    }

    #[cfg(feature = "parallel")]
    fn take_row(&mut self) -> SparseRow {
        let mut row = SparseRow::default();
        self.drain_into(&mut row.columns, &mut row.visits);
        row
    }
}

struct CacheBuilder {
    dim: usize,
    walks_per_node: usize,
    dampening: f64,
    row_offsets: Vec<usize>,
    columns: Vec<usize>,
    visits: Vec<u64>,
}

impl CacheBuilder {
    fn new(dim: usize, config: &WalkConfig) -> Self {
        let mut row_offsets = Vec::with_capacity(dim + 1);
        row_offsets.push(0);
        Self {
            dim,
            walks_per_node: config.walks_per_node,
            dampening: config.dampening,
            row_offsets,
            columns: Vec::new(),
            visits: Vec::new(),
        }
    }

    fn push_scratch(&mut self, scratch: &mut RowScratch) {
        scratch.drain_into(&mut self.columns, &mut self.visits);
        self.row_offsets.push(self.columns.len());
    }

    fn push_row(&mut self, row: SparseRow) {
        self.columns.extend(row.columns);
        self.visits.extend(row.visits);
        self.row_offsets.push(self.columns.len());
    }

    fn finish(self) -> WalkStatisticsCache {
        debug_assert_eq!(self.row_offsets.len(), self.dim + 1);
        WalkStatisticsCache {
            dim: self.dim,
            walks_per_node: self.walks_per_node,
            dampening: self.dampening,
            row_offsets: self.row_offsets,
            columns: self.columns,
            visits: self.visits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DiGraph;
    use crate::progress::{CancelFlag, NoProgress};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        progress: RefCell<Vec<(usize, usize)>>,
        walks: RefCell<Option<u64>>,
    }

    impl ProgressSink for Recorder {
        fn progress(&self, done: usize, total: usize) {
            self.progress.borrow_mut().push((done, total));
        }
        fn finished(&self, walks: u64) {
            *self.walks.borrow_mut() = Some(walks);
        }
    }

    fn cfg(walks_per_node: usize) -> WalkConfig {
        WalkConfig { walks_per_node, dampening: 0.85, seed: 7 }
    }

    #[test]
    fn build_counts_start_visits_on_diagonal() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3 (dangling)
        let g = DiGraph::from_edges([(0usize, 1usize), (1, 2), (2, 0), (2, 3)]);
        let idx = NodeIndex::from_graph(&g);
        let cache = WalkStatisticsCache::build_with(&g, &idx, cfg(50), &NoProgress).unwrap();
        assert_eq!(cache.dim(), 4);
        assert_eq!(cache.walks_per_node(), 50);
        assert_eq!(cache.dampening(), 0.85);
        for i in 0..4 {
            assert!(cache.get(i, i) >= 50, "diag[{i}]={}", cache.get(i, i));
            assert!(cache.row_sum(i) >= 50);
        }
        // The dangling node never leaves itself.
        assert_eq!(cache.row(3).collect::<Vec<_>>(), vec![(3, 50)]);
        assert!(cache.validate().is_ok());
    }

    #[test]
    fn build_is_reproducible_for_a_seed() {
        let g = DiGraph::from_edges([(0usize, 1usize), (1, 0), (1, 2), (2, 0)]);
        let idx = NodeIndex::from_graph(&g);
        let a = WalkStatisticsCache::build_with(&g, &idx, cfg(30), &NoProgress).unwrap();
        let b = WalkStatisticsCache::build_with(&g, &idx, cfg(30), &NoProgress).unwrap();
        assert_eq!(a, b);

        let mut r1 = ChaCha8Rng::seed_from_u64(5);
        let mut r2 = ChaCha8Rng::seed_from_u64(5);
        let c = WalkStatisticsCache::build_with_rng(&g, &idx, cfg(30), &mut r1, &NoProgress);
        let d = WalkStatisticsCache::build_with_rng(&g, &idx, cfg(30), &mut r2, &NoProgress);
        assert_eq!(c.unwrap(), d.unwrap());
    }

    #[test]
    fn build_reports_progress_in_batches() {
        let g = DiGraph::with_nodes(0..450usize);
        let idx = NodeIndex::from_graph(&g);
        let rec = Recorder::default();
        let cache = WalkStatisticsCache::build_with(&g, &idx, cfg(2), &rec).unwrap();
        assert_eq!(cache.total(), 900);
        assert_eq!(*rec.progress.borrow(), vec![(200, 450), (400, 450), (450, 450)]);
        assert_eq!(*rec.walks.borrow(), Some(900));
    }

    #[test]
    fn build_validates_before_walking() {
        let empty: DiGraph<usize> = DiGraph::new();
        let empty_idx = NodeIndex::from_graph(&empty);
        let err = WalkStatisticsCache::build_with(&empty, &empty_idx, cfg(1), &NoProgress);
        assert!(matches!(err, Err(Error::EmptyGraph(_))));

        let g = DiGraph::from_edges([(0usize, 1usize)]);
        let idx = NodeIndex::from_graph(&g);
        let err = WalkStatisticsCache::build_with(&g, &idx, cfg(0), &NoProgress);
        assert!(matches!(err, Err(Error::InvalidWalkBudget(0))));

        let bad = WalkConfig { dampening: 1.0, ..cfg(1) };
        let err = WalkStatisticsCache::build_with(&g, &idx, bad, &NoProgress);
        assert!(matches!(err, Err(Error::InvalidDampening(_))));

        let other = DiGraph::from_edges([(0usize, 2usize)]);
        let other_idx = NodeIndex::from_graph(&other);
        let err = WalkStatisticsCache::build_with(&g, &other_idx, cfg(1), &NoProgress);
        assert!(matches!(err, Err(Error::NodeIndexMismatch(_))));
    }

    #[test]
    fn cancelled_build_returns_no_cache() {
        let g = DiGraph::from_edges([(0usize, 1usize), (1, 0)]);
        let idx = NodeIndex::from_graph(&g);
        let flag = CancelFlag::new();
        flag.cancel();
        let sink = LogProgress::new().with_cancel(flag);
        let err = WalkStatisticsCache::build_with(&g, &idx, cfg(10), &sink);
        assert!(matches!(err, Err(Error::Cancelled)));
    }

    #[test]
    fn dense_import_and_accessors() {
        let rows = vec![vec![3, 1, 0], vec![0, 2, 5], vec![1, 0, 4]];
        let cache = WalkStatisticsCache::from_dense(&rows, cfg(2)).unwrap();
        assert_eq!(cache.nnz(), 6);
        assert_eq!(cache.get(1, 2), 5);
        assert_eq!(cache.get(0, 2), 0);
        assert_eq!(cache.column_sums(), vec![4, 3, 9]);
        assert_eq!(cache.sum_rows(&[0, 2]), vec![4, 1, 4]);
        assert_eq!(cache.total(), 16);
        assert_eq!(cache.to_dense(), rows);
        assert_eq!(cache.row_offsets(), &[0, 2, 4, 6]);
    }

    #[test]
    fn malformed_imports_are_rejected() {
        let ragged = vec![vec![1, 0], vec![1]];
        assert!(matches!(
            WalkStatisticsCache::from_dense(&ragged, cfg(1)),
            Err(Error::CacheShapeMismatch(_))
        ));

        let unsorted =
            WalkStatisticsCache::from_csr_parts(2, cfg(1), vec![0, 2, 2], vec![1, 0], vec![1, 1]);
        assert!(format!("{}", unsorted.unwrap_err()).contains("unsorted"));

        let out_of_range =
            WalkStatisticsCache::from_csr_parts(2, cfg(1), vec![0, 1, 1], vec![2], vec![1]);
        assert!(matches!(out_of_range, Err(Error::CacheShapeMismatch(_))));

        let short_offsets =
            WalkStatisticsCache::from_csr_parts(2, cfg(1), vec![0, 1], vec![0], vec![1]);
        assert!(matches!(short_offsets, Err(Error::CacheShapeMismatch(_))));

        let ok =
            WalkStatisticsCache::from_csr_parts(2, cfg(1), vec![0, 1, 2], vec![0, 1], vec![1, 1]);
        assert!(ok.unwrap().check_dim(3).is_err());
    }

    #[test]
    fn imports_record_and_check_the_walk_config() {
        let rows = vec![vec![2, 1], vec![0, 2]];
        let cache = WalkStatisticsCache::from_dense(&rows, WalkConfig { dampening: 0.5, ..cfg(2) });
        assert_eq!(cache.unwrap().dampening(), 0.5);

        let bad = WalkConfig { dampening: 1.5, ..cfg(2) };
        assert!(matches!(
            WalkStatisticsCache::from_dense(&rows, bad),
            Err(Error::InvalidDampening(_))
        ));
        assert!(matches!(
            WalkStatisticsCache::from_csr_parts(2, bad, vec![0, 1, 2], vec![0, 1], vec![2, 2]),
            Err(Error::InvalidDampening(_))
        ));
        assert!(matches!(
            WalkStatisticsCache::from_dense(&rows, cfg(0)),
            Err(Error::InvalidWalkBudget(0))
        ));
    }

    #[test]
    fn visits_from_sums_origin_rows() {
        let g = DiGraph::from_edges([("a", "b"), ("b", "c")]);
        let idx = NodeIndex::from_graph(&g);
        let cache =
            WalkStatisticsCache::from_dense(&[vec![2, 1, 0], vec![0, 2, 1], vec![0, 0, 2]], cfg(2))
                .unwrap();
        let v = cache.visits_from(&idx, &["a", "c"]).unwrap();
        assert_eq!(v.get(&"a"), 2);
        assert_eq!(v.get(&"b"), 1);
        assert_eq!(v.get(&"c"), 2);
        assert_eq!(v.get(&"zzz"), 0);
        assert_eq!(v.total(), 5);
        assert!(cache.visits_from(&idx, &["nope"]).is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_build_matches_sequential() {
        let g = DiGraph::from_edges((0..300usize).map(|i| (i, (i * 7 + 1) % 300)));
        let idx = NodeIndex::from_graph(&g);
        let seq = WalkStatisticsCache::build_with(&g, &idx, cfg(5), &NoProgress).unwrap();
        let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let par = pool
            .install(|| WalkStatisticsCache::build_parallel(&g, &idx, cfg(5), &NoProgress))
            .unwrap();
        assert_eq!(seq, par);
    }
}

//! Benchmarks for cache construction and subgraph rank estimation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::SeedableRng;
use std::hint::black_box;
use subrank::{
    scores_from_cache, DiGraph, NoProgress, NodeIndex, SubgraphRankEstimator, SubrankConfig,
    WalkConfig, WalkStatisticsCache,
};

fn ring(n: usize) -> DiGraph<usize> {
    let mut g = DiGraph::with_nodes(0..n);
    for i in 0..n {
        g.add_edge(i, (i + 1) % n);
        g.add_edge(i, (i + n - 1) % n);
    }
    g
}

/// Preferential attachment graph (Barabási–Albert) with `m` edges per new node, both directions.
///
/// Heavy-tailed degrees are closer to real link graphs than a ring.
fn barabasi_albert(n: usize, m: usize, seed: u64) -> DiGraph<usize> {
    assert!(n >= m.max(2));
    assert!(m >= 1);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = DiGraph::with_nodes(0..n);

    // Start with a clique of size m+1.
    let init = m + 1;
    let mut targets: Vec<usize> = Vec::new(); // node ids repeated by degree
    for i in 0..init {
        for j in (i + 1)..init {
            g.add_edge(i, j);
            g.add_edge(j, i);
            targets.push(i);
            targets.push(j);
        }
    }

    for v in init..n {
        let mut chosen: Vec<usize> = Vec::with_capacity(m);
        while chosen.len() < m {
            let u = targets[rng.random_range(0..targets.len())];
            if u != v && !chosen.contains(&u) {
                chosen.push(u);
            }
        }
        for &u in &chosen {
            g.add_edge(v, u);
            g.add_edge(u, v);
            targets.push(u);
            targets.push(v);
        }
    }
    g
}

fn graphs(n: usize) -> [(&'static str, DiGraph<usize>); 2] {
    [("ring", ring(n)), ("ba_m4", barabasi_albert(n, 4, 123))]
}

fn bench_cache_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_build");
    group.sample_size(10);

    // Keep total work bounded.
    let cfg = WalkConfig { walks_per_node: 10, dampening: 0.85, seed: 123 };

    for n in [1_000usize, 5_000] {
        for (name, g) in graphs(n) {
            let index = NodeIndex::from_graph(&g);
            group.bench_with_input(BenchmarkId::new(name, n), &n, |b, _| {
                b.iter(|| {
                    let cache =
                        WalkStatisticsCache::build_with(black_box(&g), &index, cfg, &NoProgress);
                    black_box(cache)
                })
            });
        }
    }

    group.finish();
}

fn bench_subrank(c: &mut Criterion) {
    let mut group = c.benchmark_group("subrank");
    group.sample_size(10);

    let n = 5_000usize;
    let cfg = WalkConfig { walks_per_node: 10, dampening: 0.85, seed: 123 };

    for (name, g) in graphs(n) {
        let index = NodeIndex::from_graph(&g);
        let Ok(cache) = WalkStatisticsCache::build_with(&g, &index, cfg, &NoProgress) else {
            continue;
        };
        let est = match SubgraphRankEstimator::new(&g, &cache, &index, SubrankConfig::default()) {
            Ok(est) => est,
            Err(_) => continue,
        };

        // Reference point: the cache-only estimate over the whole graph.
        group.bench_function(BenchmarkId::new(format!("{name}/whole_graph"), n), |b| {
            b.iter(|| black_box(scores_from_cache(&cache, &index)))
        });

        for frac in [10usize, 50] {
            let keep: Vec<usize> = (0..n * frac / 100).collect();
            let sub = g.induced_subgraph(&keep);
            group.bench_function(BenchmarkId::new(format!("{name}/prefix_{frac}pct"), n), |b| {
                b.iter(|| black_box(est.estimate(black_box(&sub)).map(|run| run.top(10))))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_cache_build, bench_subrank);
criterion_main!(benches);

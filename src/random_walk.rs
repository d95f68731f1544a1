//! Absorbing random walk generation.
//!
//! A walk records its start node, then keeps stepping while a uniform draw in `[0, 1)` stays
//! below the dampening factor and the current node has successors. The stopping time is
//! geometric with parameter `1 - dampening`, further cut short by dangling nodes.

use crate::graph::Graph;
use crate::{validate_dampening, Error, Result};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkConfig {
    /// Walks started from every node (the walk budget `R`).
    pub walks_per_node: usize,
    /// Probability of taking one more step.
    pub dampening: f64,
    pub seed: u64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self { walks_per_node: 10, dampening: 0.85, seed: 42 }
    }
}

impl WalkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.walks_per_node == 0 {
            return Err(Error::InvalidWalkBudget(self.walks_per_node));
        }
        validate_dampening(self.dampening)
    }
}

#[derive(Debug, Clone, Copy)]
enum WalkState<'g, N> {
    Start(&'g N),
    Walking(&'g N),
    Stopped,
}

/// One absorbing walk, yielded node by node (start node first).
///
/// Each instance is independent; the only state shared across walks is the borrowed RNG.
pub struct AbsorbingWalk<'g, 'r, G: Graph, R> {
    graph: &'g G,
    rng: &'r mut R,
    dampening: f64,
    state: WalkState<'g, G::Node>,
}

impl<'g, 'r, G: Graph, R: Rng> AbsorbingWalk<'g, 'r, G, R> {
    pub fn new(graph: &'g G, start: &'g G::Node, dampening: f64, rng: &'r mut R) -> Self {
        Self { graph, rng, dampening, state: WalkState::Start(start) }
    }
}

impl<'g, 'r, G: Graph, R: Rng> Iterator for AbsorbingWalk<'g, 'r, G, R> {
    type Item = &'g G::Node;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            WalkState::Start(start) => {
                self.state = WalkState::Walking(start);
                Some(start)
            }
            WalkState::Walking(current) => {
                if self.rng.random::<f64>() >= self.dampening {
                    self.state = WalkState::Stopped;
                    return None;
                }
                let graph: &'g G = self.graph;
                match graph.successors(current).choose(&mut *self.rng) {
                    Some(next) => {
                        self.state = WalkState::Walking(next);
                        Some(next)
                    }
                    None => {
                        self.state = WalkState::Stopped;
                        None
                    }
                }
            }
            WalkState::Stopped => None,
        }
    }
}

/// Run a single absorbing walk from `start` and return the visited nodes in order.
pub fn absorbing_walk<G: Graph, R: Rng>(
    graph: &G,
    start: &G::Node,
    dampening: f64,
    rng: &mut R,
) -> Vec<G::Node> {
    AbsorbingWalk::new(graph, start, dampening, rng).cloned().collect()
}

/// `walks_per_node` walks from every node, in graph order.
pub fn generate_walks<G: Graph>(graph: &G, config: WalkConfig) -> Vec<Vec<G::Node>> {
    let starts: Vec<G::Node> = graph.nodes().cloned().collect();
    generate_walks_from_nodes(graph, &starts, config)
}

pub fn generate_walks_from_nodes<G: Graph>(
    graph: &G,
    start_nodes: &[G::Node],
    config: WalkConfig,
) -> Vec<Vec<G::Node>> {
    let mut walks = Vec::with_capacity(start_nodes.len() * config.walks_per_node);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    for node in start_nodes {
        for _ in 0..config.walks_per_node {
            walks.push(absorbing_walk(graph, node, config.dampening, &mut rng));
        }
    }
    walks
}

/// Streaming variant of [`generate_walks_from_nodes`]: same walks, one reused buffer.
///
/// `f` sees each walk as a slice that is only valid for the duration of the call.
pub fn for_each_walk_from_nodes<G, F>(
    graph: &G,
    start_nodes: &[G::Node],
    config: WalkConfig,
    mut f: F,
) where
    G: Graph,
    F: FnMut(&[G::Node]),
{
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut buf: Vec<G::Node> = Vec::new();
    for node in start_nodes {
        for _ in 0..config.walks_per_node {
            buf.clear();
            buf.extend(AbsorbingWalk::new(graph, node, config.dampening, &mut rng).cloned());
            f(&buf);
        }
    }
}

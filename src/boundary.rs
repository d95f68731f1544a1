//! Boundary analysis between a base graph and an induced subgraph.
//!
//! Cached walks were simulated on the base graph `G`. Restricting them to a subgraph `S` goes
//! wrong in two places, both on the boundary:
//!
//! - a node `u` of `S` with successors outside `S` branches over `outdeg_G(u)` successors in the
//!   cache but only over `outdeg_S(u)` in `S`, so each of its `S`-successors is under-visited by
//!   `α · visits[u] · (1/outdeg_S(u) − 1/outdeg_G(u))`;
//! - a node `u` outside `S` with successors inside `S` does not exist in `S`, so each of those
//!   successors is over-visited by `α · visits[u] / outdeg_G(u)`.
//!
//! The signed sum per node is rounded (half to even) into a number of walks to add or remove.

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::VisitCounts;
use crate::graph::Graph;
use crate::{validate_dampening, Result};

/// Boundary nodes, both in base-graph order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary<N> {
    /// Subgraph nodes with at least one base-graph successor outside the subgraph.
    pub internal: Vec<N>,
    /// Non-subgraph nodes with at least one base-graph successor inside the subgraph.
    pub external: Vec<N>,
}

pub fn classify<S, G>(sub: &S, base: &G) -> Boundary<S::Node>
where
    S: Graph,
    G: Graph<Node = S::Node>,
{
    let mut internal = Vec::new();
    let mut external = Vec::new();
    for u in base.nodes() {
        let succ = base.successors(u);
        if sub.contains_node(u) {
            if succ.iter().any(|v| !sub.contains_node(v)) {
                internal.push(u.clone());
            }
        } else if succ.iter().any(|v| sub.contains_node(v)) {
            external.push(u.clone());
        }
    }
    Boundary { internal, external }
}

/// Real-valued visit correction per subgraph node (every node of `sub` is present).
///
/// Positive values are visits the cache is missing, negative values are visits it has too many
/// of. An internal boundary node without any subgraph successor contributes nothing.
pub fn correction_deltas<S, G>(
    sub: &S,
    base: &G,
    visits: &VisitCounts<'_, S::Node>,
    dampening: f64,
) -> HashMap<S::Node, f64>
where
    S: Graph,
    G: Graph<Node = S::Node>,
{
    let boundary = classify(sub, base);
    log::debug!(
        "boundary: {} internal, {} external nodes",
        boundary.internal.len(),
        boundary.external.len()
    );

    let mut delta: HashMap<S::Node, f64> = sub.nodes().map(|n| (n.clone(), 0.0)).collect();

    for u in &boundary.internal {
        let deg_s = sub.out_degree(u);
        if deg_s == 0 {
            continue;
        }
        let deg_g = base.out_degree(u);
        let share =
            dampening * visits.get(u) as f64 * (1.0 / deg_s as f64 - 1.0 / deg_g as f64);
        for v in base.successors(u).iter().filter(|v| sub.contains_node(v)) {
            if let Some(d) = delta.get_mut(v) {
                *d += share;
            }
        }
    }

    for u in &boundary.external {
        let share = dampening * visits.get(u) as f64 / base.out_degree(u) as f64;
        for v in base.successors(u).iter().filter(|v| sub.contains_node(v)) {
            if let Some(d) = delta.get_mut(v) {
                *d -= share;
            }
        }
    }

    delta
}

/// Corrective walk counts per subgraph node. At most one side is non-zero for any node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corrections<N: Eq + Hash> {
    positive: HashMap<N, u64>,
    negative: HashMap<N, u64>,
}

impl<N: Clone + Eq + Hash> Corrections<N> {
    /// Net each delta into walks to add or remove (round half to even, then split on sign).
    pub fn from_deltas(deltas: &HashMap<N, f64>) -> Self {
        let mut positive = HashMap::with_capacity(deltas.len());
        let mut negative = HashMap::with_capacity(deltas.len());
        for (node, &d) in deltas {
            let (pos, neg) = net(d);
            positive.insert(node.clone(), pos);
            negative.insert(node.clone(), neg);
        }
        Self { positive, negative }
    }

    /// Walks to add from `node`.
    pub fn positive(&self, node: &N) -> u64 {
        self.positive.get(node).copied().unwrap_or(0)
    }

    /// Walks to remove from `node`.
    pub fn negative(&self, node: &N) -> u64 {
        self.negative.get(node).copied().unwrap_or(0)
    }

    pub fn total_positive(&self) -> u64 {
        self.positive.values().sum()
    }

    pub fn total_negative(&self) -> u64 {
        self.negative.values().sum()
    }

    pub fn total_walks(&self) -> u64 {
        self.total_positive() + self.total_negative()
    }

    pub fn is_empty(&self) -> bool {
        self.total_walks() == 0
    }
}

fn net(delta: f64) -> (u64, u64) {
    let value = delta.round_ties_even();
    if value >= 0.0 {
        (value as u64, 0)
    } else {
        (0, (-value) as u64)
    }
}

/// Boundary corrections for `sub` given the cached visits of subgraph-origin walks.
pub fn analyze<S, G>(
    sub: &S,
    base: &G,
    visits: &VisitCounts<'_, S::Node>,
    dampening: f64,
) -> Result<Corrections<S::Node>>
where
    S: Graph,
    G: Graph<Node = S::Node>,
{
    validate_dampening(dampening)?;
    let deltas = correction_deltas(sub, base, visits, dampening);
    Ok(Corrections::from_deltas(&deltas))
}

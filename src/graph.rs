//! Minimal graph adapter trait plus an adjacency-list implementation.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::{Error, Result};

/// The capability set every walk and boundary computation needs.
///
/// Node identifiers are opaque. Implementations should iterate `nodes()` in a stable order:
/// seeded computations are only reproducible if the order is.
pub trait Graph {
    type Node: Clone + Eq + Hash;

    fn node_count(&self) -> usize;
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;
    fn contains_node(&self, node: &Self::Node) -> bool;

    /// Successors of `node`; empty for dangling or unknown nodes.
    fn successors(&self, node: &Self::Node) -> &[Self::Node];

    fn out_degree(&self, node: &Self::Node) -> usize {
        self.successors(node).len()
    }
    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}

/// Directed, unweighted, multigraph-free graph stored as adjacency lists.
///
/// Nodes iterate in insertion order. Successor lists keep edge insertion order.
#[derive(Debug, Clone)]
pub struct DiGraph<N> {
    nodes: Vec<N>,
    positions: HashMap<N, usize>,
    adj: Vec<Vec<N>>,
}

impl<N: Clone + Eq + Hash> Default for DiGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Eq + Hash> DiGraph<N> {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), positions: HashMap::new(), adj: Vec::new() }
    }

    /// A graph with the given nodes and no edges. Repeated nodes are kept once.
    pub fn with_nodes<I: IntoIterator<Item = N>>(nodes: I) -> Self {
        let mut g = Self::new();
        for n in nodes {
            g.add_node(n);
        }
        g
    }

    pub fn from_edges<I: IntoIterator<Item = (N, N)>>(edges: I) -> Self {
        let mut g = Self::new();
        for (u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    /// Insert `node` if missing; returns its insertion position.
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&pos) = self.positions.get(&node) {
            return pos;
        }
        let pos = self.nodes.len();
        self.positions.insert(node.clone(), pos);
        self.nodes.push(node);
        self.adj.push(Vec::new());
        pos
    }

    /// Insert `source -> target`, adding missing endpoints. Returns false if the edge existed.
    pub fn add_edge(&mut self, source: N, target: N) -> bool {
        let s = self.add_node(source);
        self.add_node(target.clone());
        if self.adj[s].contains(&target) {
            return false;
        }
        self.adj[s].push(target);
        true
    }

    pub fn has_edge(&self, source: &N, target: &N) -> bool {
        self.successors(source).contains(target)
    }

    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }

    /// The subgraph induced by `keep`: those nodes plus every edge between them.
    ///
    /// Node order follows `self`; nodes of `keep` that are not in `self` are ignored.
    pub fn induced_subgraph<'a, I>(&self, keep: I) -> DiGraph<N>
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        let keep: HashSet<&N> = keep.into_iter().collect();
        let mut sub = DiGraph::new();
        for node in self.nodes.iter().filter(|n| keep.contains(n)) {
            sub.add_node(node.clone());
        }
        for (u, succ) in self.nodes.iter().zip(&self.adj) {
            if !keep.contains(u) {
                continue;
            }
            for v in succ.iter().filter(|v| keep.contains(v)) {
                sub.add_edge(u.clone(), v.clone());
            }
        }
        sub
    }
}

impl<N: Clone + Eq + Hash> Graph for DiGraph<N> {
    type Node = N;

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
    fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }
    fn contains_node(&self, node: &N) -> bool {
        self.positions.contains_key(node)
    }
    fn successors(&self, node: &N) -> &[N] {
        self.positions.get(node).map(|&p| self.adj[p].as_slice()).unwrap_or(&[])
    }
}

/// Check that `sub` is a subgraph of `base`: every node and every edge of `sub` exists in `base`.
///
/// This walks every edge of `sub`, so callers on hot paths usually skip it.
pub fn verify_subgraph<S, G>(sub: &S, base: &G) -> Result<()>
where
    S: Graph,
    G: Graph<Node = S::Node>,
{
    for u in sub.nodes() {
        if !base.contains_node(u) {
            return Err(Error::NotASubgraph("subgraph node missing from base graph".to_string()));
        }
        let base_succ = base.successors(u);
        if sub.successors(u).iter().any(|v| !base_succ.contains(v)) {
            return Err(Error::NotASubgraph("subgraph edge missing from base graph".to_string()));
        }
    }
    Ok(())
}

#[cfg(feature = "petgraph")]
impl<N: Clone + Eq + Hash> DiGraph<N> {
    /// Import a directed petgraph graph, using node weights as identifiers.
    ///
    /// Parallel edges collapse into one.
    pub fn from_petgraph<E, Ix>(graph: &petgraph::Graph<N, E, petgraph::Directed, Ix>) -> Self
    where
        Ix: petgraph::graph::IndexType,
    {
        use petgraph::visit::EdgeRef;

        let mut g = Self::new();
        for idx in graph.node_indices() {
            g.add_node(graph[idx].clone());
        }
        for edge in graph.edge_references() {
            g.add_edge(graph[edge.source()].clone(), graph[edge.target()].clone());
        }
        g
    }
}

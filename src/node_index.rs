//! Bijection between a graph's nodes and matrix positions `0..n`.

use std::collections::HashMap;
use std::hash::Hash;

use crate::graph::Graph;
use crate::{Error, Result};

/// Fixed node ordering used to address the rows and columns of a walk-statistics cache.
///
/// Invariant: positions are `0..len()` and every node appears exactly once.
#[derive(Debug, Clone)]
pub struct NodeIndex<N> {
    nodes: Vec<N>,
    positions: HashMap<N, usize>,
}

impl<N: Clone + Eq + Hash> NodeIndex<N> {
    /// Index the graph's nodes in its own iteration order.
    pub fn from_graph<G: Graph<Node = N>>(graph: &G) -> Self {
        let nodes: Vec<N> = graph.nodes().cloned().collect();
        let positions = nodes.iter().enumerate().map(|(i, n)| (n.clone(), i)).collect();
        Self { nodes, positions }
    }

    /// Index an explicit ordering. The ordering must contain exactly the graph's nodes.
    pub fn from_nodelist<G: Graph<Node = N>>(graph: &G, nodelist: Vec<N>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(nodelist.len());
        for (i, n) in nodelist.iter().enumerate() {
            if positions.insert(n.clone(), i).is_some() {
                return Err(Error::NodeIndexMismatch(format!(
                    "duplicate node at position {i}"
                )));
            }
        }
        let index = Self { nodes: nodelist, positions };
        index.check_matches(graph)?;
        Ok(index)
    }

    /// Fails unless this index's node set equals the graph's node set.
    pub fn check_matches<G: Graph<Node = N>>(&self, graph: &G) -> Result<()> {
        if self.nodes.len() != graph.node_count() {
            return Err(Error::NodeIndexMismatch(format!(
                "index has {} nodes, graph has {}",
                self.nodes.len(),
                graph.node_count()
            )));
        }
        if graph.nodes().any(|n| !self.positions.contains_key(n)) {
            return Err(Error::NodeIndexMismatch(
                "graph node missing from index".to_string(),
            ));
        }
        Ok(())
    }

    pub fn position(&self, node: &N) -> Option<usize> {
        self.positions.get(node).copied()
    }

    pub fn node(&self, position: usize) -> Option<&N> {
        self.nodes.get(position)
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Positions of `nodes`, failing on the first node this index does not know.
    pub fn positions_of<'a, I>(&self, nodes: I) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        nodes
            .into_iter()
            .map(|n| {
                self.position(n).ok_or_else(|| {
                    Error::NodeIndexMismatch("node missing from index".to_string())
                })
            })
            .collect()
    }
}

//! # Topological Ranking
//!
//! Kahn's algorithm, producing ranks (levels) rather than one flat order.
//!
//! Only one-way edges constrain the order: an edge that can be crossed in
//! both directions (undirected, extraverted, introverted) says nothing about
//! which endpoint comes first. A one-way self-loop makes its node unrankable.

use crate::graph::GraphStore;
use crate::NodeId;
use std::collections::{BTreeMap, BTreeSet};

/// Ranks nodes into dependency levels.
pub struct TopologicalSorter;

impl TopologicalSorter {
    /// Peel the graph into ranks.
    ///
    /// Rank 0 holds every node nothing points into; rank `k + 1` holds the
    /// nodes whose constraints all come from ranks `0..=k`. Returns `None`
    /// when a directed cycle leaves nodes that can never be peeled.
    pub fn rank<G>(graph: &G) -> Option<Vec<BTreeSet<NodeId>>>
    where
        G: GraphStore + ?Sized,
    {
        let (mut in_degree, successors) = Self::constraints(graph);

        let mut ranks = Vec::new();
        let mut current: BTreeSet<NodeId> = in_degree
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(node, _)| *node)
            .collect();
        let mut remaining = in_degree.len();

        while !current.is_empty() {
            remaining -= current.len();
            let mut next = BTreeSet::new();
            for node in &current {
                for successor in successors.get(node).into_iter().flatten() {
                    if let Some(count) = in_degree.get_mut(successor) {
                        *count = count.saturating_sub(1);
                        if *count == 0 {
                            next.insert(*successor);
                        }
                    }
                }
            }
            ranks.push(current);
            current = next;
        }

        (remaining == 0).then_some(ranks)
    }

    /// Every node in rank order; within a rank, by ascending `NodeId`.
    pub fn sort<G>(graph: &G) -> Option<Vec<NodeId>>
    where
        G: GraphStore + ?Sized,
    {
        Self::rank(graph).map(|ranks| ranks.into_iter().flatten().collect())
    }

    /// Per-node count of constraining in-edges, and the successor list
    /// each constraint points to (one entry per edge).
    fn constraints<G>(graph: &G) -> (BTreeMap<NodeId, usize>, BTreeMap<NodeId, Vec<NodeId>>)
    where
        G: GraphStore + ?Sized,
    {
        let mut in_degree: BTreeMap<NodeId, usize> =
            graph.node_ids().into_iter().map(|node| (node, 0)).collect();
        let mut successors: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();

        for edge_id in graph.edge_ids() {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let (left, right) = edge.endpoints();
            let forward = edge.traversable_from(left) == Some(right);
            let backward = edge.traversable_from(right) == Some(left);

            let (from, to) = match (forward, backward) {
                (true, false) => (left, right),
                (false, true) => (right, left),
                (true, true) if left == right && edge.is_directed() => (left, right),
                _ => continue,
            };
            *in_degree.entry(to).or_insert(0) += 1;
            successors.entry(from).or_default().push(to);
        }

        (in_degree, successors)
    }
}

// =============================================================================
// TESTS
// =============================================================================

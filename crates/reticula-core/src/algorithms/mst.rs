//! # Minimum Spanning Tree
//!
//! Prim's algorithm over the underlying undirected graph: edge direction is
//! ignored and self-loops never join the tree. Unweighted edges count as
//! `1.0`.

use crate::graph::GraphStore;
use crate::{EdgeId, GraphError, NodeId};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

/// Edge subset of a minimum spanning tree.
///
/// Wrap it with `Graph::spanning_subgraph` when tree invariants have to be
/// checked on a graph value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningTree {
    /// Tree edges in the order Prim added them.
    pub edges: Vec<EdgeId>,
    /// Sum of their weights.
    pub total_weight: f64,
}

/// Prim's minimum spanning tree.
pub struct PrimMinimumSpanningTree;

impl PrimMinimumSpanningTree {
    /// Grow a minimum spanning tree from the smallest node id.
    ///
    /// A graph that is not weakly connected is `GraphError::NotConnected`.
    /// The empty graph yields an empty tree.
    pub fn find<G>(graph: &G) -> Result<SpanningTree, GraphError>
    where
        G: GraphStore + ?Sized,
    {
        let node_ids = graph.node_ids();
        let Some(&seed) = node_ids.first() else {
            return Ok(SpanningTree {
                edges: Vec::new(),
                total_weight: 0.0,
            });
        };

        let mut in_tree = BTreeSet::from([seed]);
        let mut frontier = BinaryHeap::new();
        let mut tree = SpanningTree {
            edges: Vec::new(),
            total_weight: 0.0,
        };
        Self::push_crossing(graph, seed, &in_tree, &mut frontier);

        while let Some(Reverse((weight, edge_id, target))) = frontier.pop() {
            if in_tree.contains(&target) {
                continue;
            }
            in_tree.insert(target);
            tree.edges.push(edge_id);
            tree.total_weight += weight.0;
            Self::push_crossing(graph, target, &in_tree, &mut frontier);
        }

        if in_tree.len() < node_ids.len() {
            return Err(GraphError::NotConnected);
        }
        Ok(tree)
    }

    /// Queue every edge from `node` to a node still outside the tree.
    fn push_crossing<G>(
        graph: &G,
        node: NodeId,
        in_tree: &BTreeSet<NodeId>,
        frontier: &mut BinaryHeap<Reverse<(OrderedFloat<f64>, EdgeId, NodeId)>>,
    ) where
        G: GraphStore + ?Sized,
    {
        for edge_id in graph.adjacent_edges(node) {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let Some(target) = edge.opposite(node) else {
                continue;
            };
            if target == node || in_tree.contains(&target) {
                continue;
            }
            frontier.push(Reverse((
                OrderedFloat(edge.weight_or_unit()),
                edge_id,
                target,
            )));
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Hill Climbing
//!
//! Deterministic steepest ascent from one start node: at each step move to
//! the heaviest traversable neighbor if it is strictly heavier than the
//! current node, otherwise stop. No randomness, no restarts.

use crate::graph::GraphStore;
use crate::traversal::ensure_member;
use crate::{GraphError, NodeId, Weighted};
use std::collections::BTreeSet;

/// Single-ascent local search over node weights.
pub struct HillClimbingSearch;

impl HillClimbingSearch {
    /// Climb using the node payloads' own [`Weighted`] values.
    pub fn search<G>(graph: &G, start: NodeId) -> Result<Option<NodeId>, GraphError>
    where
        G: GraphStore + ?Sized,
        G::Node: Weighted,
    {
        Self::search_by(graph, start, |_, payload| payload.weight())
    }

    /// Climb using a caller-supplied weight accessor.
    ///
    /// Returns the local optimum, or `None` when the ascent leads back to a
    /// node it already visited (the start included). Ties between equally
    /// heavy neighbors go to the smallest `NodeId`.
    pub fn search_by<G, F>(graph: &G, start: NodeId, mut weigh: F) -> Result<Option<NodeId>, GraphError>
    where
        G: GraphStore + ?Sized,
        F: FnMut(NodeId, &G::Node) -> f64,
    {
        ensure_member(graph, start)?;
        let mut weight_of = |node: NodeId| graph.node(node).map(|payload| weigh(node, payload));

        let mut visited = BTreeSet::from([start]);
        let mut current = start;
        let Some(mut current_weight) = weight_of(start) else {
            return Err(GraphError::NodeNotFound(start));
        };

        loop {
            let mut best: Option<(NodeId, f64)> = None;
            for neighbor in graph.traversable_nodes(current) {
                if neighbor == current {
                    continue;
                }
                let Some(weight) = weight_of(neighbor) else {
                    continue;
                };
                if best.is_none_or(|(_, heaviest)| weight > heaviest) {
                    best = Some((neighbor, weight));
                }
            }

            match best {
                Some((next, weight)) if weight > current_weight => {
                    if !visited.insert(next) {
                        return Ok(None);
                    }
                    current = next;
                    current_weight = weight;
                }
                _ => return Ok(Some(current)),
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

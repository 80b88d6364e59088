//! # Shortest Paths
//!
//! Two single-source path finders with different weight models:
//! - [`DijkstraPathFinder`]: non-negative weights only, stops as soon as the
//!   target is settled.
//! - [`BellmanFordPathFinder`]: accepts negative weights, relaxes every edge
//!   up to `|V| - 1` times and reports reachable negative cycles.
//!
//! Both walk traversable edges only, read weights through
//! [`crate::Edge::weight_or_unit`], and treat `+inf` edges as absent.
//! `begin == end` is an invalid argument, not a zero-length walk; an
//! unreachable target is `Ok(None)`.

use crate::graph::GraphStore;
use crate::traversal::ensure_member;
use crate::{EdgeId, GraphError, NodeId, Walk};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

/// Best known way to reach a node: accumulated weight and the
/// `(edge, previous node)` it was reached through.
type Predecessors = BTreeMap<NodeId, (f64, Option<(EdgeId, NodeId)>)>;

/// Shared argument checks.
fn validate<G>(graph: &G, begin: NodeId, end: NodeId) -> Result<(), GraphError>
where
    G: GraphStore + ?Sized,
{
    ensure_member(graph, begin)?;
    ensure_member(graph, end)?;
    if begin == end {
        return Err(GraphError::InvalidArgument(format!(
            "path begin and end are the same node ({begin})"
        )));
    }
    Ok(())
}

/// Walk predecessor links back from `end` and reverse them.
fn reconstruct(best: &Predecessors, begin: NodeId, end: NodeId) -> Option<Walk> {
    let (total_weight, _) = *best.get(&end)?;
    let mut nodes = vec![end];
    let mut edges = Vec::new();
    let mut current = end;

    while current != begin {
        let (_, link) = best.get(&current)?;
        let (edge, previous) = (*link)?;
        edges.push(edge);
        nodes.push(previous);
        current = previous;
        if edges.len() > best.len() {
            // Predecessor links never loop in a settled search.
            return None;
        }
    }

    nodes.reverse();
    edges.reverse();
    Some(Walk::new(nodes, edges, total_weight))
}

// =============================================================================
// DIJKSTRA
// =============================================================================

/// Frontier entry, ordered so `BinaryHeap` pops the lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    cost: OrderedFloat<f64>,
    node: NodeId,
}

impl Ord for Step {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Step {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm with early exit.
pub struct DijkstraPathFinder;

impl DijkstraPathFinder {
    /// Lightest walk from `begin` to `end`.
    ///
    /// Any negative edge weight in the graph is `GraphError::NegativeWeight`,
    /// checked before the search starts.
    pub fn find_path<G>(graph: &G, begin: NodeId, end: NodeId) -> Result<Option<Walk>, GraphError>
    where
        G: GraphStore + ?Sized,
    {
        validate(graph, begin, end)?;
        for edge_id in graph.edge_ids() {
            if let Some(edge) = graph.edge(edge_id) {
                let weight = edge.weight_or_unit();
                if weight < 0.0 {
                    return Err(GraphError::NegativeWeight {
                        edge: edge_id,
                        weight,
                    });
                }
            }
        }

        let mut best: Predecessors = BTreeMap::from([(begin, (0.0, None))]);
        let mut frontier = BinaryHeap::from([Step {
            cost: OrderedFloat(0.0),
            node: begin,
        }]);

        while let Some(Step { cost, node }) = frontier.pop() {
            if node == end {
                return Ok(reconstruct(&best, begin, end));
            }
            if best.get(&node).is_some_and(|(known, _)| cost.0 > *known) {
                continue;
            }

            for edge_id in graph.traversable_edges(node) {
                let Some(edge) = graph.edge(edge_id) else {
                    continue;
                };
                let Some(next) = edge.traversable_from(node) else {
                    continue;
                };
                if edge.is_infinite() {
                    continue;
                }
                let candidate = cost.0 + edge.weight_or_unit();
                let improves = best
                    .get(&next)
                    .is_none_or(|(known, _)| candidate < *known);
                if improves {
                    best.insert(next, (candidate, Some((edge_id, node))));
                    frontier.push(Step {
                        cost: OrderedFloat(candidate),
                        node: next,
                    });
                }
            }
        }

        Ok(None)
    }
}

// =============================================================================
// BELLMAN-FORD
// =============================================================================

/// Bellman-Ford relaxation.
pub struct BellmanFordPathFinder;

impl BellmanFordPathFinder {
    /// Lightest walk from `begin` to `end`, negative weights allowed.
    ///
    /// A negative weight on an edge that can be crossed both ways (other
    /// than a self-loop) is `GraphError::NegativeWeight`: crossing it and
    /// straight back is not a cycle, yet every such walk would get lighter.
    pub fn find_path<G>(graph: &G, begin: NodeId, end: NodeId) -> Result<Option<Walk>, GraphError>
    where
        G: GraphStore + ?Sized,
    {
        validate(graph, begin, end)?;
        let best = Self::relax(graph, begin)?;
        Ok(reconstruct(&best, begin, end))
    }

    /// Weight of the lightest walk from `begin` to every node it reaches,
    /// `begin` itself included at `0.0`.
    pub fn distances<G>(graph: &G, begin: NodeId) -> Result<BTreeMap<NodeId, f64>, GraphError>
    where
        G: GraphStore + ?Sized,
    {
        ensure_member(graph, begin)?;
        let best = Self::relax(graph, begin)?;
        Ok(best
            .into_iter()
            .map(|(node, (distance, _))| (node, distance))
            .collect())
    }

    fn relax<G>(graph: &G, begin: NodeId) -> Result<Predecessors, GraphError>
    where
        G: GraphStore + ?Sized,
    {
        // Each usable crossing once per direction: (from, to, edge, weight).
        let mut crossings = Vec::new();
        for edge_id in graph.edge_ids() {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            if edge.is_infinite() {
                continue;
            }
            let (left, right) = edge.endpoints();
            let weight = edge.weight_or_unit();
            let forward = edge.traversable_from(left) == Some(right);
            let backward = left != right && edge.traversable_from(right) == Some(left);
            if forward && backward && weight < 0.0 {
                return Err(GraphError::NegativeWeight {
                    edge: edge_id,
                    weight,
                });
            }
            if forward {
                crossings.push((left, right, edge_id, weight));
            }
            if backward {
                crossings.push((right, left, edge_id, weight));
            }
        }

        let mut best: Predecessors = BTreeMap::from([(begin, (0.0, None))]);
        let passes = graph.node_count().saturating_sub(1);

        for _ in 0..passes {
            if !Self::relax_once(&crossings, &mut best) {
                return Ok(best);
            }
        }

        if Self::relax_once(&crossings, &mut best) {
            return Err(GraphError::NegativeCycle(begin));
        }
        Ok(best)
    }

    /// One pass over every crossing; `true` if any distance improved.
    fn relax_once(crossings: &[(NodeId, NodeId, EdgeId, f64)], best: &mut Predecessors) -> bool {
        let mut changed = false;
        for &(from, to, edge, weight) in crossings {
            let Some(&(distance, _)) = best.get(&from) else {
                continue;
            };
            let candidate = distance + weight;
            let improves = best.get(&to).is_none_or(|(known, _)| candidate < *known);
            if improves {
                best.insert(to, (candidate, Some((edge, from))));
                changed = true;
            }
        }
        changed
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Traversal
//!
//! Breadth-first and depth-first walks plus the connectivity queries built
//! on them. Walks follow edge direction (`traversable_nodes`); component
//! and weak-connectivity queries ignore it (`adjacent_nodes`).
//!
//! Neighbors are always visited in ascending `NodeId` order, so every
//! result here is deterministic.

use crate::graph::{GraphStore, StructuralProperty};
use crate::{GraphError, NodeId};
use std::collections::{BTreeSet, VecDeque};

/// Stateless traversal routines over any [`GraphStore`].
pub struct Traversal;

impl Traversal {
    /// Nodes reachable from `start`, in breadth-first order.
    pub fn breadth_first<G>(graph: &G, start: NodeId) -> Result<Vec<NodeId>, GraphError>
    where
        G: GraphStore + ?Sized,
    {
        Self::within_depth(graph, start, usize::MAX)
    }

    /// Breadth-first walk that stops expanding at `depth` hops from `start`.
    pub fn within_depth<G>(
        graph: &G,
        start: NodeId,
        depth: usize,
    ) -> Result<Vec<NodeId>, GraphError>
    where
        G: GraphStore + ?Sized,
    {
        ensure_member(graph, start)?;

        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        let mut order = Vec::new();

        queue.push_back((start, 0usize));
        visited.insert(start);

        while let Some((current, current_depth)) = queue.pop_front() {
            order.push(current);

            if current_depth >= depth {
                continue;
            }

            for neighbor in graph.traversable_nodes(current) {
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, current_depth.saturating_add(1)));
                }
            }
        }

        Ok(order)
    }

    /// Nodes reachable from `start`, in depth-first preorder.
    pub fn depth_first<G>(graph: &G, start: NodeId) -> Result<Vec<NodeId>, GraphError>
    where
        G: GraphStore + ?Sized,
    {
        ensure_member(graph, start)?;

        let mut visited = BTreeSet::new();
        let mut stack = vec![start];
        let mut order = Vec::new();

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            order.push(current);

            // Reverse so the smallest neighbor is expanded first.
            for neighbor in graph.traversable_nodes(current).into_iter().rev() {
                if !visited.contains(&neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        Ok(order)
    }

    /// Whether a directed walk leads from `from` to `to`.
    pub fn is_reachable<G>(graph: &G, from: NodeId, to: NodeId) -> Result<bool, GraphError>
    where
        G: GraphStore + ?Sized,
    {
        ensure_member(graph, to)?;
        Ok(Self::breadth_first(graph, from)?.contains(&to))
    }

    /// Partition of the node set into weakly connected components, each
    /// listed by ascending smallest member.
    pub fn weakly_connected_components<G>(graph: &G) -> Vec<BTreeSet<NodeId>>
    where
        G: GraphStore + ?Sized,
    {
        let mut assigned = BTreeSet::new();
        let mut components = Vec::new();

        for seed in graph.node_ids() {
            if assigned.contains(&seed) {
                continue;
            }
            let mut component = BTreeSet::new();
            let mut queue = VecDeque::from([seed]);
            assigned.insert(seed);

            while let Some(current) = queue.pop_front() {
                component.insert(current);
                for neighbor in graph.adjacent_nodes(current) {
                    if assigned.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
            components.push(component);
        }

        components
    }

    /// Whether the graph is connected when direction is ignored.
    /// The empty graph counts as connected.
    pub fn is_weakly_connected<G>(graph: &G) -> bool
    where
        G: GraphStore + ?Sized,
    {
        if let Some(known) = graph.known(StructuralProperty::WeaklyConnected) {
            return known;
        }
        Self::weakly_connected_components(graph).len() <= 1
    }
}

/// Fail with `NodeNotFound` unless `node` belongs to `graph`.
pub(crate) fn ensure_member<G>(graph: &G, node: NodeId) -> Result<(), GraphError>
where
    G: GraphStore + ?Sized,
{
    if graph.contains_node(node) {
        Ok(())
    } else {
        Err(GraphError::NodeNotFound(node))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, Graph};

    /// a -> b -> c, a -> d, plus an isolated e.
    fn sample() -> Graph {
        Graph::from_parts(
            [(), (), (), (), ()],
            [
                Edge::directed(NodeId(0), NodeId(1), ()),
                Edge::directed(NodeId(1), NodeId(2), ()),
                Edge::directed(NodeId(0), NodeId(3), ()),
            ],
        )
        .expect("graph")
    }

    #[test]
    fn breadth_first_visits_by_layers() {
        let graph = sample();
        let order = Traversal::breadth_first(&graph, NodeId(0)).expect("bfs");
        assert_eq!(order, vec![NodeId(0), NodeId(1), NodeId(3), NodeId(2)]);
    }

    #[test]
    fn depth_first_follows_smallest_branch_first() {
        let graph = sample();
        let order = Traversal::depth_first(&graph, NodeId(0)).expect("dfs");
        assert_eq!(order, vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3)]);
    }

    #[test]
    fn within_depth_stops_expanding() {
        let graph = sample();
        let order = Traversal::within_depth(&graph, NodeId(0), 1).expect("bfs");
        assert_eq!(order, vec![NodeId(0), NodeId(1), NodeId(3)]);
    }

    #[test]
    fn walks_respect_direction() {
        let graph = sample();
        let order = Traversal::breadth_first(&graph, NodeId(2)).expect("bfs");
        assert_eq!(order, vec![NodeId(2)]);
        assert!(Traversal::is_reachable(&graph, NodeId(0), NodeId(2)).expect("reach"));
        assert!(!Traversal::is_reachable(&graph, NodeId(2), NodeId(0)).expect("reach"));
    }

    #[test]
    fn missing_start_is_fatal() {
        let graph = sample();
        assert!(matches!(
            Traversal::breadth_first(&graph, NodeId(99)),
            Err(GraphError::NodeNotFound(NodeId(99)))
        ));
    }

    #[test]
    fn components_ignore_direction() {
        let graph = sample();
        let components = Traversal::weakly_connected_components(&graph);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].len(), 4);
        assert!(components[1].contains(&NodeId(4)));
        assert!(!Traversal::is_weakly_connected(&graph));
    }

    #[test]
    fn empty_graph_is_weakly_connected() {
        let graph: Graph = Graph::new();
        assert!(Traversal::is_weakly_connected(&graph));
        assert!(Traversal::weakly_connected_components(&graph).is_empty());
    }
}

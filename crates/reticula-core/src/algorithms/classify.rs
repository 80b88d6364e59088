//! # Tree Classification
//!
//! Tree and forest predicates built from the traversal, cycle and ranking
//! primitives. Every predicate asks the graph first
//! ([`GraphStore::known`]) and only falls back to the generic check when
//! the graph does not know the answer.
//!
//! Acyclicity is [`CycleDetector::is_acyclic`]: a directed diamond (two
//! paths to one sink) is a tree. The `is_undirected_*` variants ignore
//! direction and reject it.

use crate::algorithms::{CycleDetector, TopologicalSorter};
use crate::graph::{GraphStore, StructuralProperty};
use crate::traversal::Traversal;
use crate::{GraphError, NodeId};
use std::collections::BTreeSet;

/// Structural predicates for trees, forests and their rooted forms.
pub struct TreeClassifier;

impl TreeClassifier {
    /// No self-loops and no two edges joining the same pair of nodes.
    pub fn is_simple<G>(graph: &G) -> bool
    where
        G: GraphStore + ?Sized,
    {
        if let Some(known) = graph.known(StructuralProperty::Simple) {
            return known;
        }

        let mut pairs = BTreeSet::new();
        for edge_id in graph.edge_ids() {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let (left, right) = edge.endpoints();
            if left == right || !pairs.insert((left.min(right), left.max(right))) {
                return false;
            }
        }
        true
    }

    pub fn is_weakly_connected<G>(graph: &G) -> bool
    where
        G: GraphStore + ?Sized,
    {
        if let Some(known) = graph.known(StructuralProperty::WeaklyConnected) {
            return known;
        }
        Traversal::is_weakly_connected(graph)
    }

    /// Weakly connected, acyclic and simple.
    pub fn is_tree<G>(graph: &G) -> bool
    where
        G: GraphStore + ?Sized,
    {
        if let Some(known) = graph.known(StructuralProperty::Tree) {
            return known;
        }
        Self::is_weakly_connected(graph) && CycleDetector::is_acyclic(graph) && Self::is_simple(graph)
    }

    /// Acyclic and simple; connectivity not required.
    pub fn is_forest<G>(graph: &G) -> bool
    where
        G: GraphStore + ?Sized,
    {
        if let Some(known) = graph.known(StructuralProperty::Forest) {
            return known;
        }
        CycleDetector::is_acyclic(graph) && Self::is_simple(graph)
    }

    /// Tree of the underlying undirected graph: direction is ignored.
    pub fn is_undirected_tree<G>(graph: &G) -> bool
    where
        G: GraphStore + ?Sized,
    {
        Self::is_weakly_connected(graph) && CycleDetector::is_weakly_acyclic(graph)
    }

    /// Forest of the underlying undirected graph. Parallel edges and
    /// self-loops are cycles there, so no separate simplicity check.
    pub fn is_undirected_forest<G>(graph: &G) -> bool
    where
        G: GraphStore + ?Sized,
    {
        CycleDetector::is_weakly_acyclic(graph)
    }

    /// Whether `sub` is connected and acyclic over a subset of `graph`'s
    /// nodes. A `sub` that knows it is a tree skips both checks.
    pub fn is_spanning_tree<G, S>(graph: &G, sub: &S) -> bool
    where
        G: GraphStore + ?Sized,
        S: GraphStore + ?Sized,
    {
        let within = sub
            .node_ids()
            .into_iter()
            .all(|node| graph.contains_node(node));
        if !within {
            return false;
        }
        if sub.known(StructuralProperty::Tree) == Some(true) {
            return true;
        }
        Self::is_weakly_connected(sub) && CycleDetector::is_acyclic(sub)
    }

    /// A tree with a single root: exactly one node nothing points into.
    /// Graphs with zero or one node qualify.
    pub fn is_rooted_tree<G>(graph: &G) -> bool
    where
        G: GraphStore + ?Sized,
    {
        if let Some(known) = graph.known(StructuralProperty::RootedTree) {
            return known;
        }
        if !Self::is_tree(graph) {
            return false;
        }
        if graph.node_count() <= 1 {
            return true;
        }
        Self::sources(graph).is_some_and(|sources| sources.len() == 1)
    }

    /// A forest whose every weakly connected component is a rooted tree.
    pub fn is_rooted_forest<G>(graph: &G) -> bool
    where
        G: GraphStore + ?Sized,
    {
        if let Some(known) = graph.known(StructuralProperty::RootedForest) {
            return known;
        }
        if !Self::is_forest(graph) {
            return false;
        }
        let Some(sources) = Self::sources(graph) else {
            return false;
        };
        Traversal::weakly_connected_components(graph)
            .iter()
            .all(|component| component.intersection(&sources).count() == 1)
    }

    /// Only graphs that track their own shape can answer this; there is no
    /// generic fallback.
    pub fn is_polytree<G>(graph: &G) -> Result<bool, GraphError>
    where
        G: GraphStore + ?Sized,
    {
        graph
            .known(StructuralProperty::Polytree)
            .ok_or(GraphError::Unsupported("is_polytree"))
    }

    /// First topological rank, or `None` for an unrankable graph.
    fn sources<G>(graph: &G) -> Option<BTreeSet<NodeId>>
    where
        G: GraphStore + ?Sized,
    {
        TopologicalSorter::rank(graph).map(|ranks| ranks.into_iter().next().unwrap_or_default())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, Graph, TreeGraph};

    fn n(id: u64) -> NodeId {
        NodeId(id)
    }

    fn graph_of(nodes: usize, edges: Vec<Edge>) -> Graph {
        Graph::from_parts(vec![(); nodes], edges).expect("graph")
    }

    #[test]
    fn path_is_a_tree() {
        let graph = graph_of(
            3,
            vec![Edge::undirected(n(0), n(1), ()), Edge::undirected(n(1), n(2), ())],
        );
        assert!(TreeClassifier::is_simple(&graph));
        assert!(TreeClassifier::is_tree(&graph));
        assert!(TreeClassifier::is_forest(&graph));
        // Undirected edges give no root.
        assert!(!TreeClassifier::is_rooted_tree(&graph));
    }

    #[test]
    fn parallel_edges_are_not_simple() {
        let graph = graph_of(
            2,
            vec![Edge::undirected(n(0), n(1), ()), Edge::undirected(n(1), n(0), ())],
        );
        assert!(!TreeClassifier::is_simple(&graph));
        assert!(!TreeClassifier::is_tree(&graph));
    }

    #[test]
    fn self_loop_is_not_simple() {
        let graph = graph_of(1, vec![Edge::undirected(n(0), n(0), ())]);
        assert!(!TreeClassifier::is_simple(&graph));
        assert!(!TreeClassifier::is_forest(&graph));
    }

    #[test]
    fn two_components_form_a_forest_not_a_tree() {
        let graph = graph_of(
            4,
            vec![Edge::directed(n(0), n(1), ()), Edge::directed(n(2), n(3), ())],
        );
        assert!(!TreeClassifier::is_tree(&graph));
        assert!(TreeClassifier::is_forest(&graph));
        assert!(TreeClassifier::is_rooted_forest(&graph));
        assert!(!TreeClassifier::is_rooted_tree(&graph));
    }

    #[test]
    fn out_tree_is_rooted() {
        let graph = graph_of(
            4,
            vec![
                Edge::directed(n(0), n(1), ()),
                Edge::directed(n(0), n(2), ()),
                Edge::directed(n(2), n(3), ()),
            ],
        );
        assert!(TreeClassifier::is_rooted_tree(&graph));
        assert!(TreeClassifier::is_rooted_forest(&graph));
    }

    #[test]
    fn converging_edges_have_two_roots() {
        let graph = graph_of(
            3,
            vec![Edge::directed(n(0), n(2), ()), Edge::directed(n(1), n(2), ())],
        );
        assert!(TreeClassifier::is_tree(&graph));
        assert!(!TreeClassifier::is_rooted_tree(&graph));
        assert!(!TreeClassifier::is_rooted_forest(&graph));
    }

    #[test]
    fn directed_diamond_is_a_tree_but_not_an_undirected_one() {
        let graph = graph_of(
            4,
            vec![
                Edge::directed(n(0), n(1), ()),
                Edge::directed(n(0), n(2), ()),
                Edge::directed(n(1), n(3), ()),
                Edge::directed(n(2), n(3), ()),
            ],
        );
        assert!(CycleDetector::is_acyclic(&graph));
        assert!(TreeClassifier::is_simple(&graph));
        assert!(TreeClassifier::is_tree(&graph));
        assert!(TreeClassifier::is_forest(&graph));
        assert!(TreeClassifier::is_rooted_tree(&graph));

        assert!(!TreeClassifier::is_undirected_tree(&graph));
        assert!(!TreeClassifier::is_undirected_forest(&graph));
    }

    #[test]
    fn directed_cycle_is_neither_tree_nor_forest() {
        let graph = graph_of(
            3,
            vec![
                Edge::directed(n(0), n(1), ()),
                Edge::directed(n(1), n(2), ()),
                Edge::directed(n(2), n(0), ()),
            ],
        );
        assert!(TreeClassifier::is_simple(&graph));
        assert!(!TreeClassifier::is_tree(&graph));
        assert!(!TreeClassifier::is_forest(&graph));
    }

    #[test]
    fn undirected_variants_match_on_undirected_graphs() {
        let path = graph_of(
            3,
            vec![Edge::undirected(n(0), n(1), ()), Edge::undirected(n(1), n(2), ())],
        );
        assert!(TreeClassifier::is_undirected_tree(&path));
        assert!(TreeClassifier::is_undirected_forest(&path));

        let doubled = graph_of(
            2,
            vec![Edge::undirected(n(0), n(1), ()), Edge::undirected(n(0), n(1), ())],
        );
        assert!(!TreeClassifier::is_undirected_forest(&doubled));
        assert!(!TreeClassifier::is_forest(&doubled));
    }

    #[test]
    fn trivial_graphs_are_rooted_trees() {
        let empty: Graph = Graph::new();
        assert!(TreeClassifier::is_tree(&empty));
        assert!(TreeClassifier::is_rooted_tree(&empty));

        let single = graph_of(1, Vec::new());
        assert!(TreeClassifier::is_rooted_tree(&single));
        assert!(TreeClassifier::is_rooted_forest(&single));
    }

    #[test]
    fn spanning_tree_of_a_cycle() {
        let graph = graph_of(
            3,
            vec![
                Edge::undirected(n(0), n(1), ()),
                Edge::undirected(n(1), n(2), ()),
                Edge::undirected(n(2), n(0), ()),
            ],
        );
        let sub = graph
            .spanning_subgraph([crate::EdgeId(0), crate::EdgeId(1)])
            .expect("subgraph");
        assert!(TreeClassifier::is_spanning_tree(&graph, &sub));
        assert!(!TreeClassifier::is_spanning_tree(&graph, &graph));

        let foreign = graph_of(5, Vec::new());
        assert!(!TreeClassifier::is_spanning_tree(&graph, &foreign));
    }

    #[test]
    fn spanning_tree_asks_a_hierarchy_first() {
        let mut tree: TreeGraph = TreeGraph::new();
        let root = tree.add_root(()).applied().expect("root");
        let child = tree.add_child(root, (), ()).expect("valid").applied().expect("child");
        let _ = tree.add_child(child, (), ()).expect("valid").applied().expect("leaf");
        let host = graph_of(3, Vec::new());

        assert_eq!(tree.known(StructuralProperty::Tree), Some(true));
        assert!(TreeClassifier::is_spanning_tree(&host, &tree));

        // Membership is still checked: a smaller host does not contain the leaf.
        let small = graph_of(2, Vec::new());
        assert!(!TreeClassifier::is_spanning_tree(&small, &tree));
    }

    #[test]
    fn polytree_needs_a_graph_that_knows() {
        let graph = graph_of(2, vec![Edge::directed(n(0), n(1), ())]);
        assert!(matches!(
            TreeClassifier::is_polytree(&graph),
            Err(GraphError::Unsupported(_))
        ));

        let mut tree: TreeGraph = TreeGraph::new();
        let root = tree.add_root(()).applied().expect("root");
        let _ = tree.add_child(root, (), ()).expect("valid").applied().expect("child");
        assert!(TreeClassifier::is_polytree(&tree).expect("known"));
        assert!(TreeClassifier::is_rooted_tree(&tree));
    }
}

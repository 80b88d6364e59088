//! # Tree-Backed Graph
//!
//! A hierarchy container: every edge is a directed parent → child edge and
//! each node has at most one parent, so the graph is always a rooted forest.
//!
//! The container caches each child's parent and keeps that cache in step
//! with every successful mutation. Because it knows its own shape it
//! answers every [`StructuralProperty`] probe directly.

use super::{Graph, GraphStore, StructuralProperty};
use crate::context::{Accepted, ContextResult, Mutation, NodeContext, vet};
use crate::{Edge, EdgeId, ElementContext, GraphError, GraphId, NodeId};
use std::collections::BTreeMap;

/// A rooted forest of parent → child edges.
#[derive(Debug, Clone)]
pub struct TreeGraph<N = (), E = ()> {
    graph: Graph<N, E>,

    /// Cached parent link: child -> (parent, edge)
    parents: BTreeMap<NodeId, (NodeId, EdgeId)>,
}

impl<N, E> Default for TreeGraph<N, E> {
    fn default() -> Self {
        Self {
            graph: Graph::new(),
            parents: BTreeMap::new(),
        }
    }
}

impl<N, E> TreeGraph<N, E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(id: GraphId) -> Self {
        Self {
            graph: Graph::with_id(id),
            parents: BTreeMap::new(),
        }
    }

    /// Read-only view of the underlying graph.
    #[must_use]
    pub fn graph(&self) -> &Graph<N, E> {
        &self.graph
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.graph.node_mut(id)
    }

    /// The cached parent of `node`.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(&node).map(|(parent, _)| *parent)
    }

    /// The edge linking `node` to its parent.
    #[must_use]
    pub fn parent_edge(&self, node: NodeId) -> Option<EdgeId> {
        self.parents.get(&node).map(|(_, edge)| *edge)
    }

    /// Direct children of `node`, ascending.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.graph.traversable_nodes(node)
    }

    /// Nodes without a parent, ascending.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        self.graph
            .node_ids()
            .into_iter()
            .filter(|id| !self.parents.contains_key(id))
            .collect()
    }

    /// Ancestors of `node`, nearest first.
    #[must_use]
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Number of edges between `node` and its root; `None` for non-members.
    #[must_use]
    pub fn depth(&self, node: NodeId) -> Option<usize> {
        self.graph
            .contains_node(node)
            .then(|| self.ancestors(node).len())
    }

    /// Whether `ancestor` lies on the parent chain of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).contains(&ancestor)
    }
}

impl<N, E> TreeGraph<N, E>
where
    N: NodeContext,
    E: ElementContext,
{
    /// Add a parentless node.
    pub fn add_root(&mut self, payload: N) -> Mutation<NodeId> {
        self.graph.add_node(payload)
    }

    /// Add a node under `parent`, linked by a new parent → child edge.
    ///
    /// The child, the edge and the parent are all vetted before anything is
    /// stored.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        payload: N,
        link: E,
    ) -> Result<Mutation<NodeId>, GraphError> {
        if !self.graph.contains_node(parent) {
            return Err(GraphError::NodeNotFound(parent));
        }

        let graph = self.graph.id();
        let child = self.graph.upcoming_node_id();
        let edge_id = self.graph.upcoming_edge_id();
        let edge = Edge::directed(parent, child, link);

        let verdict = (|| -> ContextResult {
            vet(&payload, |p| p.joining_graph(graph))?;
            vet(&payload, |p| p.connecting_edge(graph, edge_id))?;
            self.graph.vet_edge_join(&edge, edge_id)?;
            Ok(Accepted)
        })();
        if let Err(rejected) = verdict {
            tracing::debug!("Child of {} rejected: {}", parent, rejected);
            return Ok(Mutation::Rejected(rejected));
        }

        let child = self.graph.insert_vetted_node(payload);
        let edge_id = self.graph.insert_vetted_edge(edge);
        self.parents.insert(child, (parent, edge_id));
        Ok(Mutation::Applied(child))
    }

    /// Move `child` under `parent`, replacing its current parent link.
    ///
    /// Both nodes must be members (`GraphError::NodeNotFound` otherwise);
    /// a move that would put `child` above itself is
    /// `GraphError::InvalidArgument`.
    pub fn set_parent(
        &mut self,
        child: NodeId,
        parent: NodeId,
        link: E,
    ) -> Result<Mutation<()>, GraphError> {
        for node in [child, parent] {
            if !self.graph.contains_node(node) {
                return Err(GraphError::NodeNotFound(node));
            }
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(GraphError::InvalidArgument(format!(
                "{} cannot become a descendant of itself",
                child
            )));
        }
        if self.parent(child) == Some(parent) {
            return Ok(Mutation::Applied(()));
        }

        let old_edge = self.parent_edge(child);
        let new_edge = Edge::directed(parent, child, link);
        let new_edge_id = self.graph.upcoming_edge_id();

        let verdict = (|| -> ContextResult {
            if let Some(old_id) = old_edge {
                if let Some(old) = self.graph.edge(old_id) {
                    self.graph.vet_edge_leave(old, old_id)?;
                }
            }
            self.graph.vet_edge_join(&new_edge, new_edge_id)?;
            Ok(Accepted)
        })();
        if let Err(rejected) = verdict {
            tracing::debug!("Reparenting {} under {} rejected: {}", child, parent, rejected);
            return Ok(Mutation::Rejected(rejected));
        }

        if let Some(old_id) = old_edge {
            let _ = self.graph.detach_edge(old_id);
        }
        let edge_id = self.graph.insert_vetted_edge(new_edge);
        self.parents.insert(child, (parent, edge_id));
        Ok(Mutation::Applied(()))
    }

    /// Remove a node; its children become roots.
    pub fn remove_node(&mut self, node: NodeId) -> Result<Mutation<N>, GraphError> {
        let children = self.children(node);
        let mutation = self.graph.remove_node(node)?;
        if mutation.is_applied() {
            self.parents.remove(&node);
            for child in children {
                self.parents.remove(&child);
            }
        }
        Ok(mutation)
    }
}

impl<N, E> GraphStore for TreeGraph<N, E> {
    type Node = N;
    type Edge = E;

    fn id(&self) -> GraphId {
        self.graph.id()
    }

    fn node(&self, id: NodeId) -> Option<&N> {
        self.graph.node(id)
    }

    fn edge(&self, id: EdgeId) -> Option<&Edge<E>> {
        self.graph.edge(id)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.graph.node_ids()
    }

    fn edge_ids(&self) -> Vec<EdgeId> {
        self.graph.edge_ids()
    }

    fn adjacent_edges(&self, node: NodeId) -> Vec<EdgeId> {
        self.graph.adjacent_edges(node)
    }

    fn known(&self, property: StructuralProperty) -> Option<bool> {
        match property {
            StructuralProperty::Acyclic
            | StructuralProperty::Simple
            | StructuralProperty::Forest
            | StructuralProperty::RootedForest => Some(true),
            StructuralProperty::WeaklyConnected
            | StructuralProperty::Tree
            | StructuralProperty::RootedTree
            | StructuralProperty::Polytree => Some(self.roots().len() <= 1),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rejected;

    #[derive(Debug, Default)]
    struct Attribute {
        frozen: bool,
    }

    impl ElementContext for Attribute {}

    impl NodeContext for Attribute {
        fn connecting_edge(&self, _graph: GraphId, _edge: EdgeId) -> ContextResult {
            if self.frozen {
                Err(Rejected::new("frozen attribute"))
            } else {
                Ok(Accepted)
            }
        }
    }

    fn child(tree: &mut TreeGraph, parent: NodeId) -> NodeId {
        tree.add_child(parent, (), ())
            .expect("member parent")
            .applied()
            .expect("accepted")
    }

    #[test]
    fn add_child_caches_parent() {
        let mut tree = TreeGraph::new();
        let root = tree.add_root(()).applied().expect("root");
        let a = child(&mut tree, root);
        let b = child(&mut tree, a);

        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(b), Some(a));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(root), vec![a]);
        assert_eq!(tree.ancestors(b), vec![a, root]);
        assert_eq!(tree.depth(b), Some(2));
        assert_eq!(tree.roots(), vec![root]);
    }

    #[test]
    fn add_child_to_stranger_is_fatal() {
        let mut tree: TreeGraph = TreeGraph::new();
        let result = tree.add_child(NodeId(42), (), ());
        assert!(matches!(result, Err(GraphError::NodeNotFound(NodeId(42)))));
    }

    #[test]
    fn set_parent_updates_cache_and_edges() {
        let mut tree = TreeGraph::new();
        let root = tree.add_root(()).applied().expect("root");
        let a = child(&mut tree, root);
        let b = child(&mut tree, root);
        let c = child(&mut tree, a);

        let moved = tree.set_parent(c, b, ()).expect("members");
        assert!(moved.is_applied());
        assert_eq!(tree.parent(c), Some(b));
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), vec![c]);
        assert_eq!(tree.graph().edge_count(), 3);
    }

    #[test]
    fn set_parent_on_non_member_is_fatal() {
        let mut tree = TreeGraph::new();
        let root = tree.add_root(()).applied().expect("root");
        let result = tree.set_parent(root, NodeId(77), ());
        assert!(matches!(result, Err(GraphError::NodeNotFound(NodeId(77)))));
    }

    #[test]
    fn set_parent_refuses_cycles() {
        let mut tree = TreeGraph::new();
        let root = tree.add_root(()).applied().expect("root");
        let a = child(&mut tree, root);
        let result = tree.set_parent(root, a, ());
        assert!(matches!(result, Err(GraphError::InvalidArgument(_))));
        assert!(matches!(
            tree.set_parent(a, a, ()),
            Err(GraphError::InvalidArgument(_))
        ));
    }

    #[test]
    fn frozen_parent_vetoes_new_children() {
        let mut tree: TreeGraph<Attribute, ()> = TreeGraph::new();
        let root = tree
            .add_root(Attribute { frozen: true })
            .applied()
            .expect("root");
        let mutation = tree
            .add_child(root, Attribute::default(), ())
            .expect("member parent");

        assert!(mutation.is_rejected());
        assert_eq!(tree.graph().node_count(), 1);
        assert_eq!(tree.graph().edge_count(), 0);
    }

    #[test]
    fn removing_a_node_orphans_its_children() {
        let mut tree = TreeGraph::new();
        let root = tree.add_root(()).applied().expect("root");
        let a = child(&mut tree, root);
        let b = child(&mut tree, a);

        let removed = tree.remove_node(a).expect("member");
        assert!(removed.is_applied());
        assert_eq!(tree.parent(b), None);
        assert_eq!(tree.roots(), vec![root, b]);
        assert_eq!(tree.known(StructuralProperty::Tree), Some(false));
        assert_eq!(tree.known(StructuralProperty::RootedForest), Some(true));
    }

    #[test]
    fn single_root_is_known_polytree() {
        let mut tree = TreeGraph::new();
        let root = tree.add_root(()).applied().expect("root");
        let _ = child(&mut tree, root);
        assert_eq!(tree.known(StructuralProperty::Polytree), Some(true));
        assert_eq!(tree.known(StructuralProperty::Acyclic), Some(true));
    }
}

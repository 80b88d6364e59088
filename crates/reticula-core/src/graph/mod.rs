//! # Graph Containers
//!
//! The node/edge storage every algorithm in reticula reads from.
//!
//! This module defines the `GraphStore` read interface and the general
//! purpose `Graph` container. All data structures use `BTreeMap` so that
//! every query yields ids in ascending order.
//!
//! `GraphStore::traversable_edges` and `GraphStore::adjacent_edges` differ
//! on directed edges: the former follows direction, the latter does not.
//! Algorithms that walk the graph use the former; connectivity and
//! classification that ignore direction use the latter.

mod tree;

pub use tree::TreeGraph;

use crate::context::{Accepted, ContextResult, Mutation, NodeContext, notify, vet};
use crate::{Edge, EdgeId, ElementContext, GraphError, GraphId, NodeId, StateSignal};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// STRUCTURAL PROPERTIES
// =============================================================================

/// Structural facts a specialized container may already know about itself.
///
/// Algorithms probe [`GraphStore::known`] first and only run their generic
/// implementation when the container answers `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StructuralProperty {
    /// No directed cycle.
    Acyclic,
    /// No parallel edges and no self-loops.
    Simple,
    /// Connected when direction is ignored.
    WeaklyConnected,
    Tree,
    Forest,
    RootedTree,
    RootedForest,
    Polytree,
}

// =============================================================================
// GRAPHSTORE TRAIT
// =============================================================================

/// The read interface shared by every graph container.
///
/// Implementors provide element lookup and the node → incident-edge index;
/// everything else has a provided implementation built on those.
pub trait GraphStore {
    /// Node payload type.
    type Node;
    /// Edge payload type.
    type Edge;

    /// Identity of this container.
    fn id(&self) -> GraphId;

    /// Lookup a node payload.
    fn node(&self, id: NodeId) -> Option<&Self::Node>;

    /// Lookup an edge.
    fn edge(&self, id: EdgeId) -> Option<&Edge<Self::Edge>>;

    /// All node ids, ascending.
    fn node_ids(&self) -> Vec<NodeId>;

    /// All edge ids, ascending.
    fn edge_ids(&self) -> Vec<EdgeId>;

    /// Every edge incident to `node`, regardless of direction. Empty for
    /// non-members.
    fn adjacent_edges(&self, node: NodeId) -> Vec<EdgeId>;

    /// Answer a structural question from the container's own knowledge.
    ///
    /// `None` means "not known here"; callers then fall back to the
    /// generic algorithm.
    fn known(&self, _property: StructuralProperty) -> Option<bool> {
        None
    }

    fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge(id).is_some()
    }

    fn node_count(&self) -> usize {
        self.node_ids().len()
    }

    fn edge_count(&self) -> usize {
        self.edge_ids().len()
    }

    /// Incident edges that can be crossed leaving `node`.
    fn traversable_edges(&self, node: NodeId) -> Vec<EdgeId> {
        self.adjacent_edges(node)
            .into_iter()
            .filter(|id| {
                self.edge(*id)
                    .is_some_and(|edge| edge.traversable_from(node).is_some())
            })
            .collect()
    }

    /// Incident edges that can be crossed arriving at `node`.
    fn incoming_edges(&self, node: NodeId) -> Vec<EdgeId> {
        self.adjacent_edges(node)
            .into_iter()
            .filter(|id| self.edge(*id).is_some_and(|edge| edge.arrives_at(node)))
            .collect()
    }

    /// Distinct nodes sharing an edge with `node`, ascending.
    fn adjacent_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.adjacent_edges(node)
            .into_iter()
            .filter_map(|id| self.edge(id).and_then(|edge| edge.opposite(node)))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct nodes reachable from `node` across one edge, ascending.
    fn traversable_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.adjacent_edges(node)
            .into_iter()
            .filter_map(|id| self.edge(id).and_then(|edge| edge.traversable_from(node)))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of incident edges that can be crossed into `node`.
    fn in_degree(&self, node: NodeId) -> usize {
        self.incoming_edges(node).len()
    }

    /// Number of incident edges that can be crossed out of `node`.
    fn out_degree(&self, node: NodeId) -> usize {
        self.traversable_edges(node).len()
    }

    /// Number of incident edges; a self-loop counts once.
    fn degree(&self, node: NodeId) -> usize {
        self.adjacent_edges(node).len()
    }
}

// =============================================================================
// GRAPH IMPLEMENTATION
// =============================================================================

/// The general purpose graph container.
///
/// Owns its nodes, edges and the node → incident-edge index. Elements are
/// addressed by the ids the graph hands out; ids are never reused.
///
/// A graph built once with [`Graph::from_parts`] and then only shared by
/// reference is the immutable form; `add_*`/`remove_*` are the only write
/// path for the mutable form.
#[derive(Debug, Clone)]
pub struct Graph<N = (), E = ()> {
    /// Identity handed to context callbacks.
    id: GraphId,

    /// Node storage: NodeId -> payload
    nodes: BTreeMap<NodeId, N>,

    /// Edge storage: EdgeId -> edge
    edges: BTreeMap<EdgeId, Edge<E>>,

    /// Incidence index: NodeId -> incident EdgeIds
    adjacency: BTreeMap<NodeId, BTreeSet<EdgeId>>,

    /// Next available NodeId
    next_node_id: u64,

    /// Next available EdgeId
    next_edge_id: u64,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::with_id(GraphId(crate::primitives::DEFAULT_GRAPH_ID))
    }
}

impl<N, E> Graph<N, E> {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty graph with an explicit identity.
    #[must_use]
    pub fn with_id(id: GraphId) -> Self {
        Self {
            id,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            adjacency: BTreeMap::new(),
            next_node_id: 0,
            next_edge_id: 0,
        }
    }

    /// All nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &N)> {
        self.nodes.iter().map(|(id, payload)| (*id, payload))
    }

    /// All edges in ascending id order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge<E>)> {
        self.edges.iter().map(|(id, edge)| (*id, edge))
    }

    /// Mutable access to a node payload. Membership cannot change through it.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(&id)
    }

    /// Mutable access to an edge. Endpoints and weight are fixed; only the
    /// payload can change.
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge<E>> {
        self.edges.get_mut(&id)
    }

    /// Edges joining `a` and `b` in either orientation.
    #[must_use]
    pub fn edges_between(&self, a: NodeId, b: NodeId) -> Vec<EdgeId> {
        self.adjacency
            .get(&a)
            .into_iter()
            .flatten()
            .filter(|id| {
                self.edges
                    .get(id)
                    .is_some_and(|edge| edge.opposite(a) == Some(b))
            })
            .copied()
            .collect()
    }

    /// Insert an already validated edge under a known id.
    fn insert_edge_unchecked(&mut self, id: EdgeId, edge: Edge<E>) {
        let (left, right) = edge.endpoints();
        self.adjacency.entry(left).or_default().insert(id);
        self.adjacency.entry(right).or_default().insert(id);
        self.edges.insert(id, edge);
        if id.0 >= self.next_edge_id {
            self.next_edge_id = id.0.saturating_add(1);
        }
    }

    /// Id the next inserted node will receive.
    pub(crate) fn upcoming_node_id(&self) -> NodeId {
        NodeId(self.next_node_id)
    }

    /// Id the next inserted edge will receive.
    pub(crate) fn upcoming_edge_id(&self) -> EdgeId {
        EdgeId(self.next_edge_id)
    }

    /// Validate that an edge may be stored in this graph.
    pub(crate) fn check_edge(&self, edge: &Edge<E>) -> Result<(), GraphError> {
        for endpoint in distinct_endpoints(edge) {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::MissingEndpoint(endpoint));
            }
        }
        match edge.weight() {
            Some(weight) if weight.is_nan() => Err(GraphError::InvalidWeight(weight)),
            _ => Ok(()),
        }
    }
}

/// Endpoints of an edge with a self-loop's node listed once.
fn distinct_endpoints<E>(edge: &Edge<E>) -> Vec<NodeId> {
    let (left, right) = edge.endpoints();
    if left == right {
        vec![left]
    } else {
        vec![left, right]
    }
}

// =============================================================================
// MUTATION (CONTEXT-AWARE)
// =============================================================================

impl<N, E> Graph<N, E>
where
    N: NodeContext,
    E: ElementContext,
{
    /// Build a graph from a fixed set of nodes and edges.
    ///
    /// Nodes receive ids `NodeId(0)`, `NodeId(1)`, ... in iteration order;
    /// edges must refer to those ids. An endpoint outside the node set is
    /// `GraphError::MissingEndpoint`; an element refusing to join is
    /// `GraphError::ConstructionRejected`.
    pub fn from_parts<I, J>(nodes: I, edges: J) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = N>,
        J: IntoIterator<Item = Edge<E>>,
    {
        let mut graph = Self::new();
        for payload in nodes {
            if let Mutation::Rejected(rejected) = graph.add_node(payload) {
                return Err(GraphError::ConstructionRejected(rejected.to_string()));
            }
        }
        for edge in edges {
            if let Mutation::Rejected(rejected) = graph.add_edge(edge)? {
                return Err(GraphError::ConstructionRejected(rejected.to_string()));
            }
        }
        Ok(graph)
    }

    /// Add a node. The payload may veto joining this graph.
    pub fn add_node(&mut self, payload: N) -> Mutation<NodeId> {
        let graph = self.id;
        if let Err(rejected) = vet(&payload, |p| p.joining_graph(graph)) {
            tracing::debug!("Node rejected joining {:?}: {}", graph, rejected);
            return Mutation::Rejected(rejected);
        }

        Mutation::Applied(self.insert_vetted_node(payload))
    }

    /// Add an edge between two member nodes.
    ///
    /// A missing endpoint or a `NaN` weight is a `GraphError`. The edge and
    /// both endpoints may veto; a veto leaves the graph unchanged.
    pub fn add_edge(&mut self, edge: Edge<E>) -> Result<Mutation<EdgeId>, GraphError> {
        self.check_edge(&edge)?;

        let id = self.upcoming_edge_id();
        if let Err(rejected) = self.vet_edge_join(&edge, id) {
            tracing::debug!("Edge {} rejected joining {:?}: {}", id, self.id, rejected);
            return Ok(Mutation::Rejected(rejected));
        }
        Ok(Mutation::Applied(self.insert_vetted_edge(edge)))
    }

    /// Remove an edge, returning it.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Mutation<Edge<E>>, GraphError> {
        let edge = self.edges.get(&id).ok_or(GraphError::EdgeNotFound(id))?;
        if let Err(rejected) = self.vet_edge_leave(edge, id) {
            tracing::debug!("Edge {} rejected leaving {:?}: {}", id, self.id, rejected);
            return Ok(Mutation::Rejected(rejected));
        }
        let edge = self.detach_edge(id).ok_or(GraphError::EdgeNotFound(id))?;
        Ok(Mutation::Applied(edge))
    }

    /// Remove a node together with every incident edge, returning its payload.
    ///
    /// The node, each incident edge and each far endpoint are vetted as one
    /// unit: a single refusal keeps every element in place.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Mutation<N>, GraphError> {
        let node = self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))?;
        let graph = self.id;
        let incident: Vec<EdgeId> = self
            .adjacency
            .get(&id)
            .map(|edges| edges.iter().copied().collect())
            .unwrap_or_default();

        let verdict = (|| -> ContextResult {
            vet(node, |n| n.leaving_graph(graph))?;
            for edge_id in &incident {
                if let Some(edge) = self.edges.get(edge_id) {
                    self.vet_edge_leave(edge, *edge_id)?;
                }
            }
            Ok(Accepted)
        })();
        if let Err(rejected) = verdict {
            tracing::debug!("Node {} rejected leaving {:?}: {}", id, graph, rejected);
            return Ok(Mutation::Rejected(rejected));
        }

        if !incident.is_empty() {
            tracing::trace!("Removing {} cascades to {} edges", id, incident.len());
        }
        for edge_id in incident {
            let _ = self.detach_edge(edge_id);
        }
        self.adjacency.remove(&id);
        let mut payload = self.nodes.remove(&id).ok_or(GraphError::NodeNotFound(id))?;
        notify(&mut payload, |n| n.left_graph(graph));
        Ok(Mutation::Applied(payload))
    }

    /// Store a node whose veto already passed and notify it.
    pub(crate) fn insert_vetted_node(&mut self, payload: N) -> NodeId {
        let graph = self.id;
        let id = self.upcoming_node_id();
        self.next_node_id = self.next_node_id.saturating_add(1);
        self.nodes.insert(id, payload);
        self.adjacency.insert(id, BTreeSet::new());

        if let Some(node) = self.nodes.get_mut(&id) {
            notify(node, |n| n.joined_graph(graph));
        }
        id
    }

    /// Store a validated edge whose veto already passed and notify it and
    /// its endpoints.
    pub(crate) fn insert_vetted_edge(&mut self, edge: Edge<E>) -> EdgeId {
        let graph = self.id;
        let id = self.upcoming_edge_id();
        let endpoints = distinct_endpoints(&edge);
        self.insert_edge_unchecked(id, edge);

        if let Some(edge) = self.edges.get_mut(&id) {
            notify(edge.payload_mut(), |p| p.joined_graph(graph));
        }
        for endpoint in endpoints {
            if let Some(node) = self.nodes.get_mut(&endpoint) {
                notify(node, |n| n.connected_edge(graph, id));
            }
        }
        id
    }

    pub(crate) fn vet_edge_join(&self, edge: &Edge<E>, id: EdgeId) -> ContextResult {
        let graph = self.id;
        vet(edge.payload(), |p| p.joining_graph(graph))?;
        for endpoint in distinct_endpoints(edge) {
            if let Some(node) = self.nodes.get(&endpoint) {
                vet(node, |n| n.connecting_edge(graph, id))?;
            }
        }
        Ok(Accepted)
    }

    pub(crate) fn vet_edge_leave(&self, edge: &Edge<E>, id: EdgeId) -> ContextResult {
        let graph = self.id;
        vet(edge.payload(), |p| p.leaving_graph(graph))?;
        for endpoint in distinct_endpoints(edge) {
            if let Some(node) = self.nodes.get(&endpoint) {
                vet(node, |n| n.disconnecting_edge(graph, id))?;
            }
        }
        Ok(Accepted)
    }

    /// Unlink an edge that already passed its veto and send notifications.
    pub(crate) fn detach_edge(&mut self, id: EdgeId) -> Option<Edge<E>> {
        let graph = self.id;
        let mut edge = self.edges.remove(&id)?;
        let endpoints = distinct_endpoints(&edge);
        for endpoint in &endpoints {
            if let Some(incident) = self.adjacency.get_mut(endpoint) {
                incident.remove(&id);
            }
        }
        notify(edge.payload_mut(), |p| p.left_graph(graph));
        for endpoint in endpoints {
            if let Some(node) = self.nodes.get_mut(&endpoint) {
                notify(node, |n| n.disconnected_edge(graph, id));
            }
        }
        Some(edge)
    }
}

// =============================================================================
// STATE SIGNALS
// =============================================================================

impl<N, E> Graph<N, E> {
    /// Broadcast a state change of `origin` across its traversable edges.
    ///
    /// Each traversable edge hears the change, then every node reached
    /// across those edges does. Delivered regardless of
    /// `is_context_enabled`. Returns the reached nodes in ascending order.
    pub fn propagate_state<S>(
        &mut self,
        origin: NodeId,
        state: &S,
    ) -> Result<Vec<NodeId>, GraphError>
    where
        N: StateSignal<S>,
        E: StateSignal<S>,
    {
        if !self.nodes.contains_key(&origin) {
            return Err(GraphError::NodeNotFound(origin));
        }

        let mut reached = BTreeSet::new();
        for edge_id in self.traversable_edges(origin) {
            if let Some(edge) = self.edges.get_mut(&edge_id) {
                edge.payload_mut().node_state_changed(origin, state);
                if let Some(target) = edge.traversable_from(origin) {
                    reached.insert(target);
                }
            }
        }
        for target in &reached {
            if let Some(node) = self.nodes.get_mut(target) {
                node.node_state_changed(origin, state);
            }
        }
        Ok(reached.into_iter().collect())
    }
}

// =============================================================================
// SUBGRAPHS
// =============================================================================

impl<N: Clone, E: Clone> Graph<N, E> {
    /// Every node of this graph plus only the listed edges.
    ///
    /// Ids are preserved and no context callbacks run: the result is a
    /// data snapshot, e.g. for wrapping a spanning tree's edge set.
    pub fn spanning_subgraph<I>(&self, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = EdgeId>,
    {
        let mut sub = Self {
            nodes: self.nodes.clone(),
            adjacency: self.nodes.keys().map(|id| (*id, BTreeSet::new())).collect(),
            next_node_id: self.next_node_id,
            ..Self::with_id(self.id)
        };
        for id in edges {
            let edge = self.edges.get(&id).ok_or(GraphError::EdgeNotFound(id))?;
            sub.insert_edge_unchecked(id, edge.clone());
        }
        sub.next_edge_id = self.next_edge_id;
        Ok(sub)
    }

    /// The listed nodes plus every edge with both endpoints among them.
    ///
    /// Ids are preserved and no context callbacks run.
    pub fn induced_subgraph(&self, nodes: &BTreeSet<NodeId>) -> Result<Self, GraphError> {
        let mut sub = Self::with_id(self.id);
        for id in nodes {
            let payload = self.nodes.get(id).ok_or(GraphError::NodeNotFound(*id))?;
            sub.nodes.insert(*id, payload.clone());
            sub.adjacency.insert(*id, BTreeSet::new());
        }
        for (id, edge) in &self.edges {
            if nodes.contains(&edge.left()) && nodes.contains(&edge.right()) {
                sub.insert_edge_unchecked(*id, edge.clone());
            }
        }
        sub.next_node_id = self.next_node_id;
        sub.next_edge_id = self.next_edge_id;
        Ok(sub)
    }
}

impl<N, E> GraphStore for Graph<N, E> {
    type Node = N;
    type Edge = E;

    fn id(&self) -> GraphId {
        self.id
    }

    fn node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(&id)
    }

    fn edge(&self, id: EdgeId) -> Option<&Edge<E>> {
        self.edges.get(&id)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.keys().copied().collect()
    }

    fn adjacent_edges(&self, node: NodeId) -> Vec<EdgeId> {
        self.adjacency
            .get(&node)
            .map(|edges| edges.iter().copied().collect())
            .unwrap_or_default()
    }

    fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

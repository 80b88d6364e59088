//! # Core Type Definitions
//!
//! This module contains the element types every graph container and
//! algorithm in reticula is written against:
//! - Identifiers (`NodeId`, `EdgeId`, `GraphId`)
//! - The bidirected end-state algebra (`EndState`, `EdgeKind`)
//! - Edges (`Edge`) and the node weight capability (`Weighted`)
//! - Path results (`Walk`)
//! - Error types (`GraphError`)
//!
//! ## Ordering Guarantees
//!
//! All identifiers implement `Ord` so containers can keep them in
//! `BTreeMap`/`BTreeSet` and every query yields ids in ascending order.

use crate::primitives::UNIT_WEIGHT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a node inside one graph.
///
/// Nodes are arena slots owned by their graph; a `NodeId` is only
/// meaningful for the graph that issued it (and for id-preserving
/// subgraphs taken from that graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Identifier of an edge inside one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

/// Identity of a graph container, handed to context callbacks so an element
/// can tell which graph it is joining or leaving.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct GraphId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

// =============================================================================
// END-STATE ALGEBRA
// =============================================================================

/// Directional tag carried by one endpoint of a bidirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndState {
    /// The arrow leaves the node at this end.
    Outward,
    /// The arrow enters the node at this end.
    Inward,
    /// No direction; the end cannot be arrived at.
    Unmarked,
}

/// Classification derived from an edge's pair of end-states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// One `Outward` end and one `Inward` end.
    Directed,
    /// Both ends `Outward`.
    Extraverted,
    /// Both ends `Inward`.
    Introverted,
    /// Exactly one end `Unmarked`.
    HalfEdge,
    /// Both ends `Unmarked`.
    LooseEdge,
    /// No end-states at all: an ordinary undirected edge.
    Undirected,
}

impl EdgeKind {
    /// Classify a pair of end-states.
    #[must_use]
    pub fn classify(left: EndState, right: EndState) -> Self {
        use EndState::{Inward, Outward, Unmarked};
        match (left, right) {
            (Outward, Inward) | (Inward, Outward) => Self::Directed,
            (Outward, Outward) => Self::Extraverted,
            (Inward, Inward) => Self::Introverted,
            (Unmarked, Unmarked) => Self::LooseEdge,
            (Unmarked, _) | (_, Unmarked) => Self::HalfEdge,
        }
    }
}

/// Whether an edge may be crossed from the end tagged `from` to the end tagged `to`.
fn crossable(from: EndState, to: EndState) -> bool {
    if to == EndState::Unmarked {
        return false;
    }
    !(from == EndState::Inward && to == EndState::Outward)
}

// =============================================================================
// EDGE
// =============================================================================

/// An edge between two member nodes of a graph.
///
/// `left` and `right` are ordered. Bidirected edges carry one
/// [`EndState`] per endpoint; edges without end-states are ordinary
/// undirected edges. The optional weight is what every weighted algorithm
/// reads; unweighted edges count as [`UNIT_WEIGHT`]. A weight of
/// `f64::INFINITY` marks the edge as effectively absent for path finding
/// while keeping it structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<E = ()> {
    left: NodeId,
    right: NodeId,
    ends: Option<(EndState, EndState)>,
    weight: Option<f64>,
    payload: E,
}

impl<E> Edge<E> {
    /// Create an ordinary undirected edge.
    #[must_use]
    pub fn undirected(left: NodeId, right: NodeId, payload: E) -> Self {
        Self {
            left,
            right,
            ends: None,
            weight: None,
            payload,
        }
    }

    /// Create a directed edge from `source` to `destination`.
    #[must_use]
    pub fn directed(source: NodeId, destination: NodeId, payload: E) -> Self {
        Self::bidirected(
            source,
            EndState::Outward,
            destination,
            EndState::Inward,
            payload,
        )
    }

    /// Create a bidirected edge with explicit end-states.
    #[must_use]
    pub fn bidirected(
        left: NodeId,
        left_state: EndState,
        right: NodeId,
        right_state: EndState,
        payload: E,
    ) -> Self {
        Self {
            left,
            right,
            ends: Some((left_state, right_state)),
            weight: None,
            payload,
        }
    }

    /// Attach a weight to this edge.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// The left endpoint.
    #[must_use]
    pub fn left(&self) -> NodeId {
        self.left
    }

    /// The right endpoint.
    #[must_use]
    pub fn right(&self) -> NodeId {
        self.right
    }

    /// Both endpoints, left first.
    #[must_use]
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.left, self.right)
    }

    /// The `(left, right)` end-states, if this is a bidirected edge.
    #[must_use]
    pub fn end_states(&self) -> Option<(EndState, EndState)> {
        self.ends
    }

    /// The declared weight, if any.
    #[must_use]
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// The declared weight, or [`UNIT_WEIGHT`] for unweighted edges.
    #[must_use]
    pub fn weight_or_unit(&self) -> f64 {
        self.weight.unwrap_or(UNIT_WEIGHT)
    }

    /// True when the weight is `+inf`, i.e. the edge never carries a path.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        self.weight_or_unit() == f64::INFINITY
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut E {
        &mut self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }

    /// Classify this edge by its end-states.
    #[must_use]
    pub fn kind(&self) -> EdgeKind {
        match self.ends {
            Some((left, right)) => EdgeKind::classify(left, right),
            None => EdgeKind::Undirected,
        }
    }

    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.kind() == EdgeKind::Directed
    }

    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.left == self.right
    }

    /// The `Outward` end of a directed edge.
    #[must_use]
    pub fn source(&self) -> Option<NodeId> {
        match self.ends {
            Some((EndState::Outward, EndState::Inward)) => Some(self.left),
            Some((EndState::Inward, EndState::Outward)) => Some(self.right),
            _ => None,
        }
    }

    /// The `Inward` end of a directed edge.
    #[must_use]
    pub fn destination(&self) -> Option<NodeId> {
        match self.ends {
            Some((EndState::Outward, EndState::Inward)) => Some(self.right),
            Some((EndState::Inward, EndState::Outward)) => Some(self.left),
            _ => None,
        }
    }

    /// Whether `node` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, node: NodeId) -> bool {
        self.left == node || self.right == node
    }

    /// The endpoint opposite to `node`, or `None` if `node` is not an endpoint.
    /// A self-loop is its own opposite.
    #[must_use]
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if self.left == node {
            Some(self.right)
        } else if self.right == node {
            Some(self.left)
        } else {
            None
        }
    }

    /// The node reached by crossing this edge from `node`, if direction allows it.
    ///
    /// An edge is crossable from end X to end Y unless Y is `Unmarked`
    /// or the crossing runs against a directed edge's arrow.
    #[must_use]
    pub fn traversable_from(&self, node: NodeId) -> Option<NodeId> {
        let Some((left_state, right_state)) = self.ends else {
            return self.opposite(node);
        };
        let forward = self.left == node && crossable(left_state, right_state);
        let backward = self.right == node && crossable(right_state, left_state);
        if forward {
            Some(self.right)
        } else if backward {
            Some(self.left)
        } else {
            None
        }
    }

    /// Whether some endpoint can cross this edge into `node`.
    #[must_use]
    pub fn arrives_at(&self, node: NodeId) -> bool {
        if !self.touches(node) {
            return false;
        }
        let Some((left_state, right_state)) = self.ends else {
            return true;
        };
        (self.right == node && crossable(left_state, right_state))
            || (self.left == node && crossable(right_state, left_state))
    }

    /// Same edge with a different payload.
    pub fn map_payload<F, T>(self, f: F) -> Edge<T>
    where
        F: FnOnce(E) -> T,
    {
        Edge {
            left: self.left,
            right: self.right,
            ends: self.ends,
            weight: self.weight,
            payload: f(self.payload),
        }
    }
}

// =============================================================================
// NODE WEIGHT CAPABILITY
// =============================================================================

/// A node payload that exposes a numeric weight.
///
/// Hill climbing ascends over this value.
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl Weighted for f64 {
    fn weight(&self) -> f64 {
        *self
    }
}

impl Weighted for f32 {
    fn weight(&self) -> f64 {
        f64::from(*self)
    }
}

impl Weighted for i64 {
    fn weight(&self) -> f64 {
        *self as f64
    }
}

// =============================================================================
// WALK
// =============================================================================

/// A path through a graph, as produced by the path finders.
///
/// `nodes` has exactly one more entry than `edges`; `edges[i]` joins
/// `nodes[i]` and `nodes[i + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Walk {
    /// Nodes in visiting order, from the begin node to the end node.
    pub nodes: Vec<NodeId>,
    /// Edges in visiting order.
    pub edges: Vec<EdgeId>,
    /// Sum of the weights of `edges`.
    pub total_weight: f64,
}

impl Walk {
    #[must_use]
    pub fn new(nodes: Vec<NodeId>, edges: Vec<EdgeId>, total_weight: f64) -> Self {
        Self {
            nodes,
            edges,
            total_weight,
        }
    }

    /// Number of edges in the walk.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[must_use]
    pub fn first_node(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    #[must_use]
    pub fn last_node(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// `(from, edge, to)` triples in visiting order.
    pub fn hops(&self) -> impl Iterator<Item = (NodeId, EdgeId, NodeId)> + '_ {
        self.edges
            .iter()
            .zip(self.nodes.windows(2))
            .map(|(edge, pair)| (pair[0], *edge, pair[1]))
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by the graph engine.
///
/// These are programmer errors (bad arguments, broken invariants) or
/// container/format failures. Expected "no result" outcomes such as an
/// unreachable target or a cyclic ranking are `Option::None`, and context
/// rejections are [`crate::Mutation::Rejected`]; neither is a `GraphError`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The node is not a member of the graph.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// The edge is not a member of the graph.
    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// An edge names an endpoint that is not in the graph's node set.
    #[error("Edge endpoint {0} is not a member of the graph")]
    MissingEndpoint(NodeId),

    /// An argument violated an operation's precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Edge weights must be numbers (`+inf` allowed, `NaN` not).
    #[error("Invalid edge weight: {0}")]
    InvalidWeight(f64),

    /// A non-negative-weight algorithm met a negative weight.
    #[error("Negative weight {weight} on edge {edge}")]
    NegativeWeight { edge: EdgeId, weight: f64 },

    /// A negative-weight cycle is reachable from the source.
    #[error("Negative cycle reachable from {0}")]
    NegativeCycle(NodeId),

    /// The algorithm is only defined for connected graphs.
    #[error("Graph is not connected")]
    NotConnected,

    /// The graph has no implementation of this query and no generic fallback exists.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    /// An element refused to join while a graph was being built from fixed parts.
    #[error("Construction rejected: {0}")]
    ConstructionRejected(String),

    /// A description could not be parsed or was inconsistent.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

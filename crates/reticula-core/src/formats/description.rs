//! # Graph Descriptions
//!
//! A label-based, serde-derived description of a graph:
//!
//! ```text
//! nodes: [{ label, weight? }]
//! edges: [{ from, to, directed?, ends?, weight?, infinite?, label? }]
//! ```
//!
//! `ends` gives explicit `[left, right]` end-states and wins over
//! `directed`; the two may not both be set. `infinite` stands in for a
//! `+inf` weight, which JSON cannot express.
//!
//! ## Validation
//!
//! Checked before any element is inserted:
//! - Total element count (`MAX_DESCRIPTION_ELEMENTS`)
//! - Label length (`MAX_LABEL_LENGTH`) and uniqueness
//! - Edge endpoints refer to declared labels

use crate::primitives::{MAX_DESCRIPTION_ELEMENTS, MAX_LABEL_LENGTH};
use crate::{
    Edge, ElementContext, EndState, Graph, GraphError, GraphStore, Mutation, NodeContext, NodeId,
    Weighted,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Label → node id lookup returned alongside a built graph.
pub type LabelIndex = BTreeMap<String, NodeId>;

// =============================================================================
// DESCRIPTION TYPES
// =============================================================================

/// A whole graph, by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub directed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends: Option<[EndState; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub infinite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Node payload of a graph built from a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledNode {
    pub label: String,
    /// Declared weight, `0.0` when absent.
    pub weight: f64,
}

/// Edge payload of a graph built from a description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledEdge {
    pub label: Option<String>,
}

impl Weighted for LabeledNode {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl ElementContext for LabeledNode {
    fn is_context_enabled(&self) -> bool {
        false
    }
}

impl NodeContext for LabeledNode {}

impl ElementContext for LabeledEdge {
    fn is_context_enabled(&self) -> bool {
        false
    }
}

// =============================================================================
// CONVERSION
// =============================================================================

impl GraphDescription {
    /// Validate the description and build the graph it describes.
    ///
    /// Nodes receive ids in declaration order, edges likewise.
    pub fn into_graph(self) -> Result<(Graph<LabeledNode, LabeledEdge>, LabelIndex), GraphError> {
        self.validate()?;

        let mut graph = Graph::new();
        let mut index = LabelIndex::new();

        for node in self.nodes {
            let payload = LabeledNode {
                label: node.label.clone(),
                weight: node.weight.unwrap_or(0.0),
            };
            let id = applied(graph.add_node(payload))?;
            index.insert(node.label, id);
        }

        for edge in self.edges {
            let from = lookup(&index, &edge.from)?;
            let to = lookup(&index, &edge.to)?;
            let payload = LabeledEdge { label: edge.label };

            let mut built = match (edge.ends, edge.directed) {
                (Some([left, right]), _) => Edge::bidirected(from, left, to, right, payload),
                (None, true) => Edge::directed(from, to, payload),
                (None, false) => Edge::undirected(from, to, payload),
            };
            if edge.infinite {
                built = built.with_weight(f64::INFINITY);
            } else if let Some(weight) = edge.weight {
                built = built.with_weight(weight);
            }
            applied(graph.add_edge(built)?)?;
        }

        tracing::debug!(
            "Loaded graph description: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok((graph, index))
    }

    /// Describe an existing labeled graph.
    ///
    /// Undirected and directed edges are written with `directed`; every
    /// other end-state pair with `ends`.
    pub fn from_graph(graph: &Graph<LabeledNode, LabeledEdge>) -> Self {
        let label_of = |id: NodeId| {
            graph
                .node(id)
                .map(|node| node.label.clone())
                .unwrap_or_else(|| id.to_string())
        };

        let nodes = graph
            .nodes()
            .map(|(_, node)| NodeDescription {
                label: node.label.clone(),
                weight: (node.weight != 0.0).then_some(node.weight),
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(_, edge)| {
                let directed = edge.end_states() == Some((EndState::Outward, EndState::Inward));
                let ends = edge
                    .end_states()
                    .filter(|_| !directed)
                    .map(|(left, right)| [left, right]);
                EdgeDescription {
                    from: label_of(edge.left()),
                    to: label_of(edge.right()),
                    directed,
                    ends,
                    weight: edge.weight().filter(|w| w.is_finite()),
                    infinite: edge.is_infinite(),
                    label: edge.payload().label.clone(),
                }
            })
            .collect();

        Self { nodes, edges }
    }

    fn validate(&self) -> Result<(), GraphError> {
        let total = self.nodes.len().saturating_add(self.edges.len());
        if total > MAX_DESCRIPTION_ELEMENTS {
            return Err(GraphError::Serialization(format!(
                "Description has {} elements (max {})",
                total, MAX_DESCRIPTION_ELEMENTS
            )));
        }

        let mut seen = BTreeSet::new();
        for node in &self.nodes {
            check_label(&node.label)?;
            if !seen.insert(node.label.as_str()) {
                return Err(GraphError::Serialization(format!(
                    "Duplicate node label '{}'",
                    node.label
                )));
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(GraphError::Serialization(format!(
                        "Edge refers to unknown node '{}'",
                        endpoint
                    )));
                }
            }
            if let Some(label) = &edge.label {
                check_label(label)?;
            }
            if edge.directed && edge.ends.is_some() {
                return Err(GraphError::Serialization(format!(
                    "Edge {} -> {} sets both 'directed' and 'ends'",
                    edge.from, edge.to
                )));
            }
            if edge.infinite && edge.weight.is_some() {
                return Err(GraphError::Serialization(format!(
                    "Edge {} -> {} sets both 'infinite' and 'weight'",
                    edge.from, edge.to
                )));
            }
        }
        Ok(())
    }
}

fn check_label(label: &str) -> Result<(), GraphError> {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return Err(GraphError::Serialization(format!(
            "Label length {} outside 1..={}",
            label.len(),
            MAX_LABEL_LENGTH
        )));
    }
    Ok(())
}

fn lookup(index: &LabelIndex, label: &str) -> Result<NodeId, GraphError> {
    index
        .get(label)
        .copied()
        .ok_or_else(|| GraphError::Serialization(format!("Unknown node label '{}'", label)))
}

/// Labeled payloads never veto, so a rejection here is a broken invariant.
fn applied<T>(mutation: Mutation<T>) -> Result<T, GraphError> {
    match mutation {
        Mutation::Applied(value) => Ok(value),
        Mutation::Rejected(rejected) => Err(GraphError::ConstructionRejected(rejected.to_string())),
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # reticula-core
//!
//! The graph engine for Reticula.
//!
//! This crate implements one reusable abstraction, a node/edge graph with
//! a bidirected end-state algebra, and the classical algorithms that run
//! over it. Higher-level models (network topologies, attribute
//! hierarchies, probabilistic networks) are expressed as nodes and edges
//! and rely on this engine for connectivity, traversal, classification and
//! optimal paths.
//!
//! ## Layers
//!
//! - `types` / `context`: elements, the end-state algebra, the veto/notify
//!   protocol elements use to take part in membership changes
//! - `graph`: the `GraphStore` read interface, `Graph` and `TreeGraph`
//! - `traversal` / `algorithms`: stateless functions over a `GraphStore`
//! - `formats`: label-based graph descriptions for files and tests
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no I/O in the engine itself
//! - Deterministic: BTreeMap only, no HashMap, no randomness
//! - Algorithms never mutate their input graph

// =============================================================================
// MODULES
// =============================================================================

pub mod algorithms;
pub mod context;
pub mod formats;
pub mod graph;
pub mod primitives;
pub mod traversal;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Edge, EdgeId, EdgeKind, EndState, GraphError, GraphId, NodeId, Walk, Weighted};

// =============================================================================
// RE-EXPORTS: Context Protocol
// =============================================================================

pub use context::{
    Accepted, ContextResult, ElementContext, Mutation, NodeContext, Rejected, StateSignal,
};

// =============================================================================
// RE-EXPORTS: Graph Engine
// =============================================================================

pub use graph::{Graph, GraphStore, StructuralProperty, TreeGraph};
pub use traversal::Traversal;

pub use algorithms::{
    BellmanFordPathFinder, Cycle, CycleAnalysis, CycleDetector, DijkstraPathFinder,
    HillClimbingSearch, PrimMinimumSpanningTree, SpanningTree, TopologicalSorter, TreeClassifier,
};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{
    EdgeDescription, GraphDescription, LabelIndex, LabeledEdge, LabeledNode, NodeDescription,
};

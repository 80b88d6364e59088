//! # Engine Primitives
//!
//! Fixed constants shared by the containers, the algorithms and the
//! description format.

/// Weight assumed for an edge that carries no explicit weight.
///
/// Every weighted algorithm (shortest paths, spanning trees) reads
/// edge weights through `Edge::weight_or_unit`, so unweighted graphs
/// behave as hop-count graphs.
pub const UNIT_WEIGHT: f64 = 1.0;

/// Identifier given to graphs built with `Graph::new`.
pub const DEFAULT_GRAPH_ID: u64 = 0;

// =============================================================================
// DESCRIPTION LIMITS
// =============================================================================

/// Maximum length of a node or edge label in a graph description.
///
/// Longer labels are rejected by the description loader.
pub const MAX_LABEL_LENGTH: usize = 256;

/// Maximum number of nodes plus edges accepted from one description.
pub const MAX_DESCRIPTION_ELEMENTS: usize = 1_000_000;

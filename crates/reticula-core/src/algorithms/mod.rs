//! # Graph Algorithms
//!
//! Stateless algorithms over any [`crate::GraphStore`]. Each one reads the
//! graph, builds its own local maps and queues, and returns a derived value.
//! None of them mutates its input.
//!
//! Expected "no result" outcomes (unreachable target, cyclic ranking) are
//! `None`; precondition violations are [`crate::GraphError`].

pub mod classify;
pub mod cycle;
pub mod local_search;
pub mod mst;
pub mod path;
pub mod topological;

pub use classify::TreeClassifier;
pub use cycle::{Cycle, CycleAnalysis, CycleDetector};
pub use local_search::HillClimbingSearch;
pub use mst::{PrimMinimumSpanningTree, SpanningTree};
pub use path::{BellmanFordPathFinder, DijkstraPathFinder};
pub use topological::TopologicalSorter;

//! # Cycle Detection
//!
//! Two levels of detail:
//! - [`CycleDetector`] answers yes/no questions in a single linear pass.
//! - [`CycleAnalysis`] enumerates every simple cycle. Exponential in the
//!   worst case; only use it when exact counts are needed.
//!
//! A cycle is a closed walk along traversable edges that uses no edge
//! twice. Crossing an undirected edge and coming straight back over the
//! same edge is not a cycle; two parallel edges are.

use crate::graph::{GraphStore, StructuralProperty};
use crate::{EdgeId, NodeId};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// CYCLE DETECTOR
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    InProgress,
    Done,
}

/// One frame of the explicit DFS stack.
struct Frame {
    node: NodeId,
    arrival: Option<EdgeId>,
    pending: Vec<EdgeId>,
}

/// Linear-time acyclicity checks.
pub struct CycleDetector;

impl CycleDetector {
    /// Whether the graph has no cycle along traversable edges.
    ///
    /// Asks the graph first; otherwise runs a three-colour DFS where
    /// meeting an in-progress node proves a cycle.
    pub fn is_acyclic<G>(graph: &G) -> bool
    where
        G: GraphStore + ?Sized,
    {
        if let Some(known) = graph.known(StructuralProperty::Acyclic) {
            return known;
        }

        let mut colors: BTreeMap<NodeId, Color> = BTreeMap::new();
        for root in graph.node_ids() {
            if colors.contains_key(&root) {
                continue;
            }
            if Self::finds_back_edge(graph, root, &mut colors) {
                return false;
            }
        }
        true
    }

    fn finds_back_edge<G>(graph: &G, root: NodeId, colors: &mut BTreeMap<NodeId, Color>) -> bool
    where
        G: GraphStore + ?Sized,
    {
        let enter = |node: NodeId, arrival: Option<EdgeId>| {
            let mut pending = graph.traversable_edges(node);
            pending.reverse();
            Frame {
                node,
                arrival,
                pending,
            }
        };

        colors.insert(root, Color::InProgress);
        let mut stack = vec![enter(root, None)];

        while let Some(frame) = stack.last_mut() {
            let Some(edge_id) = frame.pending.pop() else {
                colors.insert(frame.node, Color::Done);
                stack.pop();
                continue;
            };
            if frame.arrival == Some(edge_id) {
                continue;
            }
            let Some(target) = graph
                .edge(edge_id)
                .and_then(|edge| edge.traversable_from(frame.node))
            else {
                continue;
            };

            match colors.get(&target).copied() {
                Some(Color::InProgress) => return true,
                Some(Color::Done) => {}
                None => {
                    colors.insert(target, Color::InProgress);
                    stack.push(enter(target, Some(edge_id)));
                }
            }
        }
        false
    }

    /// Whether the graph has no cycle once direction is ignored.
    ///
    /// Every incident edge counts, loose edges included; a self-loop or a
    /// pair of parallel edges is a cycle.
    pub fn is_weakly_acyclic<G>(graph: &G) -> bool
    where
        G: GraphStore + ?Sized,
    {
        if let Some(known) = graph.known(StructuralProperty::Forest) {
            return known;
        }

        let mut sets = DisjointSets::default();
        for edge_id in graph.edge_ids() {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let (left, right) = edge.endpoints();
            if !sets.union(left, right) {
                return false;
            }
        }
        true
    }
}

/// Union-find keyed by `NodeId`.
#[derive(Default)]
struct DisjointSets {
    parent: BTreeMap<NodeId, NodeId>,
}

impl DisjointSets {
    fn find(&mut self, node: NodeId) -> NodeId {
        let mut root = node;
        while let Some(&up) = self.parent.get(&root) {
            if up == root {
                break;
            }
            root = up;
        }
        // Path compression.
        let mut current = node;
        while current != root {
            let next = self.parent.insert(current, root).unwrap_or(root);
            current = next;
        }
        self.parent.entry(root).or_insert(root);
        root
    }

    /// Merge the sets of `a` and `b`; `false` if they were already merged.
    fn union(&mut self, a: NodeId, b: NodeId) -> bool {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }
        self.parent.insert(root_a.max(root_b), root_a.min(root_b));
        true
    }
}

// =============================================================================
// EXHAUSTIVE ANALYSIS
// =============================================================================

/// A simple cycle: `nodes[i]` leads to `nodes[i + 1]` over `edges[i]`, and
/// the last edge leads back to `nodes[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
}

impl Cycle {
    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Every simple cycle of a graph, plus the measures derived from them.
#[derive(Debug, Clone, Default)]
pub struct CycleAnalysis {
    cycles: Vec<Cycle>,
}

impl CycleAnalysis {
    /// Enumerate all simple cycles.
    ///
    /// Each cycle is rooted at its smallest node and reported once, however
    /// many orientations of it are traversable.
    pub fn analyze<G>(graph: &G) -> Self
    where
        G: GraphStore + ?Sized,
    {
        let mut found: BTreeMap<Vec<EdgeId>, Cycle> = BTreeMap::new();

        for start in graph.node_ids() {
            let mut path = Cycle {
                nodes: vec![start],
                edges: Vec::new(),
            };
            let mut on_path = BTreeSet::from([start]);
            Self::extend(graph, start, &mut path, &mut on_path, &mut found);
        }

        Self {
            cycles: found.into_values().collect(),
        }
    }

    fn extend<G>(
        graph: &G,
        start: NodeId,
        path: &mut Cycle,
        on_path: &mut BTreeSet<NodeId>,
        found: &mut BTreeMap<Vec<EdgeId>, Cycle>,
    ) where
        G: GraphStore + ?Sized,
    {
        let Some(&current) = path.nodes.last() else {
            return;
        };

        for edge_id in graph.traversable_edges(current) {
            if path.edges.contains(&edge_id) {
                continue;
            }
            let Some(next) = graph
                .edge(edge_id)
                .and_then(|edge| edge.traversable_from(current))
            else {
                continue;
            };

            if next == start {
                let mut key = path.edges.clone();
                key.push(edge_id);
                let closed = Cycle {
                    nodes: path.nodes.clone(),
                    edges: key.clone(),
                };
                key.sort_unstable();
                found.entry(key).or_insert(closed);
            } else if next > start && !on_path.contains(&next) {
                path.nodes.push(next);
                path.edges.push(edge_id);
                on_path.insert(next);

                Self::extend(graph, start, path, on_path, found);

                on_path.remove(&next);
                path.edges.pop();
                path.nodes.pop();
            }
        }
    }

    /// Every distinct cycle, ordered by sorted edge set.
    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    #[must_use]
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Length of the shortest cycle.
    #[must_use]
    pub fn girth(&self) -> Option<usize> {
        self.cycles.iter().map(Cycle::len).min()
    }

    /// Length of the longest cycle.
    #[must_use]
    pub fn circumference(&self) -> Option<usize> {
        self.cycles.iter().map(Cycle::len).max()
    }

    /// Whether a cycle exists for every length from girth to circumference.
    /// False for a graph without cycles.
    #[must_use]
    pub fn is_pancyclic(&self) -> bool {
        let (Some(girth), Some(circumference)) = (self.girth(), self.circumference()) else {
            return false;
        };
        let lengths: BTreeSet<usize> = self.cycles.iter().map(Cycle::len).collect();
        (girth..=circumference).all(|length| lengths.contains(&length))
    }

    /// Whether the graph has exactly one cycle.
    #[must_use]
    pub fn is_unicyclic(&self) -> bool {
        self.cycles.len() == 1
    }
}

// =============================================================================
// TESTS
// =============================================================================

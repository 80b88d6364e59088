//! # CLI Command Implementations
//!
//! Each command computes a serializable report from a loaded graph, then
//! prints it either as aligned text or as pretty JSON (`--json-mode`).
//! The `*_report` functions are public so they can be checked without
//! capturing stdout.

use crate::config::{PathAlgorithm, ReticulaConfig};
use crate::loader::LoadedGraph;
use reticula_core::{
    BellmanFordPathFinder, CycleAnalysis, CycleDetector, DijkstraPathFinder, EdgeKind, GraphError,
    GraphStore, HillClimbingSearch, PrimMinimumSpanningTree, TopologicalSorter, Traversal,
    TreeClassifier,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Cycles listed in text output before the rest are summarized.
const MAX_LISTED_CYCLES: usize = 10;

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

// =============================================================================
// INFO
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoReport {
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
    pub acyclic: bool,
    pub edge_kinds: BTreeMap<EdgeKind, usize>,
}

pub fn info_report(loaded: &LoadedGraph) -> InfoReport {
    let mut edge_kinds = BTreeMap::new();
    for (_, edge) in loaded.graph.edges() {
        *edge_kinds.entry(edge.kind()).or_insert(0) += 1;
    }

    InfoReport {
        nodes: loaded.graph.node_count(),
        edges: loaded.graph.edge_count(),
        components: Traversal::weakly_connected_components(&loaded.graph).len(),
        acyclic: CycleDetector::is_acyclic(&loaded.graph),
        edge_kinds,
    }
}

/// Show graph size, components and edge kinds.
pub fn cmd_info(loaded: &LoadedGraph, json_mode: bool) -> Result<(), GraphError> {
    let report = info_report(loaded);

    if json_mode {
        print_json(&report);
        return Ok(());
    }

    println!("Graph Info");
    println!("==========");
    println!("Nodes:      {}", report.nodes);
    println!("Edges:      {}", report.edges);
    println!("Components: {}", report.components);
    println!("Acyclic:    {}", yes_no(report.acyclic));
    if !report.edge_kinds.is_empty() {
        println!();
        println!("Edge kinds:");
        for (kind, count) in &report.edge_kinds {
            let name = format!("{:?}", kind);
            println!("  {:<12} {}", name, count);
        }
    }
    Ok(())
}

// =============================================================================
// CYCLES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CyclesReport {
    pub count: usize,
    pub girth: Option<usize>,
    pub circumference: Option<usize>,
    pub pancyclic: bool,
    pub unicyclic: bool,
    /// Each cycle as its node labels, in walk order.
    pub cycles: Vec<Vec<String>>,
}

pub fn cycles_report(loaded: &LoadedGraph) -> CyclesReport {
    let analysis = CycleAnalysis::analyze(&loaded.graph);
    CyclesReport {
        count: analysis.cycle_count(),
        girth: analysis.girth(),
        circumference: analysis.circumference(),
        pancyclic: analysis.is_pancyclic(),
        unicyclic: analysis.is_unicyclic(),
        cycles: analysis
            .cycles()
            .iter()
            .map(|cycle| loaded.labels(&cycle.nodes))
            .collect(),
    }
}

fn print_cycles(report: &CyclesReport) {
    println!("Cycles:        {}", report.count);
    println!("Girth:         {}", optional(report.girth));
    println!("Circumference: {}", optional(report.circumference));
    println!("Pancyclic:     {}", yes_no(report.pancyclic));
    println!("Unicyclic:     {}", yes_no(report.unicyclic));
    for cycle in report.cycles.iter().take(MAX_LISTED_CYCLES) {
        println!("  {}", cycle.join(" -> "));
    }
    if report.cycles.len() > MAX_LISTED_CYCLES {
        println!("  ... and {} more", report.cycles.len() - MAX_LISTED_CYCLES);
    }
}

/// Enumerate every simple cycle.
pub fn cmd_cycles(loaded: &LoadedGraph, json_mode: bool) -> Result<(), GraphError> {
    let report = cycles_report(loaded);

    if json_mode {
        print_json(&report);
        return Ok(());
    }

    println!("Cycle Analysis");
    println!("==============");
    print_cycles(&report);
    Ok(())
}

// =============================================================================
// RANK / SORT
// =============================================================================

/// Topological ranks as label groups; `None` when the graph has a cycle.
pub fn rank_report(loaded: &LoadedGraph) -> Option<Vec<Vec<String>>> {
    TopologicalSorter::rank(&loaded.graph)
        .map(|ranks| ranks.iter().map(|rank| loaded.labels(rank)).collect())
}

/// Topological order as labels; `None` when the graph has a cycle.
pub fn sort_report(loaded: &LoadedGraph) -> Option<Vec<String>> {
    TopologicalSorter::sort(&loaded.graph).map(|order| loaded.labels(&order))
}

/// Group nodes into topological ranks.
pub fn cmd_rank(loaded: &LoadedGraph, json_mode: bool) -> Result<(), GraphError> {
    let ranks = rank_report(loaded);

    if json_mode {
        print_json(&serde_json::json!({ "ranks": ranks }));
        return Ok(());
    }

    match ranks {
        Some(ranks) => {
            println!("Topological Ranks");
            println!("=================");
            for (depth, rank) in ranks.iter().enumerate() {
                println!("  {:>3}: {}", depth, rank.join(", "));
            }
        }
        None => println!("Graph has a cycle: no ranking exists"),
    }
    Ok(())
}

/// Print one topological order.
pub fn cmd_sort(loaded: &LoadedGraph, json_mode: bool) -> Result<(), GraphError> {
    let order = sort_report(loaded);

    if json_mode {
        print_json(&serde_json::json!({ "order": order }));
        return Ok(());
    }

    match order {
        Some(order) => println!("{}", order.join(" -> ")),
        None => println!("Graph has a cycle: no topological order exists"),
    }
    Ok(())
}

// =============================================================================
// PATH
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathReport {
    pub algorithm: PathAlgorithm,
    pub from: String,
    pub to: String,
    /// `None` when `to` is unreachable.
    pub walk: Option<WalkReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkReport {
    pub nodes: Vec<String>,
    pub edges: Vec<u64>,
    pub total_weight: f64,
}

pub fn path_report(
    loaded: &LoadedGraph,
    from: &str,
    to: &str,
    algorithm: PathAlgorithm,
) -> Result<PathReport, GraphError> {
    let begin = loaded.resolve(from)?;
    let end = loaded.resolve(to)?;

    let walk = match algorithm {
        PathAlgorithm::Dijkstra => DijkstraPathFinder::find_path(&loaded.graph, begin, end)?,
        PathAlgorithm::BellmanFord => BellmanFordPathFinder::find_path(&loaded.graph, begin, end)?,
    };

    Ok(PathReport {
        algorithm,
        from: from.to_string(),
        to: to.to_string(),
        walk: walk.map(|walk| WalkReport {
            nodes: loaded.labels(&walk.nodes),
            edges: walk.edges.iter().map(|id| id.0).collect(),
            total_weight: walk.total_weight,
        }),
    })
}

/// Find a lightest walk between two labeled nodes.
///
/// `algorithm` overrides the configured default.
pub fn cmd_path(
    loaded: &LoadedGraph,
    config: &ReticulaConfig,
    from: &str,
    to: &str,
    algorithm: Option<PathAlgorithm>,
    json_mode: bool,
) -> Result<(), GraphError> {
    let algorithm = algorithm.unwrap_or(config.path.algorithm);
    tracing::debug!("Path {} -> {} using {}", from, to, algorithm);
    let report = path_report(loaded, from, to, algorithm)?;

    if json_mode {
        print_json(&report);
        return Ok(());
    }

    match &report.walk {
        Some(walk) => {
            println!("Path {} -> {} ({})", report.from, report.to, report.algorithm);
            println!("  {}", walk.nodes.join(" -> "));
            println!("  Hops:   {}", walk.edges.len());
            println!("  Weight: {}", walk.total_weight);
        }
        None => println!("No path found from {} to {}", report.from, report.to),
    }
    Ok(())
}

// =============================================================================
// MST
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MstReport {
    pub edges: Vec<MstEdge>,
    pub total_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MstEdge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

pub fn mst_report(loaded: &LoadedGraph) -> Result<MstReport, GraphError> {
    let tree = PrimMinimumSpanningTree::find(&loaded.graph)?;

    let edges = tree
        .edges
        .iter()
        .filter_map(|id| loaded.graph.edge(*id))
        .map(|edge| MstEdge {
            from: loaded.label(edge.left()),
            to: loaded.label(edge.right()),
            weight: edge.weight_or_unit(),
        })
        .collect();

    Ok(MstReport {
        edges,
        total_weight: tree.total_weight,
    })
}

/// Compute a minimum spanning tree.
pub fn cmd_mst(loaded: &LoadedGraph, json_mode: bool) -> Result<(), GraphError> {
    let report = mst_report(loaded)?;

    if json_mode {
        print_json(&report);
        return Ok(());
    }

    println!("Minimum Spanning Tree");
    println!("=====================");
    for edge in &report.edges {
        println!("  {} - {} (weight: {})", edge.from, edge.to, edge.weight);
    }
    println!("Total weight: {}", report.total_weight);
    Ok(())
}

// =============================================================================
// CLIMB
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimbReport {
    pub start: String,
    /// `None` when the climb revisited a node.
    pub peak: Option<String>,
    pub weight: Option<f64>,
}

pub fn climb_report(loaded: &LoadedGraph, start: &str) -> Result<ClimbReport, GraphError> {
    let begin = loaded.resolve(start)?;
    let peak = HillClimbingSearch::search(&loaded.graph, begin)?;

    Ok(ClimbReport {
        start: start.to_string(),
        peak: peak.map(|id| loaded.label(id)),
        weight: peak.and_then(|id| loaded.graph.node(id)).map(|node| node.weight),
    })
}

/// Hill-climb on node weights from a labeled start.
pub fn cmd_climb(loaded: &LoadedGraph, start: &str, json_mode: bool) -> Result<(), GraphError> {
    let report = climb_report(loaded, start)?;

    if json_mode {
        print_json(&report);
        return Ok(());
    }

    match (&report.peak, report.weight) {
        (Some(peak), Some(weight)) => {
            println!("Climb from {} reached {} (weight: {})", report.start, peak, weight)
        }
        _ => println!("Climb from {} revisited a node: no peak", report.start),
    }
    Ok(())
}

// =============================================================================
// CLASSIFY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifyReport {
    pub simple: bool,
    pub weakly_connected: bool,
    pub acyclic: bool,
    pub tree: bool,
    pub forest: bool,
    /// Tree once edge direction is ignored.
    pub undirected_tree: bool,
    pub rooted_tree: bool,
    pub rooted_forest: bool,
    /// `None` when the container cannot answer.
    pub polytree: Option<bool>,
    /// Present when exhaustive cycle analysis is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<CyclesReport>,
}

pub fn classify_report(
    loaded: &LoadedGraph,
    config: &ReticulaConfig,
) -> Result<ClassifyReport, GraphError> {
    let graph = &loaded.graph;

    let polytree = match TreeClassifier::is_polytree(graph) {
        Ok(answer) => Some(answer),
        Err(GraphError::Unsupported(_)) => None,
        Err(e) => return Err(e),
    };

    Ok(ClassifyReport {
        simple: TreeClassifier::is_simple(graph),
        weakly_connected: TreeClassifier::is_weakly_connected(graph),
        acyclic: CycleDetector::is_acyclic(graph),
        tree: TreeClassifier::is_tree(graph),
        forest: TreeClassifier::is_forest(graph),
        undirected_tree: TreeClassifier::is_undirected_tree(graph),
        rooted_tree: TreeClassifier::is_rooted_tree(graph),
        rooted_forest: TreeClassifier::is_rooted_forest(graph),
        polytree,
        cycles: config
            .classify
            .exhaustive_cycles
            .then(|| cycles_report(loaded)),
    })
}

/// Report every structural predicate.
pub fn cmd_classify(
    loaded: &LoadedGraph,
    config: &ReticulaConfig,
    json_mode: bool,
) -> Result<(), GraphError> {
    let report = classify_report(loaded, config)?;

    if json_mode {
        print_json(&report);
        return Ok(());
    }

    println!("Classification");
    println!("==============");
    println!("Simple:           {}", yes_no(report.simple));
    println!("Weakly connected: {}", yes_no(report.weakly_connected));
    println!("Acyclic:          {}", yes_no(report.acyclic));
    println!("Tree:             {}", yes_no(report.tree));
    println!("Forest:           {}", yes_no(report.forest));
    println!("Undirected tree:  {}", yes_no(report.undirected_tree));
    println!("Rooted tree:      {}", yes_no(report.rooted_tree));
    println!("Rooted forest:    {}", yes_no(report.rooted_forest));
    println!(
        "Polytree:         {}",
        report.polytree.map_or("unknown", yes_no)
    );
    if let Some(cycles) = &report.cycles {
        println!();
        print_cycles(cycles);
    }
    Ok(())
}

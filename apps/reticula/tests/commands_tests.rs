//! Tests for the CLI command reports.
//!
//! Each graph is written to a temporary file and loaded the way the binary
//! loads it.

#![allow(clippy::unwrap_used, clippy::panic)]

use reticula::cli::{
    classify_report, climb_report, cmd_classify, cmd_info, cmd_path, cycles_report, info_report,
    mst_report, path_report, rank_report, sort_report,
};
use reticula::config::{PathAlgorithm, ReticulaConfig};
use reticula::loader::LoadedGraph;
use reticula_core::{EdgeKind, GraphError};

/// a-b(1), a-c(3), b-c(2), b-d(2), c-d(1), all undirected.
const DIAMOND: &str = r#"
[[nodes]]
label = "a"
[[nodes]]
label = "b"
[[nodes]]
label = "c"
[[nodes]]
label = "d"

[[edges]]
from = "a"
to = "b"
weight = 1.0
[[edges]]
from = "a"
to = "c"
weight = 3.0
[[edges]]
from = "b"
to = "c"
weight = 2.0
[[edges]]
from = "b"
to = "d"
weight = 2.0
[[edges]]
from = "c"
to = "d"
weight = 1.0
"#;

/// x -> y -> z plus the shortcut x -> z.
const DAG: &str = r#"{
    "nodes": [{"label": "x"}, {"label": "y"}, {"label": "z"}],
    "edges": [
        {"from": "x", "to": "y", "directed": true},
        {"from": "y", "to": "z", "directed": true},
        {"from": "x", "to": "z", "directed": true}
    ]
}"#;

/// The DAG closed into a directed cycle.
const LOOP: &str = r#"{
    "nodes": [{"label": "x"}, {"label": "y"}, {"label": "z"}],
    "edges": [
        {"from": "x", "to": "y", "directed": true},
        {"from": "y", "to": "z", "directed": true},
        {"from": "z", "to": "x", "directed": true}
    ]
}"#;

/// p(1) - q(5) - r(3), undirected.
const HILL: &str = r#"{
    "nodes": [
        {"label": "p", "weight": 1.0},
        {"label": "q", "weight": 5.0},
        {"label": "r", "weight": 3.0}
    ],
    "edges": [{"from": "p", "to": "q"}, {"from": "q", "to": "r"}]
}"#;

fn load(name: &str, text: &str) -> LoadedGraph {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    LoadedGraph::load(&path).unwrap()
}

// =============================================================================
// INFO / CYCLES
// =============================================================================

#[test]
fn test_info_counts_elements_and_kinds() {
    let report = info_report(&load("diamond.toml", DIAMOND));
    assert_eq!(report.nodes, 4);
    assert_eq!(report.edges, 5);
    assert_eq!(report.components, 1);
    assert!(!report.acyclic);
    assert_eq!(report.edge_kinds.get(&EdgeKind::Undirected), Some(&5));
}

#[test]
fn test_info_json_uses_snake_case_kinds() {
    let report = info_report(&load("dag.json", DAG));
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["edge_kinds"]["directed"], 3);
    assert_eq!(value["acyclic"], true);
}

#[test]
fn test_diamond_cycles() {
    let report = cycles_report(&load("diamond.toml", DIAMOND));
    assert_eq!(report.count, 3);
    assert_eq!(report.girth, Some(3));
    assert_eq!(report.circumference, Some(4));
    assert!(report.pancyclic);
    assert!(!report.unicyclic);
    assert!(report.cycles.iter().all(|cycle| cycle.len() >= 3));
}

// =============================================================================
// ORDERING
// =============================================================================

#[test]
fn test_rank_and_sort_on_dag() {
    let loaded = load("dag.json", DAG);
    assert_eq!(
        rank_report(&loaded),
        Some(vec![
            vec!["x".to_string()],
            vec!["y".to_string()],
            vec!["z".to_string()],
        ])
    );
    assert_eq!(
        sort_report(&loaded),
        Some(vec!["x".to_string(), "y".to_string(), "z".to_string()])
    );
}

#[test]
fn test_cycle_has_no_ordering() {
    let loaded = load("loop.json", LOOP);
    assert_eq!(rank_report(&loaded), None);
    assert_eq!(sort_report(&loaded), None);
}

// =============================================================================
// PATH
// =============================================================================

#[test]
fn test_path_finders_agree_on_diamond() {
    let loaded = load("diamond.toml", DIAMOND);

    for algorithm in [PathAlgorithm::Dijkstra, PathAlgorithm::BellmanFord] {
        let report = path_report(&loaded, "a", "d", algorithm).unwrap();
        let walk = report.walk.unwrap();
        assert_eq!(walk.nodes, vec!["a", "b", "d"]);
        assert_eq!(walk.edges.len(), 2);
        assert!((walk.total_weight - 3.0).abs() < f64::EPSILON);
    }
}

#[test]
fn test_unreachable_target_has_no_walk() {
    let report = path_report(&load("dag.json", DAG), "z", "x", PathAlgorithm::Dijkstra).unwrap();
    assert!(report.walk.is_none());
}

#[test]
fn test_path_rejects_unknown_and_equal_endpoints() {
    let loaded = load("dag.json", DAG);
    assert!(matches!(
        path_report(&loaded, "x", "ghost", PathAlgorithm::Dijkstra),
        Err(GraphError::InvalidArgument(_))
    ));
    assert!(matches!(
        path_report(&loaded, "x", "x", PathAlgorithm::BellmanFord),
        Err(GraphError::InvalidArgument(_))
    ));
    assert!(cmd_path(&loaded, &ReticulaConfig::default(), "x", "ghost", None, true).is_err());
}

#[test]
fn test_negative_weight_needs_bellman_ford() {
    let loaded = load(
        "negative.json",
        r#"{
            "nodes": [{"label": "s"}, {"label": "m"}, {"label": "t"}],
            "edges": [
                {"from": "s", "to": "t", "directed": true, "weight": 1.0},
                {"from": "s", "to": "m", "directed": true, "weight": 2.0},
                {"from": "m", "to": "t", "directed": true, "weight": -3.0}
            ]
        }"#,
    );

    assert!(matches!(
        path_report(&loaded, "s", "t", PathAlgorithm::Dijkstra),
        Err(GraphError::NegativeWeight { .. })
    ));
    let walk = path_report(&loaded, "s", "t", PathAlgorithm::BellmanFord)
        .unwrap()
        .walk
        .unwrap();
    assert_eq!(walk.nodes, vec!["s", "m", "t"]);
    assert!((walk.total_weight + 1.0).abs() < f64::EPSILON);
}

// =============================================================================
// MST / CLIMB
// =============================================================================

#[test]
fn test_diamond_spanning_tree() {
    let report = mst_report(&load("diamond.toml", DIAMOND)).unwrap();
    assert_eq!(report.edges.len(), 3);
    assert!((report.total_weight - 4.0).abs() < f64::EPSILON);
    let sum: f64 = report.edges.iter().map(|edge| edge.weight).sum();
    assert!((sum - report.total_weight).abs() < f64::EPSILON);
}

#[test]
fn test_disconnected_graph_has_no_spanning_tree() {
    let loaded = load(
        "pair.json",
        r#"{"nodes": [{"label": "a"}, {"label": "b"}]}"#,
    );
    assert!(matches!(mst_report(&loaded), Err(GraphError::NotConnected)));
}

#[test]
fn test_climb_reaches_heaviest_neighbor() {
    let loaded = load("hill.json", HILL);

    let report = climb_report(&loaded, "p").unwrap();
    assert_eq!(report.peak.as_deref(), Some("q"));
    assert_eq!(report.weight, Some(5.0));

    let report = climb_report(&loaded, "q").unwrap();
    assert_eq!(report.peak.as_deref(), Some("q"));
}

// =============================================================================
// CLASSIFY
// =============================================================================

#[test]
fn test_classify_diamond() {
    let loaded = load("diamond.toml", DIAMOND);
    let report = classify_report(&loaded, &ReticulaConfig::default()).unwrap();

    assert!(report.simple);
    assert!(report.weakly_connected);
    assert!(!report.tree);
    assert!(!report.forest);
    assert_eq!(report.polytree, None);
    assert!(report.cycles.is_none());
}

#[test]
fn test_classify_path_graph_is_a_rooted_tree() {
    let loaded = load(
        "chain.json",
        r#"{
            "nodes": [{"label": "root"}, {"label": "mid"}, {"label": "leaf"}],
            "edges": [
                {"from": "root", "to": "mid", "directed": true},
                {"from": "mid", "to": "leaf", "directed": true}
            ]
        }"#,
    );
    let report = classify_report(&loaded, &ReticulaConfig::default()).unwrap();

    assert!(report.acyclic);
    assert!(report.tree);
    assert!(report.forest);
    assert!(report.undirected_tree);
    assert!(report.rooted_tree);
    assert!(report.rooted_forest);
}

#[test]
fn test_classify_directed_diamond() {
    let loaded = load(
        "fork.json",
        r#"{
            "nodes": [{"label": "s"}, {"label": "l"}, {"label": "r"}, {"label": "t"}],
            "edges": [
                {"from": "s", "to": "l", "directed": true},
                {"from": "s", "to": "r", "directed": true},
                {"from": "l", "to": "t", "directed": true},
                {"from": "r", "to": "t", "directed": true}
            ]
        }"#,
    );
    let report = classify_report(&loaded, &ReticulaConfig::default()).unwrap();

    assert!(report.acyclic);
    assert!(report.simple);
    assert!(report.tree);
    assert!(report.forest);
    assert!(!report.undirected_tree);
}

#[test]
fn test_classify_with_exhaustive_cycles() {
    let loaded = load("diamond.toml", DIAMOND);
    let config = ReticulaConfig::from_toml_str("[classify]\nexhaustive_cycles = true\n").unwrap();

    let report = classify_report(&loaded, &config).unwrap();
    assert_eq!(report.cycles.map(|cycles| cycles.count), Some(3));
}

#[test]
fn test_commands_print_without_error() {
    let loaded = load("diamond.toml", DIAMOND);
    let config = ReticulaConfig::default();
    for json_mode in [false, true] {
        assert!(cmd_info(&loaded, json_mode).is_ok());
        assert!(cmd_classify(&loaded, &config, json_mode).is_ok());
        assert!(cmd_path(&loaded, &config, "a", "d", None, json_mode).is_ok());
    }
}

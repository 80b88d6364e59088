//! Tests for the TOML configuration file.

#![allow(clippy::unwrap_used, clippy::panic)]

use reticula::config::{ClassifyConfig, PathAlgorithm, PathConfig, ReticulaConfig};
use reticula_core::GraphError;

#[test]
fn test_config_default() {
    let config = ReticulaConfig::default();
    assert_eq!(config.path.algorithm, PathAlgorithm::Dijkstra);
    assert!(!config.classify.exhaustive_cycles);
}

#[test]
fn test_empty_file_is_default() {
    let config = ReticulaConfig::from_toml_str("").unwrap();
    assert_eq!(config, ReticulaConfig::default());
}

#[test]
fn test_full_config() {
    let config = ReticulaConfig::from_toml_str(
        r#"
        [path]
        algorithm = "bellman-ford"

        [classify]
        exhaustive_cycles = true
        "#,
    )
    .unwrap();

    assert_eq!(
        config,
        ReticulaConfig {
            path: PathConfig {
                algorithm: PathAlgorithm::BellmanFord,
            },
            classify: ClassifyConfig {
                exhaustive_cycles: true,
            },
        }
    );
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config = ReticulaConfig::from_toml_str("[classify]\nexhaustive_cycles = true\n").unwrap();
    assert_eq!(config.path.algorithm, PathAlgorithm::Dijkstra);
    assert!(config.classify.exhaustive_cycles);
}

#[test]
fn test_unknown_algorithm_is_rejected() {
    let result = ReticulaConfig::from_toml_str("[path]\nalgorithm = \"astar\"\n");
    assert!(matches!(result, Err(GraphError::Serialization(_))));
}

#[test]
fn test_algorithm_serializes_in_kebab_case() {
    let config = ReticulaConfig {
        path: PathConfig {
            algorithm: PathAlgorithm::BellmanFord,
        },
        classify: ClassifyConfig::default(),
    };
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["path"]["algorithm"], "bellman-ford");
    assert_eq!(value["classify"]["exhaustive_cycles"], false);
}

#[test]
fn test_load_without_path_is_default() {
    assert_eq!(ReticulaConfig::load(None).unwrap(), ReticulaConfig::default());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reticula.toml");
    std::fs::write(&path, "[path]\nalgorithm = \"bellman-ford\"\n").unwrap();

    let config = ReticulaConfig::load(Some(&path)).unwrap();
    assert_eq!(config.path.algorithm, PathAlgorithm::BellmanFord);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ReticulaConfig::load(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(GraphError::Io(_))));
}

#[test]
fn test_algorithm_display_matches_config_spelling() {
    assert_eq!(PathAlgorithm::Dijkstra.to_string(), "dijkstra");
    assert_eq!(PathAlgorithm::BellmanFord.to_string(), "bellman-ford");
}

//! # Configuration
//!
//! Optional TOML file holding algorithm defaults for the CLI.
//!
//! ```toml
//! [path]
//! algorithm = "bellman-ford"
//!
//! [classify]
//! exhaustive_cycles = true
//! ```
//!
//! Every section and key is optional; missing values fall back to
//! [`ReticulaConfig::default`]. Command-line flags win over the file.

use reticula_core::GraphError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum accepted config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// CONFIG TYPES
// =============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReticulaConfig {
    /// Shortest-path defaults.
    pub path: PathConfig,
    /// Classification defaults.
    pub classify: ClassifyConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Finder used by `path` when `--algorithm` is not given.
    pub algorithm: PathAlgorithm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Also enumerate every simple cycle when classifying.
    ///
    /// Exponential in the worst case, so off unless asked for.
    pub exhaustive_cycles: bool,
}

/// Shortest-path algorithm selector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PathAlgorithm {
    /// Non-negative weights only.
    #[default]
    Dijkstra,
    /// Accepts negative weights, reports negative cycles.
    BellmanFord,
}

impl std::fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dijkstra => write!(f, "dijkstra"),
            Self::BellmanFord => write!(f, "bellman-ford"),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl ReticulaConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, GraphError> {
        toml::from_str(text)
            .map_err(|e| GraphError::Serialization(format!("Invalid config: {}", e)))
    }

    /// Load the config file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, GraphError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = crate::loader::read_checked(path, MAX_CONFIG_FILE_SIZE)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

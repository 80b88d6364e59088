//! # Graph Loading
//!
//! Reads a graph description file and builds the labeled graph it
//! describes. The format is chosen by extension: `.toml` is TOML,
//! anything else is JSON.

use reticula_core::{
    Graph, GraphDescription, GraphError, GraphStore, LabelIndex, LabeledEdge, LabeledNode, NodeId,
};
use std::path::{Path, PathBuf};

/// Graph type produced by every description file.
pub type LabeledGraph = Graph<LabeledNode, LabeledEdge>;

/// Maximum description file size (100 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_DESCRIPTION_FILE_SIZE: u64 = 100 * 1024 * 1024;

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), GraphError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| GraphError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(GraphError::Serialization(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize `path` and ensure it names an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, GraphError> {
    let canonical = path.canonicalize().map_err(|e| {
        GraphError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(GraphError::Io(format!(
            "Path '{}' is not a file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate then read a text file of at most `max_size` bytes.
pub(crate) fn read_checked(path: &Path, max_size: u64) -> Result<String, GraphError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, max_size)?;
    std::fs::read_to_string(&validated)
        .map_err(|e| GraphError::Io(format!("Cannot read '{}': {}", path.display(), e)))
}

// =============================================================================
// DESCRIPTION FORMATS
// =============================================================================

/// Text encoding of a description file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    Json,
    Toml,
}

impl DescriptionFormat {
    /// Pick the format from a file extension, defaulting to JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    /// Parse description text in this format.
    pub fn parse(self, text: &str) -> Result<GraphDescription, GraphError> {
        match self {
            Self::Json => serde_json::from_str(text)
                .map_err(|e| GraphError::Serialization(format!("Invalid JSON description: {}", e))),
            Self::Toml => toml::from_str(text)
                .map_err(|e| GraphError::Serialization(format!("Invalid TOML description: {}", e))),
        }
    }
}

// =============================================================================
// LOADED GRAPH
// =============================================================================

/// A graph built from a description, with its label index.
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: LabeledGraph,
    pub index: LabelIndex,
}

impl LoadedGraph {
    /// Build from an already parsed description.
    pub fn from_description(description: GraphDescription) -> Result<Self, GraphError> {
        let (graph, index) = description.into_graph()?;
        Ok(Self { graph, index })
    }

    /// Read, parse and build the description at `path`.
    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let text = read_checked(path, MAX_DESCRIPTION_FILE_SIZE)?;
        let description = DescriptionFormat::from_path(path).parse(&text)?;
        let loaded = Self::from_description(description)?;
        tracing::info!(
            "Loaded {}: {} nodes, {} edges",
            path.display(),
            loaded.graph.node_count(),
            loaded.graph.edge_count()
        );
        Ok(loaded)
    }

    /// Node id for a label given on the command line.
    pub fn resolve(&self, label: &str) -> Result<NodeId, GraphError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::InvalidArgument(format!("Unknown node label '{}'", label)))
    }

    /// Label of a node, or its id when it has none.
    #[must_use]
    pub fn label(&self, id: NodeId) -> String {
        self.graph
            .node(id)
            .map_or_else(|| id.to_string(), |node| node.label.clone())
    }

    /// Labels for a list of node ids.
    #[must_use]
    pub fn labels<'a>(&self, ids: impl IntoIterator<Item = &'a NodeId>) -> Vec<String> {
        ids.into_iter().map(|id| self.label(*id)).collect()
    }
}

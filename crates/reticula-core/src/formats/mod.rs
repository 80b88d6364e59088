//! # Formats
//!
//! Serde-friendly descriptions of graphs.
//!
//! The engine addresses elements by id; descriptions address them by label
//! so they can be written by hand. Parsing text (JSON, TOML) and file I/O
//! live in the app layer.

mod description;

pub use description::{
    EdgeDescription, GraphDescription, LabelIndex, LabeledEdge, LabeledNode, NodeDescription,
};

//! JSON graph documents
//!
//! A `GraphDocument` describes graph topology (and optionally seed
//! positions) for populating an engine. A `PositionsDocument` is what a
//! layout run emits: one position per node.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::LayoutAlgorithm;
use crate::error::DocumentResult;
use crate::graph::{EdgeSpec, GraphModel, NodeSpec};
use crate::vector::Vec3;

/// Graph topology for populating an engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Version of the document format (for future compatibility)
    #[serde(default = "GraphDocument::default_format_version")]
    pub format_version: String,

    /// Nodes, inserted in order
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,

    /// Edges, inserted after all nodes
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl GraphDocument {
    /// Format version constant
    pub const FORMAT_VERSION: &'static str = "1.0";

    fn default_format_version() -> String {
        Self::FORMAT_VERSION.to_string()
    }

    /// Create an empty document
    pub fn new() -> Self {
        Self {
            format_version: Self::default_format_version(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Parse a document from JSON
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a document from a JSON file
    pub fn load(path: &Path) -> DocumentResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Laid-out position of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub id: String,
    pub position: Vec3,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fixed: bool,
}

/// Result of a layout run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionsDocument {
    pub layout: LayoutAlgorithm,
    /// Layout steps taken
    pub steps: usize,
    pub nodes: Vec<NodePosition>,
}

impl PositionsDocument {
    /// Capture the current positions of every node
    pub fn capture(graph: &GraphModel, layout: LayoutAlgorithm, steps: usize) -> Self {
        Self {
            layout,
            steps,
            nodes: graph
                .nodes()
                .iter()
                .map(|n| NodePosition {
                    id: n.id.clone(),
                    position: n.position,
                    fixed: n.fixed,
                })
                .collect(),
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

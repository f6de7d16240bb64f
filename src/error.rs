//! Error types for graph mutation, configuration and document loading
//!
//! Not-found conditions (unknown node or edge IDs) are never errors: lookups
//! return `Option` and removals of unknown IDs are no-ops.

use thiserror::Error;

/// Errors raised when a structural mutation would break graph consistency
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge references a node that is not in the model
    #[error("edge '{edge}' references unknown endpoint '{endpoint}'")]
    UnknownEndpoint { edge: String, endpoint: String },

    /// An edge connects a node to itself
    #[error("edge '{0}' is a self-loop")]
    SelfLoop(String),
}

/// Result type for graph mutations
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid YAML for `EngineConfig`
    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A parameter is outside its valid range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading or writing a graph document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON for `GraphDocument`
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document describes an inconsistent graph
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_endpoint_message_names_edge_and_node() {
        let err = GraphError::UnknownEndpoint {
            edge: "e1".to_string(),
            endpoint: "ghost".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "edge 'e1' references unknown endpoint 'ghost'"
        );
    }

    #[test]
    fn graph_error_converts_into_document_error() {
        let err: DocumentError = GraphError::SelfLoop("loop".to_string()).into();
        assert_eq!(err.to_string(), "graph error: edge 'loop' is a self-loop");
    }
}

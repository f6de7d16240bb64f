//! graphscape - a 3D graph layout and simulation engine.
//!
//! The engine owns a mutable graph of nodes and edges, positions every node
//! under a chosen layout algorithm (a force-directed simulation or one of
//! several deterministic geometric layouts), and answers structural queries
//! such as shortest paths and degree statistics. Hosts drive it once per
//! rendered frame through [`GraphEngine::update`].
//!
//! ```
//! use graphscape::{EdgeSpec, GraphEngine, LayoutAlgorithm, LayoutConfig, NodeSpec};
//!
//! let mut engine = GraphEngine::new();
//! engine.add_node(NodeSpec::new("a"));
//! engine.add_node(NodeSpec::new("b"));
//! engine.add_edge(EdgeSpec::new("a", "b")).unwrap();
//!
//! engine.set_layout(LayoutConfig::new(LayoutAlgorithm::Circular)).unwrap();
//! engine.start_simulation();
//! engine.update(16.0);
//!
//! assert!(!engine.is_running());
//! assert_eq!(engine.find_path("a", "b"), ["a", "b"]);
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod graph;
pub mod layout;
pub mod path;
pub mod scheduler;
pub mod stats;
pub mod vector;
pub mod visualization;

pub use config::{BoundingBox, EngineConfig, LayoutAlgorithm, LayoutConfig};
pub use document::{GraphDocument, PositionsDocument};
pub use engine::GraphEngine;
pub use error::{ConfigError, DocumentError, GraphError};
pub use graph::{Edge, EdgeSpec, GraphModel, Node, NodeSpec};
pub use path::PathFinder;
pub use scheduler::{SimulationScheduler, SimulationState, Tick};
pub use stats::{GraphStatistics, StatisticsReporter};
pub use vector::Vec3;
pub use visualization::Visualization;

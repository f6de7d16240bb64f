//! Graph data model: node/edge records and the store that owns them

mod model;
mod types;

pub use model::{DirtyFlags, GraphModel};
pub use types::{
    DEFAULT_MASS, DEFAULT_NODE_SIZE, DEFAULT_WEIGHT, Edge, EdgeSpec, Node, NodeSpec, colors,
};

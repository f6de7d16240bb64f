//! Node and edge records plus the specs used to create them
//!
//! Specs carry only what the caller wants to set; everything else takes a
//! default when the record is inserted into a `GraphModel`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::LayoutConfig;
use crate::vector::Vec3;

/// Color constants (RGBA, normalized 0.0-1.0)
pub mod colors {
    /// Default node color: neutral grey
    pub const NODE: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

    /// Default edge color: light grey
    pub const EDGE: [f32; 4] = [0.7, 0.7, 0.7, 1.0];
}

/// Default node mass
pub const DEFAULT_MASS: f32 = 1.0;

/// Default node size (render radius)
pub const DEFAULT_NODE_SIZE: f32 = 1.0;

/// Default edge weight
pub const DEFAULT_WEIGHT: f32 = 1.0;

/// A node owned by a `GraphModel`
///
/// Neighbour IDs are not stored on the node itself; the model keeps them in
/// a central adjacency index (see `GraphModel::connections`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Stable, unique identifier
    pub id: String,
    /// Display string
    pub label: String,
    /// Position in 3D space
    pub position: Vec3,
    /// Velocity (force layout only)
    pub velocity: Vec3,
    /// Force accumulator, cleared every force-layout step
    pub force: Vec3,
    /// Positive mass dividing the applied force
    pub mass: f32,
    /// Render radius
    pub size: f32,
    /// RGBA color
    pub color: [f32; 4],
    /// Pinned nodes are never moved by a layout
    pub fixed: bool,
    /// Free-form classification tag
    #[serde(rename = "type")]
    pub node_type: String,
    /// Opaque payload, passed through unmodified
    pub metadata: Value,
}

impl Node {
    /// Build a node from a spec, filling defaults for unspecified fields
    pub fn from_spec(spec: NodeSpec) -> Self {
        let mass = match spec.mass {
            Some(mass) if mass.is_finite() && mass > 0.0 => mass,
            Some(mass) => {
                tracing::warn!(node = %spec.id, mass, "non-positive mass replaced with default");
                DEFAULT_MASS
            }
            None => DEFAULT_MASS,
        };

        let position = match spec.position {
            Some(position) if position.is_finite() => position,
            Some(position) => {
                tracing::warn!(node = %spec.id, ?position, "non-finite position replaced with origin");
                Vec3::ZERO
            }
            None => Vec3::ZERO,
        };

        Self {
            label: spec.label.unwrap_or_else(|| spec.id.clone()),
            id: spec.id,
            position,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            mass,
            size: spec.size.unwrap_or(DEFAULT_NODE_SIZE),
            color: spec.color.unwrap_or(colors::NODE),
            fixed: spec.fixed.unwrap_or(false),
            node_type: spec.node_type.unwrap_or_default(),
            metadata: spec.metadata.unwrap_or(Value::Null),
        }
    }

    /// Kinetic energy of this node (½·m·|v|²)
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

/// Caller-supplied description of a node to insert
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl NodeSpec {
    /// Spec with only an ID; every other field defaults
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Some(Vec3::new(x, y, z));
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Pin the node so no layout moves it
    pub fn fixed(mut self) -> Self {
        self.fixed = Some(true);
        self
    }
}

/// An edge owned by a `GraphModel`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    /// Unique identifier
    pub id: String,
    /// Source node ID
    pub source: String,
    /// Target node ID
    pub target: String,
    /// Advisory weight (not used by the provided layouts)
    pub weight: f32,
    /// Spring rest length; `None` uses the layout's `edge_length`
    pub length: Option<f32>,
    /// RGBA color
    pub color: [f32; 4],
    /// Free-form classification tag
    #[serde(rename = "type")]
    pub edge_type: String,
    /// Hidden edges are left out of the visualization buffers
    pub visible: bool,
    /// Render hint for animated edges
    pub animated: bool,
}

impl Edge {
    /// Build an edge from a spec, filling defaults for unspecified fields
    pub fn from_spec(spec: EdgeSpec) -> Self {
        Self {
            id: spec.resolved_id(),
            source: spec.source,
            target: spec.target,
            weight: spec.weight.unwrap_or(DEFAULT_WEIGHT),
            length: spec.length,
            color: spec.color.unwrap_or(colors::EDGE),
            edge_type: spec.edge_type.unwrap_or_default(),
            visible: spec.visible.unwrap_or(true),
            animated: spec.animated.unwrap_or(false),
        }
    }

    /// Spring rest length under the given configuration
    pub fn rest_length(&self, config: &LayoutConfig) -> f32 {
        self.length.unwrap_or(config.edge_length)
    }

    /// Check whether this edge touches the given node
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

}

/// Caller-supplied description of an edge to insert
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Edge ID; defaults to `"<source>-><target>"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 4]>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
}

impl EdgeSpec {
    /// Spec between two nodes with a derived ID
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_length(mut self, length: f32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_type(mut self, edge_type: impl Into<String>) -> Self {
        self.edge_type = Some(edge_type.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = Some(false);
        self
    }

    /// The ID this edge will be stored under
    pub fn resolved_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("{}->{}", self.source, self.target))
    }
}

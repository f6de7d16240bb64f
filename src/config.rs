//! Layout and engine configuration
//!
//! `LayoutConfig` selects the active layout algorithm and carries its
//! parameters. `EngineConfig` wraps it together with scheduler settings and
//! can be loaded from YAML.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::vector::Vec3;

// =============================================================================
// Default Constants
// =============================================================================

/// Default repulsion strength between every node pair (inverse square law)
pub const DEFAULT_REPULSION: f32 = 1000.0;

/// Default spring constant for edge attraction
pub const DEFAULT_ATTRACTION: f32 = 0.01;

/// Default velocity decay factor (0-1, applied each step)
pub const DEFAULT_DAMPING: f32 = 0.9;

/// Default pull-to-origin coefficient
pub const DEFAULT_CENTER_FORCE: f32 = 0.001;

/// Default spacing unit for geometric layouts
pub const DEFAULT_NODE_SPACING: f32 = 50.0;

/// Default spring rest length
pub const DEFAULT_EDGE_LENGTH: f32 = 100.0;

/// Default cap on force-directed steps before auto-stop
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Default kinetic-energy threshold (0 disables early convergence)
pub const DEFAULT_CONVERGENCE_THRESHOLD: f32 = 0.0;

/// Default per-axis speed limit for force-layout nodes (prevents numerical explosion)
pub const DEFAULT_MAX_VELOCITY: f32 = 100.0;

/// Default half-extent of the bounding box on each axis
pub const DEFAULT_BOUNDS_EXTENT: f32 = 1000.0;

/// Default minimum interval between effective scheduler ticks (~60 Hz)
pub const DEFAULT_TICK_INTERVAL_MS: f64 = 16.0;

/// Layout algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutAlgorithm {
    /// Iterative physics simulation (O(n²) per step)
    #[default]
    Force,
    /// BFS levels from root nodes, one level per layer
    Hierarchical,
    /// Evenly spaced ring
    Circular,
    /// Square lattice
    Grid,
    /// Expanding 3D helix
    Spiral,
}

impl LayoutAlgorithm {
    /// All algorithms, in dispatch order
    pub const ALL: [LayoutAlgorithm; 5] = [
        LayoutAlgorithm::Force,
        LayoutAlgorithm::Hierarchical,
        LayoutAlgorithm::Circular,
        LayoutAlgorithm::Grid,
        LayoutAlgorithm::Spiral,
    ];

    /// Identifier used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutAlgorithm::Force => "force",
            LayoutAlgorithm::Hierarchical => "hierarchical",
            LayoutAlgorithm::Circular => "circular",
            LayoutAlgorithm::Grid => "grid",
            LayoutAlgorithm::Spiral => "spiral",
        }
    }
}

impl fmt::Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutAlgorithm::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::Invalid(format!("unknown layout algorithm: {}", s)))
    }
}

/// Axis-aligned region that all node positions are clamped into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Create a bounding box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A cube centered on the origin
    pub fn centered(half_extent: f32) -> Self {
        Self::new(Vec3::splat(-half_extent), Vec3::splat(half_extent))
    }

    /// Clamp a point into the box
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Check whether a point lies inside the box (inclusive)
    pub fn contains(&self, point: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::centered(DEFAULT_BOUNDS_EXTENT)
    }
}

/// Layout algorithm selector plus parameter bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Active layout algorithm
    pub algorithm: LayoutAlgorithm,
    /// Repulsion strength between node pairs
    pub repulsion: f32,
    /// Spring constant for edges
    pub attraction: f32,
    /// Velocity decay factor, in (0, 1)
    pub damping: f32,
    /// Pull-to-origin coefficient
    pub center_force: f32,
    /// Base spacing unit for geometric layouts
    pub node_spacing: f32,
    /// Default spring rest length for edges without their own length
    pub edge_length: f32,
    /// Hard cap on force-directed steps
    pub iterations: usize,
    /// Total kinetic energy below which the force layout counts as converged
    pub convergence_threshold: f32,
    /// Per-axis velocity cap applied every force step
    pub max_velocity: f32,
    /// Region all positions are clamped into
    pub bounds: BoundingBox,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            algorithm: LayoutAlgorithm::default(),
            repulsion: DEFAULT_REPULSION,
            attraction: DEFAULT_ATTRACTION,
            damping: DEFAULT_DAMPING,
            center_force: DEFAULT_CENTER_FORCE,
            node_spacing: DEFAULT_NODE_SPACING,
            edge_length: DEFAULT_EDGE_LENGTH,
            iterations: DEFAULT_ITERATIONS,
            convergence_threshold: DEFAULT_CONVERGENCE_THRESHOLD,
            max_velocity: DEFAULT_MAX_VELOCITY,
            bounds: BoundingBox::default(),
        }
    }
}

impl LayoutConfig {
    /// Default configuration for the given algorithm
    pub fn new(algorithm: LayoutAlgorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Set the force-layout iteration cap
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the geometric spacing unit
    pub fn with_node_spacing(mut self, node_spacing: f32) -> Self {
        self.node_spacing = node_spacing;
        self
    }

    /// Set the bounding box
    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    /// Check every parameter is within its valid range
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "damping must be in (0, 1), got {}",
                self.damping
            )));
        }

        for (name, value) in [
            ("repulsion", self.repulsion),
            ("attraction", self.attraction),
            ("center_force", self.center_force),
            ("convergence_threshold", self.convergence_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("node_spacing", self.node_spacing),
            ("edge_length", self.edge_length),
            ("max_velocity", self.max_velocity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let BoundingBox { min, max } = self.bounds;
        if !min.is_finite() || !max.is_finite() || min.x > max.x || min.y > max.y || min.z > max.z
        {
            return Err(ConfigError::Invalid(format!(
                "bounding box min {:?} must not exceed max {:?}",
                min, max
            )));
        }

        Ok(())
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial layout configuration
    pub layout: LayoutConfig,
    /// Minimum interval between effective scheduler ticks, in milliseconds
    pub tick_interval_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML configuration
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check every parameter is within its valid range
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.tick_interval_ms.is_finite() || self.tick_interval_ms < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tick_interval_ms must be finite and non-negative, got {}",
                self.tick_interval_ms
            )));
        }
        self.layout.validate()
    }
}

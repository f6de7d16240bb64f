//! Deterministic one-shot placements: circular, grid and spiral
//!
//! Each placement is a pure function of the node's insertion index, the
//! node count and the configuration. Edges are ignored, and re-applying a
//! placement to an unchanged graph reproduces bit-identical positions.

use std::f32::consts::TAU;

use super::{LayoutStrategy, place_nodes};
use crate::config::{LayoutAlgorithm, LayoutConfig};
use crate::graph::GraphModel;
use crate::vector::Vec3;

/// Vertical wave amplitude, as a fraction of node spacing
const WAVE_AMPLITUDE: f32 = 0.1;

/// Angle between consecutive spiral nodes, in radians
const SPIRAL_TURN: f32 = 0.5;

/// Spiral radius growth per radian, as a fraction of node spacing
const SPIRAL_GROWTH: f32 = 0.5;

/// Spiral height gain per node, as a fraction of node spacing
const SPIRAL_RISE: f32 = 0.1;

/// Nodes evenly spaced on a ring in the xz-plane
#[derive(Debug, Clone, Copy, Default)]
pub struct Circular;

impl Circular {
    /// Position of node `index` of `count`
    pub fn position(index: usize, count: usize, spacing: f32) -> Vec3 {
        if count < 2 {
            return Vec3::ZERO;
        }

        // Chord between neighbours equals the spacing
        let radius = spacing / (2.0 * (std::f32::consts::PI / count as f32).sin());
        let angle = TAU * index as f32 / count as f32;

        Vec3::new(
            radius * angle.cos(),
            (angle * 3.0).sin() * spacing * WAVE_AMPLITUDE,
            radius * angle.sin(),
        )
    }
}

impl LayoutStrategy for Circular {
    fn algorithm(&self) -> LayoutAlgorithm {
        LayoutAlgorithm::Circular
    }

    fn apply(&self, graph: &mut GraphModel, config: &LayoutConfig) -> bool {
        let spacing = config.node_spacing;
        place_nodes(graph, config, |index, count| {
            Self::position(index, count, spacing)
        });
        false
    }
}

/// Nodes on a square lattice in the xz-plane, centered on the origin
#[derive(Debug, Clone, Copy, Default)]
pub struct Grid;

impl Grid {
    /// Cells per side for `count` nodes: ⌈√count⌉
    pub fn side(count: usize) -> usize {
        (count as f64).sqrt().ceil() as usize
    }

    /// Position of node `index` of `count`
    pub fn position(index: usize, count: usize, spacing: f32) -> Vec3 {
        let side = Self::side(count).max(1);
        let (col, row) = (index % side, index / side);
        let half = (side as f32 - 1.0) / 2.0;

        Vec3::new(
            (col as f32 - half) * spacing,
            ((col + row) as f32 * 0.5).sin() * spacing * WAVE_AMPLITUDE,
            (row as f32 - half) * spacing,
        )
    }
}

impl LayoutStrategy for Grid {
    fn algorithm(&self) -> LayoutAlgorithm {
        LayoutAlgorithm::Grid
    }

    fn apply(&self, graph: &mut GraphModel, config: &LayoutConfig) -> bool {
        let spacing = config.node_spacing;
        place_nodes(graph, config, |index, count| {
            Self::position(index, count, spacing)
        });
        false
    }
}

/// Nodes along an expanding helix rising through y
#[derive(Debug, Clone, Copy, Default)]
pub struct Spiral;

impl Spiral {
    /// Position of node `index` of `count`
    pub fn position(index: usize, count: usize, spacing: f32) -> Vec3 {
        let angle = index as f32 * SPIRAL_TURN;
        let radius = spacing * SPIRAL_GROWTH * angle;
        let height = (index as f32 - (count as f32 - 1.0) / 2.0) * spacing * SPIRAL_RISE;

        Vec3::new(radius * angle.cos(), height, radius * angle.sin())
    }
}

impl LayoutStrategy for Spiral {
    fn algorithm(&self) -> LayoutAlgorithm {
        LayoutAlgorithm::Spiral
    }

    fn apply(&self, graph: &mut GraphModel, config: &LayoutConfig) -> bool {
        let spacing = config.node_spacing;
        place_nodes(graph, config, |index, count| {
            Self::position(index, count, spacing)
        });
        false
    }
}

//! Force-directed layout
//!
//! One call to [`ForceDirected::apply`] is one simulation step:
//!
//! 1. Clear every node's force accumulator
//! 2. Repulsion between all node pairs (inverse square law)
//! 3. Spring attraction along edges (Hooke's law around the rest length)
//! 4. Centering force toward the origin
//! 5. Integrate non-fixed nodes: `v += F/m`, `v *= damping`, `p += v`,
//!    then clamp into the bounding box
//!
//! Repulsion is brute force O(n²) per step. A Barnes-Hut octree is the
//! upgrade path once graphs exceed a few thousand nodes.

use super::LayoutStrategy;
use crate::config::{LayoutAlgorithm, LayoutConfig};
use crate::graph::{GraphModel, Node};
use crate::vector::Vec3;

/// Pairs closer than this (squared) are treated as coincident and skipped
pub const MIN_DISTANCE_SQUARED: f32 = 1e-6;

/// Physics-based layout, stepped once per scheduler tick
#[derive(Debug, Clone, Copy, Default)]
pub struct ForceDirected;

impl ForceDirected {
    /// Run one step and return the total kinetic energy of non-fixed nodes
    pub fn step(graph: &mut GraphModel, config: &LayoutConfig) -> f32 {
        // Resolve springs to node indices before borrowing nodes mutably
        let springs: Vec<(usize, usize, f32)> = graph
            .edges()
            .iter()
            .filter_map(|e| {
                Some((
                    graph.index_of(&e.source)?,
                    graph.index_of(&e.target)?,
                    e.rest_length(config),
                ))
            })
            .collect();

        let nodes = graph.nodes_mut();
        if nodes.is_empty() {
            return 0.0;
        }

        for node in nodes.iter_mut() {
            node.force = Vec3::ZERO;
        }

        apply_repulsion(nodes, config.repulsion);
        apply_attraction(nodes, &springs, config.attraction);
        apply_center_force(nodes, config.center_force);
        let energy = integrate(nodes, config);

        graph.mark_visualization_dirty();
        energy
    }
}

impl LayoutStrategy for ForceDirected {
    fn algorithm(&self) -> LayoutAlgorithm {
        LayoutAlgorithm::Force
    }

    fn is_iterative(&self) -> bool {
        true
    }

    fn apply(&self, graph: &mut GraphModel, config: &LayoutConfig) -> bool {
        let energy = Self::step(graph, config);
        tracing::trace!(energy, "force step");

        // A zero threshold disables early convergence
        !(config.convergence_threshold > 0.0 && energy < config.convergence_threshold)
    }
}

/// Apply repulsion between all node pairs
fn apply_repulsion(nodes: &mut [Node], repulsion: f32) {
    let n = nodes.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let delta = nodes[j].position - nodes[i].position;
            let dist_sq = delta.length_squared();
            if dist_sq < MIN_DISTANCE_SQUARED {
                continue;
            }

            // Coulomb's law: F = k / r^2, along the unit vector i -> j
            let dist = dist_sq.sqrt();
            let force = delta * (repulsion / dist_sq / dist);

            nodes[i].force -= force;
            nodes[j].force += force;
        }
    }
}

/// Apply spring force between connected nodes
fn apply_attraction(nodes: &mut [Node], springs: &[(usize, usize, f32)], attraction: f32) {
    for &(source, target, rest_length) in springs {
        let delta = nodes[target].position - nodes[source].position;
        let dist_sq = delta.length_squared();
        if dist_sq < MIN_DISTANCE_SQUARED {
            continue;
        }

        // Hooke's law: F = k * (x - x0); stretched springs pull, compressed push
        let dist = dist_sq.sqrt();
        let force = delta * (attraction * (dist - rest_length) / dist);

        nodes[source].force += force;
        nodes[target].force -= force;
    }
}

/// Apply centering force toward the origin, proportional to distance
fn apply_center_force(nodes: &mut [Node], center_force: f32) {
    for node in nodes {
        let pull = node.position * center_force;
        node.force -= pull;
    }
}

/// Integrate velocities and positions of non-fixed nodes.
///
/// Velocities are capped per axis at `max_velocity`, and components that
/// overflowed to NaN are zeroed, so positions stay finite and inside the
/// bounding box. Returns the total kinetic energy after integration.
fn integrate(nodes: &mut [Node], config: &LayoutConfig) -> f32 {
    let limit = Vec3::splat(config.max_velocity);
    let mut energy = 0.0;

    for node in nodes.iter_mut().filter(|n| !n.fixed) {
        let acceleration = node.force / node.mass;
        node.velocity = ((node.velocity + acceleration) * config.damping)
            .nan_to_zero()
            .clamp(-limit, limit);

        let next = config.bounds.clamp(node.position + node.velocity);
        if next.is_finite() {
            node.position = next;
        } else {
            tracing::warn!(node = %node.id, position = ?node.position, "non-finite position reset");
            node.position = config.bounds.clamp(Vec3::ZERO);
            node.velocity = Vec3::ZERO;
        }
        energy += node.kinetic_energy();
    }

    energy
}

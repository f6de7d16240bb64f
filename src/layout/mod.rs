//! Layout strategies
//!
//! Every algorithm implements [`LayoutStrategy`] and is selected through a
//! small static dispatch table keyed by [`LayoutAlgorithm`]:
//!
//! - **Force**: iterative physics (repulsion, springs, centering, damping)
//! - **Hierarchical**: BFS levels from root nodes, one-shot
//! - **Circular / Grid / Spiral**: deterministic one-shot placements over
//!   the node insertion order
//!
//! All strategies clamp positions into the configured bounding box and
//! leave fixed nodes where they are.

mod force;
mod geometric;
mod hierarchical;

pub use force::ForceDirected;
pub use geometric::{Circular, Grid, Spiral};
pub use hierarchical::{Hierarchical, compute_levels};

use crate::config::{LayoutAlgorithm, LayoutConfig};
use crate::graph::{GraphModel, Node};
use crate::vector::Vec3;

/// A pluggable layout algorithm
pub trait LayoutStrategy: Send + Sync {
    /// Which algorithm this strategy implements
    fn algorithm(&self) -> LayoutAlgorithm;

    /// Iterative strategies are stepped once per due tick until the
    /// scheduler stops them; one-shot strategies finish in a single call.
    fn is_iterative(&self) -> bool {
        false
    }

    /// Update node positions in `graph`.
    ///
    /// Returns true while the layout still owes work (the model stays
    /// layout-dirty), false once it is complete or converged.
    fn apply(&self, graph: &mut GraphModel, config: &LayoutConfig) -> bool;
}

static STRATEGIES: [&dyn LayoutStrategy; 5] =
    [&ForceDirected, &Hierarchical, &Circular, &Grid, &Spiral];

/// Look up the strategy for an algorithm
pub fn strategy_for(algorithm: LayoutAlgorithm) -> &'static dyn LayoutStrategy {
    STRATEGIES
        .iter()
        .copied()
        .find(|s| s.algorithm() == algorithm)
        .unwrap_or(&ForceDirected)
}

/// Write one-shot positions into every non-fixed node.
///
/// `place` maps (insertion index, node count) to a position. Placed nodes
/// are clamped into the bounding box and brought to rest.
pub(crate) fn place_nodes(
    graph: &mut GraphModel,
    config: &LayoutConfig,
    place: impl Fn(usize, usize) -> Vec3,
) {
    let count = graph.node_count();
    for (index, node) in graph.nodes_mut().iter_mut().enumerate() {
        settle(node, place(index, count), config);
    }
    graph.mark_visualization_dirty();
}

/// Move a non-fixed node to `position` (clamped) and zero its velocity
pub(crate) fn settle(node: &mut Node, position: Vec3, config: &LayoutConfig) {
    if node.fixed {
        return;
    }
    node.position = config.bounds.clamp(position);
    node.velocity = Vec3::ZERO;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_table_covers_every_algorithm() {
        for algorithm in LayoutAlgorithm::ALL {
            assert_eq!(strategy_for(algorithm).algorithm(), algorithm);
        }
    }

    #[test]
    fn only_force_is_iterative() {
        for algorithm in LayoutAlgorithm::ALL {
            assert_eq!(
                strategy_for(algorithm).is_iterative(),
                algorithm == LayoutAlgorithm::Force
            );
        }
    }
}

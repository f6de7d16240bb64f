//! Hierarchical (layered) layout
//!
//! Roots are nodes that no edge targets. A breadth-first traversal from all
//! roots at once assigns each node the level of the first root to reach it.
//! Levels are stacked downward along y, nodes within a level are centered
//! along x, and a small wave on z keeps wide levels from overlapping.

use std::collections::{HashSet, VecDeque};

use super::{LayoutStrategy, place_nodes};
use crate::config::{LayoutAlgorithm, LayoutConfig};
use crate::graph::GraphModel;
use crate::vector::Vec3;

/// z offset amplitude, as a fraction of node spacing
const DEPTH_OFFSET: f32 = 0.2;

/// One-shot layered layout
#[derive(Debug, Clone, Copy, Default)]
pub struct Hierarchical;

impl LayoutStrategy for Hierarchical {
    fn algorithm(&self) -> LayoutAlgorithm {
        LayoutAlgorithm::Hierarchical
    }

    fn apply(&self, graph: &mut GraphModel, config: &LayoutConfig) -> bool {
        let levels = compute_levels(graph);

        // (level, position within level, level width) per node index
        let mut slots = vec![(0usize, 0usize, 1usize); graph.node_count()];
        for (level, members) in levels.iter().enumerate() {
            for (slot, &index) in members.iter().enumerate() {
                slots[index] = (level, slot, members.len());
            }
        }

        let spacing = config.node_spacing;
        place_nodes(graph, config, |index, _| {
            let (level, slot, width) = slots[index];
            let centered = slot as f32 - (width as f32 - 1.0) / 2.0;
            Vec3::new(
                centered * spacing,
                -(level as f32) * spacing,
                (slot as f32 * 0.5).sin() * spacing * DEPTH_OFFSET,
            )
        });

        tracing::debug!(levels = levels.len(), "hierarchical layout applied");
        false
    }
}

/// Assign BFS levels to every node.
///
/// Returns, per level, the node indices (into `graph.nodes()`) in the order
/// the traversal reached them. When no node qualifies as a root, the first
/// node is promoted; components the traversal cannot reach get their first
/// node promoted the same way, so every node ends up on some level.
pub fn compute_levels(graph: &GraphModel) -> Vec<Vec<usize>> {
    let nodes = graph.nodes();
    let targets: HashSet<&str> = graph.edges().iter().map(|e| e.target.as_str()).collect();

    let mut levels: Vec<Vec<usize>> = Vec::new();
    let mut visited = vec![false; nodes.len()];
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();

    for (index, node) in nodes.iter().enumerate() {
        if !targets.contains(node.id.as_str()) {
            visited[index] = true;
            queue.push_back((index, 0));
        }
    }

    loop {
        while let Some((index, level)) = queue.pop_front() {
            if levels.len() <= level {
                levels.resize_with(level + 1, Vec::new);
            }
            levels[level].push(index);

            for neighbour in graph.connections(&nodes[index].id) {
                if let Some(next) = graph.index_of(neighbour) {
                    if !visited[next] {
                        visited[next] = true;
                        queue.push_back((next, level + 1));
                    }
                }
            }
        }

        // Promote the first unreached node (cycles have no natural root)
        match visited.iter().position(|v| !v) {
            Some(index) => {
                visited[index] = true;
                queue.push_back((index, 0));
            }
            None => break,
        }
    }

    levels
}

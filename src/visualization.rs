//! Render handoff buffers
//!
//! The engine never draws. It rebuilds these instance buffers whenever the
//! model is visualization-dirty and bumps `generation`; an external renderer
//! compares generations and re-uploads when they differ. Instance types are
//! `#[repr(C)]` and `Pod` so they can be uploaded to GPU buffers directly.

use bytemuck::{Pod, Zeroable};

use crate::graph::{GraphModel, Node};

/// Default edge alpha
pub const DEFAULT_EDGE_ALPHA: f32 = 0.6;

/// Instance data for rendering a node as a sphere
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct NodeInstance {
    /// World position (from the layout)
    pub position: [f32; 3],
    /// Sphere radius
    pub radius: f32,
    /// RGBA color
    pub color: [f32; 4],
    /// 1.0 for fixed (pinned) nodes, 0.0 otherwise
    pub fixed: f32,
    /// Padding for 16-byte alignment
    pub _padding: [f32; 3],
}

impl NodeInstance {
    /// Build the instance for a node
    pub fn from_node(node: &Node) -> Self {
        Self {
            position: node.position.to_array(),
            radius: node.size,
            color: node.color,
            fixed: if node.fixed { 1.0 } else { 0.0 },
            _padding: [0.0; 3],
        }
    }
}

/// Instance data for rendering an edge as a line
///
/// Each edge carries its endpoint positions directly (denormalized from
/// node IDs).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct EdgeInstance {
    /// Start position (source node)
    pub start: [f32; 3],
    /// Edge alpha
    pub alpha: f32,
    /// End position (target node)
    pub end: [f32; 3],
    /// 1.0 for animated edges, 0.0 otherwise
    pub animated: f32,
    /// RGBA color
    pub color: [f32; 4],
}

/// Geometry buffers owned by the engine and read by the renderer
#[derive(Debug, Clone, Default)]
pub struct Visualization {
    nodes: Vec<NodeInstance>,
    edges: Vec<EdgeInstance>,
    generation: u64,
}

impl Visualization {
    /// Rebuild both buffers from the model and bump the generation
    pub fn rebuild(&mut self, graph: &GraphModel) {
        self.nodes.clear();
        self.nodes
            .extend(graph.nodes().iter().map(NodeInstance::from_node));

        self.edges.clear();
        self.edges.extend(graph.edges().iter().filter(|e| e.visible).filter_map(|e| {
            let source = graph.node(&e.source)?;
            let target = graph.node(&e.target)?;
            Some(EdgeInstance {
                start: source.position.to_array(),
                alpha: DEFAULT_EDGE_ALPHA,
                end: target.position.to_array(),
                animated: if e.animated { 1.0 } else { 0.0 },
                color: e.color,
            })
        }));

        self.generation += 1;
        tracing::trace!(
            generation = self.generation,
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "visualization rebuilt"
        );
    }

    /// Release buffer memory
    pub fn release(&mut self) {
        self.nodes = Vec::new();
        self.edges = Vec::new();
        self.generation += 1;
    }

    pub fn nodes(&self) -> &[NodeInstance] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeInstance] {
        &self.edges
    }

    /// Node buffer as raw bytes, ready for upload
    pub fn node_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    /// Edge buffer as raw bytes, ready for upload
    pub fn edge_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.edges)
    }

    /// Incremented on every rebuild
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeSpec, NodeSpec};

    #[test]
    fn test_node_instance_size() {
        // 3 floats (position) + 1 (radius) + 4 (color) + 1 (fixed) + 3 (padding) = 48 bytes
        assert_eq!(std::mem::size_of::<NodeInstance>(), 48);
    }

    #[test]
    fn test_edge_instance_size() {
        // 3 (start) + 1 (alpha) + 3 (end) + 1 (animated) + 4 (color) = 48 bytes
        assert_eq!(std::mem::size_of::<EdgeInstance>(), 48);
    }

    #[test]
    fn rebuild_mirrors_model_and_skips_hidden_edges() {
        let mut graph = GraphModel::new();
        graph.add_node(NodeSpec::new("a").with_position(1.0, 2.0, 3.0).with_size(4.0));
        graph.add_node(NodeSpec::new("b").with_position(-1.0, 0.0, 0.0).fixed());
        graph.add_node(NodeSpec::new("c"));
        graph.add_edge(EdgeSpec::new("a", "b")).unwrap();
        graph.add_edge(EdgeSpec::new("b", "c").hidden()).unwrap();

        let mut vis = Visualization::default();
        vis.rebuild(&graph);

        assert_eq!(vis.generation(), 1);
        assert_eq!(vis.nodes().len(), 3);
        assert_eq!(vis.nodes()[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(vis.nodes()[0].radius, 4.0);
        assert_eq!(vis.nodes()[1].fixed, 1.0);
        assert_eq!(vis.edges().len(), 1);
        assert_eq!(vis.edges()[0].start, [1.0, 2.0, 3.0]);
        assert_eq!(vis.edges()[0].end, [-1.0, 0.0, 0.0]);
        assert_eq!(vis.node_bytes().len(), 3 * 48);
        assert_eq!(vis.edge_bytes().len(), 48);
    }

    #[test]
    fn release_drops_buffers() {
        let mut graph = GraphModel::new();
        graph.add_node(NodeSpec::new("a"));
        let mut vis = Visualization::default();
        vis.rebuild(&graph);

        vis.release();

        assert!(vis.nodes().is_empty());
        assert!(vis.node_bytes().is_empty());
        assert_eq!(vis.generation(), 2);
    }
}

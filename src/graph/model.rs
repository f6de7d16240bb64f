//! The authoritative node/edge store
//!
//! `GraphModel` is the only owner of node and edge records. Callers get
//! read-only views; layouts get mutable access to node kinematics through
//! crate-private accessors. Neighbour sets live in one adjacency index that
//! every structural mutation updates before returning, so no caller ever
//! observes a half-applied change.

use std::collections::HashMap;

use super::types::{Edge, EdgeSpec, Node, NodeSpec};
use crate::error::{GraphError, GraphResult};
use crate::vector::Vec3;

/// Recompute / rebuild markers consumed by the scheduler and the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    /// Layout must be recomputed on the next due tick
    pub layout: bool,
    /// Visualization buffers must be rebuilt
    pub visualization: bool,
}

impl DirtyFlags {
    fn mark_all(&mut self) {
        self.layout = true;
        self.visualization = true;
    }
}

/// Node/edge store with a symmetric, duplicate-free adjacency index
#[derive(Debug, Default)]
pub struct GraphModel {
    /// Nodes in insertion order
    nodes: Vec<Node>,
    /// Node ID -> index into `nodes`
    node_index: HashMap<String, usize>,
    /// Edges in insertion order
    edges: Vec<Edge>,
    /// Edge ID -> index into `edges`
    edge_index: HashMap<String, usize>,
    /// Node ID -> neighbour IDs, in the order the connections were made
    adjacency: HashMap<String, Vec<String>>,
    /// Unordered node pair -> number of edges joining it
    pair_edges: HashMap<(String, String), usize>,
    dirty: DirtyFlags,
}

impl GraphModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, filling defaults for unspecified fields
    ///
    /// Re-adding an existing ID overwrites the node's attributes
    /// (last-write-wins). The node keeps its insertion slot and its
    /// connections, since the edges that created them still exist.
    pub fn add_node(&mut self, spec: NodeSpec) -> &Node {
        let node = Node::from_spec(spec);
        self.dirty.mark_all();

        let index = match self.node_index.get(&node.id) {
            Some(&index) => {
                tracing::debug!(node = %node.id, "overwriting existing node");
                self.nodes[index] = node;
                index
            }
            None => {
                tracing::debug!(node = %node.id, "adding node");
                let index = self.nodes.len();
                self.node_index.insert(node.id.clone(), index);
                self.adjacency.insert(node.id.clone(), Vec::new());
                self.nodes.push(node);
                index
            }
        };

        &self.nodes[index]
    }

    /// Insert an edge and connect its endpoints
    ///
    /// Both endpoints must already exist and must differ; otherwise the
    /// model is left untouched and an error is returned. Re-adding an
    /// existing edge ID replaces the old edge.
    pub fn add_edge(&mut self, spec: EdgeSpec) -> GraphResult<&Edge> {
        let edge = Edge::from_spec(spec);

        for endpoint in [&edge.source, &edge.target] {
            if !self.node_index.contains_key(endpoint) {
                tracing::warn!(edge = %edge.id, endpoint = %endpoint, "rejecting edge with unknown endpoint");
                return Err(GraphError::UnknownEndpoint {
                    edge: edge.id.clone(),
                    endpoint: endpoint.clone(),
                });
            }
        }
        if edge.source == edge.target {
            tracing::warn!(edge = %edge.id, "rejecting self-loop");
            return Err(GraphError::SelfLoop(edge.id));
        }

        if self.edge_index.contains_key(&edge.id) {
            tracing::debug!(edge = %edge.id, "replacing existing edge");
            self.remove_edge(&edge.id);
        }

        tracing::debug!(edge = %edge.id, source = %edge.source, target = %edge.target, "adding edge");
        *self
            .pair_edges
            .entry(pair_key(&edge.source, &edge.target))
            .or_default() += 1;
        self.connect(&edge.source, &edge.target);
        self.connect(&edge.target, &edge.source);
        self.dirty.mark_all();

        let index = self.edges.len();
        self.edge_index.insert(edge.id.clone(), index);
        self.edges.push(edge);

        Ok(&self.edges[index])
    }

    /// Remove a node and every edge incident to it
    ///
    /// Returns the removed node, or `None` if the ID is unknown.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let index = *self.node_index.get(id)?;

        // Drop every incident edge in one pass over the edge list
        let mut removed_edges = 0;
        if let Some(first) = self.edges.iter().position(|e| e.touches(id)) {
            for edge in self.edges[first..].iter().filter(|e| e.touches(id)) {
                self.edge_index.remove(&edge.id);
            }
            let before = self.edges.len();
            self.edges.retain(|e| !e.touches(id));
            removed_edges = before - self.edges.len();
            reindex(&self.edges, &mut self.edge_index, first, |e| &e.id);
        }

        for neighbour in self.adjacency.remove(id).unwrap_or_default() {
            self.pair_edges.remove(&pair_key(id, &neighbour));
            self.disconnect(&neighbour, id);
        }

        let node = self.nodes.remove(index);
        self.node_index.remove(id);
        reindex(&self.nodes, &mut self.node_index, index, |n| &n.id);
        self.dirty.mark_all();

        tracing::debug!(node = %id, edges = removed_edges, "removed node");
        Some(node)
    }

    /// Remove an edge and disconnect its endpoints
    ///
    /// Endpoints stay neighbours while another edge still joins them.
    /// Returns the removed edge, or `None` if the ID is unknown.
    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let index = *self.edge_index.get(id)?;

        let edge = self.edges.remove(index);
        self.edge_index.remove(id);
        reindex(&self.edges, &mut self.edge_index, index, |e| &e.id);

        let key = pair_key(&edge.source, &edge.target);
        let remaining = match self.pair_edges.get_mut(&key) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        };
        if remaining == 0 {
            self.pair_edges.remove(&key);
            self.disconnect(&edge.source, &edge.target);
            self.disconnect(&edge.target, &edge.source);
        }
        self.dirty.mark_all();

        tracing::debug!(edge = %id, "removed edge");
        Some(edge)
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        tracing::debug!(nodes = self.nodes.len(), edges = self.edges.len(), "clearing graph");
        self.nodes.clear();
        self.node_index.clear();
        self.edges.clear();
        self.edge_index.clear();
        self.adjacency.clear();
        self.pair_edges.clear();
        self.dirty.mark_all();
    }

    /// Get a node by ID
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Get an edge by ID
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edge_index.get(id).map(|&i| &self.edges[i])
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbour IDs of a node (empty for unknown IDs)
    pub fn connections(&self, id: &str) -> &[String] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Neighbour nodes of a node (empty for unknown IDs)
    pub fn connected_nodes(&self, id: &str) -> Vec<&Node> {
        self.connections(id)
            .iter()
            .filter_map(|neighbour| self.node(neighbour))
            .collect()
    }

    /// Number of neighbours of a node
    pub fn degree(&self, id: &str) -> usize {
        self.connections(id).len()
    }

    /// Index of a node in `nodes()`
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Move a node; returns false for unknown IDs and non-finite positions
    pub fn set_node_position(&mut self, id: &str, position: Vec3) -> bool {
        let Some(&index) = self.node_index.get(id) else {
            return false;
        };
        if !position.is_finite() {
            tracing::warn!(node = %id, ?position, "rejecting non-finite position");
            return false;
        }
        let node = &mut self.nodes[index];
        node.position = position;
        node.velocity = Vec3::ZERO;
        self.dirty.mark_all();
        true
    }

    /// Pin or release a node; returns false for unknown IDs
    pub fn set_node_fixed(&mut self, id: &str, fixed: bool) -> bool {
        let Some(&index) = self.node_index.get(id) else {
            return false;
        };
        self.nodes[index].fixed = fixed;
        self.dirty.mark_all();
        true
    }

    /// Current dirty flags
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.dirty.layout
    }

    pub fn is_visualization_dirty(&self) -> bool {
        self.dirty.visualization
    }

    pub(crate) fn mark_layout_dirty(&mut self) {
        self.dirty.layout = true;
    }

    pub(crate) fn clear_layout_dirty(&mut self) {
        self.dirty.layout = false;
    }

    pub(crate) fn mark_visualization_dirty(&mut self) {
        self.dirty.visualization = true;
    }

    /// Clear the visualization flag, returning its previous value
    pub(crate) fn take_visualization_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty.visualization)
    }

    /// Mutable node records, for layout strategies
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    fn connect(&mut self, from: &str, to: &str) {
        let neighbours = self.adjacency.entry(from.to_string()).or_default();
        if !neighbours.iter().any(|n| n == to) {
            neighbours.push(to.to_string());
        }
    }

    fn disconnect(&mut self, from: &str, to: &str) {
        if let Some(neighbours) = self.adjacency.get_mut(from) {
            neighbours.retain(|n| n != to);
        }
    }
}

/// Key for an unordered node pair
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Refresh ID -> index entries after a removal shifted items down
fn reindex<T>(
    items: &[T],
    index: &mut HashMap<String, usize>,
    from: usize,
    id_of: impl Fn(&T) -> &String,
) {
    for (i, item) in items.iter().enumerate().skip(from) {
        if let Some(slot) = index.get_mut(id_of(item)) {
            *slot = i;
        }
    }
}

//! The engine facade consumed by host applications
//!
//! `GraphEngine` owns the graph model, the active layout configuration, the
//! scheduler and the visualization buffers. Hosts mutate the graph between
//! frames, call [`GraphEngine::update`] once per frame and read back
//! positions or the visualization buffers.
//!
//! The engine is single-threaded: every method returns within the
//! current frame, and cross-thread use needs external synchronization.

use crate::config::{EngineConfig, LayoutConfig};
use crate::document::{GraphDocument, PositionsDocument};
use crate::error::{ConfigResult, GraphResult};
use crate::graph::{Edge, EdgeSpec, GraphModel, Node, NodeSpec};
use crate::layout::strategy_for;
use crate::path::PathFinder;
use crate::scheduler::{SimulationScheduler, SimulationState, Tick};
use crate::stats::{GraphStatistics, StatisticsReporter};
use crate::vector::Vec3;
use crate::visualization::Visualization;

/// 3D graph layout and simulation engine
#[derive(Debug, Default)]
pub struct GraphEngine {
    graph: GraphModel,
    config: LayoutConfig,
    scheduler: SimulationScheduler,
    visualization: Visualization,
}

impl GraphEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from a validated configuration
    pub fn with_config(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            graph: GraphModel::new(),
            config: config.layout,
            scheduler: SimulationScheduler::new(config.tick_interval_ms),
            visualization: Visualization::default(),
        })
    }

    // ========== Mutation ==========

    /// Insert (or overwrite) a node
    pub fn add_node(&mut self, spec: NodeSpec) -> &Node {
        self.graph.add_node(spec)
    }

    /// Insert an edge; both endpoints must already exist
    pub fn add_edge(&mut self, spec: EdgeSpec) -> GraphResult<&Edge> {
        self.graph.add_edge(spec)
    }

    /// Remove a node and its incident edges; `None` if unknown
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        self.graph.remove_node(id)
    }

    /// Remove an edge; `None` if unknown
    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        self.graph.remove_edge(id)
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        self.graph.clear();
    }

    /// Move a node (e.g. while the host drags it); false if unknown or the
    /// position is not finite
    pub fn set_node_position(&mut self, id: &str, position: Vec3) -> bool {
        self.graph.set_node_position(id, position)
    }

    /// Pin or release a node; false if unknown
    pub fn set_node_fixed(&mut self, id: &str, fixed: bool) -> bool {
        self.graph.set_node_fixed(id, fixed)
    }

    /// Insert every node, then every edge, of a document.
    ///
    /// Stops at the first edge with an unknown endpoint; everything inserted
    /// before it stays in the graph.
    pub fn load_document(&mut self, document: &GraphDocument) -> GraphResult<()> {
        for node in &document.nodes {
            self.graph.add_node(node.clone());
        }
        for edge in &document.edges {
            self.graph.add_edge(edge.clone())?;
        }
        tracing::info!(
            nodes = document.nodes.len(),
            edges = document.edges.len(),
            "loaded graph document"
        );
        Ok(())
    }

    // ========== Layout control ==========

    /// Replace the layout configuration and mark the layout dirty.
    ///
    /// Invalid configurations are rejected and the previous one is kept.
    pub fn set_layout(&mut self, config: LayoutConfig) -> ConfigResult<()> {
        config.validate()?;
        tracing::info!(algorithm = %config.algorithm, "layout configuration changed");
        self.config = config;
        self.graph.mark_layout_dirty();
        Ok(())
    }

    /// Active layout configuration
    pub fn layout(&self) -> &LayoutConfig {
        &self.config
    }

    /// Reset the step counter and start stepping the active layout
    pub fn start_simulation(&mut self) {
        self.scheduler.start(&mut self.graph);
    }

    /// Stop stepping; positions and velocities are kept
    pub fn stop_simulation(&mut self) {
        self.scheduler.stop();
    }

    pub fn pause_simulation(&mut self) {
        self.scheduler.pause();
    }

    pub fn resume_simulation(&mut self) {
        self.scheduler.resume();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn simulation_state(&self) -> SimulationState {
        self.scheduler.state()
    }

    /// Run the active layout once, immediately, outside the scheduler.
    ///
    /// Returns true if the layout still owes work (force layouts always do
    /// until they converge).
    pub fn apply_layout(&mut self) -> bool {
        let still_dirty = strategy_for(self.config.algorithm).apply(&mut self.graph, &self.config);
        if !still_dirty {
            self.graph.clear_layout_dirty();
        }
        still_dirty
    }

    // ========== Per-frame driver ==========

    /// Advance the engine by `delta_ms` of host time.
    ///
    /// Layout stepping is throttled to the configured tick interval: on a
    /// due tick, the active layout is stepped if the simulation is running
    /// and the layout is dirty. The visualization flag is checked on every
    /// call, so host-side mutations reach the buffers without waiting for a
    /// due tick.
    pub fn update(&mut self, delta_ms: f64) -> Tick {
        let tick = self.scheduler.update(delta_ms, &mut self.graph, &self.config);
        if self.graph.take_visualization_dirty() {
            self.visualization.rebuild(&self.graph);
        }
        tick
    }

    /// Drive `update` at the tick interval until the simulation stops or
    /// `max_updates` due ticks have passed. Returns the step counter.
    pub fn run_to_convergence(&mut self, max_updates: usize) -> usize {
        let interval = self.scheduler.tick_interval_ms();
        for _ in 0..max_updates {
            if !self.is_running() {
                break;
            }
            self.update(interval);
        }
        self.scheduler.step()
    }

    // ========== Read / query ==========

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.graph.node(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.graph.edge(id)
    }

    pub fn nodes(&self) -> &[Node] {
        self.graph.nodes()
    }

    pub fn edges(&self) -> &[Edge] {
        self.graph.edges()
    }

    /// Neighbour IDs of a node
    pub fn connections(&self, id: &str) -> &[String] {
        self.graph.connections(id)
    }

    /// Neighbour nodes of a node
    pub fn connected_nodes(&self, id: &str) -> Vec<&Node> {
        self.graph.connected_nodes(id)
    }

    /// Minimum-hop path between two nodes (see [`PathFinder::find_path`])
    pub fn find_path(&self, start: &str, end: &str) -> Vec<String> {
        PathFinder::find_path(&self.graph, start, end)
    }

    pub fn statistics(&self) -> GraphStatistics {
        StatisticsReporter::report(&self.graph, &self.scheduler, self.config.algorithm)
    }

    /// Current positions of every node
    pub fn positions(&self) -> PositionsDocument {
        PositionsDocument::capture(&self.graph, self.config.algorithm, self.scheduler.step())
    }

    /// Read-only view of the graph model
    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    // ========== Visualization handoff ==========

    /// Render buffers as of the last rebuild
    pub fn visualization(&self) -> &Visualization {
        &self.visualization
    }

    /// True when the buffers are stale and the next `update` will rebuild them
    pub fn needs_visualization_rebuild(&self) -> bool {
        self.graph.is_visualization_dirty()
    }

    /// Stop the simulation, clear the graph and release render buffers
    pub fn dispose(&mut self) {
        tracing::debug!("disposing engine");
        self.scheduler.stop();
        self.graph.clear();
        self.visualization.release();
    }
}

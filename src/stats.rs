//! Read-only aggregate metrics over a graph

use serde::Serialize;

use crate::config::LayoutAlgorithm;
use crate::graph::GraphModel;
use crate::scheduler::{SimulationScheduler, SimulationState};

/// Snapshot of graph and simulation metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// Mean number of neighbours per node (0 for an empty graph)
    pub average_connections: f64,
    /// Largest neighbour count (0 for an empty graph)
    pub max_connections: usize,
    /// Smallest neighbour count (0 for an empty graph)
    pub min_connections: usize,
    /// Layout steps since the simulation was last started
    pub step: usize,
    pub state: SimulationState,
    pub layout: LayoutAlgorithm,
}

impl GraphStatistics {
    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }
}

/// Derives [`GraphStatistics`] without touching the model
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsReporter;

impl StatisticsReporter {
    pub fn report(
        graph: &GraphModel,
        scheduler: &SimulationScheduler,
        layout: LayoutAlgorithm,
    ) -> GraphStatistics {
        let degrees: Vec<usize> = graph.nodes().iter().map(|n| graph.degree(&n.id)).collect();
        let total: usize = degrees.iter().sum();

        let average_connections = if degrees.is_empty() {
            0.0
        } else {
            total as f64 / degrees.len() as f64
        };

        GraphStatistics {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            average_connections,
            max_connections: degrees.iter().copied().max().unwrap_or(0),
            min_connections: degrees.iter().copied().min().unwrap_or(0),
            step: scheduler.step(),
            state: scheduler.state(),
            layout,
        }
    }
}

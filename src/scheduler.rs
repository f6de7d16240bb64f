//! Per-frame simulation driver
//!
//! The host calls `update` once per rendered frame. The scheduler throttles
//! those calls to a minimum tick interval and, on each due tick, steps the
//! active layout while the simulation is running and the layout is dirty.
//!
//! States: `Idle -> Running -> (Idle | Paused)`, and `Paused -> Running`.

use serde::Serialize;

use crate::config::{DEFAULT_TICK_INTERVAL_MS, LayoutConfig};
use crate::graph::GraphModel;
use crate::layout::strategy_for;

/// Simulation lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// What a call to [`SimulationScheduler::update`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Called before the tick interval elapsed; nothing happened
    Throttled,
    /// A tick was due but there was no layout work to do
    Idle,
    /// The active layout was stepped
    Stepped,
}

impl Tick {
    /// True when the tick interval had elapsed
    pub fn is_due(&self) -> bool {
        !matches!(self, Tick::Throttled)
    }
}

/// Throttled driver for the active layout strategy
#[derive(Debug, Clone)]
pub struct SimulationScheduler {
    state: SimulationState,
    /// Layout steps since the last `start`
    step: usize,
    /// Time accumulated since the last due tick
    elapsed_ms: f64,
    tick_interval_ms: f64,
}

impl Default for SimulationScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL_MS)
    }
}

impl SimulationScheduler {
    /// Create an idle scheduler with the given minimum tick interval
    pub fn new(tick_interval_ms: f64) -> Self {
        Self {
            state: SimulationState::Idle,
            step: 0,
            elapsed_ms: 0.0,
            tick_interval_ms: tick_interval_ms.max(0.0),
        }
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    /// Layout steps taken since the last `start`
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn tick_interval_ms(&self) -> f64 {
        self.tick_interval_ms
    }

    /// Reset the step counter and start running
    pub fn start(&mut self, graph: &mut GraphModel) {
        tracing::info!(previous = ?self.state, "starting simulation");
        self.step = 0;
        self.state = SimulationState::Running;
        graph.mark_layout_dirty();
    }

    /// Stop running; node positions and velocities are left as they are
    pub fn stop(&mut self) {
        if self.state != SimulationState::Idle {
            tracing::info!(step = self.step, "stopping simulation");
        }
        self.state = SimulationState::Idle;
    }

    /// Suspend a running simulation without resetting the step counter
    pub fn pause(&mut self) {
        if self.state == SimulationState::Running {
            tracing::info!(step = self.step, "pausing simulation");
            self.state = SimulationState::Paused;
        }
    }

    /// Continue a paused simulation
    pub fn resume(&mut self) {
        if self.state == SimulationState::Paused {
            tracing::info!(step = self.step, "resuming simulation");
            self.state = SimulationState::Running;
        }
    }

    /// Advance by `delta_ms` of host time.
    ///
    /// At most one layout step runs per call, and only once at least the
    /// tick interval has accumulated since the previous due tick.
    pub fn update(&mut self, delta_ms: f64, graph: &mut GraphModel, config: &LayoutConfig) -> Tick {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.elapsed_ms += delta_ms;
        }
        if self.elapsed_ms < self.tick_interval_ms {
            return Tick::Throttled;
        }
        self.elapsed_ms = 0.0;

        if self.state != SimulationState::Running || !graph.is_layout_dirty() {
            return Tick::Idle;
        }

        let strategy = strategy_for(config.algorithm);
        if strategy.is_iterative() && self.step >= config.iterations {
            self.finish(graph, "iteration budget exhausted");
            return Tick::Idle;
        }

        let still_dirty = strategy.apply(graph, config);
        self.step += 1;
        tracing::trace!(step = self.step, algorithm = %config.algorithm, "layout step");

        if !still_dirty {
            let reason = if strategy.is_iterative() {
                "converged"
            } else {
                "one-shot layout applied"
            };
            self.finish(graph, reason);
        } else if self.step >= config.iterations {
            self.finish(graph, "iteration budget exhausted");
        }

        Tick::Stepped
    }

    /// Auto-stop: nothing more is owed until the next `start`
    fn finish(&mut self, graph: &mut GraphModel, reason: &str) {
        tracing::info!(step = self.step, reason, "simulation finished");
        graph.clear_layout_dirty();
        self.state = SimulationState::Idle;
    }
}

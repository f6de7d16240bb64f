use std::path::PathBuf;

use clap::{Parser, Subcommand};
use graphscape::LayoutAlgorithm;

/// Lay out graph documents in 3D and query their structure.
#[derive(Parser, Debug)]
#[command(name = "graphscape")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a layout to completion and print node positions as JSON
    Layout {
        /// Input graph document (.json)
        #[arg(short, long)]
        input: PathBuf,

        /// Engine configuration file (.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Layout algorithm (force, hierarchical, circular, grid, spiral)
        #[arg(short, long)]
        layout: Option<LayoutAlgorithm>,

        /// Cap on force-directed steps
        #[arg(long)]
        iterations: Option<usize>,

        /// One-shot layout used to spread nodes before a force run
        #[arg(long)]
        seed: Option<LayoutAlgorithm>,

        /// Write positions here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print graph statistics as JSON
    Stats {
        /// Input graph document (.json)
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print the shortest path between two nodes
    Path {
        /// Input graph document (.json)
        #[arg(short, long)]
        input: PathBuf,

        /// Start node ID
        #[arg(long)]
        from: String,

        /// End node ID
        #[arg(long)]
        to: String,
    },
}

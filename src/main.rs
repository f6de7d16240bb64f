use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use graphscape::{EngineConfig, GraphDocument, GraphEngine, LayoutAlgorithm, LayoutConfig};

mod cli;

use cli::{Cli, Commands};

/// Upper bound on scheduler ticks for a single CLI layout run
const MAX_UPDATES: usize = 1_000_000;

/// Seed used when a force run would start with every free node on one point
const FALLBACK_SEED: LayoutAlgorithm = LayoutAlgorithm::Circular;

/// True when at least two non-fixed nodes exist and all share one position.
///
/// The force layout skips coincident pairs, so such a graph never moves.
fn free_nodes_coincide(engine: &GraphEngine) -> bool {
    let mut free = engine.nodes().iter().filter(|n| !n.fixed).map(|n| n.position);
    match free.next() {
        Some(first) => {
            let mut count = 1;
            for position in free {
                if position != first {
                    return false;
                }
                count += 1;
            }
            count > 1
        }
        None => false,
    }
}

fn load_engine(input: &Path, config: Option<&Path>) -> anyhow::Result<GraphEngine> {
    let config = match config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let mut engine = GraphEngine::with_config(config)?;

    let document = GraphDocument::load(input)
        .with_context(|| format!("failed to read graph document {}", input.display()))?;
    engine
        .load_document(&document)
        .with_context(|| format!("inconsistent graph in {}", input.display()))?;

    Ok(engine)
}

fn layout(
    engine: &mut GraphEngine,
    algorithm: Option<LayoutAlgorithm>,
    iterations: Option<usize>,
    seed: Option<LayoutAlgorithm>,
) -> anyhow::Result<()> {
    let mut config = engine.layout().clone();
    let target = algorithm.unwrap_or(config.algorithm);

    let seed = match seed {
        None if target == LayoutAlgorithm::Force && free_nodes_coincide(engine) => {
            tracing::warn!(seed = %FALLBACK_SEED, "all free nodes share one position; seeding before the force run");
            Some(FALLBACK_SEED)
        }
        seed => seed,
    };

    if let Some(seed) = seed {
        engine.set_layout(LayoutConfig {
            algorithm: seed,
            ..config.clone()
        })?;
        engine.apply_layout();
    }

    if let Some(algorithm) = algorithm {
        config.algorithm = algorithm;
    }
    if let Some(iterations) = iterations {
        config.iterations = iterations;
    }
    engine.set_layout(config)?;

    engine.start_simulation();
    let steps = engine.run_to_convergence(MAX_UPDATES);
    tracing::info!(steps, algorithm = %engine.layout().algorithm, "layout finished");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("graphscape=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout {
            input,
            config,
            layout: algorithm,
            iterations,
            seed,
            output,
        } => {
            let mut engine = load_engine(&input, config.as_deref())?;
            layout(&mut engine, algorithm, iterations, seed)?;

            let json = engine.positions().to_json()?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{}", json),
            }
        }
        Commands::Stats { input } => {
            let engine = load_engine(&input, None)?;
            println!("{}", serde_json::to_string_pretty(&engine.statistics())?);
        }
        Commands::Path { input, from, to } => {
            let engine = load_engine(&input, None)?;
            let path = engine.find_path(&from, &to);
            if path.is_empty() {
                anyhow::bail!("no path from '{}' to '{}'", from, to);
            }
            println!("{}", path.join(" -> "));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_parses_layout_subcommand() {
        let cli = Cli::try_parse_from([
            "graphscape",
            "layout",
            "--input",
            "graph.json",
            "--layout",
            "spiral",
            "--iterations",
            "50",
        ])
        .unwrap();
        match cli.command {
            Commands::Layout {
                input,
                layout,
                iterations,
                config,
                ..
            } => {
                assert_eq!(input, PathBuf::from("graph.json"));
                assert_eq!(layout, Some(LayoutAlgorithm::Spiral));
                assert_eq!(iterations, Some(50));
                assert!(config.is_none());
            }
            _ => panic!("Expected Layout command"),
        }
    }

    #[test]
    fn cli_rejects_unknown_layout() {
        let result = Cli::try_parse_from([
            "graphscape",
            "layout",
            "--input",
            "graph.json",
            "--layout",
            "radial",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_path_subcommand() {
        let cli =
            Cli::try_parse_from(["graphscape", "path", "-i", "g.json", "--from", "a", "--to", "b"])
                .unwrap();
        match cli.command {
            Commands::Path { input, from, to } => {
                assert_eq!(input, PathBuf::from("g.json"));
                assert_eq!(from, "a");
                assert_eq!(to, "b");
            }
            _ => panic!("Expected Path command"),
        }
    }

    #[test]
    fn unseeded_force_layout_spreads_coincident_nodes() {
        let mut engine = GraphEngine::new();
        for id in ["a", "b", "c"] {
            engine.add_node(graphscape::NodeSpec::new(id));
        }
        assert!(free_nodes_coincide(&engine));

        layout(&mut engine, None, Some(5), None).unwrap();

        assert_eq!(engine.layout().algorithm, LayoutAlgorithm::Force);
        assert_eq!(engine.statistics().step, 5);
        let a = engine.node("a").unwrap().position;
        let b = engine.node("b").unwrap().position;
        assert!(a.distance(b) > 1.0);
    }

    #[test]
    fn spread_or_pinned_nodes_need_no_seed() {
        let mut engine = GraphEngine::new();
        engine.add_node(graphscape::NodeSpec::new("a"));
        assert!(!free_nodes_coincide(&engine));

        engine.add_node(graphscape::NodeSpec::new("pinned").fixed());
        assert!(!free_nodes_coincide(&engine));

        engine.add_node(graphscape::NodeSpec::new("b").with_position(1.0, 0.0, 0.0));
        assert!(!free_nodes_coincide(&engine));
    }

    #[test]
    fn seeded_force_layout_spreads_coincident_nodes() {
        let mut engine = GraphEngine::new();
        for id in ["a", "b", "c"] {
            engine.add_node(graphscape::NodeSpec::new(id));
        }

        layout(&mut engine, Some(LayoutAlgorithm::Force), Some(10), Some(LayoutAlgorithm::Spiral))
            .unwrap();

        assert_eq!(engine.statistics().step, 10);
        let a = engine.node("a").unwrap().position;
        let b = engine.node("b").unwrap().position;
        assert!(a.distance(b) > 1.0);
    }
}

//! Behavioural guarantees of the engine, checked through its public API

use graphscape::{
    BoundingBox, EdgeSpec, EngineConfig, GraphEngine, LayoutAlgorithm, LayoutConfig, NodeSpec,
    Vec3,
};

fn engine() -> GraphEngine {
    GraphEngine::with_config(EngineConfig {
        tick_interval_ms: 16.0,
        ..EngineConfig::default()
    })
    .unwrap()
}

fn assert_symmetric(engine: &GraphEngine) {
    for a in engine.nodes() {
        for b in engine.nodes() {
            let a_has_b = engine.connections(&a.id).contains(&b.id);
            let b_has_a = engine.connections(&b.id).contains(&a.id);
            assert_eq!(a_has_b, b_has_a, "asymmetric adjacency between {} and {}", a.id, b.id);
        }
        let neighbours = engine.connections(&a.id);
        let mut deduped = neighbours.to_vec();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), neighbours.len(), "duplicate neighbours on {}", a.id);
    }
}

fn chain(engine: &mut GraphEngine, ids: &[&str]) {
    for id in ids {
        engine.add_node(NodeSpec::new(*id));
    }
    for pair in ids.windows(2) {
        engine.add_edge(EdgeSpec::new(pair[0], pair[1])).unwrap();
    }
}

#[test]
fn adjacency_stays_symmetric_across_mutations() {
    let mut engine = engine();
    for i in 0..8 {
        engine.add_node(NodeSpec::new(format!("n{}", i)));
    }
    for (i, j) in [(0, 1), (1, 2), (2, 3), (3, 0), (4, 5), (5, 6), (6, 7), (1, 5), (2, 6)] {
        engine
            .add_edge(EdgeSpec::new(format!("n{}", i), format!("n{}", j)))
            .unwrap();
        assert_symmetric(&engine);
    }
    // Parallel edge in the reverse direction
    engine.add_edge(EdgeSpec::new("n2", "n1")).unwrap();
    assert_symmetric(&engine);

    engine.remove_edge("n1->n2");
    assert_symmetric(&engine);
    assert!(engine.connections("n1").contains(&"n2".to_string()));

    engine.remove_edge("n2->n1");
    assert_symmetric(&engine);
    assert!(!engine.connections("n1").contains(&"n2".to_string()));

    engine.remove_node("n5");
    assert_symmetric(&engine);

    assert!(engine.add_edge(EdgeSpec::new("n0", "n5")).is_err());
    assert_symmetric(&engine);
}

#[test]
fn removing_node_cascades() {
    let mut engine = engine();
    chain(&mut engine, &["a", "b", "c", "d"]);
    engine.add_edge(EdgeSpec::new("a", "c")).unwrap();

    engine.remove_node("c");

    assert!(engine.node("c").is_none());
    assert!(engine.edges().iter().all(|e| e.source != "c" && e.target != "c"));
    for node in engine.nodes() {
        assert!(!engine.connections(&node.id).contains(&"c".to_string()));
    }
    assert_eq!(engine.edges().len(), 1);
}

#[test]
fn path_on_chain() {
    let mut engine = engine();
    chain(&mut engine, &["A", "B", "C", "D", "E"]);
    engine.add_node(NodeSpec::new("F"));

    assert_eq!(engine.find_path("A", "E"), ["A", "B", "C", "D", "E"]);
    assert_eq!(engine.find_path("A", "A"), ["A"]);
    assert!(engine.find_path("A", "F").is_empty());
}

#[test]
fn geometric_layouts_are_bit_identical_on_rerun() {
    for algorithm in [
        LayoutAlgorithm::Grid,
        LayoutAlgorithm::Circular,
        LayoutAlgorithm::Spiral,
        LayoutAlgorithm::Hierarchical,
    ] {
        let mut engine = engine();
        chain(&mut engine, &["a", "b", "c", "d", "e", "f", "g"]);
        engine.set_layout(LayoutConfig::new(algorithm)).unwrap();

        engine.apply_layout();
        let first: Vec<[u32; 3]> = engine
            .nodes()
            .iter()
            .map(|n| n.position.to_array().map(f32::to_bits))
            .collect();

        engine.apply_layout();
        let second: Vec<[u32; 3]> = engine
            .nodes()
            .iter()
            .map(|n| n.position.to_array().map(f32::to_bits))
            .collect();

        assert_eq!(first, second, "{} is not deterministic", algorithm);
    }
}

#[test]
fn force_simulation_auto_stops_after_exactly_n_steps() {
    let mut engine = engine();
    chain(&mut engine, &["a", "b", "c"]);
    for (i, id) in ["a", "b", "c"].iter().enumerate() {
        engine.set_node_position(id, Vec3::new(i as f32 * 30.0, 0.0, 0.0));
    }
    engine
        .set_layout(LayoutConfig::new(LayoutAlgorithm::Force).with_iterations(40))
        .unwrap();
    engine.start_simulation();

    let mut updates = 0;
    while engine.is_running() {
        engine.update(16.0);
        updates += 1;
        assert!(updates <= 40, "simulation ran past its iteration budget");
    }

    assert_eq!(updates, 40);
    assert_eq!(engine.statistics().step, 40);
}

#[test]
fn force_layout_stays_inside_bounding_box() {
    let mut engine = engine();
    for i in 0..12 {
        engine.add_node(NodeSpec::new(format!("n{}", i)).with_position(i as f32, 0.0, 0.0));
    }
    let mut config = LayoutConfig::new(LayoutAlgorithm::Force)
        .with_iterations(60)
        .with_bounds(BoundingBox::centered(25.0));
    config.repulsion = 50_000.0;
    engine.set_layout(config.clone()).unwrap();
    engine.start_simulation();

    while engine.is_running() {
        engine.update(16.0);
        for node in engine.nodes().iter().filter(|n| !n.fixed) {
            assert!(config.bounds.contains(node.position), "{} escaped: {:?}", node.id, node.position);
        }
    }
}

#[test]
fn statistics_for_small_path() {
    let mut engine = engine();
    chain(&mut engine, &["A", "B", "C"]);

    let stats = engine.statistics();

    assert_eq!(stats.node_count, 3);
    assert_eq!(stats.edge_count, 2);
    assert!((stats.average_connections - 4.0 / 3.0).abs() < 1e-12);
    assert_eq!(stats.max_connections, 2);
    assert_eq!(stats.min_connections, 1);
}

#[test]
fn fixed_node_never_moves() {
    let mut engine = engine();
    engine.add_node(NodeSpec::new("pinned").with_position(3.0, -2.0, 1.0).fixed());
    engine.add_node(NodeSpec::new("a").with_position(10.0, 0.0, 0.0));
    engine.add_node(NodeSpec::new("b").with_position(-10.0, 5.0, 0.0));
    engine.add_edge(EdgeSpec::new("pinned", "a")).unwrap();
    engine.add_edge(EdgeSpec::new("pinned", "b")).unwrap();
    engine
        .set_layout(LayoutConfig::new(LayoutAlgorithm::Force).with_iterations(100))
        .unwrap();
    engine.start_simulation();
    let a_before = engine.node("a").unwrap().position;

    while engine.is_running() {
        engine.update(16.0);
        assert_eq!(engine.node("pinned").unwrap().position, Vec3::new(3.0, -2.0, 1.0));
    }

    assert_ne!(engine.node("a").unwrap().position, a_before);
}

#[test]
fn empty_graph_statistics_do_not_leak_sentinels() {
    let engine = engine();
    let stats = engine.statistics();

    assert_eq!(stats.min_connections, 0);
    assert_eq!(stats.max_connections, 0);
    assert_eq!(stats.average_connections, 0.0);
}

#[test]
fn huge_repulsion_never_pushes_nodes_out_of_bounds() {
    let mut engine = engine();
    for i in 0..4 {
        engine.add_node(NodeSpec::new(format!("n{}", i)).with_position(i as f32 * 0.01, 0.0, 0.0));
    }
    let mut config = LayoutConfig::new(LayoutAlgorithm::Force)
        .with_iterations(100)
        .with_bounds(BoundingBox::centered(100.0));
    config.repulsion = 1.0e35;
    engine.set_layout(config.clone()).unwrap();
    engine.start_simulation();

    while engine.is_running() {
        engine.update(16.0);
        for node in engine.nodes() {
            assert!(node.position.is_finite(), "{} is not finite: {:?}", node.id, node.position);
            assert!(config.bounds.contains(node.position), "{} escaped: {:?}", node.id, node.position);
        }
    }
}

#[test]
fn non_finite_positions_are_refused() {
    let mut engine = engine();
    engine.add_node(NodeSpec::new("a").with_position(-10.0, 0.0, 0.0));
    engine.add_node(NodeSpec::new("b").with_position(10.0, 0.0, 0.0));
    engine.add_node(NodeSpec::new("bad").with_position(0.0, 5.0, 0.0));
    engine.add_node(NodeSpec::new("loaded").with_position(f32::NAN, 0.0, 0.0));

    assert!(!engine.set_node_position("bad", Vec3::new(f32::NAN, 0.0, 0.0)));
    assert_eq!(engine.node("loaded").unwrap().position, Vec3::ZERO);

    engine
        .set_layout(LayoutConfig::new(LayoutAlgorithm::Force).with_iterations(1))
        .unwrap();
    engine.start_simulation();
    engine.update(16.0);

    for node in engine.nodes() {
        assert!(node.position.is_finite(), "{} is not finite: {:?}", node.id, node.position);
    }
}

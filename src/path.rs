//! Unweighted shortest-path search over the adjacency index

use std::collections::{HashMap, VecDeque};

use crate::graph::GraphModel;

/// Stateless breadth-first path finder
#[derive(Debug, Clone, Copy, Default)]
pub struct PathFinder;

impl PathFinder {
    /// Minimum-hop path from `start` to `end`, both inclusive.
    ///
    /// Returns `[start]` when the IDs are equal, and an empty path when
    /// either ID is unknown or `end` is unreachable. Edge weights are not
    /// consulted.
    pub fn find_path(graph: &GraphModel, start: &str, end: &str) -> Vec<String> {
        if graph.node(start).is_none() || graph.node(end).is_none() {
            return Vec::new();
        }
        if start == end {
            return vec![start.to_string()];
        }

        let mut parents: HashMap<&str, &str> = HashMap::new();
        let mut queue: VecDeque<&str> = VecDeque::from([start]);
        parents.insert(start, start);

        while let Some(current) = queue.pop_front() {
            if current == end {
                return Self::reconstruct(&parents, start, end);
            }
            for neighbour in graph.connections(current) {
                if !parents.contains_key(neighbour.as_str()) {
                    parents.insert(neighbour.as_str(), current);
                    queue.push_back(neighbour.as_str());
                }
            }
        }

        Vec::new()
    }

    /// Walk parent pointers back from `end` to `start`
    fn reconstruct(parents: &HashMap<&str, &str>, start: &str, end: &str) -> Vec<String> {
        let mut path = vec![end.to_string()];
        let mut current = end;
        while current != start {
            current = parents[current];
            path.push(current.to_string());
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeSpec, NodeSpec};

    fn chain() -> GraphModel {
        let mut graph = GraphModel::new();
        for id in ["A", "B", "C", "D", "E", "F"] {
            graph.add_node(NodeSpec::new(id));
        }
        for (source, target) in [("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")] {
            graph.add_edge(EdgeSpec::new(source, target)).unwrap();
        }
        graph
    }

    #[test]
    fn chain_path_visits_every_hop() {
        let graph = chain();
        assert_eq!(PathFinder::find_path(&graph, "A", "E"), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn path_ignores_edge_direction() {
        let graph = chain();
        assert_eq!(PathFinder::find_path(&graph, "E", "C"), ["E", "D", "C"]);
    }

    #[test]
    fn path_to_self_is_single_node() {
        let graph = chain();
        assert_eq!(PathFinder::find_path(&graph, "A", "A"), ["A"]);
    }

    #[test]
    fn disconnected_node_is_unreachable() {
        let graph = chain();
        assert!(PathFinder::find_path(&graph, "A", "F").is_empty());
    }

    #[test]
    fn unknown_ids_give_empty_path() {
        let graph = chain();
        assert!(PathFinder::find_path(&graph, "A", "ghost").is_empty());
        assert!(PathFinder::find_path(&graph, "ghost", "ghost").is_empty());
    }

    #[test]
    fn shortcut_gives_minimum_hops() {
        let mut graph = chain();
        graph.add_edge(EdgeSpec::new("A", "D")).unwrap();

        assert_eq!(PathFinder::find_path(&graph, "A", "E"), ["A", "D", "E"]);
    }
}

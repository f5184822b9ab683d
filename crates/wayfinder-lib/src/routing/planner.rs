//! Route planning strategies implementing the Strategy pattern.
//!
//! This module provides the `RoutePlanner` trait and one implementation per
//! search frontier. Both planners honour the same constraints and return the
//! same costs; they differ only in how the next node to settle is chosen.

use crate::catalog::Catalog;
use crate::graph::Graph;
use crate::path::{find_route_dijkstra, find_route_linear_scan, PathConstraints, RouteResult};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the pathfinding algorithm on the given graph.
    ///
    /// Returns an empty [`RouteResult`] when the goal is unreachable.
    fn find_path(
        &self,
        graph: &Graph,
        catalog: &Catalog,
        start: &str,
        goal: &str,
        constraints: &PathConstraints,
    ) -> RouteResult;
}

/// Binary-heap Dijkstra planner, O(E log V).
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &Graph,
        catalog: &Catalog,
        start: &str,
        goal: &str,
        constraints: &PathConstraints,
    ) -> RouteResult {
        find_route_dijkstra(graph, catalog, start, goal, constraints)
    }
}

/// Linear-scan Dijkstra planner, O(V²).
#[derive(Debug, Clone, Default)]
pub struct LinearScanPlanner;

impl RoutePlanner for LinearScanPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::LinearScan
    }

    fn find_path(
        &self,
        graph: &Graph,
        catalog: &Catalog,
        start: &str,
        goal: &str,
        constraints: &PathConstraints,
    ) -> RouteResult {
        find_route_linear_scan(graph, catalog, start, goal, constraints)
    }
}

/// Select the planner for an algorithm.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::LinearScan => Box::new(LinearScanPlanner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dijkstra_planner_returns_correct_algorithm() {
        assert_eq!(DijkstraPlanner.algorithm(), RouteAlgorithm::Dijkstra);
    }

    #[test]
    fn linear_scan_planner_returns_correct_algorithm() {
        assert_eq!(LinearScanPlanner.algorithm(), RouteAlgorithm::LinearScan);
    }

    #[test]
    fn select_planner_chooses_correct_type() {
        for algorithm in [RouteAlgorithm::Dijkstra, RouteAlgorithm::LinearScan] {
            assert_eq!(select_planner(algorithm).algorithm(), algorithm);
        }
    }
}

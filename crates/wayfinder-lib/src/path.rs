use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::warn;

use crate::catalog::{Catalog, LocationId};
use crate::graph::{Edge, Graph};

/// Upper bound on frontier pops per search. Building graphs have tens to low
/// hundreds of nodes, so hitting this means the graph is malformed.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Constraints applied during pathfinding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConstraints {
    /// Forbid non-accessible vertical edges that touch a stairwell.
    pub accessible_only: bool,
    /// Maximum number of frontier pops before the search gives up.
    pub max_iterations: usize,
}

impl Default for PathConstraints {
    fn default() -> Self {
        Self {
            accessible_only: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl PathConstraints {
    /// Constraints for a wheelchair-accessible route.
    pub fn accessible() -> Self {
        Self {
            accessible_only: true,
            ..Self::default()
        }
    }

    /// Whether `edge`, leaving `from`, may be relaxed.
    ///
    /// Evaluated per edge: a stairwell landing stays reachable through its
    /// hallway link even when its stair flights are excluded.
    pub fn allows(&self, catalog: &Catalog, from: &str, edge: &Edge) -> bool {
        if !self.accessible_only || !edge.vertical || edge.accessible {
            return true;
        }

        let is_stairwell = |id: &str| {
            catalog
                .location(id)
                .is_some_and(|location| location.role().is_stairwell())
        };
        !(is_stairwell(from) || is_stairwell(&edge.target))
    }
}

/// Outcome of a single shortest-path query.
///
/// An empty `path` means the goal is unreachable; `total_seconds` is then zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteResult {
    pub path: Vec<LocationId>,
    pub total_seconds: u32,
}

impl RouteResult {
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Run Dijkstra's algorithm with a binary-heap frontier to find the
/// lowest-cost path that satisfies the provided constraints.
pub fn find_route_dijkstra<'a>(
    graph: &'a Graph,
    catalog: &Catalog,
    start: &'a str,
    goal: &str,
    constraints: &PathConstraints,
) -> RouteResult {
    if start == goal {
        return trivial_route(start);
    }

    let mut distances: HashMap<&'a str, u32> = HashMap::new();
    let mut parents: HashMap<&'a str, &'a str> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut iterations = 0usize;

    distances.insert(start, 0);
    queue.push(QueueEntry::new(start, 0));

    while let Some(entry) = queue.pop() {
        iterations += 1;
        if iterations > constraints.max_iterations {
            warn!(
                start,
                goal,
                limit = constraints.max_iterations,
                "search exceeded iteration cap; treating goal as unreachable"
            );
            return RouteResult::unreachable();
        }

        if entry.cost > tentative(&distances, entry.node) {
            continue;
        }

        if entry.node == goal {
            return finish_route(&parents, start, goal, entry.cost);
        }

        for edge in graph.neighbours(entry.node) {
            if !constraints.allows(catalog, entry.node, edge) {
                continue;
            }

            let next = edge.target.as_str();
            let next_cost = entry.cost.saturating_add(edge.seconds);
            if next_cost < tentative(&distances, next) {
                distances.insert(next, next_cost);
                parents.insert(next, entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    RouteResult::unreachable()
}

/// Dijkstra's algorithm with an O(V²) linear-scan frontier.
///
/// Produces the same costs as [`find_route_dijkstra`]; kept as a simple
/// reference implementation to cross-check the heap-based search.
pub fn find_route_linear_scan<'a>(
    graph: &'a Graph,
    catalog: &Catalog,
    start: &'a str,
    goal: &str,
    constraints: &PathConstraints,
) -> RouteResult {
    if start == goal {
        return trivial_route(start);
    }

    let mut distances: HashMap<&'a str, u32> = HashMap::new();
    let mut parents: HashMap<&'a str, &'a str> = HashMap::new();
    let mut frontier: Vec<&'a str> = vec![start];
    let mut iterations = 0usize;

    distances.insert(start, 0);

    while !frontier.is_empty() {
        iterations += 1;
        if iterations > constraints.max_iterations {
            warn!(
                start,
                goal,
                limit = constraints.max_iterations,
                "search exceeded iteration cap; treating goal as unreachable"
            );
            return RouteResult::unreachable();
        }

        let mut best = 0;
        for (index, node) in frontier.iter().enumerate().skip(1) {
            let candidate = (tentative(&distances, node), *node);
            let current = (tentative(&distances, frontier[best]), frontier[best]);
            if candidate < current {
                best = index;
            }
        }
        let current = frontier.swap_remove(best);
        let current_cost = tentative(&distances, current);

        if current == goal {
            return finish_route(&parents, start, goal, current_cost);
        }

        for edge in graph.neighbours(current) {
            if !constraints.allows(catalog, current, edge) {
                continue;
            }

            let next = edge.target.as_str();
            let next_cost = current_cost.saturating_add(edge.seconds);
            if next_cost < tentative(&distances, next) {
                distances.insert(next, next_cost);
                parents.insert(next, current);
                if !frontier.contains(&next) {
                    frontier.push(next);
                }
            }
        }
    }

    RouteResult::unreachable()
}

fn tentative(distances: &HashMap<&str, u32>, node: &str) -> u32 {
    distances.get(node).copied().unwrap_or(u32::MAX)
}

fn trivial_route(location: &str) -> RouteResult {
    RouteResult {
        path: vec![location.to_string()],
        total_seconds: 0,
    }
}

fn finish_route(
    parents: &HashMap<&str, &str>,
    start: &str,
    goal: &str,
    total_seconds: u32,
) -> RouteResult {
    let path = reconstruct_path(parents, start, goal);
    if path.is_empty() {
        return RouteResult::unreachable();
    }
    RouteResult {
        path,
        total_seconds,
    }
}

/// Walk predecessors back from `goal`. A chain that does not end at `start`
/// means there is no connectivity and yields an empty path.
fn reconstruct_path(parents: &HashMap<&str, &str>, start: &str, goal: &str) -> Vec<LocationId> {
    let mut path = vec![goal];
    let mut current = goal;
    for _ in 0..=parents.len() {
        if current == start {
            break;
        }
        match parents.get(current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();

    if path.first() != Some(&start) {
        return Vec::new();
    }
    path.into_iter().map(str::to_string).collect()
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: u32,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: u32) -> Self {
        Self { node, cost }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

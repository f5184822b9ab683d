//! Route planning module for building navigation.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search frontiers (binary heap, linear scan)
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Each algorithm is encapsulated in its own planner struct implementing
//! [`RoutePlanner`], so the orchestration in [`plan_route`] never changes when
//! a new search strategy is added.
//!
//! # Example
//!
//! ```
//! use wayfinder_lib::{build_graph, plan_route, Catalog, RouteRequest};
//!
//! let catalog = Catalog::reference_building();
//! let graph = build_graph(&catalog)?;
//! let plan = plan_route(&catalog, &graph, &RouteRequest::new("809", "1001").accessible())?;
//! assert!(plan.is_found());
//! # Ok::<(), wayfinder_lib::Error>(())
//! ```

mod planner;

pub use planner::{select_planner, DijkstraPlanner, LinearScanPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::catalog::{Catalog, LocationId};
use crate::error::Result;
use crate::graph::Graph;
use crate::path::{PathConstraints, RouteResult};

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm with a binary-heap frontier.
    #[default]
    Dijkstra,
    /// Dijkstra's algorithm with a linear-scan frontier.
    LinearScan,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::LinearScan => "linear-scan",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "linear-scan" | "linear_scan" => Ok(RouteAlgorithm::LinearScan),
            other => Err(format!("unsupported routing algorithm: {other}")),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: LocationId,
    pub goal: LocationId,
    pub accessible_only: bool,
    pub algorithm: RouteAlgorithm,
}

impl RouteRequest {
    /// Unconstrained request using the default algorithm.
    pub fn new(start: impl Into<LocationId>, goal: impl Into<LocationId>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            accessible_only: false,
            algorithm: RouteAlgorithm::default(),
        }
    }

    /// Restrict the route to elevator-only floor changes.
    pub fn accessible(mut self) -> Self {
        self.accessible_only = true;
        self
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    fn constraints(&self) -> PathConstraints {
        PathConstraints {
            accessible_only: self.accessible_only,
            ..PathConstraints::default()
        }
    }
}

/// Planned route returned by the library.
///
/// `steps` is empty when the goal cannot be reached under the request's
/// constraints; that is a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub accessible_only: bool,
    pub start: LocationId,
    pub goal: LocationId,
    pub steps: Vec<LocationId>,
    pub total_seconds: u32,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_found(&self) -> bool {
        !self.steps.is_empty()
    }

    /// The bare path and cost, as consumed by the direction synthesizer.
    pub fn result(&self) -> RouteResult {
        RouteResult {
            path: self.steps.clone(),
            total_seconds: self.total_seconds,
        }
    }
}

/// Compute a route using the requested algorithm and constraints.
///
/// Unknown identifiers are rejected with suggestions; an unreachable goal
/// produces a plan with no steps.
pub fn plan_route(catalog: &Catalog, graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    let start = catalog.resolve(&request.start)?;
    let goal = catalog.resolve(&request.goal)?;

    let planner = select_planner(request.algorithm);
    let result = planner.find_path(
        graph,
        catalog,
        &start.id,
        &goal.id,
        &request.constraints(),
    );

    tracing::debug!(
        start = %start.id,
        goal = %goal.id,
        algorithm = %request.algorithm,
        accessible_only = request.accessible_only,
        hops = result.hop_count(),
        seconds = result.total_seconds,
        "planned route"
    );

    Ok(RoutePlan {
        algorithm: request.algorithm,
        accessible_only: request.accessible_only,
        start: start.id.clone(),
        goal: goal.id.clone(),
        steps: result.path,
        total_seconds: result.total_seconds,
    })
}

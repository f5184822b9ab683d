//! Routing facade consumed by presentation layers.
//!
//! A [`Navigator`] owns the catalog and the graph built from it. Both are
//! immutable and reference-counted, so a navigator can be cloned into as many
//! threads as needed; every query allocates its own search state.

use std::sync::Arc;

use crate::catalog::{Catalog, LocationId};
use crate::directions::{DirectionSynthesizer, Directions, SynthesisPolicy};
use crate::error::Result;
use crate::graph::{build_graph_with, Graph, WiringPolicy};
use crate::path::RouteResult;
use crate::routing::{plan_route, RoutePlan, RouteRequest};

#[derive(Debug, Clone)]
pub struct Navigator {
    catalog: Arc<Catalog>,
    graph: Graph,
    synthesis: SynthesisPolicy,
}

impl Navigator {
    /// Build the graph for `catalog` with the reference policies.
    pub fn new(catalog: Catalog) -> Result<Self> {
        Self::with_policies(catalog, WiringPolicy::default(), SynthesisPolicy::default())
    }

    pub fn with_policies(
        catalog: Catalog,
        wiring: WiringPolicy,
        synthesis: SynthesisPolicy,
    ) -> Result<Self> {
        let graph = build_graph_with(&catalog, wiring)?;
        Ok(Self {
            catalog: Arc::new(catalog),
            graph,
            synthesis,
        })
    }

    /// Navigator over the built-in reference building.
    pub fn reference() -> Result<Self> {
        Self::new(Catalog::reference_building())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Shortest route between two locations.
    ///
    /// Unknown identifiers are errors; an unreachable goal is an empty result.
    pub fn compute_route(
        &self,
        start: &str,
        goal: &str,
        accessible_only: bool,
    ) -> Result<RouteResult> {
        let mut request = RouteRequest::new(start, goal);
        request.accessible_only = accessible_only;
        Ok(self.plan(&request)?.result())
    }

    /// Route with full request options.
    pub fn plan(&self, request: &RouteRequest) -> Result<RoutePlan> {
        plan_route(&self.catalog, &self.graph, request)
    }

    /// Human-readable directions for a computed path.
    pub fn explain(
        &self,
        path: &[LocationId],
        total_seconds: u32,
        accessible_only: bool,
    ) -> Result<Directions> {
        DirectionSynthesizer::with_policy(&self.catalog, &self.graph, self.synthesis).synthesize(
            path,
            total_seconds,
            accessible_only,
        )
    }
}

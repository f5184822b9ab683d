//! Wayfinder library entry points.
//!
//! This crate exposes the building location catalog, the connectivity graph
//! built from it, the constrained shortest-path solvers, and the synthesizer
//! that turns a path into step-by-step directions. Higher-level consumers (the
//! CLI, any presentation layer) should only depend on the items exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod catalog;
pub mod directions;
pub mod error;
pub mod graph;
pub mod navigator;
pub mod output;
pub mod path;
pub mod routing;

pub use catalog::{
    Catalog, ConnectionRecord, DisplayPosition, Location, LocationId, LocationRole,
    StairwellSide, TransportKind,
};
pub use directions::{
    Arrival, DirectionSynthesizer, Directions, Instruction, RouteMode, Suggestion,
    SynthesisPolicy, TextStyle, TravelDirection, TravelTime,
};
pub use error::{Error, Result};
pub use graph::{build_graph, build_graph_with, Edge, EdgeKind, Graph, WiringPolicy};
pub use navigator::Navigator;
pub use output::{RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{find_route_dijkstra, find_route_linear_scan, PathConstraints, RouteResult};
pub use routing::{plan_route, RouteAlgorithm, RoutePlan, RouteRequest};

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, Location, LocationId, LocationRole, TransportKind};
use crate::error::{Error, Result};

/// Classification for the edge used in the connectivity graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Room, facility or lounge to its floor hub.
    Hallway,
    /// Elevator or stairwell landing to its floor hub.
    TransportLink,
    /// Elevator car between consecutive floors.
    Elevator,
    /// Stair flight between consecutive floors.
    Stairs,
    /// Explicit connection declared by the catalog.
    Connector,
}

/// Edge within the connectivity graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub target: LocationId,
    pub kind: EdgeKind,
    /// Traversal cost in seconds.
    pub seconds: u32,
    /// Crosses floors.
    pub vertical: bool,
    /// Usable by accessibility-constrained routes.
    pub accessible: bool,
}

/// Costs used when wiring a catalog into a graph.
///
/// The defaults reproduce the reference building: hallway time grows by one
/// second per ten display units on top of a five second base, landings are ten
/// seconds from the hub, an elevator hop takes forty seconds and a stair flight
/// twenty-five.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WiringPolicy {
    pub hallway_base_seconds: u32,
    pub hallway_units_per_second: f64,
    pub transport_link_seconds: u32,
    pub elevator_hop_seconds: u32,
    pub stair_hop_seconds: u32,
}

impl Default for WiringPolicy {
    fn default() -> Self {
        Self {
            hallway_base_seconds: 5,
            hallway_units_per_second: 10.0,
            transport_link_seconds: 10,
            elevator_hop_seconds: 40,
            stair_hop_seconds: 25,
        }
    }
}

impl WiringPolicy {
    /// Walking time for a hallway of the given display length. Always at least one second.
    pub fn hallway_seconds(&self, distance: f64) -> u32 {
        let units = if self.hallway_units_per_second > 0.0 {
            (distance / self.hallway_units_per_second).ceil()
        } else {
            0.0
        };
        (units as u32)
            .saturating_add(self.hallway_base_seconds)
            .max(1)
    }

    /// Time to move one floor with the given transport.
    pub fn vertical_seconds(&self, kind: TransportKind) -> u32 {
        match kind {
            TransportKind::Elevator => self.elevator_hop_seconds,
            TransportKind::Stairs => self.stair_hop_seconds,
        }
    }
}

/// Weighted, undirected connectivity graph over catalog locations.
///
/// The adjacency is immutable once built and shared behind an [`Arc`], so
/// clones are cheap and the graph can be read from many threads at once.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Arc<HashMap<LocationId, Vec<Edge>>>,
    policy: WiringPolicy,
}

impl Graph {
    /// Return the incident edges for a location.
    pub fn neighbours(&self, location: &str) -> &[Edge] {
        self.adjacency
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The edge joining `a` to `b`, if any.
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&Edge> {
        self.neighbours(a).iter().find(|edge| edge.target == b)
    }

    pub fn contains(&self, location: &str) -> bool {
        self.adjacency.contains_key(location)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Policy that produced the hallway and transport weights.
    pub fn policy(&self) -> &WiringPolicy {
        &self.policy
    }
}

/// Build the connectivity graph using the reference wiring policy.
pub fn build_graph(catalog: &Catalog) -> Result<Graph> {
    build_graph_with(catalog, WiringPolicy::default())
}

/// Build the connectivity graph with a custom wiring policy.
///
/// Each floor is wired hub-and-spoke around its single hub. Transport landings
/// of the same kind and shaft are then linked across consecutive floors, and
/// finally any explicit catalog connections are added.
pub fn build_graph_with(catalog: &Catalog, policy: WiringPolicy) -> Result<Graph> {
    let mut builder = AdjacencyBuilder::new(catalog);

    for floor in catalog.floors() {
        let locations = catalog.locations_on_floor(floor);
        let hub = floor_hub(floor, &locations)?;

        for location in locations.iter().filter(|location| location.id != hub.id) {
            if location.role().is_transport() {
                builder.insert(
                    &location.id,
                    &hub.id,
                    EdgeKind::TransportLink,
                    policy.transport_link_seconds,
                    false,
                    true,
                );
            } else {
                let distance = location.position.planar_distance_to(&hub.position);
                builder.insert(
                    &location.id,
                    &hub.id,
                    EdgeKind::Hallway,
                    policy.hallway_seconds(distance),
                    false,
                    true,
                );
            }
        }
    }

    let floors: Vec<i32> = catalog.floors().collect();
    for pair in floors.windows(2) {
        link_floors(catalog, &policy, &mut builder, pair[0], pair[1]);
    }

    for connection in catalog.connections() {
        for endpoint in [&connection.from, &connection.to] {
            if !catalog.contains(endpoint) {
                return Err(Error::UnknownConnectionEndpoint {
                    from: connection.from.clone(),
                    to: connection.to.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        if connection.from == connection.to {
            return Err(Error::SelfConnection {
                id: connection.from.clone(),
            });
        }
        builder.insert(
            &connection.from,
            &connection.to,
            EdgeKind::Connector,
            connection.seconds,
            connection.vertical,
            connection.accessible,
        );
    }

    let graph = Graph {
        adjacency: Arc::new(builder.finish()),
        policy,
    };
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built connectivity graph"
    );
    Ok(graph)
}

fn floor_hub<'a>(floor: i32, locations: &[&'a Location]) -> Result<&'a Location> {
    let mut hubs = locations
        .iter()
        .copied()
        .filter(|location| location.role() == LocationRole::Hub);
    let hub = hubs.next().ok_or(Error::MissingHub { floor })?;
    if let Some(second) = hubs.next() {
        return Err(Error::DuplicateHub {
            floor,
            first: hub.id.clone(),
            second: second.id.clone(),
        });
    }
    Ok(hub)
}

fn link_floors(
    catalog: &Catalog,
    policy: &WiringPolicy,
    builder: &mut AdjacencyBuilder,
    lower: i32,
    upper: i32,
) {
    let upper_locations = catalog.locations_on_floor(upper);

    for location in catalog.locations_on_floor(lower) {
        let Some(kind) = location.role().transport() else {
            continue;
        };
        let Some(shaft) = location.shaft.as_deref() else {
            debug!(location = %location.id, "transport has no shaft key; no vertical link");
            continue;
        };

        let landing = upper_locations.iter().find(|candidate| {
            candidate.role().transport() == Some(kind) && candidate.shaft.as_deref() == Some(shaft)
        });
        let Some(landing) = landing else {
            debug!(
                location = %location.id,
                shaft,
                floor = upper,
                "no matching landing on adjacent floor; omitting vertical link"
            );
            continue;
        };

        let (edge_kind, accessible) = match kind {
            TransportKind::Elevator => (EdgeKind::Elevator, true),
            TransportKind::Stairs => (EdgeKind::Stairs, false),
        };
        builder.insert(
            &location.id,
            &landing.id,
            edge_kind,
            policy.vertical_seconds(kind),
            true,
            accessible,
        );
    }
}

/// Accumulates symmetric edges, ignoring repeated pairs.
struct AdjacencyBuilder {
    adjacency: HashMap<LocationId, Vec<Edge>>,
}

impl AdjacencyBuilder {
    fn new(catalog: &Catalog) -> Self {
        let adjacency = catalog
            .locations()
            .map(|location| (location.id.clone(), Vec::new()))
            .collect();
        Self { adjacency }
    }

    /// Insert an undirected edge. Returns `false` when the pair was already joined.
    fn insert(
        &mut self,
        a: &str,
        b: &str,
        kind: EdgeKind,
        seconds: u32,
        vertical: bool,
        accessible: bool,
    ) -> bool {
        let exists = self
            .adjacency
            .get(a)
            .is_some_and(|edges| edges.iter().any(|edge| edge.target == b));
        if exists {
            return false;
        }

        for (from, to) in [(a, b), (b, a)] {
            self.adjacency.entry(from.to_string()).or_default().push(Edge {
                target: to.to_string(),
                kind,
                seconds,
                vertical,
                accessible,
            });
        }
        true
    }

    fn finish(self) -> HashMap<LocationId, Vec<Edge>> {
        self.adjacency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DisplayPosition;

    #[test]
    fn hallway_seconds_round_up_and_add_base() {
        let policy = WiringPolicy::default();
        assert_eq!(policy.hallway_seconds(0.0), 5);
        assert_eq!(policy.hallway_seconds(10.0), 6);
        assert_eq!(policy.hallway_seconds(10.1), 7);
    }

    #[test]
    fn hallway_seconds_stay_positive_without_base() {
        let policy = WiringPolicy {
            hallway_base_seconds: 0,
            ..WiringPolicy::default()
        };
        assert_eq!(policy.hallway_seconds(0.0), 1);
    }

    #[test]
    fn repeated_insert_is_a_no_op() {
        let catalog = Catalog::new([
            Location::new("1H", 1, DisplayPosition::default(), ["intersection"]),
            Location::new("1A", 1, DisplayPosition::default(), ["classroom"]),
        ])
        .expect("catalog");
        let mut builder = AdjacencyBuilder::new(&catalog);

        assert!(builder.insert("1A", "1H", EdgeKind::Hallway, 5, false, true));
        assert!(!builder.insert("1H", "1A", EdgeKind::Connector, 9, false, true));

        let adjacency = builder.finish();
        assert_eq!(adjacency["1A"].len(), 1);
        assert_eq!(adjacency["1H"].len(), 1);
        assert_eq!(adjacency["1H"][0].seconds, 5);
    }
}

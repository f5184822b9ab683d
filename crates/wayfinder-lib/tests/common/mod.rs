//! Common test utilities and fixture helpers.
//!
//! Provides small hand-built catalogs alongside the reference building so
//! integration tests can exercise edge cases (dangling shafts, disconnected
//! floors) without depending on the full layout.

use wayfinder_lib::{Catalog, DisplayPosition, Graph, Location, LocationId};

/// Shorthand for a location at the given plan coordinates.
#[allow(dead_code)]
pub fn location(id: &str, floor: i32, x: f64, y: f64, tags: &[&str]) -> Location {
    Location::new(id, floor, DisplayPosition::new(x, y, 0.0), tags.iter().copied())
}

/// Shorthand for a transport landing belonging to `shaft`.
#[allow(dead_code)]
pub fn landing(id: &str, floor: i32, tags: &[&str], shaft: &str) -> Location {
    location(id, floor, 0.0, 0.0, tags).with_shaft(shaft)
}

/// Three floors with an elevator chain on shaft `E1` and a stair chain on
/// shaft `S`, each floor holding one hub and one classroom.
#[allow(dead_code)]
pub fn three_floor_catalog() -> Catalog {
    let mut locations = Vec::new();
    for floor in 1..=3 {
        locations.push(location(&format!("{floor}H"), floor, 0.0, 0.0, &["intersection"]));
        locations.push(location(&format!("{floor}R"), floor, 30.0, 40.0, &["classroom"]));
        locations.push(landing(
            &format!("{floor}E1"),
            floor,
            &["elevator", "accessible"],
            "E1",
        ));
        locations.push(landing(
            &format!("{floor}S"),
            floor,
            &["stairs", "south_stairwell"],
            "S",
        ));
    }
    Catalog::new(locations).expect("three-floor catalog")
}

/// Sum of edge weights along `path`, panicking if consecutive locations are not adjacent.
#[allow(dead_code)]
pub fn path_cost(graph: &Graph, path: &[LocationId]) -> u32 {
    path.windows(2)
        .map(|pair| {
            graph
                .edge_between(&pair[0], &pair[1])
                .unwrap_or_else(|| panic!("{} and {} are not adjacent", pair[0], pair[1]))
                .seconds
        })
        .sum()
}

/// Every location identifier in a catalog, sorted.
#[allow(dead_code)]
pub fn sorted_ids(catalog: &Catalog) -> Vec<LocationId> {
    let mut ids: Vec<LocationId> = catalog.locations().map(|l| l.id.clone()).collect();
    ids.sort();
    ids
}

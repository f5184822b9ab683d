//! Location registry for a multi-floor building.
//!
//! The [`Catalog`] is the static description of every named place in the
//! building: its floor, its display position and its descriptive tags. Tags are
//! interpreted once, when a [`Location`] is constructed, into a closed
//! [`LocationRole`] so that downstream code never inspects raw tag strings.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Unique identifier for a location, e.g. `"809"` or `"10E1"`.
pub type LocationId = String;

/// Minimum Jaro-Winkler similarity for an identifier to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Layout coordinates owned by the presentation layer.
///
/// Routing only uses the planar distance between two positions to derive
/// hallway traversal costs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayPosition {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl DisplayPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the floor plane, ignoring `z`.
    pub fn planar_distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Kind of vertical transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    Elevator,
    Stairs,
}

impl TransportKind {
    /// Human-readable label shown in directions.
    pub fn label(self) -> &'static str {
        match self {
            TransportKind::Elevator => "Elevator",
            TransportKind::Stairs => "Stairwell",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which end of the building a stairwell sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StairwellSide {
    North,
    South,
}

impl StairwellSide {
    pub fn label(self) -> &'static str {
        match self {
            StairwellSide::North => "North",
            StairwellSide::South => "South",
        }
    }
}

/// Closed classification of what a location is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LocationRole {
    Classroom,
    StaffRoom,
    StudySection,
    Facility,
    Lounge,
    Elevator,
    Stairwell { side: Option<StairwellSide> },
    Hub,
    Other,
}

impl LocationRole {
    /// Derive a role from a location's tags.
    ///
    /// When several tags apply, transport wins over hub, and hub wins over the
    /// room-like roles.
    pub fn from_tags<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tags: BTreeSet<&str> = tags.into_iter().collect();
        let has = |tag: &str| tags.contains(tag);

        if has("elevator") {
            LocationRole::Elevator
        } else if has("stairs") {
            let side = if has("north_stairwell") {
                Some(StairwellSide::North)
            } else if has("south_stairwell") {
                Some(StairwellSide::South)
            } else {
                None
            };
            LocationRole::Stairwell { side }
        } else if has("intersection") {
            LocationRole::Hub
        } else if has("classroom") {
            LocationRole::Classroom
        } else if has("staff_room") {
            LocationRole::StaffRoom
        } else if has("study_section") {
            LocationRole::StudySection
        } else if has("lounge") {
            LocationRole::Lounge
        } else if has("facility") {
            LocationRole::Facility
        } else {
            LocationRole::Other
        }
    }

    /// Transport kind for elevators and stairwells.
    pub fn transport(self) -> Option<TransportKind> {
        match self {
            LocationRole::Elevator => Some(TransportKind::Elevator),
            LocationRole::Stairwell { .. } => Some(TransportKind::Stairs),
            _ => None,
        }
    }

    pub fn is_transport(self) -> bool {
        self.transport().is_some()
    }

    pub fn is_stairwell(self) -> bool {
        matches!(self, LocationRole::Stairwell { .. })
    }

    /// Rooms a walker arrives at or leaves from a hallway.
    pub fn is_room_like(self) -> bool {
        matches!(self, LocationRole::Classroom | LocationRole::StaffRoom)
    }

    /// Friendly name used in location listings.
    pub fn label(self) -> &'static str {
        match self {
            LocationRole::Classroom => "Room",
            LocationRole::StaffRoom => "Staff Room",
            LocationRole::StudySection => "Study Section",
            LocationRole::Facility => "Facility",
            LocationRole::Lounge => "Lounge",
            LocationRole::Elevator => "Elevator",
            LocationRole::Stairwell { .. } => "Stairwell",
            LocationRole::Hub => "Hallway Intersection",
            LocationRole::Other => "Location",
        }
    }
}

/// A named place inside the building.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: LocationId,
    pub floor: i32,
    pub position: DisplayPosition,
    pub tags: BTreeSet<String>,
    /// Vertical shaft key for transport locations. Elevators or stairwells on
    /// consecutive floors sharing a shaft are linked together.
    pub shaft: Option<String>,
    role: LocationRole,
}

impl Location {
    pub fn new<I, S>(
        id: impl Into<LocationId>,
        floor: i32,
        position: DisplayPosition,
        tags: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
        let role = LocationRole::from_tags(tags.iter().map(String::as_str));
        Self {
            id: id.into(),
            floor,
            position,
            tags,
            shaft: None,
            role,
        }
    }

    /// Attach a vertical shaft key.
    pub fn with_shaft(mut self, shaft: impl Into<String>) -> Self {
        self.shaft = Some(shaft.into());
        self
    }

    pub fn role(&self) -> LocationRole {
        self.role
    }
}

/// Explicit connection declared by a catalog in addition to the wiring policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub from: LocationId,
    pub to: LocationId,
    pub seconds: u32,
    #[serde(default)]
    pub vertical: bool,
    #[serde(default = "default_accessible")]
    pub accessible: bool,
}

fn default_accessible() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    id: LocationId,
    floor: i32,
    x: f64,
    y: f64,
    #[serde(default)]
    z: f64,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    shaft: Option<String>,
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        let location = Location::new(
            record.id,
            record.floor,
            DisplayPosition::new(record.x, record.y, record.z),
            record.tags,
        );
        match record.shaft {
            Some(shaft) => location.with_shaft(shaft),
            None => location,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    locations: Vec<LocationRecord>,
    #[serde(default)]
    connections: Vec<ConnectionRecord>,
}

/// In-memory registry of every location in the building.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locations: HashMap<LocationId, Location>,
    floors: BTreeSet<i32>,
    connections: Vec<ConnectionRecord>,
}

impl Catalog {
    /// Build a catalog from a list of locations, rejecting duplicate identifiers.
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Result<Self> {
        let mut by_id = HashMap::new();
        let mut floors = BTreeSet::new();
        for location in locations {
            if by_id.contains_key(&location.id) {
                return Err(Error::DuplicateLocation { id: location.id });
            }
            floors.insert(location.floor);
            by_id.insert(location.id.clone(), location);
        }

        Ok(Self {
            locations: by_id,
            floors,
            connections: Vec::new(),
        })
    }

    /// Attach explicit connections. Endpoints are validated when the graph is built.
    pub fn with_connections(mut self, connections: Vec<ConnectionRecord>) -> Self {
        self.connections = connections;
        self
    }

    /// Parse a catalog from its JSON document form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        let catalog = Self::new(document.locations.into_iter().map(Location::from))?
            .with_connections(document.connections);
        debug!(
            locations = catalog.len(),
            floors = catalog.floors.len(),
            connections = catalog.connections.len(),
            "parsed location catalog"
        );
        Ok(catalog)
    }

    /// The built-in three-floor reference building (floors 8, 9 and 10).
    pub fn reference_building() -> Self {
        let locations = REFERENCE_FLOORS
            .iter()
            .enumerate()
            .flat_map(|(level, &floor)| reference_floor(floor, level as f64));
        // Identifiers are prefixed by floor number, so they never collide.
        Self::new(locations).expect("reference building identifiers are unique")
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.locations.contains_key(id)
    }

    /// Lookup a location, producing an error with suggestions when it is unknown.
    pub fn resolve(&self, id: &str) -> Result<&Location> {
        self.location(id).ok_or_else(|| Error::UnknownLocation {
            id: id.to_string(),
            suggestions: self.fuzzy_matches(id, 3),
        })
    }

    /// Floors in ascending order.
    pub fn floors(&self) -> impl Iterator<Item = i32> + '_ {
        self.floors.iter().copied()
    }

    /// All locations, in no particular order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Locations on a floor, sorted by identifier.
    pub fn locations_on_floor(&self, floor: i32) -> Vec<&Location> {
        let mut locations: Vec<&Location> = self
            .locations
            .values()
            .filter(|location| location.floor == floor)
            .collect();
        locations.sort_by(|a, b| a.id.cmp(&b.id));
        locations
    }

    pub fn connections(&self) -> &[ConnectionRecord] {
        &self.connections
    }

    /// First hub on a floor, by identifier.
    pub fn hub_for_floor(&self, floor: i32) -> Option<&Location> {
        self.first_with_role(floor, LocationRole::Hub)
    }

    /// First study section on a floor, by identifier.
    pub fn study_section_for_floor(&self, floor: i32) -> Option<&Location> {
        self.first_with_role(floor, LocationRole::StudySection)
    }

    fn first_with_role(&self, floor: i32, role: LocationRole) -> Option<&Location> {
        self.locations_on_floor(floor)
            .into_iter()
            .find(|location| location.role() == role)
    }

    /// Identifiers that closely resemble `name`, best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .locations
            .keys()
            .map(|id| (strsim::jaro_winkler(&needle, &id.to_lowercase()), id.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }
}

const REFERENCE_FLOORS: [i32; 3] = [8, 9, 10];

/// Per-floor layout: identifier suffix, raw x, raw y, tags.
const REFERENCE_LAYOUT: &[(&str, f64, f64, &[&str])] = &[
    ("01", 500.0, 20.0, &["classroom"]),
    ("03", 500.0, 5.0, &["classroom"]),
    ("04", 450.0, 5.0, &["classroom"]),
    ("05", 300.0, 5.0, &["classroom"]),
    ("06", 200.0, 5.0, &["classroom"]),
    ("07", 0.0, 5.0, &["classroom"]),
    ("08", 20.0, 20.0, &["classroom"]),
    ("09", 50.0, 30.0, &["classroom"]),
    ("10", 20.0, 40.0, &["classroom"]),
    ("11", 0.0, 50.0, &["classroom"]),
    ("12", 50.0, 45.0, &["classroom"]),
    ("02", 400.0, 10.0, &["study_section", "facility"]),
    ("SR", 450.0, 40.0, &["staff_room", "office"]),
    ("C", 600.0, 40.0, &["couches", "lounge"]),
    ("B", 350.0, 30.0, &["bathroom", "facility"]),
    ("T", 250.0, 10.0, &["tables", "lounge"]),
    ("E1", 200.0, 20.0, &["elevator", "accessible"]),
    ("E2", 300.0, 20.0, &["elevator", "accessible"]),
    ("SS", 500.0, 30.0, &["stairs", "south_stairwell"]),
    ("NS", 100.0, 20.0, &["stairs", "north_stairwell"]),
    ("H1", 250.0, 25.0, &["intersection"]),
];

/// Map a raw plan coordinate onto the 350-unit display height.
fn display_y(raw_y: f64) -> f64 {
    350.0 - raw_y * 6.5
}

fn reference_floor(floor: i32, level: f64) -> impl Iterator<Item = Location> {
    REFERENCE_LAYOUT.iter().map(move |&(suffix, x, y, tags)| {
        let location = Location::new(
            format!("{floor}{suffix}"),
            floor,
            DisplayPosition::new(x, display_y(y), level),
            tags.iter().copied(),
        );
        if location.role().is_transport() {
            location.with_shaft(suffix)
        } else {
            location
        }
    })
}

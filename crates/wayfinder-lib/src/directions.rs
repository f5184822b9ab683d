//! Direction synthesis.
//!
//! Converts a path into an ordered list of instructions. Each consecutive pair
//! of locations is classified by the floors and [`LocationRole`]s of its two
//! endpoints; the phrasing lives entirely in the `Display` implementations so a
//! different front end can reuse the structured [`Directions`] as-is.

use std::fmt;

use serde::Serialize;

use crate::catalog::{Catalog, Location, LocationId, LocationRole, StairwellSide, TransportKind};
use crate::error::Result;
use crate::graph::Graph;
use crate::path::{find_route_dijkstra, PathConstraints};

const NO_ROUTE_MESSAGE: &str = "A path between these locations could not be found under the \
given constraints, or you are already there.";

/// Tuning for the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisPolicy {
    /// Only suggest a nearby study section when the whole trip is shorter than this.
    pub suggestion_threshold_seconds: u32,
}

impl Default for SynthesisPolicy {
    fn default() -> Self {
        Self {
            suggestion_threshold_seconds: 4 * 60,
        }
    }
}

/// Duration rendered as minutes and seconds, e.g. `2m 7s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TravelTime(pub u32);

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {}s", self.0 / 60, self.0 % 60)
    }
}

/// Whether the route was restricted to elevators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMode {
    ElevatorOnly,
    StairsAndElevators,
}

impl RouteMode {
    pub fn from_accessible(accessible_only: bool) -> Self {
        if accessible_only {
            RouteMode::ElevatorOnly
        } else {
            RouteMode::StairsAndElevators
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMode::ElevatorOnly => f.write_str("Using elevator-only route."),
            RouteMode::StairsAndElevators => f.write_str("Using stairs and elevators."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelDirection {
    Ascend,
    Descend,
}

impl TravelDirection {
    pub fn label(self) -> &'static str {
        match self {
            TravelDirection::Ascend => "ascend",
            TravelDirection::Descend => "descend",
        }
    }
}

/// One step of the directions, derived from a consecutive pair in the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    /// Ride or climb to another floor.
    FloorChange {
        from: LocationId,
        transport: TransportKind,
        direction: TravelDirection,
        floor: i32,
    },
    /// From the hub straight to a room.
    HallwayArrival {
        hub: LocationId,
        destination: LocationId,
    },
    /// From the hub toward an elevator or stairwell landing.
    TowardTransport {
        landing: LocationId,
        transport: TransportKind,
        side: Option<StairwellSide>,
    },
    /// Leave a room toward the hallway.
    ExitRoom { room: LocationId, next: LocationId },
    /// Leave a landing toward the hallway.
    ExitTransport {
        landing: LocationId,
        transport: TransportKind,
        next: LocationId,
    },
    /// Anything else.
    Move {
        from: LocationId,
        to: LocationId,
        floor: i32,
    },
}

/// Text styling for rendered directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Plain,
    /// Location identifiers and headline wrapped in `**`.
    Markdown,
}

impl TextStyle {
    fn strong(self, text: &str) -> String {
        match self {
            TextStyle::Plain => text.to_string(),
            TextStyle::Markdown => format!("**{text}**"),
        }
    }
}

impl Instruction {
    /// Render the instruction in the requested style.
    pub fn render(&self, style: TextStyle) -> String {
        let s = |text: &str| style.strong(text);
        match self {
            Instruction::FloorChange {
                from,
                transport,
                direction,
                floor,
            } => format!(
                "Floor change: proceed to the {} ({}) and {} to Floor {}.",
                transport,
                s(from),
                direction.label(),
                floor
            ),
            Instruction::HallwayArrival { hub, destination } => format!(
                "At the main intersection ({}), take the corridor directly to {} (your destination is nearby).",
                s(hub),
                s(destination)
            ),
            Instruction::TowardTransport {
                landing,
                transport,
                side,
            } => {
                let side = side.map(|side| format!("{} ", side.label())).unwrap_or_default();
                format!(
                    "Follow the main hallway toward the {}{} bank ({}).",
                    side,
                    transport,
                    s(landing)
                )
            }
            Instruction::ExitRoom { room, next } => format!(
                "Head out of {} toward the main hallway intersection ({}).",
                s(room),
                s(next)
            ),
            Instruction::ExitTransport {
                landing,
                transport,
                next,
            } => format!(
                "Exit the {} area ({}) and proceed to the central hall ({}).",
                transport,
                s(landing),
                s(next)
            ),
            Instruction::Move { from, to, floor } => format!(
                "From {} (Floor {}), move towards {}.",
                s(from),
                floor,
                s(to)
            ),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(TextStyle::Plain))
    }
}

/// Nearby study section worth mentioning after a short trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub facility: LocationId,
    pub walk_seconds: u32,
}

impl Suggestion {
    pub fn render(&self, style: TextStyle) -> String {
        format!(
            "Need a break? The private study section ({}) is only {}s walk from your destination.",
            style.strong(&self.facility),
            self.walk_seconds
        )
    }
}

/// Closing statement of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arrival {
    pub location: LocationId,
    pub floor: i32,
}

impl Arrival {
    pub fn render(&self, style: TextStyle) -> String {
        format!(
            "You have arrived at {} (Floor {}).",
            style.strong(&self.location),
            self.floor
        )
    }
}

/// Structured directions for a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Directions {
    /// No route under the constraints, or start and goal coincide.
    Unavailable,
    Route {
        total: TravelTime,
        mode: RouteMode,
        instructions: Vec<Instruction>,
        suggestion: Option<Suggestion>,
        arrival: Arrival,
    },
}

impl Directions {
    pub fn is_route(&self) -> bool {
        matches!(self, Directions::Route { .. })
    }

    /// Ordered plain-text lines: summary, mode, instructions, suggestion, arrival.
    pub fn lines(&self) -> Vec<String> {
        self.lines_styled(TextStyle::Plain)
    }

    pub fn lines_styled(&self, style: TextStyle) -> Vec<String> {
        match self {
            Directions::Unavailable => vec![NO_ROUTE_MESSAGE.to_string()],
            Directions::Route {
                total,
                mode,
                instructions,
                suggestion,
                arrival,
            } => {
                let mut lines = Vec::with_capacity(instructions.len() + 4);
                lines.push(style.strong(&format!(
                    "Optimal route found! Total travel time: {total}"
                )));
                lines.push(mode.to_string());
                lines.extend(instructions.iter().map(|step| step.render(style)));
                if let Some(suggestion) = suggestion {
                    lines.push(suggestion.render(style));
                }
                lines.push(arrival.render(style));
                lines
            }
        }
    }
}

impl fmt::Display for Directions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Turns solver output into [`Directions`].
#[derive(Debug, Clone, Copy)]
pub struct DirectionSynthesizer<'a> {
    catalog: &'a Catalog,
    graph: &'a Graph,
    policy: SynthesisPolicy,
}

impl<'a> DirectionSynthesizer<'a> {
    pub fn new(catalog: &'a Catalog, graph: &'a Graph) -> Self {
        Self::with_policy(catalog, graph, SynthesisPolicy::default())
    }

    pub fn with_policy(catalog: &'a Catalog, graph: &'a Graph, policy: SynthesisPolicy) -> Self {
        Self {
            catalog,
            graph,
            policy,
        }
    }

    /// Build directions for `path`.
    ///
    /// Paths with fewer than two locations yield [`Directions::Unavailable`].
    /// Fails only when the path names a location missing from the catalog.
    pub fn synthesize(
        &self,
        path: &[LocationId],
        total_seconds: u32,
        accessible_only: bool,
    ) -> Result<Directions> {
        if path.len() <= 1 {
            return Ok(Directions::Unavailable);
        }

        let locations = path
            .iter()
            .map(|id| self.catalog.resolve(id))
            .collect::<Result<Vec<&Location>>>()?;
        let Some(destination) = locations.last() else {
            return Ok(Directions::Unavailable);
        };

        let instructions = locations
            .windows(2)
            .map(|pair| classify(pair[0], pair[1]))
            .collect();

        Ok(Directions::Route {
            total: TravelTime(total_seconds),
            mode: RouteMode::from_accessible(accessible_only),
            instructions,
            suggestion: self.suggest(destination, total_seconds),
            arrival: Arrival {
                location: destination.id.clone(),
                floor: destination.floor,
            },
        })
    }

    /// Run a second, unconstrained search from the destination to the study
    /// section on its floor.
    fn suggest(&self, destination: &Location, total_seconds: u32) -> Option<Suggestion> {
        if total_seconds >= self.policy.suggestion_threshold_seconds {
            return None;
        }
        let facility = self.catalog.study_section_for_floor(destination.floor)?;
        if facility.id == destination.id {
            return None;
        }

        let detour = find_route_dijkstra(
            self.graph,
            self.catalog,
            &destination.id,
            &facility.id,
            &PathConstraints::default(),
        );
        (detour.path.len() > 1).then(|| Suggestion {
            facility: facility.id.clone(),
            walk_seconds: detour.total_seconds,
        })
    }
}

fn classify(from: &Location, to: &Location) -> Instruction {
    if from.floor != to.floor {
        let transport = if to.role().is_stairwell() {
            TransportKind::Stairs
        } else {
            TransportKind::Elevator
        };
        let direction = if to.floor > from.floor {
            TravelDirection::Ascend
        } else {
            TravelDirection::Descend
        };
        return Instruction::FloorChange {
            from: from.id.clone(),
            transport,
            direction,
            floor: to.floor,
        };
    }

    match (from.role(), to.role()) {
        (LocationRole::Hub, target) if target.is_room_like() => Instruction::HallwayArrival {
            hub: from.id.clone(),
            destination: to.id.clone(),
        },
        (LocationRole::Hub, LocationRole::Elevator) => Instruction::TowardTransport {
            landing: to.id.clone(),
            transport: TransportKind::Elevator,
            side: None,
        },
        (LocationRole::Hub, LocationRole::Stairwell { side }) => Instruction::TowardTransport {
            landing: to.id.clone(),
            transport: TransportKind::Stairs,
            side,
        },
        (origin, _) if origin.is_room_like() => Instruction::ExitRoom {
            room: from.id.clone(),
            next: to.id.clone(),
        },
        (origin, _) if origin.is_transport() => Instruction::ExitTransport {
            landing: from.id.clone(),
            transport: origin.transport().unwrap_or(TransportKind::Elevator),
            next: to.id.clone(),
        },
        _ => Instruction::Move {
            from: from.id.clone(),
            to: to.id.clone(),
            floor: from.floor,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_time_formats_minutes_and_seconds() {
        assert_eq!(TravelTime(127).to_string(), "2m 7s");
        assert_eq!(TravelTime(59).to_string(), "0m 59s");
        assert_eq!(TravelTime(0).to_string(), "0m 0s");
    }

    #[test]
    fn markdown_style_bolds_identifiers() {
        let instruction = Instruction::ExitRoom {
            room: "809".to_string(),
            next: "8H1".to_string(),
        };
        assert_eq!(
            instruction.render(TextStyle::Markdown),
            "Head out of **809** toward the main hallway intersection (**8H1**)."
        );
        assert_eq!(
            instruction.to_string(),
            "Head out of 809 toward the main hallway intersection (8H1)."
        );
    }

    #[test]
    fn stairwell_side_is_named() {
        let instruction = Instruction::TowardTransport {
            landing: "8NS".to_string(),
            transport: TransportKind::Stairs,
            side: Some(StairwellSide::North),
        };
        assert_eq!(
            instruction.to_string(),
            "Follow the main hallway toward the North Stairwell bank (8NS)."
        );
    }
}

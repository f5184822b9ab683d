use std::fmt::Write;

use serde::Serialize;

use crate::catalog::{Catalog, LocationId};
use crate::directions::{Directions, TextStyle, TravelTime};
use crate::error::Result;
use crate::routing::RoutePlan;
use crate::RouteAlgorithm;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    /// Chat-style output with bold identifiers and section rules.
    Markdown,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: LocationId,
    pub floor: i32,
}

/// Location visited while following a route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub id: LocationId,
    pub floor: i32,
    pub role: &'static str,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub accessible_only: bool,
    pub found: bool,
    pub total_seconds: u32,
    pub total_time: String,
    pub hops: usize,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
    pub directions: Directions,
}

impl RouteSummary {
    /// Combine a [`RoutePlan`] and its directions, resolving floors and roles.
    pub fn from_plan(catalog: &Catalog, plan: &RoutePlan, directions: Directions) -> Result<Self> {
        let endpoint = |id: &str| -> Result<RouteEndpoint> {
            let location = catalog.resolve(id)?;
            Ok(RouteEndpoint {
                id: location.id.clone(),
                floor: location.floor,
            })
        };

        let steps = plan
            .steps
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let location = catalog.resolve(id)?;
                Ok(RouteStep {
                    index,
                    id: location.id.clone(),
                    floor: location.floor,
                    role: location.role().label(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            algorithm: plan.algorithm,
            accessible_only: plan.accessible_only,
            found: plan.is_found(),
            total_seconds: plan.total_seconds,
            total_time: TravelTime(plan.total_seconds).to_string(),
            hops: plan.hop_count(),
            start: endpoint(&plan.start)?,
            goal: endpoint(&plan.goal)?,
            steps,
            directions,
        })
    }

    /// Render the summary in the requested presentation style.
    pub fn render_with(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Markdown => self.render_markdown(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route from {} (Floor {}) to {} (Floor {}) ({} hops; algorithm: {}):",
            self.start.id,
            self.start.floor,
            self.goal.id,
            self.goal.floor,
            self.hops,
            self.algorithm
        );

        match &self.directions {
            Directions::Unavailable => {
                for line in self.directions.lines() {
                    let _ = writeln!(buffer, "{line}");
                }
            }
            Directions::Route {
                total,
                mode,
                instructions,
                suggestion,
                arrival,
            } => {
                let _ = writeln!(buffer, "Total travel time: {total}");
                let _ = writeln!(buffer, "{mode}");
                for instruction in instructions {
                    let _ = writeln!(buffer, " - {instruction}");
                }
                if let Some(suggestion) = suggestion {
                    let _ = writeln!(buffer, "Tip: {}", suggestion.render(TextStyle::Plain));
                }
                let _ = writeln!(buffer, "{}", arrival.render(TextStyle::Plain));
            }
        }
        buffer
    }

    fn render_markdown(&self) -> String {
        let style = TextStyle::Markdown;
        let mut buffer = String::new();

        match &self.directions {
            Directions::Unavailable => {
                for line in self.directions.lines_styled(style) {
                    let _ = writeln!(buffer, "{line}");
                }
            }
            Directions::Route {
                total,
                mode,
                instructions,
                suggestion,
                arrival,
            } => {
                let _ = writeln!(
                    buffer,
                    "**Optimal Route Found! Total Travel Time: {total}**"
                );
                let _ = writeln!(buffer, "*({mode})*");
                let _ = writeln!(buffer, "---");
                for instruction in instructions {
                    let _ = writeln!(buffer, "- {}", instruction.render(style));
                }
                if let Some(suggestion) = suggestion {
                    let _ = writeln!(buffer, "---");
                    let _ = writeln!(buffer, "**Tip:** {}", suggestion.render(style));
                }
                let _ = writeln!(buffer, "---");
                let _ = writeln!(buffer, "**Final Destination:** {}", arrival.render(style));
            }
        }
        buffer
    }
}

//! Route command handler for computing directions between two locations.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;

use wayfinder_lib::{Error as RouteError, RouteAlgorithm, RouteRequest, RouteSummary};

use crate::commands::load_navigator;
use wayfinder_cli::output::OutputFormat;

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    /// Starting location identifier.
    #[arg(long = "from")]
    pub from: String,
    /// Destination location identifier.
    #[arg(long = "to")]
    pub to: String,
    /// Only change floors by elevator.
    #[arg(long)]
    pub accessible: bool,
    /// Search frontier: dijkstra or linear-scan.
    #[arg(long, default_value_t = RouteAlgorithm::Dijkstra)]
    pub algorithm: RouteAlgorithm,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let request = RouteRequest::new(self.from.trim(), self.to.trim())
            .with_algorithm(self.algorithm);
        if self.accessible {
            request.accessible()
        } else {
            request
        }
    }
}

/// Handle the route subcommand.
///
/// An unreachable destination is reported through the directions and is not
/// a failure.
pub fn handle_route_command(
    catalog: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let request = args.to_request();
    if request.start == request.goal {
        bail!("choose different start and end locations");
    }

    let navigator = load_navigator(catalog)?;
    let plan = navigator
        .plan(&request)
        .map_err(handle_route_failure)?;
    let directions = navigator
        .explain(&plan.steps, plan.total_seconds, plan.accessible_only)
        .context("failed to synthesize directions")?;
    let summary = RouteSummary::from_plan(navigator.catalog(), &plan, directions)
        .context("failed to build route summary for display")?;

    format
        .render_route(&summary)
        .context("failed to write route output")
}

fn handle_route_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownLocation { id, suggestions } => {
            anyhow::anyhow!(format_unknown_location_message(&id, &suggestions))
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_location_message(id: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown location '{}'.", id);
    match suggestions {
        [] => {}
        [single] => message.push_str(&format!(" Did you mean '{single}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message.push_str(" Run `wayfinder locations --all` to list identifiers.");
    message
}

//! Location listing command.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use wayfinder_lib::{Catalog, Location, LocationRole};

use crate::commands::load_catalog;
use wayfinder_cli::output::{FloorListing, LocationEntry, OutputFormat};

/// Arguments for the locations command.
#[derive(Debug, Clone, Args)]
pub struct LocationsCommandArgs {
    /// Only list this floor.
    #[arg(long)]
    pub floor: Option<i32>,
    /// Include hallways, transports and facilities as well as rooms.
    #[arg(long)]
    pub all: bool,
}

/// Handle the locations subcommand.
pub fn handle_locations_command(
    catalog: Option<&Path>,
    format: OutputFormat,
    args: &LocationsCommandArgs,
) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    let listing = collect_listing(&catalog, args);
    format
        .render_locations(&listing)
        .context("failed to write location listing")
}

/// Rooms a visitor would pick as a start or destination.
fn is_selectable(location: &Location) -> bool {
    matches!(
        location.role(),
        LocationRole::Classroom | LocationRole::StaffRoom | LocationRole::Lounge
    )
}

fn collect_listing(catalog: &Catalog, args: &LocationsCommandArgs) -> Vec<FloorListing> {
    catalog
        .floors()
        .filter(|floor| args.floor.is_none() || args.floor == Some(*floor))
        .map(|floor| FloorListing {
            floor,
            locations: catalog
                .locations_on_floor(floor)
                .into_iter()
                .filter(|location| args.all || is_selectable(location))
                .map(|location| LocationEntry {
                    id: location.id.clone(),
                    role: location.role().label(),
                })
                .collect(),
        })
        .filter(|listing| !listing.locations.is_empty())
        .collect()
}

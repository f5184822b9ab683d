// Handlers for the CLI subcommands. main.rs parses arguments and dispatches here.

pub mod locations;
pub mod route;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use wayfinder_lib::{Catalog, Navigator};

/// Environment variable naming a catalog file when `--catalog` is absent.
pub const CATALOG_ENV: &str = "WAYFINDER_CATALOG";

/// Pick the catalog source: explicit flag, then environment, then none.
fn catalog_source(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(CATALOG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}

/// Load the catalog the user asked for, or the reference building.
pub fn load_catalog(flag: Option<&Path>) -> Result<Catalog> {
    let Some(path) = catalog_source(flag) else {
        return Ok(Catalog::reference_building());
    };

    let json = fs::read_to_string(&path)
        .with_context(|| format!("failed to read catalog from {}", path.display()))?;
    let catalog = Catalog::from_json_str(&json)
        .with_context(|| format!("failed to load catalog from {}", path.display()))?;
    info!(path = %path.display(), locations = catalog.len(), "loaded catalog");
    Ok(catalog)
}

/// Load the catalog and build its routing graph.
pub fn load_navigator(flag: Option<&Path>) -> Result<Navigator> {
    let catalog = load_catalog(flag)?;
    Navigator::new(catalog).context("failed to build the building graph")
}

//! Output formatting for routes and location listings.
//!
//! Every renderer builds a `String` so the formats can be tested without
//! capturing stdout; [`OutputFormat`] prints the result.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use wayfinder_lib::{RouteRenderMode, RouteSummary};

use crate::terminal::ColorPalette;

/// Output formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly directions, coloured when the terminal allows it.
    #[default]
    Text,
    /// Markdown with bold location identifiers.
    Markdown,
    /// Pretty-printed JSON.
    Json,
    /// One location per line with `+`/`|`/`-` prefixes.
    Basic,
}

impl OutputFormat {
    /// Print a route summary to stdout.
    pub fn render_route(self, summary: &RouteSummary) -> io::Result<()> {
        match self {
            OutputFormat::Text => print!("{}", format_text(summary, ColorPalette::detect())),
            OutputFormat::Markdown => print!("{}", summary.render_with(RouteRenderMode::Markdown)),
            OutputFormat::Json => return render_json(summary),
            OutputFormat::Basic => print!("{}", format_basic(summary)),
        }
        Ok(())
    }

    /// Print a location listing to stdout.
    pub fn render_locations(self, floors: &[FloorListing]) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                print!("{}", format_locations_text(floors, ColorPalette::detect()))
            }
            OutputFormat::Markdown => print!("{}", format_locations_markdown(floors)),
            OutputFormat::Json => return render_json(floors),
            OutputFormat::Basic => print!("{}", format_locations_basic(floors)),
        }
        Ok(())
    }
}

/// Locations on one floor, as listed by the `locations` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FloorListing {
    pub floor: i32,
    pub locations: Vec<LocationEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocationEntry {
    pub id: String,
    pub role: &'static str,
}

/// Serialize any value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Text rendering of a route: the library's plain text, highlighted with the
/// palette. A plain palette leaves it untouched.
pub fn format_text(summary: &RouteSummary, palette: ColorPalette) -> String {
    let p = palette;
    let plain = summary.render_with(RouteRenderMode::PlainText);
    let found = summary.directions.is_route();
    let last = plain.lines().count().saturating_sub(1);

    let mut buffer = String::new();
    for (i, line) in plain.lines().enumerate() {
        if i == 0 {
            let _ = writeln!(buffer, "{}{line}{}", p.tag_start, p.reset);
        } else if !found {
            let _ = writeln!(buffer, "{line}");
        } else if let Some(total) = line.strip_prefix("Total travel time: ") {
            let _ = writeln!(buffer, "Total travel time: {}{total}{}", p.cyan, p.reset);
        } else if let Some(instruction) = line.strip_prefix(" - ") {
            let _ = writeln!(buffer, "{} - {}{instruction}", p.gray, p.reset);
        } else if let Some(tip) = line.strip_prefix("Tip: ") {
            let _ = writeln!(buffer, "{}Tip:{} {tip}", p.yellow, p.reset);
        } else if i == last {
            let _ = writeln!(buffer, "{}{line}{}", p.tag_goal, p.reset);
        } else {
            let _ = writeln!(buffer, "{line}");
        }
    }
    buffer
}

/// Minimal path listing, one location per line.
pub fn format_basic(summary: &RouteSummary) -> String {
    let mut buffer = String::new();
    let len = summary.steps.len();
    if len == 0 {
        for line in summary.directions.lines() {
            let _ = writeln!(buffer, "{line}");
        }
        return buffer;
    }

    for (i, step) in summary.steps.iter().enumerate() {
        let prefix = if i == 0 {
            '+'
        } else if i + 1 == len {
            '-'
        } else {
            '|'
        };
        let _ = writeln!(buffer, "{} {}", prefix, step.id);
    }
    let _ = writeln!(buffer, "{} over {} hops", summary.total_time, summary.hops);
    buffer
}

fn format_locations_text(floors: &[FloorListing], palette: ColorPalette) -> String {
    let p = palette;
    let mut buffer = String::new();
    for (i, listing) in floors.iter().enumerate() {
        if i > 0 {
            buffer.push('\n');
        }
        let _ = writeln!(buffer, "{}Floor {}{}", p.white_bold, listing.floor, p.reset);
        for entry in &listing.locations {
            let _ = writeln!(buffer, " - {} {}({}){}", entry.id, p.gray, entry.role, p.reset);
        }
    }
    buffer
}

fn format_locations_markdown(floors: &[FloorListing]) -> String {
    let mut buffer = String::new();
    for listing in floors {
        let _ = writeln!(buffer, "### Floor {}", listing.floor);
        for entry in &listing.locations {
            let _ = writeln!(buffer, "- **{}** ({})", entry.id, entry.role);
        }
        buffer.push('\n');
    }
    buffer
}

fn format_locations_basic(floors: &[FloorListing]) -> String {
    floors
        .iter()
        .flat_map(|listing| listing.locations.iter())
        .fold(String::new(), |mut buffer, entry| {
            let _ = writeln!(buffer, "{}", entry.id);
            buffer
        })
}

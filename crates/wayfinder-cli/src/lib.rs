//! Wayfinder CLI library.
//!
//! Terminal styling and output formatting shared by the `wayfinder` binary's
//! subcommands.

pub mod output;
pub mod terminal;

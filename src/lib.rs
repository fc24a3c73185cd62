//! Courtside - terminal roster browser for volleyball game-character records.
//!
//! Core library providing the JSON data loader, reference catalogs,
//! roster filter engine, and per-character preference store behind
//! the ratatui front end.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

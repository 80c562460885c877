//! Core types for the KovaaK stats tooling.
//!
//! Holds the session data model, the error taxonomy, command-line settings,
//! per-session metrics, timestamp parsing, benchmark rosters and number
//! formatting shared by the data, report and binary crates.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod rosters;
pub mod settings;
pub mod time_utils;

pub use error::{Result, StatsError};

//! Output layer for KovaaK stats.
//!
//! Renders per-scenario PNG charts with [`plotters`] and the plain-text or
//! JSON benchmark reports pasted into the progression spreadsheets.

pub mod chart;
pub mod table_view;

pub use kovaak_core as core;

//! Data ingestion layer for KovaaK stats.
//!
//! Discovers stat files, parses them into session records, indexes them by
//! scenario and aggregates per-scenario figures for the reports.

pub mod aggregator;
pub mod analysis;
pub mod filename;
pub mod parser;
pub mod reader;

pub use kovaak_core as core;

//! Tabular benchmark reports.
//!
//! Figures come out one line per roster scenario in roster order, ready to
//! paste into the matching progression spreadsheet.

use std::fmt::Write as _;

use kovaak_core::error::Result;
use kovaak_core::formatting::{format_score, format_score_row};
use kovaak_core::models::SessionRecord;
use kovaak_core::rosters::Roster;
use kovaak_data::aggregator::ScenarioAggregator;
use kovaak_data::analysis::{LoadMode, ScenarioIndex};
use serde::Serialize;
use tracing::debug;

/// Columns in the recent-scores block.
pub const RECENT_COLUMNS: usize = 5;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Which recent-history figure the report carries next to the best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// The [`RECENT_COLUMNS`] newest scores.
    RecentScores,
    /// Mean of the `runs` newest scores; 0 averages every run.
    RecentAverage { runs: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecentFigure {
    Recent(Vec<f64>),
    Average(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRow {
    pub scenario: String,
    pub best: f64,
    #[serde(flatten)]
    pub figure: RecentFigure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub style: ReportStyle,
    pub rows: Vec<ScenarioRow>,
}

// ── BenchmarkReport ───────────────────────────────────────────────────────────

impl BenchmarkReport {
    /// Load every roster scenario from `index`, failing on the first bad file.
    pub fn build(roster: &Roster, index: &ScenarioIndex, style: ReportStyle) -> Result<Self> {
        Self::build_with(roster, style, |scenario| {
            index.load(scenario, LoadMode::Strict)
        })
    }

    /// Build from a per-scenario session loader.
    pub fn build_with<F>(roster: &Roster, style: ReportStyle, mut load: F) -> Result<Self>
    where
        F: FnMut(&str) -> Result<Vec<SessionRecord>>,
    {
        let mut rows = Vec::with_capacity(roster.len());
        for &scenario in roster.scenarios {
            let sessions = load(scenario)?;
            debug!("{}: {} sessions", scenario, sessions.len());

            let figure = match style {
                ReportStyle::RecentScores => RecentFigure::Recent(ScenarioAggregator::recent_scores(
                    &sessions,
                    RECENT_COLUMNS,
                    RECENT_COLUMNS,
                )),
                ReportStyle::RecentAverage { runs } => {
                    RecentFigure::Average(ScenarioAggregator::recent_average(&sessions, runs))
                }
            };
            rows.push(ScenarioRow {
                scenario: scenario.to_string(),
                best: ScenarioAggregator::personal_best(&sessions),
                figure,
            });
        }
        Ok(Self { style, rows })
    }

    /// Plain-text rendering; every line ends in a newline.
    pub fn render_text(&self) -> String {
        let mut out = String::from("Best:\n");
        for row in &self.rows {
            let _ = writeln!(out, "{}", format_score(row.best));
        }
        out.push('\n');

        match self.style {
            ReportStyle::RecentScores => {
                let _ = writeln!(out, "{RECENT_COLUMNS} Most Recent:");
            }
            ReportStyle::RecentAverage { runs: 0 } => out.push_str("Average for all runs:\n"),
            ReportStyle::RecentAverage { runs } => {
                let _ = writeln!(out, "Average over {runs} most recent:");
            }
        }
        for row in &self.rows {
            let line = match &row.figure {
                RecentFigure::Recent(scores) => format_score_row(scores),
                RecentFigure::Average(avg) => format_score(*avg),
            };
            let _ = writeln!(out, "{line}");
        }
        if matches!(self.style, ReportStyle::RecentAverage { .. }) {
            out.push('\n');
        }
        out
    }

    /// Pretty JSON array with one object per roster scenario.
    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }
}

// ── Scenario list ─────────────────────────────────────────────────────────────

/// One `<scenario>\t<file count>` line per indexed scenario, sorted by name.
pub fn render_scenario_list(index: &ScenarioIndex) -> String {
    index.scenarios().fold(String::new(), |mut out, scenario| {
        let _ = writeln!(out, "{}\t{}", scenario, index.files(scenario).len());
        out
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

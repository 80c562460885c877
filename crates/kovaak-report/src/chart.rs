//! Per-scenario PNG charts.
//!
//! Every scenario gets a score panel and a daily-average score panel. When any
//! session recorded kills, the figure grows to a 4x2 grid that adds kills,
//! TTK and accuracy, each as a per-session panel with its daily average
//! underneath.

use std::ops::Range;
use std::path::{Path, PathBuf};

use kovaak_core::calculations::Metric;
use kovaak_core::error::{Result, StatsError};
use kovaak_core::models::SessionRecord;
use kovaak_core::time_utils::DAY_FORMAT;
use kovaak_data::aggregator::ScenarioAggregator;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

/// Pixel size of every chart image.
pub const FIGURE_SIZE: (u32, u32) = (2000, 1200);

const TITLE_FONT: (&str, u32) = ("sans-serif", 40);
const PANEL_FONT: (&str, u32) = ("sans-serif", 22);
const SESSION_DOT: i32 = 2;
const DAILY_DOT: i32 = 4;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Whether a panel plots every session or one mean per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Sessions,
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub metric: Metric,
    pub kind: PanelKind,
}

impl Panel {
    const fn sessions(metric: Metric) -> Self {
        Self {
            metric,
            kind: PanelKind::Sessions,
        }
    }

    const fn daily(metric: Metric) -> Self {
        Self {
            metric,
            kind: PanelKind::Daily,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            PanelKind::Sessions => self.metric.title(),
            PanelKind::Daily => self.metric.daily_title(),
        }
    }
}

/// Grid shape and panels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLayout {
    pub rows: usize,
    pub cols: usize,
    pub panels: Vec<Panel>,
}

const TRACKING_PANELS: [Panel; 2] = [Panel::sessions(Metric::Score), Panel::daily(Metric::Score)];

const KILL_PANELS: [Panel; 8] = [
    Panel::sessions(Metric::Score),
    Panel::sessions(Metric::Kills),
    Panel::daily(Metric::Score),
    Panel::daily(Metric::Kills),
    Panel::sessions(Metric::Ttk),
    Panel::sessions(Metric::Accuracy),
    Panel::daily(Metric::Ttk),
    Panel::daily(Metric::Accuracy),
];

/// Pick the grid for a scenario's sessions.
pub fn plan_layout(sessions: &[SessionRecord]) -> ChartLayout {
    if sessions.iter().any(|s| s.summary.kills > 0) {
        ChartLayout {
            rows: 4,
            cols: 2,
            panels: KILL_PANELS.to_vec(),
        }
    } else {
        ChartLayout {
            rows: 2,
            cols: 1,
            panels: TRACKING_PANELS.to_vec(),
        }
    }
}

// ── Series ────────────────────────────────────────────────────────────────────

/// Points for one panel. Daily panels label each x index with its day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelSeries {
    pub points: Vec<(f64, f64)>,
    pub labels: Vec<String>,
}

impl PanelSeries {
    /// Build the series for `panel` from sessions already sorted by date.
    pub fn prepare(sessions: &[SessionRecord], panel: Panel) -> Self {
        match panel.kind {
            PanelKind::Sessions => Self {
                points: sessions
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (i as f64, panel.metric.extract(s)))
                    .collect(),
                labels: Vec::new(),
            },
            PanelKind::Daily => {
                let daily =
                    ScenarioAggregator::daily_averages(sessions, |s| panel.metric.extract(s));
                Self {
                    points: daily
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| (i as f64, v))
                        .collect(),
                    labels: daily
                        .days
                        .iter()
                        .map(|d| d.format(DAY_FORMAT).to_string())
                        .collect(),
                }
            }
        }
    }

    /// Horizontal extent with half a step of room on both sides.
    pub fn x_range(&self) -> Range<f64> {
        let n = self.points.len().max(1) as f64;
        -0.5..n - 0.5
    }

    /// Vertical extent padded by 5%, never empty.
    pub fn y_range(&self) -> Range<f64> {
        let (lo, hi) = self
            .points
            .iter()
            .map(|&(_, y)| y)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        if !lo.is_finite() || !hi.is_finite() {
            return 0.0..1.0;
        }
        let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
        lo - pad..hi + pad
    }

    /// Tick text for the x value `x`.
    pub fn x_label(&self, x: f64) -> String {
        if self.labels.is_empty() {
            return format!("{x:.0}");
        }
        let nearest = x.round();
        if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
            return String::new();
        }
        self.labels
            .get(nearest as usize)
            .cloned()
            .unwrap_or_default()
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Where the chart for `scenario` is written.
pub fn chart_path(img_dir: &Path, scenario: &str) -> PathBuf {
    img_dir.join(format!("{scenario}.png"))
}

/// Draw `scenario`'s figure into `img_dir` and return the image path.
///
/// `sessions` must be sorted by date.
pub fn render_scenario_chart(
    scenario: &str,
    sessions: &[SessionRecord],
    img_dir: &Path,
) -> Result<PathBuf> {
    let path = chart_path(img_dir, scenario);
    let layout = plan_layout(sessions);
    debug!(
        "Drawing {} ({} sessions, {}x{} panels)",
        scenario,
        sessions.len(),
        layout.rows,
        layout.cols
    );

    let target = path.clone();
    let root = BitMapBackend::new(&target, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;
    let body = root.titled(scenario, TITLE_FONT).map_err(chart_error)?;

    for (area, panel) in body
        .split_evenly((layout.rows, layout.cols))
        .iter()
        .zip(&layout.panels)
    {
        draw_panel(area, *panel, &PanelSeries::prepare(sessions, *panel))?;
    }

    root.present().map_err(chart_error)?;
    Ok(path)
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: Panel,
    series: &PanelSeries,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(panel.title(), PANEL_FONT)
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(64)
        .build_cartesian_2d(series.x_range(), series.y_range())
        .map_err(chart_error)?;

    let x_label = |x: &f64| series.x_label(*x);
    chart
        .configure_mesh()
        .x_labels(series.points.len().clamp(2, 12))
        .x_label_formatter(&x_label)
        .draw()
        .map_err(chart_error)?;

    let dot = match panel.kind {
        PanelKind::Sessions => SESSION_DOT,
        PanelKind::Daily => DAILY_DOT,
    };
    chart
        .draw_series(
            series
                .points
                .iter()
                .map(|&p| Circle::new(p, dot, BLUE.filled())),
        )
        .map_err(chart_error)?;
    Ok(())
}

fn chart_error(e: impl std::fmt::Display) -> StatsError {
    StatsError::Chart(e.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

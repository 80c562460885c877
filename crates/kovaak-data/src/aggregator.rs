//! Per-scenario aggregation of parsed sessions.
//!
//! Daily means feed the "per day" chart panels; personal best and the recent
//! window feed the benchmark reports.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use kovaak_core::models::SessionRecord;

// ── DailySeries ───────────────────────────────────────────────────────────────

/// One mean value per calendar day, days ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    pub days: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

// ── ScenarioAggregator ────────────────────────────────────────────────────────

/// Stateless helper over the sessions of a single scenario.
pub struct ScenarioAggregator;

impl ScenarioAggregator {
    /// Mean of `metric` per calendar day of the session's date.
    ///
    /// Only days with at least one session appear.
    pub fn daily_averages(
        sessions: &[SessionRecord],
        metric: impl Fn(&SessionRecord) -> f64,
    ) -> DailySeries {
        let mut map: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
        for session in sessions {
            let slot = map.entry(session.day()).or_insert((0.0, 0));
            slot.0 += metric(session);
            slot.1 += 1;
        }

        let (days, values) = map
            .into_iter()
            .map(|(day, (sum, count))| (day, sum / f64::from(count)))
            .unzip();
        DailySeries { days, values }
    }

    /// Highest score across `sessions`, or 0 when there are none.
    pub fn personal_best(sessions: &[SessionRecord]) -> f64 {
        sessions
            .iter()
            .map(|s| s.summary.score)
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// Scores of the `limit` most recent sessions, newest first, padded with
    /// zeros to `width` entries. A `limit` of 0 takes every session.
    ///
    /// Sessions sharing a timestamp keep their input order.
    pub fn recent_scores(sessions: &[SessionRecord], limit: usize, width: usize) -> Vec<f64> {
        let mut scores: Vec<f64> = Self::most_recent(sessions, limit)
            .map(|s| s.summary.score)
            .collect();
        if scores.len() < width {
            scores.resize(width, 0.0);
        }
        scores
    }

    /// Mean score of the `limit` most recent sessions (0 means all), or 0
    /// when there are none.
    pub fn recent_average(sessions: &[SessionRecord], limit: usize) -> f64 {
        let (sum, count) = Self::most_recent(sessions, limit)
            .fold((0.0, 0u32), |(sum, count), s| (sum + s.summary.score, count + 1));
        if count == 0 {
            0.0
        } else {
            sum / f64::from(count)
        }
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn most_recent(
        sessions: &[SessionRecord],
        limit: usize,
    ) -> impl Iterator<Item = &SessionRecord> {
        let mut ordered: Vec<&SessionRecord> = sessions.iter().collect();
        ordered.sort_by(|a, b| b.date.cmp(&a.date));
        let take = if limit == 0 { ordered.len() } else { limit };
        ordered.into_iter().take(take)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

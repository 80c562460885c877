use serde::{Deserialize, Serialize};

use crate::models::{KillRecord, SessionRecord};

// ── MetricsCalculator ─────────────────────────────────────────────────────────

/// Stateless collection of per-session metrics derived from the kill list.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Total hits divided by total shots across `kills`.
    ///
    /// Returns `0.0` when no shots were fired.
    pub fn accuracy(kills: &[KillRecord]) -> f64 {
        let (shots, hits) = kills.iter().fold((0u64, 0u64), |(shots, hits), kill| {
            (shots + u64::from(kill.shots), hits + u64::from(kill.hits))
        });
        if shots == 0 {
            return 0.0;
        }
        hits as f64 / shots as f64
    }

    /// Mean number of seconds between consecutive kill timestamps.
    ///
    /// Uses kill timestamps, not the per-kill `ttk` column. Returns `0.0`
    /// with fewer than two kills.
    pub fn average_ttk(kills: &[KillRecord]) -> f64 {
        if kills.len() < 2 {
            return 0.0;
        }
        let total: f64 = kills
            .windows(2)
            .map(|pair| seconds_between(&pair[0], &pair[1]))
            .sum();
        total / (kills.len() - 1) as f64
    }
}

fn seconds_between(earlier: &KillRecord, later: &KillRecord) -> f64 {
    let delta = later.timestamp - earlier.timestamp;
    // Microsecond precision matches what the game exports.
    delta.num_microseconds().unwrap_or_default() as f64 / 1_000_000.0
}

// ── Metric ────────────────────────────────────────────────────────────────────

/// A per-session value that can be charted or averaged per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Score,
    Kills,
    Accuracy,
    Ttk,
}

impl Metric {
    /// Pull this metric out of a session.
    pub fn extract(self, session: &SessionRecord) -> f64 {
        match self {
            Metric::Score => session.summary.score,
            Metric::Kills => f64::from(session.summary.kills),
            Metric::Accuracy => session.accuracy(),
            Metric::Ttk => session.average_ttk(),
        }
    }

    /// Panel title for the per-session series.
    pub fn title(self) -> &'static str {
        match self {
            Metric::Score => "Score",
            Metric::Kills => "Kills",
            Metric::Accuracy => "Accuracy",
            Metric::Ttk => "TTK",
        }
    }

    /// Panel title for the daily-average series.
    pub fn daily_title(self) -> &'static str {
        match self {
            Metric::Score => "Avg Score Per Day",
            Metric::Kills => "Avg Kills Per Day",
            Metric::Accuracy => "Avg Accuracy Per Day",
            Metric::Ttk => "Avg TTK Per Day",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameVersion, SessionSummary};
    use chrono::{NaiveDate, NaiveTime};

    fn make_kill(index: u32, time: &str, shots: u32, hits: u32) -> KillRecord {
        KillRecord {
            index,
            timestamp: NaiveTime::parse_from_str(time, "%H:%M:%S%.f").unwrap(),
            bot: "Bot".to_string(),
            weapon: "Pistol".to_string(),
            ttk: 0.5,
            shots,
            hits,
            accuracy: 0.0,
            damage_done: 100.0,
            damage_possible: 100.0,
            efficiency: 1.0,
            cheated: false,
        }
    }

    fn make_session(kills: Vec<KillRecord>) -> SessionRecord {
        SessionRecord {
            scenario: "Test".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            summary: SessionSummary {
                kills: kills.len() as u32,
                deaths: 0,
                fight_time: 60.0,
                avg_ttk: 0.5,
                damage_done: 0.0,
                damage_taken: 0.0,
                score: 750.0,
                game_version: GameVersion(vec![2, 0, 1, 0]),
            },
            kills,
            weapons: Vec::new(),
        }
    }

    // ── accuracy ──────────────────────────────────────────────────────────────

    #[test]
    fn test_accuracy_zero_shots() {
        let kills = vec![make_kill(1, "10:00:00.0", 0, 0)];
        assert_eq!(MetricsCalculator::accuracy(&kills), 0.0);
        assert_eq!(MetricsCalculator::accuracy(&[]), 0.0);
    }

    #[test]
    fn test_accuracy_sums_across_kills() {
        let kills = vec![
            make_kill(1, "10:00:00.0", 4, 1),
            make_kill(2, "10:00:01.0", 4, 3),
        ];
        assert!((MetricsCalculator::accuracy(&kills) - 0.5).abs() < 1e-12);
    }

    // ── average_ttk ───────────────────────────────────────────────────────────

    #[test]
    fn test_average_ttk_fewer_than_two_kills() {
        assert_eq!(MetricsCalculator::average_ttk(&[]), 0.0);
        let kills = vec![make_kill(1, "10:00:00.5", 1, 1)];
        assert_eq!(MetricsCalculator::average_ttk(&kills), 0.0);
    }

    #[test]
    fn test_average_ttk_consecutive_deltas() {
        let kills = vec![
            make_kill(1, "10:00:00.000000", 1, 1),
            make_kill(2, "10:00:00.500000", 1, 1),
            make_kill(3, "10:00:02.000000", 1, 1),
        ];
        // ((0.5) + (1.5)) / 2
        assert!((MetricsCalculator::average_ttk(&kills) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_ttk_ignores_ttk_column() {
        let mut kills = vec![
            make_kill(1, "10:00:00.0", 1, 1),
            make_kill(2, "10:00:03.0", 1, 1),
        ];
        kills[1].ttk = 99.0;
        assert!((MetricsCalculator::average_ttk(&kills) - 3.0).abs() < 1e-12);
    }

    // ── Metric ────────────────────────────────────────────────────────────────

    #[test]
    fn test_metric_extract() {
        let session = make_session(vec![
            make_kill(1, "10:00:00.0", 2, 1),
            make_kill(2, "10:00:02.0", 2, 2),
        ]);
        assert_eq!(Metric::Score.extract(&session), 750.0);
        assert_eq!(Metric::Kills.extract(&session), 2.0);
        assert!((Metric::Accuracy.extract(&session) - 0.75).abs() < 1e-12);
        assert!((Metric::Ttk.extract(&session) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_metric_titles() {
        assert_eq!(Metric::Score.title(), "Score");
        assert_eq!(Metric::Ttk.daily_title(), "Avg TTK Per Day");
    }
}
